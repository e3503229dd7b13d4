//! Template adapters - CSV files with Latin-1 bytes on disk.

mod csv_template_file;
mod latin1;

pub use csv_template_file::CsvTemplateFile;
pub use latin1::{from_disk_encoding, to_disk_encoding, EncodingError};
