//! Template module - layout of the spreadsheet data-entry template.

mod errors;
mod layout;

pub use errors::TemplateError;
pub use layout::{TemplateLayout, INSTRUCTIONS, LEADING_COLUMNS};
