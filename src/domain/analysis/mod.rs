//! Analysis Module - the numeric input of a multi-criteria analysis.
//!
//! # Components
//!
//! - `InputMatrix` - criterion × alternative integer grid with validation passes
//! - `WeightSet` - one weight per selected criterion
//! - `CollectedInput` - immutable, validated bundle handed to the ranking step
//!
//! Everything here is pure: no I/O, no ports.

mod collected_input;
mod errors;
mod input_matrix;
mod weight_set;

pub use collected_input::{CollectedInput, MIN_ALTERNATIVES, MIN_CRITERIA};
pub use errors::{AssemblyError, CellLocator, InputError, WeightError};
pub use input_matrix::InputMatrix;
pub use weight_set::WeightSet;
