//! Domain layer containing the collection logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, state machine trait)
//! - `catalog` - Alternatives and criteria as they come out of the stores
//! - `analysis` - Input matrix, weight set and the collected input record
//! - `template` - Layout of the spreadsheet data-entry template
//! - `wizard` - The collection run as a headless state machine

pub mod analysis;
pub mod catalog;
pub mod foundation;
pub mod template;
pub mod wizard;
