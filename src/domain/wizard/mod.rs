//! Wizard module - the collection run as an explicit state machine.
//!
//! # Components
//!
//! - `WizardStep` - named steps and their ordering
//! - `CollectionWizard` - gates, entry actions, navigation
//! - `WizardError` - everything a wizard operation can refuse

mod errors;
mod step;
#[allow(clippy::module_inception)]
mod wizard;

pub use errors::WizardError;
pub use step::WizardStep;
pub use wizard::CollectionWizard;
