//! Project command handlers.

mod seed_project;

pub use seed_project::{SeedProjectCommand, SeedProjectHandler, SeedProjectResult};
