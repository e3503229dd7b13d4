//! Seed adapters - default project contents from YAML.

mod yaml_seed;

pub use yaml_seed::{SeedCriterion, SeedData, SeedError};
