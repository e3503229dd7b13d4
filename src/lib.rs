//! MCA Intake - decision-input collection for multi-criteria analysis.
//!
//! This crate collects the alternatives, criteria, score matrix and weights
//! of a multi-criteria analysis through a step-by-step wizard, persists the
//! candidate lists and finished runs in SQLite, and moves score matrices in
//! and out of spreadsheet templates.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
