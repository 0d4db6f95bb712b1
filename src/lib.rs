pub mod analytics;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fixture;
pub mod model;
pub mod query;
pub mod stats;
pub mod triage;
pub mod util;
