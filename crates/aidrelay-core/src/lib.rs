//! Core domain types and policy for the aidrelay emergency service.
//!
//! Holds the normalized alert model shared by every crate in the workspace,
//! the pure severity/goal/category policy, and application configuration.
//! No I/O lives here beyond reading the watched-locations file.

mod alert;
mod app_config;
mod config;
mod locations;
pub mod policy;

pub use alert::{Coordinates, DisasterAlert, HazardType, ProcessedAlertKey, Severity};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use locations::{load_locations, LocationsFile, WatchedLocation};
