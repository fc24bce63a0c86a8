//! Shared runtime concerns for the user-service binary: configuration
//! loading and logging initialization.

pub mod config;
pub mod logging;

pub use config::{
    AccessPolicyKind, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, SecurityConfig,
    ServerConfig,
};
