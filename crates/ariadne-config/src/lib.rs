//! Typed, layered configuration for the Ariadne routing engine.
//!
//! Configuration is applied in layers: built-in defaults, then an optional
//! TOML or JSON file, then scalar environment variable overrides. The final
//! configuration is validated before use, so a malformed route pattern or
//! method constraint fails at startup rather than at request time.
//!
//! # Example
//!
//! ```no_run
//! use ariadne_config::ConfigLoader;
//!
//! # fn main() -> Result<(), ariadne_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("routes.toml")?
//!     .with_env_prefix("ARIADNE")
//!     .load()?;
//!
//! let table = config.build_table()?;
//! let mode = config.mode.to_mode();
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod loader;

pub use config::{
    ModeConfig, ModeKind, NamespaceDef, RouteDef, RouteGroup, RouteSpec, RoutingConfig,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
