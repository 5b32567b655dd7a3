//! Settings and error plumbing for the binary
//!
//! ## Module Organization
//!
//! - `error` - [`CliError`] and the `CliResult` alias
//! - `settings_persistence` - `settings.json` location, load and save

pub mod error;
pub mod settings_persistence;

pub use error::{CliError, CliResult};
pub use settings_persistence::{read_settings, save_settings, settings_path, Settings};
