//! Command-line front end for the Senterej engine
//!
//! ## Module Organization
//!
//! - `cli` - Argument definitions
//! - `commands` - One handler per subcommand, each returning printable text
//! - `core` - Settings persistence and CLI errors
//! - `display` - Text board rendering

pub mod cli;
pub mod commands;
pub mod core;
pub mod display;
