//! On-disk configuration and the JSON task file used by the CLI.
//!
//! The scheduling algorithms never touch these; callers load records, run
//! an operation, and persist the returned set.

mod config;
mod task_file;

pub use config::Config;
pub use task_file::TaskFile;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/schedwise[-dev]/`, creating it if needed.
///
/// `SCHEDWISE_HOME` overrides the location entirely; otherwise
/// `SCHEDWISE_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("SCHEDWISE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or(ConfigError::NoHomeDir)?
                .join(".config");
            let env = std::env::var("SCHEDWISE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("schedwise-dev")
            } else {
                base_dir.join("schedwise")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
