//! Configuration loading and resolution.

use std::path::PathBuf;

/// Environment variable overriding the default save location.
pub const OUTPUT_ENV: &str = "PARAMRAM_OUTPUT";

/// Resolve where `--save` writes its results.
///
/// Order: explicit path, then `PARAMRAM_OUTPUT`, then
/// `~/database/parameters.txt`.
pub fn resolve_output_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = std::env::var(OUTPUT_ENV) {
        if !env_path.is_empty() {
            return PathBuf::from(env_path);
        }
    }

    resolve_default_output_path()
}

fn resolve_default_output_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("database")
        .join("parameters.txt")
}
