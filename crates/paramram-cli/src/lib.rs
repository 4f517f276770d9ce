//! paramram command-line front end — URL input, result output and config resolution.

pub mod config;
pub mod input;
pub mod output;

pub use config::resolve_output_path;
pub use input::read_urls;
pub use output::{print_parameters, save_parameters};
