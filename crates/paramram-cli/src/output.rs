//! Result sinks: stdout or a flat newline-delimited file.

use anyhow::{Context, Result};
use paramram::ParameterSet;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write each parameter on its own line, sorted.
pub fn print_parameters<W: Write>(out: &mut W, parameters: &ParameterSet) -> Result<()> {
    for name in parameters.to_sorted_vec() {
        writeln!(out, "{name}")?;
    }
    out.flush()?;
    Ok(())
}

/// Append every parameter to `path`, creating the file and its parent
/// directories as needed.
pub fn save_parameters(path: &Path, parameters: &ParameterSet) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    print_parameters(&mut writer, parameters)
        .with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("saved {} parameters to {}", parameters.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParameterSet {
        ["user_id", "page", "q"].into_iter().collect()
    }

    #[test]
    fn test_print_sorted_lines() {
        let mut buf = Vec::new();
        print_parameters(&mut buf, &sample()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "page\nq\nuser_id\n");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database").join("parameters.txt");
        save_parameters(&path, &sample()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "page\nq\nuser_id\n");
    }

    #[test]
    fn test_save_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parameters.txt");
        std::fs::write(&path, "existing\n").unwrap();

        let more: ParameterSet = ["token"].into_iter().collect();
        save_parameters(&path, &more).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\ntoken\n");
    }
}
