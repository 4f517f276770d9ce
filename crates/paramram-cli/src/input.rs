//! URL list input.

use std::io::BufRead;

/// Read one URL per line, dropping blank lines and surrounding whitespace.
pub fn read_urls<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            urls.push(trimmed.to_string());
        }
    }
    Ok(urls)
}
