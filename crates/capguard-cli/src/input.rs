use std::fs;
use std::io::{self, Read};
use std::path::Path;

use capguard_core::StrategyParameters;

/// Read strategy parameters from a JSON file.
pub fn read_params_file(
    path: &str,
) -> Result<StrategyParameters, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let params: StrategyParameters = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?;
    Ok(params)
}

/// Read strategy parameters from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_params_stdin() -> Result<Option<StrategyParameters>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let params: StrategyParameters = serde_json::from_str(trimmed)?;
    Ok(Some(params))
}

/// Resolve the path relative to the current directory and check it
/// points at an existing file.
fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}
