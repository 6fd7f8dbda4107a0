//! Configuration commands.

use std::io::Write;
use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the effective configuration as TOML.
pub fn dump<W: Write>(config: &ClientConfig, path: &Path, out: &mut W) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {e}")))?;
    writeln!(out, "# config.toml ({})", path.display())?;
    write!(out, "{toml_str}")?;
    Ok(())
}

/// Validate the configuration.
pub fn validate<W: Write>(config: &ClientConfig, out: &mut W) -> ClientResult<()> {
    let problems = config.problems();
    if !problems.is_empty() {
        return Err(ClientError::Config(problems.join("; ")));
    }
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Show the configuration file path and where saved filters live.
pub fn path<W: Write>(config_path: &Path, config: &ClientConfig, out: &mut W) -> ClientResult<()> {
    writeln!(out, "config: {}", config_path.display())?;
    writeln!(out, "filters: {}", config.store.resolved_path().display())?;
    Ok(())
}
