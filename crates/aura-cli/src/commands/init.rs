//! Configuration file command.

use crate::cli::InitConfigArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the init-config command.
///
/// Writes the defaults to `path` (or `~/.aura/config.toml`).
pub fn execute_init_config(args: InitConfigArgs, path: Option<&Path>, formatter: &Formatter) -> Result<String> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::path()?,
    };

    if path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }

    Config::default().save(&path)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(formatter.success(&format!("Config written to {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_init_config(InitConfigArgs { force: false }, Some(&path), &formatter).unwrap();
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.settings.history_size, 1000);

        let again = execute_init_config(InitConfigArgs { force: false }, Some(&path), &formatter);
        assert!(matches!(again, Err(CliError::Config(_))));
        assert!(execute_init_config(InitConfigArgs { force: true }, Some(&path), &formatter).is_ok());
    }
}
