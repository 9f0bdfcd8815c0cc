//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("Config file: {}", config_path.display());
            println!("  backend_url: {}", config.backend_url);
        }
        ConfigAction::SetUrl { url } => {
            let updated = set_url(config_path, url)?;
            println!(
                "{}",
                formatter.success(&format!("backend_url set to {}", updated.backend_url))
            );
        }
        ConfigAction::Path => println!("{}", config_path.display()),
    }

    Ok(())
}

/// Persist a new webhook URL to the file at `config_path`.
///
/// Only the file's own contents are updated; command-line overrides are not
/// written back.
pub fn set_url(config_path: &Path, url: String) -> Result<Config> {
    let mut config = Config::load_from(config_path)?;
    config.backend_url = url.trim().to_string();
    config.validate()?;
    config.save_to(config_path)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_set_url_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        set_url(&path, " https://sca.example/hook ".to_string()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url, "https://sca.example/hook");
    }

    #[test]
    fn test_set_url_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(
            set_url(&path, "localhost:5678".to_string()),
            Err(CliError::Config(_))
        ));
        assert!(!path.exists());
    }
}
