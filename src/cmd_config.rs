//! `config` subcommand.

use tracing::warn;

use pagesnap_config::{Config, ConfigLoader, ConfigValidator};

/// Print the effective configuration, or validate it with `check`.
pub(crate) fn handle_config(config: &Config, check: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !check {
        print!("{}", ConfigLoader::to_toml(config)?);
        return Ok(());
    }

    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        eprintln!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("Configuration is valid ({} warning(s))", result.warnings.len());
        Ok(())
    } else {
        Err(format!("Configuration has {} error(s)", result.errors.len()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_default_config() {
        assert!(handle_config(&Config::default(), true).is_ok());
    }

    #[test]
    fn test_check_invalid_config() {
        let mut config = Config::default();
        config.extract.max_concurrency = 0;
        let err = handle_config(&config, true).unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }

    #[test]
    fn test_print_config() {
        assert!(handle_config(&Config::default(), false).is_ok());
    }
}
