use crate::domain::model::StudentRecord;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_config_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "student-roster")]
#[command(about = "In-memory student roster manager with a text menu")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Start with an empty roster instead of the demo data
    #[arg(long)]
    pub no_seed: bool,

    /// Do not wait for Enter after each menu action
    #[arg(long)]
    pub no_pause: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn seed_demo_data(&self) -> bool {
        !self.no_seed
    }

    fn pause_after_action(&self) -> bool {
        !self.no_pause
    }

    fn seed_students(&self) -> Result<Vec<StudentRecord>> {
        Ok(Vec::new())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_config_path("config", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let config = CliConfig::parse_from(["student-roster", "--no-seed", "--no-pause", "-v"]);
        assert!(!config.seed_demo_data());
        assert!(!config.pause_after_action());
        assert!(config.verbose);
        assert!(config.config.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["student-roster", "--config", "roster.toml"]);
        assert!(config.seed_demo_data());
        assert!(config.pause_after_action());
        assert_eq!(config.config.as_deref(), Some("roster.toml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_toml_config_path_is_rejected() {
        let config = CliConfig::parse_from(["student-roster", "--config", "roster.json"]);
        assert!(config.validate().is_err());
    }
}
