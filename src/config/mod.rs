pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use toml_config::{TomlConfig, DEFAULT_API_BASE_URL};

#[cfg(feature = "cli")]
use crate::core::conformance::RecordKind;
#[cfg(feature = "cli")]
use clap::Parser;

/// Effective contract settings after merging flags and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    pub api_base_url: String,
    pub enforce_origin: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            enforce_origin: false,
        }
    }
}

impl ConfigProvider for ContractConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn enforce_origin(&self) -> bool {
        self.enforce_origin
    }
}

impl Validate for ContractConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pokedex-check")]
#[command(about = "Check JSON documents against the pokedex record shapes")]
pub struct CliConfig {
    #[arg(long, value_enum, help = "Record shape the document must conform to")]
    pub kind: RecordKind,

    #[arg(long, help = "JSON file holding one record or an array of records")]
    pub input: String,

    #[arg(long, help = "Optional TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Base URL every resource reference must live under")]
    pub api_base_url: Option<String>,

    #[arg(long, help = "Reject resource URLs outside the API base")]
    pub enforce_origin: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags take precedence over the file, the file over built-in defaults.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> ContractConfig {
        let api_base_url = self
            .api_base_url
            .clone()
            .or_else(|| file.map(|f| f.api_base_url().to_string()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let enforce_origin = self.enforce_origin || file.is_some_and(|f| f.enforce_origin());

        ContractConfig {
            api_base_url,
            enforce_origin,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Some(base) = &self.api_base_url {
            validate_url("api_base_url", base)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> CliConfig {
        let mut argv = vec!["pokedex-check"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_kind_values() {
        let config = cli(&["--kind", "pokemon-type", "--input", "types.json"]);
        assert_eq!(config.kind, RecordKind::PokemonType);
        assert!(config.validate().is_ok());

        assert!(CliConfig::try_parse_from(["pokedex-check", "--kind", "berry", "--input", "x.json"]).is_err());
    }

    #[test]
    fn test_resolve_precedence() {
        let file = TomlConfig::from_toml_str(
            "[contract]\napi_base_url = \"https://file.example.com/api/\"\nenforce_origin = true\n",
        )
        .unwrap();

        let from_file = cli(&["--kind", "pokemon", "--input", "p.json"]).resolve(Some(&file));
        assert_eq!(from_file.api_base_url, "https://file.example.com/api/");
        assert!(from_file.enforce_origin);

        let from_flag = cli(&[
            "--kind",
            "pokemon",
            "--input",
            "p.json",
            "--api-base-url",
            "https://flag.example.com/api/",
        ])
        .resolve(Some(&file));
        assert_eq!(from_flag.api_base_url, "https://flag.example.com/api/");

        let defaults = cli(&["--kind", "pokemon", "--input", "p.json"]).resolve(None);
        assert_eq!(defaults, ContractConfig::default());
    }

    #[test]
    fn test_rejects_bad_base_url_flag() {
        let config = cli(&[
            "--kind",
            "ability",
            "--input",
            "a.json",
            "--api-base-url",
            "ftp://pokeapi.co/",
        ]);
        assert!(config.validate().is_err());
    }
}
