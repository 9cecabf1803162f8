use crate::domain::ports::{CONFIRMATION_FUNCTION, LEADS_TABLE};
use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub backend: BackendSection,
    #[serde(default)]
    pub names: NamesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    pub url: String,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamesSection {
    #[serde(default = "default_leads_table")]
    pub leads_table: String,
    #[serde(default = "default_confirmation_function")]
    pub confirmation_function: String,
}

fn default_leads_table() -> String {
    LEADS_TABLE.to_string()
}

fn default_confirmation_function() -> String {
    CONFIRMATION_FUNCTION.to_string()
}

impl Default for NamesSection {
    fn default() -> Self {
        Self {
            leads_table: default_leads_table(),
            confirmation_function: default_confirmation_function(),
        }
    }
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            backend: BackendSection {
                url: url.into(),
                api_key: api_key.into(),
                timeout_seconds: None,
            },
            names: NamesSection::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeadError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LeadError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Reads `LEAD_CAPTURE_URL`, `LEAD_CAPTURE_API_KEY` and the optional
    /// `LEAD_CAPTURE_TIMEOUT_SECONDS`.
    pub fn from_env() -> Result<Self> {
        let url = env::var("LEAD_CAPTURE_URL").map_err(|_| LeadError::MissingConfigError {
            field: "LEAD_CAPTURE_URL".to_string(),
        })?;
        let api_key =
            env::var("LEAD_CAPTURE_API_KEY").map_err(|_| LeadError::MissingConfigError {
                field: "LEAD_CAPTURE_API_KEY".to_string(),
            })?;

        let timeout_seconds = match env::var("LEAD_CAPTURE_TIMEOUT_SECONDS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|e| {
                LeadError::InvalidConfigValueError {
                    field: "LEAD_CAPTURE_TIMEOUT_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            Err(_) => None,
        };

        let mut config = Self::new(url, api_key);
        config.backend.timeout_seconds = timeout_seconds;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn url(&self) -> &str {
        self.backend.url.trim_end_matches('/')
    }

    pub fn api_key(&self) -> &str {
        &self.backend.api_key
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.backend
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn leads_table(&self) -> &str {
        &self.names.leads_table
    }

    pub fn confirmation_function(&self) -> &str {
        &self.names.confirmation_function
    }
}

impl Validate for BackendConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("backend.url", &self.backend.url)?;
        validation::validate_non_empty_string("backend.api_key", &self.backend.api_key)?;

        if self.backend.api_key.contains("${") {
            return Err(LeadError::InvalidConfigValueError {
                field: "backend.api_key".to_string(),
                value: self.backend.api_key.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }

        if let Some(timeout) = self.backend.timeout_seconds {
            validation::validate_positive_number("backend.timeout_seconds", timeout, 1)?;
        }

        validation::validate_non_empty_string("names.leads_table", &self.names.leads_table)?;
        validation::validate_non_empty_string(
            "names.confirmation_function",
            &self.names.confirmation_function,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[backend]
url = "https://project.example.co/"
api_key = "anon-key"
"#;

        let config = BackendConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.url(), "https://project.example.co");
        assert_eq!(config.api_key(), "anon-key");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.leads_table(), "leads");
        assert_eq!(config.confirmation_function(), "send-confirmation");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
url = "http://localhost:54321"
api_key = "local-key"
timeout_seconds = 3

[names]
leads_table = "staging_leads"
confirmation_function = "send-confirmation-staging"
"#;

        let config = BackendConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.leads_table(), "staging_leads");
        assert_eq!(config.confirmation_function(), "send-confirmation-staging");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEAD_CAPTURE_TEST_KEY", "secret-from-env");

        let toml_content = r#"
[backend]
url = "https://project.example.co"
api_key = "${LEAD_CAPTURE_TEST_KEY}"
"#;

        let config = BackendConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "secret-from-env");

        std::env::remove_var("LEAD_CAPTURE_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[backend]
url = "https://project.example.co"
api_key = "${LEAD_CAPTURE_DEFINITELY_UNSET}"
"#;

        let config = BackendConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "${LEAD_CAPTURE_DEFINITELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = BackendConfig::new("invalid-url", "key");
        assert!(config.validate().is_err());

        config.backend.url = "https://project.example.co".to_string();
        config.backend.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.backend.timeout_seconds = Some(5);
        config.names.leads_table = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_backend_section_is_a_config_error() {
        let err = BackendConfig::from_toml_str("[names]\nleads_table = \"x\"\n").unwrap_err();
        assert!(matches!(err, LeadError::ConfigError { .. }));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("LEAD_CAPTURE_URL", "https://env.example.co");
        std::env::set_var("LEAD_CAPTURE_API_KEY", "env-key");
        std::env::set_var("LEAD_CAPTURE_TIMEOUT_SECONDS", "7");

        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.url(), "https://env.example.co");
        assert_eq!(config.api_key(), "env-key");
        assert_eq!(config.timeout(), Duration::from_secs(7));
        assert_eq!(config.leads_table(), "leads");

        std::env::set_var("LEAD_CAPTURE_TIMEOUT_SECONDS", "soon");
        assert!(matches!(
            BackendConfig::from_env(),
            Err(LeadError::InvalidConfigValueError { .. })
        ));

        std::env::remove_var("LEAD_CAPTURE_TIMEOUT_SECONDS");
        std::env::remove_var("LEAD_CAPTURE_API_KEY");
        assert!(matches!(
            BackendConfig::from_env(),
            Err(LeadError::MissingConfigError { .. })
        ));

        std::env::remove_var("LEAD_CAPTURE_URL");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[backend]
url = "https://file.example.co"
api_key = "file-key"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = BackendConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.url(), "https://file.example.co");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = BackendConfig::from_file("/nonexistent/lead-capture.toml").unwrap_err();
        assert!(matches!(err, LeadError::IoError(_)));
    }
}
