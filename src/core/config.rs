use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_CURRENCY_LAYER_URL: &str = "https://api.apilayer.com";
pub const DEFAULT_API_KEY_ENV: &str = "XRATE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSourceKind {
    #[default]
    Live,
    Fixture,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyLayerProviderConfig {
    #[serde(default = "default_currency_layer_url")]
    pub base_url: String,
    /// Inline key; takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<ApiKey>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CurrencyLayerProviderConfig {
    fn default() -> Self {
        CurrencyLayerProviderConfig {
            base_url: default_currency_layer_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixtureProviderConfig {
    #[serde(default = "default_fixture_delay_ms")]
    pub delay_ms: u64,
}

impl Default for FixtureProviderConfig {
    fn default() -> Self {
        FixtureProviderConfig {
            delay_ms: default_fixture_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub currency_layer: CurrencyLayerProviderConfig,
    #[serde(default)]
    pub fixture: FixtureProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub source: QuoteSourceKind,
    /// Serve the fixed preview state instead of a live engine.
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Secret used to authenticate against the quote API. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl CurrencyLayerProviderConfig {
    pub fn resolve_api_key(&self) -> Result<ApiKey> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ApiKey> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.expose().is_empty()) {
            debug!("Using API key from config file");
            return Ok(key.clone());
        }
        match lookup(&self.api_key_env).filter(|k| !k.is_empty()) {
            Some(key) => {
                debug!("Using API key from ${}", self.api_key_env);
                Ok(ApiKey::new(key))
            }
            None => bail!(
                "No API key configured: set providers.currency_layer.api_key or ${}",
                self.api_key_env
            ),
        }
    }
}

impl AppConfig {
    /// Upper bound for a single quote round trip as seen by the UI.
    pub fn settle_timeout(&self) -> Duration {
        let fetch = match self.source {
            QuoteSourceKind::Live => {
                Duration::from_secs(self.providers.currency_layer.timeout_secs)
            }
            QuoteSourceKind::Fixture => Duration::from_millis(self.providers.fixture.delay_ms),
        };
        fetch + Duration::from_secs(1)
    }

    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "xrate", "xrate")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

fn default_currency_layer_url() -> String {
    DEFAULT_CURRENCY_LAYER_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_fixture_delay_ms() -> u64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
source: fixture
preview: true
providers:
  currency_layer:
    base_url: "http://example.com/apilayer"
    api_key_env: "MY_KEY"
    timeout_secs: 3
  fixture:
    delay_ms: 0
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.source, QuoteSourceKind::Fixture);
        assert!(config.preview);
        assert_eq!(
            config.providers.currency_layer.base_url,
            "http://example.com/apilayer"
        );
        assert_eq!(config.providers.currency_layer.api_key_env, "MY_KEY");
        assert_eq!(config.providers.currency_layer.timeout_secs, 3);
        assert!(config.providers.currency_layer.api_key.is_none());
        assert_eq!(config.providers.fixture.delay_ms, 0);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.source, QuoteSourceKind::Live);
        assert!(!config.preview);
        assert_eq!(
            config.providers.currency_layer.base_url,
            DEFAULT_CURRENCY_LAYER_URL
        );
        assert_eq!(config.providers.currency_layer.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.providers.currency_layer.timeout_secs, 10);
        assert_eq!(config.providers.fixture.delay_ms, 1500);
    }

    #[test]
    fn test_api_key_prefers_inline_value() {
        let provider = CurrencyLayerProviderConfig {
            api_key: Some(ApiKey::new("inline")),
            ..Default::default()
        };
        let key = provider
            .resolve_api_key_with(|_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(key.expose(), "inline");
    }

    #[test]
    fn test_api_key_falls_back_to_named_env_var() {
        let provider = CurrencyLayerProviderConfig {
            api_key_env: "CUSTOM_KEY".to_string(),
            ..Default::default()
        };
        let key = provider
            .resolve_api_key_with(|name| (name == "CUSTOM_KEY").then(|| "secret".to_string()))
            .unwrap();
        assert_eq!(key.expose(), "secret");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let provider = CurrencyLayerProviderConfig::default();
        let err = provider.resolve_api_key_with(|_| None).unwrap_err();
        assert!(err.to_string().contains("$XRATE_API_KEY"));
    }

    #[test]
    fn test_inline_api_key_is_redacted_in_config_debug() {
        let config: AppConfig = serde_yaml::from_str(
            r#"
providers:
  currency_layer:
    api_key: "8PH7-secret"
"#,
        )
        .unwrap();
        let key = config
            .providers
            .currency_layer
            .resolve_api_key_with(|_| None)
            .unwrap();
        assert_eq!(key.expose(), "8PH7-secret");
        assert!(!format!("{config:?}").contains("8PH7-secret"));
    }

    #[test]
    fn test_settle_timeout_follows_source() {
        let mut config = AppConfig::default();
        assert_eq!(config.settle_timeout(), Duration::from_secs(11));

        config.source = QuoteSourceKind::Fixture;
        config.providers.fixture.delay_ms = 500;
        assert_eq!(config.settle_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("8PH7-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn test_load_from_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "source: fixture\n").unwrap();
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.source, QuoteSourceKind::Fixture);

        let err = AppConfig::load_from_path("/nonexistent/xrate.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
