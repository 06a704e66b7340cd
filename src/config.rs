//! Environment configuration and credential resolution.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chat_provider::GenerationMode;
use thiserror::Error;

pub const API_KEY_NAME: &str = "GEMINI_API_KEY";
pub const PROVIDER_ENV_VAR: &str = "PERSONA_CHAT_PROVIDER";
pub const MODE_ENV_VAR: &str = "PERSONA_CHAT_MODE";
pub const MODEL_ENV_VAR: &str = "PERSONA_CHAT_MODEL";
pub const BASE_URL_ENV_VAR: &str = "PERSONA_CHAT_BASE_URL";
pub const TIMEOUT_ENV_VAR: &str = "PERSONA_CHAT_TIMEOUT_SEC";
pub const SECRETS_PATH_ENV_VAR: &str = "PERSONA_CHAT_SECRETS_PATH";
pub const LOG_ENV_VAR: &str = "PERSONA_CHAT_LOG";
pub const LOG_FILE_ENV_VAR: &str = "PERSONA_CHAT_LOG_FILE";

pub const DEFAULT_SECRETS_PATH: &str = ".persona_chat/secrets.json";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Error: {name} not found. Set it in the secrets file or the environment (.env is honored)."
    )]
    MissingCredential { name: String },

    #[error("Error: failed to read secrets file {path}: {source}")]
    SecretsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error: secrets file {path} must be a JSON object of strings: {source}")]
    SecretsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error: invalid {key} value '{value}': {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Error: {0}")]
    ClientInit(String),
}

/// LLM boundary implementation selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Mock,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            other => Err(format!(
                "Unsupported provider '{other}'. Available providers: gemini, mock"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub mode: GenerationMode,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub secrets_path: PathBuf,
    pub log: LogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            mode: GenerationMode::default(),
            model: None,
            base_url: None,
            timeout: None,
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
            log: LogSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env_string_opt(PROVIDER_ENV_VAR) {
            Some(value) => value.parse().map_err(|reason| ConfigError::InvalidSetting {
                key: PROVIDER_ENV_VAR,
                value,
                reason,
            })?,
            None => ProviderKind::default(),
        };

        let mode = match env_string_opt(MODE_ENV_VAR) {
            Some(value) => value.parse().map_err(|reason| ConfigError::InvalidSetting {
                key: MODE_ENV_VAR,
                value,
                reason,
            })?,
            None => GenerationMode::default(),
        };

        let timeout = match env_string_opt(TIMEOUT_ENV_VAR) {
            Some(value) => Some(parse_timeout(&value)?),
            None => None,
        };

        Ok(Self {
            provider,
            mode,
            model: env_string_opt(MODEL_ENV_VAR),
            base_url: env_string_opt(BASE_URL_ENV_VAR),
            timeout,
            secrets_path: env_string_opt(SECRETS_PATH_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH)),
            log: LogSettings {
                filter: env_string_opt(LOG_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                file: env_string_opt(LOG_FILE_ENV_VAR).map(PathBuf::from),
            },
        })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidSetting {
            key: TIMEOUT_ENV_VAR,
            value: value.to_string(),
            reason: "expected a positive number of seconds".to_string(),
        }),
    }
}

/// Host-managed secret lookup consulted before the process environment.
pub trait SecretStore {
    fn get(&self, name: &str) -> Option<String>;
}

/// Secrets loaded from a flat JSON object file, e.g. `{"GEMINI_API_KEY": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretFile {
    values: BTreeMap<String, String>,
}

impl SecretFile {
    /// Loads `path`. A missing file yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::SecretsRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let values = serde_json::from_str::<BTreeMap<String, String>>(&raw).map_err(|source| {
            ConfigError::SecretsParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Some(Self { values }))
    }

    #[must_use]
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl SecretStore for SecretFile {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretStore,
    Environment,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub value: String,
    pub source: CredentialSource,
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Looks `name` up in the secret store first, then through `env`.
///
/// Values are trimmed and empty values count as absent.
pub fn resolve_credential(
    name: &str,
    secret_store: Option<&dyn SecretStore>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedCredential, ConfigError> {
    if let Some(value) = secret_store.and_then(|store| non_empty(store.get(name))) {
        return Ok(ResolvedCredential {
            value,
            source: CredentialSource::SecretStore,
        });
    }

    if let Some(value) = non_empty(env(name)) {
        return Ok(ResolvedCredential {
            value,
            source: CredentialSource::Environment,
        });
    }

    Err(ConfigError::MissingCredential {
        name: name.to_string(),
    })
}

/// Resolves the Gemini API key from the secrets file at `secrets_path` and the
/// process environment.
pub fn resolve_api_key(secrets_path: &Path) -> Result<ResolvedCredential, ConfigError> {
    let secrets = SecretFile::load(secrets_path)?;
    resolve_credential(
        API_KEY_NAME,
        secrets.as_ref().map(|store| store as &dyn SecretStore),
        process_env,
    )
}

#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        }
    })
}
