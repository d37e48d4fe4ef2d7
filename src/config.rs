use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LogseqError, Result};
use crate::storage::Tokenizer;

/// Environment variable holding the Logseq API bearer token.
pub const TOKEN_ENV: &str = "LogseqToken";
/// Environment variable overriding the graph name used in deep links.
pub const GRAPH_ENV: &str = "LogseqGraph";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:12315/api";
pub const DEFAULT_GRAPH: &str = "Logseq";
pub const DEFAULT_DB_PATH: &str = "pages.db";
pub const DEFAULT_EXTENSION_PATH: &str = "./libsimple";
pub const DEFAULT_ICON: &str = "icon.png";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("LOGSEQ_INDEX_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(LogseqError::Config(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("logseq-index/config.toml")),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| LogseqError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw).map_err(|err| {
            LogseqError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.source {
            self.source.merge(patch);
        }
        if let Some(patch) = patch.store {
            self.store.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = non_empty(lookup(TOKEN_ENV)) {
            self.source.token = Some(value);
        }
        if let Some(value) = non_empty(lookup("LOGSEQ_INDEX_ENDPOINT")) {
            self.source.endpoint = value;
        }
        if let Some(value) = parse_var::<u64>(&lookup, "LOGSEQ_INDEX_TIMEOUT_SECS")? {
            self.source.timeout_secs = Some(value);
        }

        if let Some(value) = non_empty(lookup("LOGSEQ_INDEX_DB")) {
            self.store.path = PathBuf::from(value);
        }
        if let Some(value) = non_empty(lookup("LOGSEQ_INDEX_EXTENSION")) {
            self.store.extension_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("LOGSEQ_INDEX_LOAD_EXTENSION") {
            self.store.load_extension = parse_bool(&value);
        }
        if let Some(value) = parse_var::<Tokenizer>(&lookup, "LOGSEQ_INDEX_TOKENIZER")? {
            self.store.tokenizer = Some(value);
        }

        // An empty LogseqGraph falls back to the default graph name.
        if let Some(value) = non_empty(lookup(GRAPH_ENV)) {
            self.output.graph = value;
        }

        Ok(())
    }

    /// The bearer token, required for `build`.
    pub fn require_token(&self) -> Result<&str> {
        self.source
            .token
            .as_deref()
            .ok_or_else(|| {
                LogseqError::MissingConfig(format!("{TOKEN_ENV} environment variable is not set"))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Never read from or written to the config file.
    #[serde(skip)]
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout_secs: None,
        }
    }
}

impl SourceConfig {
    fn merge(&mut self, patch: SourcePatch) {
        if let Some(value) = patch.endpoint {
            self.endpoint = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = Some(value);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub extension_path: PathBuf,
    /// Use the `simple` tokenizer from `extension_path`. When false the
    /// store falls back to the built-in `unicode61`, which does not split CJK
    /// text.
    pub load_extension: bool,
    /// Explicit tokenizer; derived from `load_extension` when unset.
    pub tokenizer: Option<Tokenizer>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            extension_path: PathBuf::from(DEFAULT_EXTENSION_PATH),
            load_extension: true,
            tokenizer: None,
        }
    }
}

impl StoreConfig {
    fn merge(&mut self, patch: StorePatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
        if let Some(value) = patch.extension_path {
            self.extension_path = value;
        }
        if let Some(value) = patch.load_extension {
            self.load_extension = value;
        }
        if let Some(value) = patch.tokenizer {
            self.tokenizer = Some(value);
        }
    }

    /// Tokenizer the full-text table is created with.
    #[must_use]
    pub fn effective_tokenizer(&self) -> Tokenizer {
        self.tokenizer.unwrap_or(if self.load_extension {
            Tokenizer::Simple
        } else {
            Tokenizer::Unicode61
        })
    }

    /// Only the `simple` tokenizer lives in the extension library.
    #[must_use]
    pub fn needs_extension(&self) -> bool {
        self.effective_tokenizer() == Tokenizer::Simple
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub graph: String,
    pub icon: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph: DEFAULT_GRAPH.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.graph {
            self.graph = value;
        }
        if let Some(value) = patch.icon {
            self.icon = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub source: Option<SourcePatch>,
    pub store: Option<StorePatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourcePatch {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorePatch {
    pub path: Option<PathBuf>,
    pub extension_path: Option<PathBuf>,
    pub load_extension: Option<bool>,
    pub tokenizer: Option<Tokenizer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputPatch {
    pub graph: Option<String>,
    pub icon: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|err| {
            LogseqError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}
