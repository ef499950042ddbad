use crate::error::{GenerateError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable holding the generation service credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "OPENAI_MODEL";
/// Environment variable overriding the generation service endpoint
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Environment variable holding the default affiliate link
pub const AFFILIATE_LINK_ENV: &str = "DEFAULT_RAKUTEN_LINK";
/// Environment variable naming the directory default paths resolve against
pub const HOME_ENV: &str = "MIORI_HOME";

/// Directory that relative default paths resolve against
///
/// `MIORI_HOME` when set, otherwise the directory the crate was built from,
/// which holds `assets/` and `data/`.
pub fn home_dir() -> PathBuf {
    home_dir_lookup(|key| std::env::var(key).ok())
}

fn home_dir_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(HOME_ENV)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Master prompt wrapping the HTML template and the variables
    #[serde(default = "default_prompt_master_path")]
    pub prompt_master_path: PathBuf,

    /// HTML template handed to the model
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Line-delimited keyword pool (optional on disk)
    #[serde(default = "default_keywords_path")]
    pub keywords_path: PathBuf,

    /// Directory receiving generated documents
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fixed suffix of generated file names
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Model identifier sent to the generation service
    #[serde(default = "default_model")]
    pub model: String,

    /// Affiliate link reused across all link fields
    #[serde(default)]
    pub affiliate_link: String,

    /// Base URL of the chat-completions API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Timeout for fetching the target page
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

/// Default master prompt location
fn default_prompt_master_path() -> PathBuf {
    PathBuf::from("assets/prompt_master.txt")
}

/// Default HTML template location
fn default_template_path() -> PathBuf {
    PathBuf::from("assets/template_wp.html")
}

/// Default keyword pool location
fn default_keywords_path() -> PathBuf {
    PathBuf::from("data/keywords.txt")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_output_suffix() -> String {
    "miori".to_string()
}

/// Default model when `OPENAI_MODEL` is unset
fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tokens() -> u32 {
    crate::generators::openai::DEFAULT_MAX_TOKENS
}

fn default_fetch_timeout_secs() -> u64 {
    crate::fetcher::DEFAULT_TIMEOUT.as_secs()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prompt_master_path: default_prompt_master_path(),
            template_path: default_template_path(),
            keywords_path: default_keywords_path(),
            output_dir: default_output_dir(),
            output_suffix: default_output_suffix(),
            model: default_model(),
            affiliate_link: String::new(),
            api_base_url: default_api_base_url(),
            max_tokens: default_max_tokens(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |message: String| GenerateError::Config {
            path: path.to_path_buf(),
            message,
        };

        let mut file = File::open(path).map_err(|e| config_error(e.to_string()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| config_error(e.to_string()))?;

        Self::from_json(&contents).map_err(|e| config_error(e.to_string()))
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Joins every relative path onto `base`; absolute paths are kept
    pub fn resolve_paths<P: AsRef<Path>>(mut self, base: P) -> Self {
        let base = base.as_ref();
        for path in [
            &mut self.prompt_master_path,
            &mut self.template_path,
            &mut self.keywords_path,
            &mut self.output_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Unset and empty variables leave the current value in place.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(model) = lookup(MODEL_ENV) {
            self.model = model;
        }
        if let Some(link) = lookup(AFFILIATE_LINK_ENV) {
            self.affiliate_link = link;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.api_base_url = base_url;
        }
        self
    }
}
