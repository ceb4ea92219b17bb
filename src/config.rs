use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::vocabulary::{Vocabulary, DEFAULT_LOCATIONS, DEFAULT_SECTORS, DEFAULT_SKILLS};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub vocabulary: VocabularySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where candidate postings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Supabase,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,
    #[serde(default)]
    pub supabase_url: String,
    #[serde(default)]
    pub supabase_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_postings_path")]
    pub file_path: PathBuf,
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            supabase_url: String::new(),
            supabase_key: String::new(),
            table: default_table(),
            file_path: default_postings_path(),
            timeout_secs: default_source_timeout(),
        }
    }
}

fn default_source_kind() -> SourceKind { SourceKind::File }
fn default_table() -> String { "internship_listings".to_string() }
fn default_postings_path() -> PathBuf { PathBuf::from("data/internships.json") }
fn default_source_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
        }
    }
}

fn default_true() -> bool { true }
fn default_cache_ttl() -> u64 { 60 }
fn default_cache_entries() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 3 }
fn default_max_limit() -> u16 { 20 }

/// Optional replacements for the skill, sector and location tables
///
/// Education levels cannot be overridden.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularySettings {
    pub skills: Option<Vec<String>>,
    pub sectors: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
}

impl VocabularySettings {
    /// Build the process-wide vocabulary
    pub fn build(&self) -> Vocabulary {
        let skills = terms_or_default(&self.skills, &DEFAULT_SKILLS);
        let sectors = terms_or_default(&self.sectors, &DEFAULT_SECTORS);
        let locations = terms_or_default(&self.locations, &DEFAULT_LOCATIONS);

        Vocabulary::new(skills.as_slice(), sectors.as_slice(), locations.as_slice())
    }
}

fn terms_or_default(terms: &Option<Vec<String>>, defaults: &[&str]) -> Vec<String> {
    match terms {
        Some(terms) => terms.clone(),
        None => defaults.iter().map(|t| t.to_string()).collect(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INTERN_MATCH)
    /// 5. SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INTERN_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("INTERN_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_supabase_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("INTERN_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the Supabase variables the hosting platform injects
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("source.supabase_url", url)?;
    }
    if let Ok(key) = env::var("SUPABASE_SERVICE_ROLE_KEY") {
        builder = builder.set_override("source.supabase_key", key)?;
    }

    builder.build()
}
