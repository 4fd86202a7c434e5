// Configuration Storage Service
// Handles config file read/write, env overrides and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::models::{default_p_syn, default_p_trans, RewriteConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub humanize: HumanizeSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            humanize: HumanizeSettings::default(),
            server: ServerSettings::default(),
            classifier: ClassifierSettings::default(),
        }
    }
}

/// Defaults applied to requests that leave a knob out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeSettings {
    #[serde(default = "default_p_syn")]
    pub p_syn: f64,
    #[serde(default = "default_p_trans")]
    pub p_trans: f64,
    #[serde(default = "default_true")]
    pub preserve_linebreaks: bool,
    /// Unrestored citation placeholders become a hard error.
    #[serde(default)]
    pub strict_citations: bool,
}

impl Default for HumanizeSettings {
    fn default() -> Self {
        Self {
            p_syn: default_p_syn(),
            p_trans: default_p_trans(),
            preserve_linebreaks: true,
            strict_citations: false,
        }
    }
}

impl HumanizeSettings {
    pub fn rewrite_config(&self) -> RewriteConfig {
        RewriteConfig::new(self.p_syn, self.p_trans, self.preserve_linebreaks)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    #[serde(default = "default_max_body_kb")]
    pub max_body_kb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout(),
            enable_cors: true,
            max_body_kb: default_max_body_kb(),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierSettings {
    #[serde(default = "default_classifier_url")]
    pub base_url: String,
    #[serde(default = "default_classifier_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            base_url: default_classifier_url(),
            model: default_classifier_model(),
            api_key: None,
            timeout_secs: default_classifier_timeout(),
        }
    }
}

impl ClassifierSettings {
    /// Full inference URL: `<baseUrl>/<model>`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_true() -> bool { true }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }
fn default_timeout() -> u64 { 30 }
fn default_max_body_kb() -> usize { 1024 }
fn default_classifier_url() -> String { "https://api-inference.huggingface.co/models".to_string() }
fn default_classifier_model() -> String { "roberta-base-openai-detector".to_string() }
fn default_classifier_timeout() -> u64 { 60 }

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Overlay process environment variables onto the loaded file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(env_value);
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HUMANIZER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HUMANIZER_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!("Ignoring invalid HUMANIZER_PORT: {}", port),
            }
        }
        if let Some(url) = lookup("HF_API_URL") {
            self.classifier.base_url = url;
        }
        if let Some(model) = lookup("HF_MODEL") {
            self.classifier.model = model;
        }
        if let Some(token) = lookup("HF_API_TOKEN") {
            self.classifier.api_key = Some(token);
        }
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Store at `HUMANIZER_CONFIG_DIR`, else the platform config directory.
    pub fn from_env() -> Result<Self, String> {
        let dir = env_value("HUMANIZER_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(Self::default_config_dir)
            .ok_or_else(|| "No config directory available".to_string())?;
        Ok(Self::new(dir))
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("humanizer"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration from file
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load the file and overlay environment variables.
    pub fn load_effective(&self) -> Result<AppConfig, String> {
        let mut config = self.load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content)
            .map_err(|e| format!("Failed to write config: {}", e))
    }

    fn create_backup(&self) -> Result<(), String> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)
            .map_err(|e| format!("Failed to create backup dir: {}", e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| format!("Failed to create backup: {}", e))?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)
    }

    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), String> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| format!("Failed to read backup dir: {}", e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first; the timestamped names break modification-time ties
        entries.sort_by_key(|e| {
            (
                e.metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH),
                e.file_name(),
            )
        });

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
