use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    API_KEY_ENV, APP_NAME, CACHE_SUBDIR, DEFAULT_LANG, DEFAULT_VOICE, ENV_PREFIX,
    HTTP_REQUEST_TIMEOUT_SECS, LOCAL_CONFIG_PATH, SPEECHKIT_MAX_SPEED, SPEECHKIT_MIN_SPEED,
    SPEECHKIT_TTS_URL,
};
use crate::speechkit::AudioFormat;
use crate::utils::VoiceoverError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Yandex SpeechKit configuration
    #[serde(default)]
    pub speechkit: SpeechKitConfig,

    /// Audio cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Yandex SpeechKit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechKitConfig {
    /// Synthesis endpoint
    pub endpoint: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Language code, e.g. "en-US" or "ru-RU"
    pub lang: String,
    /// Voice name, e.g. "john" or "alena"
    pub voice: String,
    /// Speech rate (0.1 - 3.0), API default when unset
    pub speed: Option<f32>,
    /// Voice role/emotion, e.g. "neutral", "good"
    pub emotion: Option<String>,
    /// Audio container requested from the API
    pub format: AudioFormat,
    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl Default for SpeechKitConfig {
    fn default() -> Self {
        Self {
            endpoint: SPEECHKIT_TTS_URL.to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            lang: DEFAULT_LANG.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            speed: None,
            emotion: None,
            format: AudioFormat::default(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Audio cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding audio files and cache.json (platform cache dir when unset)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl CacheConfig {
    /// Resolve the cache directory, falling back to ~/.cache/speechkit-voiceover/voiceovers
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            Ok(proj_dirs.cache_dir().join(CACHE_SUBDIR))
        } else {
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .context("Could not determine home directory")?;
            Ok(PathBuf::from(home)
                .join(".cache")
                .join(APP_NAME)
                .join(CACHE_SUBDIR))
        }
    }
}

impl Config {
    /// Check value ranges the API would reject anyway
    pub fn validate(&self) -> Result<(), VoiceoverError> {
        let sk = &self.speechkit;

        if sk.lang.trim().is_empty() {
            return Err(VoiceoverError::Config("speechkit.lang must not be empty".into()));
        }
        if sk.voice.trim().is_empty() {
            return Err(VoiceoverError::Config("speechkit.voice must not be empty".into()));
        }
        if sk.api_key_env.trim().is_empty() {
            return Err(VoiceoverError::Config(
                "speechkit.api_key_env must not be empty".into(),
            ));
        }
        if let Some(speed) = sk.speed {
            if !(SPEECHKIT_MIN_SPEED..=SPEECHKIT_MAX_SPEED).contains(&speed) {
                return Err(VoiceoverError::Config(format!(
                    "speechkit.speed must be between {} and {}, got {}",
                    SPEECHKIT_MIN_SPEED, SPEECHKIT_MAX_SPEED, speed
                )));
            }
        }
        if sk.timeout_secs == 0 {
            return Err(VoiceoverError::Config(
                "speechkit.timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    load_config_from(None)
}

/// Load configuration, with an explicit file (e.g. `--config`) taking highest priority
pub fn load_config_from(explicit: Option<&Path>) -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);

    let config: Config = build_figment(Some(global_config.as_path()), &local_config, explicit)
        .extract()
        .context("Failed to load configuration")?;

    config.validate()?;
    Ok(config)
}

/// Layer defaults, global file, local file, VOICEOVER_ environment and an explicit file
fn build_figment(global: Option<&Path>, local: &Path, explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(global) = global {
        if global.exists() {
            figment = figment.merge(Toml::file(global));
        }
    }

    if local.exists() {
        figment = figment.merge(Toml::file(local));
    }

    // VOICEOVER_SPEECHKIT__VOICE=alena -> speechkit.voice
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(explicit) = explicit {
        figment = figment.merge(Toml::file(explicit));
    }

    figment
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join(APP_NAME);
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
///
/// Returns the path of the global config file.
pub fn init_config() -> Result<PathBuf> {
    let config_file = get_config_dir()?.join("config.toml");

    if config_file.exists() {
        tracing::info!("Configuration already exists at {}", config_file.display());
    } else {
        save_config(&Config::default(), Some(config_file.clone()))?;
        tracing::info!("Created default configuration at {}", config_file.display());
    }

    Ok(config_file)
}
