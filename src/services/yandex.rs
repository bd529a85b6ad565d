use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::traits::SpeechService;
use crate::app::{Config, SpeechKitConfig};
use crate::auth::{init_credentials, Credentials};
use crate::cache::{CacheIndex, InputData, VoiceoverResult};
use crate::constants::SERVICE_NAME;
use crate::speechkit::{
    check_voice, validate_text, AudioFormat, SpeechKitClient, SynthesisRequest, Synthesizer,
};
use crate::utils::{remove_bookmarks, Result, VoiceoverError};

/// Voice parameters applied to every synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub lang: String,
    pub voice: String,
    pub speed: Option<f32>,
    pub emotion: Option<String>,
    pub format: AudioFormat,
}

impl ServiceSettings {
    /// Cache key parameters for `text`, bookmarks stripped
    pub fn input_data(&self, text: &str) -> InputData {
        InputData {
            input_text: remove_bookmarks(text),
            service: SERVICE_NAME.to_string(),
            language: self.lang.clone(),
            voice: self.voice.clone(),
            speed: self.speed,
            emotion: self.emotion.clone(),
        }
    }
}

impl From<&SpeechKitConfig> for ServiceSettings {
    fn from(config: &SpeechKitConfig) -> Self {
        Self {
            lang: config.lang.clone(),
            voice: config.voice.clone(),
            speed: config.speed,
            emotion: config.emotion.clone(),
            format: config.format,
        }
    }
}

/// SpeechService backed by the Yandex SpeechKit API
///
/// See <https://yandex.cloud/en/docs/speechkit> for languages and voices.
pub struct YandexSpeechKitService<S: Synthesizer = SpeechKitClient> {
    synthesizer: S,
    settings: ServiceSettings,
    cache_dir: PathBuf,
    // cache.json is rewritten whole; one writer at a time
    index_lock: Mutex<()>,
}

impl YandexSpeechKitService<SpeechKitClient> {
    /// Bootstrap credentials and build a service from configuration
    ///
    /// Fails with `MissingCredentials` when no key is configured, or `DotenvCreated`
    /// after the user created a .env file interactively.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_credential_source(config, init_credentials)
    }

    /// Build a service, asking `credentials` for the variable named by `speechkit.api_key_env`
    pub fn with_credential_source<F>(config: &Config, credentials: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<Credentials>,
    {
        config.validate()?;

        let credentials = credentials(&config.speechkit.api_key_env)?;
        let client = SpeechKitClient::from_config(&config.speechkit, credentials)?;
        let cache_dir = config
            .cache
            .resolve_dir()
            .map_err(|e| VoiceoverError::Config(e.to_string()))?;

        let settings = ServiceSettings::from(&config.speechkit);
        check_voice(&settings.lang, &settings.voice, settings.emotion.as_deref());

        Ok(Self::with_synthesizer(client, settings, cache_dir))
    }
}

impl<S: Synthesizer> YandexSpeechKitService<S> {
    /// Build a service around any synthesizer
    pub fn with_synthesizer(synthesizer: S, settings: ServiceSettings, cache_dir: PathBuf) -> Self {
        Self {
            synthesizer,
            settings,
            cache_dir,
            index_lock: Mutex::new(()),
        }
    }

    pub fn input_data(&self, text: &str) -> InputData {
        self.settings.input_data(text)
    }

    fn synthesis_request(&self, input_data: &InputData) -> SynthesisRequest {
        SynthesisRequest {
            text: input_data.input_text.clone(),
            lang: self.settings.lang.clone(),
            voice: self.settings.voice.clone(),
            speed: self.settings.speed,
            emotion: self.settings.emotion.clone(),
            format: self.settings.format,
        }
    }
}

#[async_trait]
impl<S: Synthesizer> SpeechService for YandexSpeechKitService<S> {
    fn service_name(&self) -> &str {
        SERVICE_NAME
    }

    fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    async fn generate_from_text(
        &self,
        text: &str,
        cache_dir: Option<&Path>,
        path: Option<&str>,
    ) -> Result<VoiceoverResult> {
        let cache_dir = cache_dir.unwrap_or(&self.cache_dir);

        let input_data = self.input_data(text);
        validate_text(&input_data.input_text)?;

        if let Some(cached) = self.get_cached_result(&input_data, cache_dir)? {
            debug!("Cache hit for {}", cached.original_audio);
            return Ok(cached);
        }

        let audio_path = match path {
            Some(path) => path.to_string(),
            None => format!(
                "{}.{}",
                self.audio_basename(&input_data)?,
                self.settings.format.extension()
            ),
        };

        let audio = self
            .synthesizer
            .synthesize(&self.synthesis_request(&input_data))
            .await
            .map_err(|e| {
                error!("{}", e);
                synthesis_failure(e)
            })?;

        let target = cache_dir.join(&audio_path);
        audio
            .export(&target)
            .await
            .inspect_err(|e| error!("{}", e))?;

        info!("Saved {} bytes of audio to {}", audio.data.len(), target.display());

        Ok(VoiceoverResult {
            input_text: text.to_string(),
            input_data,
            original_audio: audio_path,
        })
    }

    fn record_result(&self, result: &VoiceoverResult, cache_dir: &Path) -> Result<()> {
        let _guard = self.index_lock.lock();
        CacheIndex::open(cache_dir)?.record(result.clone())
    }
}

/// Collapse synthesizer failures into the one error hosts handle
fn synthesis_failure(err: VoiceoverError) -> VoiceoverError {
    match err {
        VoiceoverError::Synthesis(_)
        | VoiceoverError::EmptyText
        | VoiceoverError::TextTooLong { .. } => err,
        other => VoiceoverError::Synthesis(other.to_string()),
    }
}
