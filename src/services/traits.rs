use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::cache::{self, CacheIndex, InputData, VoiceoverResult};
use crate::utils::Result;

/// A voice-over with its audio file resolved on disk
#[derive(Debug, Clone)]
pub struct Voiceover {
    pub result: VoiceoverResult,
    /// Absolute path of the audio file
    pub audio_path: PathBuf,
    /// Served from the cache without calling the API
    pub cached: bool,
}

/// Core trait that all text-to-speech backends must implement
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Name stored in the cache key, e.g. "yandex-speechkit"
    fn service_name(&self) -> &str;

    /// Default directory for audio files and cache.json
    fn cache_dir(&self) -> &Path;

    /// Synthesize `text` (or reuse the cache) and describe the result
    ///
    /// `cache_dir` overrides the service default, `path` overrides the generated
    /// audio file name (relative to the cache directory).
    async fn generate_from_text(
        &self,
        text: &str,
        cache_dir: Option<&Path>,
        path: Option<&str>,
    ) -> Result<VoiceoverResult>;

    /// Look up a previous voice-over with identical input data
    fn get_cached_result(
        &self,
        input_data: &InputData,
        cache_dir: &Path,
    ) -> Result<Option<VoiceoverResult>> {
        Ok(CacheIndex::open(cache_dir)?.lookup(input_data))
    }

    /// Audio file stem derived from the input data
    fn audio_basename(&self, input_data: &InputData) -> Result<String> {
        cache::audio_basename(input_data)
    }

    /// Persist a fresh result so later lookups find it
    fn record_result(&self, result: &VoiceoverResult, cache_dir: &Path) -> Result<()> {
        CacheIndex::open(cache_dir)?.record(result.clone())
    }

    /// Generate a voice-over in the default cache directory and record it
    async fn voiceover(&self, text: &str) -> Result<Voiceover> {
        let cache_dir = self.cache_dir().to_path_buf();
        let result = self.generate_from_text(text, Some(cache_dir.as_path()), None).await?;

        let cached = self
            .get_cached_result(&result.input_data, &cache_dir)?
            .is_some_and(|hit| hit == result);
        if !cached {
            self.record_result(&result, &cache_dir)?;
        }

        Ok(Voiceover {
            audio_path: cache_dir.join(&result.original_audio),
            result,
            cached,
        })
    }
}
