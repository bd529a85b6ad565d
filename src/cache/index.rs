use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::types::{CacheEntry, CacheStats, InputData, VoiceoverResult};
use crate::constants::CACHE_INDEX_FILENAME;
use crate::utils::{Result, VoiceoverError};

/// cache.json in a voice-over cache directory
#[derive(Debug)]
pub struct CacheIndex {
    cache_dir: PathBuf,
    entries: Vec<CacheEntry>,
}

impl CacheIndex {
    /// Open the index in `cache_dir`; a missing index is an empty one
    pub fn open(cache_dir: &Path) -> Result<Self> {
        let path = cache_dir.join(CACHE_INDEX_FILENAME);

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    VoiceoverError::Cache(format!(
                        "{} is not a valid cache index: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_INDEX_FILENAME)
    }

    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Absolute path of an entry's audio file
    pub fn audio_path(&self, result: &VoiceoverResult) -> PathBuf {
        self.cache_dir.join(&result.original_audio)
    }

    /// Find a cached voice-over whose audio file is still on disk
    pub fn lookup(&self, input_data: &InputData) -> Option<VoiceoverResult> {
        let entry = self
            .entries
            .iter()
            .find(|e| &e.result.input_data == input_data)?;

        if self.audio_path(&entry.result).exists() {
            Some(entry.result.clone())
        } else {
            warn!(
                "Cached audio {} is missing, synthesizing again",
                entry.result.original_audio
            );
            None
        }
    }

    /// Add or replace the entry for `result.input_data` and persist the index
    pub fn record(&mut self, result: VoiceoverResult) -> Result<()> {
        self.entries
            .retain(|e| e.result.input_data != result.input_data);
        debug!("Recording {} in {}", result.original_audio, self.path().display());
        self.entries.push(CacheEntry {
            result,
            created_at: Some(Utc::now()),
        });
        self.save()
    }

    /// Remove indexed audio files and the index itself, returning the number of entries
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.entries.len();

        for entry in &self.entries {
            let audio = self.audio_path(&entry.result);
            if audio.exists() {
                fs::remove_file(&audio)?;
            }
        }
        self.entries.clear();

        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }

        Ok(removed)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut total_size = 0;
        let mut missing_files = 0;

        for entry in &self.entries {
            match fs::metadata(self.audio_path(&entry.result)) {
                Ok(metadata) => total_size += metadata.len(),
                Err(_) => missing_files += 1,
            }
        }

        CacheStats {
            entries: self.entries.len(),
            missing_files,
            total_size,
            cache_directory: self.cache_dir.clone(),
        }
    }

    /// Write through a temp file so a crash never leaves half an index
    fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.entries)?)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn result(text: &str, audio: &str) -> VoiceoverResult {
        VoiceoverResult {
            input_text: text.to_string(),
            input_data: InputData {
                input_text: text.to_string(),
                service: "yandex-speechkit".to_string(),
                language: "en-US".to_string(),
                voice: "john".to_string(),
                speed: None,
                emotion: None,
            },
            original_audio: audio.to_string(),
        }
    }

    #[test]
    fn test_missing_index_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let index = CacheIndex::open(temp_dir.path()).unwrap();
        assert!(index.entries().is_empty());
        assert_eq!(index.stats().entries, 0);
    }

    #[test]
    fn test_record_then_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let hello = result("Hello", "hello.mp3");
        fs::write(temp_dir.path().join("hello.mp3"), b"ID3").unwrap();

        let mut index = CacheIndex::open(temp_dir.path()).unwrap();
        index.record(hello.clone()).unwrap();

        // Survives a reopen
        let index = CacheIndex::open(temp_dir.path()).unwrap();
        assert_eq!(index.lookup(&hello.input_data), Some(hello.clone()));
        assert!(index.entries()[0].created_at.is_some());

        let other = result("Goodbye", "bye.mp3");
        assert_eq!(index.lookup(&other.input_data), None);
    }

    #[test]
    fn test_lookup_skips_entries_without_audio() {
        let temp_dir = TempDir::new().unwrap();
        let hello = result("Hello", "hello.mp3");

        let mut index = CacheIndex::open(temp_dir.path()).unwrap();
        index.record(hello.clone()).unwrap();

        assert_eq!(index.lookup(&hello.input_data), None);
        assert_eq!(index.stats().missing_files, 1);
    }

    #[test]
    fn test_record_replaces_same_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut index = CacheIndex::open(temp_dir.path()).unwrap();

        index.record(result("Hello", "first.mp3")).unwrap();
        index.record(result("Hello", "second.mp3")).unwrap();

        assert_eq!(index.entries().len(), 1);
        assert_eq!(index.entries()[0].result.original_audio, "second.mp3");
    }

    #[test]
    fn test_corrupt_index_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CACHE_INDEX_FILENAME), "{not json").unwrap();

        let err = CacheIndex::open(temp_dir.path()).unwrap_err();
        assert!(matches!(err, VoiceoverError::Cache(_)));
    }

    #[test]
    fn test_clear_removes_audio_and_index() {
        let temp_dir = TempDir::new().unwrap();
        let audio = temp_dir.path().join("hello.mp3");
        fs::write(&audio, b"ID3data").unwrap();

        let mut index = CacheIndex::open(temp_dir.path()).unwrap();
        index.record(result("Hello", "hello.mp3")).unwrap();
        assert_eq!(index.stats().total_size, 7);

        assert_eq!(index.clear().unwrap(), 1);
        assert!(!audio.exists());
        assert!(!temp_dir.path().join(CACHE_INDEX_FILENAME).exists());
        assert!(CacheIndex::open(temp_dir.path()).unwrap().entries().is_empty());
    }
}
