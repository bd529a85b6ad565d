use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters that identify a voice-over; equal input data means equal audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    pub input_text: String,
    pub service: String,
    pub language: String,
    pub voice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// Descriptor handed back to the host for one voice-over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceoverResult {
    /// Text as given, bookmarks included
    pub input_text: String,
    pub input_data: InputData,
    /// Audio file path relative to the cache directory
    pub original_audio: String,
}

/// One record in cache.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(flatten)]
    pub result: VoiceoverResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub missing_files: usize,
    pub total_size: u64,
    pub cache_directory: PathBuf,
}

impl CacheStats {
    /// Format cache stats for display
    pub fn format(&self) -> String {
        format!(
            "Cache Statistics:\n\
            Directory: {}\n\
            Entries: {} ({} with missing audio)\n\
            Total Size: {:.2} MB",
            self.cache_directory.display(),
            self.entries,
            self.missing_files,
            self.total_size as f64 / 1_048_576.0,
        )
    }
}
