use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::utils::{Result, VoiceoverError};

/// Audio container requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    OggOpus,
}

impl AudioFormat {
    /// Value of the `format` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggOpus => "oggopus",
        }
    }

    /// File extension for exported audio
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggOpus => "ogg",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthesis call
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub lang: String,
    pub voice: String,
    pub speed: Option<f32>,
    pub emotion: Option<String>,
    pub format: AudioFormat,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, lang: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            voice: voice.into(),
            speed: None,
            emotion: None,
            format: AudioFormat::default(),
        }
    }
}

/// Audio returned by the API
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl SynthesizedAudio {
    /// Write the audio to `path`, creating parent directories
    pub async fn export(&self, path: &Path) -> Result<()> {
        let export_err = |source| VoiceoverError::Export {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(export_err)?;
        }
        tokio::fs::write(path, &self.data).await.map_err(export_err)?;

        Ok(())
    }
}

/// Anything that can turn text into audio
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_names() {
        assert_eq!(AudioFormat::Mp3.as_str(), "mp3");
        assert_eq!(AudioFormat::OggOpus.as_str(), "oggopus");
        assert_eq!(AudioFormat::OggOpus.extension(), "ogg");
        assert_eq!(
            serde_json::to_string(&AudioFormat::OggOpus).unwrap(),
            "\"oggopus\""
        );
    }

    #[tokio::test]
    async fn test_export_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("hello.mp3");
        let audio = SynthesizedAudio {
            data: Bytes::from_static(b"ID3fake"),
            format: AudioFormat::Mp3,
        };

        audio.export(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3fake");
    }

    #[tokio::test]
    async fn test_export_failure_names_path() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where a directory is expected
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let path = blocker.join("hello.mp3");

        let audio = SynthesizedAudio {
            data: Bytes::from_static(b"ID3"),
            format: AudioFormat::Mp3,
        };
        match audio.export(&path).await {
            Err(VoiceoverError::Export { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected export error, got {:?}", other),
        }
    }
}
