use std::path::PathBuf;
use thiserror::Error;

/// Main error type for speechkit-voiceover
#[derive(Error, Debug)]
pub enum VoiceoverError {
    #[error("The environment variable {0} is not set. Please set it or create a .env file with the variable.")]
    MissingCredentials(String),

    #[error("The .env file has been created at {}. Please run again.", .0.display())]
    DotenvCreated(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Nothing to synthesize: the text is empty once bookmarks are removed")]
    EmptyText,

    #[error("Text is {len} characters long, Yandex SpeechKit accepts at most {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("Failed to synthesize: {0}. See the documentation for more information.")]
    Synthesis(String),

    #[error("Yandex SpeechKit gave an error. You are either not connected to the internet, or there is a problem with the Yandex SpeechKit: {0}")]
    Network(String),

    #[error("Failed to export audio to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for VoiceoverError {
    fn from(err: reqwest::Error) -> Self {
        VoiceoverError::Network(err.to_string())
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, VoiceoverError>;
