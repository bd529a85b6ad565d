pub mod app;
pub mod auth;
pub mod cache;
pub mod cli;
pub mod constants;
pub mod services;
pub mod speechkit;
pub mod utils;

pub use app::{load_config, Config};
pub use cache::{InputData, VoiceoverResult};
pub use services::{SpeechService, Voiceover, YandexSpeechKitService};
pub use utils::VoiceoverError;
