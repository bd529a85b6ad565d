// Gateway module for speechkit - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod types;
mod voices;

// Public re-exports - the ONLY way to access SpeechKit functionality
pub use client::{validate_text, SpeechKitClient};
pub use types::{AudioFormat, SynthesisRequest, SynthesizedAudio, Synthesizer};
pub use voices::{check_voice, find_voice, voices_for_lang, Gender, Voice, VOICES};

#[cfg(test)]
pub use types::MockSynthesizer;
