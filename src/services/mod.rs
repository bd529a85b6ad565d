// Gateway module for services - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod traits;
mod yandex;

// Public re-exports - the ONLY way to access speech services
pub use traits::{SpeechService, Voiceover};
pub use yandex::{ServiceSettings, YandexSpeechKitService};
