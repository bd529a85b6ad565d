// Gateway module for cache - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod index;
mod key;
mod types;

// Public re-exports - the ONLY way to access cache functionality
pub use index::CacheIndex;
pub use key::{audio_basename, input_hash, slugify};
pub use types::{CacheEntry, CacheStats, InputData, VoiceoverResult};
