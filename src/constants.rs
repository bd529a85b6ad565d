/// Constants module to avoid magic numbers in the codebase

// Yandex SpeechKit API
pub const SPEECHKIT_TTS_URL: &str = "https://tts.api.cloud.yandex.net/speech/v1/tts:synthesize";
pub const SPEECHKIT_AUTH_DOCS_URL: &str = "https://yandex.cloud/en/docs/speechkit/sdk/python/auth";
pub const SPEECHKIT_VOICES_DOCS_URL: &str = "https://yandex.cloud/en/docs/speechkit/tts/voices";
pub const SPEECHKIT_MAX_TEXT_CHARS: usize = 5000;
pub const SPEECHKIT_MIN_SPEED: f32 = 0.1;
pub const SPEECHKIT_MAX_SPEED: f32 = 3.0;

// Credentials
pub const API_KEY_ENV: &str = "YANDEX_SPEECHKIT_API_KEY";
pub const IAM_TOKEN_ENV: &str = "YANDEX_SPEECHKIT_IAM_TOKEN";
pub const FOLDER_ID_ENV: &str = "YANDEX_FOLDER_ID";
pub const DOTENV_FILENAME: &str = ".env";

// Service
pub const SERVICE_NAME: &str = "yandex-speechkit";
pub const DEFAULT_LANG: &str = "en-US";
pub const DEFAULT_VOICE: &str = "john";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;

// Cache
pub const CACHE_INDEX_FILENAME: &str = "cache.json";
pub const CACHE_SUBDIR: &str = "voiceovers";
pub const BASENAME_TEXT_CHARS: usize = 50;

// Config
pub const APP_NAME: &str = "speechkit-voiceover";
pub const ENV_PREFIX: &str = "VOICEOVER_";
pub const LOCAL_CONFIG_PATH: &str = ".voiceover/config.toml";
