use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "voiceover")]
#[command(version)]
#[command(about = "Cached Yandex SpeechKit voice-overs", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize text (or reuse the cached audio) and print the result
    Say(SayArgs),
    /// Write the default configuration file
    Init,
    /// Create a .env file with SpeechKit credentials
    Setup,
    /// Inspect or clear the audio cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,

        /// Cache directory (defaults to the configured one)
        #[arg(long, global = true)]
        cache_dir: Option<PathBuf>,
    },
    /// List documented voices
    Voices {
        /// Only voices for this language, e.g. ru-RU
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Check credentials, configuration and cache
    Status,
}

#[derive(Args, Debug)]
pub struct SayArgs {
    /// Text to speak, may contain <bookmark mark='name'/> tags; "-" reads stdin
    pub text: String,

    /// Language code, e.g. en-US
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Voice name, e.g. john
    #[arg(long)]
    pub voice: Option<String>,

    /// Speech rate between 0.1 and 3.0
    #[arg(long)]
    pub speed: Option<f32>,

    /// Voice emotion/role, e.g. good
    #[arg(long)]
    pub emotion: Option<String>,

    /// Cache directory (defaults to the configured one)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Audio file name relative to the cache directory
    #[arg(long)]
    pub path: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Show the cache key and whether it is cached, without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Show entry count and size
    Stats,
    /// List cached voice-overs
    List,
    /// Delete cached audio and the index
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}
