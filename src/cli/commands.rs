use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

use super::args::{CacheAction, Cli, Commands, OutputFormat, SayArgs};
use crate::{
    app::{get_config_dir, init_config, load_config_from, Config},
    auth::{create_dotenv_file, load_dotenv, resolve_credentials},
    cache::{audio_basename, CacheIndex, VoiceoverResult},
    constants::{DOTENV_FILENAME, LOCAL_CONFIG_PATH},
    services::{ServiceSettings, SpeechService, Voiceover, YandexSpeechKitService},
    speechkit::{voices_for_lang, VOICES},
    utils::{bookmark_names, VoiceoverError},
};

/// Handle CLI subcommands
pub async fn handle_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Say(args) => {
            let config = load_config_from(cli.config.as_deref())?;
            say(config, args).await
        }
        Commands::Init => {
            let path = init_config()?;
            println!("Configuration: {}", path.display());
            Ok(())
        }
        Commands::Setup => setup(),
        Commands::Cache { action, cache_dir } => {
            let dir = match cache_dir {
                Some(dir) => dir.clone(),
                None => load_config_from(cli.config.as_deref())?.cache.resolve_dir()?,
            };
            cache(*action, dir)
        }
        Commands::Voices { lang } => {
            list_voices(lang.as_deref());
            Ok(())
        }
        Commands::Status => show_status(cli),
    }
}

/// Whether a failed command only asks the user to run again
///
/// A freshly written .env file ends the run without an error status.
pub fn is_clean_exit(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<VoiceoverError>(),
        Some(VoiceoverError::DotenvCreated(_))
    )
}

/// Apply per-invocation overrides on top of the loaded config
fn apply_overrides(mut config: Config, args: &SayArgs) -> Result<Config> {
    if let Some(lang) = &args.lang {
        config.speechkit.lang = lang.clone();
    }
    if let Some(voice) = &args.voice {
        config.speechkit.voice = voice.clone();
    }
    if args.speed.is_some() {
        config.speechkit.speed = args.speed;
    }
    if args.emotion.is_some() {
        config.speechkit.emotion = args.emotion.clone();
    }
    if args.cache_dir.is_some() {
        config.cache.dir = args.cache_dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text.trim_end().to_string())
}

/// Synthesize text, or report what would happen with --dry-run
async fn say(config: Config, args: &SayArgs) -> Result<()> {
    let config = apply_overrides(config, args)?;
    let text = read_text(&args.text)?;

    if args.dry_run {
        return dry_run(&config, &text);
    }

    let service = YandexSpeechKitService::new(&config)?;

    let voiceover = match &args.path {
        // Explicit file name: generate and record like voiceover() does
        Some(path) => {
            let cached = service
                .get_cached_result(&service.input_data(&text), service.cache_dir())?
                .is_some();
            let result = service
                .generate_from_text(&text, None, Some(path.as_str()))
                .await?;
            if !cached {
                service.record_result(&result, service.cache_dir())?;
            }
            Voiceover {
                audio_path: service.cache_dir().join(&result.original_audio),
                result,
                cached,
            }
        }
        None => service.voiceover(&text).await?,
    };

    print_voiceover(&voiceover, &text, args.output_format)
}

fn print_voiceover(voiceover: &Voiceover, text: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&voiceover.result)?);
        }
        OutputFormat::Text => {
            let origin = if voiceover.cached { "cached" } else { "synthesized" };
            println!("{} ({})", voiceover.audio_path.display(), origin.green());
            let marks = bookmark_names(text);
            if !marks.is_empty() {
                println!("Bookmarks: {}", marks.join(", "));
            }
        }
    }
    Ok(())
}

fn dry_run(config: &Config, text: &str) -> Result<()> {
    let settings = ServiceSettings::from(&config.speechkit);
    let input_data = settings.input_data(text);
    let cache_dir = config.cache.resolve_dir()?;
    let basename = audio_basename(&input_data)?;
    let cached: Option<VoiceoverResult> = CacheIndex::open(&cache_dir)?.lookup(&input_data);

    println!("Cache directory: {}", cache_dir.display());
    println!("Spoken text: {}", input_data.input_text);
    println!("Audio file: {}.{}", basename, settings.format.extension());
    let marks = bookmark_names(text);
    if !marks.is_empty() {
        println!("Bookmarks: {}", marks.join(", "));
    }
    match cached {
        Some(hit) => println!("Cached: {} ({})", "yes".green(), hit.original_audio),
        None => println!("Cached: {}", "no".yellow()),
    }
    Ok(())
}

/// Create .env interactively in the current directory
fn setup() -> Result<()> {
    let config = load_config_from(None).unwrap_or_default();
    let path = std::env::current_dir()?.join(DOTENV_FILENAME);

    let stdin = std::io::stdin();
    let created = create_dotenv_file(
        &[config.speechkit.api_key_env.as_str()],
        &path,
        &mut stdin.lock(),
        &mut std::io::stdout(),
    )?;

    if !created {
        println!("No .env file written.");
    }
    Ok(())
}

fn cache(action: CacheAction, dir: PathBuf) -> Result<()> {
    let mut index = CacheIndex::open(&dir)?;

    match action {
        CacheAction::Stats => println!("{}", index.stats().format()),
        CacheAction::List => {
            if index.entries().is_empty() {
                println!("No cached voice-overs in {}", dir.display());
            }
            for entry in index.entries() {
                let data = &entry.result.input_data;
                let created = entry
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {}/{}  {}  {:?}",
                    created,
                    data.language,
                    data.voice,
                    entry.result.original_audio,
                    truncate(&data.input_text, 60)
                );
            }
        }
        CacheAction::Clear => {
            let removed = index.clear()?;
            println!("Removed {} cached voice-overs from {}", removed, dir.display());
        }
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}

fn list_voices(lang: Option<&str>) {
    let voices = match lang {
        Some(lang) => voices_for_lang(lang),
        None => VOICES.iter().collect(),
    };

    if voices.is_empty() {
        println!("No documented voices for {}", lang.unwrap_or("-"));
        return;
    }

    for voice in voices {
        let emotions = if voice.emotions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", voice.emotions.join(", "))
        };
        println!(
            "  • {:<10} {:<6} {:<6}{}",
            voice.name.green(),
            voice.lang,
            voice.gender.as_str(),
            emotions
        );
    }
}

/// Show credential, configuration and cache status
fn show_status(cli: &Cli) -> Result<()> {
    println!("speechkit-voiceover v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = match load_config_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            println!("  [ERROR] Configuration: {:#}", e);
            Config::default()
        }
    };

    // Configuration files
    let global = get_config_dir()?.join("config.toml");
    if global.exists() {
        println!("  [OK] Configuration: {}", global.display());
    } else {
        println!("  [WARNING] Configuration: Not found (using defaults)");
    }
    if PathBuf::from(LOCAL_CONFIG_PATH).exists() {
        println!("  [OK] Project configuration: {}", LOCAL_CONFIG_PATH);
    }

    // Credentials
    let dotenv = load_dotenv();
    let env_var = &config.speechkit.api_key_env;
    match resolve_credentials(env_var, |name| std::env::var(name).ok()) {
        Some(credentials) => println!("  [OK] Credentials: {:?}", credentials),
        None => println!(
            "  [ERROR] Credentials: {} is not set (run `voiceover setup`)",
            env_var
        ),
    }
    if let Some(path) = dotenv {
        println!("      • loaded from {}", path.display());
    }

    // Voice
    println!(
        "  [OK] Voice: {} ({})",
        config.speechkit.voice, config.speechkit.lang
    );

    // Cache
    let cache_dir = config.cache.resolve_dir()?;
    match CacheIndex::open(&cache_dir) {
        Ok(index) => {
            let stats = index.stats();
            println!(
                "  [OK] Cache: {} ({} entries)",
                cache_dir.display(),
                stats.entries
            );
        }
        Err(e) => println!("  [ERROR] Cache: {}", e),
    }

    println!();
    Ok(())
}
