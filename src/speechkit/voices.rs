use tracing::warn;

use crate::constants::SPEECHKIT_VOICES_DOCS_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
        }
    }
}

/// A documented SpeechKit voice
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    pub name: &'static str,
    pub lang: &'static str,
    pub gender: Gender,
    pub emotions: &'static [&'static str],
}

const fn voice(
    name: &'static str,
    lang: &'static str,
    gender: Gender,
    emotions: &'static [&'static str],
) -> Voice {
    Voice {
        name,
        lang,
        gender,
        emotions,
    }
}

/// Voices listed in the SpeechKit documentation
pub const VOICES: &[Voice] = &[
    voice("john", "en-US", Gender::Male, &[]),
    voice("lea", "de-DE", Gender::Female, &[]),
    voice("naomi", "he-IL", Gender::Female, &[]),
    voice("amira", "kk-KK", Gender::Female, &[]),
    voice("madi", "kk-KK", Gender::Male, &[]),
    voice("nigora", "uz-UZ", Gender::Female, &[]),
    voice("alena", "ru-RU", Gender::Female, &["neutral", "good"]),
    voice("filipp", "ru-RU", Gender::Male, &[]),
    voice("ermil", "ru-RU", Gender::Male, &["neutral", "good"]),
    voice(
        "jane",
        "ru-RU",
        Gender::Female,
        &["neutral", "good", "evil"],
    ),
    voice("madirus", "ru-RU", Gender::Male, &[]),
    voice("omazh", "ru-RU", Gender::Female, &["neutral", "evil"]),
    voice("zahar", "ru-RU", Gender::Male, &["neutral", "good"]),
    voice(
        "dasha",
        "ru-RU",
        Gender::Female,
        &["neutral", "good", "friendly"],
    ),
    voice("julia", "ru-RU", Gender::Female, &["neutral", "strict"]),
    voice("lera", "ru-RU", Gender::Female, &["neutral", "friendly"]),
    voice(
        "marina",
        "ru-RU",
        Gender::Female,
        &["neutral", "whisper", "friendly"],
    ),
    voice("alexander", "ru-RU", Gender::Male, &["neutral", "good"]),
    voice(
        "kirill",
        "ru-RU",
        Gender::Male,
        &["neutral", "strict", "good"],
    ),
    voice("anton", "ru-RU", Gender::Male, &["neutral", "good"]),
];

/// Look up a voice by name (case-insensitive)
pub fn find_voice(name: &str) -> Option<&'static Voice> {
    VOICES.iter().find(|v| v.name.eq_ignore_ascii_case(name))
}

/// All voices for a language code (case-insensitive)
pub fn voices_for_lang(lang: &str) -> Vec<&'static Voice> {
    VOICES
        .iter()
        .filter(|v| v.lang.eq_ignore_ascii_case(lang))
        .collect()
}

/// Warn about combinations the catalog doesn't know; the API stays the authority
///
/// Returns true when the combination is documented.
pub fn check_voice(lang: &str, voice: &str, emotion: Option<&str>) -> bool {
    let Some(known) = find_voice(voice) else {
        warn!("Unknown voice '{}', see {}", voice, SPEECHKIT_VOICES_DOCS_URL);
        return false;
    };

    if !known.lang.eq_ignore_ascii_case(lang) {
        warn!(
            "Voice '{}' is documented for {}, not {}",
            known.name, known.lang, lang
        );
        return false;
    }

    if let Some(emotion) = emotion {
        if !known.emotions.iter().any(|e| e.eq_ignore_ascii_case(emotion)) {
            warn!("Voice '{}' has no documented emotion '{}'", known.name, emotion);
            return false;
        }
    }

    true
}
