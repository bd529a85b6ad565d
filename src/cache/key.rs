use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::types::InputData;
use crate::constants::BASENAME_TEXT_CHARS;
use crate::utils::Result;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("slug pattern is valid"));

/// SHA256 of the JSON-serialized input data
pub fn input_hash(input_data: &InputData) -> Result<String> {
    let dumped = serde_json::to_string(input_data)?;
    let mut hasher = Sha256::new();
    hasher.update(dumped.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Readable prefix of the input text usable in a file name
pub fn slugify(text: &str) -> String {
    let prefix: String = text.chars().take(BASENAME_TEXT_CHARS).collect();
    NON_WORD_RE
        .replace_all(&prefix.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

/// Audio file stem for a voice-over: `<slug>-<sha256>`, or just the hash for
/// text without letters or digits
pub fn audio_basename(input_data: &InputData) -> Result<String> {
    let hash = input_hash(input_data)?;
    let slug = slugify(&input_data.input_text);

    if slug.is_empty() {
        Ok(hash)
    } else {
        Ok(format!("{}-{}", slug, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(text: &str, voice: &str) -> InputData {
        InputData {
            input_text: text.to_string(),
            service: "yandex-speechkit".to_string(),
            language: "en-US".to_string(),
            voice: voice.to_string(),
            speed: None,
            emotion: None,
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!  This is  a test."), "hello_world_this_is_a_test");
        assert_eq!(slugify("Привет, мир"), "привет_мир");
        assert_eq!(slugify("?!"), "");

        let long = "word ".repeat(40);
        assert!(slugify(&long).chars().count() <= BASENAME_TEXT_CHARS);
    }

    #[test]
    fn test_basename_shape() {
        let name = audio_basename(&input("Hello world", "john")).unwrap();
        let (slug, hash) = name.rsplit_once('-').unwrap();
        assert_eq!(slug, "hello_world");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_basename_depends_on_every_parameter() {
        let base = audio_basename(&input("Hello world", "john")).unwrap();
        assert_eq!(base, audio_basename(&input("Hello world", "john")).unwrap());
        assert_ne!(base, audio_basename(&input("Hello world", "jane")).unwrap());

        let mut faster = input("Hello world", "john");
        faster.speed = Some(1.3);
        assert_ne!(base, audio_basename(&faster).unwrap());
    }

    #[test]
    fn test_unset_options_are_not_serialized() {
        let json = serde_json::to_string(&input("Hi", "john")).unwrap();
        assert_eq!(
            json,
            r#"{"input_text":"Hi","service":"yandex-speechkit","language":"en-US","voice":"john"}"#
        );
    }
}
