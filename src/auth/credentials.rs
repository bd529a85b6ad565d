use std::fmt;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::dotenv_setup::create_dotenv_file;
use crate::constants::{DOTENV_FILENAME, FOLDER_ID_ENV, IAM_TOKEN_ENV, SPEECHKIT_AUTH_DOCS_URL};
use crate::utils::{Result, VoiceoverError};

/// Credentials accepted by the SpeechKit API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Service account API key
    ApiKey(String),
    /// Short-lived IAM token, which needs the folder the request is billed to
    IamToken { token: String, folder_id: String },
}

impl Credentials {
    /// Value for the HTTP `Authorization` header
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::ApiKey(key) => format!("Api-Key {}", key),
            Credentials::IamToken { token, .. } => format!("Bearer {}", token),
        }
    }

    /// Folder id sent with IAM token requests
    pub fn folder_id(&self) -> Option<&str> {
        match self {
            Credentials::ApiKey(_) => None,
            Credentials::IamToken { folder_id, .. } => Some(folder_id),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("Credentials::ApiKey(<redacted>)"),
            Credentials::IamToken { folder_id, .. } => f
                .debug_struct("Credentials::IamToken")
                .field("token", &"<redacted>")
                .field("folder_id", folder_id)
                .finish(),
        }
    }
}

/// Load the nearest .env file, searching from the current directory upwards
///
/// Variables already present in the process environment are not overridden.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}

/// Pick credentials from a variable lookup: API key first, then IAM token + folder id
pub fn resolve_credentials<F>(api_key_env: &str, lookup: F) -> Option<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty(api_key_env) {
        return Some(Credentials::ApiKey(key));
    }

    match (non_empty(IAM_TOKEN_ENV), non_empty(FOLDER_ID_ENV)) {
        (Some(token), Some(folder_id)) => Some(Credentials::IamToken { token, folder_id }),
        (Some(_), None) => {
            warn!(
                "{} is set but {} is not; IAM token auth needs both",
                IAM_TOKEN_ENV, FOLDER_ID_ENV
            );
            None
        }
        _ => None,
    }
}

/// Read SpeechKit credentials from the environment and .env
///
/// When nothing is configured and the session is interactive, offers to create a
/// .env file. A freshly created file yields `DotenvCreated` so the caller can stop
/// and ask the user to run again.
pub fn init_credentials(api_key_env: &str) -> Result<Credentials> {
    load_dotenv();

    let dotenv_path = std::env::current_dir()?.join(DOTENV_FILENAME);
    let mut input = std::io::stdin().lock();
    let interactive = input.is_terminal();

    bootstrap_credentials(
        api_key_env,
        |name| std::env::var(name).ok(),
        interactive.then_some(&mut input),
        &mut std::io::stderr(),
        &dotenv_path,
    )
}

/// Resolve credentials, falling back to the .env prompt on `input`
///
/// `input` is `None` for non-interactive sessions, which fail with
/// `MissingCredentials` straight away.
pub fn bootstrap_credentials<F, R, W>(
    api_key_env: &str,
    lookup: F,
    input: Option<&mut R>,
    output: &mut W,
    dotenv_path: &Path,
) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
    R: BufRead,
    W: Write,
{
    if let Some(credentials) = resolve_credentials(api_key_env, lookup) {
        debug!("Using SpeechKit credentials: {:?}", credentials);
        return Ok(credentials);
    }

    error!(
        "Could not find the environment variable {}. \
         Yandex SpeechKit API needs account credentials to connect.",
        api_key_env
    );
    info!(
        "Check out {} to learn how to create an account and get your api key.",
        SPEECHKIT_AUTH_DOCS_URL
    );

    let Some(input) = input else {
        return Err(VoiceoverError::MissingCredentials(api_key_env.to_string()));
    };

    if create_dotenv_file(&[api_key_env], dotenv_path, input, output)? {
        info!("The .env file has been created. Please run again.");
        Err(VoiceoverError::DotenvCreated(dotenv_path.to_path_buf()))
    } else {
        Err(VoiceoverError::MissingCredentials(api_key_env.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_api_key_preferred() {
        let lookup = lookup_from(&[
            ("YANDEX_SPEECHKIT_API_KEY", "secret"),
            (IAM_TOKEN_ENV, "token"),
            (FOLDER_ID_ENV, "folder"),
        ]);
        let creds = resolve_credentials("YANDEX_SPEECHKIT_API_KEY", lookup).unwrap();
        assert_eq!(creds, Credentials::ApiKey("secret".to_string()));
        assert_eq!(creds.authorization_header(), "Api-Key secret");
        assert_eq!(creds.folder_id(), None);
    }

    #[test]
    fn test_iam_token_fallback() {
        let lookup = lookup_from(&[(IAM_TOKEN_ENV, "t0ken"), (FOLDER_ID_ENV, "b1g")]);
        let creds = resolve_credentials("YANDEX_SPEECHKIT_API_KEY", lookup).unwrap();
        assert_eq!(creds.authorization_header(), "Bearer t0ken");
        assert_eq!(creds.folder_id(), Some("b1g"));
    }

    #[test]
    fn test_missing_or_blank_credentials() {
        let lookup = lookup_from(&[("YANDEX_SPEECHKIT_API_KEY", "   ")]);
        assert!(resolve_credentials("YANDEX_SPEECHKIT_API_KEY", lookup).is_none());

        // IAM token alone is not enough
        let lookup = lookup_from(&[(IAM_TOKEN_ENV, "t0ken")]);
        assert!(resolve_credentials("YANDEX_SPEECHKIT_API_KEY", lookup).is_none());
    }

    #[test]
    fn test_custom_key_variable() {
        let lookup = lookup_from(&[("MY_TTS_KEY", "abc")]);
        let creds = resolve_credentials("MY_TTS_KEY", lookup).unwrap();
        assert_eq!(creds, Credentials::ApiKey("abc".to_string()));
    }

    #[test]
    fn test_bootstrap_uses_configured_key_without_prompting() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let mut input = Cursor::new("y\nunused\n");
        let mut output = Vec::new();

        let creds = bootstrap_credentials(
            "YANDEX_SPEECHKIT_API_KEY",
            lookup_from(&[("YANDEX_SPEECHKIT_API_KEY", "secret")]),
            Some(&mut input),
            &mut output,
            &path,
        )
        .unwrap();

        assert_eq!(creds, Credentials::ApiKey("secret".to_string()));
        assert!(output.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_non_interactive_bootstrap_reports_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");

        let err = bootstrap_credentials(
            "YANDEX_SPEECHKIT_API_KEY",
            lookup_from(&[]),
            None::<&mut Cursor<&str>>,
            &mut Vec::new(),
            &path,
        )
        .unwrap_err();

        match err {
            VoiceoverError::MissingCredentials(name) => {
                assert_eq!(name, "YANDEX_SPEECHKIT_API_KEY")
            }
            other => panic!("expected missing credentials, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_completed_prompt_reports_dotenv_created() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let mut input = Cursor::new("y\nmy-api-key\n");
        let mut output = Vec::new();

        let err = bootstrap_credentials(
            "YANDEX_SPEECHKIT_API_KEY",
            lookup_from(&[]),
            Some(&mut input),
            &mut output,
            &path,
        )
        .unwrap_err();

        assert!(matches!(err, VoiceoverError::DotenvCreated(ref created) if created == &path));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "YANDEX_SPEECHKIT_API_KEY=my-api-key\n"
        );
    }

    #[test]
    fn test_declined_prompt_reports_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let mut input = Cursor::new("n\n");

        let err = bootstrap_credentials(
            "MY_TTS_KEY",
            lookup_from(&[]),
            Some(&mut input),
            &mut Vec::new(),
            &path,
        )
        .unwrap_err();

        assert!(matches!(err, VoiceoverError::MissingCredentials(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::ApiKey("super-secret".to_string());
        assert!(!format!("{:?}", creds).contains("super-secret"));

        let creds = Credentials::IamToken {
            token: "super-secret".to_string(),
            folder_id: "b1g".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("b1g"));
    }
}
