use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::types::{SynthesisRequest, SynthesizedAudio, Synthesizer};
use crate::app::SpeechKitConfig;
use crate::auth::Credentials;
use crate::constants::SPEECHKIT_MAX_TEXT_CHARS;
use crate::utils::{Result, VoiceoverError};

/// HTTP client for the SpeechKit v1 synthesis endpoint
pub struct SpeechKitClient {
    client: Client,
    endpoint: String,
    credentials: Credentials,
}

impl SpeechKitClient {
    /// Create a client for `endpoint`
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        })
    }

    /// Create a client from the `[speechkit]` config section
    pub fn from_config(config: &SpeechKitConfig, credentials: Credentials) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            credentials,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Form fields for a request, in the order the API documents them
    fn form_fields(&self, request: &SynthesisRequest) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("text", request.text.clone()),
            ("lang", request.lang.clone()),
            ("voice", request.voice.clone()),
            ("format", request.format.as_str().to_string()),
        ];

        if let Some(speed) = request.speed {
            fields.push(("speed", speed.to_string()));
        }
        if let Some(emotion) = &request.emotion {
            fields.push(("emotion", emotion.clone()));
        }
        if let Some(folder_id) = self.credentials.folder_id() {
            fields.push(("folderId", folder_id.to_string()));
        }

        fields
    }
}

/// Reject text the API would refuse before spending a request on it
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(VoiceoverError::EmptyText);
    }

    let len = text.chars().count();
    if len > SPEECHKIT_MAX_TEXT_CHARS {
        return Err(VoiceoverError::TextTooLong {
            len,
            max: SPEECHKIT_MAX_TEXT_CHARS,
        });
    }

    Ok(())
}

#[async_trait]
impl Synthesizer for SpeechKitClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio> {
        validate_text(&request.text)?;

        debug!(
            "Synthesizing {} chars with voice {} ({})",
            request.text.chars().count(),
            request.voice,
            request.lang
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .form(&self.form_fields(request))
            .send()
            .await
            .map_err(|e| VoiceoverError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceoverError::Synthesis(describe_api_error(status, &body)));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| VoiceoverError::Network(e.to_string()))?;

        if data.is_empty() {
            return Err(VoiceoverError::Synthesis("empty audio response".to_string()));
        }

        Ok(SynthesizedAudio {
            data,
            format: request.format,
        })
    }
}

// Error body returned by the API alongside non-2xx statuses

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_code: Option<String>,
    error_message: Option<String>,
}

fn describe_api_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            error_code: Some(code),
            error_message: Some(message),
        }) => format!("{} ({}): {}", code, status.as_u16(), message),
        Ok(ApiErrorBody {
            error_message: Some(message),
            ..
        }) => format!("HTTP {}: {}", status.as_u16(), message),
        _ if body.trim().is_empty() => format!("HTTP {}", status.as_u16()),
        _ => format!("HTTP {}: {}", status.as_u16(), body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speechkit::AudioFormat;
    use pretty_assertions::assert_eq;

    fn client(credentials: Credentials) -> SpeechKitClient {
        SpeechKitClient::new("http://localhost:1", credentials, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_form_fields_minimal() {
        let client = client(Credentials::ApiKey("k".into()));
        let request = SynthesisRequest::new("Hello", "en-US", "john");

        assert_eq!(
            client.form_fields(&request),
            vec![
                ("text", "Hello".to_string()),
                ("lang", "en-US".to_string()),
                ("voice", "john".to_string()),
                ("format", "mp3".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_with_options_and_folder() {
        let client = client(Credentials::IamToken {
            token: "t".into(),
            folder_id: "b1g".into(),
        });
        let mut request = SynthesisRequest::new("Привет", "ru-RU", "alena");
        request.speed = Some(1.5);
        request.emotion = Some("good".into());
        request.format = AudioFormat::OggOpus;

        let fields = client.form_fields(&request);
        assert!(fields.contains(&("format", "oggopus".to_string())));
        assert!(fields.contains(&("speed", "1.5".to_string())));
        assert!(fields.contains(&("emotion", "good".to_string())));
        assert!(fields.contains(&("folderId", "b1g".to_string())));
    }

    #[test]
    fn test_validate_text() {
        assert!(matches!(validate_text("  \n"), Err(VoiceoverError::EmptyText)));
        assert!(validate_text("Hello").is_ok());

        // Limit counts characters, not bytes
        let cyrillic = "я".repeat(SPEECHKIT_MAX_TEXT_CHARS);
        assert!(validate_text(&cyrillic).is_ok());
        let too_long = "a".repeat(SPEECHKIT_MAX_TEXT_CHARS + 1);
        assert!(matches!(
            validate_text(&too_long),
            Err(VoiceoverError::TextTooLong { len, .. }) if len == SPEECHKIT_MAX_TEXT_CHARS + 1
        ));
    }

    #[test]
    fn test_describe_api_error() {
        let body = r#"{"error_code":"UNAUTHORIZED","error_message":"Unknown api key"}"#;
        assert_eq!(
            describe_api_error(StatusCode::UNAUTHORIZED, body),
            "UNAUTHORIZED (401): Unknown api key"
        );
        assert_eq!(describe_api_error(StatusCode::BAD_GATEWAY, ""), "HTTP 502");
        assert_eq!(
            describe_api_error(StatusCode::BAD_REQUEST, "plain failure"),
            "HTTP 400: plain failure"
        );
    }
}
