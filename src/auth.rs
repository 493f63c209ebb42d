//! Authorized-user credential loading and OAuth2 token exchange
//!
//! Credentials are read from a gcloud ADC file ("application default
//! credentials"): a JSON document holding the client id, client secret and
//! refresh token of a pre-authorized OAuth2 user. The refresh token is
//! exchanged for a bearer token once, at client-construction time; the token
//! is then held for the process lifetime.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Google OAuth2 token endpoint used for the refresh-token exchange
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Errors raised while loading the credentials file
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The file does not exist or cannot be read
    #[error("credentials file not accessible at {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON
    #[error("credentials file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON is valid but a required authorization field is absent
    #[error("credentials file is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Errors raised while exchanging the refresh token for a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the credentials
    #[error("token endpoint rejected the credentials ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The exchange request never produced an HTTP response
    #[error("token exchange request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// OAuth2 authorized-user credentials loaded from an ADC file
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// Optional project the quota is billed against
    pub quota_project_id: Option<String>,
}

impl Credentials {
    /// Reads and parses an authorized-user credentials file
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::FileAccess` if the path is missing or
    /// unreadable, `CredentialError::Parse` for malformed JSON, and
    /// `CredentialError::MissingField` when an authorization field is absent.
    pub fn from_authorized_user_file(path: &Path) -> Result<Self, CredentialError> {
        let raw = fs::read_to_string(path).map_err(|source| CredentialError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let info: serde_json::Value = serde_json::from_str(&raw)?;
        Self::from_authorized_user_info(&info)
    }

    /// Builds credentials from an already-parsed ADC document
    pub fn from_authorized_user_info(info: &serde_json::Value) -> Result<Self, CredentialError> {
        let quota_project_id = info
            .get("quota_project_id")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(Self {
            client_id: required_field(info, "client_id")?,
            client_secret: required_field(info, "client_secret")?,
            refresh_token: required_field(info, "refresh_token")?,
            quota_project_id,
        })
    }

    /// Exchanges the refresh token for a bearer token
    ///
    /// One network round-trip to [`TOKEN_ENDPOINT`]. The result carries the
    /// access token and its advertised lifetime; no refresh is scheduled.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` when the endpoint answers non-2xx
    /// (revoked or malformed credentials) and `AuthError::Transport` for
    /// connection-level failures.
    pub async fn exchange_for_token(
        &self,
        http: &reqwest::Client,
    ) -> Result<BearerToken, AuthError> {
        debug!(client_id = %self.client_id, "exchanging refresh token for bearer token");

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
        ];

        let response = http.post(TOKEN_ENDPOINT).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(BearerToken {
            access_token: token.access_token,
            expires_in_secs: token.expires_in,
        })
    }
}

fn required_field(
    info: &serde_json::Value,
    field: &'static str,
) -> Result<String, CredentialError> {
    info.get(field)
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(CredentialError::MissingField(field))
}

/// A short-lived OAuth2 access token obtained from the refresh-token exchange
#[derive(Clone)]
pub struct BearerToken {
    access_token: String,
    expires_in_secs: u64,
}

impl BearerToken {
    /// Value for the `Authorization` request header
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Advertised token lifetime in seconds
    pub fn expires_in_secs(&self) -> u64 {
        self.expires_in_secs
    }
}

// Never log or print the raw token.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("access_token", &"<redacted>")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_credentials_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_credentials() {
        let file = write_credentials_file(
            r#"{
                "client_id": "id-123.apps.googleusercontent.com",
                "client_secret": "secret-456",
                "refresh_token": "token-789",
                "quota_project_id": "my-project",
                "type": "authorized_user"
            }"#,
        );

        let creds = Credentials::from_authorized_user_file(file.path()).unwrap();
        assert_eq!(creds.client_id, "id-123.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "secret-456");
        assert_eq!(creds.refresh_token, "token-789");
        assert_eq!(creds.quota_project_id.as_deref(), Some("my-project"));
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let result =
            Credentials::from_authorized_user_file(Path::new("/nonexistent/adc.json"));

        match result.unwrap_err() {
            CredentialError::FileAccess { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/adc.json"));
            }
            other => panic!("expected FileAccess, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = write_credentials_file("{ not json");

        let result = Credentials::from_authorized_user_file(file.path());
        assert!(matches!(result.unwrap_err(), CredentialError::Parse(_)));
    }

    #[test]
    fn test_missing_refresh_token_is_reported() {
        let file = write_credentials_file(
            r#"{"client_id": "id", "client_secret": "secret"}"#,
        );

        let result = Credentials::from_authorized_user_file(file.path());
        match result.unwrap_err() {
            CredentialError::MissingField(field) => assert_eq!(field, "refresh_token"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_field_treated_as_missing() {
        let file = write_credentials_file(
            r#"{"client_id": "", "client_secret": "s", "refresh_token": "r"}"#,
        );

        let result = Credentials::from_authorized_user_file(file.path());
        assert!(matches!(
            result.unwrap_err(),
            CredentialError::MissingField("client_id")
        ));
    }

    #[test]
    fn test_bearer_token_debug_redacts_secret() {
        let token = BearerToken {
            access_token: "ya29.top-secret".to_string(),
            expires_in_secs: 3599,
        };

        let debug = format!("{token:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_authorization_value() {
        let token = BearerToken {
            access_token: "abc".to_string(),
            expires_in_secs: 60,
        };
        assert_eq!(token.authorization_value(), "Bearer abc");
    }
}
