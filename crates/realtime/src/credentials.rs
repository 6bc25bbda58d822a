//! Ephemeral credential resolution.
//!
//! A short-lived key authorizes exactly one realtime session. It is
//! minted server-side (see the `voicelink-api` service) so the browser
//! never sees a long-lived secret. The adapter only needs something
//! that resolves to the key string, so the seam is a trait.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Resolves a short-lived credential for one session.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn ephemeral_key(&self) -> Result<String>;
}

/// Fetches the credential from an HTTP endpoint returning the minted
/// session JSON (the `/api/session` contract).
pub struct HttpCredentialProvider {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpCredentialProvider {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl CredentialProvider for HttpCredentialProvider {
    async fn ephemeral_key(&self) -> Result<String> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .context("credential endpoint unreachable")?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("credential endpoint returned a malformed body")?;

        if !status.is_success() {
            // Surface the server's own error message when it sent one.
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("credential endpoint returned {status}"));
            return Err(anyhow!(message));
        }

        extract_ephemeral_key(&body)
    }
}

/// Pulls the nested ephemeral key value out of a minted session body.
pub fn extract_ephemeral_key(body: &Value) -> Result<String> {
    body.pointer("/client_secret/value")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| anyhow!("session response is missing client_secret.value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_key_from_minted_session() {
        let body = json!({
            "id": "sess_123",
            "client_secret": { "value": "ek_test_abc", "expires_at": 1_700_000_000 }
        });
        assert_eq!(extract_ephemeral_key(&body).unwrap(), "ek_test_abc");
    }

    #[test]
    fn test_extract_key_missing_secret() {
        let body = json!({ "id": "sess_123" });
        let err = extract_ephemeral_key(&body).unwrap_err();
        assert!(err.to_string().contains("client_secret.value"));
    }

    #[test]
    fn test_extract_key_rejects_empty_value() {
        let body = json!({ "client_secret": { "value": "" } });
        assert!(extract_ephemeral_key(&body).is_err());
    }

    #[test]
    fn test_extract_key_rejects_non_string_value() {
        let body = json!({ "client_secret": { "value": 42 } });
        assert!(extract_ephemeral_key(&body).is_err());
    }
}
