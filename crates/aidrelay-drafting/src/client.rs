//! HTTP client for the donation platform's REST API.
//!
//! Wraps `reqwest` with platform-specific error handling, bearer-token
//! management, and typed response deserialization. Non-2xx responses are
//! surfaced as [`PlatformError::Api`] with the response body as the message.

use std::time::Duration;

use serde::Serialize;

use crate::error::PlatformError;
use crate::store::{CampaignStore, IdentityLookup};
use crate::types::{Campaign, CampaignDraft, Identity};

/// Client for the donation platform's REST API.
///
/// Use [`PlatformClient::new`] with the configured base URL; point it at a
/// mock server in tests.
pub struct PlatformClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCampaignRequest<'a> {
    created_by: &'a str,
    #[serde(flatten)]
    draft: &'a CampaignDraft,
}

impl PlatformClient {
    /// Creates a new client for the platform API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aidrelay/0.1 (emergency-drafting)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and deserialize the JSON body, mapping non-2xx
    /// statuses to [`PlatformError::Api`].
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, PlatformError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlatformError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| PlatformError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

impl IdentityLookup for PlatformClient {
    /// Fetches the first platform account holding `role`.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::Api`] on a non-2xx response.
    /// - [`PlatformError::Http`] on network failure.
    /// - [`PlatformError::Deserialize`] if the response shape is unexpected.
    async fn find_by_role(&self, role: &str) -> Result<Option<Identity>, PlatformError> {
        let builder = self
            .request(reqwest::Method::GET, "/users")
            .query(&[("role", role)]);
        let users: Vec<Identity> = self
            .send_json(builder, &format!("users(role={role})"))
            .await?;
        Ok(users.into_iter().next())
    }
}

impl CampaignStore for PlatformClient {
    /// Submits a campaign draft owned by `creator_id`.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::Api`] if the platform rejects the draft.
    /// - [`PlatformError::Http`] on network failure.
    /// - [`PlatformError::Deserialize`] if the response shape is unexpected.
    async fn create_campaign(
        &self,
        creator_id: &str,
        draft: &CampaignDraft,
    ) -> Result<Campaign, PlatformError> {
        let builder = self
            .request(reqwest::Method::POST, "/campaigns")
            .json(&CreateCampaignRequest {
                created_by: creator_id,
                draft,
            });
        self.send_json(builder, "create campaign").await
    }

    /// Lists all campaigns flagged as emergency campaigns.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::Api`] on a non-2xx response.
    /// - [`PlatformError::Http`] on network failure.
    /// - [`PlatformError::Deserialize`] if the response shape is unexpected.
    async fn list_emergency_campaigns(&self) -> Result<Vec<Campaign>, PlatformError> {
        let builder = self
            .request(reqwest::Method::GET, "/campaigns")
            .query(&[("isEmergency", "true")]);
        self.send_json(builder, "emergency campaigns").await
    }
}
