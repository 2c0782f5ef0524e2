use reqwest::{Client, Response};
use url::Url;

use crate::auth::Token;
use crate::error::{AuditorError, Result};

const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";
const API_PATH: &str = "api/v4/";

/// Request context shared by every GitLab call of a scan run.
///
/// Carries the HTTP client, the resolved REST v4 base URL and the access
/// token. It is passed explicitly to each operation instead of living in
/// process-wide state.
pub struct GitLabClient {
    client: Client,
    api_url: Url,
    token: Token,
}

impl GitLabClient {
    /// Builds a client for the GitLab instance at `instance_url`.
    ///
    /// The REST base `<instance>/api/v4/` is derived here; instance URLs
    /// mounted under a sub-path keep that path.
    pub fn new(instance_url: &str, token: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gitlab-auditor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuditorError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut base = Url::parse(instance_url)
            .map_err(|e| AuditorError::Config(format!("Invalid base URL: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let api_url = base
            .join(API_PATH)
            .map_err(|e| AuditorError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Resolves an API-relative path such as `groups/42/projects`.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AuditorError::Config(format!("Invalid endpoint {path}: {e}")))
    }

    /// Issues an authenticated GET and rejects any non-2xx status.
    pub(super) async fn get<Q>(&self, url: Url, query: &Q) -> Result<Response>
    where
        Q: serde::Serialize + ?Sized,
    {
        let endpoint = url.path().to_owned();

        let response = self
            .client
            .get(url)
            .header(PRIVATE_TOKEN_HEADER, self.token.as_str())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditorError::Http {
                status: status.as_u16(),
                endpoint,
            });
        }

        Ok(response)
    }

    /// Single non-paginated GET decoded as JSON.
    pub(in crate::providers::gitlab) async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.get(self.endpoint(path)?, &[] as &[(&str, &str)]).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Single non-paginated GET returning the body as text.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub(in crate::providers::gitlab) async fn get_text(&self, path: &str) -> Result<String> {
        let response = self.get(self.endpoint(path)?, &[] as &[(&str, &str)]).await?;
        let body = response.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
