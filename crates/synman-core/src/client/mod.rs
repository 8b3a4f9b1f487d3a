//! Synthetics API client.
//!
//! Talks to the New Relic Synthetics REST API: the v3 endpoints own monitors
//! and scripts, the v1 endpoints own locations and alert notifications.
//!
//! # Usage
//!
//! ```rust,no_run
//! use synman_core::client::{ClientConfig, MonitorService, SyntheticsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SyntheticsClient::new(ClientConfig::new("my-api-key"))?;
//!     let locations = client.list_locations().await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Location, Monitor, MonitorSettings, NewMonitor};

/// Default v3 endpoint (monitors, scripts)
pub const DEFAULT_V3_URL: &str = "https://synthetics.newrelic.com/synthetics/api/v3";

/// Default v1 endpoint (locations, notifications)
pub const DEFAULT_V1_URL: &str = "https://synthetics.newrelic.com/synthetics/api/v1";

/// Header carrying the admin API key
const API_KEY_HEADER: &str = "X-Api-Key";

/// Page size used when listing monitors
const MONITOR_PAGE_SIZE: usize = 100;

/// Remote monitor operations the orchestrators rely on.
#[async_trait]
pub trait MonitorService: Send + Sync {
    /// Create a monitor; returns the URL of the new monitor.
    async fn create_synthetic(&self, monitor: &NewMonitor) -> Result<String>;

    /// Fetch a monitor's configuration.
    async fn get_monitor(&self, id: &str) -> Result<Monitor>;

    /// List every monitor on the account.
    async fn list_monitors(&self) -> Result<Vec<Monitor>>;

    /// Apply a partial settings update.
    async fn update_monitor_settings(&self, id: &str, settings: &MonitorSettings) -> Result<()>;

    /// Fetch a monitor's script text.
    async fn get_script(&self, id: &str) -> Result<String>;

    /// Replace a monitor's script text.
    async fn set_script(&self, id: &str, content: &str) -> Result<()>;

    /// List the locations monitors can run from.
    async fn list_locations(&self) -> Result<Vec<Location>>;

    /// Alert emails attached to a monitor.
    async fn get_alert_emails(&self, id: &str) -> Result<Vec<String>>;

    /// Attach alert emails to a monitor.
    async fn add_alert_emails(&self, id: &str, emails: &[String]) -> Result<()>;

    /// Detach one alert email from a monitor.
    async fn remove_alert_email(&self, id: &str, email: &str) -> Result<()>;
}

/// Connection settings for [`SyntheticsClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub v3_url: String,
    pub v1_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for the public endpoints with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            v3_url: DEFAULT_V3_URL.to_string(),
            v1_url: DEFAULT_V1_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the synthetics service
#[derive(Clone)]
pub struct SyntheticsClient {
    client: reqwest::Client,
    api_key: String,
    v3_url: Url,
    v1_url: Url,
}

impl SyntheticsClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            v3_url: parse_base(&config.v3_url)?,
            v1_url: parse_base(&config.v1_url)?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Other(format!("Invalid API base URL: {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        debug!("API request: {} {}", method, url);

        let mut req = self
            .client
            .request(method, url.clone())
            .header(API_KEY_HEADER, &self.api_key);

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound(url.path().to_string()))
        } else {
            let error_text = resp.text().await.unwrap_or_default();
            Err(Error::remote(status.as_u16(), error_text))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let resp = self.send::<()>(Method::GET, url, None).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn parse_base(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::Other(format!("Invalid API base URL '{}': {}", url, e)))
}

#[async_trait]
impl MonitorService for SyntheticsClient {
    async fn create_synthetic(&self, monitor: &NewMonitor) -> Result<String> {
        let url = Self::endpoint(&self.v3_url, &["monitors"])?;
        let resp = self.send(Method::POST, url, Some(monitor)).await?;

        resp.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InvalidResponse("create monitor response has no Location header".into())
            })
    }

    async fn get_monitor(&self, id: &str) -> Result<Monitor> {
        self.get_json(Self::endpoint(&self.v3_url, &["monitors", id])?)
            .await
    }

    async fn list_monitors(&self) -> Result<Vec<Monitor>> {
        let mut monitors = Vec::new();
        loop {
            let mut url = Self::endpoint(&self.v3_url, &["monitors"])?;
            url.query_pairs_mut()
                .append_pair("offset", &monitors.len().to_string())
                .append_pair("limit", &MONITOR_PAGE_SIZE.to_string());

            let page: MonitorPage = self.get_json(url).await?;
            let fetched = page.monitors.len();
            monitors.extend(page.monitors);

            let total = page.count.unwrap_or(monitors.len());
            if fetched == 0 || fetched < MONITOR_PAGE_SIZE || monitors.len() >= total {
                break;
            }
        }
        Ok(monitors)
    }

    async fn update_monitor_settings(&self, id: &str, settings: &MonitorSettings) -> Result<()> {
        let url = Self::endpoint(&self.v3_url, &["monitors", id])?;
        self.send(Method::PATCH, url, Some(settings)).await?;
        Ok(())
    }

    async fn get_script(&self, id: &str) -> Result<String> {
        let url = Self::endpoint(&self.v3_url, &["monitors", id, "script"])?;
        let script: ScriptBody = self.get_json(url).await?;
        decode_script(&script.script_text)
    }

    async fn set_script(&self, id: &str, content: &str) -> Result<()> {
        let url = Self::endpoint(&self.v3_url, &["monitors", id, "script"])?;
        let body = ScriptBody {
            script_text: STANDARD.encode(content),
        };
        self.send(Method::PUT, url, Some(&body)).await?;
        Ok(())
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        self.get_json(Self::endpoint(&self.v1_url, &["locations"])?)
            .await
    }

    async fn get_alert_emails(&self, id: &str) -> Result<Vec<String>> {
        let url = Self::endpoint(&self.v1_url, &["monitors", id, "notifications"])?;
        let body: NotificationsBody = self.get_json(url).await?;
        Ok(body.emails)
    }

    async fn add_alert_emails(&self, id: &str, emails: &[String]) -> Result<()> {
        let url = Self::endpoint(&self.v1_url, &["monitors", id, "notifications"])?;
        let body = NotificationsBody {
            emails: emails.to_vec(),
        };
        self.send(Method::POST, url, Some(&body)).await?;
        Ok(())
    }

    async fn remove_alert_email(&self, id: &str, email: &str) -> Result<()> {
        let url = Self::endpoint(&self.v1_url, &["monitors", id, "notifications", email])?;
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}

fn decode_script(encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::InvalidResponse(format!("script is not valid base64: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::InvalidResponse(format!("script is not valid UTF-8: {}", e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Page of the monitor listing
#[derive(Debug, Deserialize)]
struct MonitorPage {
    #[serde(default)]
    monitors: Vec<Monitor>,
    #[serde(default)]
    count: Option<usize>,
}

/// Script body; the text travels base64-encoded
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptBody {
    script_text: String,
}

/// Alert notification emails
#[derive(Debug, Serialize, Deserialize)]
struct NotificationsBody {
    #[serde(default)]
    emails: Vec<String>,
}
