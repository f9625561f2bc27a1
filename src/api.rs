//! Synchronous client for the **IUCN Red List API (v3)**.
//!
//! This module covers the `species/{name}` endpoint and turns its payload into a
//! normalized [`SpeciesRecord`]. One call to [`Client::lookup`] issues at most one
//! HTTP request; there is no retry, caching, or rate limiting.
//!
//! ### Notes
//! - The token travels as the `token` query parameter. It is never logged.
//! - The API answers `200` with `{"message": "..."}` for an invalid token; that is
//!   surfaced as [`FailureReason::Api`], not as a species with unknown fields.
//! - When a name resolves to several entries (e.g. subspecies) the first one wins.
//!
//! Typical usage:
//! ```no_run
//! # use redlist_tracker::{Client, Config};
//! let config = Config::load()?;
//! let client = Client::new(&config)?;
//! let record = client.lookup("Panthera leo")?;
//! println!("{}: {}", record.name, record.conservation_status);
//! # Ok::<(), redlist_tracker::LookupError>(())
//! ```

use crate::config::Config;
use crate::error::{FailureReason, LookupError};
use crate::models::{SpeciesRecord, SpeciesResponse};
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Status code and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs a single blocking `GET`.
///
/// `Err` means no response was received at all; any status code, including
/// errors, comes back as `Ok`.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        (**self).get(url)
    }
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        // No total timeout is set here; reqwest's default applies.
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("redlist-tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("GET {}", redact_token(url)))?;
        let status = resp.status().as_u16();
        let body = resp.text().context("read response body")?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Clone)]
pub struct Client<T: Transport = HttpTransport> {
    pub base_url: String,
    api_key: String,
    transport: T,
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("transport", &self.transport)
            .finish()
    }
}

impl Client<HttpTransport> {
    /// Client talking to the network through [`HttpTransport`].
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        let transport = HttpTransport::new()
            .map_err(|e| LookupError::Configuration(format!("{:#}", e)))?;
        Ok(Self::with_transport(config, transport))
    }
}

// Species names contain spaces; keep only the characters that are safe in a path segment.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, SAFE).to_string()
}

/// Build `{base}/species/{name}?token={key}` with both values percent-encoded.
pub fn species_url(base_url: &str, species_name: &str, api_key: &str) -> String {
    format!(
        "{}/species/{}?token={}",
        base_url.trim_end_matches('/'),
        enc(species_name.trim()),
        enc(api_key)
    )
}

/// Replace the value of a `token=` query parameter with `***`.
pub fn redact_token(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("token=") {
                "token=***"
            } else {
                pair
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            transport,
        }
    }

    /// Look up one species by name.
    ///
    /// ### Errors
    /// - [`LookupError::InvalidInput`] when `species_name` is blank (no request is made)
    /// - [`LookupError::LookupFailed`] for transport errors, non-200 statuses, API error
    ///   payloads, and names that resolve to nothing
    /// - [`LookupError::MalformedResponse`] when the body is not the expected JSON
    pub fn lookup(&self, species_name: &str) -> Result<SpeciesRecord, LookupError> {
        let name = species_name.trim();
        if name.is_empty() {
            return Err(LookupError::InvalidInput(
                "species name must not be empty".into(),
            ));
        }

        let url = species_url(&self.base_url, name, &self.api_key);
        log::debug!("GET {}", redact_token(&url));

        let resp = self
            .transport
            .get(&url)
            .map_err(|e| LookupError::LookupFailed(FailureReason::Transport(format!("{:#}", e))))?;
        log::debug!("HTTP {} ({} bytes) for {:?}", resp.status, resp.body.len(), name);

        if resp.status != 200 {
            return Err(LookupError::LookupFailed(FailureReason::Status(resp.status)));
        }

        interpret_body(name, &resp.body)
    }
}

/// Turn a `200` body into a record for `name`.
pub fn interpret_body(name: &str, body: &str) -> Result<SpeciesRecord, LookupError> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| LookupError::MalformedResponse(format!("body is not JSON: {}", e)))?;

    let obj = v
        .as_object()
        .ok_or_else(|| LookupError::MalformedResponse("expected a JSON object".into()))?;

    // Error payloads come back with status 200 and no `result`.
    if !obj.contains_key("result") {
        let msg = ["message", "error"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str));
        if let Some(msg) = msg {
            return Err(LookupError::LookupFailed(FailureReason::Api(msg.to_string())));
        }
    }

    let parsed: SpeciesResponse = serde_json::from_value(v)
        .map_err(|e| LookupError::MalformedResponse(format!("unexpected shape: {}", e)))?;

    let entry = parsed
        .result
        .into_iter()
        .next()
        .ok_or(LookupError::LookupFailed(FailureReason::NotFound))?;

    Ok(SpeciesRecord::from_entry(name, entry))
}
