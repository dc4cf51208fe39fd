//! HTTP transport: authenticated requests against the profile's server.

#![deny(clippy::all, clippy::pedantic)]

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiVersion, Encoding, Operation, Selected};
use crate::config::Profile;
use crate::error::CliError;

/// Per-request timeout for everything except job runs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Synchronous job runs may legitimately take days.
pub const JOB_RUN_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);
/// Delay between status polls of `--wait` loops.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct Ctx {
    pub client: Client,
    pub base: Url,
    pub token: Option<String>,
    pub build: Option<u32>,
    /// Global `--api-version` override.
    pub api_version: Option<ApiVersion>,
    /// Global `--json`.
    pub json: bool,
    pub poll_interval: Duration,
}

/// Request payload.
#[derive(Debug, Default)]
pub enum Body {
    #[default]
    Empty,
    Form(Vec<(String, String)>),
    Json(Value),
    Bytes(Vec<u8>),
}

impl Body {
    fn encoding(&self) -> Encoding {
        match self {
            Self::Empty => Encoding::None,
            Self::Form(_) => Encoding::Form,
            Self::Json(_) => Encoding::Json,
            Self::Bytes(_) => Encoding::Binary,
        }
    }
}

/// Per-call inputs: path parameters, query string, body and overrides.
#[derive(Debug, Default)]
pub struct Call {
    params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    body: Body,
    timeout: Option<Duration>,
    basic_auth: Option<(String, String)>,
}

impl Call {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn query_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Body::Form(pairs);
        self
    }

    pub fn json(mut self, payload: &impl Serialize) -> Result<Self, CliError> {
        self.body = Body::Json(serde_json::to_value(payload)?);
        Ok(self)
    }

    #[must_use]
    pub fn bytes(mut self, data: Vec<u8>) -> Self {
        self.body = Body::Bytes(data);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn basic_auth(mut self, user: String, password: String) -> Self {
        self.basic_auth = Some((user, password));
        self
    }
}

/// A response whose status was in the endpoint's success set.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    /// Parse the body as JSON; an empty body is `null`.
    pub fn json(&self) -> Result<Value, CliError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

impl Ctx {
    pub fn new(
        site: &str,
        token: Option<String>,
        build: Option<u32>,
        json: bool,
    ) -> Result<Self, CliError> {
        let base = Url::parse(site)?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .danger_accept_invalid_certs(true)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base,
            token,
            build,
            api_version: None,
            json,
            poll_interval: POLL_INTERVAL,
        })
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: Option<ApiVersion>) -> Self {
        self.api_version = api_version;
        self
    }

    /// Pick the variant of `operation` for this server.
    pub fn route<'a, T>(&self, operation: &'a Operation<T>) -> Result<Selected<'a, T>, CliError> {
        operation.select(self.build, self.api_version)
    }

    pub fn from_profile(profile: &Profile, json: bool) -> Result<Self, CliError> {
        Self::new(
            &profile.url,
            Some(profile.token.clone()),
            profile.build,
            json,
        )
    }

    pub fn user_agent() -> &'static str {
        concat!("fmeflow-cli/", env!("CARGO_PKG_VERSION"))
    }

    /// `fmetoken token=<T>` for v3, `Bearer <T>` for v4.
    pub fn auth_header(&self, version: ApiVersion) -> Option<String> {
        self.token.as_ref().map(|token| match version {
            ApiVersion::V3 => format!("fmetoken token={token}"),
            ApiVersion::V4 => format!("Bearer {token}"),
        })
    }

    /// Fill a path template and append the query string.
    pub fn url(
        &self,
        template: &str,
        params: &[(&'static str, String)],
        query: &[(String, String)],
    ) -> Result<Url, CliError> {
        let mut segments = Vec::new();
        for segment in template.split('/').filter(|s| !s.is_empty()) {
            match segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            {
                Some(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| value.as_str())
                        .ok_or_else(|| {
                            CliError::usage(format!("missing value for `{name}` in {template}"))
                        })?;
                    segments.push(value);
                }
                None => segments.push(segment),
            }
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| CliError::usage(format!("{} cannot be used as a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Issue the call and check the status against the endpoint's success set.
    pub async fn send<T>(&self, selected: Selected<'_, T>, call: Call) -> Result<Reply, CliError> {
        let endpoint = selected.endpoint;
        debug_assert!(
            call.body.encoding() == endpoint.encoding
                || matches!(call.body, Body::Empty),
            "{} expects {:?} body",
            selected.operation,
            endpoint.encoding
        );

        let url = self.url(endpoint.path, &call.params, &call.query)?;
        debug!(
            method = %endpoint.verb.method(),
            url = %url,
            api = %selected.version,
            operation = selected.operation,
            "sending request"
        );

        let mut req = self
            .client
            .request(endpoint.verb.method(), url)
            .header(ACCEPT, endpoint.accept.header());
        if let Some((user, password)) = call.basic_auth {
            req = req.basic_auth(user, Some(password));
        } else if let Some(value) = self.auth_header(selected.version) {
            req = req.header(AUTHORIZATION, value);
        }
        req = match call.body {
            Body::Empty => req,
            Body::Form(pairs) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&pairs)
                    .finish();
                req.header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(encoded)
            }
            Body::Json(value) => req.json(&value),
            Body::Bytes(data) => req
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(data),
        };
        if let Some(timeout) = call.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !endpoint.accepts(status.as_u16()) {
            return Err(status_error(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            ));
        }
        Ok(Reply {
            status: status.as_u16(),
            body,
        })
    }

    /// Issue the call and decode the JSON body. Returns the raw document
    /// alongside its canonical form.
    pub async fn fetch<T>(
        &self,
        selected: Selected<'_, T>,
        call: Call,
    ) -> Result<(Value, T), CliError> {
        let reply = self.send(selected, call).await?;
        let raw = reply.json()?;
        let decoded = (selected.endpoint.decode)(raw.clone())?;
        Ok((raw, decoded))
    }
}

/// Map a rejected response to `CliError::Status`, preferring the body's
/// `message` over the status line.
fn status_error(status: u16, reason: Option<&str>, body: &[u8]) -> CliError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "unexpected response".to_string());
    CliError::Status {
        status,
        message,
        body: parsed.filter(|v| v.is_object() || v.is_array()),
        hint: None,
    }
}
