//! API-surface selection.
//!
//! Every server operation is an [`Operation`] static in [`catalog`] carrying
//! an optional v3 and v4 [`Endpoint`]. [`Operation::select`] picks a variant
//! from the cached build and the user's `--api-version` override; the
//! endpoint's decoder maps the wire payload into the canonical shape.

pub mod catalog;

use std::fmt;

use clap::ValueEnum;
use fmeflow_api_types::Listing;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiVersion {
    V3,
    V4,
}

impl ApiVersion {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V3 => "v3",
            Self::V4 => "v4",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Body kind an endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    None,
    Form,
    Json,
    Binary,
}

/// What the endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Json,
    OctetStream,
    Text,
}

impl Accept {
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text => "text/plain",
        }
    }
}

pub type Decoder<T> = fn(Value) -> Result<T, serde_json::Error>;

/// One wire variant of an operation.
pub struct Endpoint<T> {
    pub verb: Verb,
    /// Path template; `{name}` segments are filled from call parameters.
    pub path: &'static str,
    pub encoding: Encoding,
    pub accept: Accept,
    pub success: &'static [u16],
    pub decode: Decoder<T>,
}

impl<T> Endpoint<T> {
    #[must_use]
    pub fn accepts(&self, status: u16) -> bool {
        self.success.contains(&status)
    }
}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("encoding", &self.encoding)
            .field("success", &self.success)
            .finish_non_exhaustive()
    }
}

/// A logical server operation with its per-surface variants.
#[derive(Debug)]
pub struct Operation<T> {
    pub name: &'static str,
    /// First build that serves the v4 variant.
    pub since_build: Option<u32>,
    pub v3: Option<Endpoint<T>>,
    pub v4: Option<Endpoint<T>>,
}

/// The variant chosen for one call.
#[derive(Debug)]
pub struct Selected<'a, T> {
    pub operation: &'static str,
    pub version: ApiVersion,
    pub endpoint: &'a Endpoint<T>,
}

impl<T> Clone for Selected<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Selected<'_, T> {}

impl<T> Operation<T> {
    /// Choose the surface: explicit override, else the build threshold
    /// (an unknown build counts as new), else v4 when available.
    pub fn select(
        &self,
        build: Option<u32>,
        requested: Option<ApiVersion>,
    ) -> Result<Selected<'_, T>, CliError> {
        let version = requested.unwrap_or_else(|| self.preferred(build));
        self.variant(version)
    }

    fn preferred(&self, build: Option<u32>) -> ApiVersion {
        match (self.since_build, build) {
            (Some(threshold), Some(build)) if build < threshold => ApiVersion::V3,
            _ if self.v4.is_some() => ApiVersion::V4,
            _ => ApiVersion::V3,
        }
    }

    /// The variant for a fixed surface.
    pub fn variant(&self, version: ApiVersion) -> Result<Selected<'_, T>, CliError> {
        let endpoint = match version {
            ApiVersion::V3 => self.v3.as_ref(),
            ApiVersion::V4 => self.v4.as_ref(),
        };
        endpoint
            .map(|endpoint| Selected {
                operation: self.name,
                version,
                endpoint,
            })
            .ok_or(CliError::Unsupported {
                operation: self.name,
                version: version.as_str(),
            })
    }
}

// ---- decoders ----

/// Decode a list envelope of `W` and canonicalise every item.
pub fn list<W: DeserializeOwned, T: From<W>>(value: Value) -> Result<Listing<T>, serde_json::Error> {
    let wire: Listing<W> = serde_json::from_value(value)?;
    Ok(wire.map(T::from))
}

/// Decode a singleton of `W` as a one-item listing.
pub fn single<W: DeserializeOwned, T: From<W>>(
    value: Value,
) -> Result<Listing<T>, serde_json::Error> {
    let wire: W = serde_json::from_value(value)?;
    Ok(Listing::single(T::from(wire)))
}

/// Decode a singleton of `W`.
pub fn object<W: DeserializeOwned, T: From<W>>(value: Value) -> Result<T, serde_json::Error> {
    let wire: W = serde_json::from_value(value)?;
    Ok(T::from(wire))
}

/// Responses whose body carries nothing the caller needs.
#[allow(clippy::unnecessary_wraps, clippy::needless_pass_by_value)]
pub fn ignore(_: Value) -> Result<(), serde_json::Error> {
    Ok(())
}
