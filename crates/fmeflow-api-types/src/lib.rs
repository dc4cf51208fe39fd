//! Request and response types for the FME Flow REST APIs.
//!
//! The server exposes two coexisting surfaces. [`v3`] mirrors the legacy
//! `/fmerest/v3` schemas and [`v4`] mirrors `/fmeapiv4`. Both convert into the
//! surface-independent shapes in [`model`] through `From` impls, so callers
//! decode once per surface and render one shape.

#![deny(clippy::all, clippy::pedantic)]

pub mod model;
pub mod timestamp;
pub mod v3;
pub mod v4;

use serde::{Deserialize, Serialize};

/// The `{items, totalCount, limit, offset}` envelope shared by both surfaces.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl<T> Listing<T> {
    /// Wrap a singleton so it renders like a one-row listing.
    #[must_use]
    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            total_count: Some(1),
            limit: None,
            offset: None,
        }
    }

    /// Convert every item, keeping the paging fields.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Append another page, summing the totals.
    pub fn extend(&mut self, other: Listing<T>) {
        self.total_count = match (self.total_count, other.total_count) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        self.items.extend(other.items);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: Some(0),
            limit: None,
            offset: None,
        }
    }
}

/// `{id}` returned by fire-and-forget operations on both surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskHandle {
    pub id: i64,
}

/// A published parameter for a job submission.
///
/// Scalar parameters travel as `{name, value: "…"}` and list parameters as
/// `{name, value: ["…", …]}`; the untagged representation writes exactly
/// those two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PublishedParameter {
    Scalar {
        name: String,
        value: String,
    },
    List {
        name: String,
        #[serde(rename = "value")]
        values: Vec<String>,
    },
}

impl PublishedParameter {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar { name, .. } | Self::List { name, .. } => name,
        }
    }
}

/// Generic `{name, value}` pair used for directives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

/// Registration details for a license request or request file.
///
/// v4 takes this as JSON; v3 takes the same keys form-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_source: Option<String>,
    pub subscribe_to_updates: bool,
}

impl LicenseRequest {
    /// The same fields as `application/x-www-form-urlencoded` pairs.
    #[must_use]
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("firstName".to_string(), self.first_name.clone()),
            ("lastName".to_string(), self.last_name.clone()),
            ("email".to_string(), self.email.clone()),
        ];
        let optional = [
            ("serialNumber", &self.serial_number),
            ("company", &self.company),
            ("industry", &self.industry),
            ("category", &self.category),
            ("salesSource", &self.sales_source),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        pairs.push((
            "subscribeToUpdates".to_string(),
            self.subscribe_to_updates.to_string(),
        ));
        pairs
    }
}

/// Extract the numeric build from strings like
/// `FME Server 2023.0 - Build 23166 - linux-x64`.
#[must_use]
pub fn parse_build_number(build: &str) -> Option<u32> {
    let (_, rest) = build.split_once("Build ")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_from_v3_build_string() {
        assert_eq!(
            parse_build_number("FME Server 2023.0 - Build 23166 - linux-x64"),
            Some(23166)
        );
        assert_eq!(parse_build_number("FME Flow 2025.0 - Build 25300"), Some(25300));
        assert_eq!(parse_build_number("no build here"), None);
        assert_eq!(parse_build_number("Build x"), None);
    }

    #[test]
    fn published_parameters_keep_their_wire_shapes() {
        let params = vec![
            PublishedParameter::Scalar {
                name: "COLOR".into(),
                value: "red".into(),
            },
            PublishedParameter::List {
                name: "THEMES".into(),
                values: vec!["a,b".into(), "c".into()],
            },
        ];
        let json = serde_json::to_value(&params).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "COLOR", "value": "red"},
                {"name": "THEMES", "value": ["a,b", "c"]}
            ])
        );
    }

    #[test]
    fn listing_extend_sums_totals() {
        let mut first = Listing {
            items: vec![1, 2],
            total_count: Some(2),
            limit: Some(100),
            offset: Some(0),
        };
        first.extend(Listing {
            items: vec![3],
            total_count: Some(1),
            limit: None,
            offset: None,
        });
        assert_eq!(first.items, vec![1, 2, 3]);
        assert_eq!(first.total_count, Some(3));
    }

    #[test]
    fn license_request_form_skips_absent_fields() {
        let request = LicenseRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            company: Some("Engines".into()),
            ..LicenseRequest::default()
        };
        let pairs = request.form_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["firstName", "lastName", "email", "company", "subscribeToUpdates"]
        );
    }

    #[test]
    fn listing_tolerates_missing_paging_fields() {
        let listing: Listing<serde_json::Value> =
            serde_json::from_str(r#"{"items":[{"a":1}]}"#).expect("decode");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.total_count, None);
    }
}
