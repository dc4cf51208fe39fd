//! Output pipeline shared by every read command.
//!
//! A [`Page`] keeps the raw server document next to its canonical listing.
//! Tables render the canonical items, `json` prints the raw document, and
//! `custom-columns` projects paths over the raw items.

pub mod columns;
mod rows;
pub mod table;

use std::io::Write;
use std::str::FromStr;

use clap::Args;
use fmeflow_api_types::Listing;
use serde_json::Value;

pub use columns::ColumnSpec;
pub use table::Table;

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputType {
    Table,
    Json,
    CustomColumns(ColumnSpec),
}

impl FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => match other.strip_prefix("custom-columns=") {
                Some(spec) => ColumnSpec::parse(spec)
                    .map(Self::CustomColumns)
                    .map_err(|err| err.to_string()),
                None if other == "custom-columns" => {
                    Err("custom-columns requires a spec: custom-columns=HEADER:PATH,...".into())
                }
                None => Err(format!(
                    "unknown output type `{other}`; expected table, json or custom-columns=<spec>"
                )),
            },
        }
    }
}

/// `--output` and `--no-headers`, flattened into every read command.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: table, json, or custom-columns=HEADER:PATH,...
    #[arg(short = 'o', long, default_value = "table", value_parser = OutputType::from_str)]
    pub output: OutputType,
    /// Omit the header row of table and custom-columns output.
    #[arg(long)]
    pub no_headers: bool,
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            output: OutputType::Table,
            no_headers: false,
        }
    }
}

impl OutputArgs {
    /// The effective format; global `--json` wins.
    #[must_use]
    pub fn resolve(&self, json: bool) -> OutputType {
        if json {
            OutputType::Json
        } else {
            self.output.clone()
        }
    }
}

/// Default table columns of a canonical entity.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

/// A server response together with its canonical decoding.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub raw: Value,
    pub listing: Listing<T>,
    envelope: bool,
}

impl<T> Page<T> {
    /// A `{items, totalCount, ...}` response.
    pub fn list(raw: Value, listing: Listing<T>) -> Self {
        Self {
            raw,
            listing,
            envelope: true,
        }
    }

    /// A singleton response, rendered as a one-item list.
    pub fn single(raw: Value, listing: Listing<T>) -> Self {
        Self {
            raw,
            listing,
            envelope: false,
        }
    }

    /// The raw items in server order.
    #[must_use]
    pub fn raw_items(&self) -> Vec<&Value> {
        if self.envelope {
            return match self.raw.get("items") {
                Some(Value::Array(items)) => items.iter().collect(),
                _ => Vec::new(),
            };
        }
        match &self.raw {
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }

    /// Drop items, keeping the raw document and the listing in step.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let flags: Vec<bool> = self.listing.items.iter().map(&mut keep).collect();
        if flags.iter().all(|k| *k) {
            return;
        }
        let mut idx = 0;
        self.listing.items.retain(|_| {
            idx += 1;
            flags[idx - 1]
        });
        let kept = self.listing.items.len();
        self.listing.total_count = Some(kept as u64);

        if self.envelope {
            if let Some(Value::Array(items)) = self.raw.get_mut("items") {
                let mut idx = 0;
                items.retain(|_| {
                    idx += 1;
                    flags.get(idx - 1).copied().unwrap_or(true)
                });
            }
            if let Some(total) = self.raw.get_mut("totalCount") {
                *total = Value::from(kept);
            }
        } else if kept == 0 {
            self.raw = Value::Null;
        }
    }

    /// Concatenate another page (used when one view spans several requests).
    pub fn extend(&mut self, other: Page<T>) {
        let mut items: Vec<Value> = self.raw_items().into_iter().cloned().collect();
        items.extend(other.raw_items().into_iter().cloned());
        self.listing.extend(other.listing);
        let total = items.len();
        self.raw = serde_json::json!({
            "items": items,
            "totalCount": total,
            "limit": Value::Null,
            "offset": 0,
        });
        self.envelope = true;
    }
}

/// Render a page in the requested format.
pub fn render<T: Tabular>(
    out: &mut dyn Write,
    page: &Page<T>,
    output: &OutputType,
    no_headers: bool,
) -> Result<(), CliError> {
    match output {
        OutputType::Json => print_json(out, &page.raw),
        OutputType::Table => {
            let mut table = Table::new(T::HEADERS.iter().copied());
            for item in &page.listing.items {
                table.push(item.row());
            }
            table.write(out, no_headers)?;
            Ok(())
        }
        OutputType::CustomColumns(spec) => {
            let mut table = Table::new(spec.headers());
            for item in page.raw_items() {
                table.push(spec.row(item));
            }
            table.write(out, no_headers)?;
            Ok(())
        }
    }
}

/// Pretty-print a JSON document.
pub fn print_json(out: &mut dyn Write, value: &Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{text}")?;
    Ok(())
}
