//! `custom-columns=HEADER:PATH,...` projections.
//!
//! PATH is a small JSONPath subset: optional leading `$`, optional `{}`
//! wrapper, `.field`, `[n]`, `[*]` and `['quoted field']`. A leading field may
//! omit its dot.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("custom-columns spec is empty")]
    Empty,
    #[error("column `{0}` is not of the form HEADER:PATH")]
    MissingColon(String),
    #[error("column `{0}` has an empty header")]
    EmptyHeader(String),
    #[error("invalid path `{path}`: {reason}")]
    Path { path: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub path: JsonPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Field(String),
    Index(usize),
    Wildcard,
}

impl ColumnSpec {
    pub fn parse(spec: &str) -> Result<Self, SpecError> {
        if spec.trim().is_empty() {
            return Err(SpecError::Empty);
        }
        let columns = spec
            .split(',')
            .map(|part| {
                let (header, path) = part
                    .split_once(':')
                    .ok_or_else(|| SpecError::MissingColon(part.to_string()))?;
                let header = header.trim();
                if header.is_empty() {
                    return Err(SpecError::EmptyHeader(part.to_string()));
                }
                Ok(Column {
                    header: header.to_string(),
                    path: JsonPath::parse(path)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns })
    }

    #[must_use]
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// One cell per column for `item`.
    #[must_use]
    pub fn row(&self, item: &Value) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| cell(&column.path.eval(item)))
            .collect()
    }
}

impl JsonPath {
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let fail = |reason: &str| SpecError::Path {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut s = raw.trim();
        if let Some(inner) = s.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
            s = inner.trim();
        }
        if s.is_empty() {
            return Err(fail("path is empty"));
        }
        if let Some(rest) = s.strip_prefix('$') {
            s = rest;
        }

        let chars: Vec<char> = s.chars().collect();
        let mut steps = Vec::new();
        let mut i = 0;
        let mut first = true;
        while i < chars.len() {
            match chars[i] {
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|c| *c == ']')
                        .ok_or_else(|| fail("unclosed `[`"))?;
                    let inner: String = chars[i + 1..i + close].iter().collect();
                    steps.push(parse_bracket(inner.trim()).ok_or_else(|| {
                        fail("expected `[*]`, `[n]` or a quoted field inside brackets")
                    })?);
                    i += close + 1;
                }
                c if c == '.' || first => {
                    if c == '.' {
                        i += 1;
                    }
                    let start = i;
                    while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                        i += 1;
                    }
                    let name: String = chars[start..i].iter().collect();
                    let name = name.trim();
                    if name.is_empty() {
                        // `$.` alone and `$..x` are both rejected.
                        return Err(fail("empty field name"));
                    }
                    steps.push(Step::Field(name.to_string()));
                }
                other => return Err(fail(&format!("unexpected `{other}`"))),
            }
            first = false;
        }
        Ok(Self { steps })
    }

    /// Every value reached by the path, in document order.
    #[must_use]
    pub fn eval<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut current = vec![root];
        for step in &self.steps {
            current = current
                .into_iter()
                .flat_map(|value| -> Vec<&'a Value> {
                    match (step, value) {
                        (Step::Field(name), Value::Object(map)) => map.get(name).into_iter().collect(),
                        (Step::Index(n), Value::Array(items)) => items.get(*n).into_iter().collect(),
                        (Step::Wildcard, Value::Array(items)) => items.iter().collect(),
                        (Step::Wildcard, Value::Object(map)) => map.values().collect(),
                        _ => Vec::new(),
                    }
                })
                .collect();
        }
        current
    }
}

fn parse_bracket(inner: &str) -> Option<Step> {
    if inner == "*" {
        return Some(Step::Wildcard);
    }
    if let Ok(n) = inner.parse::<usize>() {
        return Some(Step::Index(n));
    }
    let quoted = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')))?;
    Some(Step::Field(quoted.to_string()))
}

/// Scalars print bare, containers as compact JSON, multiple hits space-joined.
fn cell(values: &[&Value]) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(_) | Value::Number(_) => value.to_string(),
            Value::Array(_) | Value::Object(_) => {
                serde_json::to_string(value).unwrap_or_default()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn eval(path: &str, value: &Value) -> String {
        cell(&JsonPath::parse(path).expect(path).eval(value))
    }

    #[test]
    fn parses_headers_and_paths() {
        let spec = ColumnSpec::parse("Job ID:$.id,Workspace:.workspace,Status:status")
            .expect("valid spec");
        assert_eq!(spec.headers(), vec!["Job ID", "Workspace", "Status"]);
    }

    #[test]
    fn rejects_empty_and_colonless_specs() {
        assert_eq!(ColumnSpec::parse(""), Err(SpecError::Empty));
        assert_eq!(
            ColumnSpec::parse("FOO.bar"),
            Err(SpecError::MissingColon("FOO.bar".into()))
        );
        assert!(matches!(
            ColumnSpec::parse("A:.a,B"),
            Err(SpecError::MissingColon(_))
        ));
        assert!(matches!(ColumnSpec::parse("A:"), Err(SpecError::Path { .. })));
        assert!(matches!(
            ColumnSpec::parse("A:.items[x]"),
            Err(SpecError::Path { .. })
        ));
        assert!(matches!(
            ColumnSpec::parse("A:.items[0"),
            Err(SpecError::Path { .. })
        ));
    }

    #[test]
    fn evaluates_fields_indexes_and_wildcards() {
        let item = json!({
            "name": "c",
            "port": 5432,
            "enabled": true,
            "request": {"publishedParameters": [
                {"name": "A", "value": "1"},
                {"name": "B", "value": ["x", "y"]}
            ]}
        });
        assert_eq!(eval(".name", &item), "c");
        assert_eq!(eval("$.port", &item), "5432");
        assert_eq!(eval("{.enabled}", &item), "true");
        assert_eq!(eval(".request.publishedParameters[*].name", &item), "A B");
        assert_eq!(eval(".request.publishedParameters[1].value", &item), r#"["x","y"]"#);
        assert_eq!(eval(".request['publishedParameters'][0].name", &item), "A");
    }

    #[test]
    fn missing_paths_render_empty() {
        let item = json!({"name": "c", "owner": null});
        assert_eq!(eval(".absent", &item), "");
        assert_eq!(eval(".name.deeper", &item), "");
        assert_eq!(eval(".owner", &item), "");
        assert_eq!(eval(".list[3]", &item), "");
    }

    #[test]
    fn dollar_alone_is_the_whole_item() {
        assert_eq!(eval("$", &json!(7)), "7");
    }
}
