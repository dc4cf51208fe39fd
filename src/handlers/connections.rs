use std::collections::BTreeMap;
use std::io::Write;

use fmeflow_api_types::model::Connection;
use fmeflow_api_types::v4;
use tracing::debug;

use crate::api::catalog;
use crate::args::{ConnectionsArgs, ConnectionsCmd};
use crate::client::{Call, Ctx};
use crate::error::{CliError, HINT_CONNECTION_CATEGORY};
use crate::io::{confirm, split_pair};

use super::{announce, emit, list_page, single_page};

pub async fn handle(ctx: &Ctx, out: &mut dyn Write, args: ConnectionsArgs) -> Result<(), CliError> {
    match args.action {
        Some(ConnectionsCmd::Create {
            name,
            category,
            connection_type,
            authentication_method,
            username,
            password,
            parameter,
        }) => {
            let body = v4::ConnectionCreate {
                name,
                category,
                connection_type,
                authentication_method,
                username,
                password,
                parameters: parameters(&parameter)?,
            };
            let selected = ctx.route(&catalog::CONNECTION_CREATE)?;
            ctx.send(selected, Call::new().json(&body)?).await?;
            announce(ctx, out, "Connection successfully created.")
        }
        Some(ConnectionsCmd::Update {
            name,
            category,
            authentication_method,
            username,
            password,
            parameter,
        }) => {
            let changes = Changes {
                category,
                authentication_method,
                username,
                password,
                parameters: parameters(&parameter)?,
            };
            update(ctx, out, &name, changes).await
        }
        Some(ConnectionsCmd::Delete { name, no_prompt }) => {
            if !confirm(&format!("Delete connection {name}?"), no_prompt)? {
                return Ok(());
            }
            let selected = ctx.route(&catalog::CONNECTION_DELETE)?;
            ctx.send(selected, Call::new().param("name", &name)).await?;
            announce(ctx, out, "Connection successfully deleted.")
        }
        None => {
            let page = match &args.name {
                Some(name) => {
                    single_page(ctx, &catalog::CONNECTION, Call::new().param("name", name)).await?
                }
                None => {
                    let call = Call::new()
                        .query_all("types", &args.connection_type)
                        .query_all("excludedTypes", &args.exclude_type)
                        .query_all("categories", &args.category);
                    list_page(ctx, &catalog::CONNECTIONS, call).await?
                }
            };
            emit(ctx, out, &page, &args.output)
        }
    }
}

/// Fields given on an `update`; everything absent keeps its current value.
#[derive(Debug, Default)]
struct Changes {
    category: Option<String>,
    authentication_method: Option<String>,
    username: Option<String>,
    password: Option<String>,
    parameters: BTreeMap<String, String>,
}

async fn update(ctx: &Ctx, out: &mut dyn Write, name: &str, changes: Changes) -> Result<(), CliError> {
    let lookup = ctx.route(&catalog::CONNECTION)?;
    let (_, current) = ctx.fetch(lookup, Call::new().param("name", name)).await?;
    let current = current
        .items
        .into_iter()
        .next()
        .ok_or_else(|| CliError::usage(format!("connection `{name}` not found")))?;
    debug!(name, category = %current.category, "merging connection update");

    let body = merge(current, changes);
    let selected = ctx.route(&catalog::CONNECTION_UPDATE)?;
    ctx.send(selected, Call::new().param("name", name).json(&body)?)
        .await
        .map_err(|err| err.hint_on(400, HINT_CONNECTION_CATEGORY))?;
    announce(ctx, out, "Connection successfully updated.")
}

/// The server replaces the whole connection on update, so the body starts
/// from the current state.
fn merge(current: Connection, changes: Changes) -> v4::ConnectionUpdate {
    let mut parameters = current.parameters;
    parameters.extend(changes.parameters);
    v4::ConnectionUpdate {
        category: changes.category.unwrap_or(current.category),
        authentication_method: changes
            .authentication_method
            .or(current.authentication_method),
        username: changes.username.or(current.username),
        password: changes.password,
        parameters,
    }
}

fn parameters(raw: &[String]) -> Result<BTreeMap<String, String>, CliError> {
    raw.iter().map(|pair| split_pair(pair, "parameter")).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn current() -> Connection {
        Connection {
            name: "pg".into(),
            category: "database".into(),
            connection_type: "PostgreSQL".into(),
            owner: Some("admin".into()),
            authentication_method: None,
            username: Some("reader".into()),
            parameters: BTreeMap::from([
                ("HOST".to_string(), "a".to_string()),
                ("PORT".to_string(), "5432".to_string()),
            ]),
        }
    }

    #[test]
    fn update_keeps_unchanged_fields() {
        let changes = Changes {
            parameters: BTreeMap::from([("PORT".to_string(), "6543".to_string())]),
            ..Changes::default()
        };
        let body = serde_json::to_value(merge(current(), changes)).expect("json");
        assert_eq!(
            body,
            json!({
                "category": "database",
                "username": "reader",
                "parameters": {"HOST": "a", "PORT": "6543"}
            })
        );
    }

    #[test]
    fn update_overrides_category_and_password() {
        let changes = Changes {
            category: Some("basic".into()),
            password: Some("secret".into()),
            ..Changes::default()
        };
        let body = merge(current(), changes);
        assert_eq!(body.category, "basic");
        assert_eq!(body.password.as_deref(), Some("secret"));
    }

    #[test]
    fn parameters_need_an_equals_sign() {
        assert!(parameters(&["HOST".to_string()]).is_err());
        let parsed = parameters(&["HOST=a=b".to_string()]).expect("pair");
        assert_eq!(parsed.get("HOST").map(String::as_str), Some("a=b"));
    }
}
