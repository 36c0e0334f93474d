//! Typed mirrors of the backend's response shapes.
//!
//! The wire is inconsistent: some endpoints reply with a bare array, some
//! with `{data: [...]}`, one with `{header, data}`, and tabular endpoints
//! send rows as positional arrays. Each shape gets one structural type here
//! and is normalized at the boundary; rows that do not fit are dropped by
//! the caller rather than failing the whole response.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// `{data: [...]}` envelope shared by several endpoints.
#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Vec<T>,
}

/// `{header, data}` table sent by `/get_vm_info`.
#[derive(Deserialize)]
pub struct MachineTable {
    #[serde(default)]
    pub header: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

/// One vending machine, normalized from a positional
/// `[id, name, location, owner, status]` row.
#[derive(Clone, Debug, PartialEq)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub owner: String,
    pub status: String,
}

impl Machine {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Self {
            id: row.first()?.as_i64()?,
            name: cell_text(row.get(1)?),
            location: cell_text(row.get(2)?),
            owner: cell_text(row.get(3)?),
            status: cell_text(row.get(4)?),
        })
    }
}

/// One product, normalized from `[id, name, description, price, quantity]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl Product {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Self {
            id: row.first()?.as_i64()?,
            name: cell_text(row.get(1)?),
            description: cell_text(row.get(2)?),
            price: row.get(3)?.as_f64()?,
            quantity: row.get(4)?.as_i64()?,
        })
    }
}

/// `/get_comments` and `/get_complaints` reply with a bare `[]` when the
/// list is empty and `{data: rows}` otherwise; both shapes are live.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum CommentFeed {
    Bare(Vec<Vec<Value>>),
    Wrapped { data: Vec<Vec<Value>> },
}

impl CommentFeed {
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        match self {
            CommentFeed::Bare(rows) | CommentFeed::Wrapped { data: rows } => rows,
        }
    }
}

/// One comment or complaint row. The pages only consume the text cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentRow {
    pub text: String,
}

impl CommentRow {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Self {
            text: cell_text(row.get(1)?),
        })
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct StockEntry {
    pub vm_id: i64,
    pub vm_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ReportEntry {
    pub product_name: String,
    pub vending_machine_name: String,
    pub product_quantity: i64,
}

/// `{success, error?}` reply of the comment, complaint and purchase posts.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MutationOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserInfo {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub phone_number: String,
    pub address: String,
    pub budget: f64,
    pub user_type: String,
}

/// Role string fetched once per page load; only gates cosmetic visibility.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Owner,
    Admin,
    User,
}

#[derive(Error, Debug)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Entity a comment or complaint is attached to.
#[derive(Clone, Copy, Debug)]
pub enum Target {
    VendingMachine,
    Product,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::VendingMachine => "vending_machine",
            Target::Product => "product",
        }
    }
}

pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn machine_row_normalizes() {
        let row = vec![json!(3), json!("Hall A"), json!("Building 2"), json!(7), json!("active")];
        let machine = Machine::from_row(&row).unwrap();

        assert_eq!(machine.id, 3);
        assert_eq!(machine.name, "Hall A");
        assert_eq!(machine.owner, "7");
        assert_eq!(machine.status, "active");
    }

    #[test]
    fn short_machine_row_is_rejected() {
        let row = vec![json!(3), json!("Hall A")];
        assert!(Machine::from_row(&row).is_none());
    }

    #[test]
    fn comment_feed_absorbs_both_shapes() {
        let bare: CommentFeed = serde_json::from_str("[]").unwrap();
        assert!(bare.into_rows().is_empty());

        let wrapped: CommentFeed =
            serde_json::from_value(json!({"data": [[1, "too sweet"]]})).unwrap();
        let rows = wrapped.into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(CommentRow::from_row(&rows[0]).unwrap().text, "too sweet");
    }

    #[test]
    fn outcome_defaults_to_failure() {
        let outcome: MutationOutcome = serde_json::from_str("{}").unwrap();
        assert!(!outcome.success);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("Owner".parse::<Role>().is_err());
        assert!("guest".parse::<Role>().is_err());
    }
}
