use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Appended to the title of every duplicated deal.
pub const DUPLICATE_TITLE_SUFFIX: &str = " (Дубль)";

/// Opaque CRM identifier. The CRM hands ids out both as JSON strings and
/// as numbers; both are carried as their string form.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DealId(String);

impl DealId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    /// Reads an id out of a loose JSON value. Empty strings, zero, `null`,
    /// booleans and containers count as "no id".
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl Display for DealId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for DealId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        DealId::from_value(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a non-empty deal id, got {value}"))
        })
    }
}

/// A deal as returned by `GET /deals/{id}`. Only the fields the duplicate
/// needs are modelled; their values are forwarded untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deal {
    pub title: String,
    #[serde(default)]
    pub status_id: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default = "empty_custom_fields")]
    pub custom_fields: Value,
    #[serde(default)]
    pub responsible_user_id: Value,
}

fn empty_custom_fields() -> Value {
    Value::Array(Vec::new())
}

/// Payload for `POST /deals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDeal {
    pub title: String,
    pub status_id: Value,
    pub price: Value,
    pub custom_fields: Value,
    pub responsible_user_id: Value,
}

impl NewDeal {
    pub fn duplicate_of(deal: &Deal) -> Self {
        Self {
            title: format!("{}{DUPLICATE_TITLE_SUFFIX}", deal.title),
            status_id: deal.status_id.clone(),
            price: deal.price.clone(),
            custom_fields: deal.custom_fields.clone(),
            responsible_user_id: deal.responsible_user_id.clone(),
        }
    }
}

impl From<&Deal> for NewDeal {
    fn from(deal: &Deal) -> Self {
        NewDeal::duplicate_of(deal)
    }
}

/// Body of the `201 Created` answer to `POST /deals`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedDeal {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<DealId>,
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<DealId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(DealId::from_value(&value))
}
