//! The module contains the `Entry` type, a financial entry ("lançamento").
//!
//! Both expenses and income are represented by `Entry`, distinguished by
//! [`EntryKind`]. Every field is optional: an `Entry` may come straight from
//! user input and is only guaranteed complete after validation.
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, validation};

/// Whether an entry adds or removes money.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidData(format!("invalid entry kind: {other}"))),
        }
    }
}

/// Lifecycle state of an entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for EntryStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidData(format!(
                "invalid entry status: {other}"
            ))),
        }
    }
}

/// A financial entry for a given month of a given year.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// `None` until the entry is persisted.
    pub id: Option<i64>,
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    /// Identifier of the owning user.
    pub user_id: Option<i64>,
    pub value: Option<Decimal>,
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
    pub registered_on: Option<NaiveDate>,
}

impl Entry {
    /// Signed contribution of this entry to a balance.
    ///
    /// Incomes count positive, expenses negative; incomplete entries count 0.
    pub fn signed_value(&self) -> Decimal {
        match (self.kind, self.value) {
            (Some(EntryKind::Income), Some(value)) => value,
            (Some(EntryKind::Expense), Some(value)) => -value,
            _ => Decimal::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub month: i32,
    pub year: i32,
    pub user_id: i64,
    pub value: String,
    pub kind: String,
    pub status: String,
    pub registered_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Canonical storage form of a decimal: no trailing zeros, so that equal
/// values compare equal as strings.
pub(crate) fn storage_value(value: Decimal) -> String {
    value.normalize().to_string()
}

impl TryFrom<&Entry> for ActiveModel {
    type Error = EngineError;

    /// Build the row for a complete entry.
    ///
    /// A missing status is stored as `Pending`, a missing registration date
    /// as today (UTC). A missing `id` leaves the key to the database.
    fn try_from(entry: &Entry) -> Result<Self, Self::Error> {
        let fields = validation::required_fields(entry)?;

        Ok(Self {
            id: match entry.id {
                Some(id) => ActiveValue::Set(id),
                None => ActiveValue::NotSet,
            },
            description: ActiveValue::Set(fields.description.to_string()),
            month: ActiveValue::Set(fields.month),
            year: ActiveValue::Set(fields.year),
            user_id: ActiveValue::Set(fields.user_id),
            value: ActiveValue::Set(storage_value(fields.value)),
            kind: ActiveValue::Set(fields.kind.as_str().to_string()),
            status: ActiveValue::Set(entry.status.unwrap_or_default().as_str().to_string()),
            registered_on: ActiveValue::Set(
                entry
                    .registered_on
                    .unwrap_or_else(|| Utc::now().date_naive()),
            ),
        })
    }
}

impl TryFrom<Model> for Entry {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let value = Decimal::from_str(&model.value).map_err(|_| {
            EngineError::InvalidData(format!("invalid value for entry {}", model.id))
        })?;

        Ok(Self {
            id: Some(model.id),
            description: Some(model.description),
            month: Some(model.month),
            year: Some(model.year),
            user_id: Some(model.user_id),
            value: Some(value),
            kind: Some(EntryKind::try_from(model.kind.as_str())?),
            status: Some(EntryStatus::try_from(model.status.as_str())?),
            registered_on: Some(model.registered_on),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Entry {
        Entry {
            description: Some("Salary".to_string()),
            month: Some(1),
            year: Some(2020),
            user_id: Some(1),
            value: Some(Decimal::new(1050, 2)),
            kind: Some(EntryKind::Income),
            ..Default::default()
        }
    }

    #[test]
    fn active_model_defaults_status_and_date() {
        let model = ActiveModel::try_from(&entry()).unwrap();

        assert_eq!(model.id, ActiveValue::NotSet);
        assert_eq!(model.status, ActiveValue::Set("pending".to_string()));
        assert_eq!(model.value, ActiveValue::Set("10.5".to_string()));
        assert!(matches!(model.registered_on, ActiveValue::Set(_)));
    }

    #[test]
    fn active_model_rejects_incomplete_entry() {
        let mut incomplete = entry();
        incomplete.kind = None;

        let err = ActiveModel::try_from(&incomplete).unwrap_err();
        assert_eq!(err, EngineError::BusinessRule("invalid type".to_string()));
    }

    #[test]
    fn model_round_trips_stored_codes() {
        let model = Model {
            id: 7,
            description: "Rent".to_string(),
            month: 3,
            year: 2021,
            user_id: 2,
            value: "850".to_string(),
            kind: "expense".to_string(),
            status: "confirmed".to_string(),
            registered_on: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
        };

        let entry = Entry::try_from(model).unwrap();
        assert_eq!(entry.id, Some(7));
        assert_eq!(entry.kind, Some(EntryKind::Expense));
        assert_eq!(entry.status, Some(EntryStatus::Confirmed));
        assert_eq!(entry.signed_value(), Decimal::new(-850, 0));
    }

    #[test]
    fn unknown_stored_status_is_invalid_data() {
        assert!(matches!(
            EntryStatus::try_from("archived"),
            Err(EngineError::InvalidData(_))
        ));
    }
}
