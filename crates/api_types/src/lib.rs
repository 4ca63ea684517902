use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// Request body for authenticating a user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub senha: String,
    }

    /// Request body for registering a user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub nome: String,
        pub email: String,
        pub senha: String,
    }

    /// A user as returned by the API. The password hash never leaves the
    /// server.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub nome: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Balance {
        pub usuario: i64,
        /// Serialized as a string in JSON.
        pub saldo: Decimal,
    }
}

pub mod entry {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum EntryKind {
        Income,
        Expense,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum EntryStatus {
        Pending,
        Confirmed,
        Cancelled,
    }

    /// Request body for creating or updating an entry.
    ///
    /// Every field is optional so that incomplete entries reach validation
    /// and get a business message instead of a deserialization error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryPayload {
        pub descricao: Option<String>,
        pub mes: Option<i32>,
        pub ano: Option<i32>,
        /// Owning user id.
        pub usuario: Option<i64>,
        pub valor: Option<Decimal>,
        pub tipo: Option<EntryKind>,
        /// Ignored on creation: new entries are always pending.
        pub status: Option<EntryStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status: EntryStatus,
    }

    /// Query string of the entry search. Absent fields match anything.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryQuery {
        pub usuario: Option<i64>,
        pub descricao: Option<String>,
        pub mes: Option<i32>,
        pub ano: Option<i32>,
        pub tipo: Option<EntryKind>,
        pub status: Option<EntryStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i64,
        pub descricao: String,
        pub mes: i32,
        pub ano: i32,
        pub usuario: i64,
        pub valor: Decimal,
        pub tipo: EntryKind,
        pub status: EntryStatus,
        pub data_cadastro: NaiveDate,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::entry::*;

    #[test]
    fn enums_use_uppercase_codes() {
        assert_eq!(
            serde_json::to_string(&EntryKind::Expense).unwrap(),
            r#""EXPENSE""#
        );
        assert_eq!(
            serde_json::from_str::<EntryStatus>(r#""CANCELLED""#).unwrap(),
            EntryStatus::Cancelled
        );
    }

    #[test]
    fn payload_accepts_partial_bodies() {
        let payload: EntryPayload =
            serde_json::from_str(r#"{"descricao":"Aluguel","valor":"1500.50","tipo":"EXPENSE"}"#)
                .unwrap();

        assert_eq!(payload.descricao.as_deref(), Some("Aluguel"));
        assert_eq!(payload.valor, Some(Decimal::new(150_050, 2)));
        assert_eq!(payload.tipo, Some(EntryKind::Expense));
        assert_eq!(payload.mes, None);
        assert_eq!(payload.usuario, None);
    }
}
