//! Query-by-example for entries.
//!
//! Every populated field of an [`EntryFilter`] must match: the description as
//! a case-insensitive substring, everything else exactly. Unset fields match
//! any value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr},
};

use crate::{Entry, EntryKind, EntryStatus, entry};

const LIKE_ESCAPE: char = '!';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub id: Option<i64>,
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub user_id: Option<i64>,
    pub value: Option<Decimal>,
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
    pub registered_on: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Translate the filter into a SQL condition over the `entries` table.
    pub(crate) fn condition(&self) -> Condition {
        Condition::all()
            .add_option(self.id.map(|id| entry::Column::Id.eq(id)))
            .add_option(self.description.as_deref().map(|description| {
                Expr::expr(Func::lower(Expr::col(entry::Column::Description)))
                    .like(contains_pattern(description))
            }))
            .add_option(self.month.map(|month| entry::Column::Month.eq(month)))
            .add_option(self.year.map(|year| entry::Column::Year.eq(year)))
            .add_option(self.user_id.map(|user_id| entry::Column::UserId.eq(user_id)))
            .add_option(
                self.value
                    .map(|value| entry::Column::Value.eq(entry::storage_value(value))),
            )
            .add_option(self.kind.map(|kind| entry::Column::Kind.eq(kind.as_str())))
            .add_option(
                self.status
                    .map(|status| entry::Column::Status.eq(status.as_str())),
            )
            .add_option(
                self.registered_on
                    .map(|date| entry::Column::RegisteredOn.eq(date)),
            )
    }
}

impl From<&Entry> for EntryFilter {
    fn from(example: &Entry) -> Self {
        Self {
            id: example.id,
            description: example.description.clone(),
            month: example.month,
            year: example.year,
            user_id: example.user_id,
            value: example.value,
            kind: example.kind,
            status: example.status,
            registered_on: example.registered_on,
        }
    }
}

/// `%needle%`, lowercased, with LIKE metacharacters escaped.
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    use super::*;

    /// The rendered `WHERE` clause, empty when there is none.
    fn where_clause(filter: &EntryFilter) -> String {
        let sql = entry::Entity::find()
            .filter(filter.condition())
            .build(DbBackend::Sqlite)
            .to_string();
        sql.split_once("WHERE")
            .map(|(_, clause)| clause.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(where_clause(&EntryFilter::default()), "");
    }

    #[test]
    fn description_is_lowercased_substring() {
        let clause = where_clause(&EntryFilter::default().description("SALARY"));
        assert!(clause.contains("LOWER"), "{clause}");
        assert!(clause.contains("LIKE '%salary%'"), "{clause}");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        let clause = where_clause(&EntryFilter::default().description("100%"));
        assert!(clause.contains("ESCAPE"), "{clause}");
        assert!(!clause.contains("'%100%%'"), "{clause}");
    }

    #[test]
    fn other_fields_match_exactly() {
        let filter = EntryFilter::default()
            .user(4)
            .year(2020)
            .kind(EntryKind::Expense)
            .status(EntryStatus::Confirmed);
        let clause = where_clause(&filter);

        assert!(clause.contains(r#""user_id" = 4"#), "{clause}");
        assert!(clause.contains(r#""year" = 2020"#), "{clause}");
        assert!(clause.contains(r#""kind" = 'expense'"#), "{clause}");
        assert!(clause.contains(r#""status" = 'confirmed'"#), "{clause}");
        assert!(!clause.contains("month"), "{clause}");
        assert!(!clause.contains("LIKE"), "{clause}");
    }

    #[test]
    fn example_entry_becomes_filter() {
        let example = Entry {
            description: Some("rent".to_string()),
            month: Some(2),
            value: Some(Decimal::new(1000, 2)),
            ..Default::default()
        };
        let filter = EntryFilter::from(&example);

        assert_eq!(filter.description.as_deref(), Some("rent"));
        assert_eq!(filter.month, Some(2));
        assert_eq!(filter.year, None);
        assert!(where_clause(&filter).contains(r#""value" = '10'"#));
    }
}
