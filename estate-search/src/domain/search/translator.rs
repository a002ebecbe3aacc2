//! Translation of a [`FilterSet`] into positional SQL conditions.
//!
//! Every user-supplied value travels as a bound parameter; the condition text
//! only ever contains fixed column names and `?` placeholders.

use super::types::{FilterSet, SqlParam};

/// Condition fragments joined by AND, plus their parameters in placeholder
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatedQuery {
    pub conditions: Vec<String>,
    pub params: Vec<SqlParam>,
}

impl TranslatedQuery {
    fn push(&mut self, condition: impl Into<String>, param: SqlParam) {
        self.conditions.push(condition.into());
        self.params.push(param);
    }

    /// `LOWER(column) IN (?, ...)` with every value lower-cased. Skipped when
    /// `values` is empty.
    fn push_in_group(&mut self, column: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }

        let placeholders = vec!["?"; values.len()].join(", ");
        self.conditions
            .push(format!("LOWER({}) IN ({})", column, placeholders));
        self.params
            .extend(values.iter().map(|v| SqlParam::Text(v.to_lowercase())));
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Conditions joined with AND, or `None` when nothing is constrained.
    pub fn where_clause(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(self.conditions.join(" AND "))
        }
    }

    /// Full `SELECT` over `table`; selects every record when unconstrained.
    pub fn to_sql(&self, table: &str) -> String {
        match self.where_clause() {
            Some(clause) => format!("SELECT * FROM {} WHERE {}", table, clause),
            None => format!("SELECT * FROM {}", table),
        }
    }
}

/// Map filters to conditions in a fixed field order.
///
/// # Examples
///
/// ```
/// use estate_search::domain::search::{translate, FilterSet};
///
/// let filters: FilterSet = serde_json::from_str(r#"{"garden": false}"#).unwrap();
/// let query = translate(&filters);
/// assert_eq!(query.conditions, vec!["garden = ?".to_string()]);
/// ```
pub fn translate(filters: &FilterSet) -> TranslatedQuery {
    let mut query = TranslatedQuery::default();

    if let Some(price) = &filters.price {
        query.push("price <= ?", SqlParam::from(price));
    }

    query.push_in_group("city", &filters.city);
    query.push_in_group("zone", &filters.zone);

    if let Some(capacity) = &filters.people_capacity {
        query.push("people_capacity >= ?", SqlParam::from(capacity));
    }

    if let Some(garden) = filters.garden {
        query.push("garden = ?", SqlParam::from(garden));
    }

    if let Some(garage) = filters.garage {
        query.push("garage = ?", SqlParam::from(garage));
    }

    if let Some(property_type) = &filters.property_type {
        query.push(
            "LOWER(property_type) = ?",
            SqlParam::from(property_type.to_lowercase()),
        );
    }

    if let Some(operation_type) = &filters.operation_type {
        query.push(
            "LOWER(operation_type) = ?",
            SqlParam::from(operation_type.to_lowercase()),
        );
    }

    query
}
