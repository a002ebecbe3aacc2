//! Core types for the search domain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use serde_with::{formats::PreferMany, serde_as, DefaultOnNull, OneOrMany};

/// Name of the table holding property listings.
pub const RECORDS_TABLE: &str = "records";

/// Structured search intent extracted from a free-text query.
///
/// Every field is optional; an absent or `null` field means "unconstrained".
/// `zone` and `city` accept `null` (read as empty) and a single bare string
/// (read as a one-element list).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Maximum price, inclusive
    pub price: Option<Number>,
    /// Candidate neighborhoods, OR-matched
    #[serde_as(as = "DefaultOnNull<OneOrMany<_, PreferMany>>")]
    #[serde(default)]
    pub zone: Vec<String>,
    /// Candidate cities, OR-matched
    #[serde_as(as = "DefaultOnNull<OneOrMany<_, PreferMany>>")]
    #[serde(default)]
    pub city: Vec<String>,
    /// Minimum occupancy, inclusive
    pub people_capacity: Option<Number>,
    pub garden: Option<bool>,
    pub garage: Option<bool>,
    /// casa, departamento, oficina, terreno, local
    pub property_type: Option<String>,
    /// venta, alquiler, anticretico
    pub operation_type: Option<String>,
}

impl FilterSet {
    /// True when no field constrains the search.
    pub fn is_unconstrained(&self) -> bool {
        self.price.is_none()
            && self.zone.is_empty()
            && self.city.is_empty()
            && self.people_capacity.is_none()
            && self.garden.is_none()
            && self.garage.is_none()
            && self.property_type.is_none()
            && self.operation_type.is_none()
    }
}

/// A value bound to a positional `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&Number> for SqlParam {
    fn from(n: &Number) -> Self {
        match n.as_i64() {
            Some(i) => SqlParam::Integer(i),
            None => SqlParam::Real(n.as_f64().unwrap_or_default()),
        }
    }
}

impl From<bool> for SqlParam {
    fn from(b: bool) -> Self {
        SqlParam::Integer(i64::from(b))
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

/// A result row: column name to value, in column order.
pub type RecordRow = Map<String, Value>;

/// A property listing as written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: i64,
    pub city: String,
    pub zone: String,
    #[serde(default)]
    pub people_capacity: Option<i64>,
    #[serde(default)]
    pub garden: bool,
    #[serde(default)]
    pub garage: bool,
    pub property_type: String,
    pub operation_type: String,
}

/// Rows returned for a query together with the filters that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub count: usize,
    pub results: Vec<RecordRow>,
    /// Echoed back for diagnostics
    pub filters: FilterSet,
}

impl SearchOutcome {
    pub fn new(results: Vec<RecordRow>, filters: FilterSet) -> Self {
        Self {
            count: results.len(),
            results,
            filters,
        }
    }
}
