//! Filter Predicate Set
//!
//! A [`FilterSet`] declares what counts as a match without performing the
//! match itself; the query engine interprets it. A default set constrains
//! nothing, and every criterion has an "inactive" form (empty search text,
//! the `all`/`any` sentinel, an empty set, an unbounded range) that behaves
//! exactly like an absent key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Category values that mean "do not constrain"
const SENTINELS: &[&str] = &["", "all", "any"];

/// Keys of the HTTP filter object that carry free-text search
const SEARCH_KEYS: &[&str] = &["q", "search"];

/// One filter criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Case-insensitive substring over the record's searchable fields
    Search(String),

    /// Exact match on a categorical attribute
    Category(String),

    /// Non-empty intersection with a multi-valued attribute
    AnyOf(Vec<String>),

    /// Inclusive numeric range; an unset bound is open
    Range { min: Option<f64>, max: Option<f64> },

    /// Boolean equality
    Flag(bool),
}

impl FilterValue {
    /// Range with only a lower bound
    pub fn at_least(min: f64) -> Self {
        FilterValue::Range {
            min: Some(min),
            max: None,
        }
    }

    /// Range with only an upper bound
    pub fn at_most(max: f64) -> Self {
        FilterValue::Range {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        FilterValue::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Multi-valued criterion from any iterable of strings
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Whether this criterion matches everything.
    ///
    /// Malformed ranges (non-finite bounds, `min > max`) count as
    /// unconstrained: a bad filter value is ignored rather than rejected.
    pub fn is_unconstrained(&self) -> bool {
        match self {
            FilterValue::Search(text) => text.trim().is_empty(),
            FilterValue::Category(value) => {
                let value = value.trim().to_lowercase();
                SENTINELS.contains(&value.as_str())
            }
            FilterValue::AnyOf(values) => values.iter().all(|v| v.trim().is_empty()),
            FilterValue::Range { min, max } => {
                let finite = min.is_none_or(f64::is_finite) && max.is_none_or(f64::is_finite);
                let ordered = match (min, max) {
                    (Some(lo), Some(hi)) => lo <= hi,
                    _ => true,
                };
                (min.is_none() && max.is_none()) || !finite || !ordered
            }
            FilterValue::Flag(_) => false,
        }
    }
}

/// The current combination of search/filter criteria, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    criteria: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    /// An empty set that matches every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `name` set to `value`
    pub fn with_filter(&self, name: impl Into<String>, value: FilterValue) -> Self {
        let mut next = self.clone();
        next.criteria.insert(name.into(), value);
        next
    }

    /// Return a copy with `name` removed
    pub fn without(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.criteria.remove(name);
        next
    }

    /// Return a copy where every criterion of `other` overrides ours
    pub fn merge(&self, other: &FilterSet) -> Self {
        let mut next = self.clone();
        for (name, value) in &other.criteria {
            next.criteria.insert(name.clone(), value.clone());
        }
        next
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.criteria.get(name)
    }

    /// Criteria that actually constrain the result
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.criteria
            .iter()
            .filter(|(_, value)| !value.is_unconstrained())
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True when no criterion constrains the result
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// The active free-text search, if any
    pub fn search_text(&self) -> Option<&str> {
        self.active().find_map(|(_, value)| match value {
            FilterValue::Search(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Build a filter set from the JSON filter object of a query string.
    ///
    /// # Format
    /// - `{"q": "roofer"}` free-text search (`q` or `search`)
    /// - `{"status": "open"}` categorical match
    /// - `{"skills": ["NixOS", "DevOps"]}` set intersection
    /// - `{"featured": true}` boolean flag
    /// - `{"salary_min": {"min": 40000, "max": 90000}}` range
    /// - `{"rating>=": 4, "rating<=": 5}` range bounds
    ///
    /// Values that fit none of these shapes are dropped.
    pub fn from_json(value: &Value) -> Self {
        let mut set = FilterSet::new();
        let Some(obj) = value.as_object() else {
            return set;
        };

        for (key, value) in obj {
            if let Some(field) = key.strip_suffix(">=") {
                if let Some(min) = value.as_f64() {
                    set.fold_bound(field, Some(min), None);
                } else {
                    tracing::debug!(filter = %key, "ignoring non-numeric lower bound");
                }
                continue;
            }
            if let Some(field) = key.strip_suffix("<=") {
                if let Some(max) = value.as_f64() {
                    set.fold_bound(field, None, Some(max));
                } else {
                    tracing::debug!(filter = %key, "ignoring non-numeric upper bound");
                }
                continue;
            }

            let parsed = match value {
                Value::String(s) if SEARCH_KEYS.contains(&key.as_str()) => {
                    Some(FilterValue::Search(s.clone()))
                }
                Value::String(s) => Some(FilterValue::Category(s.clone())),
                Value::Bool(b) => Some(FilterValue::Flag(*b)),
                Value::Array(items) => {
                    let values: Option<Vec<String>> = items
                        .iter()
                        .map(|item| item.as_str().map(String::from))
                        .collect();
                    values.map(FilterValue::AnyOf)
                }
                Value::Object(bounds) => {
                    let min = bounds.get("min").and_then(Value::as_f64);
                    let max = bounds.get("max").and_then(Value::as_f64);
                    Some(FilterValue::Range { min, max })
                }
                _ => None,
            };

            match parsed {
                Some(filter) => set.criteria.insert(key.clone(), filter),
                None => {
                    tracing::debug!(filter = %key, "ignoring malformed filter value");
                    continue;
                }
            };
        }

        set
    }

    fn fold_bound(&mut self, field: &str, min: Option<f64>, max: Option<f64>) {
        let (cur_min, cur_max) = match self.criteria.get(field) {
            Some(FilterValue::Range { min, max }) => (*min, *max),
            _ => (None, None),
        };
        self.criteria.insert(
            field.to_string(),
            FilterValue::Range {
                min: min.or(cur_min),
                max: max.or(cur_max),
            },
        );
    }
}
