//! The query engine: filter, stable sort, paginate
//!
//! [`QueryEngine::run`] is a pure function of `(records, filters, sort, page)`.
//! Running the same request twice yields the same items in the same order.

use crate::core::entity::Record;
use crate::core::field::FieldValue;
use crate::core::filter::{FilterSet, FilterValue};
use crate::core::query::{QueryRequest, QueryResponse, SortDirection, SortSpec};
use std::cmp::Ordering;

/// Applies a [`QueryRequest`] to a collection of records
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    /// Filter, sort and paginate `records`
    pub fn run<T: Record>(records: &[T], request: &QueryRequest) -> QueryResponse<T> {
        let mut matched: Vec<&T> = records
            .iter()
            .filter(|record| Self::matches(*record, &request.filters))
            .collect();

        Self::sort(&mut matched, &request.sort, &request.filters);

        let total_count = matched.len();
        let page = request.page;
        let items: Vec<T> = if page.size == 0 {
            if page.index == 0 {
                matched.into_iter().cloned().collect()
            } else {
                Vec::new()
            }
        } else {
            matched
                .into_iter()
                .skip(page.offset())
                .take(page.size)
                .cloned()
                .collect()
        };

        tracing::debug!(
            entity_type = T::resource_name_singular(),
            active_filters = request.filters.active_count(),
            total_count,
            returned = items.len(),
            "query executed"
        );

        QueryResponse { items, total_count }
    }

    /// Whether `record` satisfies every active criterion of `filters`
    pub fn matches<T: Record>(record: &T, filters: &FilterSet) -> bool {
        filters
            .active()
            .all(|(field, criterion)| Self::criterion_matches(record, field, criterion))
    }

    fn criterion_matches<T: Record>(record: &T, field: &str, criterion: &FilterValue) -> bool {
        if let FilterValue::Search(text) = criterion {
            return Self::search_hits(record, text) > 0;
        }

        // A criterion on an attribute this kind does not have is ignored.
        let Some(value) = record.field_value(field) else {
            return true;
        };

        match criterion {
            FilterValue::Search(_) => true,
            FilterValue::Category(expected) => value.as_string() == Some(expected.as_str()),
            FilterValue::AnyOf(wanted) => value
                .as_list()
                .is_some_and(|have| have.iter().any(|v| wanted.iter().any(|w| w == v))),
            FilterValue::Range { min, max } => value.as_f64().is_some_and(|n| {
                min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)
            }),
            FilterValue::Flag(expected) => value.as_bool() == Some(*expected),
        }
    }

    /// Number of searchable fields containing `text`, case-insensitively
    pub fn search_hits<T: Record>(record: &T, text: &str) -> usize {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return 0;
        }

        T::searchable_fields()
            .iter()
            .filter_map(|field| record.field_value(field))
            .filter(|value| match value {
                FieldValue::String(s) => s.to_lowercase().contains(&needle),
                FieldValue::List(items) => {
                    items.iter().any(|s| s.to_lowercase().contains(&needle))
                }
                _ => false,
            })
            .count()
    }

    fn sort<T: Record>(matched: &mut [&T], sort: &SortSpec, filters: &FilterSet) {
        let Some(key) = sort.key.as_deref() else {
            return;
        };

        if key == SortSpec::RELEVANCE {
            let text = filters.search_text().unwrap_or_default();
            // slice::sort_by is stable: equal scores keep insertion order
            matched.sort_by(|a, b| {
                let ord = Self::search_hits(*a, text).cmp(&Self::search_hits(*b, text));
                Self::directed(ord, sort.direction)
            });
            return;
        }

        matched.sort_by(|a, b| {
            let left = a.field_value(key).filter(|v| !v.is_null());
            let right = b.field_value(key).filter(|v| !v.is_null());
            match (left, right) {
                (Some(l), Some(r)) => Self::directed(l.sort_cmp(&r), sort.direction),
                // missing values sort last whatever the direction
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }

    fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}
