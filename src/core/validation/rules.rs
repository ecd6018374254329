//! Per-field rule sets

use crate::core::error::{FieldError, ValidationError};
use serde_json::Value;
use std::sync::Arc;

type FilterFn = Arc<dyn Fn(&str, Value) -> Value + Send + Sync>;
type ValidatorFn = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

#[derive(Clone, Default)]
struct FieldRule {
    filters: Vec<FilterFn>,
    validators: Vec<ValidatorFn>,
}

/// Filters and validators keyed by field name, applied in declaration order
///
/// # Example
///
/// ```rust,ignore
/// let rules = RuleSet::new()
///     .filter("title", filters::trim())
///     .validate("title", validators::required())
///     .validate("title", validators::string_length(5, 100));
///
/// let clean = rules.validate_and_filter(json!({"title": "  Site Foreman  "}))?;
/// ```
#[derive(Clone, Default)]
pub struct RuleSet {
    fields: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn rule_mut(&mut self, field: &str) -> &mut FieldRule {
        let index = match self.fields.iter().position(|(name, _)| name == field) {
            Some(index) => index,
            None => {
                self.fields.push((field.to_string(), FieldRule::default()));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index].1
    }

    /// Add a normalising filter for `field`
    pub fn filter<F>(mut self, field: &str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        self.rule_mut(field).filters.push(Arc::new(filter));
        self
    }

    /// Add a validator for `field`
    pub fn validate<V>(mut self, field: &str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rule_mut(field).validators.push(Arc::new(validator));
        self
    }

    /// Names of the fields this rule set covers
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Run every filter over the payload's fields
    pub fn normalize(&self, mut payload: Value) -> Value {
        if let Some(obj) = payload.as_object_mut() {
            for (field, rule) in &self.fields {
                if let Some(value) = obj.remove(field) {
                    let value = rule.filters.iter().fold(value, |v, f| f(field, v));
                    obj.insert(field.clone(), value);
                }
            }
        }
        payload
    }

    /// First failing validator of each field; absent fields are checked as null
    pub fn check(&self, payload: &Value) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|(field, rule)| {
                let value = payload.get(field).unwrap_or(&Value::Null);
                rule.validators
                    .iter()
                    .find_map(|v| v(field, value).err())
                    .map(|message| FieldError {
                        field: field.clone(),
                        message,
                    })
            })
            .collect()
    }

    /// Normalise, then validate
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, ValidationError> {
        let payload = self.normalize(payload);
        let errors = self.check(&payload);
        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}
