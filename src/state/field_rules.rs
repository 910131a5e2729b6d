use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ValidationError;
use crate::state::validation::{FormContext, ValidationState};
use crate::widgets::validators::{Validator, run_validators};

/// In-memory field layer: current values, per-field rules and the errors of
/// the last validation.
///
/// Fields without rules always pass.
#[derive(Default)]
pub struct FieldRules {
    values: RefCell<HashMap<String, String>>,
    rules: HashMap<String, Vec<Validator>>,
    validation: RefCell<ValidationState>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, field: impl Into<String>, validator: Validator) -> Self {
        self.add_rule(field, validator);
        self
    }

    pub fn add_rule(&mut self, field: impl Into<String>, validator: Validator) {
        self.rules.entry(field.into()).or_default().push(validator);
    }

    pub fn set_value(&self, field: impl Into<String>, value: impl Into<String>) {
        self.values.borrow_mut().insert(field.into(), value.into());
    }

    pub fn value(&self, field: &str) -> Option<String> {
        self.values.borrow().get(field).cloned()
    }

    pub fn error_for(&self, field: &str) -> Option<String> {
        self.validation.borrow().error(field).map(ToOwned::to_owned)
    }

    pub fn has_errors(&self, fields: &[String]) -> bool {
        self.validation.borrow().has_errors(fields)
    }

    pub fn validation(&self) -> ValidationState {
        self.validation.borrow().clone()
    }

    /// Validates `fields` synchronously, recording the outcome per field.
    pub fn validate_fields(&self, fields: &[String]) -> bool {
        let values = self.values.borrow();
        let mut validation = self.validation.borrow_mut();
        let mut all_valid = true;

        for field in fields {
            let Some(rules) = self.rules.get(field) else {
                validation.clear_error(field);
                continue;
            };
            let value = values.get(field).map(String::as_str).unwrap_or("");
            match run_validators(rules, value) {
                Ok(()) => validation.clear_error(field),
                Err(error) => {
                    debug!(field = %field, error = %error, "field failed validation");
                    validation.set_error(field.clone(), error);
                    all_valid = false;
                }
            }
        }

        all_valid
    }
}

#[async_trait(?Send)]
impl FormContext for FieldRules {
    async fn trigger(&self, fields: &[String]) -> Result<bool, ValidationError> {
        Ok(self.validate_fields(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::FieldRules;
    use crate::state::validation::FormContext;
    use crate::widgets::validators::{min_length, required};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn records_and_clears_errors() {
        let rules = FieldRules::new()
            .rule("name", required("Name is required"))
            .rule("name", min_length(2, "Too short"));

        assert!(!rules.validate_fields(&fields(&["name"])));
        assert_eq!(rules.error_for("name").as_deref(), Some("Name is required"));

        rules.set_value("name", "A");
        assert!(!rules.validate_fields(&fields(&["name"])));
        assert_eq!(rules.error_for("name").as_deref(), Some("Too short"));

        rules.set_value("name", "Ada");
        assert!(rules.validate_fields(&fields(&["name"])));
        assert!(rules.error_for("name").is_none());
    }

    #[test]
    fn fields_without_rules_pass() {
        let rules = FieldRules::new();
        assert!(rules.validate_fields(&fields(&["anything"])));
    }

    #[tokio::test]
    async fn trigger_reports_every_failing_field() {
        let rules = FieldRules::new()
            .rule("name", required("name"))
            .rule("email", required("email"));
        rules.set_value("email", "a@b.c");

        let valid = rules
            .trigger(&fields(&["name", "email"]))
            .await
            .expect("in-memory validation never fails");
        assert!(!valid);
        assert!(rules.has_errors(&fields(&["name"])));
        assert!(!rules.has_errors(&fields(&["email"])));
    }

    #[tokio::test]
    async fn handle_submit_runs_callback_only_when_valid() {
        let rules = FieldRules::new().rule("name", required("name"));
        let submitted = std::cell::Cell::new(false);

        let ok = rules
            .handle_submit(&fields(&["name"]), &|| submitted.set(true))
            .await
            .expect("validation");
        assert!(!ok);
        assert!(!submitted.get());

        rules.set_value("name", "Ada");
        let ok = rules
            .handle_submit(&fields(&["name"]), &|| submitted.set(true))
            .await
            .expect("validation");
        assert!(ok);
        assert!(submitted.get());
    }
}
