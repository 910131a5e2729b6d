use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ValidationError;

/// Capabilities a form borrows from the field layer it is built on.
///
/// Both calls are asynchronous; the form never cancels or times them out.
#[async_trait(?Send)]
pub trait FormContext {
    /// Validates the named fields. `Ok(true)` only when every field passes.
    async fn trigger(&self, fields: &[String]) -> Result<bool, ValidationError>;

    /// Validates `fields` and runs `on_valid` when they pass.
    async fn handle_submit(
        &self,
        fields: &[String],
        on_valid: &dyn Fn(),
    ) -> Result<bool, ValidationError> {
        let valid = self.trigger(fields).await?;
        if valid {
            on_valid();
        }
        Ok(valid)
    }
}

/// Last known error per field.
#[derive(Debug, Default, Clone)]
pub struct ValidationState {
    entries: HashMap<String, String>,
}

impl ValidationState {
    pub fn set_error(&mut self, field: impl Into<String>, error: impl Into<String>) {
        self.entries.insert(field.into(), error.into());
    }

    pub fn clear_error(&mut self, field: &str) {
        self.entries.remove(field);
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn has_errors(&self, fields: &[String]) -> bool {
        fields.iter().any(|field| self.entries.contains_key(field))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
