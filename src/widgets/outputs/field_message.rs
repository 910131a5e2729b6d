use std::rc::Rc;

use crate::state::field_rules::FieldRules;
use crate::ui::span::Span;
use crate::widgets::traits::{DrawOutput, Drawable, RenderContext};

/// Message row for one field: its last validation error, else its hint.
///
/// Draws nothing when the field has neither.
pub struct FieldMessage {
    rules: Rc<FieldRules>,
    field: String,
    hint: Option<String>,
}

impl FieldMessage {
    pub fn new(rules: &Rc<FieldRules>, field: impl Into<String>) -> Self {
        Self {
            rules: Rc::clone(rules),
            field: field.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Drawable for FieldMessage {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let span = match (self.rules.error_for(&self.field), &self.hint) {
            (Some(error), _) => Span::styled(error, ctx.theme.error),
            (None, Some(hint)) => Span::styled(hint.clone(), ctx.theme.hint),
            (None, None) => return DrawOutput::empty(),
        };
        DrawOutput {
            lines: vec![vec![span]],
        }
    }
}
