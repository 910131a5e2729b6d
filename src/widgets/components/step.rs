use tracing::debug;

use crate::state::step_fields::StepKey;
use crate::ui::span::Span;
use crate::widgets::traits::{DrawOutput, Drawable, RenderContext};

/// One page of a form: an optional title row followed by its content.
pub struct Step {
    key: StepKey,
    title: Option<String>,
    hide_title: bool,
    is_valid: bool,
    children: Vec<Box<dyn Drawable>>,
}

impl Step {
    pub fn new(key: impl Into<StepKey>) -> Self {
        Self {
            key: key.into(),
            title: None,
            hide_title: false,
            is_valid: true,
            children: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Keeps the title row (and its validity marker) but hides the text.
    pub fn hide_title(mut self) -> Self {
        self.hide_title = true;
        self
    }

    pub fn with_valid(mut self, is_valid: bool) -> Self {
        self.is_valid = is_valid;
        self
    }

    pub fn set_valid(&mut self, is_valid: bool) {
        self.is_valid = is_valid;
    }

    /// Adds plain text; each line of `text` becomes its own row.
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.children.push(Box::new(TextLine(text.into())));
        self
    }

    pub fn child(mut self, child: impl Drawable + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn key(&self) -> &StepKey {
        &self.key
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

impl Drawable for Step {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out = DrawOutput::empty();

        if let Some(title) = &self.title {
            let mut row = Vec::new();
            if !self.hide_title {
                row.push(Span::styled(title.clone(), ctx.theme.title));
                row.push(Span::new(" "));
            }
            if self.is_valid {
                row.push(Span::styled("✓", ctx.theme.valid_marker));
            } else {
                row.push(Span::styled("✗", ctx.theme.invalid_marker));
            }
            out.lines.push(row);
        }

        for child in &self.children {
            out.extend(child.draw(ctx));
        }
        out
    }
}

struct TextLine(String);

impl Drawable for TextLine {
    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        DrawOutput::plain_lines(
            self.0
                .split('\n')
                .map(|row| row.trim_end_matches('\r').to_string())
                .collect(),
        )
    }
}

/// Shows only the child at the current step index.
///
/// Children are matched to steps by position. An index past the last child
/// draws nothing. A [`Step`] whose key differs from the form's current key
/// is still drawn, with a debug notice.
#[derive(Default)]
pub struct StepContainer {
    children: Vec<StepSlot>,
}

struct StepSlot {
    key: Option<StepKey>,
    child: Box<dyn Drawable>,
}

impl StepContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: Step) -> Self {
        self.children.push(StepSlot {
            key: Some(step.key.clone()),
            child: Box::new(step),
        });
        self
    }

    pub fn child(mut self, child: impl Drawable + 'static) -> Self {
        self.children.push(StepSlot {
            key: None,
            child: Box::new(child),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn active_child(&self, index: usize) -> Option<&dyn Drawable> {
        self.children.get(index).map(|slot| &*slot.child)
    }

    /// Key of the [`Step`] at `index`; `None` for other children.
    pub fn step_key(&self, index: usize) -> Option<&StepKey> {
        self.children.get(index).and_then(|slot| slot.key.as_ref())
    }

    /// Whether the child at `index` is a [`Step`] keyed differently from
    /// `current`.
    pub fn is_misplaced(&self, index: usize, current: Option<&StepKey>) -> bool {
        match (self.step_key(index), current) {
            (Some(key), Some(current)) => key != current,
            _ => false,
        }
    }
}

impl Drawable for StepContainer {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let index = ctx.current_index();
        let Some(child) = self.active_child(index) else {
            debug!(index, children = self.children.len(), "no step child at index");
            return DrawOutput::empty();
        };
        let current = ctx.navigation.current_key.as_ref();
        if self.is_misplaced(index, current) {
            debug!(
                index,
                child = ?self.step_key(index),
                current = ?current,
                "step child does not match the current step"
            );
        }
        child.draw(ctx)
    }
}
