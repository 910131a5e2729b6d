use crate::state::form::{FormHandle, NavigationSnapshot};
use crate::ui::span::{Span, SpanLine, line_text};
use crate::ui::theme::Theme;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

/// Everything a widget may read while drawing. Built once per frame from the
/// form's handle, so all widgets of a frame agree on the position.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub navigation: NavigationSnapshot,
    pub theme: Theme,
}

impl RenderContext {
    pub fn new(navigation: NavigationSnapshot, theme: Theme) -> Self {
        Self { navigation, theme }
    }

    pub fn for_form(form: &FormHandle) -> Self {
        Self::new(form.snapshot(), Theme::default_theme())
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn current_index(&self) -> usize {
        self.navigation.current_index
    }

    pub fn total_steps(&self) -> usize {
        self.navigation.total_steps
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

impl DrawOutput {
    /// Output of a widget that renders nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn plain_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter().map(|line| vec![Span::new(line)]).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn extend(&mut self, other: DrawOutput) {
        self.lines.extend(other.lines);
    }

    /// Unstyled text, one line per row.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Drawable: every widget can draw itself
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

impl<T: Drawable + ?Sized> Drawable for Box<T> {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        (**self).draw(ctx)
    }
}
