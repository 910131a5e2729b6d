use std::fmt;

use crate::state::form::FormHandle;
use crate::ui::span::Span;
use crate::ui::style::Style;
use crate::widgets::traits::{DrawOutput, RenderContext};

pub type ClickHandler = Box<dyn Fn(&mut ClickEvent)>;

/// Activation of a trigger. Triggers always prevent the default action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Advanced,
    Retreated,
    Submitted,
    /// Validation resolved false; the form stays put.
    Rejected,
    /// Validation errored; logged and absorbed.
    Failed,
    /// Nothing to do: another validation was in flight, the position moved
    /// while validating, or no submit callback exists.
    Ignored,
    /// The trigger is not shown at the current position.
    Hidden,
}

/// A caller-built control a trigger can wrap instead of a plain label.
pub struct Control {
    label: String,
    style: Style,
    on_click: Option<ClickHandler>,
}

impl Control {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: Style::default(),
            on_click: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub enum TriggerContent {
    /// Rendered with the theme's button style.
    Label(String),
    /// Rendered with the control's own style; its handler runs first.
    Element(Control),
}

impl From<&str> for TriggerContent {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl From<String> for TriggerContent {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl From<Control> for TriggerContent {
    fn from(value: Control) -> Self {
        Self::Element(value)
    }
}

/// State shared by the three navigation triggers.
pub(crate) struct TriggerBase {
    pub(crate) form: FormHandle,
    content: TriggerContent,
    extra_style: Option<Style>,
    on_click: Option<ClickHandler>,
}

impl TriggerBase {
    pub(crate) fn new(form: &FormHandle, content: TriggerContent) -> Self {
        Self {
            form: form.clone(),
            content,
            extra_style: None,
            on_click: None,
        }
    }

    pub(crate) fn set_style(&mut self, style: Style) {
        self.extra_style = Some(style);
    }

    pub(crate) fn set_on_click(&mut self, handler: ClickHandler) {
        self.on_click = Some(handler);
    }

    pub(crate) fn style(&self, ctx: &RenderContext) -> Style {
        let base = match &self.content {
            TriggerContent::Label(_) => ctx.theme.button,
            TriggerContent::Element(control) => control.style,
        };
        match self.extra_style {
            Some(extra) => base.patch(extra),
            None => base,
        }
    }

    pub(crate) fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let text = match &self.content {
            TriggerContent::Label(label) => format!(" {label} "),
            TriggerContent::Element(control) => control.label.clone(),
        };
        DrawOutput {
            lines: vec![vec![Span::styled(text, self.style(ctx))]],
        }
    }

    /// Runs the wrapped control's handler, then the trigger's own.
    pub(crate) fn run_caller_handlers(&self, event: &mut ClickEvent) {
        if let TriggerContent::Element(control) = &self.content
            && let Some(handler) = &control.on_click
        {
            handler(event);
        }
        if let Some(handler) = &self.on_click {
            handler(event);
        }
    }
}
