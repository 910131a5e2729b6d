use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::state::form::{FormHandle, NavigationSnapshot};
use crate::state::validation::FormContext;
use crate::ui::style::Style;
use crate::widgets::inputs::button::{ClickEvent, TriggerBase, TriggerContent, TriggerOutcome};
use crate::widgets::traits::{DrawOutput, Drawable, RenderContext};

fn next_visible(nav: &NavigationSnapshot) -> bool {
    nav.total_steps > 0 && !nav.is_last()
}

fn prev_visible(nav: &NavigationSnapshot) -> bool {
    nav.total_steps > 0 && !nav.is_first()
}

fn submit_visible(nav: &NavigationSnapshot) -> bool {
    nav.is_last()
}

/// Advances one step once the current step's fields validate.
///
/// A step with no registered fields is always valid. At most one validation
/// per form runs at a time; activations arriving meanwhile are ignored.
pub struct NextTrigger {
    base: TriggerBase,
    context: Rc<dyn FormContext>,
}

impl NextTrigger {
    pub fn new(
        form: &FormHandle,
        context: Rc<dyn FormContext>,
        content: impl Into<TriggerContent>,
    ) -> Self {
        Self {
            base: TriggerBase::new(form, content.into()),
            context,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.base.set_style(style);
        self
    }

    /// Runs right before advancing, only when the step is valid.
    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + 'static) -> Self {
        self.base.set_on_click(Box::new(handler));
        self
    }

    pub fn is_visible(&self) -> bool {
        next_visible(&self.base.form.snapshot())
    }

    pub async fn activate(&self, event: &mut ClickEvent) -> TriggerOutcome {
        event.prevent_default();
        let form = &self.base.form;
        if !self.is_visible() {
            return TriggerOutcome::Hidden;
        }

        let Some(_guard) = form.begin_validation() else {
            debug!("next ignored: validation already in flight");
            return TriggerOutcome::Ignored;
        };

        let step = form.current_key();
        let fields = form.current_fields().unwrap_or_default();

        if fields.is_empty() {
            debug!(step = ?step, "no fields registered for step, advancing without validation");
            self.base.run_caller_handlers(event);
            form.next_step();
            return TriggerOutcome::Advanced;
        }

        match self.context.trigger(&fields).await {
            Ok(true) => {
                if form.current_key() != step {
                    debug!(step = ?step, "next ignored: step changed while validating");
                    return TriggerOutcome::Ignored;
                }
                self.base.run_caller_handlers(event);
                form.next_step();
                TriggerOutcome::Advanced
            }
            Ok(false) => {
                debug!(step = ?step, fields = ?fields, "step fields did not validate");
                TriggerOutcome::Rejected
            }
            Err(err) => {
                error!(step = ?step, error = %err, "error during field validation");
                TriggerOutcome::Failed
            }
        }
    }
}

impl Drawable for NextTrigger {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        if !next_visible(&ctx.navigation) {
            return DrawOutput::empty();
        }
        self.base.draw(ctx)
    }
}

/// Goes back one step. Never validates.
pub struct PrevTrigger {
    base: TriggerBase,
}

impl PrevTrigger {
    pub fn new(form: &FormHandle, content: impl Into<TriggerContent>) -> Self {
        Self {
            base: TriggerBase::new(form, content.into()),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.base.set_style(style);
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + 'static) -> Self {
        self.base.set_on_click(Box::new(handler));
        self
    }

    pub fn is_visible(&self) -> bool {
        prev_visible(&self.base.form.snapshot())
    }

    pub fn activate(&self, event: &mut ClickEvent) -> TriggerOutcome {
        event.prevent_default();
        if !self.is_visible() {
            return TriggerOutcome::Hidden;
        }
        self.base.run_caller_handlers(event);
        self.base.form.prev_step();
        TriggerOutcome::Retreated
    }
}

impl Drawable for PrevTrigger {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        if !prev_visible(&ctx.navigation) {
            return DrawOutput::empty();
        }
        self.base.draw(ctx)
    }
}

/// Validates every field of the form and runs the submit callback.
pub struct SubmitTrigger {
    base: TriggerBase,
    context: Rc<dyn FormContext>,
}

impl SubmitTrigger {
    pub fn new(
        form: &FormHandle,
        context: Rc<dyn FormContext>,
        content: impl Into<TriggerContent>,
    ) -> Self {
        Self {
            base: TriggerBase::new(form, content.into()),
            context,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.base.set_style(style);
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + 'static) -> Self {
        self.base.set_on_click(Box::new(handler));
        self
    }

    pub fn is_visible(&self) -> bool {
        submit_visible(&self.base.form.snapshot())
    }

    pub async fn activate(&self, event: &mut ClickEvent) -> TriggerOutcome {
        event.prevent_default();
        let form = &self.base.form;
        if !self.is_visible() {
            return TriggerOutcome::Hidden;
        }
        self.base.run_caller_handlers(event);

        let Some(_guard) = form.begin_validation() else {
            debug!("submit ignored: validation already in flight");
            return TriggerOutcome::Ignored;
        };

        // Fields are validated even without a callback so their errors show.
        let has_callback = form.has_submit();
        let fields = form.all_fields();
        let submitter = form.clone();
        let result = self
            .context
            .handle_submit(&fields, &move || {
                if has_callback {
                    submitter.submit();
                }
            })
            .await;

        match result {
            Ok(true) if !has_callback => {
                warn!("submit callback is not defined");
                TriggerOutcome::Ignored
            }
            Ok(true) => TriggerOutcome::Submitted,
            Ok(false) => {
                debug!(fields = ?fields, "form did not validate, submit skipped");
                TriggerOutcome::Rejected
            }
            Err(err) => {
                error!(error = %err, "error during submit");
                TriggerOutcome::Failed
            }
        }
    }
}

impl Drawable for SubmitTrigger {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        if !submit_visible(&ctx.navigation) {
            return DrawOutput::empty();
        }
        self.base.draw(ctx)
    }
}
