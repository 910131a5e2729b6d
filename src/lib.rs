pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod ui;
pub mod widgets;

pub use config::FormConfig;
pub use error::{ConfigError, FormError, ValidationError};

pub use state::field_rules::FieldRules;
pub use state::flow::{Flow, StepStatus};
pub use state::form::{FormHandle, FormId, FormRegistry, NavigationSnapshot};
pub use state::step_fields::{StepFieldMap, StepKey};
pub use state::validation::{FormContext, ValidationState};

pub use widgets::components::containers::{MultistepForm, StepControls};
pub use widgets::components::step::{Step, StepContainer};
pub use widgets::inputs::button::{ClickEvent, Control, TriggerContent, TriggerOutcome};
pub use widgets::inputs::triggers::{NextTrigger, PrevTrigger, SubmitTrigger};
pub use widgets::outputs::field_message::FieldMessage;
pub use widgets::outputs::progress::{
    MarkerState, ProgressIndicator, ProgressPalette, ProgressVariant, marker_states,
    progress_percent,
};
pub use widgets::traits::{DrawOutput, Drawable, RenderContext};
