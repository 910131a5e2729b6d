//! Declarative form definitions.
//!
//! A definition lists the steps in order with the fields each one gates on,
//! and optionally step titles, progress indicator options and field rules:
//!
//! ```yaml
//! steps:
//!   account: [email]
//!   profile: [name]
//!   confirm: []
//! titles:
//!   account: Your account
//! progress:
//!   variant: dots
//! rules:
//!   email:
//!     - rule: required
//!     - rule: pattern
//!       regex: "^\\S+@\\S+$"
//!       message: Enter a valid email
//! ```

use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::field_rules::FieldRules;
use crate::state::form::FormHandle;
use crate::state::step_fields::StepFieldMap;
use crate::ui::style::Color;
use crate::widgets::components::step::{Step, StepContainer};
use crate::widgets::outputs::progress::{ProgressIndicator, ProgressPalette, ProgressVariant};
use crate::widgets::validators;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub steps: StepFieldMap,
    #[serde(default)]
    pub titles: IndexMap<String, String>,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub rules: IndexMap<String, Vec<RuleConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default)]
    pub variant: ProgressVariant,
    pub bar_width: Option<usize>,
    pub segment_width: Option<usize>,
    pub gap: Option<usize>,
    pub connector_width: Option<usize>,
    /// Bar fill; also the reached-dot colour unless `dot` is set.
    pub fill: Option<Color>,
    /// Bar track; also the connector colour unless `connector` is set.
    pub track: Option<Color>,
    pub dot: Option<Color>,
    pub inactive_dot: Option<Color>,
    pub connector: Option<Color>,
    #[serde(default)]
    pub percent_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleConfig {
    Required {
        message: Option<String>,
    },
    MinLength {
        min: usize,
        message: Option<String>,
    },
    Pattern {
        regex: String,
        message: Option<String>,
    },
}

impl FormConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a `.yaml`, `.yml` or `.json` definition.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }
        self.field_rules().map(|_| ())
    }

    pub fn form_handle(&self) -> FormHandle {
        FormHandle::new(self.steps.clone())
    }

    pub fn field_rules(&self) -> Result<FieldRules, ConfigError> {
        let mut rules = FieldRules::new();
        for (field, configs) in &self.rules {
            for config in configs {
                rules.add_rule(field.clone(), build_rule(field, config)?);
            }
        }
        Ok(rules)
    }

    pub fn progress_indicator(&self) -> ProgressIndicator {
        let progress = &self.progress;
        let mut palette = ProgressPalette::default();
        if let Some(fill) = progress.fill {
            palette.fill = fill;
            palette.dot = fill;
        }
        if let Some(track) = progress.track {
            palette.track = track;
            palette.connector = track;
        }
        if let Some(dot) = progress.dot {
            palette.dot = dot;
        }
        if let Some(inactive_dot) = progress.inactive_dot {
            palette.inactive_dot = inactive_dot;
        }
        if let Some(connector) = progress.connector {
            palette.connector = connector;
        }
        if let Some(width) = progress.connector_width {
            palette.connector_width = width;
        }

        let mut indicator = ProgressIndicator::new(progress.variant).with_palette(palette);
        if let Some(width) = progress.bar_width {
            indicator = indicator.with_bar_width(width);
        }
        if let Some(width) = progress.segment_width {
            indicator = indicator.with_segment_width(width);
        }
        if let Some(gap) = progress.gap {
            indicator = indicator.with_gap(gap);
        }
        if progress.percent_label {
            indicator = indicator.with_percent_label();
        }
        indicator
    }

    pub fn step_title(&self, key: &str) -> Option<&str> {
        self.titles.get(key).map(String::as_str)
    }

    /// One titled [`Step`] per declared step, in order.
    pub fn steps_container(&self) -> StepContainer {
        self.steps
            .keys()
            .fold(StepContainer::new(), |container, key| {
                let mut step = Step::new(key.clone());
                if let Some(title) = self.step_title(key.as_str()) {
                    step = step.with_title(title);
                }
                container.step(step)
            })
    }
}

fn build_rule(field: &str, config: &RuleConfig) -> Result<validators::Validator, ConfigError> {
    let rule = match config {
        RuleConfig::Required { message } => validators::required(
            message
                .clone()
                .unwrap_or_else(|| format!("{field} is required")),
        ),
        RuleConfig::MinLength { min, message } => validators::min_length(
            *min,
            message
                .clone()
                .unwrap_or_else(|| format!("{field} must be at least {min} characters")),
        ),
        RuleConfig::Pattern { regex, message } => {
            let compiled = Regex::new(regex).map_err(|source| ConfigError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
            validators::pattern(
                compiled,
                message
                    .clone()
                    .unwrap_or_else(|| format!("{field} is invalid")),
            )
        }
    };
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::FormConfig;
    use crate::error::ConfigError;
    use crate::ui::style::Color;
    use crate::widgets::outputs::progress::ProgressVariant;

    const SIGNUP: &str = r#"
steps:
  account: [email]
  profile: [name]
  confirm: []
titles:
  account: Your account
progress:
  variant: dashed
  segment_width: 3
  fill: green
rules:
  email:
    - rule: required
    - rule: pattern
      regex: "^\\S+@\\S+$"
      message: Enter a valid email
  name:
    - rule: min_length
      min: 2
"#;

    #[test]
    fn parses_yaml_in_declared_order() {
        let config = FormConfig::from_yaml_str(SIGNUP).expect("config should parse");
        let keys: Vec<&str> = config.steps.keys().map(|key| key.as_str()).collect();
        assert_eq!(keys, vec!["account", "profile", "confirm"]);
        assert_eq!(config.progress.variant, ProgressVariant::Dashed);
        assert_eq!(config.progress.fill, Some(Color::Green));
        assert_eq!(config.step_title("account"), Some("Your account"));
        assert_eq!(config.step_title("confirm"), None);
    }

    #[test]
    fn builds_field_rules_with_default_messages() {
        let config = FormConfig::from_yaml_str(SIGNUP).expect("config should parse");
        let rules = config.field_rules().expect("rules should build");
        let fields = vec!["email".to_string(), "name".to_string()];

        assert!(!rules.validate_fields(&fields));
        assert_eq!(rules.error_for("email").as_deref(), Some("email is required"));
        assert_eq!(
            rules.error_for("name").as_deref(),
            Some("name must be at least 2 characters")
        );

        rules.set_value("email", "not-an-email");
        rules.set_value("name", "Ada");
        assert!(!rules.validate_fields(&fields));
        assert_eq!(rules.error_for("email").as_deref(), Some("Enter a valid email"));

        rules.set_value("email", "ada@example.com");
        assert!(rules.validate_fields(&fields));
    }

    #[test]
    fn progress_options_shape_the_indicator() {
        let config = FormConfig::from_yaml_str(SIGNUP).expect("config should parse");
        let indicator = config.progress_indicator();
        assert_eq!(indicator.variant(), ProgressVariant::Dashed);
        assert_eq!(indicator.palette().segment_width, 3);
        assert_eq!(indicator.palette().fill, Color::Green);
        assert_eq!(indicator.palette().track, Color::DarkGrey);
    }

    #[test]
    fn explicit_palette_colours_override_fill_and_track() {
        let source = r#"{
            "steps": {"a": [], "b": []},
            "progress": {
                "variant": "dots",
                "fill": "green",
                "track": "black",
                "dot": "magenta",
                "inactive_dot": "dark_grey",
                "connector_width": 5
            }
        }"#;
        let config = FormConfig::from_json_str(source).expect("config should parse");
        let palette = config.progress_indicator().palette().clone();

        assert_eq!(palette.fill, Color::Green);
        assert_eq!(palette.dot, Color::Magenta);
        assert_eq!(palette.inactive_dot, Color::DarkGrey);
        assert_eq!(palette.track, Color::Black);
        assert_eq!(palette.connector, Color::Black);
        assert_eq!(palette.connector_width, 5);
    }

    #[test]
    fn builds_titled_steps() {
        let config = FormConfig::from_yaml_str(SIGNUP).expect("config should parse");
        let container = config.steps_container();
        assert_eq!(container.len(), 3);
    }

    #[test]
    fn rejects_invalid_pattern() {
        let source = "steps: {a: [x]}\nrules:\n  x:\n    - rule: pattern\n      regex: \"(\"\n";
        let err = FormConfig::from_yaml_str(source).expect_err("pattern should not compile");
        assert!(matches!(err, ConfigError::InvalidPattern { ref field, .. } if field == "x"));
    }

    #[test]
    fn rejects_empty_step_list() {
        let err = FormConfig::from_json_str(r#"{"steps": {}}"#).expect_err("no steps");
        assert!(matches!(err, ConfigError::NoSteps));
    }

    #[test]
    fn loads_json_from_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, r#"{{"steps": {{"one": ["a"], "two": []}}}}"#).expect("write config");

        let config = FormConfig::from_path(file.path()).expect("config should load");
        assert_eq!(config.steps.len(), 2);
        assert_eq!(
            config.form_handle().current_key().map(|k| k.into_inner()),
            Some("one".to_string())
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = FormConfig::from_path("form.toml").expect_err("unsupported");
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
