use regex::Regex;

pub type RuleError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), RuleError>>;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), RuleError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Empty values pass; pair with [`required`] to forbid them.
pub fn pattern(regex: Regex, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.is_empty() || regex.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}
