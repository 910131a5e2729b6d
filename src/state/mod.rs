pub mod field_rules;
pub mod flow;
pub mod form;
pub mod step_fields;
pub mod validation;
