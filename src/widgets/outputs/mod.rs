pub mod field_message;
pub mod progress;
