pub mod components;
pub mod inputs;
pub mod outputs;
pub mod traits;
pub mod validators;
