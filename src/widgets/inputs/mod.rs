pub mod button;
pub mod triggers;
