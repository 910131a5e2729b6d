pub mod containers;
pub mod step;
