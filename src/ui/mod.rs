pub mod renderer;
pub mod span;
pub mod style;
pub mod theme;
