pub mod color;
pub mod content;
pub mod position;
