pub mod catalog;
pub mod spec;
