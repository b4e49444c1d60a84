pub mod fetch;
pub mod fonts;
pub mod library;
