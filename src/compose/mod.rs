pub mod composer;
pub mod tree;
