pub mod model;
pub mod variations;
