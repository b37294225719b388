pub mod matches;
pub mod matrix;
pub mod search;
pub mod status;
