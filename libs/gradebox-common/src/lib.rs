pub mod questions;
pub mod types;
