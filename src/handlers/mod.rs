pub mod category;
pub mod extract;
pub mod health;

pub use health::{health, not_found};
