//! API request handlers

mod health;
mod simulate;

pub use health::*;
pub use simulate::*;
