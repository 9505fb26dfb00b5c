pub mod catalog;
pub mod pattern;

pub use catalog::*;
pub use pattern::*;
