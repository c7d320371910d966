pub mod clone;

pub use clone::*;
