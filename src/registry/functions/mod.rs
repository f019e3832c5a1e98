//! Built-in function implementations

pub mod math;
