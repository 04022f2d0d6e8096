//! Background workers

pub mod renderer;
pub mod stream;
