//! Value types shared across modules

pub mod color;

pub use color::Rgba;
