pub mod image;
pub mod provider;

pub use image::*;
pub use provider::*;
