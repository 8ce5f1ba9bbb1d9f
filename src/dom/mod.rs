pub mod builder;
pub mod element;

pub use builder::ElementBuilder;
pub use element::*;
