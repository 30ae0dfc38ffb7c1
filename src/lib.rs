pub mod error;
pub mod manifest;
pub mod preview;
pub mod shape;
pub mod shapes;

pub use error::{Error, Result};
pub use shape::Shape;
