#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod primitives;

pub use cursor::ByteCursor;
pub use error::WireError;
pub use primitives::{Color, Coord, Rect};
