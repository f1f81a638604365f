#![warn(clippy::pedantic)]

pub mod document;
pub mod font;
pub mod header;
pub mod link;
pub mod status;
pub mod tile;

pub use document::{Document, EmbeddedImage, SourceId};
pub use font::{FontStyle, FontTable};
pub use header::{Header, SUPPORTED_VERSION};
pub use link::{Link, LinkTarget};
pub use obml_wire::{Color, Coord, Rect};
pub use status::{ErrorKind, Status};
pub use tile::{Tile, TileContent, TileKind};
