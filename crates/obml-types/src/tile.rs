use obml_wire::{Color, Rect};

/// One drawable record from the content section.
///
/// Every tile shares the base shape (bounds + colour); what distinguishes
/// them lives in [`TileContent`]. Tiles are stored in file order, which is
/// also paint order: a later tile paints over an earlier one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tile {
    pub bounds: Rect,
    pub color: Color,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub content: TileContent,
}

/// Variant payload of a [`Tile`].
///
/// ```text
/// ┌──────┬─────────┬──────────────────────────────────────────────┐
/// │ Tag  │ Variant │ Extra fields                                 │
/// ├──────┼─────────┼──────────────────────────────────────────────┤
/// │ 'B'  │ Block   │ none                                         │
/// │ 'I'  │ Image   │ address (key into the embedded image table)  │
/// │ 'T'  │ Text    │ font_index, text                             │
/// │ 'F'  │ Form    │ control_type, id, value                      │
/// └──────┴─────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TileContent {
    /// Flat filled rectangle.
    Block,

    /// Raster image. `address` may have no entry in the image table; the
    /// consumer then paints the tile as a flat rectangle.
    Image { address: u32 },

    /// A run of text. `font_index` selects a size/style from a
    /// [`FontTable`](crate::FontTable).
    Text { font_index: i8, text: String },

    /// A form control (input box, button, select...).
    Form {
        control_type: i16,
        id: String,
        value: String,
    },
}

/// Fieldless discriminant of [`TileContent`], for filtering and counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TileKind {
    Block,
    Image,
    Text,
    Form,
}

impl TileKind {
    pub const ALL: [Self; 4] = [Self::Block, Self::Image, Self::Text, Self::Form];

    /// Record tag that introduces this kind in the content section.
    #[must_use]
    pub fn wire_tag(self) -> u8 {
        match self {
            Self::Block => b'B',
            Self::Image => b'I',
            Self::Text => b'T',
            Self::Form => b'F',
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Image => "image",
            Self::Text => "text",
            Self::Form => "form",
        }
    }

    /// Parse a lowercase kind name (as used on the command line).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl Tile {
    #[must_use]
    pub fn block(bounds: Rect, color: Color) -> Self {
        Self {
            bounds,
            color,
            content: TileContent::Block,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        match self.content {
            TileContent::Block => TileKind::Block,
            TileContent::Image { .. } => TileKind::Image,
            TileContent::Text { .. } => TileKind::Text,
            TileContent::Form { .. } => TileKind::Form,
        }
    }

    /// The image-table key, for image tiles.
    #[must_use]
    pub fn image_address(&self) -> Option<u32> {
        match self.content {
            TileContent::Image { address } => Some(address),
            _ => None,
        }
    }
}
