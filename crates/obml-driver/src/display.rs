use log::{debug, warn};
use obml_types::{Color, Document, FontStyle, Rect, TileContent};

use crate::config::DriverConfig;
use crate::error::DriverError;

/// Pixel dimensions of the surface a page is painted onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    /// The page was taller than `max_surface_height` and was cut.
    pub clamped: bool,
}

impl Surface {
    /// Surface for a page of `(width, height)` pixels.
    ///
    /// # Errors
    ///
    /// [`DriverError::InvalidSurface`] if either dimension is not positive.
    pub fn for_page(page_size: (i32, i32), max_height: u32) -> Result<Self, DriverError> {
        let (width, height) = page_size;
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(DriverError::InvalidSurface { width, height });
        };
        if w == 0 || h == 0 {
            return Err(DriverError::InvalidSurface { width, height });
        }
        Ok(Self {
            width: w,
            height: h.min(max_height),
            clamped: h > max_height,
        })
    }
}

/// One paint operation, borrowing from the document it came from.
#[derive(Debug, PartialEq)]
pub enum Paint<'d, I> {
    /// Flat rectangle. Block tiles, and image tiles whose image is
    /// missing.
    Fill { bounds: Rect, color: Color },

    Image { bounds: Rect, image: &'d I },

    Text {
        bounds: Rect,
        color: Color,
        style: FontStyle,
        text: &'d str,
    },

    /// Outline of a form control. Drawing the control itself is up to the
    /// canvas.
    Form {
        bounds: Rect,
        color: Color,
        control_type: i16,
        id: &'d str,
        value: &'d str,
    },
}

impl<I> Paint<'_, I> {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Fill { bounds, .. }
            | Self::Image { bounds, .. }
            | Self::Text { bounds, .. }
            | Self::Form { bounds, .. } => *bounds,
        }
    }
}

/// Something a [`DisplayList`] can be replayed onto: a rasteriser, a
/// recorder in tests, a text dump.
pub trait Canvas<I> {
    fn fill(&mut self, bounds: Rect, color: Color);
    fn image(&mut self, bounds: Rect, image: &I);
    fn text(&mut self, bounds: Rect, color: Color, style: FontStyle, text: &str);
    fn form(&mut self, bounds: Rect, color: Color, control_type: i16, id: &str, value: &str);
}

/// Paint operations for a document, in paint order.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────┐
/// │ Tile         │ Paint                                         │
/// ├──────────────┼───────────────────────────────────────────────┤
/// │ Block        │ Fill with the tile colour                     │
/// │ Image, found │ Image                                         │
/// │ Image, miss  │ Fill with the tile colour (counted fallback)  │
/// │ Text         │ Text with the style from the font table       │
/// │ Form         │ Form                                          │
/// └──────────────┴───────────────────────────────────────────────┘
/// ```
///
/// A missing image is not an error: image-tile addresses are lookup keys,
/// and servers routinely omit images the client did not ask for.
#[derive(Debug)]
pub struct DisplayList<'d, I> {
    pub surface: Surface,
    pub ops: Vec<Paint<'d, I>>,
    /// Image tiles painted as flat colour because their image was missing.
    pub fallbacks: usize,
    /// Tiles starting below the bottom of a clamped surface.
    pub culled: usize,
}

impl<'d, I> DisplayList<'d, I> {
    /// Resolve every tile of `doc` to a paint operation.
    ///
    /// # Errors
    ///
    /// [`DriverError::InvalidSurface`] if the page size is not positive.
    pub fn build(doc: &'d Document<I>, config: &DriverConfig) -> Result<Self, DriverError> {
        let surface = Surface::for_page(doc.header.page_size, config.max_surface_height)?;
        if surface.clamped {
            debug!(
                "{}: page height {} clamped to {}",
                doc.source, doc.header.page_size.1, surface.height
            );
        }

        // Only a clamped surface culls.
        #[allow(clippy::cast_precision_loss)]
        let bottom = if surface.clamped {
            surface.height as f32
        } else {
            f32::INFINITY
        };

        let mut list = Self {
            surface,
            ops: Vec::with_capacity(doc.tiles.len()),
            fallbacks: 0,
            culled: 0,
        };

        for tile in doc.tiles.iter().filter(|t| config.includes(t.kind())) {
            if tile.bounds.y >= bottom {
                list.culled += 1;
                continue;
            }

            let bounds = tile.bounds;
            let color = tile.color;
            let op = match &tile.content {
                TileContent::Block => Paint::Fill { bounds, color },
                TileContent::Image { address } => match doc.image(*address) {
                    Some(image) => Paint::Image { bounds, image },
                    None => {
                        warn!(
                            "{}: no image at {address:#x}, painting flat colour",
                            doc.source
                        );
                        list.fallbacks += 1;
                        Paint::Fill { bounds, color }
                    }
                },
                TileContent::Text { font_index, text } => Paint::Text {
                    bounds,
                    color,
                    style: config.font_table.resolve(*font_index),
                    text,
                },
                TileContent::Form {
                    control_type,
                    id,
                    value,
                } => Paint::Form {
                    bounds,
                    color,
                    control_type: *control_type,
                    id,
                    value,
                },
            };
            list.ops.push(op);
        }

        debug!(
            "{}: {} paint ops, {} fallbacks, {} culled",
            doc.source,
            list.ops.len(),
            list.fallbacks,
            list.culled
        );
        Ok(list)
    }

    /// Replay every operation onto `canvas`, in order.
    pub fn replay<C: Canvas<I>>(&self, canvas: &mut C) {
        for op in &self.ops {
            match op {
                Paint::Fill { bounds, color } => canvas.fill(*bounds, *color),
                Paint::Image { bounds, image } => canvas.image(*bounds, image),
                Paint::Text {
                    bounds,
                    color,
                    style,
                    text,
                } => canvas.text(*bounds, *color, *style, text),
                Paint::Form {
                    bounds,
                    color,
                    control_type,
                    id,
                    value,
                } => canvas.form(*bounds, *color, *control_type, id, value),
            }
        }
    }
}
