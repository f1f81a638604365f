use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::WireError;

/// A position or size component pair.
///
/// On the wire a coordinate is a signed `short` (x) followed by a `medium`
/// (y). Page heights routinely exceed 65535 pixels, which is why the y axis
/// gets the wider field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coord {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle: a position coordinate followed by a size
/// coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn from_coords(position: Coord, size: Coord) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Half-open containment: the left and top edges are inside, the
    /// right and bottom edges are not.
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.w && py < self.y + self.h
    }
}

/// 8-bit RGBA colour.
///
/// The wire order is `[A, R, G, B]`; [`ByteCursor::read_color`] performs
/// the reordering so nothing downstream sees the alpha-first layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(0xFF, 0xFF, 0xFF, 0xFF);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed `0xRRGGBBAA`.
    #[must_use]
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.to_u32())
    }
}

impl ByteCursor<'_> {
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 5 bytes remain.
    // A medium never exceeds 2^24, so the f32 conversion is exact.
    #[allow(clippy::cast_precision_loss)]
    pub fn read_coord(&mut self) -> Result<Coord, WireError> {
        let x = self.read_i16()?;
        let y = self.read_u24()?;
        Ok(Coord {
            x: f32::from(x),
            y: y as f32,
        })
    }

    /// Two coordinates: position, then size.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 10 bytes remain.
    pub fn read_rect(&mut self) -> Result<Rect, WireError> {
        let position = self.read_coord()?;
        let size = self.read_coord()?;
        Ok(Rect::from_coords(position, size))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_color(&mut self) -> Result<Color, WireError> {
        let raw = self.read_bytes(4)?;
        Ok(Color::rgba(raw[1], raw[2], raw[3], raw[0]))
    }

    /// `u16` length followed by that many bytes, decoded as UTF-8.
    ///
    /// Invalid sequences are replaced rather than rejected; page text is
    /// produced by a server-side transcoder and is not always clean.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the prefix or the bytes are truncated.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        let bytes = self.read_blob()?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// A URL field.
    ///
    /// Same as [`read_string`](Self::read_string) except for one quirk:
    /// when the first byte after the length is NUL, the length counts that
    /// NUL. It is consumed and only `length - 1` bytes follow. Any other
    /// first byte belongs to the URL.
    ///
    /// ```text
    ///   00 05 41 42 43 44 45      → "ABCDE"
    ///   00 05 00 41 42 43 44      → "ABCD"
    /// ```
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the prefix or the bytes are truncated.
    pub fn read_url(&mut self) -> Result<String, WireError> {
        let mut len = usize::from(self.read_u16()?);
        if len == 0 {
            return Ok(String::new());
        }
        if self.peek_u8()? == 0 {
            self.skip(1)?;
            len -= 1;
        }
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_alpha_first_on_the_wire() {
        let mut cur = ByteCursor::new(&[0x80, 0x10, 0x20, 0x30]);
        let c = cur.read_color().unwrap();
        assert_eq!(c, Color::rgba(0x10, 0x20, 0x30, 0x80));
        assert_eq!(c.to_string(), "#10203080");
    }

    #[test]
    fn coordinate_short_then_medium() {
        let mut cur = ByteCursor::new(&[0x01, 0x40, 0x01, 0x00, 0x00]);
        let c = cur.read_coord().unwrap();
        assert_eq!(c, Coord { x: 320.0, y: 65536.0 });
    }

    #[test]
    fn coordinate_x_is_signed() {
        let mut cur = ByteCursor::new(&[0xFF, 0xF6, 0x00, 0x00, 0x0A]);
        let c = cur.read_coord().unwrap();
        assert_eq!(c, Coord { x: -10.0, y: 10.0 });
    }

    #[test]
    fn rect_is_position_then_size() {
        let buf = [
            0x00, 0x0A, 0x00, 0x00, 0x14, // (10, 20)
            0x00, 0x64, 0x00, 0x00, 0x32, // (100, 50)
        ];
        let mut cur = ByteCursor::new(&buf);
        assert_eq!(cur.read_rect().unwrap(), Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn string_with_zero_length_is_empty() {
        let mut cur = ByteCursor::new(&[0x00, 0x00, 0x99]);
        assert_eq!(cur.read_string().unwrap(), "");
        assert_eq!(cur.tell(), 2);
    }

    #[test]
    fn string_keeps_embedded_nul() {
        let mut cur = ByteCursor::new(&[0x00, 0x03, b'a', 0x00, b'b']);
        assert_eq!(cur.read_string().unwrap(), "a\0b");
    }

    #[test]
    fn url_without_leading_nul_reads_full_length() {
        let mut cur = ByteCursor::new(&[0x00, 0x05, b'A', b'B', b'C', b'D', b'E']);
        assert_eq!(cur.read_url().unwrap(), "ABCDE");
        assert!(cur.is_eof());
    }

    #[test]
    fn url_with_leading_nul_counts_it() {
        let mut cur = ByteCursor::new(&[0x00, 0x05, 0x00, b'A', b'B', b'C', b'D', 0x7F]);
        assert_eq!(cur.read_url().unwrap(), "ABCD");
        assert_eq!(cur.read_u8().unwrap(), 0x7F);
    }

    #[test]
    fn url_with_zero_length_does_not_peek() {
        let mut cur = ByteCursor::new(&[0x00, 0x00, 0x00]);
        assert_eq!(cur.read_url().unwrap(), "");
        assert_eq!(cur.tell(), 2);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut cur = ByteCursor::new(&[0x00, 0x02, 0xC3, 0x28]);
        assert_eq!(cur.read_string().unwrap(), "\u{FFFD}(");
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(9.9, 9.9));
        assert!(!r.contains(10.0, 5.0));
        assert!(!r.contains(-0.1, 5.0));
    }
}
