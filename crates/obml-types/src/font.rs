use std::collections::BTreeMap;

/// Size and weight for one font index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FontStyle {
    /// Pixel size.
    pub size: u32,
    pub bold: bool,
}

impl FontStyle {
    #[must_use]
    pub const fn regular(size: u32) -> Self {
        Self { size, bold: false }
    }

    #[must_use]
    pub const fn bold(size: u32) -> Self {
        Self { size, bold: true }
    }
}

/// Maps the `font_index` byte of text tiles to a concrete style.
///
/// The table is owned by whoever renders a document; the decoder never
/// consults it. The defaults match the sizes the server lays text out for:
///
/// ```text
/// ┌───────┬──────┬─────────┐
/// │ Index │ Size │ Weight  │
/// ├───────┼──────┼─────────┤
/// │ 2     │ 14   │ regular │  medium
/// │ 3     │ 14   │ bold    │  medium bold
/// │ 4     │ 20   │ regular │  large
/// │ 5     │ 20   │ bold    │  large bold
/// │ 6     │ 12   │ regular │  small
/// └───────┴──────┴─────────┘
/// ```
///
/// Indices outside the table resolve to [`FontTable::fallback`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontTable {
    styles: BTreeMap<i8, FontStyle>,
    fallback: FontStyle,
}

impl Default for FontTable {
    fn default() -> Self {
        let styles = BTreeMap::from([
            (2, FontStyle::regular(14)),
            (3, FontStyle::bold(14)),
            (4, FontStyle::regular(20)),
            (5, FontStyle::bold(20)),
            (6, FontStyle::regular(12)),
        ]);
        Self {
            styles,
            fallback: FontStyle::regular(14),
        }
    }
}

impl FontTable {
    /// An empty table: everything resolves to `fallback`.
    #[must_use]
    pub fn empty(fallback: FontStyle) -> Self {
        Self {
            styles: BTreeMap::new(),
            fallback,
        }
    }

    #[must_use]
    pub fn resolve(&self, index: i8) -> FontStyle {
        self.styles.get(&index).copied().unwrap_or(self.fallback)
    }

    #[must_use]
    pub fn contains(&self, index: i8) -> bool {
        self.styles.contains_key(&index)
    }

    /// Override one entry.
    pub fn set(&mut self, index: i8, style: FontStyle) {
        self.styles.insert(index, style);
    }

    /// Scale every size (including the fallback) by `factor`, rounding to
    /// the nearest pixel and never going below 1.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |s: FontStyle| FontStyle {
            size: scale_size(s.size, factor),
            bold: s.bold,
        };
        Self {
            styles: self.styles.iter().map(|(&i, &s)| (i, scale(s))).collect(),
            fallback: scale(self.fallback),
        }
    }

    #[must_use]
    pub fn fallback(&self) -> FontStyle {
        self.fallback
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale_size(size: u32, factor: f32) -> u32 {
    ((size as f32 * factor).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sizes() {
        let table = FontTable::default();
        assert_eq!(table.resolve(2), FontStyle::regular(14));
        assert_eq!(table.resolve(3), FontStyle::bold(14));
        assert_eq!(table.resolve(5), FontStyle::bold(20));
        assert_eq!(table.resolve(6), FontStyle::regular(12));
    }

    #[test]
    fn unknown_index_uses_fallback() {
        let table = FontTable::default();
        assert!(!table.contains(-1));
        assert_eq!(table.resolve(-1), table.fallback());
    }

    #[test]
    fn override_entry() {
        let mut table = FontTable::default();
        table.set(2, FontStyle::regular(16));
        assert_eq!(table.resolve(2).size, 16);
    }

    #[test]
    fn scaling_rounds_and_clamps() {
        let table = FontTable::default().scaled(1.5);
        assert_eq!(table.resolve(2).size, 21);
        assert_eq!(table.resolve(6).size, 18);

        let tiny = FontTable::default().scaled(0.01);
        assert_eq!(tiny.resolve(4).size, 1);
    }
}
