use obml_types::{FontTable, TileKind};

/// Configuration for turning a decoded document into paint operations.
///
/// ```text
/// ┌────────────────────┬─────────┬──────────────────────────────────────┐
/// │ Field              │ Default │ Purpose                              │
/// ├────────────────────┼─────────┼──────────────────────────────────────┤
/// │ font_table         │ 2..=6   │ font index → size and weight         │
/// │ max_surface_height │ 16384   │ surface height cap, in pixels        │
/// │ include            │ None    │ optional allowlist of tile kinds     │
/// └────────────────────┴─────────┴──────────────────────────────────────┘
/// ```
///
/// When `include` is `Some`, tiles of other kinds are skipped by both the
/// display list and the outline renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    pub font_table: FontTable,

    /// Pages are often taller than any texture a GPU will allocate.
    /// Surfaces are cut at this height and tiles starting below it are
    /// dropped.
    pub max_surface_height: u32,

    pub include: Option<Vec<TileKind>>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            font_table: FontTable::default(),
            max_surface_height: 16384,
            include: None,
        }
    }
}

impl DriverConfig {
    #[must_use]
    pub fn includes(&self, kind: TileKind) -> bool {
        self.include.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filter_includes_everything() {
        let config = DriverConfig::default();
        assert!(TileKind::ALL.into_iter().all(|k| config.includes(k)));
    }

    #[test]
    fn filter_is_an_allowlist() {
        let config = DriverConfig {
            include: Some(vec![TileKind::Text]),
            ..DriverConfig::default()
        };
        assert!(config.includes(TileKind::Text));
        assert!(!config.includes(TileKind::Image));
    }
}
