use obml_wire::Rect;

/// Navigation target of a [`Link`].
///
/// `kind` is the target type string from the wire (for example a scheme
/// hint); an empty `kind` marks a bookkeeping-only link with nothing to
/// navigate to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinkTarget {
    pub kind: String,
    pub href: String,
}

/// A hyperlink: one or more hit regions sharing a single target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Link {
    /// Hit regions in file order. Tested first to last.
    pub regions: Vec<Rect>,
    pub target: LinkTarget,
}

impl Link {
    /// Only links with a non-empty target type respond to the pointer.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.target.kind.is_empty()
    }

    /// Index of the first region containing the point.
    #[must_use]
    pub fn region_at(&self, x: f32, y: f32) -> Option<usize> {
        self.regions.iter().position(|r| r.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_kind_is_not_interactive() {
        let link = Link {
            regions: vec![Rect::new(0.0, 0.0, 5.0, 5.0)],
            target: LinkTarget {
                kind: String::new(),
                href: "http://example.com/".into(),
            },
        };
        assert!(!link.is_interactive());
    }

    #[test]
    fn first_containing_region_wins() {
        let link = Link {
            regions: vec![
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Rect::new(5.0, 5.0, 10.0, 10.0),
            ],
            target: LinkTarget::default(),
        };
        assert_eq!(link.region_at(7.0, 7.0), Some(0));
        assert_eq!(link.region_at(12.0, 12.0), Some(1));
        assert_eq!(link.region_at(30.0, 30.0), None);
    }
}
