use obml_types::{Document, Link};

/// The link under a point, and which of its regions was hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkHit<'d> {
    pub link: &'d Link,
    pub region: usize,
}

/// Find the link under page coordinates `(x, y)`.
///
/// Links are tested in file order and each link's regions in order; the
/// first region containing the point wins. Links without a target type are
/// never hit.
#[must_use]
pub fn link_at<I>(doc: &Document<I>, x: f32, y: f32) -> Option<LinkHit<'_>> {
    doc.interactive_links().find_map(|link| {
        link.region_at(x, y)
            .map(|region| LinkHit { link, region })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use obml_types::{LinkTarget, Rect, SourceId};

    fn link(kind: &str, href: &str, regions: Vec<Rect>) -> Link {
        Link {
            regions,
            target: LinkTarget {
                kind: kind.into(),
                href: href.into(),
            },
        }
    }

    fn doc(links: Vec<Link>) -> Document {
        let mut doc = Document::new(SourceId::memory());
        doc.links = links;
        doc
    }

    #[test]
    fn first_link_in_file_order_wins() {
        let doc = doc(vec![
            link("http", "/a", vec![Rect::new(0.0, 0.0, 50.0, 50.0)]),
            link("http", "/b", vec![Rect::new(0.0, 0.0, 100.0, 100.0)]),
        ]);
        let hit = link_at(&doc, 10.0, 10.0).unwrap();
        assert_eq!(hit.link.target.href, "/a");
        assert_eq!(link_at(&doc, 75.0, 75.0).unwrap().link.target.href, "/b");
    }

    #[test]
    fn region_index_is_reported() {
        let doc = doc(vec![link(
            "http",
            "/a",
            vec![
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Rect::new(0.0, 20.0, 10.0, 10.0),
            ],
        )]);
        assert_eq!(link_at(&doc, 5.0, 25.0).map(|h| h.region), Some(1));
        assert!(link_at(&doc, 5.0, 15.0).is_none());
    }

    #[test]
    fn links_without_kind_are_skipped() {
        let doc = doc(vec![
            link("", "/hidden", vec![Rect::new(0.0, 0.0, 100.0, 100.0)]),
            link("http", "/shown", vec![Rect::new(0.0, 0.0, 100.0, 100.0)]),
        ]);
        assert_eq!(link_at(&doc, 1.0, 1.0).unwrap().link.target.href, "/shown");
    }
}
