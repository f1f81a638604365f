/// Implementation of `obml links`.
///
/// # Output format
///
/// ```text
/// #0  http  "http://example.com/news"  1 region   [0,40 240x18]
/// #1  http  "/sport"                   2 regions  [0,60 120x18] [0,78 60x18]
/// ```
///
/// With `--at X,Y`:
///
/// ```text
/// #1 region 1: http "/sport"
/// ```
use anyhow::{Result, bail};
use obml_driver::link_at;
use obml_types::Rect;

use crate::LinksArgs;

/// Run the `obml links` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if `--at`
/// hits nothing.
pub fn run(args: &LinksArgs) -> Result<()> {
    let doc = crate::load_strict(&args.file)?;

    if let Some((x, y)) = args.at {
        let Some(hit) = link_at(&doc, x, y) else {
            bail!("no link at {x},{y}");
        };
        let index = doc
            .links
            .iter()
            .position(|l| std::ptr::eq(l, hit.link))
            .unwrap_or_default();
        println!(
            "#{index} region {}: {} {:?}",
            hit.region, hit.link.target.kind, hit.link.target.href
        );
        return Ok(());
    }

    let href_width = doc
        .links
        .iter()
        .map(|l| l.target.href.len() + 2)
        .max()
        .unwrap_or(0);

    for (i, link) in doc.links.iter().enumerate() {
        if !args.all && !link.is_interactive() {
            continue;
        }
        let kind = if link.target.kind.is_empty() {
            "-"
        } else {
            link.target.kind.as_str()
        };
        let href = format!("{:?}", link.target.href);
        let count = link.regions.len();
        let regions: Vec<_> = link.regions.iter().map(region).collect();
        let noun = if count == 1 { "region " } else { "regions" };
        println!(
            "#{i:<3} {kind:<5} {href:<href_width$}  {count} {noun}  {}",
            regions.join(" ")
        );
    }

    Ok(())
}

fn region(r: &Rect) -> String {
    format!("[{},{} {}x{}]", r.x, r.y, r.w, r.h)
}
