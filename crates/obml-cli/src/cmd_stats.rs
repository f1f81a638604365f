/// Implementation of `obml stats`.
///
/// # Output format
///
/// ```text
/// File:     page.obml (24310 bytes)
/// Content:  24310 bytes declared, 0 trailing
/// Page:     OBML v6, 240x1800
///
/// Tiles:    41
///   block   12
///   image    3  (0 missing)
///   text    25
///   form     1
///
/// Links:    12 (9 interactive, 15 regions)
/// Images:   3 (18902 bytes: 2 jpeg, 1 png)
/// ```
use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use obml_types::TileKind;

use crate::StatsArgs;

/// Run the `obml stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn run(args: &StatsArgs) -> Result<()> {
    let file_len = fs::metadata(&args.file)
        .with_context(|| format!("cannot stat {}", args.file.display()))?
        .len();
    let doc = crate::load_strict(&args.file)?;
    let h = &doc.header;

    let declared = u64::from(h.content_length);
    println!("File:     {} ({file_len} bytes)", doc.source);
    println!(
        "Content:  {declared} bytes declared, {} trailing",
        file_len.saturating_sub(declared)
    );
    println!("Page:     OBML v{}, {}x{}", h.version, h.page_size.0, h.page_size.1);
    println!();

    let counts = doc.tile_counts();
    println!("Tiles:    {}", doc.tiles.len());
    for kind in TileKind::ALL {
        let n = counts.get(&kind).copied().unwrap_or(0);
        if kind == TileKind::Image {
            let missing = doc.unresolved_images().count();
            println!("  {:<6} {n:>4}  ({missing} missing)", kind.name());
        } else {
            println!("  {:<6} {n:>4}", kind.name());
        }
    }
    println!();

    let regions: usize = doc.links.iter().map(|l| l.regions.len()).sum();
    println!(
        "Links:    {} ({} interactive, {regions} regions)",
        doc.links.len(),
        doc.interactive_links().count()
    );

    let mut formats: BTreeMap<&str, usize> = BTreeMap::new();
    let mut image_bytes = 0;
    for image in doc.images.values() {
        *formats.entry(image.extension()).or_insert(0) += 1;
        image_bytes += image.len();
    }
    let formats: Vec<_> = formats.iter().map(|(ext, n)| format!("{n} {ext}")).collect();
    if formats.is_empty() {
        println!("Images:   0");
    } else {
        println!(
            "Images:   {} ({image_bytes} bytes: {})",
            doc.images.len(),
            formats.join(", ")
        );
    }

    Ok(())
}
