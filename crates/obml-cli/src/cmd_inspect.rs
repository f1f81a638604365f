/// Implementation of `obml inspect`.
///
/// Prints the driver's outline of the document (or JSON with `--json`).
/// When the decode fails part-way, whatever was decoded is printed first
/// and the error is returned afterwards, so a broken file still shows how
/// far the decoder got.
///
/// # Output format
///
/// ```text
/// source   page.obml
/// status   ok
/// version  6
/// size     240x1800
/// title    "Front page"
/// ...
/// tiles: 41
///   0  block 0,0 240x1800 #ffffffff
///   1  text  4,6 232x16 #000000ff font 5 (20 bold) "Headlines"
/// ```
///
/// With `--tile N` only that tile is printed, as its full debug form.
use anyhow::{Context, Result, anyhow};
use obml_driver::{DriverConfig, render_outline};

use crate::InspectArgs;

/// Run the `obml inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if `--tile`
/// is out of range.
pub fn run(args: &InspectArgs) -> Result<()> {
    let (doc, error) = match crate::load(&args.file) {
        Ok(doc) => (doc, None),
        Err(partial) => {
            let (doc, error) = partial.into_parts();
            (doc, Some(error))
        }
    };

    if let Some(index) = args.tile {
        let tile = doc
            .tiles
            .get(index)
            .ok_or_else(|| anyhow!("tile {index} out of range ({} tiles)", doc.tiles.len()))?;
        println!("{tile:#?}");
        if let Some(address) = tile.image_address() {
            match doc.image(address) {
                Some(image) => println!("image: {image:?}"),
                None => println!("image: missing"),
            }
        }
    } else if args.json {
        let json = serde_json::to_string_pretty(&doc).context("cannot serialise document")?;
        println!("{json}");
    } else {
        let config = DriverConfig {
            include: args.include.clone(),
            ..DriverConfig::default()
        };
        print!("{}", render_outline(&doc, &config));
    }

    match error {
        None => Ok(()),
        Some(e) => {
            Err(anyhow::Error::new(e)).with_context(|| format!("failed to decode {}", doc.source))
        }
    }
}
