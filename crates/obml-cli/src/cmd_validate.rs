/// Implementation of `obml validate`.
///
/// Runs a full decode and reports one line per decode stage: `✓` for
/// stages that completed, `✗` for the one that failed.
///
/// # Success output
///
/// ```text
/// ✓ Header: OBML v6, 240x1800, "Front page"
/// ✓ Links: 12 links (9 interactive)
/// ✓ Content: 41 tiles, 3 images
/// ✓ Images: all 3 image tiles resolved
/// ```
///
/// Image tiles without an image are reported with `!` but do not fail
/// validation; a viewer paints them as flat colour.
///
/// # Failure output
///
/// ```text
/// ✓ Header: OBML v6, 240x1800, "Front page"
/// ✗ Links: unknown link record tag 0x3f at offset 212
/// ```
use anyhow::{Result, anyhow};
use obml_decoder::{DecoderConfig, PartialDecode, Stage};
use obml_types::Document;

use crate::ValidateArgs;

/// Run the `obml validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    if args.decode_images {
        return run_raster(args);
    }

    match crate::load_with(&args.file, DecoderConfig::default()) {
        Ok(doc) => {
            report_ok(&doc);
            Ok(())
        }
        Err(partial) => {
            report_failure(&partial);
            Err(anyhow!("validation failed"))
        }
    }
}

#[cfg(feature = "raster")]
fn run_raster(args: &ValidateArgs) -> Result<()> {
    use obml_decoder::{ObmlDecoder, RasterCodec};

    let decoder = ObmlDecoder::new(DecoderConfig::default()).with_codec(RasterCodec);
    match decoder.parse_file(&args.file) {
        Ok(doc) => {
            report_ok(&doc);
            let pixels: u64 = doc
                .images
                .values()
                .map(|img| u64::from(img.width()) * u64::from(img.height()))
                .sum();
            println!("✓ Pixels: {} images decoded, {pixels} pixels", doc.images.len());
            Ok(())
        }
        Err(partial) => {
            report_failure(&partial);
            Err(anyhow!("validation failed"))
        }
    }
}

#[cfg(not(feature = "raster"))]
fn run_raster(_args: &ValidateArgs) -> Result<()> {
    Err(anyhow!(
        "--decode-images needs obml built with the `raster` feature"
    ))
}

fn report_ok<I>(doc: &Document<I>) {
    println!("✓ {}", header_line(doc));
    println!("✓ {}", links_line(doc));
    println!("✓ {}", content_line(doc));

    let image_tiles = doc.tiles.iter().filter(|t| t.image_address().is_some()).count();
    let missing = doc.unresolved_images().count();
    if missing == 0 {
        println!(
            "✓ Images: all {image_tiles} image tile{} resolved",
            plural(image_tiles)
        );
    } else {
        println!(
            "! Images: {missing} of {image_tiles} image tiles have no image (painted as flat colour)"
        );
    }
}

fn report_failure<I>(partial: &PartialDecode<I>) {
    let doc = &partial.document;

    if partial.stage > Stage::Header {
        println!("✓ {}", header_line(doc));
    }
    if partial.stage > Stage::Links {
        println!("✓ {}", links_line(doc));
    }

    let label = match partial.stage {
        Stage::Source => "Source",
        Stage::Header => "Header",
        Stage::Metadata => "Metadata",
        Stage::Links => "Links",
        Stage::Content => "Content",
    };
    println!("✗ {label}: {}", partial.error);

    if partial.stage == Stage::Content && !doc.tiles.is_empty() {
        println!("  ({} tiles decoded before the error)", doc.tiles.len());
    }
}

fn header_line<I>(doc: &Document<I>) -> String {
    let h = &doc.header;
    format!(
        "Header: OBML v{}, {}x{}, {:?}",
        h.version, h.page_size.0, h.page_size.1, h.title
    )
}

fn links_line<I>(doc: &Document<I>) -> String {
    let total = doc.links.len();
    format!(
        "Links: {total} link{} ({} interactive)",
        plural(total),
        doc.interactive_links().count()
    )
}

fn content_line<I>(doc: &Document<I>) -> String {
    let tiles = doc.tiles.len();
    let images = doc.images.len();
    format!(
        "Content: {tiles} tile{}, {images} image{}",
        plural(tiles),
        plural(images)
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
