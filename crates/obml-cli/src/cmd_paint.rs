/// Implementation of `obml paint`.
///
/// Builds the display list a renderer would receive and prints one line
/// per paint operation, followed by a summary.
///
/// # Output format
///
/// ```text
/// surface 240x1800
/// fill   0,0 240x1800 #ffffffff
/// image  4,30 232x120 (18231 bytes jpeg)
/// fill   4,160 60x60 #c0c0c0ff
/// text   4,230 232x16 #000000ff 14px "Read more"
/// ---
/// 4 ops, 1 image fallback, 0 culled
/// ```
use anyhow::Result;
use obml_driver::{Canvas, DescribeImage, DisplayList, DriverConfig};
use obml_types::{Color, EmbeddedImage, FontStyle, FontTable, Rect};

use crate::PaintArgs;

/// Prints each paint call as a line of text.
struct TextCanvas;

impl Canvas<EmbeddedImage> for TextCanvas {
    fn fill(&mut self, bounds: Rect, color: Color) {
        println!("fill   {} {color}", rect(bounds));
    }

    fn image(&mut self, bounds: Rect, image: &EmbeddedImage) {
        println!("image  {} ({})", rect(bounds), image.describe());
    }

    fn text(&mut self, bounds: Rect, color: Color, style: FontStyle, text: &str) {
        let weight = if style.bold { " bold" } else { "" };
        println!(
            "text   {} {color} {}px{weight} {text:?}",
            rect(bounds),
            style.size
        );
    }

    fn form(&mut self, bounds: Rect, color: Color, control_type: i16, id: &str, value: &str) {
        println!(
            "form   {} {color} type {control_type} {id:?}={value:?}",
            rect(bounds)
        );
    }
}

/// Run the `obml paint` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if its page
/// size cannot back a surface.
pub fn run(args: &PaintArgs) -> Result<()> {
    let doc = crate::load_strict(&args.file)?;

    let config = DriverConfig {
        font_table: FontTable::default().scaled(args.font_scale),
        max_surface_height: args.max_height,
        include: args.include.clone(),
    };
    let list = DisplayList::build(&doc, &config)?;

    let clamped = if list.surface.clamped {
        format!(" (page height {})", doc.header.page_size.1)
    } else {
        String::new()
    };
    println!(
        "surface {}x{}{clamped}",
        list.surface.width, list.surface.height
    );
    list.replay(&mut TextCanvas);

    println!("---");
    println!(
        "{} ops, {} image fallback{}, {} culled",
        list.ops.len(),
        list.fallbacks,
        if list.fallbacks == 1 { "" } else { "s" },
        list.culled
    );
    Ok(())
}

fn rect(r: Rect) -> String {
    format!("{},{} {}x{}", r.x, r.y, r.w, r.h)
}
