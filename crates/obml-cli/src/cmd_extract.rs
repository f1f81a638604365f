/// Implementation of `obml extract-images`.
///
/// Writes each embedded image record to `<output>/<address>.<ext>`, where
/// `<address>` is the six-digit hex image-table key and `<ext>` is guessed
/// from the record's magic bytes. Records are written exactly as stored.
use std::fs;

use anyhow::{Context, Result};
use log::info;

use crate::ExtractArgs;

/// Run the `obml extract-images` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if an image
/// cannot be written.
pub fn run(args: &ExtractArgs) -> Result<()> {
    let doc = crate::load_strict(&args.file)?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;

    let mut total = 0;
    for (address, image) in &doc.images {
        let path = args
            .output
            .join(format!("{address:06x}.{}", image.extension()));
        fs::write(&path, &image.bytes)
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!("wrote {} ({} bytes)", path.display(), image.len());
        total += image.len();
    }

    println!(
        "{} image{} ({total} bytes) written to {}",
        doc.images.len(),
        if doc.images.len() == 1 { "" } else { "s" },
        args.output.display()
    );
    Ok(())
}
