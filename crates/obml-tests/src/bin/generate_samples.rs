//! Writes the sample pages from `obml_tests::samples` to disk, for trying
//! the `obml` tool by hand or seeding the fuzzers.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_samples -p obml-tests -- [OUTPUT_DIR]
//! ```
//!
//! `OUTPUT_DIR` defaults to `samples/` under this crate. Each sample is
//! written as `<name>.obml`; existing files are overwritten.

#![allow(clippy::pedantic)]

use std::path::PathBuf;

use obml_tests::samples;

fn main() {
    let out_dir = std::env::args_os().nth(1).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples"),
        PathBuf::from,
    );
    std::fs::create_dir_all(&out_dir).expect("create output directory");

    for (name, bytes) in samples::all() {
        let path = out_dir.join(format!("{name}.obml"));
        std::fs::write(&path, &bytes).expect("write sample");
        println!("  wrote {} ({} bytes)", path.display(), bytes.len());
    }

    println!("All samples written to {}", out_dir.display());
}
