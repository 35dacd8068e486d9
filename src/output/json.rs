use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::photo::PhotoRecord;

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    folder: String,
    photos: &'a [PhotoRecord],
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
}

/// Serialize a folder listing as pretty JSON
pub fn listing_json(folder: &Path, records: &[PhotoRecord]) -> Result<String> {
    let output = JsonOutput {
        meta: Meta {
            app: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        folder: folder.display().to_string(),
        photos: records,
    };
    serde_json::to_string_pretty(&output).context("failed to serialize listing to JSON")
}

/// Write a folder listing as JSON to `writer`
pub fn write_json(writer: &mut impl Write, folder: &Path, records: &[PhotoRecord]) -> Result<()> {
    let content = listing_json(folder, records)?;
    writeln!(writer, "{}", content).context("failed to write JSON listing")?;
    Ok(())
}
