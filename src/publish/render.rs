//! Entry-point rendering: placeholder substitution and final write.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::manifest::Manifest;

/// Replace every `{{logical-name}}` token with its fingerprinted filename.
///
/// Literal substring replacement, longest logical name first; not a
/// templating language. Tokens whose name is absent from the manifest are
/// left untouched.
pub fn substitute_placeholders(template: &str, manifest: &Manifest) -> String {
    let mut rendered = template.to_string();
    for (logical, fingerprinted) in manifest.substitution_order() {
        let token = format!("{{{{{logical}}}}}");
        rendered = rendered.replace(&token, fingerprinted);
    }
    rendered
}

/// Render the entry-point template and write it into the output root.
///
/// The entry point keeps its fixed filename so it stays reachable at a
/// stable URL; only its references to other assets change across runs.
pub fn render_entry_point(template: &Path, manifest: &Manifest, output: &Path) -> Result<()> {
    let content = fs::read_to_string(template)
        .with_context(|| format!("Failed to read entry point: {}", template.display()))?;

    let rendered = substitute_placeholders(&content, manifest);

    fs::write(output, rendered)
        .with_context(|| format!("Failed to write entry point: {}", output.display()))?;
    Ok(())
}
