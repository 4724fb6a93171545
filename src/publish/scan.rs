//! Template directory scanning (pure, no side effects).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// A template file selected for fingerprinted publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAsset {
    /// Source path of the file
    pub source: PathBuf,
    /// Logical name: the original filename, used as the manifest key and
    /// as the placeholder token in the entry point
    pub logical: String,
}

/// List the template files to publish.
///
/// Non-recursive: only direct entries of the template directory are
/// considered. Subdirectories are skipped, and so is the entry-point
/// file, which is rendered separately and never fingerprinted.
///
/// Results are sorted by logical name so the copy order (and any logging)
/// is stable across runs.
pub fn scan_template_assets(template_dir: &Path, entry_point: &str) -> Result<Vec<TemplateAsset>> {
    if !template_dir.is_dir() {
        bail!(
            "Template directory not found: {}",
            template_dir.display()
        );
    }

    let entries = std::fs::read_dir(template_dir).with_context(|| {
        format!(
            "Failed to list template directory: {}",
            template_dir.display()
        )
    })?;

    let mut assets = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!(
                "Failed to list template directory: {}",
                template_dir.display()
            )
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue; // subdirectories are not published
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
        else {
            bail!("Template filename is not valid UTF-8: {}", path.display());
        };

        if name == entry_point {
            continue;
        }

        assets.push(TemplateAsset {
            source: path,
            logical: name,
        });
    }

    assets.sort_by(|a, b| a.logical.cmp(&b.logical));
    Ok(assets)
}
