//! Output root lifecycle: destructive reset and fingerprinted copies.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::debug;
use crate::fingerprint::fingerprinted_name;
use crate::logger::ProgressLine;

use super::manifest::Manifest;
use super::scan::TemplateAsset;

/// Fixed manifest key for the compiled bundle.
///
/// The key never tracks the bundle's actual filename: wherever the
/// configured bundle lives, the entry point references it as
/// `{{bundle.js}}`.
pub const BUNDLE_KEY: &str = "bundle.js";

/// Reset the output root to an empty directory.
///
/// Removes any previous contents recursively; no output from an earlier
/// run survives, including files the publisher never wrote.
pub fn reset_output_root(output_root: &Path) -> Result<()> {
    if output_root.exists() {
        fs::remove_dir_all(output_root).with_context(|| {
            format!(
                "Failed to clear output directory: {}",
                output_root.display()
            )
        })?;
    }
    fs::create_dir_all(output_root).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_root.display()
        )
    })
}

/// Fingerprint a source file and copy it into the output root.
///
/// Returns the fingerprinted filename the copy was published under.
pub fn publish_asset(source: &Path, output_root: &Path) -> Result<String> {
    let name = fingerprinted_name(source)?;
    fs::copy(source, output_root.join(&name))
        .with_context(|| format!("Failed to copy {}", source.display()))?;
    Ok(name)
}

/// Publish the compiled bundle under the fixed `bundle.js` manifest key.
pub fn publish_bundle(bundle: &Path, output_root: &Path, manifest: &mut Manifest) -> Result<()> {
    if !bundle.is_file() {
        bail!("Bundle file not found: {}", bundle.display());
    }

    let name = publish_asset(bundle, output_root)?;
    debug!("publish"; "{} -> {}", BUNDLE_KEY, name);
    manifest.insert(BUNDLE_KEY, name);
    Ok(())
}

/// Publish scanned template files into the output root.
///
/// Each file is copied under its fingerprinted name and recorded in the
/// manifest under its original filename. Any copy failure aborts the run.
pub fn publish_template_assets(
    assets: &[TemplateAsset],
    output_root: &Path,
    manifest: &mut Manifest,
    progress: Option<&ProgressLine>,
) -> Result<()> {
    for asset in assets {
        let name = publish_asset(&asset.source, output_root)?;
        debug!("publish"; "{} -> {}", asset.logical, name);
        manifest.insert(asset.logical.clone(), name);
        if let Some(p) = progress {
            p.inc("assets");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reset_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("env/www-root");

        reset_output_root(&output).unwrap();
        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn test_reset_removes_previous_contents() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("www-root");
        fs::create_dir_all(output.join("nested")).unwrap();
        fs::write(output.join("old.txt"), "stale").unwrap();
        fs::write(output.join("nested/deep.txt"), "stale").unwrap();

        reset_output_root(&output).unwrap();
        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn test_publish_asset_copies_under_hashed_name() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("style.css");
        fs::write(&source, "body {}").unwrap();
        let output = dir.path().join("www-root");
        fs::create_dir_all(&output).unwrap();

        let name = publish_asset(&source, &output).unwrap();

        assert!(name.ends_with(".css"));
        assert_eq!(
            fs::read(output.join(&name)).unwrap(),
            fs::read(&source).unwrap()
        );
    }

    #[test]
    fn test_publish_bundle_missing_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("www-root");
        fs::create_dir_all(&output).unwrap();

        let mut manifest = Manifest::new();
        let err = publish_bundle(&dir.path().join("bundle.js"), &output, &mut manifest)
            .unwrap_err();
        assert!(err.to_string().contains("Bundle file not found"));
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_publish_bundle_records_fixed_key() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("app.min.js");
        fs::write(&bundle, "console.log(1)").unwrap();
        let output = dir.path().join("www-root");
        fs::create_dir_all(&output).unwrap();

        let mut manifest = Manifest::new();
        publish_bundle(&bundle, &output, &mut manifest).unwrap();

        // Keyed by the fixed logical name, not the source filename
        let name = manifest.get(BUNDLE_KEY).unwrap();
        assert!(manifest.get("app.min.js").is_none());
        assert!(output.join(name).is_file());
    }

    #[test]
    fn test_publish_template_assets_vanished_source_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("www-root");
        fs::create_dir_all(&output).unwrap();

        let assets = vec![TemplateAsset {
            source: dir.path().join("gone.css"),
            logical: "gone.css".to_string(),
        }];

        let mut manifest = Manifest::new();
        let err =
            publish_template_assets(&assets, &output, &mut manifest, None).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
