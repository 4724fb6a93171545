//! Fingerprint-and-publish pipeline.
//!
//! Pipeline phases:
//! - **Reset** - destructive reset of the output root
//! - **Bundle** - fingerprint and copy the compiled bundle
//! - **Templates** - fingerprint and copy template files
//! - **Render** - substitute the manifest into the entry point
//!
//! Each phase completes fully before the next begins; there is no overlap
//! between directory mutation and file reads, and no internal retries. A
//! failed run may leave the output root absent, empty, or partial - the
//! next successful run heals it because the reset is unconditional.
//! Concurrent publishes of the same output root are unsupported; callers
//! must serialize them.

mod manifest;
mod output;
mod render;
mod scan;


pub use manifest::Manifest;
pub use output::BUNDLE_KEY;
pub use scan::{TemplateAsset, scan_template_assets};

use anyhow::Result;

use crate::config::PublishConfig;
use crate::logger::ProgressLine;

/// Run the full publish pipeline for one environment root.
///
/// Returns the completed manifest: one entry for the bundle plus one per
/// published template file.
pub fn publish(config: &PublishConfig) -> Result<Manifest> {
    let output_root = config.output_root();
    let mut manifest = Manifest::new();

    output::reset_output_root(&output_root)?;

    output::publish_bundle(&config.bundle_path(), &output_root, &mut manifest)?;

    let template_dir = config.template_dir();
    let assets = scan::scan_template_assets(&template_dir, config.entry_point())?;

    let progress =
        (!assets.is_empty()).then(|| ProgressLine::new(&[("assets", assets.len())]));
    output::publish_template_assets(&assets, &output_root, &mut manifest, progress.as_ref())?;
    if let Some(p) = progress {
        p.finish();
    }

    render::render_entry_point(
        &template_dir.join(config.entry_point()),
        &manifest,
        &output_root.join(config.entry_point()),
    )?;

    Ok(manifest)
}
