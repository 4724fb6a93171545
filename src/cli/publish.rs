//! Publish command wiring.

use anyhow::Result;

use crate::config::PublishConfig;
use crate::log;
use crate::publish;
use crate::utils::plural_count;

/// Run the full fingerprint-and-publish pipeline and report the result.
pub fn publish_site(config: &PublishConfig) -> Result<()> {
    let manifest = publish::publish(config)?;

    log!(
        "publish";
        "{} published to {}",
        plural_count(manifest.len(), "asset"),
        config.output_root().display()
    );

    Ok(())
}
