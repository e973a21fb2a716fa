use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::CLEANED_SUFFIX;
use crate::scrape::file_stem;

/// Copy rasterized `<name>_cleaned.png` layers to the `<name>.png` filenames
/// the client loads.
pub fn run(provinces: &[String], dir: &Path) -> Result<()> {
    let mut renamed = 0usize;
    for province in provinces {
        let stem = file_stem(province);
        let src = dir.join(format!("{stem}{CLEANED_SUFFIX}.png"));
        let dst = dir.join(format!("{stem}.png"));

        if !src.exists() {
            warn!("skipping {}: not found", src.display());
            continue;
        }
        std::fs::copy(&src, &dst)
            .with_context(|| format!("copy {} to {}", src.display(), dst.display()))?;
        renamed += 1;
    }

    info!(renamed, "rename complete");
    Ok(())
}
