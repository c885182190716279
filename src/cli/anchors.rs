//! Anchor index dump command.

use anyhow::{Context, Result};

use crate::cli::AnchorsArgs;
use crate::config::SiteConfig;
use crate::link::SiteLinkManager;
use crate::log;
use crate::pipeline::{collect_page_files, index_site, load_pages};
use crate::utils::plural_count;

/// Print the anchors of every page, as text or JSON.
pub fn dump_anchors(config: &SiteConfig, args: &AnchorsArgs) -> Result<()> {
    let files = collect_page_files(&args.paths, config)?;
    if files.is_empty() {
        log!("anchors"; "no page files found");
        return Ok(());
    }

    let manager = index(config, &files);
    print!("{}", render(&manager, args.json)?);

    log!(
        "anchors";
        "{} on {}",
        plural_count(manager.anchors().anchor_count(), "anchor"),
        plural_count(manager.anchors().page_count(), "page")
    );
    Ok(())
}

fn index(config: &SiteConfig, files: &[std::path::PathBuf]) -> SiteLinkManager {
    let mut pages = load_pages(files, config);
    let mut manager = SiteLinkManager::new(config.link_config());
    index_site(&mut pages, &mut manager, config);
    manager
}

/// Text dump, or a JSON object of page path -> sorted anchor list.
fn render(manager: &SiteLinkManager, json: bool) -> Result<String> {
    if !json {
        return Ok(manager.dump_anchors());
    }
    let mut out = serde_json::to_string_pretty(&manager.anchors().sorted())
        .context("Failed to serialize anchor index")?;
    out.push('\n');
    Ok(out)
}
