//! Site validation command.

mod report;
mod resolve;

use anyhow::Result;

use crate::cli::ValidateArgs;
use crate::config::{SiteConfig, ValidateLevel};
use crate::link::SiteLinkManager;
use crate::log;
use crate::pipeline::{collect_page_files, index_site, load_pages};
use crate::utils::{plural_count, plural_s};

use report::ValidationReport;
use resolve::SiteResolver;

/// Validate intra-site links
pub fn validate_site(config: &SiteConfig, args: &ValidateArgs) -> Result<()> {
    if !config.validate.intrasite.enable {
        log!("validate"; "no checks enabled");
        return Ok(());
    }

    let files = collect_page_files(&args.paths, config)?;
    if files.is_empty() {
        log!("validate"; "no page files found");
        return Ok(());
    }

    log!("validate"; "validating {}", plural_count(files.len(), "page"));

    let report = run(config, &files, args.dump_anchors);
    report.print();

    let count = report.error_count();
    if count > 0 {
        log!("validate"; "found {} broken link{}", count, plural_s(count));
    } else {
        log!("validate"; "all links valid");
    }

    eprintln!();
    log!("validate"; "{}", report);

    if report.has_errors() && config.validate.intrasite.level == ValidateLevel::Error {
        anyhow::bail!("validation failed");
    }
    Ok(())
}

/// Load, index and validate `files`, returning the findings.
fn run(config: &SiteConfig, files: &[std::path::PathBuf], dump_anchors: bool) -> ValidationReport {
    let mut pages = load_pages(files, config);

    let mut manager = SiteLinkManager::new(config.link_config());
    index_site(&mut pages, &mut manager, config);

    if dump_anchors {
        print!("{}", manager.dump_anchors());
    }

    let mut resolver = SiteResolver::new(config);
    manager.validate_all_intralinks(&mut resolver);
    resolver.into_report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use crate::utils::path::normalize_path;
    use std::fs;
    use std::path::PathBuf;

    fn args() -> ValidateArgs {
        ValidateArgs {
            paths: Vec::new(),
            intrasite: None,
            warn_only: false,
            dump_anchors: false,
        }
    }

    fn site(files: &[(&str, &str)]) -> (tempfile::TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let config = test_config_at(&normalize_path(dir.path()));
        (dir, config)
    }

    fn files(config: &SiteConfig) -> Vec<PathBuf> {
        collect_page_files(&[], config).unwrap()
    }

    #[test]
    fn test_valid_site() {
        let (_dir, config) = site(&[
            ("guide/x.md", "## Title\n\n[y](y.md) [self](#title) [top](../index.html#welcome)\n"),
            ("guide/y.md", "Y\n"),
            ("index.html", r#"<h1 id="welcome">Hi</h1><a href="guide/x.md#title">x</a>"#),
        ]);
        let report = run(&config, &files(&config), false);
        assert_eq!(report.error_count(), 0, "{:?}", report);
        assert!(validate_site(&config, &args()).is_ok());
    }

    #[test]
    fn test_broken_links_fail() {
        let (_dir, config) = site(&[
            ("a.md", "[b](b.md) [gone](gone.md) [bad](b.md#nope)\n"),
            ("b.md", "## Here\n"),
        ]);
        let report = run(&config, &files(&config), false);
        assert_eq!(report.link_error_count(), 1);
        assert_eq!(report.anchor_error_count(), 1);
        assert!(validate_site(&config, &args()).is_err());
    }

    #[test]
    fn test_anchor_in_included_content() {
        let (_dir, config) = site(&[
            ("page.html", r##"<include src="parts/setup.md"></include><a href="#install">i</a>"##),
            ("parts/setup.md", "## Install\n"),
        ]);
        let report = run(&config, &[normalize_path(&config.root.join("page.html"))], false);
        assert_eq!(report.error_count(), 0, "{:?}", report);
    }

    #[test]
    fn test_rooted_links_in_content_subdirectory() {
        let (_dir, mut config) = site(&[
            ("docs/a.md", "[b](/b.md) [c](/guide/c.html#setup) [logo](/img/logo.png)\n"),
            ("docs/b.md", "## B\n"),
            ("docs/guide/c.html", r#"<include src="/parts/setup.md"></include>"#),
            ("docs/parts/setup.md", "## Setup\n"),
            ("docs/img/logo.png", ""),
        ]);
        config.build.content = normalize_path(&config.root.join("docs"));

        let report = run(&config, &files(&config), false);
        assert_eq!(report.error_count(), 0, "{:?}", report);
        assert_eq!(report.warning_count(), 0, "{:?}", report);
    }

    #[test]
    fn test_opt_out_and_external_links_ignored() {
        let (_dir, config) = site(&[(
            "a.html",
            r#"<a href="gone.md" no-validation>x</a><a href="https://example.com/gone">y</a>"#,
        )]);
        let report = run(&config, &files(&config), false);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_warn_level_passes() {
        let (_dir, mut config) = site(&[("a.md", "[gone](gone.md)\n")]);
        config.validate.intrasite.level = ValidateLevel::Warn;
        assert!(validate_site(&config, &args()).is_ok());
    }

    #[test]
    fn test_disabled_skips_everything() {
        let (_dir, mut config) = site(&[("a.md", "[gone](gone.md)\n")]);
        config.validate.intrasite.enable = false;
        assert!(validate_site(&config, &args()).is_ok());
    }
}
