use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::config::{CLEANED_SUFFIX, DECORATIVE_CLASSES};
use crate::scrape::file_stem;

// Elements the decorative classes appear on in the Commons locator maps.
const PAIRED_TAGS: &[&str] = &["g", "path", "polygon", "polyline", "rect", "circle"];

/// Strip decorative layers from each province SVG, writing
/// `<name>_cleaned.svg` next to the input.
pub fn run(provinces: &[String], dir: &Path) -> Result<()> {
    let patterns = ClassPatterns::compile()?;

    let mut cleaned = 0usize;
    for province in provinces {
        let stem = file_stem(province);
        let path = dir.join(format!("{stem}.svg"));
        let svg = match std::fs::read_to_string(&path) {
            Ok(svg) => svg,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let stripped = patterns.strip(&svg);
        let out_path = dir.join(format!("{stem}{CLEANED_SUFFIX}.svg"));
        std::fs::write(&out_path, stripped)
            .with_context(|| format!("write {}", out_path.display()))?;
        cleaned += 1;
    }

    info!(cleaned, "clean complete");
    Ok(())
}

struct ClassPatterns {
    self_closing: Vec<Regex>,
    paired: Vec<Regex>,
}

impl ClassPatterns {
    fn compile() -> Result<Self> {
        let mut self_closing = Vec::new();
        let mut paired = Vec::new();
        for class in DECORATIVE_CLASSES {
            let class = regex::escape(class);
            self_closing.push(
                Regex::new(&format!(
                    r#"(?s)<[A-Za-z][^>]*class="[^"]*\b{class}\b[^"]*"[^>]*/>\s*"#
                ))
                .context("compile self-closing pattern")?,
            );
            // The decorative groups in these assets do not nest elements of
            // their own tag, so a non-greedy match to the closing tag is safe.
            for tag in PAIRED_TAGS {
                paired.push(
                    Regex::new(&format!(
                        r#"(?s)<{tag}\b[^>]*class="[^"]*\b{class}\b[^"]*"[^>]*>.*?</{tag}>\s*"#
                    ))
                    .context("compile paired pattern")?,
                );
            }
        }
        Ok(Self {
            self_closing,
            paired,
        })
    }

    fn strip(&self, svg: &str) -> String {
        let mut out = svg.to_string();
        for pattern in self.self_closing.iter().chain(&self.paired) {
            out = pattern.replace_all(&out, "").into_owned();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::ClassPatterns;

    #[test]
    fn removes_self_closing_decorative_elements() {
        let patterns = ClassPatterns::compile().expect("patterns should compile");
        let svg = r#"<svg><path class="river1" d="M0 0"/><path class="province" d="M1 1"/></svg>"#;

        let stripped = patterns.strip(svg);
        assert!(!stripped.contains("river1"));
        assert!(stripped.contains(r#"class="province""#));
    }

    #[test]
    fn removes_paired_decorative_groups_with_children() {
        let patterns = ClassPatterns::compile().expect("patterns should compile");
        let svg = concat!(
            r#"<svg><g class="ocean"><path d="M0 0"/><path d="M1 1"/></g>"#,
            r#"<g class="borders"><path d="M2 2"/></g></svg>"#,
        );

        let stripped = patterns.strip(svg);
        assert!(!stripped.contains("ocean"));
        assert!(stripped.contains(r#"class="borders""#));
    }

    #[test]
    fn strips_every_configured_class() {
        let patterns = ClassPatterns::compile().expect("patterns should compile");
        let svg = concat!(
            r#"<svg><path class="otherCountries" d="M0 0"/>"#,
            r#"<path class="river1" d="M0 0"/><path class="river2" d="M0 0"/>"#,
            r#"<path class="river3" d="M0 0"/><rect class="lake" width="1"/>"#,
            r#"<g class="ocean"><path d="M0 0"/></g><path class="keep" d="M9 9"/></svg>"#,
        );

        let stripped = patterns.strip(svg);
        for class in super::DECORATIVE_CLASSES {
            assert!(!stripped.contains(class), "{class} should be stripped");
        }
        assert!(stripped.contains(r#"class="keep""#));
    }

    #[test]
    fn class_match_is_word_bounded() {
        let patterns = ClassPatterns::compile().expect("patterns should compile");
        let svg = r#"<svg><path class="lakeshore" d="M0 0"/></svg>"#;

        assert_eq!(patterns.strip(svg), svg);
    }

    #[test]
    fn multi_class_attributes_still_match() {
        let patterns = ClassPatterns::compile().expect("patterns should compile");
        let svg = r#"<svg><path class="thin river2 dashed" d="M0 0"/></svg>"#;

        assert!(!patterns.strip(svg).contains("river2"));
    }
}
