use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::config;

/// Download the locator-map SVG for every province, via the Commons file page.
pub async fn run(provinces: &[String], out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let client = reqwest::Client::builder()
        .timeout(config::http_timeout())
        .connect_timeout(config::connect_timeout())
        .build()
        .context("build http client")?;
    let link_pattern = internal_link_pattern()?;

    let mut failures = 0usize;
    for province in provinces {
        if let Err(e) = scrape_one(&client, &link_pattern, province, out_dir).await {
            warn!("failed to scrape {province}: {e:#}");
            failures += 1;
        }
    }

    if failures > 0 {
        warn!(failures, "finished with failures");
    } else {
        info!("downloaded {} locator maps", provinces.len());
    }
    Ok(())
}

async fn scrape_one(
    client: &reqwest::Client,
    link_pattern: &Regex,
    province: &str,
    out_dir: &Path,
) -> Result<()> {
    let page_url = config::locator_page_url(province);
    let page = fetch_text(client, &page_url, false).await?;
    let svg_url =
        original_file_url(link_pattern, &page).context("no original-file link on page")?;
    let svg = fetch_text(client, &svg_url, true).await?;

    let path = out_dir.join(format!("{}.svg", file_stem(province)));
    std::fs::write(&path, svg).with_context(|| format!("write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

async fn fetch_text(client: &reqwest::Client, url: &str, browser_agent: bool) -> Result<String> {
    let mut request = client.get(url);
    if browser_agent {
        request = request.header(reqwest::header::USER_AGENT, config::DOWNLOAD_USER_AGENT);
    }
    let resp = request
        .send()
        .await
        .with_context(|| format!("request {url}"))?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .with_context(|| format!("read response body from {url}"))?;

    if !status.is_success() {
        let preview: String = text.chars().take(200).collect();
        anyhow::bail!("status {status}; body preview: {preview}");
    }
    Ok(text)
}

fn internal_link_pattern() -> Result<Regex> {
    Regex::new(r#"<a\b[^>]*class="internal"[^>]*href="([^"]+)""#).context("compile link pattern")
}

/// The original-file link on a Commons file page is the `internal`-classed
/// anchor; its href may be protocol-relative.
fn original_file_url(pattern: &Regex, page: &str) -> Option<String> {
    let href = pattern.captures(page)?.get(1)?.as_str();
    if let Some(rest) = href.strip_prefix("//") {
        Some(format!("https://{rest}"))
    } else {
        Some(href.to_string())
    }
}

/// Output file stem for a province: the name with whitespace removed, so
/// "Inner Mongolia" becomes `InnerMongolia.svg`.
pub(crate) fn file_stem(province: &str) -> String {
    province.chars().filter(|c| !c.is_whitespace()).collect()
}
