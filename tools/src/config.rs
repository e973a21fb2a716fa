use std::time::Duration;

pub const COMMONS_BASE_URL: &str = "https://commons.wikimedia.org/wiki";

/// Commons rejects the reqwest default agent on raw file downloads.
pub const DOWNLOAD_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

pub const CLEANED_SUFFIX: &str = "_cleaned";

/// Decorative element classes stripped from the Commons locator maps before
/// rasterization.
pub const DECORATIVE_CLASSES: &[&str] = &[
    "otherCountries",
    "river1",
    "river2",
    "river3",
    "lake",
    "ocean",
];

/// Commons file page for a province's locator map.
pub fn locator_page_url(province: &str) -> String {
    let slug = province.replace(' ', "_");
    format!("{COMMONS_BASE_URL}/File:{slug}_locator_map_(China).svg")
}

pub fn http_timeout() -> Duration {
    std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
}

pub fn connect_timeout() -> Duration {
    std::env::var("HTTP_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
}
