use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use topolect_shared::{FeatureDetailMap, parse_details};

const DETAILS_URL: &str = "/feature_details.json";

/// Fetch the feature metadata lookup. A missing or malformed file is logged
/// and replaced with an empty map; every lookup then resolves to the
/// placeholder detail, so the viewer keeps running.
pub fn fetch(details: RwSignal<FeatureDetailMap>) {
    spawn_local(async move {
        match load().await {
            Ok(map) => details.set(map),
            Err(e) => {
                leptos::logging::warn!(
                    "feature details unavailable ({e}); continuing with empty metadata"
                );
            }
        }
    });
}

async fn load() -> Result<FeatureDetailMap, String> {
    let resp = gloo_net::http::Request::get(DETAILS_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let bytes = resp.binary().await.map_err(|e| format!("read error: {e}"))?;
    parse_details(&bytes).map_err(|e| format!("parse error: {e}"))
}
