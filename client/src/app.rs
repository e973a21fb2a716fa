use leptos::prelude::*;

use topolect_shared::{Atlas, FeatureDetailMap, SelectionState};

use crate::canvas::MapCanvas;
use crate::details;
use crate::layers::{self, LoadedLayer};
use crate::sidebar::Sidebar;

pub(crate) const SIDEBAR_WIDTH: f64 = 340.0;

/// Newtype wrappers to keep same-shaped signals distinct in Leptos context.
/// (Two `RwSignal<Option<String>>`s would overwrite each other otherwise.)
#[derive(Clone, Copy)]
pub(crate) struct AtlasStore(pub StoredValue<Atlas>);
#[derive(Clone, Copy)]
pub(crate) struct Selection(pub RwSignal<SelectionState>);
#[derive(Clone, Copy)]
pub(crate) struct DetailMap(pub RwSignal<FeatureDetailMap>);
#[derive(Clone, Copy)]
pub(crate) struct ActiveLanguageInfo(pub RwSignal<Option<String>>);
#[derive(Clone, Copy)]
pub(crate) struct ActiveFeatureInfo(pub RwSignal<Option<String>>);
#[derive(Clone, Copy)]
pub(crate) struct SidebarOpen(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct BackgroundImage(pub RwSignal<Option<web_sys::HtmlImageElement>>);
#[derive(Clone, Copy)]
pub(crate) struct ProvinceLayers(pub RwSignal<Vec<LoadedLayer>>);

use gloo_storage::Storage;

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    sidebar_open: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sidebar_open: true }
    }
}

/// Root application component. Provides global reactive signals via context.
#[component]
pub fn App() -> impl IntoView {
    let atlas = StoredValue::new(Atlas::builtin());

    let saved: Settings = gloo_storage::LocalStorage::get("topolect_settings").unwrap_or_default();
    let selection: RwSignal<SelectionState> =
        RwSignal::new(atlas.with_value(SelectionState::for_atlas));
    let detail_map: RwSignal<FeatureDetailMap> = RwSignal::new(FeatureDetailMap::new());
    let active_language: RwSignal<Option<String>> = RwSignal::new(None);
    let active_feature: RwSignal<Option<String>> = RwSignal::new(None);
    let sidebar_open: RwSignal<bool> = RwSignal::new(saved.sidebar_open);
    let background: RwSignal<Option<web_sys::HtmlImageElement>> = RwSignal::new(None);
    let province_layers: RwSignal<Vec<LoadedLayer>> = RwSignal::new(Vec::new());

    provide_context(AtlasStore(atlas));
    provide_context(Selection(selection));
    provide_context(DetailMap(detail_map));
    provide_context(ActiveLanguageInfo(active_language));
    provide_context(ActiveFeatureInfo(active_feature));
    provide_context(SidebarOpen(sidebar_open));
    provide_context(BackgroundImage(background));
    provide_context(ProvinceLayers(province_layers));

    // Persist settings to localStorage on any change
    Effect::new(move || {
        let settings = Settings {
            sidebar_open: sidebar_open.get(),
        };
        let _ = gloo_storage::LocalStorage::set("topolect_settings", &settings);
    });

    // Load static assets once on mount: feature metadata, the background
    // raster, and one transparent layer per province.
    Effect::new(move || {
        details::fetch(detail_map);
        let provinces: Vec<String> =
            atlas.with_value(|atlas| atlas.all_provinces().iter().cloned().collect());
        layers::fetch_layers(background, province_layers, provinces);
    });

    let sidebar_style = move || {
        if sidebar_open.get() {
            format!(
                "width: {SIDEBAR_WIDTH}px; min-width: {SIDEBAR_WIDTH}px; height: 100%; display: flex;"
            )
        } else {
            "display: none;".to_string()
        }
    };

    view! {
        <div style="display: flex; width: 100vw; height: 100vh; overflow: hidden; background: #13161f;">
            <div style="flex: 1; position: relative; overflow: auto;">
                <MapCanvas />
                <button
                    style="position: absolute; top: 12px; right: 12px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 4px; color: #9a9590; font-family: 'JetBrains Mono', monospace; font-size: 0.72rem; padding: 5px 10px; cursor: pointer;"
                    on:click=move |_| sidebar_open.update(|open| *open = !*open)
                >
                    {move || if sidebar_open.get() { "Hide Controls" } else { "Show Controls" }}
                </button>
            </div>
            <div style=sidebar_style>
                <Sidebar />
            </div>
        </div>
    }
}
