use leptos::prelude::*;
use wasm_bindgen::JsCast;

use topolect_shared::{detail_for, language_color, population_split};

use crate::app::{ActiveFeatureInfo, ActiveLanguageInfo, AtlasStore, DetailMap, Selection};
use crate::chart::PopulationChart;
use crate::colors::rgba_css;

const INFO_BUTTON_STYLE: &str = "background: #1a1d2a; border: 1px solid #282c3e; border-radius: 4px; color: #9a9590; font-family: 'JetBrains Mono', monospace; font-size: 0.66rem; width: 20px; height: 20px; cursor: pointer;";
const BACK_BUTTON_STYLE: &str = "background: #1a1d2a; border: 1px solid #282c3e; border-radius: 4px; color: #9a9590; font-family: 'JetBrains Mono', monospace; font-size: 0.66rem; padding: 3px 10px; cursor: pointer;";

/// Sidebar with the selection controls and the language/feature info panels.
#[component]
pub fn Sidebar() -> impl IntoView {
    let ActiveLanguageInfo(active_language) = expect_context();
    let ActiveFeatureInfo(active_feature) = expect_context();

    view! {
        <div style="width: 100%; height: 100%; background: #13161f; border-left: 1px solid #282c3e; display: flex; flex-direction: column; overflow: hidden;">
            <SidebarHeader />
            <div class="scrollbar-thin" style="flex: 1; overflow-y: auto;">
                {move || {
                    if let Some(feature) = active_feature.get() {
                        view! { <FeaturePanel feature /> }.into_any()
                    } else if let Some(code) = active_language.get() {
                        view! { <LanguagePanel code /> }.into_any()
                    } else {
                        view! { <ControlsPanel /> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn SidebarHeader() -> impl IntoView {
    view! {
        <div style="padding: 18px 20px 14px; border-bottom: 1px solid #282c3e;">
            <div style="font-family: 'Silkscreen', monospace; font-size: 1.15rem; font-weight: 700; letter-spacing: 0.16em; text-transform: uppercase; color: #f5c542;">"TOPOLECT"</div>
            <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; color: #5a5860; margin-top: 3px; letter-spacing: 0.08em;">"Chinese Dialect Distribution"</div>
        </div>
    }
}

#[component]
fn SectionLabel(label: &'static str) -> impl IntoView {
    view! {
        <div style="font-family: 'JetBrains Mono', monospace; font-size: 0.62rem; color: #7c829e; text-transform: uppercase; letter-spacing: 0.12em; padding: 12px 2px 4px;">{label}</div>
    }
}

#[component]
fn ControlsPanel() -> impl IntoView {
    let AtlasStore(atlas) = expect_context();
    let Selection(selection) = expect_context();

    let language_codes = atlas.with_value(|atlas| atlas.sorted_language_codes());
    let feature_names = atlas.with_value(|atlas| atlas.sorted_feature_names());

    let on_deselect = move |_| selection.update(|state| state.deselect_all());

    view! {
        <div style="padding: 8px 14px 16px;">
            <SectionLabel label="Languages" />
            {language_codes
                .into_iter()
                .map(|code| view! { <LanguageRow code /> })
                .collect_view()}
            <SectionLabel label="Features" />
            {feature_names
                .into_iter()
                .map(|name| view! { <FeatureRow name /> })
                .collect_view()}
            <div style="padding-top: 14px;">
                <button on:click=on_deselect style=BACK_BUTTON_STYLE>"Deselect All"</button>
            </div>
        </div>
    }
}

#[component]
fn LanguageRow(code: String) -> impl IntoView {
    let AtlasStore(atlas) = expect_context();
    let Selection(selection) = expect_context();
    let ActiveLanguageInfo(active_language) = expect_context();

    let display_name = atlas.with_value(|atlas| atlas.display_name(&code).to_string());
    let (r, g, b) = language_color(&code);

    let code_for_checked = code.clone();
    let checked = move || selection.with(|state| state.language_checked(&code_for_checked));

    let code_for_change = code.clone();
    let on_change = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        selection.update(|state| state.set_language(&code_for_change, input.checked()));
    };

    let on_info = move |_| active_language.set(Some(code.clone()));

    view! {
        <div style="display: flex; align-items: center; gap: 8px; padding: 4px 2px;">
            <input type="checkbox" prop:checked=checked on:change=on_change style="accent-color: #f5c542; margin: 0;" />
            <span style=format!(
                "display: inline-block; width: 10px; height: 10px; border-radius: 2px; background: {}; flex-shrink: 0;",
                rgba_css(r, g, b, 1.0),
            ) />
            <span style="flex: 1; font-size: 0.85rem; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">{display_name}</span>
            <button on:click=on_info style=INFO_BUTTON_STYLE>"?"</button>
        </div>
    }
}

#[component]
fn FeatureRow(name: String) -> impl IntoView {
    let AtlasStore(atlas) = expect_context();
    let Selection(selection) = expect_context();
    let ActiveFeatureInfo(active_feature) = expect_context();

    let label = name.clone();

    let name_for_checked = name.clone();
    let checked = move || selection.with(|state| state.feature_checked(&name_for_checked));

    // Any feature change resynchronizes every language checkbox to the
    // intersection of the checked features; manual language picks do not
    // survive this.
    let name_for_change = name.clone();
    let on_change = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        selection.update(|state| {
            state.set_feature(&name_for_change, input.checked());
            atlas.with_value(|atlas| state.apply_feature_resolution(atlas.features()));
        });
    };

    let on_info = move |_| active_feature.set(Some(name.clone()));

    view! {
        <div style="display: flex; align-items: center; gap: 8px; padding: 4px 2px;">
            <input type="checkbox" prop:checked=checked on:change=on_change style="accent-color: #f5c542; margin: 0;" />
            <span style="flex: 1; font-size: 0.85rem; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">{label}</span>
            <button on:click=on_info style=INFO_BUTTON_STYLE>"?"</button>
        </div>
    }
}

/// Province list for one language.
#[component]
fn LanguagePanel(code: String) -> impl IntoView {
    let AtlasStore(atlas) = expect_context();
    let ActiveLanguageInfo(active_language) = expect_context();

    let display_name = atlas.with_value(|atlas| atlas.display_name(&code).to_string());
    let population = atlas.with_value(|atlas| {
        atlas
            .language(&code)
            .map(|language| language.population)
    });
    // BTreeSet iteration is already sorted.
    let provinces: Vec<String> = atlas.with_value(|atlas| {
        atlas
            .language(&code)
            .map(|language| language.provinces.iter().cloned().collect())
            .unwrap_or_default()
    });

    let on_back = move |_| active_language.set(None);

    view! {
        <div style="padding: 12px 16px;">
            <button on:click=on_back style=BACK_BUTTON_STYLE>"< Back"</button>
            <div style="font-size: 1rem; font-weight: 600; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; padding: 12px 0 2px;">{display_name}</div>
            {population.map(|population| view! {
                <div style="font-size: 0.74rem; color: #7c829e; font-family: 'JetBrains Mono', monospace;">{format!("{population}M speakers")}</div>
            })}
            <div style="font-size: 0.78rem; color: #9a9590; font-family: 'Inter', system-ui, sans-serif; padding: 12px 0 4px;">"Distributed in:"</div>
            {provinces
                .into_iter()
                .map(|province| view! {
                    <div style="font-size: 0.85rem; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; padding: 2px 0 2px 10px;">{province}</div>
                })
                .collect_view()}
        </div>
    }
}

/// Feature description, member languages, population proportion, and link.
#[component]
fn FeaturePanel(feature: String) -> impl IntoView {
    let AtlasStore(atlas) = expect_context();
    let DetailMap(detail_map) = expect_context();
    let ActiveFeatureInfo(active_feature) = expect_context();

    let title = feature.clone();
    let feature_langs =
        atlas.with_value(|atlas| atlas.feature_languages(&feature).cloned().unwrap_or_default());
    let language_names: Vec<String> = atlas.with_value(|atlas| {
        let mut names: Vec<String> = feature_langs
            .iter()
            .map(|code| atlas.display_name(code).to_string())
            .collect();
        names.sort();
        names
    });
    let split = atlas.with_value(|atlas| population_split(&feature_langs, atlas.languages()));

    let feature_for_desc = feature.clone();
    let desc = move || detail_map.with(|details| detail_for(details, &feature_for_desc).desc);
    let link = Memo::new(move |_| detail_map.with(|details| detail_for(details, &feature).link));

    let on_back = move |_| active_feature.set(None);

    view! {
        <div style="padding: 12px 16px;">
            <button on:click=on_back style=BACK_BUTTON_STYLE>"< Back"</button>
            <div style="font-size: 1rem; font-weight: 600; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; padding: 12px 0 6px;">{title}</div>
            <div style="font-size: 0.82rem; color: #9a9590; font-family: 'Inter', system-ui, sans-serif; line-height: 1.45;">{desc}</div>
            <div style="font-size: 0.78rem; color: #7c829e; font-family: 'Inter', system-ui, sans-serif; padding: 12px 0 4px; text-decoration: underline;">"Languages with this feature:"</div>
            {language_names
                .into_iter()
                .map(|name| view! {
                    <div style="font-size: 0.85rem; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; padding: 2px 0 2px 10px;">{name}</div>
                })
                .collect_view()}
            <div style="font-size: 0.78rem; color: #7c829e; font-family: 'Inter', system-ui, sans-serif; padding: 12px 0 4px; text-decoration: underline;">"Population:"</div>
            <PopulationChart split />
            {move || link.get().map(|url| view! {
                <div style="padding-top: 10px;">
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.open_with_url_and_target(&url, "_blank");
                            }
                        }
                        style=BACK_BUTTON_STYLE
                    >
                        "Open Wikipedia Page"
                    </button>
                </div>
            })}
        </div>
    }
}
