use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::CanvasRenderingContext2d;

use topolect_shared::visible_provinces;

use crate::app::{AtlasStore, BackgroundImage, ProvinceLayers, Selection};

/// Single-canvas map renderer: the background raster plus one transparent
/// overlay per visible province, all drawn at the background's dimensions so
/// mismatched rasters resize instead of misaligning.
#[component]
pub fn MapCanvas() -> impl IntoView {
    let AtlasStore(atlas) = expect_context();
    let Selection(selection) = expect_context();
    let BackgroundImage(background) = expect_context();
    let ProvinceLayers(layers) = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Redraw whenever the background arrives, a layer finishes loading, or
    // the selection changes.
    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let Some(bg) = background.get() else {
            return;
        };
        let layers = layers.get();
        let visible = selection.with(|state| {
            atlas.with_value(|atlas| visible_provinces(&state.languages, atlas.languages()))
        });

        let width = bg.natural_width();
        let height = bg.natural_height();
        canvas.set_width(width);
        canvas.set_height(height);

        let Ok(Some(ctx)) = canvas.get_context("2d") else {
            return;
        };
        let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
            return;
        };

        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        ctx.draw_image_with_html_image_element(&bg, 0.0, 0.0).ok();
        for layer in &layers {
            if visible.contains(&layer.province) {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &layer.image,
                    0.0,
                    0.0,
                    width as f64,
                    height as f64,
                )
                .ok();
            }
        }
    });

    view! { <canvas node_ref=canvas_ref style="display: block; background: white;" /> }
}
