use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::CanvasRenderingContext2d;

use topolect_shared::PopulationSplit;

const CHART_W: f64 = 300.0;
const CHART_H: f64 = 190.0;
const WITH_COLOR: &str = "#99ff99";
const WITHOUT_COLOR: &str = "#ff9999";

/// Population proportion pie for the feature detail panel. `None` means the
/// split was unavailable (zero total population) and renders as "no data".
#[component]
pub fn PopulationChart(split: Option<PopulationSplit>) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        canvas.set_width(CHART_W as u32);
        canvas.set_height(CHART_H as u32);

        let Ok(Some(ctx)) = canvas.get_context("2d") else {
            return;
        };
        let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
            return;
        };

        ctx.clear_rect(0.0, 0.0, CHART_W, CHART_H);
        match split {
            Some(split) => draw_pie(&ctx, split),
            None => draw_no_data(&ctx),
        }
    });

    view! { <canvas node_ref=canvas_ref style="display: block; margin: 0 auto;" /> }
}

fn draw_pie(ctx: &CanvasRenderingContext2d, split: PopulationSplit) {
    let cx = 78.0;
    let cy = CHART_H / 2.0;
    let r = 64.0;
    let start = -std::f64::consts::FRAC_PI_2;
    let with_frac = split.with_feature as f64 / split.total() as f64;
    let mid = start + with_frac * std::f64::consts::TAU;
    let end = start + std::f64::consts::TAU;

    if split.with_feature > 0 {
        fill_slice(ctx, cx, cy, r, start, mid, WITH_COLOR);
    }
    if split.without_feature > 0 {
        fill_slice(ctx, cx, cy, r, mid, end, WITHOUT_COLOR);
    }

    ctx.set_font("12px 'Inter', system-ui, sans-serif");
    ctx.set_fill_style_str("#e2e0d8");
    ctx.fill_text(
        &format!(
            "With: {}M ({:.1}%)",
            split.with_feature,
            split.percent_with()
        ),
        158.0,
        cy - 10.0,
    )
    .ok();
    ctx.fill_text(
        &format!(
            "Without: {}M ({:.1}%)",
            split.without_feature,
            100.0 - split.percent_with()
        ),
        158.0,
        cy + 12.0,
    )
    .ok();
}

fn fill_slice(
    ctx: &CanvasRenderingContext2d,
    cx: f64,
    cy: f64,
    r: f64,
    start: f64,
    end: f64,
    color: &str,
) {
    ctx.begin_path();
    ctx.move_to(cx, cy);
    ctx.arc(cx, cy, r, start, end).ok();
    ctx.close_path();
    ctx.set_fill_style_str(color);
    ctx.fill();
}

fn draw_no_data(ctx: &CanvasRenderingContext2d) {
    ctx.set_font("13px 'Inter', system-ui, sans-serif");
    ctx.set_fill_style_str("#5a5860");
    ctx.fill_text("no data", CHART_W / 2.0 - 22.0, CHART_H / 2.0).ok();
}
