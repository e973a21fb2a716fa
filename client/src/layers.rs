use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use js_sys::Reflect;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

const LAYER_CONCURRENCY: usize = 6;
const ONLOAD_HANDLE_KEY: &str = "__topolectLayerOnload";
const ONERROR_HANDLE_KEY: &str = "__topolectLayerOnerror";

pub const BACKGROUND_SRC: &str = "/map/background.png";

/// A loaded per-province transparent overlay image.
#[derive(Clone)]
pub struct LoadedLayer {
    pub province: String,
    pub image: HtmlImageElement,
}

type LoadCallback = Rc<dyn Fn(HtmlImageElement)>;
type ErrorCallback = Rc<dyn Fn()>;

fn layer_src(province: &str) -> String {
    format!("/map/{province}.png")
}

/// Load the background raster and every province layer from static assets.
pub fn fetch_layers(
    background: RwSignal<Option<HtmlImageElement>>,
    layers: RwSignal<Vec<LoadedLayer>>,
    provinces: Vec<String>,
) {
    layers.set(Vec::new());

    load_image(
        BACKGROUND_SRC.to_string(),
        Rc::new(move |image| background.set(Some(image))),
        Rc::new(|| {
            leptos::logging::warn!("background image {BACKGROUND_SRC} failed to load");
        }),
    );

    if provinces.is_empty() {
        return;
    }
    let queue: Rc<RefCell<VecDeque<String>>> = Rc::new(RefCell::new(provinces.into()));
    let in_flight = Rc::new(Cell::new(0usize));
    pump_queue(layers, queue, in_flight);
}

fn pump_queue(
    layers: RwSignal<Vec<LoadedLayer>>,
    queue: Rc<RefCell<VecDeque<String>>>,
    in_flight: Rc<Cell<usize>>,
) {
    while in_flight.get() < LAYER_CONCURRENCY {
        let Some(province) = queue.borrow_mut().pop_front() else {
            break;
        };
        in_flight.set(in_flight.get() + 1);

        let queue_next = queue.clone();
        let in_flight_next = in_flight.clone();
        let on_done: Rc<dyn Fn()> = Rc::new(move || {
            in_flight_next.set(in_flight_next.get().saturating_sub(1));
            pump_queue(layers, queue_next.clone(), in_flight_next.clone());
        });

        let src = layer_src(&province);
        let province_for_load = province.clone();
        let on_done_load = on_done.clone();
        let on_load: LoadCallback = Rc::new(move |image| {
            upsert_layer(
                layers,
                LoadedLayer {
                    province: province_for_load.clone(),
                    image,
                },
            );
            on_done_load();
        });
        // A missing raster renders as fully transparent; the map keeps working.
        let on_error: ErrorCallback = Rc::new(move || {
            leptos::logging::warn!("missing layer image for {province}; rendering it transparent");
            on_done();
        });

        load_image(src, on_load, on_error);
    }
}

fn load_image(src: String, on_load: LoadCallback, on_error: ErrorCallback) {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(_) => {
            on_error();
            return;
        }
    };

    let img_for_load = img.clone();
    let onload = Closure::<dyn FnMut()>::new(move || {
        clear_image_handlers(&img_for_load);

        let img_for_decode = img_for_load.clone();
        let on_load = on_load.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let _ = JsFuture::from(img_for_decode.decode()).await;
            on_load(img_for_decode);
        });
    });

    let img_for_error = img.clone();
    let onerror = Closure::<dyn FnMut()>::new(move || {
        clear_image_handlers(&img_for_error);
        on_error();
    });

    let onload_js = onload.into_js_value();
    let onerror_js = onerror.into_js_value();
    img.set_onload(Some(onload_js.unchecked_ref()));
    img.set_onerror(Some(onerror_js.unchecked_ref()));
    let _ = Reflect::set(
        img.as_ref(),
        &JsValue::from_str(ONLOAD_HANDLE_KEY),
        &onload_js,
    );
    let _ = Reflect::set(
        img.as_ref(),
        &JsValue::from_str(ONERROR_HANDLE_KEY),
        &onerror_js,
    );
    img.set_src(&src);
}

fn clear_image_handlers(img: &HtmlImageElement) {
    img.set_onload(None);
    img.set_onerror(None);
    let _ = Reflect::delete_property(img.as_ref(), &JsValue::from_str(ONLOAD_HANDLE_KEY));
    let _ = Reflect::delete_property(img.as_ref(), &JsValue::from_str(ONERROR_HANDLE_KEY));
}

fn upsert_layer(layers: RwSignal<Vec<LoadedLayer>>, incoming: LoadedLayer) {
    layers.update(|loaded| {
        if let Some(existing) = loaded
            .iter_mut()
            .find(|layer| layer.province == incoming.province)
        {
            *existing = incoming;
            return;
        }

        loaded.push(incoming);
        loaded.sort_by(|a, b| a.province.cmp(&b.province));
    });
}
