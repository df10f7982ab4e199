#![cfg(target_arch = "wasm32")]
use centersnap_wasm::{abi_version, WasmCarousel};
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn layout(scroll: f32, first_width: f32) -> JsValue {
    let items: Vec<Value> = (0..5)
        .map(|i| {
            let width = if i == 0 { first_width } else { 100.0 };
            json!({ "id": i + 1, "width": width, "height": width })
        })
        .collect();
    let value = json!({
        "viewport_width": 300.0,
        "scroll_offset": scroll,
        "padding": { "left": 100, "right": 100 },
        "items": items,
    });
    serde_wasm_bindgen::to_value(&value).unwrap()
}

fn frame(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn two_ticks_settle_on_first_item() {
    let mut carousel = WasmCarousel::new(JsValue::UNDEFINED).unwrap();
    carousel.activate(layout(0.0, 100.0)).unwrap();

    let first = frame(carousel.tick(0.0, 0.0, layout(0.0, 100.0)).unwrap());
    assert!(first["writes"]
        .as_array()
        .unwrap()
        .iter()
        .any(|w| w["kind"] == "padding" && w["left"] == 100));

    let second = frame(carousel.tick(0.0, 0.0, layout(0.0, 100.0)).unwrap());
    assert_eq!(second["phase"], json!("Settled"));
    assert_eq!(second["selected_index"], json!(0));
}

#[wasm_bindgen_test]
fn missing_viewport_rejects_activation() {
    let mut carousel = WasmCarousel::new(JsValue::NULL).unwrap();
    let value = json!({ "viewport_width": 300.0, "items": [], "missing": "Viewport" });
    let err = carousel.activate(serde_wasm_bindgen::to_value(&value).unwrap());
    assert!(err.is_err());
    assert_eq!(
        frame(carousel.phase().unwrap()),
        json!({ "Disabled": { "missing": "Viewport" } })
    );
}

#[wasm_bindgen_test]
fn add_item_reports_generated_id() {
    let mut carousel = WasmCarousel::new(JsValue::UNDEFINED).unwrap();
    carousel.activate(layout(0.0, 100.0)).unwrap();
    carousel.tick(0.0, 0.0, layout(0.0, 100.0)).unwrap();
    carousel.tick(0.0, 0.0, layout(0.0, 150.0)).unwrap();

    let out = frame(carousel.add_item(80.0, 80.0, layout(0.0, 150.0)).unwrap());
    assert_eq!(out["added"], json!(1u64 << 32));
}
