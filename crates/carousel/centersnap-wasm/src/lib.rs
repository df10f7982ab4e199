use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use centersnap_core::{
    CarouselConfig, CarouselController, DragEvent, FrameTime, ItemId, Phase, Size,
};

pub mod snapshot;

pub use snapshot::{HostWrite, ItemSnapshot, LayoutSnapshot, SnapshotHost};

/// Items created from JS templates get ids above this, clear of DOM-assigned ids.
const GENERATED_ID_BASE: u64 = 1 << 32;

/// Result of one call: the writes JS must apply plus the resulting state.
#[derive(Serialize)]
struct Frame {
    writes: Vec<HostWrite>,
    phase: Phase,
    selected_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<u64>,
}

#[wasm_bindgen]
pub struct WasmCarousel {
    core: CarouselController,
    next_id: u64,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn parse_layout(layout: JsValue) -> Result<LayoutSnapshot, JsError> {
    swb::from_value(layout).map_err(|e| JsError::new(&format!("layout error: {e}")))
}

impl WasmCarousel {
    fn run<T>(
        &mut self,
        layout: JsValue,
        f: impl FnOnce(&mut CarouselController, &mut SnapshotHost<'_>) -> T,
    ) -> Result<(T, Vec<HostWrite>), JsError> {
        let layout = parse_layout(layout)?;
        let mut host = SnapshotHost::new(layout, &mut self.next_id);
        let value = f(&mut self.core, &mut host);
        Ok((value, host.into_writes()))
    }

    fn frame(&self, writes: Vec<HostWrite>, added: Option<u64>) -> Result<JsValue, JsError> {
        let frame = Frame {
            writes,
            phase: self.core.phase(),
            selected_index: self.core.selected_index(),
            added,
        };
        swb::to_value(&frame).map_err(|e| JsError::new(&format!("frame error: {e}")))
    }
}

#[wasm_bindgen]
impl WasmCarousel {
    /// Create a carousel. Pass a config object or undefined/null for defaults.
    /// Example:
    ///   new WasmCarousel({ selected_scale: 1.25, tween_duration: 0.3 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmCarousel, JsError> {
        console_error_panic_hook::set_once();

        let cfg: CarouselConfig = if jsvalue_is_undefined_or_null(&config) {
            CarouselConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = CarouselController::new(cfg).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmCarousel {
            core,
            next_id: GENERATED_ID_BASE,
        })
    }

    /// Validate the layout and begin initialization. A missing collaborator
    /// leaves the carousel disabled and is reported as an error.
    #[wasm_bindgen]
    pub fn activate(&mut self, layout: JsValue) -> Result<JsValue, JsError> {
        let (result, writes) = self.run(layout, |core, host| core.activate(&*host))?;
        result.map_err(|e| JsError::new(&e.to_string()))?;
        self.frame(writes, None)
    }

    #[wasm_bindgen]
    pub fn deactivate(&mut self) {
        self.core.deactivate();
    }

    /// Advance one frame. `unscaled_dt` drives tweens that ignore time scale.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32, unscaled_dt: f32, layout: JsValue) -> Result<JsValue, JsError> {
        let frame = FrameTime::new(dt, unscaled_dt);
        let (_, writes) = self.run(layout, |core, host| core.tick(host, frame))?;
        self.frame(writes, None)
    }

    #[wasm_bindgen(js_name = select_next)]
    pub fn select_next(&mut self, layout: JsValue) -> Result<JsValue, JsError> {
        let (_, writes) = self.run(layout, |core, host| core.select_next(host))?;
        self.frame(writes, None)
    }

    #[wasm_bindgen(js_name = select_previous)]
    pub fn select_previous(&mut self, layout: JsValue) -> Result<JsValue, JsError> {
        let (_, writes) = self.run(layout, |core, host| core.select_previous(host))?;
        self.frame(writes, None)
    }

    #[wasm_bindgen(js_name = select_index)]
    pub fn select_index(&mut self, index: u32, layout: JsValue) -> Result<JsValue, JsError> {
        let (_, writes) = self.run(layout, |core, host| core.select_index(host, index as usize))?;
        self.frame(writes, None)
    }

    /// Report drag progress. `layout.scroll_offset` must already include the drag.
    #[wasm_bindgen]
    pub fn drag(&mut self, delta: f32, layout: JsValue) -> Result<JsValue, JsError> {
        let (_, writes) = self.run(layout, |core, host| {
            core.on_drag(
                host,
                &DragEvent {
                    position: [0.0, 0.0],
                    delta: [delta, 0.0],
                },
            )
        })?;
        self.frame(writes, None)
    }

    #[wasm_bindgen(js_name = end_drag)]
    pub fn end_drag(&mut self, layout: JsValue) -> Result<JsValue, JsError> {
        let (_, writes) =
            self.run(layout, |core, host| core.on_end_drag(host, &DragEvent::default()))?;
        self.frame(writes, None)
    }

    /// Append an item of the given size. The new id is returned as `added`.
    #[wasm_bindgen(js_name = add_item)]
    pub fn add_item(&mut self, width: f32, height: f32, layout: JsValue) -> Result<JsValue, JsError> {
        let template = Size::new(width, height);
        let (result, writes) = self.run(layout, |core, host| core.add_item(host, &template))?;
        let id = result.map_err(|e| JsError::new(&e.to_string()))?;
        self.frame(writes, Some(id.0))
    }

    #[wasm_bindgen(js_name = remove_item)]
    pub fn remove_item(&mut self, id: u64, layout: JsValue) -> Result<JsValue, JsError> {
        let (result, writes) = self.run(layout, |core, host| core.remove_item(host, ItemId(id)))?;
        result.map_err(|e| JsError::new(&e.to_string()))?;
        self.frame(writes, None)
    }

    #[wasm_bindgen(js_name = selected_index)]
    pub fn selected_index(&self) -> u32 {
        self.core.selected_index() as u32
    }

    #[wasm_bindgen(js_name = is_animating)]
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    #[wasm_bindgen]
    pub fn phase(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.phase()).map_err(|e| JsError::new(&format!("phase error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
