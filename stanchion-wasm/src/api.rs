use crate::Board;
use stanchion::geometry::limits;
use stanchion::model::Vec2;
use stanchion::{StanchionOutput, StanchionParams, Surface, View};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Stanchion parameters from a JS object; `undefined`/`null` means defaults.
fn params_from_js(v: JsValue) -> Result<StanchionParams, JsValue> {
    if v.is_undefined() || v.is_null() {
        return Ok(StanchionParams::default());
    }
    serde_wasm_bindgen::from_value::<StanchionParams>(v)
        .map_err(|e| error::err("invalid_parameter", format!("{}", e), None))
}

/// Error envelope for a coordinate the board cannot hold.
fn bad_coord(name: &str, v: f32) -> Option<JsValue> {
    if !v.is_finite() {
        Some(error::non_finite(name))
    } else if !limits::in_coord_bounds(v) {
        Some(error::out_of_range(name, limits::COORD_MIN, limits::COORD_MAX, v))
    } else {
        None
    }
}

/// Plain JS objects rather than `Map`s, so values round-trip through `from_json_res`.
fn to_js<T: serde::Serialize>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
impl Board {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Board {
        crate::Board::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Vertices/links basic
    pub fn add_vertex(&mut self, x: f32, y: f32) -> Option<u32> {
        self.inner.add_vertex(x, y)
    }
    pub fn add_vertex_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = bad_coord("x", x).or_else(|| bad_coord("y", y)) {
            return e;
        }
        match self.inner.add_vertex(x, y) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::err("internal", "vertex refused after bounds check", None),
        }
    }
    pub fn move_vertex(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.move_vertex(id, x, y)
    }
    pub fn move_vertex_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if let Some(e) = bad_coord("x", x).or_else(|| bad_coord("y", y)) {
            return e;
        }
        if self.inner.get_vertex(id).is_none() {
            return error::invalid_id("vertex", id);
        }
        error::ok(JsValue::from_bool(self.inner.move_vertex(id, x, y)))
    }
    pub fn get_vertex(&self, id: u32) -> JsValue {
        match self.inner.get_vertex(id) {
            Some(p) => to_js(&vec![p.x, p.y]),
            None => JsValue::NULL,
        }
    }
    pub fn remove_vertex(&mut self, id: u32) -> bool {
        self.inner.remove_vertex(id)
    }
    pub fn remove_vertex_res(&mut self, id: u32) -> JsValue {
        if self.inner.get_vertex(id).is_none() {
            return error::invalid_id("vertex", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_vertex(id)))
    }
    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count()
    }
    pub fn add_link(&mut self, a: u32, b: u32) -> Option<u32> {
        self.inner.add_link(a, b)
    }
    pub fn add_link_res(&mut self, a: u32, b: u32) -> JsValue {
        if self.inner.get_vertex(a).is_none() {
            return error::invalid_id("vertex", a);
        }
        if self.inner.get_vertex(b).is_none() {
            return error::invalid_id("vertex", b);
        }
        if a == b {
            return error::err("invalid_link", "link endpoints cannot be the same vertex", None);
        }
        match self.inner.add_link(a, b) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::err("invalid_link", "vertices are already linked", None),
        }
    }
    pub fn remove_link(&mut self, id: u32) -> bool {
        self.inner.remove_link(id)
    }
    pub fn remove_link_res(&mut self, id: u32) -> JsValue {
        if self.inner.get_link(id).is_none() {
            return error::invalid_id("link", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_link(id)))
    }
    pub fn link_count(&self) -> u32 {
        self.inner.link_count()
    }

    // Typed arrays getters
    pub fn get_vertex_data(&self) -> JsValue {
        let (ids, pos) = self.inner.get_vertex_arrays();
        let obj = crate::interop::new_obj();
        crate::interop::set_kv(&obj, "ids", &crate::interop::arr_u32(&ids).into());
        crate::interop::set_kv(&obj, "positions", &crate::interop::arr_f32(&pos).into());
        obj.into()
    }
    pub fn get_link_data(&self) -> JsValue {
        let la = self.inner.get_link_arrays();
        let obj = crate::interop::new_obj();
        crate::interop::set_kv(&obj, "ids", &crate::interop::arr_u32(&la.ids).into());
        crate::interop::set_kv(&obj, "endpoints", &crate::interop::arr_u32(&la.endpoints).into());
        obj.into()
    }

    // Picking + JSON
    /// `{ kind: 'vertex'|'link'|'empty', ... }`
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> JsValue {
        to_js(&self.inner.pick(x, y, tol))
    }
    pub fn pick_res(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f32::INFINITY, tol);
        }
        error::ok(self.pick(x, y, tol))
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.from_json_value(val) {
                Ok(()) => error::ok(JsValue::TRUE),
                Err(e) => error::stanchion(&e),
            },
            Err(e) => error::err("invalid_json", format!("{}", e), None),
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    // Stanchions
    /// Quarter points of the current board, for inspection.
    pub fn combinatorial_map_res(&self, params: JsValue) -> JsValue {
        let params = match params_from_js(params) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.combinatorial_map(&params) {
            Ok(map) => error::ok(to_js(&map.quarter_points())),
            Err(e) => error::stanchion(&e),
        }
    }
    /// Draw the stanchions on `ctx` under the board camera. The value of a
    /// successful envelope is the list of traced cycles.
    pub fn draw_stanchions_res(
        &self,
        ctx: &CanvasRenderingContext2d,
        params: JsValue,
        camera_x: f32,
        camera_y: f32,
        zoom: f32,
    ) -> JsValue {
        if !camera_x.is_finite() {
            return error::non_finite("camera_x");
        }
        if !camera_y.is_finite() {
            return error::non_finite("camera_y");
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return error::out_of_range("zoom", 0.0, f32::INFINITY, zoom);
        }
        let params = match params_from_js(params) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.draw_combinatorial_map(&params, Surface::Canvas) {
            Ok(StanchionOutput::Preview(trace)) => {
                let view = View { camera: Vec2::new(camera_x, camera_y), zoom };
                crate::canvas::draw(ctx, &trace.commands, &view);
                error::ok(to_js(&trace.cycles))
            }
            Ok(StanchionOutput::Export { .. }) => error::err("internal", "unexpected export output", None),
            Err(e) => error::stanchion(&e),
        }
    }
    /// Standalone SVG document of the stanchions.
    pub fn export_svg_res(&self, params: JsValue) -> JsValue {
        let params = match params_from_js(params) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.draw_combinatorial_map(&params, Surface::SvgFile) {
            Ok(StanchionOutput::Export { svg, .. }) => error::ok(JsValue::from_str(&svg)),
            Ok(StanchionOutput::Preview(_)) => error::err("internal", "unexpected preview output", None),
            Err(e) => error::stanchion(&e),
        }
    }
    /// Export the stanchions and hand the file to the browser.
    pub fn download_stanchions_res(&self, params: JsValue) -> JsValue {
        let params = match params_from_js(params) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.draw_combinatorial_map(&params, Surface::SvgFile) {
            Ok(StanchionOutput::Export { filename, svg }) => {
                match crate::download::offer(filename, &svg, crate::download::SVG_MIME) {
                    Ok(()) => error::ok(JsValue::from_str(filename)),
                    Err(e) => error::host(e),
                }
            }
            Ok(StanchionOutput::Preview(_)) => error::err("internal", "unexpected preview output", None),
            Err(e) => error::stanchion(&e),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
