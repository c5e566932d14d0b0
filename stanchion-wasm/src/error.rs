use js_sys::{Object, Reflect};
use stanchion::StanchionError;
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Envelope for a failed stanchion build. The message is also written to the
/// browser console, since a half-drawn board gives no other hint.
pub fn stanchion(e: &StanchionError) -> JsValue {
    let message = e.to_string();
    web_sys::console::error_1(&JsValue::from_str(&message));
    let data = match e {
        StanchionError::MalformedAdjacency { qp, adjacency } => {
            let d = new_obj();
            set_kv(&d, "qp", &JsValue::from_f64(*qp as f64));
            set_kv(&d, "adjacency", &JsValue::from_str(&adjacency.to_string()));
            Some(d.into())
        }
        StanchionError::InvalidParameter { name, value } => {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(name));
            set_kv(&d, "got", &JsValue::from_f64(*value as f64));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), message, data)
}

/// Envelope for a canvas or DOM call that threw.
pub fn host(e: JsValue) -> JsValue {
    let message = e.as_string().unwrap_or_else(|| "host call failed".to_string());
    web_sys::console::error_1(&e);
    err("host_error", message, None)
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}
