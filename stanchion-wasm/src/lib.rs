use wasm_bindgen::prelude::*;
mod api;
mod canvas;
mod download;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Board { pub(crate) inner: stanchion::Graph }

impl Board {
    pub fn rs_new() -> Board { Board { inner: stanchion::Graph::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
