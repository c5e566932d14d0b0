//! Möbius stanchion generator for whiteboard graphs.
//!
//! The graph store holds vertices and straight links. From it the crate builds
//! a combinatorial map of quarter points, traces its cycles and turns them into
//! draw commands for a live canvas or a standalone SVG file.

pub mod error;
pub mod model;
pub mod params;
pub mod quarter;
pub mod render;
pub mod geometry {
    pub mod cubic;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod combinatorial_map;
    pub mod cycles;
    pub mod picking;
    pub mod rotation;
}
mod json;
mod svg;

pub use algorithms::combinatorial_map::CombinatorialMap;
pub use algorithms::cycles::{Cycle, Trace};
pub use error::{Adjacency, Result, StanchionError};
pub use params::{CrossMode, StanchionParams, TwistMode};
pub use quarter::{QpId, QuarterPoint};
pub use render::{DrawCommand, StrokeColor, View, PALETTE};
pub use svg::EXPORT_FILENAME;

use model::{Link, PointedElement, Vec2, Vertex};
use tracing::{debug, info};

pub struct Graph {
    pub(crate) vertices: Vec<Option<Vertex>>, // id is index
    pub(crate) links: Vec<Option<Link>>,      // id is index
    pub(crate) geom_ver: u64,
}

pub struct LinkArrays {
    pub ids: Vec<u32>,
    pub endpoints: Vec<u32>,
}

/// Where a stanchion drawing goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    /// Live preview: the caller replays the returned commands.
    Canvas,
    /// Standalone SVG file.
    SvgFile,
}

#[derive(Clone, Debug)]
pub enum StanchionOutput {
    Preview(Trace),
    Export { filename: &'static str, svg: String },
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            vertices: Vec::new(),
            links: Vec::new(),
            geom_ver: 1,
        }
    }
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }
    pub(crate) fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    // Vertices
    /// Adds a vertex, or `None` when a coordinate is outside the board limits.
    pub fn add_vertex(&mut self, x: f32, y: f32) -> Option<u32> {
        if !geometry::limits::in_coord_bounds(x) || !geometry::limits::in_coord_bounds(y) {
            return None;
        }
        let id = self.vertices.len() as u32;
        self.vertices.push(Some(Vertex { x, y }));
        self.bump();
        Some(id)
    }
    pub fn move_vertex(&mut self, id: u32, x: f32, y: f32) -> bool {
        if !geometry::limits::in_coord_bounds(x) || !geometry::limits::in_coord_bounds(y) {
            return false;
        }
        match self.vertices.get_mut(id as usize) {
            Some(Some(v)) => {
                v.x = x;
                v.y = y;
            }
            _ => return false,
        }
        self.bump();
        true
    }
    pub fn get_vertex(&self, id: u32) -> Option<Vec2> {
        self.vertices.get(id as usize).and_then(|v| *v).map(|v| v.pos())
    }
    /// Removes the vertex and every link touching it.
    pub fn remove_vertex(&mut self, id: u32) -> bool {
        if self.get_vertex(id).is_none() {
            return false;
        }
        self.vertices[id as usize] = None;
        for slot in self.links.iter_mut() {
            if slot.map_or(false, |l| l.touches(id)) {
                *slot = None;
            }
        }
        self.bump();
        true
    }
    pub fn vertex_count(&self) -> u32 {
        self.vertices.iter().filter(|v| v.is_some()).count() as u32
    }
    /// Live vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = (u32, Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as u32, v)))
    }

    // Links
    pub fn add_link(&mut self, a: u32, b: u32) -> Option<u32> {
        if a == b || self.get_vertex(a).is_none() || self.get_vertex(b).is_none() {
            return None;
        }
        if self.links().any(|(_, l)| l.touches(a) && l.touches(b)) {
            return None;
        }
        let id = self.links.len() as u32;
        self.links.push(Some(Link { a, b }));
        self.bump();
        Some(id)
    }
    pub fn remove_link(&mut self, id: u32) -> bool {
        if let Some(slot) = self.links.get_mut(id as usize) {
            if slot.is_some() {
                *slot = None;
                self.bump();
                return true;
            }
        }
        false
    }
    pub fn get_link(&self, id: u32) -> Option<Link> {
        self.links.get(id as usize).and_then(|l| *l)
    }
    pub fn link_count(&self) -> u32 {
        self.links.iter().filter(|l| l.is_some()).count() as u32
    }
    /// Live links in id order.
    pub fn links(&self) -> impl Iterator<Item = (u32, Link)> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.map(|l| (i as u32, l)))
    }
    /// Vertices sharing a link with `v`, in link id order.
    pub fn neighbors(&self, v: u32) -> Vec<u32> {
        self.links().filter_map(|(_, l)| l.other(v)).collect()
    }

    pub fn get_vertex_arrays(&self) -> (Vec<u32>, Vec<f32>) {
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for (i, v) in self.vertices() {
            ids.push(i);
            pos.push(v.x);
            pos.push(v.y);
        }
        (ids, pos)
    }
    pub fn get_link_arrays(&self) -> LinkArrays {
        let mut ids = Vec::new();
        let mut endpoints = Vec::new();
        for (i, l) in self.links() {
            ids.push(i);
            endpoints.push(l.a);
            endpoints.push(l.b);
        }
        LinkArrays { ids, endpoints }
    }

    // Picking
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> PointedElement {
        algorithms::picking::pick_impl(self, x, y, tol)
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn from_json_value(&mut self, v: serde_json::Value) -> Result<()> {
        json::from_json_impl(self, v)
    }

    // Clear
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.links.clear();
        self.bump();
    }

    // Stanchions
    pub fn combinatorial_map(&self, params: &StanchionParams) -> Result<CombinatorialMap> {
        params.validate()?;
        CombinatorialMap::build(self, params)
    }
    pub fn trace_stanchions(&self, params: &StanchionParams) -> Result<Trace> {
        let map = self.combinatorial_map(params)?;
        algorithms::cycles::trace_cycles(&map, params)
    }
    /// Build, trace and render the stanchions in one go. Any malformed
    /// adjacency aborts the whole drawing.
    pub fn draw_combinatorial_map(
        &self,
        params: &StanchionParams,
        surface: Surface,
    ) -> Result<StanchionOutput> {
        let trace = self.trace_stanchions(params)?;
        debug!(cycles = trace.cycles.len(), ?surface, "drawing stanchions");
        match surface {
            Surface::Canvas => Ok(StanchionOutput::Preview(trace)),
            Surface::SvgFile => {
                let svg = svg::export_document(self, &trace, params);
                info!(bytes = svg.len(), filename = EXPORT_FILENAME, "exported stanchion svg");
                Ok(StanchionOutput::Export { filename: EXPORT_FILENAME, svg })
            }
        }
    }
}
