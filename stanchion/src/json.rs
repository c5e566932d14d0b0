use crate::error::{Result, StanchionError};
use crate::geometry::limits;
use crate::model::{Link, Vertex};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

pub const SNAPSHOT_VERSION: u32 = 1;

pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    struct VertexSer {
        id: u32,
        x: f32,
        y: f32,
    }
    #[derive(Serialize)]
    struct LinkSer {
        id: u32,
        a: u32,
        b: u32,
    }
    #[derive(Serialize)]
    struct DocSer {
        version: u32,
        vertices: Vec<VertexSer>,
        links: Vec<LinkSer>,
    }
    let doc = DocSer {
        version: SNAPSHOT_VERSION,
        vertices: g.vertices().map(|(id, v)| VertexSer { id, x: v.x, y: v.y }).collect(),
        links: g.links().map(|(id, l)| LinkSer { id, a: l.a, b: l.b }).collect(),
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

fn reject(reason: String) -> StanchionError {
    warn!(%reason, "rejecting graph snapshot");
    StanchionError::InvalidSnapshot(reason)
}

/// Replace the contents of `g` with a snapshot. On error `g` is left untouched.
pub fn from_json_impl(g: &mut Graph, v: Value) -> Result<()> {
    #[derive(Deserialize)]
    struct VertexDe {
        id: u32,
        x: f32,
        y: f32,
    }
    #[derive(Deserialize)]
    struct LinkDe {
        id: u32,
        a: u32,
        b: u32,
    }
    #[derive(Deserialize)]
    struct DocDe {
        version: Option<u32>,
        vertices: Vec<VertexDe>,
        links: Vec<LinkDe>,
    }
    let doc: DocDe = serde_json::from_value(v)?;
    if let Some(ver) = doc.version {
        if ver > SNAPSHOT_VERSION {
            return Err(reject(format!("unsupported version {}", ver)));
        }
    }
    if doc.vertices.len() > limits::MAX_VERTICES {
        return Err(reject(format!("vertices>{}", limits::MAX_VERTICES)));
    }
    if doc.links.len() > limits::MAX_LINKS {
        return Err(reject(format!("links>{}", limits::MAX_LINKS)));
    }

    let mut vertices: Vec<Option<Vertex>> = Vec::new();
    for n in &doc.vertices {
        if n.id as usize >= limits::MAX_VERTICES {
            return Err(reject(format!("vertex id {} out of range", n.id)));
        }
        if !limits::in_coord_bounds(n.x) || !limits::in_coord_bounds(n.y) {
            return Err(reject(format!("vertex {} coordinate out of bounds", n.id)));
        }
        if vertices.len() <= n.id as usize {
            vertices.resize(n.id as usize + 1, None);
        }
        if vertices[n.id as usize].is_some() {
            return Err(reject(format!("duplicate vertex id {}", n.id)));
        }
        vertices[n.id as usize] = Some(Vertex { x: n.x, y: n.y });
    }

    let exists = |id: u32| vertices.get(id as usize).map_or(false, |v| v.is_some());
    let mut links: Vec<Option<Link>> = Vec::new();
    let mut pairs: HashSet<(u32, u32)> = HashSet::new();
    for e in &doc.links {
        if e.id as usize >= limits::MAX_LINKS {
            return Err(reject(format!("link id {} out of range", e.id)));
        }
        if e.a == e.b {
            return Err(reject(format!("link {} is a self loop", e.id)));
        }
        if !exists(e.a) || !exists(e.b) {
            return Err(reject(format!("link {} references a missing vertex", e.id)));
        }
        if !pairs.insert((e.a.min(e.b), e.a.max(e.b))) {
            return Err(reject(format!("link {} duplicates another link", e.id)));
        }
        if links.len() <= e.id as usize {
            links.resize(e.id as usize + 1, None);
        }
        if links[e.id as usize].is_some() {
            return Err(reject(format!("duplicate link id {}", e.id)));
        }
        links[e.id as usize] = Some(Link { a: e.a, b: e.b });
    }

    g.vertices = vertices;
    g.links = links;
    g.bump();
    Ok(())
}
