use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub fn pos(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }
}

/// Undirected straight link between two vertices.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Link {
    pub a: u32,
    pub b: u32,
}

impl Link {
    pub fn touches(&self, v: u32) -> bool {
        self.a == v || self.b == v
    }

    /// Endpoint opposite to `v`, if `v` is an endpoint.
    pub fn other(&self, v: u32) -> Option<u32> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Element under the pointer. The board shares one closed set of element
/// kinds; the graph store only produces `Vertex`, `Link` and `Empty`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointedElement {
    Vertex { id: u32, dist: f32 },
    Link { id: u32, t: f32, dist: f32 },
    ControlPoint { link: u32, dist: f32 },
    Area { id: u32 },
    Stroke { id: u32 },
    Rectangle { id: u32 },
    Empty,
}

impl PointedElement {
    pub fn is_empty(&self) -> bool {
        matches!(self, PointedElement::Empty)
    }
}
