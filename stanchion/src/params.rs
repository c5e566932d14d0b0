//! Stanchion parameters as they come from the board's sliders.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StanchionError};
use crate::geometry::limits;

/// Fraction of the edge length used as stanchion height when the height
/// adapts to each edge.
pub const EDGE_LENGTH_H_RATIO: f32 = 0.125;

/// How crossing strands are layered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossMode {
    /// The under strand is cut where the over strand passes.
    #[default]
    Cut,
    /// Both strands run the whole crossing; the over strand gets a black border.
    DoublePath,
}

/// How the middle of a crossing is displaced by `twist_value`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwistMode {
    #[default]
    None,
    /// Shift across the edge, away from the strand's own side.
    Lateral,
    /// Shift along the edge, skewing the crossing.
    Along,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanchionParams {
    pub h: f32,
    #[serde(alias = "crossRatio")]
    pub cross_ratio: f32,
    #[serde(alias = "adaptToEdgeLength")]
    pub adapt_to_edge_length: bool,
    #[serde(alias = "twistValue")]
    pub twist_value: f32,
    #[serde(alias = "twistMode")]
    pub twist_mode: TwistMode,
    /// Stiffness of the arcs hugging each vertex.
    pub durete: f32,
    pub width: f32,
    #[serde(alias = "crossMode")]
    pub cross_mode: CrossMode,
}

impl Default for StanchionParams {
    fn default() -> Self {
        StanchionParams {
            h: 20.0,
            cross_ratio: 0.4,
            adapt_to_edge_length: false,
            twist_value: 0.5,
            twist_mode: TwistMode::None,
            durete: 10.0,
            width: 3.0,
            cross_mode: CrossMode::Cut,
        }
    }
}

impl StanchionParams {
    /// Parse and validate parameters sent by the UI. Missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let params: StanchionParams = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        fn check(name: &'static str, value: f32, ok: bool) -> Result<()> {
            if value.is_finite() && ok {
                Ok(())
            } else {
                warn!(name, value, "rejecting stanchion parameter");
                Err(StanchionError::InvalidParameter { name, value })
            }
        }
        check("h", self.h, (0.0..=limits::HEIGHT_MAX).contains(&self.h))?;
        check("cross_ratio", self.cross_ratio, (0.0..=1.0).contains(&self.cross_ratio))?;
        check("twist_value", self.twist_value, (-1.0..=1.0).contains(&self.twist_value))?;
        check("durete", self.durete, (0.0..=limits::DURETE_MAX).contains(&self.durete))?;
        check("width", self.width, limits::in_width_bounds(self.width))?;
        Ok(())
    }

    /// Cross ratio actually used by the synthesizer: a double path always swaps
    /// the strands over the whole edge.
    pub fn effective_cross_ratio(&self) -> f32 {
        match self.cross_mode {
            CrossMode::DoublePath => 1.0,
            CrossMode::Cut => self.cross_ratio,
        }
    }

    /// Stanchion height used along an edge of length `edge_len`.
    pub fn height_for(&self, edge_len: f32) -> f32 {
        if self.adapt_to_edge_length {
            h_from_edge_length(edge_len)
        } else {
            self.h
        }
    }
}

pub fn h_from_edge_length(edge_len: f32) -> f32 {
    edge_len * EDGE_LENGTH_H_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_payload_uses_camel_case_and_defaults() {
        let p = StanchionParams::from_json(
            r#"{"h": 12, "crossRatio": 0.25, "crossMode": "DoublePath", "twistMode": "Lateral"}"#,
        )
        .unwrap();
        assert_eq!(p.h, 12.0);
        assert_eq!(p.cross_ratio, 0.25);
        assert_eq!(p.cross_mode, CrossMode::DoublePath);
        assert_eq!(p.twist_mode, TwistMode::Lateral);
        assert_eq!(p.width, StanchionParams::default().width);
        assert_eq!(p.effective_cross_ratio(), 1.0);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = StanchionParams::from_json(r#"{"cross_ratio": 1.5}"#).unwrap_err();
        assert!(matches!(err, StanchionError::InvalidParameter { name: "cross_ratio", .. }));
        let p = StanchionParams { width: 0.0, ..Default::default() };
        assert!(p.validate().is_err());
        let p = StanchionParams { h: f32::NAN, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn adaptive_height_follows_edge_length() {
        let mut p = StanchionParams { h: 7.0, ..Default::default() };
        assert_eq!(p.height_for(80.0), 7.0);
        p.adapt_to_edge_length = true;
        assert_eq!(p.height_for(80.0), 10.0);
    }

    #[test]
    fn malformed_json_surfaces_as_json_error() {
        let err = StanchionParams::from_json("{h:").unwrap_err();
        assert_eq!(err.code(), "invalid_json");
    }
}
