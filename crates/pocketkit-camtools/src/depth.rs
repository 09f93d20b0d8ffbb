//! Depth stepping.

use crate::error::{PocketError, PocketResult};
use serde::{Deserialize, Serialize};

const DEPTH_EPSILON: f64 = 1e-7;

/// Depth parameters of a pocket.
///
/// Z values are absolute; depths decrease going into the stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthParams {
    /// Safe height for rapid traverse above everything
    pub clearance_height: f64,
    /// Gap above the current start depth where rapids stop
    pub rapid_safety_space: f64,
    /// Top of the stock
    pub start_depth: f64,
    /// Maximum depth of cut per level
    pub step_down: f64,
    /// Depth left for a final finishing level
    pub z_finish_depth: f64,
    /// Extra depth below the final depth
    pub z_thru_depth: f64,
    /// Bottom of the pocket
    pub final_depth: f64,
    /// Explicit depth list, overriding the stepping above
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_depths: Option<Vec<f64>>,
}

impl Default for DepthParams {
    fn default() -> Self {
        Self {
            clearance_height: 5.0,
            rapid_safety_space: 2.0,
            start_depth: 0.0,
            step_down: 1.0,
            z_finish_depth: 0.0,
            z_thru_depth: 0.0,
            final_depth: -1.0,
            user_depths: None,
        }
    }
}

/// One level of the depth loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthLevel {
    pub clearance_height: f64,
    pub rapid_safety_space: f64,
    /// Depth the previous level reached (the stock top for the first level)
    pub start_depth: f64,
    /// Depth cut at this level
    pub depth: f64,
}

impl DepthParams {
    /// Single cut straight to `final_depth`.
    pub fn single(clearance_height: f64, start_depth: f64, final_depth: f64) -> Self {
        Self {
            clearance_height,
            start_depth,
            final_depth,
            step_down: (start_depth - final_depth).abs().max(DEPTH_EPSILON),
            ..Self::default()
        }
    }

    /// Depths to cut, shallow to deep.
    ///
    /// The span from the start depth down to the last roughing depth is
    /// split into equal layers no thicker than `step_down`; a finishing
    /// depth and a through depth add levels below that.
    pub fn depths(&self) -> Vec<f64> {
        if let Some(user) = &self.user_depths {
            return user.clone();
        }

        let mut depth = self.final_depth - self.z_thru_depth;
        let mut depths = vec![depth];
        depth += self.z_finish_depth;
        if depth + DEPTH_EPSILON < self.start_depth {
            if self.z_finish_depth > DEPTH_EPSILON {
                depths.insert(0, depth);
            }
            let span = self.start_depth - depth;
            let layer_count = (span / self.step_down - DEPTH_EPSILON) as usize + 1;
            let layer_depth = span / layer_count as f64;
            for _ in 1..layer_count {
                depth += layer_depth;
                depths.insert(0, depth);
            }
        }
        depths
    }

    /// The depth loop: each level starts where the previous one stopped.
    pub fn levels(&self) -> Vec<DepthLevel> {
        let mut start_depth = self.start_depth;
        self.depths()
            .into_iter()
            .map(|depth| {
                let level = DepthLevel {
                    clearance_height: self.clearance_height,
                    rapid_safety_space: self.rapid_safety_space,
                    start_depth,
                    depth,
                };
                start_depth = depth;
                level
            })
            .collect()
    }

    pub fn validate(&self) -> PocketResult<()> {
        let values = [
            self.clearance_height,
            self.rapid_safety_space,
            self.start_depth,
            self.step_down,
            self.z_finish_depth,
            self.z_thru_depth,
            self.final_depth,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PocketError::InvalidParameters(
                "depth parameters must be finite".to_string(),
            ));
        }
        if self.clearance_height < self.start_depth {
            return Err(PocketError::InvalidParameters(format!(
                "clearance height {} is below start depth {}",
                self.clearance_height, self.start_depth
            )));
        }
        if self.rapid_safety_space < 0.0 || self.z_finish_depth < 0.0 || self.z_thru_depth < 0.0 {
            return Err(PocketError::InvalidParameters(
                "safety space, finish depth and thru depth must not be negative".to_string(),
            ));
        }
        match &self.user_depths {
            Some(user) if user.is_empty() => Err(PocketError::InvalidParameters(
                "user depth list is empty".to_string(),
            )),
            Some(_) => Ok(()),
            None if self.final_depth > self.start_depth => {
                Err(PocketError::InvalidParameters(format!(
                    "final depth {} is above start depth {}",
                    self.final_depth, self.start_depth
                )))
            }
            None if self.step_down <= 0.0 => Err(PocketError::InvalidParameters(format!(
                "step down must be positive, got {}",
                self.step_down
            ))),
            None => Ok(()),
        }
    }
}
