//! Job files.
//!
//! A job names the region to pocket and how. Outlines and holes are lists of
//! vertices: a bare `[x, y]` is a straight segment to that point, a table with
//! `to`, `center` and `clockwise` is an arc. Curves are closed automatically
//! and their orientation does not matter.
//!
//! ```toml
//! [[boundary]]
//! outline = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]
//! holes = [[[40.0, 40.0], [60.0, 40.0], [60.0, 60.0], [40.0, 60.0]]]
//!
//! [params]
//! tool_radius = 3.0
//! stepover = 2.0
//!
//! [depths]
//! final_depth = -3.0
//! ```

use anyhow::{bail, Context};
use pocketkit_camtools::{DepthParams, EntryConfig, Move, MoveRecorder, PocketGenerator, PocketParams};
use pocketkit_core::{Area, CavalierEngine, Curve, Point, Vertex};
use pocketkit_settings::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One vertex of a job curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexSpec {
    Point([f64; 2]),
    Arc {
        to: [f64; 2],
        center: [f64; 2],
        #[serde(default = "default_clockwise")]
        clockwise: bool,
    },
}

fn default_clockwise() -> bool {
    true
}

impl VertexSpec {
    fn end(&self) -> Point {
        match *self {
            VertexSpec::Point(p) | VertexSpec::Arc { to: p, .. } => Point::from(p),
        }
    }

    fn to_vertex(self) -> Vertex {
        match self {
            VertexSpec::Point(p) => Vertex::line(Point::from(p)),
            VertexSpec::Arc {
                to,
                center,
                clockwise: true,
            } => Vertex::arc_cw(Point::from(to), Point::from(center)),
            VertexSpec::Arc {
                to,
                center,
                clockwise: false,
            } => Vertex::arc_ccw(Point::from(to), Point::from(center)),
        }
    }
}

/// An outline with the islands inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub outline: Vec<VertexSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<VertexSpec>>,
}

/// Builds a closed curve with the requested orientation.
fn closed_curve(spec: &[VertexSpec], clockwise: bool) -> anyhow::Result<Curve> {
    let Some((first, rest)) = spec.split_first() else {
        bail!("empty curve");
    };
    if let VertexSpec::Arc { .. } = first {
        bail!("a curve must start with a point, not an arc");
    }
    let mut curve = Curve::new();
    curve.push(Vertex::line(first.end()));
    for v in rest {
        curve.push(v.to_vertex());
    }
    if curve.end_point() != Some(first.end()) {
        curve.push(Vertex::line(first.end()));
    }
    if curve.len() < 4 {
        bail!("curve needs at least three distinct points");
    }
    if curve.is_clockwise() != clockwise {
        curve.reverse();
    }
    Ok(curve)
}

/// A pocket job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketJob {
    pub boundary: Vec<ShapeSpec>,
    /// Pocket parameters; the configured defaults when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<PocketParams>,
    #[serde(default)]
    pub depths: DepthParams,
    /// Entry tunables; the configured ones when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryConfig>,
}

impl PocketJob {
    /// Loads a job from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        let job = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON job {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML job {}", path.display()))?,
            _ => bail!("Job file must be .json or .toml: {}", path.display()),
        };
        Ok(job)
    }

    /// The region to pocket: outlines clockwise, each followed by its holes
    /// counter-clockwise.
    pub fn area(&self) -> anyhow::Result<Area> {
        let mut area = Area::new();
        for (i, shape) in self.boundary.iter().enumerate() {
            area.push(closed_curve(&shape.outline, true).with_context(|| format!("outline {i}"))?);
            for (j, hole) in shape.holes.iter().enumerate() {
                area.push(closed_curve(hole, false).with_context(|| format!("hole {j} of outline {i}"))?);
            }
        }
        Ok(area)
    }
}

/// Runs `job` with the defaults in `config`, returning the recorded motions.
pub fn run_job(job: &PocketJob, config: &Config) -> anyhow::Result<Vec<Move>> {
    let area = job.area()?;
    let params = job.params.clone().unwrap_or_else(|| config.pocket.clone());
    let entry = job.entry.clone().unwrap_or_else(|| config.entry.clone());
    let engine = CavalierEngine::with_units(config.machine.unit_scale());

    let mut recorder = MoveRecorder::new();
    let summary = PocketGenerator::new(&engine, params)
        .with_entry_config(entry)
        .generate(&area, &job.depths, &mut recorder)
        .context("Pocket planning failed")?;
    info!(
        passes = summary.passes,
        levels = summary.levels,
        units = %config.machine.measurement_system.unit_label(),
        "Job complete"
    );
    Ok(recorder.into_moves())
}
