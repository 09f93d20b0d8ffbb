//! Pocket operations.
//!
//! Ties the planners together: the boundary is shrunk by the tool radius,
//! turned into a pass list by ring decomposition or raster scanning, and the
//! passes are cut level by level with entry moves and retracts.

use crate::context::PlanningContext;
use crate::decompose::{decompose, flatten};
use crate::depth::DepthParams;
use crate::entry::{EntryConfig, EntryPlanner, EntryStyle};
use crate::error::{PocketError, PocketResult};
use crate::motion::{MotionSink, MoveRecorder};
use crate::profile::{DirectProfile, ProfileCutter};
use crate::sequencer::CutSequencer;
use crate::zigzag::scan;
use pocketkit_core::{Area, Curve, GeometryEngine, Point, PocketRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Inset of the cleared area snapshot relative to the extra offset.
pub const CLEARED_AREA_MARGIN: f64 = 0.01;

/// Strategy for pocket clearing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PocketStrategy {
    /// Concentric offset rings.
    #[default]
    Rings,
    /// Raster lines at `angle` degrees.
    ZigZag { angle: f64, unidirectional: bool },
}

/// Where ring clearing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingPlace {
    #[default]
    Boundary,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutMode {
    #[default]
    Conventional,
    Climb,
}

/// Pocket operation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PocketParams {
    pub tool_radius: f64,
    /// Material left on the walls
    pub extra_offset: f64,
    pub stepover: f64,
    pub strategy: PocketStrategy,
    pub starting_place: StartingPlace,
    pub cut_mode: CutMode,
    /// Feed between passes through cleared material instead of retracting
    pub keep_tool_down: bool,
    pub entry_style: EntryStyle,
    /// Start the first pass at the nearest point to this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_point: Option<Point>,
}

impl Default for PocketParams {
    fn default() -> Self {
        Self {
            tool_radius: 3.0,
            extra_offset: 0.0,
            stepover: 2.0,
            strategy: PocketStrategy::Rings,
            starting_place: StartingPlace::Boundary,
            cut_mode: CutMode::Conventional,
            keep_tool_down: false,
            entry_style: EntryStyle::Plunge,
            start_point: None,
        }
    }
}

impl PocketParams {
    /// Creates a ring pocket for a tool of `tool_radius`.
    pub fn new(tool_radius: f64, stepover: f64) -> Self {
        Self {
            tool_radius,
            stepover,
            ..Self::default()
        }
    }

    pub fn with_extra_offset(mut self, extra_offset: f64) -> Self {
        self.extra_offset = extra_offset;
        self
    }

    pub fn with_strategy(mut self, strategy: PocketStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_starting_place(mut self, starting_place: StartingPlace) -> Self {
        self.starting_place = starting_place;
        self
    }

    pub fn with_cut_mode(mut self, cut_mode: CutMode) -> Self {
        self.cut_mode = cut_mode;
        self
    }

    pub fn with_keep_tool_down(mut self, keep_tool_down: bool) -> Self {
        self.keep_tool_down = keep_tool_down;
        self
    }

    pub fn with_entry_style(mut self, entry_style: EntryStyle) -> Self {
        self.entry_style = entry_style;
        self
    }

    pub fn with_start_point(mut self, start_point: Point) -> Self {
        self.start_point = Some(start_point);
        self
    }

    pub fn from_center(&self) -> bool {
        self.starting_place == StartingPlace::Center
    }

    /// Whether planning needs the cleared area snapshot.
    pub fn needs_cleared_area(&self) -> bool {
        self.keep_tool_down || self.entry_style != EntryStyle::Plunge
    }

    pub fn validate(&self) -> PocketResult<()> {
        if !self.tool_radius.is_finite() || self.tool_radius <= 0.0 {
            return Err(PocketError::InvalidParameters(format!(
                "tool radius must be positive, got {}",
                self.tool_radius
            )));
        }
        if !self.stepover.is_finite() || self.stepover <= 0.0 {
            return Err(PocketError::InvalidParameters(format!(
                "stepover must be positive, got {}",
                self.stepover
            )));
        }
        if !self.extra_offset.is_finite() {
            return Err(PocketError::InvalidParameters(
                "extra offset must be finite".to_string(),
            ));
        }
        if let PocketStrategy::ZigZag { angle, .. } = self.strategy {
            if !angle.is_finite() {
                return Err(PocketError::InvalidParameters(
                    "zig-zag angle must be finite".to_string(),
                ));
            }
        }
        if self.start_point.is_some_and(|p| !p.is_finite()) {
            return Err(PocketError::InvalidParameters(
                "start point must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn request(&self) -> PocketRequest {
        PocketRequest {
            tool_radius: self.tool_radius,
            extra_offset: self.extra_offset,
            stepover: self.stepover,
            from_center: self.from_center(),
            zig_zag_angle: match self.strategy {
                PocketStrategy::Rings => None,
                PocketStrategy::ZigZag { angle, .. } => Some(angle),
            },
        }
    }
}

/// Counts reported after a successful pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PocketSummary {
    pub passes: usize,
    pub levels: usize,
    pub moves: usize,
}

/// Generates pocket toolpaths.
pub struct PocketGenerator<'a, E: ?Sized> {
    engine: &'a E,
    params: PocketParams,
    entry: EntryConfig,
}

impl<'a, E: GeometryEngine + ?Sized> PocketGenerator<'a, E> {
    pub fn new(engine: &'a E, params: PocketParams) -> Self {
        Self {
            engine,
            params,
            entry: EntryConfig::default(),
        }
    }

    pub fn with_entry_config(mut self, entry: EntryConfig) -> Self {
        self.entry = entry;
        self
    }

    pub fn params(&self) -> &PocketParams {
        &self.params
    }

    /// Builds the planning context for `boundary`.
    pub fn context(&self, boundary: &Area) -> PocketResult<PlanningContext> {
        let mut ctx = PlanningContext::new(self.params.tool_radius, self.engine.units());
        if self.params.needs_cleared_area() {
            let inset = self.params.extra_offset - CLEARED_AREA_MARGIN;
            let cleared = self.engine.offset(boundary, -inset)?;
            ctx = ctx.with_cleared_area(cleared);
        }
        if let PocketStrategy::ZigZag { angle, .. } = self.params.strategy {
            ctx = ctx.with_scan_angle(angle);
        }
        Ok(ctx)
    }

    /// Pass list for `boundary`, in cutting order.
    pub fn plan_curves(&self, boundary: &Area, ctx: &PlanningContext) -> PocketResult<Vec<Curve>> {
        if let Some(result) = self
            .engine
            .make_pocket_toolpath(boundary, &self.params.request())
        {
            debug!("Engine produced pocket passes");
            return Ok(result?);
        }

        let inset = self.params.tool_radius + self.params.extra_offset;
        let region = self.engine.offset(boundary, -inset)?;
        match self.params.strategy {
            PocketStrategy::ZigZag { unidirectional, .. } => {
                scan(self.engine, ctx, &region, self.params.stepover, unidirectional)
            }
            PocketStrategy::Rings => {
                let rings = decompose(
                    self.engine,
                    &region,
                    self.params.stepover,
                    self.params.from_center(),
                )?;
                Ok(flatten(&rings, self.params.cut_mode == CutMode::Climb))
            }
        }
    }

    /// Plans and cuts the pocket, sending the motions to `sink`.
    ///
    /// Motions are only sent once the whole pocket has been planned; on error
    /// the sink sees nothing.
    pub fn generate(
        &self,
        boundary: &Area,
        depths: &DepthParams,
        sink: &mut dyn MotionSink,
    ) -> PocketResult<PocketSummary> {
        self.generate_with_profile(boundary, depths, &DirectProfile, sink)
    }

    /// Like [`generate`](Self::generate), cutting the first pass with
    /// `profile` when a start point is set.
    pub fn generate_with_profile(
        &self,
        boundary: &Area,
        depths: &DepthParams,
        profile: &dyn ProfileCutter,
        sink: &mut dyn MotionSink,
    ) -> PocketResult<PocketSummary> {
        self.params.validate()?;
        self.entry.validate()?;
        depths.validate()?;

        let ctx = self.context(boundary)?;
        let curves = self.plan_curves(boundary, &ctx)?;
        let levels = depths.levels();

        let entry = EntryPlanner::new(&self.entry, &ctx, self.engine);
        let sequencer = CutSequencer::new(
            self.engine,
            &ctx,
            entry,
            self.params.entry_style,
            self.params.keep_tool_down,
        );
        let mut recorder = MoveRecorder::new();
        match self.params.start_point {
            Some(start) => {
                sequencer.cut_levels_from(&curves, &levels, start, profile, &mut recorder)?
            }
            None => sequencer.cut_levels(&curves, &levels, &mut recorder)?,
        }
        recorder.replay_into(sink);

        let summary = PocketSummary {
            passes: curves.len(),
            levels: levels.len(),
            moves: recorder.len(),
        };
        info!(
            passes = summary.passes,
            levels = summary.levels,
            moves = summary.moves,
            strategy = ?self.params.strategy,
            "Generated pocket"
        );
        Ok(summary)
    }
}

/// Pockets `boundary` with default entry tunables.
pub fn pocket<E: GeometryEngine + ?Sized>(
    engine: &E,
    boundary: &Area,
    params: &PocketParams,
    depths: &DepthParams,
    sink: &mut dyn MotionSink,
) -> PocketResult<PocketSummary> {
    PocketGenerator::new(engine, params.clone()).generate(boundary, depths, sink)
}
