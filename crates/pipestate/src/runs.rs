//! Coalescing of per-slot viewport and scissor arrays into displayed runs.
//!
//! Consecutive slots holding identical rectangles are shown as one row
//! labelled `a-b`. A run whose rectangle is degenerate (zero extent, or a
//! flat depth range for viewports) is hidden unless empty rows are requested,
//! with one exception: when every earlier run was hidden the final run is
//! always emitted, so raw state never renders as an empty table.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::fixed::{Scissor, Viewport};
use crate::rows::RowHeader;
use crate::snapshot::PipelineSnapshot;
use crate::visibility::VisibilityConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportRunRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub slots: RangeInclusive<usize>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScissorRunRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub slots: RangeInclusive<usize>,
    pub scissor: Scissor,
}

/// Per-slot rectangle state that can be coalesced into runs.
trait RunState: PartialEq {
    fn is_degenerate(&self) -> bool;

    fn is_used(&self) -> bool {
        true
    }
}

impl RunState for Viewport {
    /// Zero extent, or a depth range that maps every fragment to one depth.
    fn is_degenerate(&self) -> bool {
        (self.width == 0.0 && self.height == 0.0) || self.min_depth == self.max_depth
    }
}

impl RunState for Scissor {
    fn is_degenerate(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    fn is_used(&self) -> bool {
        self.enabled
    }
}

pub fn aggregate_viewports(
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<ViewportRunRow> {
    let rows: Vec<ViewportRunRow> = coalesce(&snapshot.rasterizer.viewports, cfg)
        .into_iter()
        .map(|(header, slots, viewport)| ViewportRunRow {
            header,
            slots,
            viewport: *viewport,
        })
        .collect();
    tracing::debug!(
        slots = snapshot.rasterizer.viewports.len(),
        rows = rows.len(),
        "aggregated viewports"
    );
    rows
}

pub fn aggregate_scissors(
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<ScissorRunRow> {
    let rows: Vec<ScissorRunRow> = coalesce(&snapshot.rasterizer.scissors, cfg)
        .into_iter()
        .map(|(header, slots, scissor)| ScissorRunRow {
            header,
            slots,
            scissor: *scissor,
        })
        .collect();
    tracing::debug!(
        slots = snapshot.rasterizer.scissors.len(),
        rows = rows.len(),
        "aggregated scissors"
    );
    rows
}

fn coalesce<T: RunState>(
    states: &[T],
    cfg: VisibilityConfig,
) -> Vec<(RowHeader, RangeInclusive<usize>, &T)> {
    let mut rows = Vec::new();
    if states.is_empty() {
        return rows;
    }

    let mut prev = 0;
    for i in 1..states.len() {
        if states[i] == states[prev] {
            continue;
        }
        let state = &states[prev];
        if !state.is_degenerate() || cfg.show_empty {
            rows.push(run_row(prev, i - 1, state));
        }
        prev = i;
    }

    let last = states.len() - 1;
    let state = &states[prev];
    if !state.is_degenerate() || cfg.show_empty || rows.is_empty() {
        rows.push(run_row(prev, last, state));
    }
    rows
}

fn run_row<T: RunState>(
    start: usize,
    end: usize,
    state: &T,
) -> (RowHeader, RangeInclusive<usize>, &T) {
    let label = if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    };
    let header = RowHeader::new(start, label, !state.is_degenerate(), state.is_used());
    (header, start..=end, state)
}
