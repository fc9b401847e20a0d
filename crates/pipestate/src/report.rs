//! One resolution pass over a snapshot, collected into a serializable report.

use serde::Serialize;

use crate::activity::{infer_stage_activity, StageActivity};
use crate::bindmap::BindSlotMap;
use crate::constants::{resolve_constant_blocks, ConstantBlockRow};
use crate::error::ResolveError;
use crate::output::{
    resolve_attachments, resolve_blend_targets, resolve_stencil_faces, AttachmentRow, BlendRow,
    StencilFaceRow,
};
use crate::readonly::{resolve_with_slots, SamplerRow, TextureRow};
use crate::readwrite::{resolve_read_write_bindings, ReadWriteRow};
use crate::resource::ResourceId;
use crate::runs::{aggregate_scissors, aggregate_viewports, ScissorRunRow, ViewportRunRow};
use crate::snapshot::PipelineSnapshot;
use crate::stage::{PipelineStage, ShaderStage};
use crate::subroutines::{resolve_subroutines, SubroutineRow};
use crate::summary::RasterizerSummary;
use crate::vertex::{
    resolve_index_buffer, resolve_vertex_attributes, resolve_vertex_buffers, IndexBufferRow,
    VertexAttributeRow, VertexBufferRow,
};
use crate::visibility::VisibilityConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub event_id: u32,
    pub visibility: VisibilityConfig,
    pub activity: StageActivity,
    pub vertex_input: VertexInputReport,
    pub stages: Vec<StageReport>,
    pub viewports: Vec<ViewportRunRow>,
    pub scissors: Vec<ScissorRunRow>,
    pub rasterizer: RasterizerSummary,
    pub attachments: Vec<AttachmentRow>,
    pub blend: Vec<BlendRow>,
    pub stencil: [StencilFaceRow; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexInputReport {
    pub attributes: Vec<VertexAttributeRow>,
    pub buffers: Vec<VertexBufferRow>,
    pub index_buffer: Option<IndexBufferRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: ShaderStage,
    /// Pipeline-flow label, e.g. `GS/XFB` while transform feedback is active.
    pub label: &'static str,
    pub active: bool,
    pub shader: Option<ResourceId>,
    pub entry_point: String,
    pub textures: Vec<TextureRow>,
    pub samplers: Vec<SamplerRow>,
    pub constant_blocks: Vec<ConstantBlockRow>,
    pub read_write: Vec<ReadWriteRow>,
    pub subroutines: Vec<SubroutineRow>,
}

impl PipelineReport {
    /// Runs every resolver once against `snapshot` with the same visibility.
    pub fn build(snapshot: &PipelineSnapshot, cfg: VisibilityConfig) -> Self {
        let activity = infer_stage_activity(snapshot);
        let stages = ShaderStage::ALL
            .into_iter()
            .map(|stage| StageReport::build(stage, snapshot, &activity, cfg))
            .collect();

        let report = Self {
            event_id: snapshot.event_id,
            visibility: cfg,
            activity,
            vertex_input: VertexInputReport {
                attributes: resolve_vertex_attributes(snapshot, cfg),
                buffers: resolve_vertex_buffers(snapshot, cfg),
                index_buffer: resolve_index_buffer(snapshot, cfg),
            },
            stages,
            viewports: aggregate_viewports(snapshot, cfg),
            scissors: aggregate_scissors(snapshot, cfg),
            rasterizer: RasterizerSummary::describe(snapshot),
            attachments: resolve_attachments(snapshot, cfg),
            blend: resolve_blend_targets(snapshot, cfg),
            stencil: resolve_stencil_faces(snapshot),
        };
        tracing::debug!(event = snapshot.event_id, "built pipeline report");
        report
    }

    pub fn stage(&self, stage: ShaderStage) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }

    /// Drops every stage section not listed in `keep`; an empty list keeps all.
    pub fn retain_stages(&mut self, keep: &[ShaderStage]) {
        if !keep.is_empty() {
            self.stages.retain(|report| keep.contains(&report.stage));
        }
    }
}

impl StageReport {
    fn build(
        stage: ShaderStage,
        snapshot: &PipelineSnapshot,
        activity: &StageActivity,
        cfg: VisibilityConfig,
    ) -> Self {
        let state = snapshot.shader_stage(stage);
        let pipeline_stage: PipelineStage = stage.pipeline_stage();
        let slots = BindSlotMap::for_read_only(state);
        let (textures, samplers) = resolve_with_slots(state, &slots, snapshot, cfg);

        Self {
            stage,
            label: activity.label(pipeline_stage),
            active: activity.is_enabled(pipeline_stage),
            shader: state.shader,
            entry_point: state.reflection.entry_point.clone(),
            textures,
            samplers,
            constant_blocks: resolve_constant_blocks(stage, snapshot, cfg),
            read_write: resolve_read_write_bindings(stage, snapshot, cfg),
            subroutines: resolve_subroutines(stage, snapshot),
        }
    }
}

/// Holds the snapshot of the currently selected event.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    snapshot: Option<PipelineSnapshot>,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection.
    pub fn select(&mut self, snapshot: PipelineSnapshot) {
        tracing::debug!(event = snapshot.event_id, "selected event");
        self.snapshot = Some(snapshot);
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    pub fn snapshot(&self) -> Option<&PipelineSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn report(&self, cfg: VisibilityConfig) -> Result<PipelineReport, ResolveError> {
        let snapshot = self.snapshot.as_ref().ok_or(ResolveError::NoSnapshot)?;
        Ok(PipelineReport::build(snapshot, cfg))
    }
}
