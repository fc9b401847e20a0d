use serde::Serialize;

use crate::snapshot::PipelineSnapshot;
use crate::stage::{PipelineStage, ShaderStage, PIPELINE_STAGE_COUNT};

/// Which pipeline slots took part in the selected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageActivity {
    enabled: [bool; PIPELINE_STAGE_COUNT],
    /// Geometry slot is showing transform feedback rather than (only) a shader.
    transform_feedback: bool,
}

impl StageActivity {
    fn all(enabled: bool) -> Self {
        Self {
            enabled: [enabled; PIPELINE_STAGE_COUNT],
            transform_feedback: false,
        }
    }

    pub fn is_enabled(&self, stage: PipelineStage) -> bool {
        self.enabled[stage.index()]
    }

    pub fn as_flags(&self) -> [bool; PIPELINE_STAGE_COUNT] {
        self.enabled
    }

    pub fn label(&self, stage: PipelineStage) -> &'static str {
        match stage {
            PipelineStage::Geometry if self.transform_feedback => "GS/XFB",
            other => other.label(),
        }
    }

    fn set(&mut self, stage: PipelineStage, enabled: bool) {
        self.enabled[stage.index()] = enabled;
    }
}

/// Derives stage activity from the event's draw context alone; nothing is
/// carried over from earlier events.
pub fn infer_stage_activity(snapshot: &PipelineSnapshot) -> StageActivity {
    let Some(draw) = snapshot.draw else {
        tracing::debug!("no draw context; treating every stage as active");
        return StageActivity::all(true);
    };

    let mut activity = StageActivity::all(false);
    if draw.dispatch {
        activity.set(PipelineStage::Compute, true);
        return activity;
    }

    let bound = |stage: ShaderStage| snapshot.shader_stage(stage).is_bound();
    let rasterizing = !draw.rasterizer_discard;

    activity.set(PipelineStage::VertexInput, true);
    activity.set(PipelineStage::Vertex, true);
    activity.set(PipelineStage::TessControl, bound(ShaderStage::TessControl));
    activity.set(PipelineStage::TessEval, bound(ShaderStage::TessEval));
    activity.set(
        PipelineStage::Geometry,
        bound(ShaderStage::Geometry) || draw.transform_feedback,
    );
    activity.set(PipelineStage::Rasterizer, rasterizing);
    activity.set(
        PipelineStage::Fragment,
        rasterizing && bound(ShaderStage::Fragment),
    );
    activity.set(PipelineStage::Framebuffer, rasterizing);
    activity.transform_feedback = draw.transform_feedback;

    activity
}
