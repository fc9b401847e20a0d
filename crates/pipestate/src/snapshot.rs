//! The captured state of one event, exactly as the replay core decoded it.
//!
//! `PipelineSnapshot` is read-only input for every resolver. It owns:
//!
//! - `ShaderStages`: one `ShaderStageState` per programmable stage, each with
//!   the shader's reflection, its bindpoint mapping, and the raw per-slot
//!   binding arrays the stage sees.
//! - the global texture and buffer tables, looked up by `ResourceId`.
//! - the fixed-function blocks (vertex input, rasterizer, multisample, depth,
//!   stencil, blend, framebuffer) and the optional draw/dispatch context.
//!
//! Snapshots can be deserialized from JSON so tools and tests can feed
//! pre-decoded state. `validate` reports inconsistencies without rejecting the
//! snapshot; resolvers degrade gracefully on the same inputs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::fixed::{
    BlendState, DepthState, DrawContext, Framebuffer, MultisampleState, RasterizerState,
    StencilState, VertexInput,
};
use crate::readwrite::ReadWriteKind;
use crate::reflection::{Bindpoint, BindpointMapping, ShaderReflection};
use crate::resource::{
    AddressMode, BufferDescription, CompareFunction, DepthReadChannel, FilterFunction,
    FilterMode, ResourceFormat, ResourceId, Swizzle, TextureDescription, TextureType,
};
use crate::stage::{PipelineStage, ShaderStage};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSnapshot {
    pub event_id: u32,
    pub stages: ShaderStages,
    pub textures: Vec<TextureDescription>,
    pub buffers: Vec<BufferDescription>,
    pub vertex_input: VertexInput,
    pub rasterizer: RasterizerState,
    pub multisample: MultisampleState,
    pub depth: DepthState,
    pub stencil: StencilState,
    pub blend: BlendState,
    pub framebuffer: Framebuffer,
    /// `None` when the event is not a draw or dispatch the replay could identify.
    pub draw: Option<DrawContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderStages {
    #[serde(rename = "vs")]
    pub vertex: ShaderStageState,
    #[serde(rename = "tcs")]
    pub tess_control: ShaderStageState,
    #[serde(rename = "tes")]
    pub tess_eval: ShaderStageState,
    #[serde(rename = "gs")]
    pub geometry: ShaderStageState,
    #[serde(rename = "fs")]
    pub fragment: ShaderStageState,
    #[serde(rename = "cs")]
    pub compute: ShaderStageState,
}

impl ShaderStages {
    pub fn get(&self, stage: ShaderStage) -> &ShaderStageState {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::TessControl => &self.tess_control,
            ShaderStage::TessEval => &self.tess_eval,
            ShaderStage::Geometry => &self.geometry,
            ShaderStage::Fragment => &self.fragment,
            ShaderStage::Compute => &self.compute,
        }
    }

    pub fn get_mut(&mut self, stage: ShaderStage) -> &mut ShaderStageState {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::TessControl => &mut self.tess_control,
            ShaderStage::TessEval => &mut self.tess_eval,
            ShaderStage::Geometry => &mut self.geometry,
            ShaderStage::Fragment => &mut self.fragment,
            ShaderStage::Compute => &mut self.compute,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderStageState {
    pub shader: Option<ResourceId>,
    pub reflection: ShaderReflection,
    pub mapping: BindpointMapping,
    pub textures: Vec<TextureUnit>,
    pub uniform_buffers: Vec<BufferBinding>,
    pub images: Vec<ImageBinding>,
    pub atomic_buffers: Vec<BufferBinding>,
    pub storage_buffers: Vec<BufferBinding>,
    /// Selected function index for each subroutine uniform.
    pub subroutines: Vec<u32>,
}

impl ShaderStageState {
    pub fn is_bound(&self) -> bool {
        self.shader.is_some()
    }
}

/// A texture unit: the bound texture view and the sampler state applied to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureUnit {
    pub texture: TextureBinding,
    pub sampler: SamplerBinding,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureBinding {
    pub resource: Option<ResourceId>,
    /// Target the texture is bound to on this unit.
    pub texture_type: TextureType,
    pub first_mip: u32,
    pub depth_read_channel: Option<DepthReadChannel>,
    pub swizzle: Swizzle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerBinding {
    /// Sampler object, or `None` when the texture's own parameters apply.
    pub resource: Option<ResourceId>,
    pub address_s: AddressMode,
    pub address_t: AddressMode,
    pub address_r: AddressMode,
    pub border_color: [f32; 4],
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub mip_filter: FilterMode,
    pub function: FilterFunction,
    pub compare_function: CompareFunction,
    pub max_anisotropy: f32,
    pub min_lod: f32,
    pub max_lod: f32,
    pub lod_bias: f32,
    pub seamless_cube: bool,
}

impl SamplerBinding {
    pub fn address_modes(&self) -> [AddressMode; 3] {
        [self.address_s, self.address_t, self.address_r]
    }

    pub fn uses_border(&self) -> bool {
        self.address_modes()
            .iter()
            .any(|mode| *mode == AddressMode::ClampToBorder)
    }
}

impl Default for SamplerBinding {
    fn default() -> Self {
        Self {
            resource: None,
            address_s: AddressMode::Wrap,
            address_t: AddressMode::Wrap,
            address_r: AddressMode::Wrap,
            border_color: [0.0; 4],
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            mip_filter: FilterMode::Linear,
            function: FilterFunction::Normal,
            compare_function: CompareFunction::LessEqual,
            max_anisotropy: 1.0,
            min_lod: -1000.0,
            max_lod: 1000.0,
            lod_bias: 0.0,
            seamless_cube: false,
        }
    }
}

/// A buffer range bound to an indexed binding point. A `size` of zero binds
/// the whole buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferBinding {
    pub resource: Option<ResourceId>,
    pub offset: u64,
    pub size: u64,
}

impl BufferBinding {
    pub fn new(resource: ResourceId, offset: u64, size: u64) -> Self {
        Self {
            resource: Some(resource),
            offset,
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageBinding {
    pub resource: Option<ResourceId>,
    pub mip_level: u32,
    pub layered: bool,
    pub layer: u32,
    pub format: ResourceFormat,
    pub read_allowed: bool,
    pub write_allowed: bool,
}

impl Default for ImageBinding {
    fn default() -> Self {
        Self {
            resource: None,
            mip_level: 0,
            layered: false,
            layer: 0,
            format: ResourceFormat::default(),
            read_allowed: true,
            write_allowed: true,
        }
    }
}

impl PipelineSnapshot {
    pub fn from_json_str(input: &str) -> Result<Self, SnapshotError> {
        let snapshot: PipelineSnapshot = serde_json::from_str(input)?;
        Ok(snapshot)
    }

    /// Shader state backing a pipeline slot; `None` for fixed-function slots.
    pub fn stage(&self, stage: PipelineStage) -> Option<&ShaderStageState> {
        stage.shader_stage().map(|shader| self.stages.get(shader))
    }

    pub fn shader_stage(&self, stage: ShaderStage) -> &ShaderStageState {
        self.stages.get(stage)
    }

    pub fn texture(&self, id: ResourceId) -> Option<&TextureDescription> {
        self.textures.iter().find(|texture| texture.id == id)
    }

    pub fn buffer(&self, id: ResourceId) -> Option<&BufferDescription> {
        self.buffers.iter().find(|buffer| buffer.id == id)
    }

    /// Reports inconsistencies in the captured state. Resolution still works on
    /// a snapshot with issues; the list only explains odd-looking rows.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for texture in &self.textures {
            if !seen.insert(texture.id) {
                issues.push(format!("texture {} is listed more than once", texture.id));
            }
        }
        let mut seen = HashSet::new();
        for buffer in &self.buffers {
            if !seen.insert(buffer.id) {
                issues.push(format!("buffer {} is listed more than once", buffer.id));
            }
        }

        for stage in ShaderStage::ALL {
            let state = self.stages.get(stage);
            let reflection = &state.reflection;
            let mapping = &state.mapping;

            let lists = [
                (
                    "read-only resources",
                    reflection.read_only.len(),
                    mapping.read_only.len(),
                ),
                (
                    "read-write resources",
                    reflection.read_write.len(),
                    mapping.read_write.len(),
                ),
                (
                    "constant blocks",
                    reflection.constant_blocks.len(),
                    mapping.constant_blocks.len(),
                ),
            ];
            for (category, declared, mapped) in lists {
                if declared != mapped {
                    issues.push(format!(
                        "{stage} declares {declared} {category} but maps {mapped}"
                    ));
                }
            }

            for (index, bindpoint) in mapping.read_only.iter().enumerate() {
                check_bind(
                    &mut issues,
                    stage,
                    "read-only resource",
                    index,
                    bindpoint,
                    "texture unit",
                    state.textures.len(),
                );
            }
            let read_write = reflection.read_write.iter().zip(&mapping.read_write);
            for (index, (resource, bindpoint)) in read_write.enumerate() {
                let (array, slots) = match ReadWriteKind::classify(resource) {
                    ReadWriteKind::Image => ("image", state.images.len()),
                    ReadWriteKind::Atomic => ("atomic buffer", state.atomic_buffers.len()),
                    ReadWriteKind::StructuredBuffer => {
                        ("storage buffer", state.storage_buffers.len())
                    }
                };
                check_bind(
                    &mut issues,
                    stage,
                    "read-write resource",
                    index,
                    bindpoint,
                    array,
                    slots,
                );
            }
            for (index, bindpoint) in mapping.constant_blocks.iter().enumerate() {
                let slots = state.uniform_buffers.len();
                check_bind(
                    &mut issues,
                    stage,
                    "constant block",
                    index,
                    bindpoint,
                    "uniform buffer",
                    slots,
                );
            }

            if !state.is_bound()
                && (!reflection.read_only.is_empty()
                    || !reflection.read_write.is_empty()
                    || !reflection.constant_blocks.is_empty())
            {
                issues.push(format!("{stage} has reflection data but no bound shader"));
            }
        }

        if let Some(draw) = &self.draw {
            if draw.indexed && self.vertex_input.index_buffer.is_none() {
                issues.push("indexed draw without a bound index buffer".to_string());
            }
        }

        issues
    }
}

fn check_bind(
    issues: &mut Vec<String>,
    stage: ShaderStage,
    category: &str,
    index: usize,
    bindpoint: &Bindpoint,
    array: &str,
    slots: usize,
) {
    if let Some(slot) = bindpoint.slot() {
        if slot >= slots {
            issues.push(format!(
                "{stage} {category} {index} binds slot {slot} outside the {slots} {array} slots"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{ConstantBlock, ShaderResource};

    const SAMPLE: &str = r#"
{
    "event_id": 42,
    "stages": {
        "vs": {
            "shader": 7,
            "reflection": {
                "constant_blocks": [{ "name": "Camera", "byte_size": 64 }]
            },
            "mapping": {
                "constant_blocks": [{ "bind": 0, "used": true }]
            },
            "uniform_buffers": [{ "resource": 12, "offset": 0, "size": 64 }]
        }
    },
    "textures": [
        { "id": 3, "name": "albedo", "texture_type": "texture_2d", "width": 256, "height": 256 }
    ],
    "buffers": [{ "id": 12, "name": "camera_ubo", "length": 256 }],
    "draw": { "indexed": false, "topology": "triangle_list" }
}
"#;

    #[test]
    fn parses_sparse_snapshot() {
        let snapshot = PipelineSnapshot::from_json_str(SAMPLE).expect("parse snapshot");
        assert_eq!(snapshot.event_id, 42);
        let vs = snapshot.shader_stage(ShaderStage::Vertex);
        assert_eq!(vs.shader, Some(ResourceId(7)));
        assert_eq!(vs.reflection.constant_blocks[0].byte_size, 64);
        assert!(!snapshot.shader_stage(ShaderStage::Fragment).is_bound());
        assert_eq!(snapshot.buffer(ResourceId(12)).map(|b| b.length), Some(256));
        assert_eq!(snapshot.texture(ResourceId(3)).map(|t| t.depth), Some(1));
        assert!(snapshot.texture(ResourceId(4)).is_none());
        assert!(snapshot.validate().is_empty(), "{:?}", snapshot.validate());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PipelineSnapshot::from_json_str("{ \"event_id\": \"x\" }").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn fixed_function_slots_have_no_stage_state() {
        let snapshot = PipelineSnapshot::default();
        assert!(snapshot.stage(PipelineStage::Rasterizer).is_none());
        assert!(snapshot.stage(PipelineStage::Fragment).is_some());
    }

    #[test]
    fn validate_reports_mapping_mismatches() {
        let mut snapshot = PipelineSnapshot::default();
        let fs = snapshot.stages.get_mut(ShaderStage::Fragment);
        fs.shader = Some(ResourceId(1));
        fs.reflection.constant_blocks = vec![ConstantBlock::default(), ConstantBlock::default()];
        fs.mapping.constant_blocks = vec![Bindpoint::new(4, true)];
        let issues = snapshot.validate();
        assert!(issues
            .iter()
            .any(|issue| issue.contains("declares 2 constant blocks but maps 1")));
        assert!(issues.iter().any(|issue| issue.contains("binds slot 4")));
    }

    #[test]
    fn validate_reports_binds_past_the_slot_arrays() {
        let mut snapshot = PipelineSnapshot::default();
        let cs = snapshot.stages.get_mut(ShaderStage::Compute);
        cs.shader = Some(ResourceId(3));
        cs.reflection.read_only = vec![ShaderResource {
            name: "noise".into(),
            is_texture: true,
            ..ShaderResource::default()
        }];
        cs.reflection.read_write = vec![
            ShaderResource {
                name: "target".into(),
                is_texture: true,
                ..ShaderResource::default()
            },
            ShaderResource {
                name: "particles".into(),
                ..ShaderResource::default()
            },
        ];
        cs.mapping.read_only = vec![Bindpoint::new(2, true)];
        cs.mapping.read_write = vec![Bindpoint::new(1, true), Bindpoint::new(0, true)];
        cs.textures = vec![TextureUnit::default(); 2];
        cs.images = vec![ImageBinding::default()];
        cs.storage_buffers = vec![BufferBinding::default()];

        let issues = snapshot.validate();
        assert_eq!(
            issues,
            [
                "CS read-only resource 0 binds slot 2 outside the 2 texture unit slots",
                "CS read-write resource 0 binds slot 1 outside the 1 image slots",
            ]
        );
    }

    #[test]
    fn sampler_border_follows_address_modes() {
        let mut sampler = SamplerBinding::default();
        assert!(!sampler.uses_border());
        sampler.address_r = AddressMode::ClampToBorder;
        assert!(sampler.uses_border());
    }
}
