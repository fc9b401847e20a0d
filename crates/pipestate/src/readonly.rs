use serde::Serialize;

use crate::addressing::compact_addressing;
use crate::bindmap::BindSlotMap;
use crate::resource::{
    DepthReadChannel, FilterFunction, ResourceId, TextureDescription, TextureType,
};
use crate::rows::{slot_label, RowHeader};
use crate::snapshot::{PipelineSnapshot, SamplerBinding, ShaderStageState, TextureBinding};
use crate::stage::ShaderStage;
use crate::visibility::VisibilityConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub resource: Option<ResourceId>,
    pub name: String,
    pub texture_type: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub array_size: u32,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplerRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub resource: Option<ResourceId>,
    pub addressing: String,
    pub filter: String,
    pub lod_range: String,
    pub lod_bias: f32,
}

/// Resolves every texture unit of `stage` into a texture row and its paired
/// sampler row.
pub fn resolve_read_only_bindings(
    stage: ShaderStage,
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> (Vec<TextureRow>, Vec<SamplerRow>) {
    let state = snapshot.shader_stage(stage);
    let slots = BindSlotMap::for_read_only(state);
    let resolved = resolve_with_slots(state, &slots, snapshot, cfg);
    tracing::debug!(
        %stage,
        units = state.textures.len(),
        rows = resolved.0.len(),
        "resolved read-only bindings"
    );
    resolved
}

pub(crate) fn resolve_with_slots(
    state: &ShaderStageState,
    slots: &BindSlotMap,
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> (Vec<TextureRow>, Vec<SamplerRow>) {
    let mut textures = Vec::new();
    let mut samplers = Vec::new();

    for (slot, unit) in state.textures.iter().enumerate() {
        let declaration = slots.declaration(slot).and_then(|index| {
            Some((
                state.reflection.read_only.get(index)?,
                state.mapping.read_only.get(index)?,
            ))
        });

        let filled = unit.texture.resource.is_some();
        let used = declaration.is_some_and(|(_, bindpoint)| bindpoint.used);
        if !cfg.should_show(filled, used) {
            continue;
        }

        let label = slot_label(slot, declaration.map(|(input, _)| input.name.as_str()));
        let description = unit
            .texture
            .resource
            .and_then(|id| snapshot.texture(id));

        textures.push(texture_row(
            RowHeader::new(slot, label.clone(), filled, used),
            &unit.texture,
            description,
        ));

        let shape = match unit.texture.texture_type {
            TextureType::Unknown => description.map_or(TextureType::Unknown, |d| d.texture_type),
            bound => bound,
        };
        samplers.push(sampler_row(
            RowHeader::new(slot, label, filled, used),
            &unit.sampler,
            shape,
        ));
    }

    (textures, samplers)
}

fn texture_row(
    header: RowHeader,
    binding: &TextureBinding,
    description: Option<&TextureDescription>,
) -> TextureRow {
    let Some(id) = binding.resource else {
        return TextureRow {
            header,
            resource: None,
            name: "Empty".to_string(),
            texture_type: "-".to_string(),
            width: 0,
            height: 0,
            depth: 0,
            array_size: 0,
            format: "-".to_string(),
        };
    };

    let Some(texture) = description else {
        return TextureRow {
            header,
            resource: Some(id),
            name: format!("Texture {id}"),
            texture_type: "-".to_string(),
            width: 0,
            height: 0,
            depth: 0,
            array_size: 0,
            format: "-".to_string(),
        };
    };

    TextureRow {
        header,
        resource: Some(id),
        name: if texture.name.is_empty() {
            format!("Texture {id}")
        } else {
            texture.name.clone()
        },
        texture_type: texture.texture_type.to_string(),
        width: texture.width,
        height: texture.height,
        depth: texture.depth,
        array_size: texture.array_size,
        format: describe_format(texture, binding),
    }
}

/// Texture format plus how the view reinterprets it.
fn describe_format(texture: &TextureDescription, binding: &TextureBinding) -> String {
    let mut format = texture.format.to_string();
    if texture.format.is_combined_depth_stencil() {
        match binding.depth_read_channel {
            Some(DepthReadChannel::Depth) => format.push_str(" Depth-Read"),
            Some(DepthReadChannel::Stencil) => format.push_str(" Stencil-Read"),
            None => {}
        }
    } else if !binding.swizzle.is_identity() {
        format.push_str(&format!(" swizzle[{}]", binding.swizzle));
    }
    format
}

fn sampler_row(header: RowHeader, sampler: &SamplerBinding, shape: TextureType) -> SamplerRow {
    let border = sampler.uses_border().then_some(sampler.border_color);
    let seamless = shape.is_cube().then_some(sampler.seamless_cube);

    SamplerRow {
        header,
        resource: sampler.resource,
        addressing: compact_addressing(sampler.address_modes(), border, seamless),
        filter: describe_filter(sampler),
        lod_range: describe_lod_range(sampler.min_lod, sampler.max_lod),
        lod_bias: sampler.lod_bias,
    }
}

pub(crate) fn describe_filter(sampler: &SamplerBinding) -> String {
    let mut filter = format!(
        "{}, {}, {}",
        sampler.min_filter, sampler.mag_filter, sampler.mip_filter
    );
    if sampler.max_anisotropy > 1.0 {
        filter.push_str(&format!(" Aniso{}x", sampler.max_anisotropy));
    }
    match sampler.function {
        FilterFunction::Comparison => {
            filter.push_str(&format!(" ({})", sampler.compare_function));
        }
        FilterFunction::Minimum | FilterFunction::Maximum => {
            filter.push_str(&format!(" ({})", sampler.function));
        }
        FilterFunction::Normal => {}
    }
    filter
}

fn describe_lod_range(min_lod: f32, max_lod: f32) -> String {
    let min = if min_lod == -f32::MAX {
        "-FLT_MAX".to_string()
    } else {
        min_lod.to_string()
    };
    let max = if max_lod == f32::MAX {
        "FLT_MAX".to_string()
    } else {
        max_lod.to_string()
    };
    format!("{min} - {max}")
}
