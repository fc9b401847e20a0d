use serde::Serialize;

use crate::resource::ResourceId;
use crate::rows::{format_vec4, slot_label, RowHeader};
use crate::snapshot::PipelineSnapshot;
use crate::stage::ShaderStage;
use crate::visibility::VisibilityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexAttributeRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub name: String,
    pub enabled: bool,
    /// Array format, or the generic value fed while the array is disabled.
    pub format: String,
    pub buffer_slot: u32,
    pub relative_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexBufferRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub resource: Option<ResourceId>,
    pub name: String,
    pub stride: u32,
    pub offset: u64,
    pub divisor: u32,
    pub byte_length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexBufferRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub resource: Option<ResourceId>,
    pub name: String,
    pub index_byte_width: u32,
    pub byte_length: u64,
    pub restart_index: Option<u32>,
}

/// Every attribute array is reported as filled: a disabled array still feeds
/// its generic value to the shader.
pub fn resolve_vertex_attributes(
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<VertexAttributeRow> {
    let inputs = &snapshot.shader_stage(ShaderStage::Vertex).reflection.inputs;
    let mut rows = Vec::new();

    for (index, attribute) in snapshot.vertex_input.attributes.iter().enumerate() {
        let input = inputs
            .iter()
            .find(|input| usize::try_from(input.location).ok() == Some(index));
        let used = input.is_some();
        if !cfg.should_show(true, used) {
            continue;
        }

        let name = match input {
            Some(input) if !input.name.is_empty() => input.name.clone(),
            _ => format!("Attribute {index}"),
        };
        let format = if attribute.enabled {
            attribute.format.to_string()
        } else {
            format!("Generic={}", format_vec4(attribute.generic_value))
        };

        rows.push(VertexAttributeRow {
            header: RowHeader::new(index, slot_label(index, Some(name.as_str())), true, used),
            name,
            enabled: attribute.enabled,
            format,
            buffer_slot: attribute.buffer_slot,
            relative_offset: attribute.relative_offset,
        });
    }

    tracing::debug!(rows = rows.len(), "resolved vertex attributes");
    rows
}

pub fn resolve_vertex_buffers(
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<VertexBufferRow> {
    let attributes = &snapshot.vertex_input.attributes;
    let mut rows = Vec::new();

    for (slot, buffer) in snapshot.vertex_input.buffers.iter().enumerate() {
        let filled = buffer.resource.is_some();
        let used = attributes.iter().any(|attribute| {
            attribute.enabled && usize::try_from(attribute.buffer_slot).ok() == Some(slot)
        });
        if !cfg.should_show(filled, used) {
            continue;
        }

        let description = buffer.resource.and_then(|id| snapshot.buffer(id));
        let name = match (description, buffer.resource) {
            (Some(description), _) if !description.name.is_empty() => description.name.clone(),
            (_, Some(id)) => format!("Buffer {id}"),
            (_, None) => "Empty".to_string(),
        };

        rows.push(VertexBufferRow {
            header: RowHeader::new(slot, slot.to_string(), filled, used),
            resource: buffer.resource,
            name,
            stride: buffer.stride,
            offset: buffer.offset,
            divisor: buffer.divisor,
            byte_length: description.map_or(0, |description| description.length),
        });
    }

    tracing::debug!(rows = rows.len(), "resolved vertex buffers");
    rows
}

/// The element buffer counts as used only when the event is an indexed draw.
pub fn resolve_index_buffer(
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Option<IndexBufferRow> {
    let input = &snapshot.vertex_input;
    let filled = input.index_buffer.is_some();
    let used = snapshot.draw.is_some_and(|draw| draw.indexed);
    if !cfg.should_show(filled, used) {
        return None;
    }

    let description = input.index_buffer.and_then(|id| snapshot.buffer(id));
    let name = match (description, input.index_buffer) {
        (Some(description), _) if !description.name.is_empty() => description.name.clone(),
        (_, Some(id)) => format!("Buffer {id}"),
        (_, None) => "Empty".to_string(),
    };

    Some(IndexBufferRow {
        header: RowHeader::new(0, "Element", filled, used),
        resource: input.index_buffer,
        name,
        index_byte_width: input.index_byte_width,
        byte_length: description.map_or(0, |description| description.length),
        restart_index: input.primitive_restart.then_some(input.restart_index),
    })
}
