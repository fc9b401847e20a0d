use std::ops::Range;

use serde::Serialize;

use crate::reflection::ConstantBlock;
use crate::resource::ResourceId;
use crate::rows::RowHeader;
use crate::snapshot::{BufferBinding, PipelineSnapshot};
use crate::stage::ShaderStage;
use crate::visibility::VisibilityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantBlockRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub resource: Option<ResourceId>,
    pub name: String,
    pub variable_count: usize,
    pub required_bytes: u64,
    pub provided_bytes: u64,
    /// Bytes of the buffer visible to the block, `None` when nothing is bound.
    pub byte_range: Option<Range<u64>>,
    pub size_summary: String,
}

/// Resolves each declared constant block of `stage` against the uniform
/// buffer bound at its bindpoint.
///
/// A bound buffer that is smaller than the block's declared size is reported
/// as empty: the shader would read past the end of it.
pub fn resolve_constant_blocks(
    stage: ShaderStage,
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<ConstantBlockRow> {
    let state = snapshot.shader_stage(stage);
    let mut rows = Vec::new();

    for (index, block) in state.reflection.constant_blocks.iter().enumerate() {
        let bindpoint = state
            .mapping
            .constant_blocks
            .get(index)
            .copied()
            .unwrap_or_default();
        let binding = bindpoint
            .slot()
            .and_then(|slot| state.uniform_buffers.get(slot))
            .filter(|binding| binding.resource.is_some());

        let provided = binding.map(|binding| provided_bytes(binding, snapshot));
        // An undersized buffer cannot back the block even though something is bound.
        let filled = match provided {
            Some(provided) => provided >= block.byte_size,
            None => !block.buffer_backed,
        };
        let used = bindpoint.used;
        if !cfg.should_show(filled, used) {
            continue;
        }

        let label = if !block.buffer_backed {
            "Uniforms".to_string()
        } else if bindpoint.slot().is_some() {
            format!("{}: {}", bindpoint.bind, block.name)
        } else {
            block.name.clone()
        };

        let header = RowHeader::new(index, label, filled, used);
        let row = match (binding, provided) {
            (Some(binding), Some(provided)) => {
                bound_block_row(header, block, binding, provided, snapshot)
            }
            _ => unbound_block_row(header, block),
        };
        if row.resource.is_some() && !row.header.is_filled() {
            tracing::debug!(
                %stage,
                block = %block.name,
                required = row.required_bytes,
                provided = row.provided_bytes,
                "constant buffer smaller than declared block"
            );
        }
        rows.push(row);
    }

    tracing::debug!(%stage, rows = rows.len(), "resolved constant blocks");
    rows
}

/// Bytes the binding exposes; a zero-sized binding covers the whole buffer.
fn provided_bytes(binding: &BufferBinding, snapshot: &PipelineSnapshot) -> u64 {
    let buffer = binding.resource.and_then(|id| snapshot.buffer(id));
    match (binding.size, buffer) {
        (0, Some(buffer)) => buffer.length,
        (size, _) => size,
    }
}

fn bound_block_row(
    header: RowHeader,
    block: &ConstantBlock,
    binding: &BufferBinding,
    provided_bytes: u64,
    snapshot: &PipelineSnapshot,
) -> ConstantBlockRow {
    let variable_count = block.variables.len();
    let buffer = binding.resource.and_then(|id| snapshot.buffer(id));

    let name = match (buffer, binding.resource) {
        (Some(buffer), _) if !buffer.name.is_empty() => buffer.name.clone(),
        (_, Some(id)) => format!("UBO {id}"),
        (_, None) => "Empty".to_string(),
    };

    let size_summary = if provided_bytes == block.byte_size {
        format!("{variable_count} Variables, {} bytes", block.byte_size)
    } else {
        format!(
            "{variable_count} Variables, {} bytes needed, {provided_bytes} provided",
            block.byte_size
        )
    };

    ConstantBlockRow {
        header,
        resource: binding.resource,
        name,
        variable_count,
        required_bytes: block.byte_size,
        provided_bytes,
        byte_range: Some(binding.offset..binding.offset.saturating_add(provided_bytes)),
        size_summary,
    }
}

fn unbound_block_row(header: RowHeader, block: &ConstantBlock) -> ConstantBlockRow {
    let variable_count = block.variables.len();
    let name = if block.buffer_backed {
        "Empty".to_string()
    } else {
        String::new()
    };

    ConstantBlockRow {
        header,
        resource: None,
        name,
        variable_count,
        required_bytes: block.byte_size,
        provided_bytes: 0,
        byte_range: None,
        size_summary: format!("{variable_count} Variables"),
    }
}
