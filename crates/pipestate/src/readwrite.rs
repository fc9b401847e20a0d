use std::fmt;

use serde::Serialize;

use crate::reflection::{ShaderResource, VarBaseType};
use crate::resource::{ResourceId, TextureDescription};
use crate::rows::{slot_label, RowHeader};
use crate::snapshot::{BufferBinding, ImageBinding, PipelineSnapshot, ShaderStageState};
use crate::stage::ShaderStage;
use crate::visibility::VisibilityConfig;

/// Shape of a read-write declaration, which decides the binding table that
/// backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadWriteKind {
    Image,
    Atomic,
    StructuredBuffer,
}

impl ReadWriteKind {
    pub fn classify(resource: &ShaderResource) -> Self {
        let var = &resource.variable_type;
        if resource.is_texture {
            ReadWriteKind::Image
        } else if var.is_scalar() && var.base == VarBaseType::UInt {
            ReadWriteKind::Atomic
        } else {
            ReadWriteKind::StructuredBuffer
        }
    }
}

impl fmt::Display for ReadWriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadWriteKind::Image => f.write_str("Image"),
            ReadWriteKind::Atomic => f.write_str("Atomic"),
            ReadWriteKind::StructuredBuffer => f.write_str("SSBO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadWriteRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub kind: ReadWriteKind,
    pub resource: Option<ResourceId>,
    pub name: String,
    pub dimensions: String,
    pub format: String,
    pub access: String,
}

/// The raw binding a read-write declaration resolved to.
enum Backing<'a> {
    Image(&'a ImageBinding),
    Buffer(&'a BufferBinding),
    Unbound,
}

impl Backing<'_> {
    fn resource(&self) -> Option<ResourceId> {
        match self {
            Backing::Image(image) => image.resource,
            Backing::Buffer(buffer) => buffer.resource,
            Backing::Unbound => None,
        }
    }
}

/// Resolves each read-write declaration of `stage` (images, atomic counters,
/// storage buffers) against the table its shape selects.
pub fn resolve_read_write_bindings(
    stage: ShaderStage,
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<ReadWriteRow> {
    let state = snapshot.shader_stage(stage);
    let mut rows = Vec::new();

    for (index, resource) in state.reflection.read_write.iter().enumerate() {
        let bindpoint = state
            .mapping
            .read_write
            .get(index)
            .copied()
            .unwrap_or_default();
        let kind = ReadWriteKind::classify(resource);
        let backing = backing(state, kind, bindpoint.slot());

        let id = backing.resource();
        let filled = id.is_some();
        let used = bindpoint.used;
        if !cfg.should_show(filled, used) {
            continue;
        }

        let header = RowHeader::new(
            index,
            slot_label(bindpoint.bind, Some(resource.name.as_str())),
            filled,
            used,
        );
        rows.push(read_write_row(header, kind, &backing, snapshot));
    }

    tracing::debug!(%stage, rows = rows.len(), "resolved read-write bindings");
    rows
}

fn backing(state: &ShaderStageState, kind: ReadWriteKind, slot: Option<usize>) -> Backing<'_> {
    let Some(slot) = slot else {
        return Backing::Unbound;
    };
    let bound = match kind {
        ReadWriteKind::Image => state.images.get(slot).map(Backing::Image),
        ReadWriteKind::Atomic => state.atomic_buffers.get(slot).map(Backing::Buffer),
        ReadWriteKind::StructuredBuffer => state.storage_buffers.get(slot).map(Backing::Buffer),
    };
    bound.unwrap_or(Backing::Unbound)
}

fn read_write_row(
    header: RowHeader,
    kind: ReadWriteKind,
    backing: &Backing<'_>,
    snapshot: &PipelineSnapshot,
) -> ReadWriteRow {
    let Some(id) = backing.resource() else {
        return ReadWriteRow {
            header,
            kind,
            resource: None,
            name: "Empty".to_string(),
            dimensions: "-".to_string(),
            format: "-".to_string(),
            access: "-".to_string(),
        };
    };

    let mut name = String::new();
    let mut dimensions = String::new();
    let mut format = "-".to_string();
    let mut access = "Read/Write".to_string();

    if let Backing::Image(image) = backing {
        access = describe_access(image.read_allowed, image.write_allowed).to_string();
        format = image.format.to_string();
    }

    if let Some(texture) = snapshot.texture(id) {
        name = texture.name.clone();
        dimensions = texture_dimensions(texture);
    }

    if let Some(buffer) = snapshot.buffer(id) {
        let (offset, length) = match backing {
            Backing::Buffer(view) if view.size > 0 => (view.offset, view.size),
            _ => (0, buffer.length),
        };
        name = buffer.name.clone();
        dimensions = if offset > 0 {
            format!("{length} bytes at offset {offset} bytes")
        } else {
            format!("{length} bytes")
        };
    }

    if name.is_empty() {
        name = format!("{kind} {id}");
    }

    ReadWriteRow {
        header,
        kind,
        resource: Some(id),
        name,
        dimensions,
        format,
        access,
    }
}

fn describe_access(read_allowed: bool, write_allowed: bool) -> &'static str {
    match (read_allowed, write_allowed) {
        (true, false) => "Read-Only",
        (false, true) => "Write-Only",
        _ => "Read/Write",
    }
}

fn texture_dimensions(texture: &TextureDescription) -> String {
    let arrayed = texture.array_size > 1;
    match texture.texture_type.rank() {
        1 if arrayed => format!("{}[{}]", texture.width, texture.array_size),
        1 => texture.width.to_string(),
        3 => format!("{}x{}x{}", texture.width, texture.height, texture.depth),
        _ if arrayed => format!(
            "{}x{}[{}]",
            texture.width, texture.height, texture.array_size
        ),
        _ => format!("{}x{}", texture.width, texture.height),
    }
}
