//! Output-merger rows: framebuffer attachments, per-target blending, and the
//! two stencil faces.

use serde::Serialize;

use crate::fixed::{Attachment, BlendEquation, StencilFace};
use crate::resource::ResourceId;
use crate::rows::RowHeader;
use crate::snapshot::PipelineSnapshot;
use crate::visibility::VisibilityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub resource: Option<ResourceId>,
    pub name: String,
    pub dimensions: String,
    pub format: String,
    pub mip_level: u32,
    pub layer: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlendRow {
    #[serde(flatten)]
    pub header: RowHeader,
    pub enabled: bool,
    /// `source, destination, operation` for the colour channels.
    pub color: String,
    pub alpha: String,
    pub logic_op: String,
    pub write_mask: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StencilFaceRow {
    pub face: &'static str,
    pub function: String,
    pub fail: String,
    pub depth_fail: String,
    pub pass: String,
    pub reference: String,
    pub compare_mask: String,
    pub write_mask: String,
}

/// Colour attachments first, then depth and stencil. Slot numbers of the
/// depth and stencil rows continue after the last colour attachment.
pub fn resolve_attachments(
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
) -> Vec<AttachmentRow> {
    let framebuffer = &snapshot.framebuffer;
    let mut rows = Vec::new();

    for (index, attachment) in framebuffer.color.iter().enumerate() {
        let used = framebuffer.writes_attachment(index);
        push_attachment(
            &mut rows,
            snapshot,
            cfg,
            index,
            format!("Color {index}"),
            attachment,
            used,
        );
    }

    let depth_used = snapshot.depth.test_enabled || snapshot.depth.write_enabled;
    let next = framebuffer.color.len();
    push_attachment(
        &mut rows,
        snapshot,
        cfg,
        next,
        "Depth".to_string(),
        &framebuffer.depth,
        depth_used,
    );
    push_attachment(
        &mut rows,
        snapshot,
        cfg,
        next + 1,
        "Stencil".to_string(),
        &framebuffer.stencil,
        snapshot.stencil.enabled,
    );

    tracing::debug!(rows = rows.len(), "resolved framebuffer attachments");
    rows
}

fn push_attachment(
    rows: &mut Vec<AttachmentRow>,
    snapshot: &PipelineSnapshot,
    cfg: VisibilityConfig,
    slot: usize,
    label: String,
    attachment: &Attachment,
    used: bool,
) {
    let filled = attachment.resource.is_some();
    if !cfg.should_show(filled, used) {
        return;
    }

    let texture = attachment.resource.and_then(|id| snapshot.texture(id));
    let (name, dimensions, format) = match (texture, attachment.resource) {
        (Some(texture), _) => (
            texture.name.clone(),
            format!("{}x{}", texture.width, texture.height),
            texture.format.to_string(),
        ),
        (None, Some(id)) => (format!("Texture {id}"), "-".to_string(), "-".to_string()),
        (None, None) => ("Empty".to_string(), "-".to_string(), "-".to_string()),
    };

    rows.push(AttachmentRow {
        header: RowHeader::new(slot, label, filled, used),
        resource: attachment.resource,
        name,
        dimensions,
        format,
        mip_level: attachment.mip_level,
        layer: attachment.layer,
    });
}

pub fn resolve_blend_targets(snapshot: &PipelineSnapshot, cfg: VisibilityConfig) -> Vec<BlendRow> {
    let mut rows = Vec::new();
    for (index, target) in snapshot.blend.targets.iter().enumerate() {
        if !cfg.should_show(true, target.enabled) {
            continue;
        }
        let logic_op = if target.logic_op_enabled {
            target.logic_op.to_string()
        } else {
            "-".to_string()
        };
        rows.push(BlendRow {
            header: RowHeader::new(index, index.to_string(), true, target.enabled),
            enabled: target.enabled,
            color: describe_equation(&target.color),
            alpha: describe_equation(&target.alpha),
            logic_op,
            write_mask: describe_write_mask(target.write_mask),
        });
    }
    tracing::debug!(rows = rows.len(), "resolved blend targets");
    rows
}

fn describe_equation(equation: &BlendEquation) -> String {
    format!(
        "{}, {}, {}",
        equation.source, equation.destination, equation.operation
    )
}

fn describe_write_mask(mask: u8) -> String {
    ['R', 'G', 'B', 'A']
        .iter()
        .enumerate()
        .map(|(bit, &channel)| if mask & (1 << bit) != 0 { channel } else { '_' })
        .collect()
}

pub fn resolve_stencil_faces(snapshot: &PipelineSnapshot) -> [StencilFaceRow; 2] {
    [
        stencil_face_row("Front", &snapshot.stencil.front),
        stencil_face_row("Back", &snapshot.stencil.back),
    ]
}

fn stencil_face_row(face: &'static str, state: &StencilFace) -> StencilFaceRow {
    StencilFaceRow {
        face,
        function: state.function.to_string(),
        fail: state.fail.to_string(),
        depth_fail: state.depth_fail.to_string(),
        pass: state.pass.to_string(),
        reference: format!("{:02X}", state.reference),
        compare_mask: format!("{:02X}", state.compare_mask),
        write_mask: format!("{:02X}", state.write_mask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{
        BlendFactor, BlendOp, BlendState, BlendTarget, DepthState, Framebuffer, StencilOp,
        StencilState,
    };
    use crate::resource::{CompareFunction, ResourceFormat, TextureDescription, TextureType};

    fn render_target(id: u64, name: &str, format: &str) -> TextureDescription {
        TextureDescription {
            id: ResourceId(id),
            name: name.into(),
            texture_type: TextureType::Texture2D,
            width: 1280,
            height: 720,
            depth: 1,
            array_size: 1,
            mips: 1,
            format: ResourceFormat::named(format),
        }
    }

    fn snapshot() -> PipelineSnapshot {
        PipelineSnapshot {
            textures: vec![
                render_target(1, "gbufferAlbedo", "GL_RGBA8"),
                render_target(2, "gbufferNormal", "GL_RGB10_A2"),
                render_target(3, "sceneDepth", "GL_DEPTH24_STENCIL8"),
            ],
            framebuffer: Framebuffer {
                color: vec![
                    Attachment {
                        resource: Some(ResourceId(1)),
                        ..Attachment::default()
                    },
                    Attachment {
                        resource: Some(ResourceId(2)),
                        ..Attachment::default()
                    },
                ],
                draw_buffers: vec![0],
                depth: Attachment {
                    resource: Some(ResourceId(3)),
                    ..Attachment::default()
                },
                stencil: Attachment::default(),
            },
            depth: DepthState {
                test_enabled: true,
                ..DepthState::default()
            },
            ..PipelineSnapshot::default()
        }
    }

    #[test]
    fn attachments_used_through_draw_buffers() {
        let rows = resolve_attachments(&snapshot(), VisibilityConfig::default());
        let labels: Vec<&str> = rows.iter().map(|row| row.header.label.as_str()).collect();
        assert_eq!(labels, ["Color 0", "Depth"]);
        assert_eq!(rows[0].name, "gbufferAlbedo");
        assert_eq!(rows[0].dimensions, "1280x720");
        assert_eq!(rows[1].format, "GL_DEPTH24_STENCIL8");
        assert_eq!(rows[1].header.slot, 2);
    }

    #[test]
    fn all_attachments_with_everything_visible() {
        let rows = resolve_attachments(&snapshot(), VisibilityConfig::everything());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].header.label, "Stencil");
        assert_eq!(rows[3].name, "Empty");
        assert!(!rows[3].header.is_filled());
    }

    #[test]
    fn blend_rows_describe_equations() {
        let snapshot = PipelineSnapshot {
            blend: BlendState {
                targets: vec![
                    BlendTarget {
                        enabled: true,
                        color: BlendEquation {
                            source: BlendFactor::SrcAlpha,
                            destination: BlendFactor::OneMinusSrcAlpha,
                            operation: BlendOp::Add,
                        },
                        write_mask: 0b0111,
                        ..BlendTarget::default()
                    },
                    BlendTarget::default(),
                ],
                constant: [0.0; 4],
            },
            ..PipelineSnapshot::default()
        };
        let rows = resolve_blend_targets(&snapshot, VisibilityConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].color, "SRC_ALPHA, ONE_MINUS_SRC_ALPHA, ADD");
        assert_eq!(rows[0].alpha, "ONE, ZERO, ADD");
        assert_eq!(rows[0].write_mask, "RGB_");
        assert_eq!(rows[0].logic_op, "-");

        let rows = resolve_blend_targets(&snapshot, VisibilityConfig::new(true, false));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].write_mask, "RGBA");
    }

    #[test]
    fn stencil_faces_in_hex() {
        let snapshot = PipelineSnapshot {
            stencil: StencilState {
                enabled: true,
                front: StencilFace {
                    function: CompareFunction::Equal,
                    pass: StencilOp::Replace,
                    reference: 0x0a,
                    ..StencilFace::default()
                },
                back: StencilFace::default(),
            },
            ..PipelineSnapshot::default()
        };
        let [front, back] = resolve_stencil_faces(&snapshot);
        assert_eq!(front.face, "Front");
        assert_eq!(front.function, "EQUAL");
        assert_eq!(front.pass, "REPLACE");
        assert_eq!(front.reference, "0A");
        assert_eq!(back.compare_mask, "FF");
        assert_eq!(back.function, "ALWAYS");
    }
}
