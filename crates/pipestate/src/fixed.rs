//! Fixed-function state blocks and the draw/dispatch context of the event.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::{CompareFunction, ResourceFormat, ResourceId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexInput {
    pub attributes: Vec<VertexAttribute>,
    pub buffers: Vec<VertexBuffer>,
    pub index_buffer: Option<ResourceId>,
    /// Size of one index in bytes.
    pub index_byte_width: u32,
    pub primitive_restart: bool,
    pub restart_index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexAttribute {
    pub enabled: bool,
    pub format: ResourceFormat,
    pub buffer_slot: u32,
    pub relative_offset: u32,
    /// Value fed to the shader while the attribute array is disabled.
    pub generic_value: [f32; 4],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexBuffer {
    pub resource: Option<ResourceId>,
    pub stride: u32,
    pub offset: u64,
    pub divisor: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    Unknown,
    PointList,
    LineList,
    LineStrip,
    LineLoop,
    TriangleList,
    TriangleStrip,
    TriangleFan,
    LineListAdjacency,
    LineStripAdjacency,
    TriangleListAdjacency,
    TriangleStripAdjacency,
    Patches,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Topology::Unknown => "Unknown",
            Topology::PointList => "Point List",
            Topology::LineList => "Line List",
            Topology::LineStrip => "Line Strip",
            Topology::LineLoop => "Line Loop",
            Topology::TriangleList => "Triangle List",
            Topology::TriangleStrip => "Triangle Strip",
            Topology::TriangleFan => "Triangle Fan",
            Topology::LineListAdjacency => "Line List with Adjacency",
            Topology::LineStripAdjacency => "Line Strip with Adjacency",
            Topology::TriangleListAdjacency => "Triangle List with Adjacency",
            Topology::TriangleStripAdjacency => "Triangle Strip with Adjacency",
            Topology::Patches => "Patch List",
        };
        f.write_str(label)
    }
}

/// Flags describing the action that produced the inspected event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawContext {
    pub dispatch: bool,
    pub indexed: bool,
    pub instanced: bool,
    pub topology: Topology,
    pub rasterizer_discard: bool,
    pub transform_feedback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
    Point,
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FillMode::Solid => "Solid",
            FillMode::Wireframe => "Wireframe",
            FillMode::Point => "Point",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    #[default]
    None,
    Front,
    Back,
    FrontAndBack,
}

impl fmt::Display for CullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CullMode::None => "None",
            CullMode::Front => "Front",
            CullMode::Back => "Back",
            CullMode::FrontAndBack => "Front & Back",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32, min_depth: f32, max_depth: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_depth,
            max_depth,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scissor {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub enabled: bool,
}

impl Scissor {
    pub fn new(x: i32, y: i32, width: i32, height: i32, enabled: bool) -> Self {
        Self {
            x,
            y,
            width,
            height,
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerState {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_ccw: bool,
    pub depth_clamp: bool,
    pub line_width: f32,
    pub point_size: f32,
    pub viewports: Vec<Viewport>,
    pub scissors: Vec<Scissor>,
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::Solid,
            cull_mode: CullMode::None,
            front_ccw: true,
            depth_clamp: false,
            line_width: 1.0,
            point_size: 1.0,
            viewports: Vec::new(),
            scissors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultisampleState {
    pub enabled: bool,
    pub sample_shading: bool,
    pub min_sample_shading_rate: f32,
    pub sample_mask: u32,
    pub sample_coverage: bool,
    pub sample_coverage_value: f32,
    pub sample_coverage_invert: bool,
    pub alpha_to_coverage: bool,
    pub alpha_to_one: bool,
}

impl Default for MultisampleState {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_shading: false,
            min_sample_shading_rate: 0.0,
            sample_mask: u32::MAX,
            sample_coverage: false,
            sample_coverage_value: 1.0,
            sample_coverage_invert: false,
            alpha_to_coverage: false,
            alpha_to_one: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthState {
    pub test_enabled: bool,
    pub write_enabled: bool,
    pub function: CompareFunction,
    pub bounds_enabled: bool,
    pub near_bound: f64,
    pub far_bound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    IncrementSaturate,
    DecrementSaturate,
    Invert,
    IncrementWrap,
    DecrementWrap,
}

impl fmt::Display for StencilOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StencilOp::Keep => "KEEP",
            StencilOp::Zero => "ZERO",
            StencilOp::Replace => "REPLACE",
            StencilOp::IncrementSaturate => "INCR",
            StencilOp::DecrementSaturate => "DECR",
            StencilOp::Invert => "INVERT",
            StencilOp::IncrementWrap => "INCR_WRAP",
            StencilOp::DecrementWrap => "DECR_WRAP",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilFace {
    pub function: CompareFunction,
    pub fail: StencilOp,
    pub depth_fail: StencilOp,
    pub pass: StencilOp,
    pub reference: u8,
    pub compare_mask: u8,
    pub write_mask: u8,
}

impl Default for StencilFace {
    fn default() -> Self {
        Self {
            function: CompareFunction::Always,
            fail: StencilOp::Keep,
            depth_fail: StencilOp::Keep,
            pass: StencilOp::Keep,
            reference: 0,
            compare_mask: 0xff,
            write_mask: 0xff,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StencilState {
    pub enabled: bool,
    pub front: StencilFace,
    pub back: StencilFace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendFactor {
    Zero,
    #[default]
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
}

impl fmt::Display for BlendFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BlendFactor::Zero => "ZERO",
            BlendFactor::One => "ONE",
            BlendFactor::SrcColor => "SRC_COLOR",
            BlendFactor::OneMinusSrcColor => "ONE_MINUS_SRC_COLOR",
            BlendFactor::DstColor => "DST_COLOR",
            BlendFactor::OneMinusDstColor => "ONE_MINUS_DST_COLOR",
            BlendFactor::SrcAlpha => "SRC_ALPHA",
            BlendFactor::OneMinusSrcAlpha => "ONE_MINUS_SRC_ALPHA",
            BlendFactor::DstAlpha => "DST_ALPHA",
            BlendFactor::OneMinusDstAlpha => "ONE_MINUS_DST_ALPHA",
            BlendFactor::ConstantColor => "CONSTANT_COLOR",
            BlendFactor::OneMinusConstantColor => "ONE_MINUS_CONSTANT_COLOR",
            BlendFactor::ConstantAlpha => "CONSTANT_ALPHA",
            BlendFactor::OneMinusConstantAlpha => "ONE_MINUS_CONSTANT_ALPHA",
            BlendFactor::SrcAlphaSaturate => "SRC_ALPHA_SATURATE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendOp {
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    Minimum,
    Maximum,
}

impl fmt::Display for BlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BlendOp::Add => "ADD",
            BlendOp::Subtract => "SUBTRACT",
            BlendOp::ReverseSubtract => "REV_SUBTRACT",
            BlendOp::Minimum => "MIN",
            BlendOp::Maximum => "MAX",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicOp {
    Clear,
    And,
    AndReverse,
    #[default]
    Copy,
    AndInverted,
    NoOp,
    Xor,
    Or,
    Nor,
    Equivalent,
    Invert,
    OrReverse,
    CopyInverted,
    OrInverted,
    Nand,
    Set,
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogicOp::Clear => "CLEAR",
            LogicOp::And => "AND",
            LogicOp::AndReverse => "AND_REVERSE",
            LogicOp::Copy => "COPY",
            LogicOp::AndInverted => "AND_INVERTED",
            LogicOp::NoOp => "NOOP",
            LogicOp::Xor => "XOR",
            LogicOp::Or => "OR",
            LogicOp::Nor => "NOR",
            LogicOp::Equivalent => "EQUIV",
            LogicOp::Invert => "INVERT",
            LogicOp::OrReverse => "OR_REVERSE",
            LogicOp::CopyInverted => "COPY_INVERTED",
            LogicOp::OrInverted => "OR_INVERTED",
            LogicOp::Nand => "NAND",
            LogicOp::Set => "SET",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendEquation {
    pub source: BlendFactor,
    pub destination: BlendFactor,
    pub operation: BlendOp,
}

impl Default for BlendEquation {
    fn default() -> Self {
        Self {
            source: BlendFactor::One,
            destination: BlendFactor::Zero,
            operation: BlendOp::Add,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendTarget {
    pub enabled: bool,
    pub color: BlendEquation,
    pub alpha: BlendEquation,
    pub logic_op_enabled: bool,
    pub logic_op: LogicOp,
    /// Bit 0 = red through bit 3 = alpha.
    pub write_mask: u8,
}

impl Default for BlendTarget {
    fn default() -> Self {
        Self {
            enabled: false,
            color: BlendEquation::default(),
            alpha: BlendEquation::default(),
            logic_op_enabled: false,
            logic_op: LogicOp::Copy,
            write_mask: 0xf,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendState {
    pub targets: Vec<BlendTarget>,
    pub constant: [f32; 4],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub resource: Option<ResourceId>,
    pub mip_level: u32,
    pub layer: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Framebuffer {
    pub color: Vec<Attachment>,
    /// Fragment output location `k` writes to colour attachment `draw_buffers[k]`;
    /// negative entries are `GL_NONE`.
    pub draw_buffers: Vec<i32>,
    pub depth: Attachment,
    pub stencil: Attachment,
}

impl Framebuffer {
    pub fn writes_attachment(&self, index: usize) -> bool {
        self.draw_buffers
            .iter()
            .any(|&target| usize::try_from(target).ok() == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_buffers_select_attachments() {
        let framebuffer = Framebuffer {
            color: vec![Attachment::default(); 3],
            draw_buffers: vec![0, -1, 2],
            ..Framebuffer::default()
        };
        assert!(framebuffer.writes_attachment(0));
        assert!(!framebuffer.writes_attachment(1));
        assert!(framebuffer.writes_attachment(2));
    }

    #[test]
    fn stencil_face_defaults_match_api() {
        let face = StencilFace::default();
        assert_eq!(face.function, CompareFunction::Always);
        assert_eq!(face.compare_mask, 0xff);
        assert_eq!(face.pass.to_string(), "KEEP");
    }
}
