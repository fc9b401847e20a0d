//! Pipeline-state resolution for a graphics debugger.
//!
//! Takes the decoded state of one captured event and turns it into flat,
//! display-ready rows: which texture and sampler sit in each unit, whether a
//! uniform buffer is large enough for the block that reads it, which images
//! and storage buffers a shader writes, how the viewport array collapses into
//! runs, and which pipeline stages took part at all.
//!
//! ```text
//!   PipelineSnapshot ──┬─▶ resolve_read_only_bindings ──▶ TextureRow / SamplerRow
//!   (+ reflection)     ├─▶ resolve_constant_blocks ─────▶ ConstantBlockRow
//!                      ├─▶ resolve_read_write_bindings ─▶ ReadWriteRow
//!   VisibilityConfig ──┼─▶ aggregate_viewports/scissors ▶ ViewportRunRow / ScissorRunRow
//!                      └─▶ infer_stage_activity ────────▶ StageActivity
//!
//!   PipelineReport::build runs all of the above for one event.
//! ```
//!
//! Every resolver is a pure function of the snapshot and a `VisibilityConfig`
//! captured at the start of the pass. Malformed capture data never fails a
//! pass: it is classified into the row's filled/used flags instead.

mod activity;
mod addressing;
mod bindmap;
mod constants;
mod error;
mod fixed;
mod output;
mod readonly;
mod readwrite;
mod reflection;
mod report;
mod resource;
mod rows;
mod runs;
mod snapshot;
mod stage;
mod subroutines;
mod summary;
mod vertex;
mod visibility;

pub use activity::{infer_stage_activity, StageActivity};
pub use addressing::compact_addressing;
pub use bindmap::{BindSlotMap, SlotConflict};
pub use constants::{resolve_constant_blocks, ConstantBlockRow};
pub use error::{ResolveError, SnapshotError};
pub use fixed::{
    Attachment, BlendEquation, BlendFactor, BlendOp, BlendState, BlendTarget, CullMode,
    DepthState, DrawContext, FillMode, Framebuffer, LogicOp, MultisampleState, RasterizerState,
    Scissor, StencilFace, StencilOp, StencilState, Topology, VertexAttribute, VertexBuffer,
    VertexInput, Viewport,
};
pub use output::{
    resolve_attachments, resolve_blend_targets, resolve_stencil_faces, AttachmentRow, BlendRow,
    StencilFaceRow,
};
pub use readonly::{resolve_read_only_bindings, SamplerRow, TextureRow};
pub use readwrite::{resolve_read_write_bindings, ReadWriteKind, ReadWriteRow};
pub use reflection::{
    Bindpoint, BindpointMapping, ConstantBlock, ShaderReflection, ShaderResource,
    ShaderVariable, SignatureParameter, VarBaseType, VariableType,
};
pub use report::{Inspector, PipelineReport, StageReport, VertexInputReport};
pub use resource::{
    AddressMode, BufferDescription, CompareFunction, DepthReadChannel, FilterFunction,
    FilterMode, ResourceFormat, ResourceId, SpecialFormat, Swizzle, TextureDescription,
    TextureSwizzle, TextureType,
};
pub use rows::{Fill, RowHeader, Usage};
pub use runs::{aggregate_scissors, aggregate_viewports, ScissorRunRow, ViewportRunRow};
pub use snapshot::{
    BufferBinding, ImageBinding, PipelineSnapshot, SamplerBinding, ShaderStageState,
    ShaderStages, TextureBinding, TextureUnit,
};
pub use stage::{PipelineStage, ShaderStage, PIPELINE_STAGE_COUNT, SHADER_STAGE_COUNT};
pub use subroutines::{resolve_subroutines, SubroutineRow};
pub use summary::RasterizerSummary;
pub use vertex::{
    resolve_index_buffer, resolve_vertex_attributes, resolve_vertex_buffers, IndexBufferRow,
    VertexAttributeRow, VertexBufferRow,
};
pub use visibility::{should_show, VisibilityConfig};
