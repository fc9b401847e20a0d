//! Resource descriptions and the small vocabulary enums shared by the raw
//! binding tables and the resolvers.
//!
//! Everything here is plain captured data: the global texture/buffer tables
//! keyed by [`ResourceId`], formats, texture shapes, swizzles and sampler
//! enums. Each enum knows how to print itself the way the resolved rows show
//! it, so resolvers never hard-code display strings for raw state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of a captured API object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId::{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    #[default]
    Unknown,
    Buffer,
    #[serde(rename = "texture_1d")]
    Texture1D,
    #[serde(rename = "texture_1d_array")]
    Texture1DArray,
    #[serde(rename = "texture_2d")]
    Texture2D,
    #[serde(rename = "texture_rect")]
    TextureRect,
    #[serde(rename = "texture_2d_array")]
    Texture2DArray,
    #[serde(rename = "texture_2d_ms")]
    Texture2DMS,
    #[serde(rename = "texture_2d_ms_array")]
    Texture2DMSArray,
    #[serde(rename = "texture_3d")]
    Texture3D,
    #[serde(rename = "texture_cube")]
    TextureCube,
    #[serde(rename = "texture_cube_array")]
    TextureCubeArray,
}

impl TextureType {
    pub fn is_cube(self) -> bool {
        matches!(self, TextureType::TextureCube | TextureType::TextureCubeArray)
    }

    /// Number of addressable dimensions, ignoring array layers.
    pub fn rank(self) -> u32 {
        match self {
            TextureType::Unknown => 0,
            TextureType::Buffer | TextureType::Texture1D | TextureType::Texture1DArray => 1,
            TextureType::Texture3D => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TextureType::Unknown => "Unknown",
            TextureType::Buffer => "Buffer",
            TextureType::Texture1D => "Texture 1D",
            TextureType::Texture1DArray => "Texture 1D Array",
            TextureType::Texture2D => "Texture 2D",
            TextureType::TextureRect => "Texture Rect",
            TextureType::Texture2DArray => "Texture 2D Array",
            TextureType::Texture2DMS => "Texture 2D MS",
            TextureType::Texture2DMSArray => "Texture 2D MS Array",
            TextureType::Texture3D => "Texture 3D",
            TextureType::TextureCube => "Texture Cube",
            TextureType::TextureCubeArray => "Texture Cube Array",
        };
        f.write_str(label)
    }
}

/// Formats that do not decompose into regular per-channel components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialFormat {
    D16S8,
    D24S8,
    D32S8,
    S8,
    R10G10B10A2,
    R11G11B10,
    R5G6B5,
    R5G5B5A1,
    R4G4B4A4,
    R9G9B9E5,
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6,
    Bc7,
    Etc2,
    Eac,
    Astc,
}

impl SpecialFormat {
    pub fn is_combined_depth_stencil(self) -> bool {
        matches!(
            self,
            SpecialFormat::D16S8 | SpecialFormat::D24S8 | SpecialFormat::D32S8
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFormat {
    /// API name of the format, e.g. `GL_RGBA8`.
    pub name: String,
    pub special: Option<SpecialFormat>,
}

impl ResourceFormat {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            special: None,
        }
    }

    pub fn is_combined_depth_stencil(&self) -> bool {
        self.special
            .is_some_and(SpecialFormat::is_combined_depth_stencil)
    }
}

impl fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str("Unknown")
        } else {
            f.write_str(&self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSwizzle {
    Red,
    Green,
    Blue,
    Alpha,
    Zero,
    One,
}

impl fmt::Display for TextureSwizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TextureSwizzle::Red => "R",
            TextureSwizzle::Green => "G",
            TextureSwizzle::Blue => "B",
            TextureSwizzle::Alpha => "A",
            TextureSwizzle::Zero => "0",
            TextureSwizzle::One => "1",
        };
        f.write_str(label)
    }
}

/// Per-channel swizzle of a texture view. Defaults to identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Swizzle(pub [TextureSwizzle; 4]);

impl Swizzle {
    pub const IDENTITY: Swizzle = Swizzle([
        TextureSwizzle::Red,
        TextureSwizzle::Green,
        TextureSwizzle::Blue,
        TextureSwizzle::Alpha,
    ]);

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Swizzle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in &self.0 {
            write!(f, "{channel}")?;
        }
        Ok(())
    }
}

/// Channel sampled from a combined depth/stencil texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthReadChannel {
    Depth,
    Stencil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressMode {
    #[default]
    Wrap,
    Mirror,
    ClampToEdge,
    ClampToBorder,
    MirrorOnce,
}

impl fmt::Display for AddressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AddressMode::Wrap => "WRAP",
            AddressMode::Mirror => "MIRROR",
            AddressMode::ClampToEdge => "CLAMP",
            AddressMode::ClampToBorder => "BORDER",
            AddressMode::MirrorOnce => "MIRROR_ONCE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    None,
    Point,
    #[default]
    Linear,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterMode::None => "None",
            FilterMode::Point => "Point",
            FilterMode::Linear => "Linear",
        };
        f.write_str(label)
    }
}

/// How filtered texels are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFunction {
    #[default]
    Normal,
    Comparison,
    Minimum,
    Maximum,
}

impl fmt::Display for FilterFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterFunction::Normal => "Normal",
            FilterFunction::Comparison => "Comparison",
            FilterFunction::Minimum => "Minimum",
            FilterFunction::Maximum => "Maximum",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareFunction {
    Never,
    #[default]
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

impl fmt::Display for CompareFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompareFunction::Never => "NEVER",
            CompareFunction::Less => "LESS",
            CompareFunction::Equal => "EQUAL",
            CompareFunction::LessEqual => "LEQUAL",
            CompareFunction::Greater => "GREATER",
            CompareFunction::NotEqual => "NOTEQUAL",
            CompareFunction::GreaterEqual => "GEQUAL",
            CompareFunction::Always => "ALWAYS",
        };
        f.write_str(label)
    }
}

/// Entry of the global texture table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescription {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub texture_type: TextureType,
    #[serde(default = "one")]
    pub width: u32,
    #[serde(default = "one")]
    pub height: u32,
    #[serde(default = "one")]
    pub depth: u32,
    #[serde(default = "one")]
    pub array_size: u32,
    #[serde(default = "one")]
    pub mips: u32,
    #[serde(default)]
    pub format: ResourceFormat,
}

/// Entry of the global buffer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferDescription {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub length: u64,
}

fn one() -> u32 {
    1
}
