use serde::{Deserialize, Serialize};

use crate::resource::TextureType;

/// What the shader declares, as reported by the reflector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderReflection {
    pub entry_point: String,
    pub read_only: Vec<ShaderResource>,
    pub read_write: Vec<ShaderResource>,
    pub constant_blocks: Vec<ConstantBlock>,
    pub subroutine_uniforms: Vec<String>,
    pub inputs: Vec<SignatureParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderResource {
    pub name: String,
    /// Declared as an image/sampler handle rather than a buffer block.
    pub is_texture: bool,
    pub texture_type: TextureType,
    pub variable_type: VariableType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarBaseType {
    #[default]
    Float,
    Double,
    Int,
    UInt,
    Bool,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableType {
    pub base: VarBaseType,
    pub rows: u32,
    pub columns: u32,
    pub elements: u32,
}

impl VariableType {
    pub fn scalar(base: VarBaseType) -> Self {
        Self {
            base,
            rows: 1,
            columns: 1,
            elements: 1,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.rows == 1 && self.columns == 1
    }
}

impl Default for VariableType {
    fn default() -> Self {
        Self::scalar(VarBaseType::Float)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderVariable {
    pub name: String,
    pub var_type: VariableType,
}

/// A uniform block. Blocks that are not buffer backed live in the default
/// uniform storage of the program and never need a bound buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantBlock {
    pub name: String,
    pub variables: Vec<ShaderVariable>,
    pub byte_size: u64,
    pub buffer_backed: bool,
}

impl Default for ConstantBlock {
    fn default() -> Self {
        Self {
            name: String::new(),
            variables: Vec::new(),
            byte_size: 0,
            buffer_backed: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureParameter {
    pub name: String,
    pub location: u32,
}

/// Runtime bindings for each declaration. Entry `k` of a list belongs to
/// declaration `k` of the matching reflection list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindpointMapping {
    pub read_only: Vec<Bindpoint>,
    pub read_write: Vec<Bindpoint>,
    pub constant_blocks: Vec<Bindpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindpoint {
    /// Bind slot; negative when the declaration is not bound.
    pub bind: i32,
    /// Whether the compiled shader actually references the declaration.
    pub used: bool,
}

impl Bindpoint {
    pub fn new(bind: i32, used: bool) -> Self {
        Self { bind, used }
    }

    pub fn slot(&self) -> Option<usize> {
        usize::try_from(self.bind).ok()
    }
}

impl Default for Bindpoint {
    fn default() -> Self {
        Self {
            bind: -1,
            used: false,
        }
    }
}
