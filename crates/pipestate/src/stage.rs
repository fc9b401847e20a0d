use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of programmable stages that carry shader state.
pub const SHADER_STAGE_COUNT: usize = 6;

/// Number of slots in the pipeline flow shown to the user.
pub const PIPELINE_STAGE_COUNT: usize = 9;

/// Programmable shader stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShaderStage {
    #[serde(rename = "vs", alias = "vertex")]
    Vertex,
    #[serde(rename = "tcs", alias = "tess_control")]
    TessControl,
    #[serde(rename = "tes", alias = "tess_eval")]
    TessEval,
    #[serde(rename = "gs", alias = "geometry")]
    Geometry,
    #[serde(rename = "fs", alias = "fragment")]
    Fragment,
    #[serde(rename = "cs", alias = "compute")]
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; SHADER_STAGE_COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEval,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VS",
            ShaderStage::TessControl => "TCS",
            ShaderStage::TessEval => "TES",
            ShaderStage::Geometry => "GS",
            ShaderStage::Fragment => "FS",
            ShaderStage::Compute => "CS",
        }
    }

    pub fn pipeline_stage(self) -> PipelineStage {
        match self {
            ShaderStage::Vertex => PipelineStage::Vertex,
            ShaderStage::TessControl => PipelineStage::TessControl,
            ShaderStage::TessEval => PipelineStage::TessEval,
            ShaderStage::Geometry => PipelineStage::Geometry,
            ShaderStage::Fragment => PipelineStage::Fragment,
            ShaderStage::Compute => PipelineStage::Compute,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for ShaderStage {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "vs" | "vertex" => Ok(ShaderStage::Vertex),
            "tcs" | "hs" | "tess_control" | "tess-control" => Ok(ShaderStage::TessControl),
            "tes" | "ds" | "tess_eval" | "tess-eval" => Ok(ShaderStage::TessEval),
            "gs" | "geometry" => Ok(ShaderStage::Geometry),
            "fs" | "ps" | "fragment" => Ok(ShaderStage::Fragment),
            "cs" | "compute" => Ok(ShaderStage::Compute),
            other => Err(format!(
                "unknown shader stage '{other}'; expected one of vs, tcs, tes, gs, fs, cs"
            )),
        }
    }
}

/// Slots of the pipeline flow, in the order they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    VertexInput,
    Vertex,
    TessControl,
    TessEval,
    Geometry,
    Rasterizer,
    Fragment,
    Framebuffer,
    Compute,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; PIPELINE_STAGE_COUNT] = [
        PipelineStage::VertexInput,
        PipelineStage::Vertex,
        PipelineStage::TessControl,
        PipelineStage::TessEval,
        PipelineStage::Geometry,
        PipelineStage::Rasterizer,
        PipelineStage::Fragment,
        PipelineStage::Framebuffer,
        PipelineStage::Compute,
    ];

    /// Position of the stage in [`PipelineStage::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::VertexInput => "VTX",
            PipelineStage::Vertex => "VS",
            PipelineStage::TessControl => "TCS",
            PipelineStage::TessEval => "TES",
            PipelineStage::Geometry => "GS",
            PipelineStage::Rasterizer => "RS",
            PipelineStage::Fragment => "FS",
            PipelineStage::Framebuffer => "FB",
            PipelineStage::Compute => "CS",
        }
    }

    /// The programmable stage backing this slot, if any.
    pub fn shader_stage(self) -> Option<ShaderStage> {
        match self {
            PipelineStage::Vertex => Some(ShaderStage::Vertex),
            PipelineStage::TessControl => Some(ShaderStage::TessControl),
            PipelineStage::TessEval => Some(ShaderStage::TessEval),
            PipelineStage::Geometry => Some(ShaderStage::Geometry),
            PipelineStage::Fragment => Some(ShaderStage::Fragment),
            PipelineStage::Compute => Some(ShaderStage::Compute),
            PipelineStage::VertexInput | PipelineStage::Rasterizer | PipelineStage::Framebuffer => {
                None
            }
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_indices_follow_display_order() {
        for (position, stage) in PipelineStage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), position);
        }
        assert_eq!(PipelineStage::Compute.index(), 8);
    }

    #[test]
    fn parses_stage_aliases() {
        assert_eq!("VS".parse::<ShaderStage>(), Ok(ShaderStage::Vertex));
        assert_eq!("ps".parse::<ShaderStage>(), Ok(ShaderStage::Fragment));
        assert_eq!(" compute ".parse::<ShaderStage>(), Ok(ShaderStage::Compute));
        assert!("mesh".parse::<ShaderStage>().is_err());
    }

    #[test]
    fn fixed_function_slots_have_no_shader() {
        assert_eq!(PipelineStage::Rasterizer.shader_stage(), None);
        assert_eq!(
            PipelineStage::Geometry.shader_stage(),
            Some(ShaderStage::Geometry)
        );
        for stage in ShaderStage::ALL {
            assert_eq!(stage.pipeline_stage().shader_stage(), Some(stage));
        }
    }
}
