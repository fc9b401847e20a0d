use serde::Serialize;

use crate::snapshot::PipelineSnapshot;
use crate::stage::ShaderStage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubroutineRow {
    pub index: usize,
    pub uniform: String,
    /// Index of the function selected for the uniform.
    pub value: u32,
}

pub fn resolve_subroutines(stage: ShaderStage, snapshot: &PipelineSnapshot) -> Vec<SubroutineRow> {
    let state = snapshot.shader_stage(stage);
    state
        .subroutines
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let uniform = state
                .reflection
                .subroutine_uniforms
                .get(index)
                .filter(|name| !name.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("Subroutine {index}"));
            SubroutineRow {
                index,
                uniform,
                value,
            }
        })
        .collect()
}
