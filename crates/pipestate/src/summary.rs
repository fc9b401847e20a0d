use serde::Serialize;

use crate::fixed::{DepthState, MultisampleState};
use crate::snapshot::PipelineSnapshot;

/// Display strings for the fixed-function blocks that are not slot arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RasterizerSummary {
    pub fill_mode: String,
    pub cull_mode: String,
    pub front_face: String,
    pub depth_clamp: bool,
    pub line_width: String,
    pub point_size: String,
    pub multisample: String,
    pub sample_coverage: String,
    pub sample_shading: String,
    pub alpha_to_coverage: bool,
    pub alpha_to_one: bool,
    pub depth_test: String,
    pub depth_write: bool,
    pub depth_bounds: String,
}

impl RasterizerSummary {
    pub fn describe(snapshot: &PipelineSnapshot) -> Self {
        let rasterizer = &snapshot.rasterizer;
        let multisample = &snapshot.multisample;
        let front_face = if rasterizer.front_ccw {
            "CCW"
        } else {
            "CW"
        };

        Self {
            fill_mode: rasterizer.fill_mode.to_string(),
            cull_mode: rasterizer.cull_mode.to_string(),
            front_face: front_face.to_string(),
            depth_clamp: rasterizer.depth_clamp,
            line_width: rasterizer.line_width.to_string(),
            point_size: rasterizer.point_size.to_string(),
            multisample: enabled_label(multisample.enabled).to_string(),
            sample_coverage: describe_coverage(multisample),
            sample_shading: describe_sample_shading(multisample),
            alpha_to_coverage: multisample.alpha_to_coverage,
            alpha_to_one: multisample.alpha_to_one,
            depth_test: describe_depth_test(&snapshot.depth),
            depth_write: snapshot.depth.write_enabled,
            depth_bounds: describe_depth_bounds(&snapshot.depth),
        }
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn describe_coverage(multisample: &MultisampleState) -> String {
    if !multisample.sample_coverage {
        return "Disabled".to_string();
    }
    let inverted = if multisample.sample_coverage_invert {
        " Inverted"
    } else {
        ""
    };
    format!("{}{inverted}", multisample.sample_coverage_value)
}

fn describe_sample_shading(multisample: &MultisampleState) -> String {
    if multisample.sample_shading {
        format!("{}", multisample.min_sample_shading_rate)
    } else {
        "Disabled".to_string()
    }
}

fn describe_depth_test(depth: &DepthState) -> String {
    if depth.test_enabled {
        depth.function.to_string()
    } else {
        "Disabled".to_string()
    }
}

fn describe_depth_bounds(depth: &DepthState) -> String {
    if depth.bounds_enabled {
        format!("{} - {}", depth.near_bound, depth.far_bound)
    } else {
        "Disabled".to_string()
    }
}
