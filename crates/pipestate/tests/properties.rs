use pipestate::{
    aggregate_scissors, aggregate_viewports, infer_stage_activity, resolve_constant_blocks,
    resolve_read_only_bindings, resolve_read_write_bindings, PipelineReport, PipelineSnapshot,
    PipelineStage, ShaderStage, VisibilityConfig,
};
use serde_json::json;

fn load(value: serde_json::Value) -> PipelineSnapshot {
    PipelineSnapshot::from_json_str(&value.to_string()).expect("fixture parses")
}

fn deferred_lighting_pass() -> PipelineSnapshot {
    load(json!({
        "event_id": 118,
        "textures": [
            { "id": 10, "name": "gbufferAlbedo", "texture_type": "texture_2d",
              "width": 1920, "height": 1080, "format": { "name": "GL_RGBA8" } },
            { "id": 11, "name": "gbufferNormal", "texture_type": "texture_2d",
              "width": 1920, "height": 1080, "format": { "name": "GL_RGB10_A2" } },
            { "id": 12, "name": "environment", "texture_type": "texture_cube",
              "width": 256, "height": 256, "format": { "name": "GL_RGBA16F" } }
        ],
        "buffers": [
            { "id": 20, "name": "cameraData", "length": 256 },
            { "id": 21, "name": "lightList", "length": 65536 }
        ],
        "stages": {
            "vs": { "shader": 1 },
            "fs": {
                "shader": 2,
                "reflection": {
                    "entry_point": "main",
                    "read_only": [
                        { "name": "albedoMap", "is_texture": true },
                        { "name": "normalMap", "is_texture": true },
                        { "name": "envMap", "is_texture": true, "texture_type": "texture_cube" }
                    ],
                    "read_write": [
                        { "name": "lights", "variable_type": { "base": "float", "rows": 1, "columns": 4 } }
                    ],
                    "constant_blocks": [
                        { "name": "Camera", "byte_size": 192, "variables": [{ "name": "view" }, { "name": "proj" }, { "name": "eye" }] },
                        { "name": "Exposure", "byte_size": 16, "variables": [{ "name": "ev" }] }
                    ]
                },
                "mapping": {
                    "read_only": [ { "bind": 0, "used": true }, { "bind": 1, "used": true }, { "bind": 4, "used": false } ],
                    "read_write": [ { "bind": 0, "used": true } ],
                    "constant_blocks": [ { "bind": 0, "used": true }, { "bind": 1, "used": true } ]
                },
                "textures": [
                    { "texture": { "resource": 10, "texture_type": "texture_2d" } },
                    { "texture": { "resource": 11, "texture_type": "texture_2d" } },
                    {},
                    { "texture": { "resource": 10, "texture_type": "texture_2d" } },
                    { "texture": { "resource": 12, "texture_type": "texture_cube" } }
                ],
                "uniform_buffers": [
                    { "resource": 20, "offset": 0, "size": 128 },
                    {}
                ],
                "storage_buffers": [
                    { "resource": 21, "offset": 0, "size": 0 }
                ]
            }
        },
        "rasterizer": {
            "viewports": [
                { "x": 0, "y": 0, "width": 1920, "height": 1080, "min_depth": 0, "max_depth": 1 },
                { "x": 0, "y": 0, "width": 1920, "height": 1080, "min_depth": 0, "max_depth": 1 },
                { "x": 0, "y": 0, "width": 960, "height": 540, "min_depth": 0, "max_depth": 1 },
                { "x": 0, "y": 0, "width": 960, "height": 540, "min_depth": 0, "max_depth": 1 }
            ],
            "scissors": [
                { "width": 0, "height": 0 },
                { "width": 0, "height": 0 },
                { "width": 0, "height": 0 }
            ]
        },
        "draw": { "topology": "triangle_list" }
    }))
}

const CONFIGS: [VisibilityConfig; 4] = [
    VisibilityConfig {
        show_disabled: false,
        show_empty: false,
    },
    VisibilityConfig {
        show_disabled: true,
        show_empty: false,
    },
    VisibilityConfig {
        show_disabled: false,
        show_empty: true,
    },
    VisibilityConfig {
        show_disabled: true,
        show_empty: true,
    },
];

#[test]
fn fixture_is_consistent() {
    assert!(deferred_lighting_pass().validate().is_empty());
}

#[test]
fn every_slot_and_declaration_surfaces_with_everything_visible() {
    let snapshot = deferred_lighting_pass();
    let fs = snapshot.shader_stage(ShaderStage::Fragment);
    let cfg = VisibilityConfig::everything();

    let (textures, samplers) = resolve_read_only_bindings(ShaderStage::Fragment, &snapshot, cfg);
    assert_eq!(textures.len(), fs.textures.len());
    assert_eq!(samplers.len(), fs.textures.len());

    let blocks = resolve_constant_blocks(ShaderStage::Fragment, &snapshot, cfg);
    assert_eq!(blocks.len(), fs.reflection.constant_blocks.len());

    let read_write = resolve_read_write_bindings(ShaderStage::Fragment, &snapshot, cfg);
    assert_eq!(read_write.len(), fs.reflection.read_write.len());
}

#[test]
fn enabling_a_flag_never_hides_rows() {
    let snapshot = deferred_lighting_pass();
    let slots = |cfg| {
        resolve_read_only_bindings(ShaderStage::Fragment, &snapshot, cfg)
            .0
            .into_iter()
            .map(|row| row.header.slot)
            .collect::<Vec<_>>()
    };

    let base = slots(CONFIGS[0]);
    for wider in &CONFIGS[1..] {
        let rows = slots(*wider);
        assert!(
            base.iter().all(|slot| rows.contains(slot)),
            "{wider:?} dropped a slot shown by default"
        );
    }
    let all = slots(CONFIGS[3]);
    for narrower in &CONFIGS[..3] {
        assert!(slots(*narrower).iter().all(|slot| all.contains(slot)));
    }
}

#[test]
fn declared_but_unbound_cube_map_reads_as_unused() {
    let snapshot = deferred_lighting_pass();
    let cfg = VisibilityConfig::new(true, false);
    let (textures, samplers) = resolve_read_only_bindings(ShaderStage::Fragment, &snapshot, cfg);
    let env = textures
        .iter()
        .position(|row| row.header.label == "4: envMap")
        .expect("envMap row");
    assert!(!textures[env].header.is_used());
    assert_eq!(samplers[env].addressing, "STR: WRAP Non-Seamless");
}

#[test]
fn undersized_uniform_buffer_is_flagged_empty() {
    let snapshot = deferred_lighting_pass();
    let blocks =
        resolve_constant_blocks(ShaderStage::Fragment, &snapshot, VisibilityConfig::default());
    let camera = &blocks[0];
    assert_eq!(camera.header.label, "0: Camera");
    assert!(!camera.header.is_filled());
    assert_eq!(camera.size_summary, "3 Variables, 192 bytes needed, 128 provided");

    let exposure = &blocks[1];
    assert!(!exposure.header.is_filled());
    assert_eq!(exposure.name, "Empty");
}

#[test]
fn storage_buffer_uses_full_length_without_view() {
    let snapshot = deferred_lighting_pass();
    let rows =
        resolve_read_write_bindings(ShaderStage::Fragment, &snapshot, VisibilityConfig::default());
    assert_eq!(rows[0].name, "lightList");
    assert_eq!(rows[0].dimensions, "65536 bytes");
    assert_eq!(rows[0].kind.to_string(), "SSBO");
}

#[test]
fn viewport_runs_cover_each_slot_once() {
    let snapshot = deferred_lighting_pass();
    for cfg in CONFIGS {
        let rows = aggregate_viewports(&snapshot, cfg);
        let labels: Vec<&str> = rows.iter().map(|row| row.header.label.as_str()).collect();
        assert_eq!(labels, ["0-1", "2-3"]);
        let covered: Vec<usize> = rows.iter().flat_map(|row| row.slots.clone()).collect();
        assert_eq!(covered, [0, 1, 2, 3]);
    }
}

#[test]
fn all_degenerate_scissors_still_show_one_row() {
    let snapshot = deferred_lighting_pass();
    let rows = aggregate_scissors(&snapshot, VisibilityConfig::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].header.label, "0-2");
}

#[test]
fn activity_inference_tracks_draw_kind() {
    let mut snapshot = deferred_lighting_pass();
    let flags = infer_stage_activity(&snapshot).as_flags();
    assert_eq!(
        flags,
        [true, true, false, false, false, true, true, true, false]
    );

    if let Some(draw) = snapshot.draw.as_mut() {
        draw.rasterizer_discard = true;
    }
    let activity = infer_stage_activity(&snapshot);
    assert!(!activity.is_enabled(PipelineStage::Rasterizer));
    assert!(!activity.is_enabled(PipelineStage::Fragment));
    assert!(!activity.is_enabled(PipelineStage::Framebuffer));

    if let Some(draw) = snapshot.draw.as_mut() {
        draw.dispatch = true;
    }
    let flags = infer_stage_activity(&snapshot).as_flags();
    assert_eq!(flags.iter().filter(|enabled| **enabled).count(), 1);
    assert!(flags[PipelineStage::Compute.index()]);

    snapshot.draw = None;
    assert!(infer_stage_activity(&snapshot).as_flags().iter().all(|enabled| *enabled));
}

#[test]
fn report_serializes_to_json() {
    let report = PipelineReport::build(&deferred_lighting_pass(), VisibilityConfig::default());
    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["event_id"], 118);
    let fragment = value["stages"]
        .as_array()
        .and_then(|stages| stages.iter().find(|stage| stage["stage"] == "fs"))
        .expect("fragment section");
    assert_eq!(fragment["entry_point"], "main");
    assert_eq!(fragment["textures"][0]["label"], "0: albedoMap");
}
