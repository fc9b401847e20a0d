//! Plain-text and JSON rendering of a `PipelineReport`.
//!
//! Text output is a sequence of titled, column-aligned tables. Sections with
//! no rows are skipped, as are stages with no shader and nothing to show.

use std::fmt::{self, Write};

use pipestate::{PipelineReport, PipelineStage, RowHeader, StageReport};

pub fn render_json(report: &PipelineReport) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

pub fn render_text(report: &PipelineReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Event {}", report.event_id)?;
    let active: Vec<&str> = PipelineStage::ALL
        .into_iter()
        .filter(|stage| report.activity.is_enabled(*stage))
        .map(|stage| report.activity.label(stage))
        .collect();
    writeln!(out, "Active stages: {}", active.join(" "))?;

    render_vertex_input(&mut out, report)?;
    for stage in &report.stages {
        render_stage(&mut out, stage)?;
    }
    render_rasterizer(&mut out, report)?;
    render_output_merger(&mut out, report)?;
    Ok(out)
}

fn render_vertex_input(out: &mut String, report: &PipelineReport) -> fmt::Result {
    let input = &report.vertex_input;
    table(
        out,
        "Vertex Attributes",
        &["Slot", "Status", "Format", "Buffer", "Offset"],
        input.attributes.iter().map(|row| {
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.format.clone(),
                row.buffer_slot.to_string(),
                row.relative_offset.to_string(),
            ]
        }),
    )?;
    table(
        out,
        "Vertex Buffers",
        &["Slot", "Status", "Buffer", "Stride", "Offset", "Divisor", "Length"],
        input.buffers.iter().map(|row| {
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.name.clone(),
                row.stride.to_string(),
                row.offset.to_string(),
                row.divisor.to_string(),
                row.byte_length.to_string(),
            ]
        }),
    )?;
    table(
        out,
        "Index Buffer",
        &["Slot", "Status", "Buffer", "Index Size", "Length", "Restart"],
        input.index_buffer.iter().map(|row| {
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.name.clone(),
                format!("{} bytes", row.index_byte_width),
                row.byte_length.to_string(),
                row.restart_index
                    .map_or_else(|| "-".to_string(), |index| format!("{index:#x}")),
            ]
        }),
    )
}

fn render_stage(out: &mut String, stage: &StageReport) -> fmt::Result {
    let has_rows = !stage.textures.is_empty()
        || !stage.constant_blocks.is_empty()
        || !stage.read_write.is_empty()
        || !stage.subroutines.is_empty();
    if stage.shader.is_none() && !has_rows {
        return Ok(());
    }

    writeln!(out)?;
    match stage.shader {
        Some(shader) if stage.entry_point.is_empty() => {
            writeln!(out, "== {} ({shader}) ==", stage.label)?;
        }
        Some(shader) => {
            writeln!(out, "== {} ({shader}, entry {}) ==", stage.label, stage.entry_point)?;
        }
        None => writeln!(out, "== {} (no shader) ==", stage.label)?,
    }
    if !stage.active {
        writeln!(out, "stage inactive for this event")?;
    }

    table(
        out,
        "Textures",
        &["Slot", "Status", "Resource", "Type", "Size", "Format"],
        stage.textures.iter().map(|row| {
            let size = if row.resource.is_some() && row.width > 0 {
                format!(
                    "{}x{}x{}[{}]",
                    row.width, row.height, row.depth, row.array_size
                )
            } else {
                "-".to_string()
            };
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.name.clone(),
                row.texture_type.clone(),
                size,
                row.format.clone(),
            ]
        }),
    )?;
    table(
        out,
        "Samplers",
        &["Slot", "Addressing", "Filter", "LOD Range", "LOD Bias"],
        stage.samplers.iter().map(|row| {
            vec![
                row.header.label.clone(),
                row.addressing.clone(),
                row.filter.clone(),
                row.lod_range.clone(),
                row.lod_bias.to_string(),
            ]
        }),
    )?;
    table(
        out,
        "Constant Blocks",
        &["Block", "Status", "Buffer", "Range", "Size"],
        stage.constant_blocks.iter().map(|row| {
            let range = row
                .byte_range
                .as_ref()
                .map_or_else(|| "-".to_string(), |range| format!("{}-{}", range.start, range.end));
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.name.clone(),
                range,
                row.size_summary.clone(),
            ]
        }),
    )?;
    table(
        out,
        "Read-Write Resources",
        &["Slot", "Status", "Kind", "Resource", "Dimensions", "Format", "Access"],
        stage.read_write.iter().map(|row| {
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.kind.to_string(),
                row.name.clone(),
                row.dimensions.clone(),
                row.format.clone(),
                row.access.clone(),
            ]
        }),
    )?;
    table(
        out,
        "Subroutines",
        &["Uniform", "Value"],
        stage
            .subroutines
            .iter()
            .map(|row| vec![row.uniform.clone(), row.value.to_string()]),
    )
}

fn render_rasterizer(out: &mut String, report: &PipelineReport) -> fmt::Result {
    let summary = &report.rasterizer;
    writeln!(out)?;
    writeln!(out, "== Rasterizer ==")?;
    writeln!(
        out,
        "Fill {}, Cull {}, Front {}, Depth Clamp {}",
        summary.fill_mode,
        summary.cull_mode,
        summary.front_face,
        yes_no(summary.depth_clamp)
    )?;
    writeln!(
        out,
        "Multisample {}, Coverage {}, Sample Shading {}, Alpha-to-Coverage {}, Alpha-to-One {}",
        summary.multisample,
        summary.sample_coverage,
        summary.sample_shading,
        yes_no(summary.alpha_to_coverage),
        yes_no(summary.alpha_to_one)
    )?;
    writeln!(
        out,
        "Depth Test {}, Depth Write {}, Depth Bounds {}",
        summary.depth_test,
        yes_no(summary.depth_write),
        summary.depth_bounds
    )?;

    table(
        out,
        "Viewports",
        &["Slots", "X", "Y", "Width", "Height", "Depth"],
        report.viewports.iter().map(|row| {
            let viewport = &row.viewport;
            vec![
                row.header.label.clone(),
                viewport.x.to_string(),
                viewport.y.to_string(),
                viewport.width.to_string(),
                viewport.height.to_string(),
                format!("{} - {}", viewport.min_depth, viewport.max_depth),
            ]
        }),
    )?;
    table(
        out,
        "Scissors",
        &["Slots", "X", "Y", "Width", "Height", "Enabled"],
        report.scissors.iter().map(|row| {
            let scissor = &row.scissor;
            vec![
                row.header.label.clone(),
                scissor.x.to_string(),
                scissor.y.to_string(),
                scissor.width.to_string(),
                scissor.height.to_string(),
                yes_no(scissor.enabled).to_string(),
            ]
        }),
    )
}

fn render_output_merger(out: &mut String, report: &PipelineReport) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "== Output Merger ==")?;
    table(
        out,
        "Attachments",
        &["Slot", "Status", "Resource", "Size", "Format", "Mip", "Layer"],
        report.attachments.iter().map(|row| {
            vec![
                row.header.label.clone(),
                status(&row.header),
                row.name.clone(),
                row.dimensions.clone(),
                row.format.clone(),
                row.mip_level.to_string(),
                row.layer.to_string(),
            ]
        }),
    )?;
    table(
        out,
        "Blend",
        &["Target", "Enabled", "Color", "Alpha", "Logic Op", "Write Mask"],
        report.blend.iter().map(|row| {
            vec![
                row.header.label.clone(),
                yes_no(row.enabled).to_string(),
                row.color.clone(),
                row.alpha.clone(),
                row.logic_op.clone(),
                row.write_mask.clone(),
            ]
        }),
    )?;
    table(
        out,
        "Stencil",
        &["Face", "Func", "Fail", "Depth Fail", "Pass", "Ref", "Compare", "Write"],
        report.stencil.iter().map(|row| {
            vec![
                row.face.to_string(),
                row.function.clone(),
                row.fail.clone(),
                row.depth_fail.clone(),
                row.pass.clone(),
                row.reference.clone(),
                row.compare_mask.clone(),
                row.write_mask.clone(),
            ]
        }),
    )
}

fn status(header: &RowHeader) -> String {
    match (header.is_filled(), header.is_used()) {
        (true, true) => "ok",
        (true, false) => "unused",
        (false, true) => "empty",
        (false, false) => "empty, unused",
    }
    .to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn table(
    out: &mut String,
    title: &str,
    headers: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> fmt::Result {
    let rows: Vec<Vec<String>> = rows.collect();
    if rows.is_empty() {
        return Ok(());
    }

    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{title}:")?;
    let header_cells: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
    write_row(out, &header_cells, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) -> fmt::Result {
    let mut line = String::from(" ");
    for (cell, width) in cells.iter().zip(widths) {
        write!(line, " {cell:<width$} ")?;
    }
    writeln!(out, "{}", line.trim_end())
}
