use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    Filled,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    Used,
    Unused,
}

/// Fields shared by every resolved row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowHeader {
    /// Raw slot for slot-driven tables, declaration index for
    /// reflection-driven ones.
    pub slot: usize,
    /// Display label, e.g. `3: diffuseMap`.
    pub label: String,
    pub fill: Fill,
    pub usage: Usage,
}

impl RowHeader {
    pub fn new(slot: usize, label: impl Into<String>, filled: bool, used: bool) -> Self {
        Self {
            slot,
            label: label.into(),
            fill: if filled { Fill::Filled } else { Fill::Empty },
            usage: if used { Usage::Used } else { Usage::Unused },
        }
    }

    pub fn is_filled(&self) -> bool {
        self.fill == Fill::Filled
    }

    pub fn is_used(&self) -> bool {
        self.usage == Usage::Used
    }
}

/// Label of a bound slot, with the declared name appended when there is one.
pub(crate) fn slot_label(slot: impl std::fmt::Display, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{slot}: {name}"),
        _ => slot.to_string(),
    }
}

pub(crate) fn format_vec4(values: [f32; 4]) -> String {
    let [x, y, z, w] = values;
    format!("<{x}, {y}, {z}, {w}>")
}
