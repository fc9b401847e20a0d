use crate::resource::AddressMode;

const AXIS_LETTERS: [char; 3] = ['S', 'T', 'R'];

/// Folds the S/T/R addressing modes into a compact label such as
/// `STR: WRAP` or `ST: WRAP, R: CLAMP`.
///
/// `border` is appended as `<r, g, b, a>` and `seamless` (only passed for cube
/// textures) adds a ` Seamless` or ` Non-Seamless` suffix.
pub fn compact_addressing(
    modes: [AddressMode; 3],
    border: Option<[f32; 4]>,
    seamless: Option<bool>,
) -> String {
    let mut addressing = String::new();
    let mut prefix = String::new();
    let mut previous = modes[0];

    for (axis, mode) in modes.iter().copied().enumerate() {
        if axis == 0 || mode == previous {
            prefix.push(AXIS_LETTERS[axis]);
        } else {
            addressing.push_str(&format!("{prefix}: {previous}, "));
            prefix.clear();
            prefix.push(AXIS_LETTERS[axis]);
        }
        previous = mode;
    }
    addressing.push_str(&format!("{prefix}: {previous}"));

    if let Some([r, g, b, a]) = border {
        addressing.push_str(&format!("<{r}, {g}, {b}, {a}>"));
    }

    match seamless {
        Some(true) => addressing.push_str(" Seamless"),
        Some(false) => addressing.push_str(" Non-Seamless"),
        None => {}
    }

    addressing
}
