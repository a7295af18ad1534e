/// Size formatting utilities: human-readable byte counts and report rows.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// Rendering of a zero byte count.
pub const ZERO: &str = "0  B";

/// Unit labels, index `i` meaning `1024^i` bytes.
const UNITS: [&str; 9] = [" B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Significant digits used for the corrected value.
const SIGNIFICANT_DIGITS: usize = 12;

#[inline]
fn magnitude(i: usize) -> u128 {
    1024u128.pow(i as u32)
}

/// Format a byte count into a short human-readable string.
///
/// The largest unit whose integer quotient is non-zero is selected. The
/// quotient of the *next smaller* unit, divided by 1000, is added as a
/// correction, and nothing below that contributes. This matches the
/// long-standing output of the tool byte for byte, including its quirks:
/// 2047 bytes renders as `2.023 kB` while 2048 renders as `2.0 kB`.
pub fn humanize(bytes: u64) -> String {
    if bytes == 0 {
        return ZERO.to_string();
    }

    // u128 because 1024^8 does not fit in u64.
    let mut remaining = u128::from(bytes);
    let Some(unit) = (0..UNITS.len())
        .rev()
        .find(|&i| remaining / magnitude(i) != 0)
    else {
        return ZERO.to_string();
    };

    let quotient = remaining / magnitude(unit);
    if unit == 0 {
        return format!("{quotient} {}", UNITS[0]);
    }

    remaining -= quotient * magnitude(unit);
    let correction = remaining / magnitude(unit - 1);
    let value = quotient as f64 + correction as f64 / 1000.0;
    format!("{} {}", format_corrected(value), UNITS[unit])
}

/// Render a corrected value with up to twelve significant digits, trailing
/// zeros trimmed, always keeping one decimal (`1.0`, `1.512`).
fn format_corrected(value: f64) -> String {
    let int_digits = (value.trunc() as u64).to_string().len();
    let decimals = SIGNIFICANT_DIGITS.saturating_sub(int_digits).max(1);
    let mut s = format!("{value:.decimals$}");
    while s.ends_with('0') && !s.ends_with(".0") {
        s.pop();
    }
    s
}

/// Column widths for one report row: path left-justified, size right-justified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnWidths {
    pub path: usize,
    pub size: usize,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self { path: 64, size: 10 }
    }
}

impl ColumnWidths {
    /// Lay out one `path` / `human_size` row. Widths are minimums; long
    /// paths are never truncated.
    pub fn format_row(&self, path: &str, human_size: &str) -> String {
        format!(
            "{path:<pw$}{human_size:>sw$}",
            pw = self.path,
            sw = self.size
        )
    }
}
