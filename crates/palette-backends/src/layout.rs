//! Column layout helpers shared by the text-based adapters.
//!
//! Widths are measured in terminal cells, not bytes or chars.

use unicode_width::UnicodeWidthStr;

/// Column the native and rich adapters pad entry names to.
pub const NAME_COLUMN: usize = 18;

/// Column the list adapter pads entry names to.
pub const LIST_NAME_COLUMN: usize = 16;

/// Default width of native group dividers.
pub const DEFAULT_DIVIDER_WIDTH: usize = 40;

/// Left-justify `text` to `width` cells. Longer text is left untouched.
pub fn pad_right(text: &str, width: usize) -> String {
    let used = text.width();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// `label` centered in a `width`-cell rule of `─`.
pub fn centered_divider(label: &str, width: usize) -> String {
    let label = format!(" {label} ");
    let fill = width.saturating_sub(label.width());
    let left = fill / 2;
    let right = fill - left;
    let mut out = String::new();
    out.extend(std::iter::repeat_n('─', left));
    out.push_str(&label);
    out.extend(std::iter::repeat_n('─', right));
    out
}
