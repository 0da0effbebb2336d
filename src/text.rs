//! Cell cleaning and fixed-width fitting.
//!
//! Widths are counted in characters. Every fitter returns exactly `width`
//! characters whatever the input length.

/// Trims surrounding whitespace, then drops embedded `\n`.
pub fn clean_text(value: &str) -> String {
    value.trim().replace('\n', "")
}

/// Left-justified: pads on the right with `fill`, truncates on the right.
pub fn fit_left(value: &str, width: usize, fill: char) -> String {
    let mut out: String = value.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat_n(fill, width - used));
    out
}

/// Right-justified: pads on the left with `fill`; when too long the
/// rightmost `width` characters are kept.
pub fn fit_right(value: &str, width: usize, fill: char) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.chars().skip(len - width).collect();
    }
    let mut out: String = std::iter::repeat_n(fill, width - len).collect();
    out.push_str(value);
    out
}

pub fn blanks(width: usize) -> String {
    " ".repeat(width)
}
