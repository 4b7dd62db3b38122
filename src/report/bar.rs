use crate::error::{DuimError, Result};

/// Widest bar that will be drawn
pub const MAX_BAR_WIDTH: usize = 1000;

/// Characters used to draw a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    pub fill: char,
    pub blank: char,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill: '=',
            blank: ' ',
        }
    }
}

impl BarStyle {
    pub fn new(fill: char, blank: char) -> Self {
        Self { fill, blank }
    }
}

/// Render `percent` as a bar exactly `width` characters long.
///
/// The filled part is `round(percent * width / 100)` characters, rounding
/// half away from zero. A percent outside `[0, 100]` (or NaN) is an error
/// rather than being clamped, as is a width above [`MAX_BAR_WIDTH`].
pub fn render_bar(percent: f64, width: usize, style: &BarStyle) -> Result<String> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(DuimError::InvalidPercent(percent));
    }
    if width > MAX_BAR_WIDTH {
        return Err(DuimError::InvalidWidth(width));
    }

    let filled = ((percent * width as f64 / 100.0).round() as usize).min(width);

    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat(style.fill).take(filled));
    bar.extend(std::iter::repeat(style.blank).take(width - filled));
    Ok(bar)
}
