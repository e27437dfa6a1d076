use crate::foundation::core::Color;

/// Squared `(L + 0.05)` below which a background counts as dark.
pub const CONTRAST_THRESHOLD: f64 = 0.0525;

/// Readable text color over some background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextColor {
    /// Black text, for light backgrounds.
    Black,
    /// White text, for dark backgrounds.
    White,
}

impl TextColor {
    /// The opaque color value.
    pub fn to_color(self) -> Color {
        match self {
            Self::Black => Color::BLACK,
            Self::White => Color::WHITE,
        }
    }
}

/// sRGB channel to linear light.
pub fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c > 0.03928 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// WCAG relative luminance of the color channels; alpha is ignored.
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Black or white, whichever reads better over `background`.
pub fn text_color_for(background: Color) -> TextColor {
    let contrast = (relative_luminance(background) + 0.05).powi(2);
    if contrast < CONTRAST_THRESHOLD {
        TextColor::White
    } else {
        TextColor::Black
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/contrast.rs"]
mod tests;
