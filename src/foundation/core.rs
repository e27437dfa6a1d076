pub use kurbo::{Point, Size, Vec2};

/// 8-bit RGB color with an optional straight alpha in `[0, 1]`.
///
/// Serialized as `[r, g, b]` or `[r, g, b, a]`.
#[derive(Clone, Copy, Debug)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, `None` for opaque three-channel colors.
    pub a: Option<f64>,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent white, used for union-only animation elements.
    pub const TRANSPARENT: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: Some(0.0),
    };

    /// Opaque color from three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Same channels, new alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: Some(a), ..self }
    }

    /// The three color channels.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// CSS functional notation: `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn to_css(self) -> String {
        match self.a {
            Some(a) => format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, a),
            None => format!("rgb({}, {}, {})", self.r, self.g, self.b),
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.channels() == other.channels() && self.a.map(f64::to_bits) == other.a.map(f64::to_bits)
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.channels().hash(state);
        self.a.map(f64::to_bits).hash(state);
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq as _;

        let mut seq = serializer.serialize_seq(Some(if self.a.is_some() { 4 } else { 3 }))?;
        seq.serialize_element(&self.r)?;
        seq.serialize_element(&self.g)?;
        seq.serialize_element(&self.b)?;
        if let Some(a) = self.a {
            seq.serialize_element(&a)?;
        }
        seq.end()
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Rgb(u8, u8, u8),
            Rgba(u8, u8, u8, f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Rgb(r, g, b) => Ok(Self::rgb(r, g, b)),
            Repr::Rgba(r, g, b, a) => {
                if !(0.0..=1.0).contains(&a) {
                    return Err(serde::de::Error::custom("color alpha must be between 0 and 1"));
                }
                Ok(Self::rgba(r, g, b, a))
            }
        }
    }
}

/// Integer pixel position on the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Pixel {
    /// Horizontal pixel coordinate, growing rightwards.
    pub x: i64,
    /// Vertical pixel coordinate, growing downwards.
    pub y: i64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
