//! Construction-time configuration for snowflakes.

use crate::core::{Result, SnowError};
use crate::sprite::Sprite;

/// Default minimum flake opacity.
pub const DEFAULT_ALPHA_MIN: u8 = 150;
/// Default maximum flake opacity.
pub const DEFAULT_ALPHA_MAX: u8 = 250;
/// Default maximum fall angle from vertical, in degrees.
pub const DEFAULT_ANGLE_MAX: f64 = 10.0;
pub const DEFAULT_SIZE_MIN: u32 = 4;
pub const DEFAULT_SIZE_MAX: u32 = 16;
pub const DEFAULT_SPEED_MIN: f64 = 2.0;
pub const DEFAULT_SPEED_MAX: f64 = 8.0;

/// Immutable particle parameters shared by every flake of one overlay.
///
/// Invariants (checked by [`Params::validate`], assumed by the simulation):
/// `size_min <= size_max`, `speed_min <= speed_max`, `alpha_min <= alpha_max`,
/// all dimensions > 0. Deserialized values are validated; missing fields take
/// their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedParams"))]
pub struct Params {
    /// Width of the parent surface in pixels.
    pub parent_width: u32,
    /// Height of the parent surface in pixels.
    pub parent_height: u32,
    /// Optional flake bitmap. Flakes are drawn as filled circles without one.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub image: Option<Sprite>,
    pub alpha_min: u8,
    pub alpha_max: u8,
    /// Maximum deviation of the fall direction from vertical, in degrees (both sides).
    pub angle_max: f64,
    pub size_min: u32,
    pub size_max: u32,
    /// Pixels per frame for the smallest flakes.
    pub speed_min: f64,
    /// Pixels per frame for the largest flakes.
    pub speed_max: f64,
    /// Fade flakes out linearly as they approach the bottom edge.
    pub fading_enabled: bool,
    /// Start flakes scattered over the surface instead of above it.
    pub already_falling: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            parent_width: 800,
            parent_height: 600,
            image: None,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_max: DEFAULT_ALPHA_MAX,
            angle_max: DEFAULT_ANGLE_MAX,
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            fading_enabled: false,
            already_falling: false,
        }
    }
}

impl Params {
    /// Start a builder for a surface of the given size, other fields at their defaults.
    pub fn builder(parent_width: u32, parent_height: u32) -> ParamsBuilder {
        ParamsBuilder {
            params: Params { parent_width, parent_height, ..Params::default() },
        }
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: String) -> Result<()> { Err(SnowError::InvalidParams(msg)) }

        if self.parent_width == 0 || self.parent_height == 0 {
            return invalid(format!(
                "parent size must be positive, got {}x{}",
                self.parent_width, self.parent_height
            ));
        }
        if self.alpha_min > self.alpha_max {
            return invalid(format!("alpha_min {} > alpha_max {}", self.alpha_min, self.alpha_max));
        }
        if !self.angle_max.is_finite() || self.angle_max < 0.0 {
            return invalid(format!("angle_max must be finite and >= 0, got {}", self.angle_max));
        }
        if self.size_min == 0 {
            return invalid("size_min must be positive".into());
        }
        if self.size_min > self.size_max {
            return invalid(format!("size_min {} > size_max {}", self.size_min, self.size_max));
        }
        if self.size_max > i32::MAX as u32 {
            return invalid(format!("size_max {} out of range", self.size_max));
        }
        if !self.speed_min.is_finite() || !self.speed_max.is_finite() || self.speed_min < 0.0 {
            return invalid(format!(
                "speeds must be finite and >= 0, got {}..{}",
                self.speed_min, self.speed_max
            ));
        }
        if self.speed_min > self.speed_max {
            return invalid(format!("speed_min {} > speed_max {}", self.speed_min, self.speed_max));
        }
        if let Some(image) = &self.image {
            if image.is_empty() {
                return invalid("image has zero width or height".into());
            }
        }
        Ok(())
    }
}

/// Wire shape of [`Params`] before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct UncheckedParams {
    parent_width: u32,
    parent_height: u32,
    alpha_min: u8,
    alpha_max: u8,
    angle_max: f64,
    size_min: u32,
    size_max: u32,
    speed_min: f64,
    speed_max: f64,
    fading_enabled: bool,
    already_falling: bool,
}

#[cfg(feature = "serde")]
impl Default for UncheckedParams {
    fn default() -> Self {
        let p = Params::default();
        Self {
            parent_width: p.parent_width,
            parent_height: p.parent_height,
            alpha_min: p.alpha_min,
            alpha_max: p.alpha_max,
            angle_max: p.angle_max,
            size_min: p.size_min,
            size_max: p.size_max,
            speed_min: p.speed_min,
            speed_max: p.speed_max,
            fading_enabled: p.fading_enabled,
            already_falling: p.already_falling,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedParams> for Params {
    type Error = SnowError;

    fn try_from(u: UncheckedParams) -> Result<Self> {
        let params = Params {
            parent_width: u.parent_width,
            parent_height: u.parent_height,
            image: None,
            alpha_min: u.alpha_min,
            alpha_max: u.alpha_max,
            angle_max: u.angle_max,
            size_min: u.size_min,
            size_max: u.size_max,
            speed_min: u.speed_min,
            speed_max: u.speed_max,
            fading_enabled: u.fading_enabled,
            already_falling: u.already_falling,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Consuming builder for [`Params`]; `build` validates.
#[derive(Clone, Debug)]
pub struct ParamsBuilder {
    params: Params,
}

impl ParamsBuilder {
    pub fn image(mut self, image: Sprite) -> Self {
        self.params.image = Some(image);
        self
    }

    pub fn alpha(mut self, min: u8, max: u8) -> Self {
        self.params.alpha_min = min;
        self.params.alpha_max = max;
        self
    }

    pub fn angle_max(mut self, degrees: f64) -> Self {
        self.params.angle_max = degrees;
        self
    }

    pub fn size(mut self, min: u32, max: u32) -> Self {
        self.params.size_min = min;
        self.params.size_max = max;
        self
    }

    pub fn speed(mut self, min: f64, max: f64) -> Self {
        self.params.speed_min = min;
        self.params.speed_max = max;
        self
    }

    pub fn fading(mut self, enabled: bool) -> Self {
        self.params.fading_enabled = enabled;
        self
    }

    pub fn already_falling(mut self, enabled: bool) -> Self {
        self.params.already_falling = enabled;
        self
    }

    pub fn build(self) -> Result<Params> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Params::default().validate().unwrap();
        let p = Params::builder(100, 50).build().unwrap();
        assert_eq!((p.parent_width, p.parent_height), (100, 50));
        assert_eq!(p.size_min, DEFAULT_SIZE_MIN);
    }

    #[test]
    fn builder_rejects_inverted_ranges() {
        let cases = [
            Params::builder(10, 10).size(5, 4).build(),
            Params::builder(10, 10).speed(3.0, 1.0).build(),
            Params::builder(10, 10).alpha(200, 100).build(),
        ];
        for c in cases {
            assert!(matches!(c, Err(SnowError::InvalidParams(_))));
        }
    }

    #[test]
    fn builder_rejects_degenerate_values() {
        assert!(Params::builder(0, 10).build().is_err());
        assert!(Params::builder(10, 0).build().is_err());
        assert!(Params::builder(10, 10).size(0, 4).build().is_err());
        assert!(Params::builder(10, 10).angle_max(-1.0).build().is_err());
        assert!(Params::builder(10, 10).speed(-1.0, 1.0).build().is_err());
        assert!(Params::builder(10, 10).speed(0.0, f64::INFINITY).build().is_err());
        assert!(Params::builder(10, 10).image(Sprite::filled(0, 3, [0; 4])).build().is_err());
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let p = Params::builder(10, 10)
            .size(6, 6)
            .speed(2.0, 2.0)
            .alpha(9, 9)
            .angle_max(0.0)
            .build();
        assert!(p.is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_params_fill_defaults() {
        let json = r#"{"parent_width": 320, "parent_height": 200, "fading_enabled": true}"#;
        let p: Params = serde_json::from_str(json).expect("valid params");
        assert_eq!((p.parent_width, p.parent_height), (320, 200));
        assert!(p.fading_enabled);
        assert_eq!(p.size_max, DEFAULT_SIZE_MAX);
        assert!(p.image.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_params_are_validated() {
        let inverted = serde_json::from_str::<Params>(r#"{"size_min": 9, "size_max": 3}"#);
        let err = inverted.unwrap_err().to_string();
        assert!(err.contains("size_min 9 > size_max 3"), "{err}");
        assert!(serde_json::from_str::<Params>(r#"{"parent_height": 0}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_params_read_back_equal() {
        let p = Params::builder(64, 48).size(2, 6).already_falling(true).build().unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("image"));
        assert_eq!(serde_json::from_str::<Params>(&json).unwrap(), p);
    }
}
