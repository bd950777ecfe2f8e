//! Camera-driven screen brightness.
//!
//! The controller receives one [`FrameObservation`] per camera frame and
//! keeps a brightness factor for the rendering layer. A detected face sets
//! the factor from how much of the frame it fills; frames without a face
//! drift back to neutral. When no face detector is available the average
//! luminance of the frame is used instead.

/// Neutral brightness factor
pub const NEUTRAL: f64 = 1.0;
/// Lower bound of the manual slider
pub const MANUAL_MIN: f64 = 0.6;
/// Upper bound of the manual slider
pub const MANUAL_MAX: f64 = 1.4;

const FACE_AREA_MIN: f64 = 0.02;
const FACE_AREA_MAX: f64 = 0.25;
const EASE_RATE: f64 = 0.04;

/// Brightness for a face covering `area_ratio` of the frame
pub fn face_brightness(area_ratio: f64) -> f64 {
    let t = ((area_ratio - FACE_AREA_MIN) / (FACE_AREA_MAX - FACE_AREA_MIN)).clamp(0.0, 1.0);
    1.15 - 0.3 * t
}

/// Move `current` one step toward neutral
pub fn ease_to_neutral(current: f64) -> f64 {
    current + (NEUTRAL - current) * EASE_RATE
}

/// Brightness from the average Rec. 709 luma of an RGBA buffer.
///
/// Returns `None` for a buffer with no complete pixel.
pub fn luminance_brightness(rgba: &[u8]) -> Option<f64> {
    let pixels = rgba.chunks_exact(4);
    let count = pixels.len();
    if count == 0 {
        return None;
    }
    let total: f64 = pixels
        .map(|px| 0.2126 * f64::from(px[0]) + 0.7152 * f64::from(px[1]) + 0.0722 * f64::from(px[2]))
        .sum();
    let avg = total / count as f64;
    Some(1.2 - (avg / 255.0) * 0.35)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessMode {
    #[default]
    Auto,
    Manual,
}

/// What the camera saw in one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameObservation {
    /// A face detector found a face covering `area_ratio` of the frame
    Face { area_ratio: f64 },
    /// A face detector ran and found nothing
    NoFace,
    /// No detector; raw RGBA pixels
    Frame(Vec<u8>),
}

/// Auto/manual brightness state
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessController {
    mode: BrightnessMode,
    auto_value: f64,
    manual_value: f64,
}

impl Default for BrightnessController {
    fn default() -> Self {
        Self::new()
    }
}

impl BrightnessController {
    pub fn new() -> Self {
        Self {
            mode: BrightnessMode::Auto,
            auto_value: NEUTRAL,
            manual_value: NEUTRAL,
        }
    }

    pub fn mode(&self) -> BrightnessMode {
        self.mode
    }

    /// Factor to apply right now
    pub fn current(&self) -> f64 {
        match self.mode {
            BrightnessMode::Auto => self.auto_value,
            BrightnessMode::Manual => self.manual_value,
        }
    }

    /// Feed one frame. Ignored in manual mode.
    pub fn observe(&mut self, observation: &FrameObservation) -> f64 {
        if self.mode == BrightnessMode::Auto {
            let next = match observation {
                FrameObservation::Face { area_ratio } if area_ratio.is_finite() => {
                    Some(face_brightness(*area_ratio))
                }
                FrameObservation::Face { .. } => None,
                FrameObservation::NoFace => Some(ease_to_neutral(self.auto_value)),
                FrameObservation::Frame(rgba) => luminance_brightness(rgba),
            };
            if let Some(value) = next {
                self.auto_value = value;
            }
        }
        self.current()
    }

    /// Move the slider; switches to manual mode
    pub fn set_manual(&mut self, value: f64) {
        if value.is_finite() {
            self.manual_value = value.clamp(MANUAL_MIN, MANUAL_MAX);
            self.mode = BrightnessMode::Manual;
        }
    }

    /// Flip between auto and manual
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            BrightnessMode::Auto => BrightnessMode::Manual,
            BrightnessMode::Manual => BrightnessMode::Auto,
        };
    }

    /// Back to neutral auto mode
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Camera stopped: auto brightness returns to neutral
    pub fn camera_stopped(&mut self) {
        self.auto_value = NEUTRAL;
    }
}
