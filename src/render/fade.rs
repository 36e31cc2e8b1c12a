//! Fade-in alphas for freshly loaded textures and cards near the edge of
//! the visible window.

use std::time::Duration;

use web_time::Instant;

/// Below this a card is drawn with the loading texture alone.
pub const BLEND_CUTOFF: f32 = 0.01;

/// Progress of a load fade that started at `stamp`. A resource that was never
/// stamped counts as fully faded in, as does a zero duration.
#[must_use]
pub fn animated_alpha(stamp: Option<Instant>, now: Instant, duration: Duration) -> f32 {
    let Some(stamp) = stamp else {
        return 1.0;
    };
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(stamp);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Alpha ramping from 0 at `end` up to 1 at `start`, for an angle moving from
/// `end` toward `start`. A zero-width ramp is a hard edge at `start`.
#[must_use]
pub fn ramp_alpha(angle: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span.abs() <= f32::EPSILON {
        return if angle <= start { 1.0 } else { 0.0 };
    }
    ((end - angle) / span).clamp(0.0, 1.0)
}

/// Uniform block carrying the blend amount between the loading texture and
/// the card texture.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FadeConstants {
    /// 0 shows the loading texture, 1 the card texture.
    pub fade_amount: f32,
    /// Padding to a 16-byte uniform.
    pub(crate) _pad: [f32; 3],
}

impl FadeConstants {
    /// Constants for `fade_amount`.
    #[must_use]
    pub fn new(fade_amount: f32) -> Self {
        Self {
            fade_amount,
            _pad: [0.0; 3],
        }
    }

    /// Raw bytes ready for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstamped_resources_are_opaque() {
        let now = Instant::now();
        assert_eq!(animated_alpha(None, now, Duration::from_millis(250)), 1.0);
        assert_eq!(animated_alpha(Some(now), now, Duration::ZERO), 1.0);
    }

    #[test]
    fn animated_alpha_ramps_over_duration() {
        let t0 = Instant::now();
        let d = Duration::from_millis(200);
        assert_eq!(animated_alpha(Some(t0), t0, d), 0.0);
        let half = animated_alpha(Some(t0), t0 + Duration::from_millis(100), d);
        assert!((half - 0.5).abs() < 1e-4);
        assert_eq!(animated_alpha(Some(t0), t0 + Duration::from_secs(1), d), 1.0);
        // A stamp in the future reads as just started.
        assert_eq!(animated_alpha(Some(t0 + d), t0, d), 0.0);
    }

    #[test]
    fn ramp_alpha_clamps_and_handles_zero_width() {
        assert_eq!(ramp_alpha(0.0, 1.0, 2.0), 1.0);
        assert!((ramp_alpha(1.5, 1.0, 2.0) - 0.5).abs() < 1e-6);
        assert_eq!(ramp_alpha(3.0, 1.0, 2.0), 0.0);
        assert_eq!(ramp_alpha(0.9, 1.0, 1.0), 1.0);
        assert_eq!(ramp_alpha(1.1, 1.0, 1.0), 0.0);
    }

    #[test]
    fn fade_constants_are_sixteen_bytes() {
        let c = FadeConstants::new(0.25);
        assert_eq!(c.as_bytes().len(), 16);
        assert_eq!(&c.as_bytes()[..4], &0.25_f32.to_ne_bytes());
    }
}
