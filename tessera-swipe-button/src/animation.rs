//! Snap timelines for the thumb.

use std::time::Duration;

/// Cubic ease-in-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub(crate) fn easing(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// What a finished timeline resolves the current attempt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SnapCompletion {
    Success,
    Fail,
    Rearm,
}

/// One frame of a running timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SnapSample {
    pub offset: f32,
    pub finished: bool,
}

/// An owned, cancelable offset timeline.
///
/// The start time is latched on the first sampled frame, so creating a
/// timeline never needs a clock. Canceling is dropping it: a dropped
/// timeline has nobody left to report its completion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SnapAnimation {
    from: f32,
    to: f32,
    delay: Duration,
    duration: Duration,
    started_at: Option<u64>,
    completion: SnapCompletion,
}

impl SnapAnimation {
    pub fn new(from: f32, to: f32, duration: Duration, completion: SnapCompletion) -> Self {
        Self {
            from,
            to,
            delay: Duration::ZERO,
            duration,
            started_at: None,
            completion,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn completion(&self) -> SnapCompletion {
        self.completion
    }

    /// Samples the timeline at `frame_nanos`.
    pub fn sample(&mut self, frame_nanos: u64) -> SnapSample {
        let started_at = *self.started_at.get_or_insert(frame_nanos);
        let elapsed = Duration::from_nanos(frame_nanos.saturating_sub(started_at));

        if elapsed < self.delay {
            return SnapSample {
                offset: self.from,
                finished: false,
            };
        }
        let running = elapsed - self.delay;
        if running >= self.duration {
            return SnapSample {
                offset: self.to,
                finished: true,
            };
        }

        let fraction = running.as_secs_f32() / self.duration.as_secs_f32();
        SnapSample {
            offset: self.from + (self.to - self.from) * easing(fraction),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    #[test]
    fn easing_is_anchored_at_both_ends() {
        assert_eq!(easing(0.0), 0.0);
        assert_eq!(easing(1.0), 1.0);
        assert_eq!(easing(0.5), 0.5);
        assert_eq!(easing(-1.0), 0.0);
    }

    #[test]
    fn first_sample_latches_start_time() {
        let mut anim = SnapAnimation::new(
            0.0,
            100.0,
            Duration::from_millis(100),
            SnapCompletion::Success,
        );
        let first = anim.sample(5_000 * MS);
        assert_eq!(first.offset, 0.0);
        assert!(!first.finished);

        let mid = anim.sample(5_050 * MS);
        assert!((mid.offset - 50.0).abs() < 1e-3);

        let end = anim.sample(5_100 * MS);
        assert_eq!(end.offset, 100.0);
        assert!(end.finished);
    }

    #[test]
    fn delay_holds_the_start_offset() {
        let mut anim =
            SnapAnimation::new(80.0, 0.0, Duration::from_millis(50), SnapCompletion::Rearm)
                .with_delay(Duration::from_millis(200));
        anim.sample(0);
        let held = anim.sample(150 * MS);
        assert_eq!(held.offset, 80.0);
        assert!(!held.finished);
        assert!(anim.sample(250 * MS).finished);
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut anim = SnapAnimation::new(10.0, 0.0, Duration::ZERO, SnapCompletion::Fail);
        let sample = anim.sample(42);
        assert!(sample.finished);
        assert_eq!(sample.offset, 0.0);
    }
}
