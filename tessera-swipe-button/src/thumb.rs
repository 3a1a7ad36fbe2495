//! The draggable thumb and the state machine behind it.
//!
//! ## Usage
//!
//! [`SwipeButton`](crate::SwipeButton) mounts a [`SwipeThumb`] once the rail
//! has been measured. The thumb turns pointer events into drag offsets,
//! decides the outcome on release, and reports it to the owner after the
//! snap animation settles.
//!
//! [`ThumbController`] is the pure state machine. Every transition returns
//! the [`SwipeEvents`] it produced instead of calling out, so callbacks run
//! only after the controller lock has been released.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    animation::{SnapAnimation, SnapCompletion},
    args::SwipeButtonArgs,
    geometry::{RailGeometry, crosses_threshold},
    prop::Callback,
    state::State,
    view::{ThumbAnchor, ThumbSemantics, ThumbView},
};

/// Timing and gesture constants for the thumb.
pub struct ThumbDefaults;

impl ThumbDefaults {
    /// Length of the snap toward either end after a release.
    pub const SNAP_DURATION: Duration = Duration::from_millis(400);
    /// Largest pointer travel (px) that still counts as a tap.
    pub const TAP_SLOP: f32 = 4.0;
}

/// Lifecycle of a swipe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbPhase {
    /// At rest at the start of the rail, ready for a drag.
    Idle,
    /// Following the pointer.
    Dragging,
    /// Released; the outcome is being decided.
    Evaluating,
    /// Animating to the end of the rail; success is reported when it lands.
    SnappingForward,
    /// Animating to the start of the rail; failure is reported when it lands.
    SnappingBack,
    /// Returning to the start after a success with auto-reset; presses are
    /// ignored until it lands.
    Rearming,
    /// Parked at the end of the rail after a success; drags are ignored.
    Locked,
}

/// Which way the thumb travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leading edge to trailing edge.
    Forward,
    /// Trailing edge to leading edge (right-to-left).
    Reverse,
}

/// Something the controller wants reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEvent {
    /// A drag attempt began.
    Started,
    /// The attempt succeeded and the thumb reached the end.
    Succeeded,
    /// The attempt failed and the thumb is back at the start.
    Failed,
    /// The thumb was re-armed by a tap or an auto-reset.
    Rearmed,
    /// The owner reset the thumb.
    ForceReset,
}

/// Events produced by a single transition.
pub type SwipeEvents = SmallVec<[SwipeEvent; 2]>;

/// Behavior flags the controller consults on every transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbBehavior {
    /// Release progress (percent) at or above which a swipe succeeds.
    pub swipe_success_threshold: f32,
    /// Mirror the drag direction.
    pub enable_reverse_swipe: bool,
    /// Ignore taps on a locked thumb.
    pub disable_reset_on_tap: bool,
    /// Return to the start after a success instead of locking.
    pub should_reset_after_success: bool,
    /// Pause before the auto-reset return.
    pub reset_after_success_anim_delay: Duration,
    /// Length of the auto-reset return.
    pub reset_after_success_anim_duration: Duration,
    /// Ignore all input.
    pub disabled: bool,
    /// Replace dragging with a single activation.
    pub screen_reader_enabled: bool,
}

impl Default for ThumbBehavior {
    fn default() -> Self {
        SwipeButtonArgs::default().behavior(false)
    }
}

/// Gesture state machine for one thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbController {
    geometry: RailGeometry,
    behavior: ThumbBehavior,
    phase: ThumbPhase,
    offset: f32,
    animation: Option<SnapAnimation>,
    tap_armed: bool,
    drag_travel: f32,
    drag_farthest: f32,
    drag_started: bool,
}

impl ThumbController {
    /// Creates an idle controller for a measured rail.
    pub fn new(geometry: RailGeometry, behavior: ThumbBehavior) -> Self {
        Self {
            geometry,
            behavior,
            phase: ThumbPhase::Idle,
            offset: 0.0,
            animation: None,
            tap_armed: false,
            drag_travel: 0.0,
            drag_farthest: 0.0,
            drag_started: false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ThumbPhase {
        self.phase
    }

    /// Distance from the start of the rail, in `[0, travel_range]`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset as a percentage of the travel range.
    pub fn progress(&self) -> f32 {
        self.geometry.progress(self.offset)
    }

    /// Rail the controller was built for.
    pub fn geometry(&self) -> RailGeometry {
        self.geometry
    }

    /// Flags in effect.
    pub fn behavior(&self) -> ThumbBehavior {
        self.behavior
    }

    /// Travel direction.
    pub fn direction(&self) -> SwipeDirection {
        if self.behavior.enable_reverse_swipe {
            SwipeDirection::Reverse
        } else {
            SwipeDirection::Forward
        }
    }

    /// Whether the thumb is parked after a success.
    pub fn is_locked(&self) -> bool {
        self.phase == ThumbPhase::Locked
    }

    /// Whether a snap or rearm timeline is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether a drag would currently be accepted.
    pub fn accepts_drag(&self) -> bool {
        !self.behavior.disabled
            && !self.behavior.screen_reader_enabled
            && !self.geometry.is_inert()
            && self.phase == ThumbPhase::Idle
    }

    /// Applies new geometry and flags from the latest render.
    ///
    /// Turning input off mid-drag cancels the drag without an outcome.
    /// Disabling also cancels a running snap or rearm, so a disabled
    /// control never reports.
    pub fn sync(&mut self, geometry: RailGeometry, behavior: ThumbBehavior) -> SwipeEvents {
        self.geometry = geometry;
        self.behavior = behavior;
        self.offset = match self.phase {
            ThumbPhase::Locked => geometry.travel_range(),
            _ => geometry.clamp_offset(self.offset),
        };

        let cancel = match self.phase {
            ThumbPhase::Dragging => behavior.disabled || behavior.screen_reader_enabled,
            ThumbPhase::SnappingForward | ThumbPhase::SnappingBack | ThumbPhase::Rearming => {
                behavior.disabled
            }
            _ => false,
        };
        if cancel {
            debug!(
                phase = ?self.phase,
                disabled = behavior.disabled,
                screen_reader = behavior.screen_reader_enabled,
                "attempt canceled because input was turned off"
            );
            return self.force_reset();
        }
        SwipeEvents::new()
    }

    /// Pointer went down on the thumb.
    ///
    /// Nothing is reported yet: an attempt starts once the pointer leaves
    /// the tap slop.
    pub fn gesture_start(&mut self) {
        if self.behavior.disabled || self.behavior.screen_reader_enabled {
            return;
        }
        match self.phase {
            ThumbPhase::Locked => {
                self.tap_armed = true;
            }
            ThumbPhase::Idle => {
                if self.geometry.is_inert() {
                    debug!(
                        width = self.geometry.width,
                        thumb_width = self.geometry.thumb_width,
                        "rail has no travel range; ignoring drag"
                    );
                    return;
                }
                self.phase = ThumbPhase::Dragging;
                self.tap_armed = false;
                self.drag_travel = 0.0;
                self.drag_farthest = 0.0;
                self.drag_started = false;
            }
            phase => {
                debug!(?phase, "ignoring press while the thumb is in motion");
            }
        }
    }

    /// Pointer moved by `delta` px along the rail.
    ///
    /// Reports [`SwipeEvent::Started`] the first time the drag leaves the
    /// tap slop.
    pub fn gesture_move(&mut self, delta: f32) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        if self.phase != ThumbPhase::Dragging || !delta.is_finite() {
            return events;
        }
        self.drag_travel += delta;
        self.drag_farthest = self.drag_farthest.max(self.drag_travel.abs());
        if !self.drag_started && self.drag_farthest > ThumbDefaults::TAP_SLOP {
            self.drag_started = true;
            events.push(SwipeEvent::Started);
        }

        let delta = match self.direction() {
            SwipeDirection::Forward => delta,
            SwipeDirection::Reverse => -delta,
        };
        self.offset = self.geometry.clamp_offset(self.offset + delta);
        events
    }

    /// Pointer went up. `tap` is true when it barely moved.
    pub fn gesture_end(&mut self, tap: bool) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        match self.phase {
            ThumbPhase::Dragging if !self.drag_started => {
                debug!("press released inside the tap slop; no attempt");
                self.rearm_now();
            }
            ThumbPhase::Dragging => self.release(),
            ThumbPhase::Locked => {
                let armed = std::mem::take(&mut self.tap_armed);
                if armed && tap && !self.behavior.disabled {
                    if self.behavior.disable_reset_on_tap {
                        debug!("tap on locked thumb ignored");
                    } else {
                        self.rearm_now();
                        events.push(SwipeEvent::Rearmed);
                    }
                }
            }
            _ => {}
        }
        events
    }

    /// Single discrete activation from assistive technology.
    pub fn activate(&mut self) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        if self.behavior.disabled {
            return events;
        }
        match self.phase {
            ThumbPhase::Idle => {
                self.offset = self.geometry.travel_range();
                events.push(SwipeEvent::Started);
                events.push(SwipeEvent::Succeeded);
                debug!("activated without a drag");
                self.after_success();
            }
            ThumbPhase::Locked if !self.behavior.disable_reset_on_tap => {
                self.rearm_now();
                events.push(SwipeEvent::Rearmed);
            }
            _ => {}
        }
        events
    }

    /// Cancels whatever is in flight and returns to the start.
    ///
    /// Never reports success or failure.
    pub fn force_reset(&mut self) -> SwipeEvents {
        let canceled = self.animation.take();
        debug!(
            phase = ?self.phase,
            canceled = ?canceled.as_ref().map(SnapAnimation::completion),
            "forced reset"
        );
        self.rearm_now();
        let mut events = SwipeEvents::new();
        events.push(SwipeEvent::ForceReset);
        events
    }

    /// Advances the running timeline to `frame_nanos`.
    pub fn tick(&mut self, frame_nanos: u64) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        let Some(animation) = self.animation.as_mut() else {
            return events;
        };
        let sample = animation.sample(frame_nanos);
        self.offset = self.geometry.clamp_offset(sample.offset);
        if !sample.finished {
            return events;
        }

        let completion = animation.completion();
        self.animation = None;
        match completion {
            SnapCompletion::Success => {
                events.push(SwipeEvent::Succeeded);
                self.after_success();
            }
            SnapCompletion::Fail => {
                self.phase = ThumbPhase::Idle;
                self.offset = 0.0;
                events.push(SwipeEvent::Failed);
            }
            SnapCompletion::Rearm => {
                self.phase = ThumbPhase::Idle;
                self.offset = 0.0;
                events.push(SwipeEvent::Rearmed);
            }
        }
        events
    }

    fn release(&mut self) {
        self.phase = ThumbPhase::Evaluating;
        let progress = self.progress();
        let threshold = self.behavior.swipe_success_threshold;
        let (phase, animation) = if crosses_threshold(progress, threshold) {
            (
                ThumbPhase::SnappingForward,
                SnapAnimation::new(
                    self.offset,
                    self.geometry.travel_range(),
                    ThumbDefaults::SNAP_DURATION,
                    SnapCompletion::Success,
                ),
            )
        } else {
            (
                ThumbPhase::SnappingBack,
                SnapAnimation::new(
                    self.offset,
                    0.0,
                    ThumbDefaults::SNAP_DURATION,
                    SnapCompletion::Fail,
                ),
            )
        };
        debug!(progress, threshold, ?phase, "swipe released");
        self.phase = phase;
        self.animation = Some(animation);
    }

    fn after_success(&mut self) {
        if self.behavior.should_reset_after_success {
            self.phase = ThumbPhase::Rearming;
            self.animation = Some(
                SnapAnimation::new(
                    self.offset,
                    0.0,
                    self.behavior.reset_after_success_anim_duration,
                    SnapCompletion::Rearm,
                )
                .with_delay(self.behavior.reset_after_success_anim_delay),
            );
        } else {
            self.phase = ThumbPhase::Locked;
            self.offset = self.geometry.travel_range();
        }
    }

    fn rearm_now(&mut self) {
        self.animation = None;
        self.phase = ThumbPhase::Idle;
        self.offset = 0.0;
        self.tap_armed = false;
        self.drag_started = false;
    }
}

/// Raw pointer input along the rail, in px relative to the rail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer went down at `x`.
    Pressed(f32),
    /// Pointer moved to `x`.
    Moved(f32),
    /// Pointer went up at `x`.
    Released(f32),
    /// The platform took the pointer away.
    Cancelled,
}

/// Turns absolute pointer positions into deltas and tap classification.
#[derive(Debug, Default, Clone, Copy)]
struct PointerTracker {
    origin: Option<f32>,
    last: f32,
    max_travel: f32,
}

impl PointerTracker {
    fn press(&mut self, x: f32) {
        self.origin = Some(x);
        self.last = x;
        self.max_travel = 0.0;
    }

    fn move_to(&mut self, x: f32) -> Option<f32> {
        let origin = self.origin?;
        let delta = x - self.last;
        self.last = x;
        self.max_travel = self.max_travel.max((x - origin).abs());
        Some(delta)
    }

    /// Ends the gesture. Returns the last delta and whether it was a tap.
    fn release(&mut self, x: Option<f32>) -> Option<(f32, bool)> {
        self.origin?;
        let delta = x.and_then(|x| self.move_to(x)).unwrap_or(0.0);
        let tap = x.is_some() && self.max_travel <= ThumbDefaults::TAP_SLOP;
        self.origin = None;
        Some((delta, tap))
    }
}

/// Owner notifications wired from [`SwipeButtonArgs`].
#[derive(Clone, Default)]
struct ThumbCallbacks {
    on_swipe_start: Option<Callback>,
    on_swipe_success: Option<Callback>,
    on_swipe_fail: Option<Callback>,
}

impl ThumbCallbacks {
    fn from_args(args: &SwipeButtonArgs) -> Self {
        Self {
            on_swipe_start: args.on_swipe_start.clone(),
            on_swipe_success: args.on_swipe_success.clone(),
            on_swipe_fail: args.on_swipe_fail.clone(),
        }
    }
}

/// Capability to cancel and re-arm a mounted thumb.
///
/// Handed to the owner through
/// [`SwipeButtonArgs::force_reset`](crate::SwipeButtonArgs::force_reset) and
/// [`SwipeButton::reset_handle`](crate::SwipeButton::reset_handle).
#[derive(Clone, PartialEq)]
pub struct ResetHandle {
    controller: State<ThumbController>,
}

impl ResetHandle {
    /// Cancels any drag or animation and returns the thumb to the start.
    pub fn reset(&self) {
        self.controller.with_mut(|c| {
            c.force_reset();
        });
    }
}

impl std::fmt::Debug for ResetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ResetHandle(..)")
    }
}

/// A mounted thumb: controller, pointer tracking and owner callbacks.
pub struct SwipeThumb {
    controller: State<ThumbController>,
    tracker: PointerTracker,
    callbacks: ThumbCallbacks,
}

impl SwipeThumb {
    /// Mounts a thumb on a measured rail.
    pub fn new(
        geometry: RailGeometry,
        args: &SwipeButtonArgs,
        screen_reader_enabled: bool,
    ) -> Self {
        Self {
            controller: State::new(ThumbController::new(
                geometry,
                args.behavior(screen_reader_enabled),
            )),
            tracker: PointerTracker::default(),
            callbacks: ThumbCallbacks::from_args(args),
        }
    }

    /// Shared controller handle.
    pub fn controller(&self) -> &State<ThumbController> {
        &self.controller
    }

    /// Capability to force a reset from outside.
    pub fn reset_handle(&self) -> ResetHandle {
        ResetHandle {
            controller: self.controller.clone(),
        }
    }

    /// Picks up new args and accessibility state.
    pub fn update(
        &mut self,
        geometry: RailGeometry,
        args: &SwipeButtonArgs,
        screen_reader_enabled: bool,
    ) {
        self.callbacks = ThumbCallbacks::from_args(args);
        let behavior = args.behavior(screen_reader_enabled);
        let events = self.controller.with_mut(|c| c.sync(geometry, behavior));
        self.dispatch(events);
    }

    /// Feeds one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let events = match event {
            PointerEvent::Pressed(x) => {
                self.tracker.press(x);
                self.controller.with_mut(|c| c.gesture_start());
                SwipeEvents::new()
            }
            PointerEvent::Moved(x) => match self.tracker.move_to(x) {
                Some(delta) => self.controller.with_mut(|c| c.gesture_move(delta)),
                None => SwipeEvents::new(),
            },
            PointerEvent::Released(x) => self.end_gesture(Some(x)),
            PointerEvent::Cancelled => self.end_gesture(None),
        };
        self.dispatch(events);
    }

    /// Assistive-technology activation.
    pub fn activate(&mut self) {
        let events = self.controller.with_mut(|c| c.activate());
        self.dispatch(events);
    }

    /// Advances animations to `frame_nanos`.
    pub fn tick(&mut self, frame_nanos: u64) {
        let events = self.controller.with_mut(|c| c.tick(frame_nanos));
        self.dispatch(events);
    }

    /// Describes the thumb and its fill for the renderer.
    pub fn view(&self, args: &SwipeButtonArgs, screen_reader_enabled: bool) -> ThumbView {
        let controller = self.controller.get();
        let geometry = controller.geometry();
        let offset = controller.offset();
        let phase = controller.phase();
        let anchor = match controller.direction() {
            SwipeDirection::Forward => ThumbAnchor::Start,
            SwipeDirection::Reverse => ThumbAnchor::End,
        };
        let fill_width = geometry.fill_width(offset);
        let (x, fill_x) = match anchor {
            ThumbAnchor::Start => (offset, 0.0),
            ThumbAnchor::End => (
                geometry.inner_width() - geometry.thumb_width - offset,
                geometry.inner_width() - fill_width,
            ),
        };

        let (background_color, border_color) = if args.disabled {
            (
                args.disabled_thumb_icon_background_color,
                args.disabled_thumb_icon_border_color,
            )
        } else {
            (args.thumb_icon_background_color, args.thumb_icon_border_color)
        };

        let activation_offered = screen_reader_enabled
            && !args.disabled
            && match phase {
                ThumbPhase::Idle => true,
                ThumbPhase::Locked => !args.disable_reset_on_tap,
                _ => false,
            };

        ThumbView {
            test_id: args.thumb_test_id.clone(),
            anchor,
            phase,
            offset,
            progress: controller.progress(),
            x: x.max(0.0),
            width: geometry.thumb_width,
            height: args.height,
            background_color,
            border_color,
            border_width: args.thumb_icon_border_width,
            icon: args.thumb_icon.clone(),
            fill_x: fill_x.max(0.0),
            fill_width,
            fill_background_color: args.rail_fill_background_color,
            fill_border_color: args.rail_fill_border_color,
            fill_border_width: args.rail_fill_border_width,
            draggable: controller.accepts_drag() && !screen_reader_enabled,
            semantics: ThumbSemantics::new(args.title.clone(), args.disabled, activation_offered),
        }
    }

    fn end_gesture(&mut self, x: Option<f32>) -> SwipeEvents {
        let Some((delta, tap)) = self.tracker.release(x) else {
            return SwipeEvents::new();
        };
        self.controller.with_mut(|c| {
            let mut events = c.gesture_move(delta);
            events.extend(c.gesture_end(tap));
            events
        })
    }

    fn dispatch(&self, events: SwipeEvents) {
        for event in events {
            let callback = match event {
                SwipeEvent::Started => self.callbacks.on_swipe_start.as_ref(),
                SwipeEvent::Succeeded => self.callbacks.on_swipe_success.as_ref(),
                SwipeEvent::Failed => self.callbacks.on_swipe_fail.as_ref(),
                SwipeEvent::Rearmed | SwipeEvent::ForceReset => {
                    debug!(?event, "thumb re-armed");
                    None
                }
            };
            if let Some(callback) = callback {
                callback.call();
            }
        }
    }
}
