//! A swipe-to-confirm control.
//!
//! ## Usage
//!
//! Use for actions that should not fire on an accidental tap, such as
//! payments or destructive confirmations.
//!
//! The container measures its rail once, tracks the platform screen-reader
//! flag, and mounts a [`SwipeThumb`] after the first non-zero layout.

use accesskit::Action;
use tracing::{debug, warn};

use crate::{
    accessibility::{ScreenReaderMonitor, ScreenReaderService},
    args::SwipeButtonArgs,
    geometry::RailGeometry,
    thumb::{PointerEvent, ResetHandle, SwipeThumb, ThumbController, ThumbPhase},
    view::{SwipeButtonView, TitleView},
};

/// # swipe_button
///
/// Rail, title and draggable thumb. Releasing the thumb past
/// `swipe_success_threshold` percent of its travel fires
/// `on_swipe_success`; releasing it earlier fires `on_swipe_fail`.
///
/// ## Examples
///
/// ```
/// use std::sync::{
///     Arc,
///     atomic::{AtomicUsize, Ordering},
/// };
///
/// use tessera_swipe_button::{PointerEvent, SwipeButton, SwipeButtonArgs};
///
/// let failures = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&failures);
/// let mut button = SwipeButton::new(
///     SwipeButtonArgs::default().on_swipe_fail(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }),
/// );
/// button.on_layout_measured(300.0);
/// button.handle_pointer(PointerEvent::Pressed(10.0));
/// button.handle_pointer(PointerEvent::Released(60.0));
/// button.tick(0);
/// button.tick(1_000_000_000);
/// assert_eq!(failures.load(Ordering::SeqCst), 1);
/// ```
pub struct SwipeButton {
    args: SwipeButtonArgs,
    layout_width: Option<f32>,
    screen_reader: ScreenReaderMonitor,
    thumb: Option<SwipeThumb>,
    unmounted: bool,
}

impl SwipeButton {
    /// Creates an unmeasured button.
    pub fn new(args: SwipeButtonArgs) -> Self {
        Self {
            args: sanitize(args),
            layout_width: None,
            screen_reader: ScreenReaderMonitor::new(),
            thumb: None,
            unmounted: false,
        }
    }

    /// Effective (sanitized) args.
    pub fn args(&self) -> &SwipeButtonArgs {
        &self.args
    }

    /// Replaces the args for the next frame.
    pub fn set_args(&mut self, args: SwipeButtonArgs) {
        self.args = sanitize(args);
        self.sync_thumb();
    }

    /// Starts tracking the platform screen-reader flag.
    pub fn mount(&mut self, service: &dyn ScreenReaderService) {
        self.unmounted = false;
        self.screen_reader.attach(service);
    }

    /// Stops tracking and drops the thumb and its measured rail. Safe to call
    /// more than once.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        self.screen_reader.detach();
        self.thumb = None;
        self.layout_width = None;
        debug!("swipe button unmounted");
    }

    /// Whether [`unmount`](Self::unmount) has run.
    pub fn is_tearing_down(&self) -> bool {
        self.unmounted
    }

    /// Layout callback from the host.
    ///
    /// Only the first positive width of a mount is kept; later callbacks are
    /// ignored so the rail never jitters.
    pub fn on_layout_measured(&mut self, width: f32) {
        if self.unmounted || self.layout_width.is_some() {
            return;
        }
        if !width.is_finite() || width <= 0.0 {
            debug!(width, "ignoring empty layout");
            return;
        }
        self.layout_width = Some(width);

        let geometry = self.geometry_for(width);
        let thumb = SwipeThumb::new(geometry, &self.args, self.screen_reader.is_enabled());
        debug!(
            width,
            travel_range = geometry.travel_range(),
            "rail measured; thumb mounted"
        );
        if let Some(force_reset) = self.args.force_reset.as_ref() {
            force_reset.call(thumb.reset_handle());
        }
        self.thumb = Some(thumb);
    }

    /// Measured rail width.
    pub fn layout_width(&self) -> Option<f32> {
        self.layout_width
    }

    /// Geometry of the measured rail.
    pub fn geometry(&self) -> Option<RailGeometry> {
        self.layout_width.map(|width| self.geometry_for(width))
    }

    /// Last known screen-reader flag.
    pub fn screen_reader_enabled(&self) -> bool {
        self.screen_reader.is_enabled()
    }

    /// Pointer input from the host.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.sync_thumb();
        if let Some(thumb) = self.thumb.as_mut() {
            thumb.handle_pointer(event);
        }
    }

    /// Accessibility action from the host. Returns whether it was handled.
    pub fn handle_accessibility_action(&mut self, action: Action) -> bool {
        if action != Action::Click {
            return false;
        }
        self.sync_thumb();
        match self.thumb.as_mut() {
            Some(thumb) => {
                thumb.activate();
                true
            }
            None => false,
        }
    }

    /// Frame callback from the host.
    pub fn tick(&mut self, frame_nanos: u64) {
        self.sync_thumb();
        if let Some(thumb) = self.thumb.as_mut() {
            thumb.tick(frame_nanos);
        }
    }

    /// Whether the host should keep scheduling frames.
    pub fn is_animating(&self) -> bool {
        self.thumb_state(|c| c.is_animating()).unwrap_or(false)
    }

    /// Whether the thumb is parked after a success.
    pub fn is_locked(&self) -> bool {
        self.thumb_state(|c| c.is_locked()).unwrap_or(false)
    }

    /// Thumb phase, once mounted.
    pub fn phase(&self) -> Option<ThumbPhase> {
        self.thumb_state(|c| c.phase())
    }

    /// Current progress in percent; `0.0` before the rail is measured.
    pub fn progress(&self) -> f32 {
        self.thumb_state(|c| c.progress()).unwrap_or(0.0)
    }

    /// Capability to cancel and re-arm the thumb, once mounted.
    pub fn reset_handle(&self) -> Option<ResetHandle> {
        self.thumb.as_ref().map(SwipeThumb::reset_handle)
    }

    /// Describes the current frame.
    pub fn render(&self) -> SwipeButtonView {
        let args = &self.args;
        let screen_reader_enabled = self.screen_reader.is_enabled();
        SwipeButtonView {
            test_id: args.container_test_id.clone(),
            width: args.width,
            height: args.height,
            padding: args.container_padding,
            background_color: if args.disabled {
                args.disabled_rail_background_color
            } else {
                args.rail_background_color
            },
            border_color: args.rail_border_color,
            border_width: args.rail_border_width,
            title: TitleView {
                text: args.title.clone(),
                color: args.title_color,
                font_size: args.title_font_size,
                max_font_scale: args.title_max_font_scale,
                margin: args.title_margin,
                hidden_from_accessibility: screen_reader_enabled,
            },
            leading: args.leading.clone(),
            trailing: args.trailing.clone(),
            thumb: self
                .thumb
                .as_ref()
                .map(|thumb| thumb.view(args, screen_reader_enabled)),
        }
    }

    fn geometry_for(&self, width: f32) -> RailGeometry {
        RailGeometry::new(width, self.args.container_padding, self.args.thumb_width())
    }

    fn thumb_state<R>(&self, f: impl FnOnce(&ThumbController) -> R) -> Option<R> {
        self.thumb.as_ref().map(|thumb| thumb.controller().with(f))
    }

    fn sync_thumb(&mut self) {
        let Some(width) = self.layout_width else {
            return;
        };
        let geometry = self.geometry_for(width);
        let screen_reader_enabled = self.screen_reader.is_enabled();
        if let Some(thumb) = self.thumb.as_mut() {
            thumb.update(geometry, &self.args, screen_reader_enabled);
        }
    }
}

impl Drop for SwipeButton {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn sanitize(args: SwipeButtonArgs) -> SwipeButtonArgs {
    match args.validate() {
        Ok(()) => args,
        Err(err) => {
            warn!(%err, "invalid swipe button args; falling back to defaults");
            args.sanitized()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use parking_lot::Mutex;

    use super::*;
    use crate::{accessibility::tests::FakeScreenReader, view::ThumbAnchor};

    const MS: u64 = 1_000_000;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn args(self: &Arc<Self>) -> SwipeButtonArgs {
            let start = Arc::clone(self);
            let success = Arc::clone(self);
            let fail = Arc::clone(self);
            SwipeButtonArgs::default()
                .on_swipe_start(move || start.events.lock().push("start"))
                .on_swipe_success(move || success.events.lock().push("success"))
                .on_swipe_fail(move || fail.events.lock().push("fail"))
        }

        fn take(&self) -> Vec<&'static str> {
            std::mem::take(&mut *self.events.lock())
        }
    }

    fn settle(button: &mut SwipeButton) {
        let mut now = 0;
        while button.is_animating() {
            button.tick(now);
            now += 16 * MS;
            assert!(now < 10_000 * MS, "animation never settled");
        }
    }

    fn swipe(button: &mut SwipeButton, distance: f32) {
        button.handle_pointer(PointerEvent::Pressed(20.0));
        button.handle_pointer(PointerEvent::Moved(20.0 + distance / 2.0));
        button.handle_pointer(PointerEvent::Moved(20.0 + distance));
        button.handle_pointer(PointerEvent::Released(20.0 + distance));
    }

    #[test]
    fn thumb_mounts_after_first_layout() {
        let mut button = SwipeButton::new(SwipeButtonArgs::default());
        assert!(button.render().thumb.is_none());

        button.on_layout_measured(0.0);
        assert!(button.render().thumb.is_none());

        button.on_layout_measured(300.0);
        button.on_layout_measured(500.0);
        assert_eq!(button.layout_width(), Some(300.0));
        let geometry = button.geometry().expect("measured");
        assert_eq!(geometry.travel_range(), 242.0);
        assert!(button.render().thumb.is_some());
    }

    #[test]
    fn scenario_success_and_failure() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args());
        button.on_layout_measured(300.0);

        swipe(&mut button, 150.0);
        assert_eq!(recorder.take(), vec!["start"]);
        settle(&mut button);
        assert_eq!(recorder.take(), vec!["fail"]);
        assert_eq!(button.phase(), Some(ThumbPhase::Idle));
        assert_eq!(button.progress(), 0.0);

        swipe(&mut button, 170.0);
        settle(&mut button);
        assert_eq!(recorder.take(), vec!["start", "success"]);
        assert!(button.is_locked());
        let thumb = button.render().thumb.expect("mounted");
        assert_eq!(thumb.offset, 242.0);
        assert_eq!(thumb.progress, 100.0);
    }

    #[test]
    fn locked_button_rearms_on_tap() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args());
        button.on_layout_measured(300.0);
        swipe(&mut button, 240.0);
        settle(&mut button);
        recorder.take();

        swipe(&mut button, -200.0);
        assert!(button.is_locked());

        button.handle_pointer(PointerEvent::Pressed(270.0));
        button.handle_pointer(PointerEvent::Released(271.0));
        assert_eq!(button.phase(), Some(ThumbPhase::Idle));
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn disabled_button_stays_silent() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args().disabled(true));
        button.on_layout_measured(300.0);
        swipe(&mut button, 240.0);
        settle(&mut button);
        assert!(recorder.take().is_empty());
        assert_eq!(button.progress(), 0.0);

        let view = button.render();
        assert_eq!(
            view.background_color,
            SwipeButtonArgs::default().disabled_rail_background_color
        );
        assert!(!view.thumb.expect("mounted").draggable);
    }

    #[test]
    fn force_reset_callback_receives_handle() {
        let recorder = Arc::new(Recorder::default());
        let handle: Arc<Mutex<Option<ResetHandle>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&handle);
        let mut button =
            SwipeButton::new(recorder.args().force_reset(move |h| *sink.lock() = Some(h)));
        assert!(handle.lock().is_none());
        button.on_layout_measured(300.0);

        swipe(&mut button, 200.0);
        button.tick(0);
        button.tick(200 * MS);
        handle.lock().as_ref().expect("handed out").reset();
        settle(&mut button);

        assert_eq!(recorder.take(), vec!["start"]);
        assert_eq!(button.phase(), Some(ThumbPhase::Idle));
        assert_eq!(button.progress(), 0.0);
    }

    #[test]
    fn screen_reader_switches_to_activation() {
        let service = FakeScreenReader::default();
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args().title("Pay"));
        button.mount(&service);
        button.on_layout_measured(300.0);
        service.answer(true);

        let view = button.render();
        assert!(view.title.hidden_from_accessibility);
        let semantics = view.thumb.expect("mounted").semantics;
        assert_eq!(semantics.label, "Pay");
        assert_eq!(semantics.actions.as_slice(), &[Action::Click]);

        swipe(&mut button, 240.0);
        assert!(recorder.take().is_empty());

        assert!(!button.handle_accessibility_action(Action::Focus));
        assert!(button.handle_accessibility_action(Action::Click));
        assert_eq!(recorder.take(), vec!["start", "success"]);
        assert!(button.is_locked());
    }

    #[test]
    fn unmount_with_pending_query_is_silent() {
        let service = FakeScreenReader::default();
        let mut button = SwipeButton::new(SwipeButtonArgs::default());
        button.mount(&service);
        button.on_layout_measured(300.0);
        button.unmount();
        button.unmount();

        service.answer(true);
        service.toggle(true);
        assert!(!button.screen_reader_enabled());
        assert!(button.is_tearing_down());
        assert!(button.render().thumb.is_none());

        button.on_layout_measured(320.0);
        assert!(button.render().thumb.is_none());
    }

    #[test]
    fn remount_measures_a_fresh_rail() {
        let service = FakeScreenReader::default();
        let mut button = SwipeButton::new(SwipeButtonArgs::default());
        button.mount(&service);
        button.on_layout_measured(300.0);
        button.unmount();
        assert_eq!(button.layout_width(), None);

        button.mount(&service);
        assert!(!button.is_tearing_down());
        button.on_layout_measured(360.0);
        assert_eq!(button.layout_width(), Some(360.0));
        let thumb = button.render().thumb.expect("remounted");
        assert_eq!(thumb.phase, ThumbPhase::Idle);
        assert_eq!(button.geometry().expect("measured").travel_range(), 302.0);
        assert_eq!(service.listener_count(), 1);
    }

    #[test]
    fn tap_while_auto_reset_waits_does_not_repeat_success() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args().should_reset_after_success(true));
        button.on_layout_measured(300.0);
        swipe(&mut button, 240.0);
        button.tick(0);
        button.tick(500 * MS);
        assert_eq!(button.phase(), Some(ThumbPhase::Rearming));
        assert_eq!(recorder.take(), vec!["start", "success"]);

        button.handle_pointer(PointerEvent::Pressed(270.0));
        button.handle_pointer(PointerEvent::Released(270.0));
        settle(&mut button);
        assert!(recorder.take().is_empty());
        assert_eq!(button.phase(), Some(ThumbPhase::Idle));
        assert_eq!(button.progress(), 0.0);
    }

    #[test]
    fn disabling_during_snap_reports_nothing() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args());
        button.on_layout_measured(300.0);
        swipe(&mut button, 230.0);
        button.tick(0);
        assert_eq!(recorder.take(), vec!["start"]);

        button.set_args(recorder.args().disabled(true));
        button.tick(1_000 * MS);
        assert!(recorder.take().is_empty());
        assert_eq!(button.phase(), Some(ThumbPhase::Idle));
        assert!(!button.is_locked());
    }

    #[test]
    fn tap_on_idle_thumb_reports_nothing() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(recorder.args());
        button.on_layout_measured(300.0);
        button.handle_pointer(PointerEvent::Pressed(30.0));
        button.handle_pointer(PointerEvent::Released(31.0));
        settle(&mut button);
        assert!(recorder.take().is_empty());
        assert_eq!(button.phase(), Some(ThumbPhase::Idle));
    }

    #[test]
    fn dropping_button_releases_subscription() {
        let service = FakeScreenReader::default();
        {
            let mut button = SwipeButton::new(SwipeButtonArgs::default());
            button.mount(&service);
            assert_eq!(service.listener_count(), 1);
        }
        assert_eq!(service.listener_count(), 0);
        service.answer(true);
    }

    #[test]
    fn invalid_args_are_sanitized() {
        let button = SwipeButton::new(
            SwipeButtonArgs::default()
                .swipe_success_threshold(250.0)
                .height(-1.0),
        );
        assert_eq!(button.args().swipe_success_threshold, 100.0);
        assert_eq!(button.args().height, 50.0);
    }

    #[test]
    fn reverse_swipe_uses_leftward_drag() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut button = SwipeButton::new(
            SwipeButtonArgs::default()
                .enable_reverse_swipe(true)
                .on_swipe_success(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
        );
        button.on_layout_measured(300.0);
        swipe(&mut button, 200.0);
        settle(&mut button);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        swipe(&mut button, -200.0);
        settle(&mut button);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let thumb = button.render().thumb.expect("mounted");
        assert_eq!(thumb.anchor, ThumbAnchor::End);
        assert_eq!(thumb.x, 0.0);
    }

    #[test]
    fn set_args_updates_callbacks_and_flags() {
        let recorder = Arc::new(Recorder::default());
        let mut button = SwipeButton::new(SwipeButtonArgs::default());
        button.on_layout_measured(300.0);
        button.set_args(recorder.args().swipe_success_threshold(10.0));
        swipe(&mut button, 30.0);
        settle(&mut button);
        assert_eq!(recorder.take(), vec!["start", "success"]);
    }
}
