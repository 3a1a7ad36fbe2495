//! Headless walkthrough of the swipe button lifecycle.
//!
//! Run with `RUST_LOG=tessera_swipe_button=debug,example=info` to see the
//! state transitions next to the owner callbacks.

use std::sync::Arc;

use accesskit::Action;
use parking_lot::Mutex;
use tessera_swipe_button::{
    CallbackWith, PointerEvent, ResetHandle, ScreenReaderService, Subscription, SwipeButton,
    SwipeButtonArgs,
};
use tracing::info;

const FRAME_NANOS: u64 = 16_666_667;

/// Stands in for the platform accessibility service; replies on demand.
#[derive(Default)]
struct ScriptedScreenReader {
    listeners: Arc<Mutex<Vec<CallbackWith<bool>>>>,
    pending: Mutex<Vec<CallbackWith<bool>>>,
}

impl ScriptedScreenReader {
    fn answer(&self, enabled: bool) {
        let pending = std::mem::take(&mut *self.pending.lock());
        for reply in pending {
            reply.call(enabled);
        }
    }
}

impl ScreenReaderService for ScriptedScreenReader {
    fn subscribe(&self, listener: CallbackWith<bool>) -> Subscription {
        self.listeners.lock().push(listener.clone());
        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || listeners.lock().retain(|l| *l != listener))
    }

    fn query_enabled(&self, reply: CallbackWith<bool>) {
        self.pending.lock().push(reply);
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,example=info,tessera_swipe_button=debug",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

fn logged_args(name: &'static str) -> SwipeButtonArgs {
    SwipeButtonArgs::default()
        .width(300.0)
        .on_swipe_start(move || info!(name, "on_swipe_start"))
        .on_swipe_success(move || info!(name, "on_swipe_success"))
        .on_swipe_fail(move || info!(name, "on_swipe_fail"))
}

fn swipe(button: &mut SwipeButton, from: f32, to: f32) {
    button.handle_pointer(PointerEvent::Pressed(from));
    let steps = 8;
    for step in 1..=steps {
        let x = from + (to - from) * step as f32 / steps as f32;
        button.handle_pointer(PointerEvent::Moved(x));
    }
    button.handle_pointer(PointerEvent::Released(to));
}

/// Drives frames until nothing is animating; returns the next frame time.
fn settle(button: &mut SwipeButton, mut now: u64) -> u64 {
    while button.is_animating() {
        button.tick(now);
        now += FRAME_NANOS;
    }
    now
}

fn main() {
    init_tracing();
    let mut now = 0;

    info!("-- threshold: 150px of 242px fails, 170px succeeds");
    let mut button = SwipeButton::new(logged_args("basic"));
    button.on_layout_measured(300.0);
    swipe(&mut button, 25.0, 175.0);
    now = settle(&mut button, now);
    swipe(&mut button, 25.0, 195.0);
    now = settle(&mut button, now);
    info!(locked = button.is_locked(), progress = button.progress(), "after success");

    info!("-- tap re-arms a locked thumb");
    button.handle_pointer(PointerEvent::Pressed(270.0));
    button.handle_pointer(PointerEvent::Released(271.0));
    info!(phase = ?button.phase(), "after tap");

    info!("-- auto-reset after success");
    let mut auto = SwipeButton::new(logged_args("auto").should_reset_after_success(true));
    auto.on_layout_measured(300.0);
    swipe(&mut auto, 25.0, 280.0);
    now = settle(&mut auto, now);
    info!(phase = ?auto.phase(), "after auto-reset");

    info!("-- reverse swipe travels right to left");
    let mut reverse = SwipeButton::new(logged_args("reverse").enable_reverse_swipe(true));
    reverse.on_layout_measured(300.0);
    swipe(&mut reverse, 275.0, 30.0);
    now = settle(&mut reverse, now);
    if let Some(thumb) = reverse.render().thumb {
        info!(anchor = ?thumb.anchor, x = thumb.x, "reverse thumb");
    }

    info!("-- forced reset cancels a snap in flight");
    let handle: Arc<Mutex<Option<ResetHandle>>> = Arc::default();
    let sink = Arc::clone(&handle);
    let mut forced =
        SwipeButton::new(logged_args("forced").force_reset(move |h| *sink.lock() = Some(h)));
    forced.on_layout_measured(300.0);
    swipe(&mut forced, 25.0, 250.0);
    forced.tick(now);
    forced.tick(now + 5 * FRAME_NANOS);
    if let Some(handle) = handle.lock().as_ref() {
        handle.reset();
    }
    now = settle(&mut forced, now + 6 * FRAME_NANOS);
    info!(phase = ?forced.phase(), "after forced reset");

    info!("-- screen reader replaces the drag with an activation");
    let service = ScriptedScreenReader::default();
    let mut accessible = SwipeButton::new(logged_args("accessible"));
    accessible.mount(&service);
    accessible.on_layout_measured(300.0);
    service.answer(true);
    swipe(&mut accessible, 25.0, 280.0);
    accessible.handle_accessibility_action(Action::Click);
    info!(locked = accessible.is_locked(), "after activation");

    info!("-- unmount while the screen reader query is pending");
    let mut short_lived = SwipeButton::new(logged_args("short-lived"));
    short_lived.mount(&service);
    short_lived.unmount();
    service.answer(true);
    info!(
        screen_reader = short_lived.screen_reader_enabled(),
        "late reply ignored"
    );
    info!(elapsed_nanos = now, "done");
}
