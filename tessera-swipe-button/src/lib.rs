//! Swipe-to-confirm control for Tessera UI.
//!
//! A thumb travels along a rail; releasing it past a threshold commits the
//! action, releasing it short of the threshold snaps it back.
//!
//! # Usage
//!
//! The host owns a [`SwipeButton`], feeds it layout, pointer, accessibility
//! and frame events, and draws the [`SwipeButtonView`] it returns.
//!
//! ```
//! use tessera_swipe_button::{PointerEvent, SwipeButton, SwipeButtonArgs};
//!
//! let mut button = SwipeButton::new(
//!     SwipeButtonArgs::default()
//!         .title("Slide to pay")
//!         .on_swipe_success(|| println!("paid")),
//! );
//! button.on_layout_measured(300.0);
//!
//! button.handle_pointer(PointerEvent::Pressed(0.0));
//! button.handle_pointer(PointerEvent::Moved(240.0));
//! button.handle_pointer(PointerEvent::Released(240.0));
//!
//! // Drive frames until the snap animation settles.
//! let mut now = 0;
//! while button.is_animating() {
//!     button.tick(now);
//!     now += 16_000_000;
//! }
//! assert!(button.is_locked());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod animation;

pub mod accessibility;
pub mod args;
pub mod color;
pub mod geometry;
pub mod prop;
pub mod state;
pub mod swipe_button;
pub mod thumb;
pub mod view;

pub use accessibility::{ScreenReaderMonitor, ScreenReaderService, Subscription};
pub use args::{ArgsError, SwipeButtonArgs, SwipeButtonDefaults, ThumbIcon};
pub use color::Color;
pub use geometry::RailGeometry;
pub use prop::{Callback, CallbackWith, RenderSlot};
pub use state::State;
pub use swipe_button::SwipeButton;
pub use thumb::{
    PointerEvent, ResetHandle, SwipeDirection, SwipeEvent, SwipeEvents, SwipeThumb,
    ThumbBehavior, ThumbController, ThumbDefaults, ThumbPhase,
};
pub use view::{SwipeButtonView, ThumbAnchor, ThumbSemantics, ThumbView, TitleView};
