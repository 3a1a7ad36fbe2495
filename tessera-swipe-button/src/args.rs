//! Configuration for [`swipe_button`](crate::swipe_button).
//!
//! ## Usage
//!
//! Build with [`SwipeButtonArgs::default`] and the generated setters, then
//! attach callbacks with the `on_*` methods.

use std::time::Duration;

use derive_setters::Setters;
use thiserror::Error;

use crate::{
    Color,
    prop::{Callback, CallbackWith, RenderSlot},
    thumb::{ResetHandle, ThumbBehavior},
};

/// Defaults for [`SwipeButtonArgs`].
pub struct SwipeButtonDefaults;

impl SwipeButtonDefaults {
    /// Release progress (percent) at or above which a swipe succeeds.
    pub const SWIPE_SUCCESS_THRESHOLD: f32 = 70.0;
    /// Rail and thumb height.
    pub const HEIGHT: f32 = 50.0;
    /// Padding between rail edge and thumb.
    pub const CONTAINER_PADDING: f32 = 4.0;
    /// Border width shared by rail, fill and thumb.
    pub const BORDER_WIDTH: f32 = 1.0;
    /// Pause before an auto-reset returns the thumb.
    pub const RESET_AFTER_SUCCESS_ANIM_DELAY: Duration = Duration::from_millis(1000);
    /// Length of the auto-reset return animation.
    pub const RESET_AFTER_SUCCESS_ANIM_DURATION: Duration = Duration::from_millis(200);
    /// Title shown in the rail.
    pub const TITLE: &'static str = "Swipe to submit";
    /// Title font size.
    pub const TITLE_FONT_SIZE: f32 = 20.0;
    /// Title margin.
    pub const TITLE_MARGIN: f32 = 4.0;
    /// Test identifier of the container.
    pub const CONTAINER_TEST_ID: &'static str = "SwipeButton.Container";
    /// Test identifier of the thumb.
    pub const THUMB_TEST_ID: &'static str = "SwipeThumb";

    /// Rail background.
    pub const RAIL_BACKGROUND_COLOR: Color = Color::from_hex(0xa0a0a0);
    /// Rail border.
    pub const RAIL_BORDER_COLOR: Color = Color::from_hex(0x7e7e7e);
    /// Fill trailing the thumb.
    pub const RAIL_FILL_BACKGROUND_COLOR: Color = Color::from_hex(0x42a5f5);
    /// Border of the fill.
    pub const RAIL_FILL_BORDER_COLOR: Color = Color::from_hex(0x1e88e5);
    /// Thumb background.
    pub const THUMB_ICON_BACKGROUND_COLOR: Color = Color::from_hex(0xffffff);
    /// Thumb border.
    pub const THUMB_ICON_BORDER_COLOR: Color = Color::from_hex(0x1e88e5);
    /// Rail background while disabled.
    pub const DISABLED_RAIL_BACKGROUND_COLOR: Color = Color::from_hex(0xd6d6d6);
    /// Thumb background while disabled.
    pub const DISABLED_THUMB_ICON_BACKGROUND_COLOR: Color = Color::from_hex(0xcfcfcf);
    /// Thumb border while disabled.
    pub const DISABLED_THUMB_ICON_BORDER_COLOR: Color = Color::from_hex(0xbdbdbd);
    /// Title text color.
    pub const TITLE_COLOR: Color = Color::from_hex(0x1a1a1a);
}

/// Content drawn inside the thumb.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbIcon {
    /// An image resolved by the host, e.g. an asset path.
    Image(String),
    /// Arbitrary content rendered by the host.
    Content(RenderSlot),
}

/// Configuration problems found by [`SwipeButtonArgs::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    /// The threshold is not a percentage.
    #[error("swipe success threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(f32),
    /// A dimension is negative or not finite.
    #[error("{name} must be a finite, non-negative length (got {value})")]
    InvalidDimension {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
}

/// Arguments for [`SwipeButton`](crate::SwipeButton).
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct SwipeButtonArgs {
    /// Fixed rail width. When `None` the rail fills the space layout gives it.
    #[setters(strip_option)]
    pub width: Option<f32>,
    /// Rail height; also the thumb height.
    pub height: f32,
    /// Thumb width. Defaults to `height`.
    #[setters(strip_option)]
    pub thumb_icon_width: Option<f32>,
    /// Padding between the rail edge and the thumb.
    pub container_padding: f32,
    /// Release progress (percent) at or above which a swipe succeeds.
    pub swipe_success_threshold: f32,
    /// Swipe from the trailing edge toward the leading edge.
    pub enable_reverse_swipe: bool,
    /// Ignore taps on a locked thumb.
    pub disable_reset_on_tap: bool,
    /// Return the thumb to the start after a success instead of locking.
    pub should_reset_after_success: bool,
    /// Pause before the auto-reset return.
    pub reset_after_success_anim_delay: Duration,
    /// Length of the auto-reset return.
    pub reset_after_success_anim_duration: Duration,
    /// Ignore all input.
    pub disabled: bool,
    /// Rail background.
    pub rail_background_color: Color,
    /// Rail border.
    pub rail_border_color: Color,
    /// Rail border width.
    pub rail_border_width: f32,
    /// Fill background.
    pub rail_fill_background_color: Color,
    /// Fill border.
    pub rail_fill_border_color: Color,
    /// Fill border width.
    pub rail_fill_border_width: f32,
    /// Thumb background.
    pub thumb_icon_background_color: Color,
    /// Thumb border.
    pub thumb_icon_border_color: Color,
    /// Thumb border width.
    pub thumb_icon_border_width: f32,
    /// Rail background while disabled.
    pub disabled_rail_background_color: Color,
    /// Thumb background while disabled.
    pub disabled_thumb_icon_background_color: Color,
    /// Thumb border while disabled.
    pub disabled_thumb_icon_border_color: Color,
    /// Title shown in the rail.
    #[setters(into)]
    pub title: String,
    /// Title color.
    pub title_color: Color,
    /// Title font size.
    pub title_font_size: f32,
    /// Upper bound on system font scaling for the title.
    #[setters(strip_option)]
    pub title_max_font_scale: Option<f32>,
    /// Title margin.
    pub title_margin: f32,
    /// Test identifier of the container.
    #[setters(into)]
    pub container_test_id: String,
    /// Test identifier of the thumb.
    #[setters(into)]
    pub thumb_test_id: String,
    /// Content before the title.
    #[setters(skip)]
    pub leading: Option<RenderSlot>,
    /// Content after the title.
    #[setters(skip)]
    pub trailing: Option<RenderSlot>,
    /// Content inside the thumb.
    #[setters(skip)]
    pub thumb_icon: Option<ThumbIcon>,
    /// Invoked when a drag attempt begins.
    #[setters(skip)]
    pub on_swipe_start: Option<Callback>,
    /// Invoked once the thumb has snapped to the end of the rail.
    #[setters(skip)]
    pub on_swipe_success: Option<Callback>,
    /// Invoked once the thumb has snapped back to the start.
    #[setters(skip)]
    pub on_swipe_fail: Option<Callback>,
    /// Receives the reset capability when the thumb mounts.
    #[setters(skip)]
    pub force_reset: Option<CallbackWith<ResetHandle>>,
}

impl SwipeButtonArgs {
    /// Sets the swipe-start handler.
    pub fn on_swipe_start<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_swipe_start = Some(Callback::new(f));
        self
    }

    /// Sets the swipe-start handler using a shared callback.
    pub fn on_swipe_start_shared(mut self, f: impl Into<Callback>) -> Self {
        self.on_swipe_start = Some(f.into());
        self
    }

    /// Sets the swipe-success handler.
    pub fn on_swipe_success<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_swipe_success = Some(Callback::new(f));
        self
    }

    /// Sets the swipe-success handler using a shared callback.
    pub fn on_swipe_success_shared(mut self, f: impl Into<Callback>) -> Self {
        self.on_swipe_success = Some(f.into());
        self
    }

    /// Sets the swipe-fail handler.
    pub fn on_swipe_fail<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_swipe_fail = Some(Callback::new(f));
        self
    }

    /// Sets the swipe-fail handler using a shared callback.
    pub fn on_swipe_fail_shared(mut self, f: impl Into<Callback>) -> Self {
        self.on_swipe_fail = Some(f.into());
        self
    }

    /// Sets the receiver of the reset capability.
    pub fn force_reset<F>(mut self, f: F) -> Self
    where
        F: Fn(ResetHandle) + Send + Sync + 'static,
    {
        self.force_reset = Some(CallbackWith::new(f));
        self
    }

    /// Sets the content before the title.
    pub fn leading<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.leading = Some(RenderSlot::new(f));
        self
    }

    /// Sets the content after the title.
    pub fn trailing<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.trailing = Some(RenderSlot::new(f));
        self
    }

    /// Uses an image as thumb content.
    pub fn thumb_icon_image(mut self, source: impl Into<String>) -> Self {
        self.thumb_icon = Some(ThumbIcon::Image(source.into()));
        self
    }

    /// Uses custom content inside the thumb.
    pub fn thumb_icon_content<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.thumb_icon = Some(ThumbIcon::Content(RenderSlot::new(f)));
        self
    }

    /// Effective thumb width.
    pub fn thumb_width(&self) -> f32 {
        self.thumb_icon_width.unwrap_or(self.height)
    }

    /// Reports the first configuration problem, if any.
    pub fn validate(&self) -> Result<(), ArgsError> {
        let threshold = self.swipe_success_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ArgsError::ThresholdOutOfRange(threshold));
        }
        let dimensions = [
            ("height", Some(self.height)),
            ("container_padding", Some(self.container_padding)),
            ("width", self.width),
            ("thumb_icon_width", self.thumb_icon_width),
        ];
        for (name, value) in dimensions {
            if let Some(value) = value
                && !is_length(value)
            {
                return Err(ArgsError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// Returns a copy with every invalid value replaced by a usable one.
    ///
    /// Out-of-range thresholds are clamped; a NaN threshold and broken
    /// lengths fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let mut args = self.clone();
        args.swipe_success_threshold = if self.swipe_success_threshold.is_nan() {
            SwipeButtonDefaults::SWIPE_SUCCESS_THRESHOLD
        } else {
            self.swipe_success_threshold.clamp(0.0, 100.0)
        };
        if !is_length(args.height) {
            args.height = SwipeButtonDefaults::HEIGHT;
        }
        if !is_length(args.container_padding) {
            args.container_padding = SwipeButtonDefaults::CONTAINER_PADDING;
        }
        args.width = args.width.filter(|w| is_length(*w));
        args.thumb_icon_width = args.thumb_icon_width.filter(|w| is_length(*w));
        args
    }

    pub(crate) fn behavior(&self, screen_reader_enabled: bool) -> ThumbBehavior {
        ThumbBehavior {
            swipe_success_threshold: self.swipe_success_threshold,
            enable_reverse_swipe: self.enable_reverse_swipe,
            disable_reset_on_tap: self.disable_reset_on_tap,
            should_reset_after_success: self.should_reset_after_success,
            reset_after_success_anim_delay: self.reset_after_success_anim_delay,
            reset_after_success_anim_duration: self.reset_after_success_anim_duration,
            disabled: self.disabled,
            screen_reader_enabled,
        }
    }
}

fn is_length(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

impl Default for SwipeButtonArgs {
    fn default() -> Self {
        Self {
            width: None,
            height: SwipeButtonDefaults::HEIGHT,
            thumb_icon_width: None,
            container_padding: SwipeButtonDefaults::CONTAINER_PADDING,
            swipe_success_threshold: SwipeButtonDefaults::SWIPE_SUCCESS_THRESHOLD,
            enable_reverse_swipe: false,
            disable_reset_on_tap: false,
            should_reset_after_success: false,
            reset_after_success_anim_delay: SwipeButtonDefaults::RESET_AFTER_SUCCESS_ANIM_DELAY,
            reset_after_success_anim_duration: SwipeButtonDefaults::RESET_AFTER_SUCCESS_ANIM_DURATION,
            disabled: false,
            rail_background_color: SwipeButtonDefaults::RAIL_BACKGROUND_COLOR,
            rail_border_color: SwipeButtonDefaults::RAIL_BORDER_COLOR,
            rail_border_width: SwipeButtonDefaults::BORDER_WIDTH,
            rail_fill_background_color: SwipeButtonDefaults::RAIL_FILL_BACKGROUND_COLOR,
            rail_fill_border_color: SwipeButtonDefaults::RAIL_FILL_BORDER_COLOR,
            rail_fill_border_width: SwipeButtonDefaults::BORDER_WIDTH,
            thumb_icon_background_color: SwipeButtonDefaults::THUMB_ICON_BACKGROUND_COLOR,
            thumb_icon_border_color: SwipeButtonDefaults::THUMB_ICON_BORDER_COLOR,
            thumb_icon_border_width: SwipeButtonDefaults::BORDER_WIDTH,
            disabled_rail_background_color: SwipeButtonDefaults::DISABLED_RAIL_BACKGROUND_COLOR,
            disabled_thumb_icon_background_color:
                SwipeButtonDefaults::DISABLED_THUMB_ICON_BACKGROUND_COLOR,
            disabled_thumb_icon_border_color: SwipeButtonDefaults::DISABLED_THUMB_ICON_BORDER_COLOR,
            title: SwipeButtonDefaults::TITLE.to_string(),
            title_color: SwipeButtonDefaults::TITLE_COLOR,
            title_font_size: SwipeButtonDefaults::TITLE_FONT_SIZE,
            title_max_font_scale: None,
            title_margin: SwipeButtonDefaults::TITLE_MARGIN,
            container_test_id: SwipeButtonDefaults::CONTAINER_TEST_ID.to_string(),
            thumb_test_id: SwipeButtonDefaults::THUMB_TEST_ID.to_string(),
            leading: None,
            trailing: None,
            thumb_icon: None,
            on_swipe_start: None,
            on_swipe_success: None,
            on_swipe_fail: None,
            force_reset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let args = SwipeButtonArgs::default();
        assert_eq!(args.validate(), Ok(()));
        assert_eq!(args.thumb_width(), 50.0);
        assert_eq!(args.swipe_success_threshold, 70.0);
    }

    #[test]
    fn setters_chain() {
        let args = SwipeButtonArgs::default()
            .width(300.0)
            .thumb_icon_width(40.0)
            .title("Slide")
            .enable_reverse_swipe(true);
        assert_eq!(args.width, Some(300.0));
        assert_eq!(args.thumb_width(), 40.0);
        assert_eq!(args.title, "Slide");
        assert!(args.enable_reverse_swipe);
    }

    #[test]
    fn shared_callbacks_keep_identity() {
        let shared = Callback::new(|| {});
        let args = SwipeButtonArgs::default()
            .on_swipe_start_shared(shared.clone())
            .on_swipe_success_shared(shared.clone())
            .on_swipe_fail_shared(shared.clone());
        assert_eq!(args.on_swipe_start, Some(shared.clone()));
        assert_eq!(args.on_swipe_success, Some(shared.clone()));
        assert_eq!(args.on_swipe_fail, Some(shared));
    }

    #[test]
    fn out_of_range_threshold_is_reported_and_clamped() {
        let args = SwipeButtonArgs::default().swipe_success_threshold(140.0);
        assert_eq!(args.validate(), Err(ArgsError::ThresholdOutOfRange(140.0)));
        assert_eq!(args.sanitized().swipe_success_threshold, 100.0);

        let args = SwipeButtonArgs::default().swipe_success_threshold(f32::NAN);
        assert!(args.validate().is_err());
        assert_eq!(args.sanitized().swipe_success_threshold, 70.0);
    }

    #[test]
    fn broken_lengths_fall_back() {
        let args = SwipeButtonArgs::default()
            .container_padding(-3.0)
            .thumb_icon_width(f32::INFINITY);
        assert_eq!(
            args.validate(),
            Err(ArgsError::InvalidDimension {
                name: "container_padding",
                value: -3.0,
            })
        );
        let fixed = args.sanitized();
        assert_eq!(fixed.container_padding, 4.0);
        assert_eq!(fixed.thumb_icon_width, None);
        assert_eq!(fixed.validate(), Ok(()));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = ArgsError::InvalidDimension {
            name: "height",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "height must be a finite, non-negative length (got -1)"
        );
    }
}
