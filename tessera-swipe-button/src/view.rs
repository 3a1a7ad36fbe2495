//! Render descriptions produced by [`SwipeButton::render`].
//!
//! ## Usage
//!
//! The host renderer reads these structs each frame and draws boxes, text
//! and decorations accordingly. Positions are relative to the rail's inner
//! box (inside `padding`).
//!
//! [`SwipeButton::render`]: crate::SwipeButton::render

use accesskit::{Action, Role};
use smallvec::SmallVec;

use crate::{Color, RenderSlot, ThumbIcon, ThumbPhase};

/// Side of the rail the thumb starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbAnchor {
    /// Leading edge (left in left-to-right layouts).
    Start,
    /// Trailing edge; used for reverse swipes.
    End,
}

/// Accessibility metadata for the thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbSemantics {
    /// Always [`Role::Button`].
    pub role: Role,
    /// Spoken label, taken from the title.
    pub label: String,
    /// Exposed as disabled to assistive technology.
    pub disabled: bool,
    /// Actions the host should advertise.
    pub actions: SmallVec<[Action; 1]>,
}

impl ThumbSemantics {
    pub(crate) fn new(label: String, disabled: bool, activation_offered: bool) -> Self {
        let mut actions = SmallVec::new();
        if activation_offered {
            actions.push(Action::Click);
        }
        Self {
            role: Role::Button,
            label,
            disabled,
            actions,
        }
    }
}

/// The thumb and the fill trailing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbView {
    /// Test identifier.
    pub test_id: String,
    /// Start side of the travel.
    pub anchor: ThumbAnchor,
    /// Current phase, for hosts that style by state.
    pub phase: ThumbPhase,
    /// Distance travelled from the anchor.
    pub offset: f32,
    /// Offset as a percentage of the travel range.
    pub progress: f32,
    /// Left edge of the thumb.
    pub x: f32,
    /// Thumb width.
    pub width: f32,
    /// Thumb height.
    pub height: f32,
    /// Thumb background.
    pub background_color: Color,
    /// Thumb border.
    pub border_color: Color,
    /// Thumb border width.
    pub border_width: f32,
    /// Thumb content.
    pub icon: Option<ThumbIcon>,
    /// Left edge of the fill.
    pub fill_x: f32,
    /// Fill width; always covers the thumb.
    pub fill_width: f32,
    /// Fill background.
    pub fill_background_color: Color,
    /// Fill border.
    pub fill_border_color: Color,
    /// Fill border width.
    pub fill_border_width: f32,
    /// Whether the host should route drags to the thumb.
    pub draggable: bool,
    /// Accessibility metadata.
    pub semantics: ThumbSemantics,
}

/// The title text in the middle of the rail.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleView {
    /// Text content, rendered on one line with tail ellipsis.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size.
    pub font_size: f32,
    /// Upper bound on system font scaling.
    pub max_font_scale: Option<f32>,
    /// Margin around the text.
    pub margin: f32,
    /// Hide from assistive technology; the thumb already carries the label.
    pub hidden_from_accessibility: bool,
}

/// Everything the host needs to draw one swipe button.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeButtonView {
    /// Test identifier of the container.
    pub test_id: String,
    /// Fixed width, or `None` to fill the available space.
    pub width: Option<f32>,
    /// Rail height.
    pub height: f32,
    /// Padding between rail edge and thumb.
    pub padding: f32,
    /// Rail background.
    pub background_color: Color,
    /// Rail border.
    pub border_color: Color,
    /// Rail border width.
    pub border_width: f32,
    /// Title.
    pub title: TitleView,
    /// Content before the title.
    pub leading: Option<RenderSlot>,
    /// Content after the title.
    pub trailing: Option<RenderSlot>,
    /// Present once the rail has been measured.
    pub thumb: Option<ThumbView>,
}
