//! Player panel interaction: tap/drag recognition, dismiss thresholds, the
//! spring that returns a cancelled drag, and the seek-slider edit state.
//!
//! # Gesture flow
//!
//! ```text
//! pressed ──► pointer_moved* ──► released
//!   │              │                 │ never left the tap slop ─► ToggleExpanded
//!   │              │                 │ expanded, past 1/4 height ─► Dismiss
//!   │              │                 └ expanded, short drag      ─► spring back to 0
//!   │              └ expanded: offset = min(translation, height / 2)
//!   └ starts at the last known pointer y, or the first move after it
//! ```
//!
//! Nothing here touches `MediaPlayerState`; the update loop applies the
//! returned [`PanelAction`].

use crate::player::PlaybackStatus;

use super::state::MediaPlayerState;

/// Movement below this many pixels still counts as a tap.
pub const TAP_SLOP: f32 = 8.0;

/// Spring settle time for a cancelled drag, in seconds.
const SPRING_RESPONSE: f32 = 0.4;

/// Spring damping fraction for a cancelled drag.
const SPRING_DAMPING: f32 = 0.6;

/// How the panel is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Hidden,
    Collapsed,
    Expanded,
    /// Expanded with a drag gesture in progress
    Dragging,
}

/// What the update loop should do after a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    ToggleExpanded,
    Dismiss,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    /// Unknown until the pointer reports a position over the current area
    start_y: Option<f32>,
    translation: f32,
    /// Left the tap slop at some point
    moved: bool,
}

/// Damped spring on one axis.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
}

impl Spring {
    /// Spring from `from` to `to`, parameterised by response (seconds) and
    /// damping fraction.
    pub fn new(from: f32, to: f32, response: f32, damping_fraction: f32) -> Self {
        let omega = std::f32::consts::TAU / response.max(0.01);
        Self {
            value: from,
            velocity: 0.0,
            target: to,
            stiffness: omega * omega,
            damping: 2.0 * damping_fraction * omega,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance by `dt` seconds. Returns true once settled on the target.
    pub fn step(&mut self, dt: f32) -> bool {
        const MAX_STEP: f32 = 1.0 / 240.0;

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let accel =
                -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        let settled = (self.value - self.target).abs() < 0.5 && self.velocity.abs() < 5.0;
        if settled {
            self.value = self.target;
            self.velocity = 0.0;
        }
        settled
    }
}

/// Local interaction state of the player panel.
#[derive(Debug, Clone, Default)]
pub struct PlayerPanel {
    gesture: Option<Gesture>,
    /// Vertical offset of the expanded sheet, in pixels
    drag_offset: f32,
    spring: Option<Spring>,
    /// Last pointer y over the panel, relative to the area that reported it.
    /// Cleared whenever the panel swaps between bar and sheet.
    pointer_y: Option<f32>,
    container_height: f32,
    /// Slider value while the user is seeking
    seek_edit: Option<f64>,
}

impl PlayerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self, media: &MediaPlayerState) -> PanelMode {
        if !media.is_shown() {
            PanelMode::Hidden
        } else if !media.is_expanded() {
            PanelMode::Collapsed
        } else if self.gesture.is_some_and(|g| g.moved) {
            PanelMode::Dragging
        } else {
            PanelMode::Expanded
        }
    }

    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }

    /// Track the pointer. Updates the drag offset while an expanded drag is
    /// in progress.
    pub fn pointer_moved(&mut self, y: f32, container_height: f32, expanded: bool) {
        self.pointer_y = Some(y);
        self.container_height = container_height;

        let Some(ref mut gesture) = self.gesture else {
            return;
        };
        let start_y = *gesture.start_y.get_or_insert(y);
        gesture.translation = y - start_y;
        if gesture.translation.abs() > TAP_SLOP {
            gesture.moved = true;
        }

        if expanded && gesture.moved {
            self.spring = None;
            self.drag_offset = gesture.translation.min(container_height / 2.0);
        }
    }

    /// Begin a gesture at the last known pointer position.
    pub fn pressed(&mut self) {
        self.gesture = Some(Gesture {
            start_y: self.pointer_y,
            translation: 0.0,
            moved: false,
        });
    }

    /// End the gesture and decide what it meant.
    pub fn released(&mut self, expanded: bool) -> PanelAction {
        let Some(gesture) = self.gesture.take() else {
            return PanelAction::None;
        };

        if !gesture.moved {
            self.reset_offset();
            return PanelAction::ToggleExpanded;
        }

        if !expanded {
            return PanelAction::None;
        }

        if gesture.translation > self.container_height / 4.0 {
            self.spring = None;
            self.pointer_y = None;
            self.drag_offset = self.container_height;
            PanelAction::Dismiss
        } else {
            self.spring_back();
            PanelAction::None
        }
    }

    /// Abandon the gesture (pointer left the panel). A drag springs back.
    pub fn cancel(&mut self) {
        self.pointer_y = None;
        if self.gesture.take().is_some_and(|g| g.moved) && self.drag_offset != 0.0 {
            self.spring_back();
        }
    }

    /// Put the sheet back at rest with no animation.
    pub fn reset_offset(&mut self) {
        self.spring = None;
        self.pointer_y = None;
        self.drag_offset = 0.0;
    }

    fn spring_back(&mut self) {
        self.spring = Some(Spring::new(
            self.drag_offset,
            0.0,
            SPRING_RESPONSE,
            SPRING_DAMPING,
        ));
    }

    /// Advance the spring by `dt` seconds.
    pub fn animate(&mut self, dt: f32) {
        let Some(ref mut spring) = self.spring else {
            return;
        };
        let settled = spring.step(dt);
        self.drag_offset = spring.value();
        if settled {
            self.spring = None;
        }
    }

    /// Record a slider change. Returns true on the first change of an edit,
    /// when playback should pause.
    pub fn seek_changed(&mut self, value: f64) -> bool {
        self.seek_edit.replace(value).is_none()
    }

    /// Finish the slider edit, returning the value to seek to.
    pub fn seek_released(&mut self) -> Option<f64> {
        self.seek_edit.take()
    }

    pub fn is_seeking(&self) -> bool {
        self.seek_edit.is_some()
    }

    pub fn clear_seek(&mut self) {
        self.seek_edit = None;
    }

    /// Time the slider and elapsed label should show.
    pub fn display_time(&self, status: &PlaybackStatus) -> f64 {
        self.seek_edit.unwrap_or(status.current_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_song;
    use proptest::prelude::*;

    fn expanded_media() -> MediaPlayerState {
        let mut media = MediaPlayerState::new();
        media.select_song(mock_song("a"));
        media.set_expanded(true);
        media
    }

    /// Press at `from`, move to `to` in the given container.
    fn drag(panel: &mut PlayerPanel, from: f32, to: f32, height: f32, expanded: bool) {
        panel.pointer_moved(from, height, expanded);
        panel.pressed();
        panel.pointer_moved(to, height, expanded);
    }

    #[test]
    fn test_mode_follows_media_state() {
        let panel = PlayerPanel::new();
        let mut media = MediaPlayerState::new();
        assert_eq!(panel.mode(&media), PanelMode::Hidden);
        media.select_song(mock_song("a"));
        assert_eq!(panel.mode(&media), PanelMode::Collapsed);
        media.set_expanded(true);
        assert_eq!(panel.mode(&media), PanelMode::Expanded);
    }

    #[test]
    fn test_drag_enters_dragging_mode() {
        let media = expanded_media();
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 100.0, 150.0, 800.0, true);
        assert_eq!(panel.mode(&media), PanelMode::Dragging);
        assert_eq!(panel.drag_offset(), 50.0);
    }

    #[test]
    fn test_tap_toggles_and_resets_offset() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 100.0, 104.0, 800.0, false);
        assert_eq!(panel.released(false), PanelAction::ToggleExpanded);
        assert_eq!(panel.drag_offset(), 0.0);
    }

    #[test]
    fn test_press_before_any_move_starts_at_first_move() {
        let mut panel = PlayerPanel::new();
        panel.pressed();
        panel.pointer_moved(670.0, 800.0, true);
        panel.pointer_moved(672.0, 800.0, true);
        assert_eq!(panel.drag_offset(), 0.0);
        assert_eq!(panel.released(true), PanelAction::ToggleExpanded);
    }

    #[test]
    fn test_toggle_forgets_pointer_position() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 30.0, 30.0, 800.0, false);
        assert_eq!(panel.released(false), PanelAction::ToggleExpanded);

        // The sheet reports positions in its own coordinates
        panel.pressed();
        panel.pointer_moved(671.0, 800.0, true);
        assert_eq!(panel.drag_offset(), 0.0);
        assert_eq!(panel.released(true), PanelAction::ToggleExpanded);
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let mut panel = PlayerPanel::new();
        assert_eq!(panel.released(true), PanelAction::None);
    }

    #[test]
    fn test_offset_capped_at_half_height() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 0.0, 10000.0, 800.0, true);
        assert_eq!(panel.drag_offset(), 400.0);
    }

    #[test]
    fn test_long_drag_dismisses() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 0.0, 300.0, 800.0, true);
        assert_eq!(panel.released(true), PanelAction::Dismiss);
        assert_eq!(panel.drag_offset(), 800.0);
        assert!(!panel.is_animating());
    }

    #[test]
    fn test_short_drag_springs_back() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 0.0, 150.0, 800.0, true);
        assert_eq!(panel.released(true), PanelAction::None);
        assert!(panel.is_animating());

        for _ in 0..120 {
            panel.animate(1.0 / 60.0);
        }
        assert!(!panel.is_animating());
        assert_eq!(panel.drag_offset(), 0.0);
    }

    #[test]
    fn test_drag_on_collapsed_bar_ignored() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 0.0, 400.0, 800.0, false);
        assert_eq!(panel.drag_offset(), 0.0);
        assert_eq!(panel.released(false), PanelAction::None);
    }

    #[test]
    fn test_cancel_springs_back() {
        let mut panel = PlayerPanel::new();
        drag(&mut panel, 0.0, 100.0, 800.0, true);
        panel.cancel();
        assert!(panel.is_animating());
        assert_eq!(panel.released(true), PanelAction::None);
    }

    #[test]
    fn test_spring_overshoots_then_settles() {
        let mut spring = Spring::new(100.0, 0.0, SPRING_RESPONSE, SPRING_DAMPING);
        let mut min_seen = f32::MAX;
        let mut settled = false;
        for _ in 0..120 {
            settled = spring.step(1.0 / 60.0);
            min_seen = min_seen.min(spring.value());
            if settled {
                break;
            }
        }
        assert!(settled);
        assert!(min_seen < 0.0, "underdamped spring should overshoot");
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_seek_edit_flow() {
        let mut panel = PlayerPanel::new();
        let status = PlaybackStatus {
            is_playing: true,
            current_time: 10.0,
            duration: 100.0,
        };
        assert_eq!(panel.display_time(&status), 10.0);

        assert!(panel.seek_changed(40.0));
        assert!(!panel.seek_changed(42.0));
        assert!(panel.is_seeking());
        assert_eq!(panel.display_time(&status), 42.0);

        assert_eq!(panel.seek_released(), Some(42.0));
        assert!(!panel.is_seeking());
        assert_eq!(panel.seek_released(), None);
    }

    proptest! {
        /// The offset never exceeds half the container while dragging
        #[test]
        fn offset_never_exceeds_half(
            height in 100.0f32..2000.0,
            moves in prop::collection::vec(-3000.0f32..3000.0, 1..20),
        ) {
            let mut panel = PlayerPanel::new();
            panel.pointer_moved(0.0, height, true);
            panel.pressed();
            for y in moves {
                panel.pointer_moved(y, height, true);
                prop_assert!(panel.drag_offset() <= height / 2.0);
            }
        }

        /// Release past a quarter of the height dismisses, otherwise not
        #[test]
        fn dismiss_threshold(height in 100.0f32..2000.0, fraction in 0.0f32..1.0) {
            let translation = height * fraction;
            prop_assume!(translation > TAP_SLOP);
            prop_assume!((translation - height / 4.0).abs() > 0.01);

            let mut panel = PlayerPanel::new();
            drag(&mut panel, 0.0, translation, height, true);
            let action = panel.released(true);
            if translation > height / 4.0 {
                prop_assert_eq!(action, PanelAction::Dismiss);
                prop_assert_eq!(panel.drag_offset(), height);
            } else {
                prop_assert_eq!(action, PanelAction::None);
                prop_assert!(panel.is_animating());
            }
        }
    }
}
