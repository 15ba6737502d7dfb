//! Reorder list configuration

use reorder_animation::SpringConfig;
use reorder_core::Axis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Platform
// ============================================================================

/// Scroll platform the engine is running on
///
/// Autoscroll step sizes are scaled per platform because native scroll
/// views interpret "scroll to offset" requests at very different rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollPlatform {
    Ios,
    Android,
    #[default]
    Other,
}

impl ScrollPlatform {
    /// The platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            ScrollPlatform::Android
        } else if cfg!(target_os = "ios") {
            ScrollPlatform::Ios
        } else {
            ScrollPlatform::Other
        }
    }

    /// Multiplier applied to `autoscroll_speed`
    pub fn speed_factor(&self) -> f32 {
        match self {
            ScrollPlatform::Android => 0.1,
            ScrollPlatform::Ios | ScrollPlatform::Other => 1.0,
        }
    }
}

// ============================================================================
// Reorder Configuration
// ============================================================================

/// Configuration for a reorderable list
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderConfig {
    /// Distance from an edge (px) at which autoscroll engages
    pub autoscroll_threshold: f32,
    /// Autoscroll step (px) at the very edge, before the platform factor
    pub autoscroll_speed: f32,
    /// Spring used for cell shifts and the release settle
    pub animation: SpringConfig,
    /// Pointer travel (px) before the pan recognizer activates
    pub activation_distance: f32,
    /// Let the hover element leave the container bounds
    pub drag_item_overflow: bool,
    /// Extra touch area (px) around the drag handle
    pub drag_hit_slop: f32,
    /// Whether the list may scroll while no drag is in progress
    pub scroll_enabled: bool,
    /// Lay the list out horizontally
    pub horizontal: bool,
    /// Emit verbose measurement and spacer logs
    pub debug: bool,
    /// Slack (px) when deciding that a scroll request arrived or an edge is pinned
    pub scroll_position_tolerance: f32,
    /// Seconds before an unanswered autoscroll request is abandoned
    pub autoscroll_timeout: f32,
    /// Platform used to scale autoscroll speed
    pub platform: ScrollPlatform,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            autoscroll_threshold: 30.0,
            autoscroll_speed: 100.0,
            animation: SpringConfig::default(),
            activation_distance: 0.0,
            drag_item_overflow: false,
            drag_hit_slop: 0.0,
            scroll_enabled: true,
            horizontal: false,
            debug: false,
            scroll_position_tolerance: 2.0,
            autoscroll_timeout: 0.5,
            platform: ScrollPlatform::current(),
        }
    }
}

impl ReorderConfig {
    /// Horizontal list with default behavior
    pub fn horizontal() -> Self {
        Self {
            horizontal: true,
            ..Default::default()
        }
    }

    /// Snappier shift and settle animation
    pub fn snappy() -> Self {
        Self {
            animation: SpringConfig::snappy(),
            ..Default::default()
        }
    }

    /// Axis the list scrolls and drags along
    pub fn axis(&self) -> Axis {
        if self.horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Effective autoscroll step at the very edge
    pub fn effective_autoscroll_speed(&self) -> f32 {
        self.autoscroll_speed * self.platform.speed_factor()
    }

    pub fn with_autoscroll_threshold(mut self, threshold: f32) -> Self {
        self.autoscroll_threshold = threshold;
        self
    }

    pub fn with_autoscroll_speed(mut self, speed: f32) -> Self {
        self.autoscroll_speed = speed;
        self
    }

    pub fn with_animation(mut self, animation: SpringConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_activation_distance(mut self, distance: f32) -> Self {
        self.activation_distance = distance;
        self
    }

    pub fn with_drag_item_overflow(mut self, overflow: bool) -> Self {
        self.drag_item_overflow = overflow;
        self
    }

    pub fn with_drag_hit_slop(mut self, slop: f32) -> Self {
        self.drag_hit_slop = slop;
        self
    }

    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_scroll_position_tolerance(mut self, tolerance: f32) -> Self {
        self.scroll_position_tolerance = tolerance;
        self
    }

    pub fn with_autoscroll_timeout(mut self, seconds: f32) -> Self {
        self.autoscroll_timeout = seconds;
        self
    }

    pub fn with_platform(mut self, platform: ScrollPlatform) -> Self {
        self.platform = platform;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReorderConfig::default();
        assert_eq!(config.autoscroll_threshold, 30.0);
        assert_eq!(config.autoscroll_speed, 100.0);
        assert_eq!(config.activation_distance, 0.0);
        assert!(!config.drag_item_overflow);
        assert!(config.scroll_enabled);
        assert!(!config.horizontal);
        assert!(!config.debug);
        assert_eq!(config.animation, SpringConfig::default());
        assert_eq!(config.axis(), Axis::Vertical);
    }

    #[test]
    fn test_platform_speed_factor() {
        let android = ReorderConfig::default().with_platform(ScrollPlatform::Android);
        let ios = ReorderConfig::default().with_platform(ScrollPlatform::Ios);
        assert!((android.effective_autoscroll_speed() - 10.0).abs() < 1e-4);
        assert_eq!(ios.effective_autoscroll_speed(), 100.0);
    }

    #[test]
    fn test_partial_animation_override() {
        let config =
            ReorderConfig::default().with_animation(SpringConfig::default().with_damping(35.0));
        assert_eq!(config.animation.damping, 35.0);
        assert_eq!(config.animation.stiffness, SpringConfig::default().stiffness);
    }

    #[test]
    fn test_horizontal_preset() {
        assert_eq!(ReorderConfig::horizontal().axis(), Axis::Horizontal);
    }
}
