use serde::{Deserialize, Serialize};

pub const CONFIG_STORAGE_KEY: &str = "bl_lab_config";

/// How a sticky box follows the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StickyTracking {
    /// Keep the offset captured at the press, like an ordinary drag.
    Offset,
    /// Snap the box's top-left corner onto the pointer.
    TopLeft,
    /// Keep the box centered under the pointer.
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    Independent,
    PreserveAspect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub min_size: f64,
    pub max_size: f64,
    /// Two presses closer together than this (ms) toggle sticky mode.
    pub double_activation_ms: f64,
    /// A press this close (px) to a sticky box's center releases it.
    pub center_tolerance: f64,
    pub sticky_tracking: StickyTracking,
    pub scale_mode: ScaleMode,
    pub wheel_resize: bool,
    pub two_finger_scale: bool,
    pub wheel_grow: f64,
    pub wheel_shrink: f64,
    /// Side of the square resize handle in the box's bottom-right corner.
    pub handle_size: f64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            min_size: 20.0,
            max_size: 300.0,
            double_activation_ms: 300.0,
            center_tolerance: 5.0,
            sticky_tracking: StickyTracking::TopLeft,
            scale_mode: ScaleMode::Independent,
            wheel_resize: true,
            two_finger_scale: true,
            wheel_grow: 1.1,
            wheel_shrink: 0.9,
            handle_size: 12.0,
        }
    }
}

impl LabConfig {
    /// Parse a stored config; anything unreadable or inconsistent falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<LabConfig>(raw) {
            Ok(cfg) if cfg.is_sane() => cfg,
            _ => Self::default(),
        }
    }

    fn is_sane(&self) -> bool {
        self.min_size > 0.0
            && self.max_size >= self.min_size
            && self.double_activation_ms >= 0.0
            && self.center_tolerance >= 0.0
            && self.wheel_grow > 0.0
            && self.wheel_shrink > 0.0
            && self.handle_size >= 0.0
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(CONFIG_STORAGE_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(CONFIG_STORAGE_KEY, &s);
                }
            }
        }
    }
}
