//! Active input device tracking
//!
//! Raw per-device events come in; one device class is active at a time and
//! subscribers hear about each change exactly once.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Class of input device currently driving the pawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputDeviceKind {
    /// No input seen yet
    #[default]
    Unknown,
    /// Keyboard and mouse
    KeyboardMouse,
    /// Gamepad / controller
    Gamepad,
    /// Touch screen
    Touch,
}

impl fmt::Display for InputDeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputDeviceKind::Unknown => "Unknown",
            InputDeviceKind::KeyboardMouse => "Key/Mouse",
            InputDeviceKind::Gamepad => "Gamepad",
            InputDeviceKind::Touch => "Touch",
        };
        f.write_str(name)
    }
}

/// Category metadata attached to a key by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCategory {
    Keyboard,
    Mouse,
    Gamepad,
    Touch,
}

/// A key press as reported by the input layer, tagged with its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputKey {
    pub category: KeyCategory,
    /// Device-specific key code (zero when the input layer reports none)
    pub code: u32,
}

impl InputKey {
    pub fn new(category: KeyCategory, code: u32) -> Self {
        Self { category, code }
    }

    pub fn is_gamepad_key(&self) -> bool {
        self.category == KeyCategory::Gamepad
    }

    pub fn is_touch(&self) -> bool {
        self.category == KeyCategory::Touch
    }
}

type DeviceSwitchListener = Box<dyn FnMut(InputDeviceKind)>;

/// Tracks which input device is active
pub struct InputClassifier {
    active: InputDeviceKind,
    listeners: Vec<DeviceSwitchListener>,
}

impl fmt::Debug for InputClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputClassifier")
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for InputClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl InputClassifier {
    /// Create a classifier with no active device
    pub fn new() -> Self {
        Self {
            active: InputDeviceKind::Unknown,
            listeners: Vec::new(),
        }
    }

    /// Currently active device
    pub fn active(&self) -> InputDeviceKind {
        self.active
    }

    /// Register a callback fired once per device change
    pub fn subscribe(&mut self, listener: impl FnMut(InputDeviceKind) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Any key event; switches to gamepad when the key is a gamepad key
    pub fn on_gamepad_key(&mut self, key: InputKey) {
        if key.is_gamepad_key() {
            self.set_active(InputDeviceKind::Gamepad);
        }
    }

    /// Any touch event; switches to touch when the key is a touch key
    pub fn on_touch_key(&mut self, key: InputKey) {
        if key.is_touch() {
            self.set_active(InputDeviceKind::Touch);
        }
    }

    /// One-dimensional mouse motion sample
    pub fn on_mouse_axis_move(&mut self, delta: f32) {
        if delta != 0.0 {
            self.set_active(InputDeviceKind::KeyboardMouse);
        }
    }

    /// Make `kind` active. Returns true when this changed the active device.
    pub fn set_active(&mut self, kind: InputDeviceKind) -> bool {
        if self.active == kind {
            return false;
        }

        debug!("Input device switched: {} -> {}", self.active, kind);
        self.active = kind;
        for listener in &mut self.listeners {
            listener(kind);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording_classifier() -> (InputClassifier, Rc<RefCell<Vec<InputDeviceKind>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut classifier = InputClassifier::new();
        let sink = Rc::clone(&seen);
        classifier.subscribe(move |kind| sink.borrow_mut().push(kind));
        (classifier, seen)
    }

    #[test]
    fn test_starts_unknown() {
        assert_eq!(InputClassifier::new().active(), InputDeviceKind::Unknown);
    }

    #[test]
    fn test_repeat_switch_notifies_once() {
        let (mut classifier, seen) = recording_classifier();
        assert!(classifier.set_active(InputDeviceKind::Touch));
        assert!(!classifier.set_active(InputDeviceKind::Touch));
        assert_eq!(*seen.borrow(), vec![InputDeviceKind::Touch]);
    }

    #[test]
    fn test_mixed_sequence_emits_each_change() {
        let (mut classifier, seen) = recording_classifier();
        classifier.on_gamepad_key(InputKey::new(KeyCategory::Gamepad, 0));
        classifier.on_mouse_axis_move(3.5);
        classifier.on_touch_key(InputKey::new(KeyCategory::Touch, 0));

        assert_eq!(
            *seen.borrow(),
            vec![
                InputDeviceKind::Gamepad,
                InputDeviceKind::KeyboardMouse,
                InputDeviceKind::Touch,
            ]
        );
    }

    #[test]
    fn test_category_filters() {
        let (mut classifier, seen) = recording_classifier();
        classifier.on_gamepad_key(InputKey::new(KeyCategory::Keyboard, 17));
        classifier.on_touch_key(InputKey::new(KeyCategory::Mouse, 0));
        classifier.on_mouse_axis_move(0.0);

        assert_eq!(classifier.active(), InputDeviceKind::Unknown);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_every_listener_notified() {
        let count = Rc::new(RefCell::new(0));
        let mut classifier = InputClassifier::new();
        for _ in 0..3 {
            let count = Rc::clone(&count);
            classifier.subscribe(move |_| *count.borrow_mut() += 1);
        }
        classifier.on_mouse_axis_move(-1.0);
        classifier.on_mouse_axis_move(-2.0);
        assert_eq!(*count.borrow(), 3);
    }
}
