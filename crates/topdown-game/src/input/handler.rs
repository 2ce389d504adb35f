//! Action-based input mapping
//!
//! Turns raw window events (winit keyboard, mouse and touch) plus gamepad
//! samples into the discrete actions the pawn understands, and into device
//! signals for the input classifier.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::classifier::{InputKey, KeyCategory};

/// Number of touch slots tracked (primary + one for multi-touch detection)
pub const TOUCH_SLOTS: usize = 2;

/// Discrete actions dispatched to the pawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputAction {
    /// Planar move, x = right, y = forward
    Move(Vec2),
    /// Yaw in degrees
    Spin(f32),
    /// Signed zoom step (positive pulls the camera out)
    Zoom(f32),
    /// Select pressed
    SelectStarted,
    /// Select released or cancelled
    SelectStopped,
    /// Select held; drives drag panning while a drag session is open
    Drag,
}

/// Raw device activity forwarded to the classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceSignal {
    /// Any key or button press
    Key(InputKey),
    /// One-dimensional mouse motion sample
    MouseAxis(f32),
}

/// Held actions that keys and buttons can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Spin left (Q by default)
    SpinLeft,
    /// Spin right (E by default)
    SpinRight,
    /// Zoom in (PageUp by default)
    ZoomIn,
    /// Zoom out (PageDown by default)
    ZoomOut,
    /// Select / drag (left mouse button by default)
    Select,
}

/// Gamepad buttons the bindings understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl GamepadButton {
    fn code(self) -> u32 {
        self as u32
    }
}

/// Gamepad analog axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    /// Combined trigger axis: right trigger positive, left negative
    Triggers,
}

/// Binding of a physical input to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
    /// Gamepad button
    Gamepad(GamepadButton),
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

/// Maps physical inputs to bound actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key/button to action mappings
    bindings: HashMap<InputBinding, BoundAction>,
    /// Reverse lookup: action to all bindings
    reverse: HashMap<BoundAction, Vec<InputBinding>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, BoundAction::MoveForward);
        bindings.bind(KeyCode::KeyS, BoundAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, BoundAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, BoundAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, BoundAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, BoundAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, BoundAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, BoundAction::MoveRight);

        // Camera
        bindings.bind(KeyCode::KeyQ, BoundAction::SpinLeft);
        bindings.bind(KeyCode::KeyE, BoundAction::SpinRight);
        bindings.bind(KeyCode::PageUp, BoundAction::ZoomIn);
        bindings.bind(KeyCode::PageDown, BoundAction::ZoomOut);

        bindings.bind_mouse(0, BoundAction::Select); // Left mouse button

        // Gamepad
        bindings.bind_gamepad(GamepadButton::South, BoundAction::Select);
        bindings.bind_gamepad(GamepadButton::LeftShoulder, BoundAction::SpinLeft);
        bindings.bind_gamepad(GamepadButton::RightShoulder, BoundAction::SpinRight);
        bindings.bind_gamepad(GamepadButton::DPadUp, BoundAction::ZoomIn);
        bindings.bind_gamepad(GamepadButton::DPadDown, BoundAction::ZoomOut);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: BoundAction) {
        self.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: BoundAction) {
        self.insert(InputBinding::Mouse(button), action);
    }

    /// Bind a gamepad button to an action
    pub fn bind_gamepad(&mut self, button: GamepadButton, action: BoundAction) {
        self.insert(InputBinding::Gamepad(button), action);
    }

    fn insert(&mut self, binding: InputBinding, action: BoundAction) {
        if let Some(previous) = self.bindings.insert(binding, action) {
            if let Some(list) = self.reverse.get_mut(&previous) {
                list.retain(|b| *b != binding);
            }
        }
        self.reverse.entry(action).or_default().push(binding);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        let binding = InputBinding::Key(key);
        if let Some(action) = self.bindings.remove(&binding) {
            if let Some(bindings) = self.reverse.get_mut(&action) {
                bindings.retain(|b| *b != binding);
            }
        }
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<BoundAction> {
        self.bindings.get(binding).copied()
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<BoundAction> {
        self.get_action(&InputBinding::Key(key))
    }

    /// All bindings that trigger an action
    pub fn bindings_for(&self, action: BoundAction) -> &[InputBinding] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Live pointer samples read by the player-controller port
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Last cursor position inside the window, if any
    pub mouse_position: Option<Vec2>,
    /// Pressed touch points by slot
    pub touches: [Option<Vec2>; TOUCH_SLOTS],
}

/// Everything collected for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub signals: Vec<DeviceSignal>,
    pub actions: Vec<InputAction>,
}

/// Input handler that processes raw events and produces actions
#[derive(Debug)]
pub struct InputHandler {
    /// Input bindings
    pub bindings: InputBindings,
    /// Pointer samples
    pub pointer: PointerState,
    /// Degrees of yaw per frame while a spin action is held
    pub spin_rate: f32,
    /// Zoom step per wheel line
    pub wheel_zoom_step: f32,
    /// Stick values below this are ignored
    pub stick_deadzone: f32,
    held: HashSet<BoundAction>,
    touch_ids: [Option<u64>; TOUCH_SLOTS],
    left_stick: Vec2,
    right_stick_x: f32,
    triggers: f32,
    frame: FrameInput,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            bindings: InputBindings::default(),
            pointer: PointerState::default(),
            spin_rate: 2.0,
            wheel_zoom_step: 1.0,
            stick_deadzone: 0.15,
            held: HashSet::new(),
            touch_ids: [None; TOUCH_SLOTS],
            left_stick: Vec2::ZERO,
            right_stick_x: 0.0,
            triggers: 0.0,
            frame: FrameInput::default(),
        }
    }

    /// Check if a bound action is currently held
    pub fn is_held(&self, action: BoundAction) -> bool {
        self.held.contains(&action)
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        if element_state == ElementState::Pressed {
            self.frame
                .signals
                .push(DeviceSignal::Key(InputKey::new(KeyCategory::Keyboard, 0)));
        }
        if let Some(action) = self.bindings.get_key_action(key_code) {
            self.apply_bound(action, element_state);
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button_id = match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        };

        if state == ElementState::Pressed {
            self.frame
                .signals
                .push(DeviceSignal::Key(InputKey::new(KeyCategory::Mouse, button_id)));
        }
        if let Some(action) = self.bindings.get_action(&InputBinding::Mouse(button_id)) {
            self.apply_bound(action, state);
        }
    }

    /// Handle raw mouse motion; each axis is a separate 1D sample
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.frame.signals.push(DeviceSignal::MouseAxis(delta.0 as f32));
        self.frame.signals.push(DeviceSignal::MouseAxis(delta.1 as f32));
    }

    /// Handle the cursor moving inside the window
    pub fn handle_cursor_moved(&mut self, position: (f64, f64)) {
        self.pointer.mouse_position = Some(Vec2::new(position.0 as f32, position.1 as f32));
    }

    /// Handle the cursor leaving the window
    pub fn handle_cursor_left(&mut self) {
        self.pointer.mouse_position = None;
    }

    /// Handle scroll wheel
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
        };

        if scroll != 0.0 {
            // Wheel up pulls the camera in
            self.frame
                .actions
                .push(InputAction::Zoom(-scroll * self.wheel_zoom_step));
        }
    }

    /// Handle a touch event
    pub fn handle_touch(&mut self, id: u64, phase: TouchPhase, location: (f64, f64)) {
        let point = Vec2::new(location.0 as f32, location.1 as f32);
        match phase {
            TouchPhase::Started => {
                let Some(slot) = self.touch_ids.iter().position(Option::is_none) else {
                    return;
                };
                self.touch_ids[slot] = Some(id);
                self.pointer.touches[slot] = Some(point);
                self.frame.signals.push(DeviceSignal::Key(InputKey::new(
                    KeyCategory::Touch,
                    slot as u32,
                )));
                if slot == 0 {
                    self.apply_bound(BoundAction::Select, ElementState::Pressed);
                }
            }
            TouchPhase::Moved => {
                if let Some(slot) = self.slot_of(id) {
                    self.pointer.touches[slot] = Some(point);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if let Some(slot) = self.slot_of(id) {
                    self.touch_ids[slot] = None;
                    self.pointer.touches[slot] = None;
                    if slot == 0 {
                        self.apply_bound(BoundAction::Select, ElementState::Released);
                    }
                }
            }
        }
    }

    /// Handle a gamepad button event
    pub fn handle_gamepad_button(&mut self, button: GamepadButton, state: ElementState) {
        if state == ElementState::Pressed {
            self.frame.signals.push(DeviceSignal::Key(InputKey::new(
                KeyCategory::Gamepad,
                button.code(),
            )));
        }
        if let Some(action) = self.bindings.get_action(&InputBinding::Gamepad(button)) {
            self.apply_bound(action, state);
        }
    }

    /// Handle a gamepad axis sample
    pub fn handle_gamepad_axis(&mut self, axis: GamepadAxis, value: f32) {
        let value = if value.abs() < self.stick_deadzone { 0.0 } else { value };
        if value != 0.0 {
            self.frame.signals.push(DeviceSignal::Key(InputKey::new(
                KeyCategory::Gamepad,
                100 + axis as u32,
            )));
        }
        match axis {
            GamepadAxis::LeftStickX => self.left_stick.x = value,
            GamepadAxis::LeftStickY => self.left_stick.y = value,
            GamepadAxis::RightStickX => self.right_stick_x = value,
            GamepadAxis::Triggers => self.triggers = value,
        }
    }

    /// Collect this frame's signals and actions and reset per-frame state
    pub fn end_frame(&mut self) -> FrameInput {
        let mut movement = self.left_stick;
        if self.is_held(BoundAction::MoveForward) {
            movement.y += 1.0;
        }
        if self.is_held(BoundAction::MoveBackward) {
            movement.y -= 1.0;
        }
        if self.is_held(BoundAction::MoveRight) {
            movement.x += 1.0;
        }
        if self.is_held(BoundAction::MoveLeft) {
            movement.x -= 1.0;
        }
        if movement != Vec2::ZERO {
            self.frame.actions.push(InputAction::Move(movement));
        }

        let mut spin = self.right_stick_x * self.spin_rate;
        if self.is_held(BoundAction::SpinRight) {
            spin += self.spin_rate;
        }
        if self.is_held(BoundAction::SpinLeft) {
            spin -= self.spin_rate;
        }
        if spin != 0.0 {
            self.frame.actions.push(InputAction::Spin(spin));
        }

        let mut zoom = self.triggers;
        if self.is_held(BoundAction::ZoomOut) {
            zoom += 1.0;
        }
        if self.is_held(BoundAction::ZoomIn) {
            zoom -= 1.0;
        }
        if zoom != 0.0 {
            self.frame.actions.push(InputAction::Zoom(zoom));
        }

        if self.is_held(BoundAction::Select) {
            self.frame.actions.push(InputAction::Drag);
        }

        std::mem::take(&mut self.frame)
    }

    fn slot_of(&self, id: u64) -> Option<usize> {
        self.touch_ids.iter().position(|slot| *slot == Some(id))
    }

    fn apply_bound(&mut self, action: BoundAction, state: ElementState) {
        match state {
            ElementState::Pressed => {
                let newly_pressed = self.held.insert(action);
                if newly_pressed && action == BoundAction::Select {
                    self.frame.actions.push(InputAction::SelectStarted);
                }
            }
            ElementState::Released => {
                let was_held = self.held.remove(&action);
                if was_held && action == BoundAction::Select {
                    self.frame.actions.push(InputAction::SelectStopped);
                }
            }
        }
    }
}
