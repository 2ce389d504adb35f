//! Input module
//!
//! Device classification plus the mapping from raw events to pawn actions.

mod classifier;
mod handler;

pub use classifier::{InputClassifier, InputDeviceKind, InputKey, KeyCategory};
pub use handler::{
    BoundAction, DeviceSignal, FrameInput, GamepadAxis, GamepadButton, InputAction, InputBinding,
    InputBindings, InputHandler, PointerState, TOUCH_SLOTS,
};
