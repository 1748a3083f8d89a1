//! Input handling for keyboard and mouse.
//!
//! Window events are fed into [`InputState`] as they arrive; once per frame the
//! game calls [`InputState::sample`] to get a [`FrameInput`] and then
//! [`InputState::begin_frame`] to clear the per-frame edges.

use glam::Vec2;
use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,

    /// Mouse motion accumulated since the last frame (only while the cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
}

/// Everything the simulation needs from the input devices for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Strafe (x) and forward (y) axes, normalized when non-zero.
    pub movement: Vec2,
    /// Raw mouse motion in pixels since the last frame (zero unless the cursor is locked).
    pub look_delta: Vec2,
    /// Fire was clicked this frame.
    pub fire: bool,
    /// Reload was pressed this frame.
    pub reload: bool,
    /// Weapon slot chosen this frame (0-based, from keys 1/2/3).
    pub weapon_slot: Option<usize>,
    /// Pause/resume toggle (P or Escape).
    pub pause: bool,
    /// Quit to main menu (M).
    pub quit_to_menu: bool,
    /// Confirm / acknowledge (Enter, Space or click).
    pub confirm: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call after the frame has been simulated.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process raw mouse movement. Ignored while the cursor is free.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_locked {
            return;
        }
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Drop everything held; used when the window loses focus so keys don't stick.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.mouse_held.clear();
        self.accumulated_delta = Vec2::ZERO;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Get the mouse movement received since the last frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.accumulated_delta
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
        if !locked {
            self.accumulated_delta = Vec2::ZERO;
        }
    }

    /// Get movement input as a normalized vector (WASD).
    pub fn get_movement_input(&self) -> Vec2 {
        let mut movement = Vec2::ZERO;

        if self.is_key_held(KeyCode::KeyW) {
            movement.y += 1.0;
        }
        if self.is_key_held(KeyCode::KeyS) {
            movement.y -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyA) {
            movement.x -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyD) {
            movement.x += 1.0;
        }

        if movement.length_squared() > 0.0 {
            movement = movement.normalize();
        }

        movement
    }

    /// Check if fire was pressed this frame (Left mouse button, one shot per click).
    pub fn is_fire_pressed(&self) -> bool {
        self.is_mouse_pressed(MouseButton::Left)
    }

    /// Check if reload was pressed (R).
    pub fn is_reload_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyR)
    }

    /// Check if pause was pressed (P or Escape).
    pub fn is_pause_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyP) || self.is_key_pressed(KeyCode::Escape)
    }

    /// Slot selected with the number row this frame, if any.
    pub fn weapon_slot_pressed(&self) -> Option<usize> {
        [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3]
            .iter()
            .position(|key| self.is_key_pressed(*key))
    }

    /// Enter, Space or a left click.
    pub fn is_confirm_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Enter)
            || self.is_key_pressed(KeyCode::NumpadEnter)
            || self.is_key_pressed(KeyCode::Space)
            || self.is_mouse_pressed(MouseButton::Left)
    }

    /// Sample this frame's input for the simulation.
    pub fn sample(&self) -> FrameInput {
        FrameInput {
            movement: self.get_movement_input(),
            look_delta: if self.cursor_locked { self.mouse_delta() } else { Vec2::ZERO },
            fire: self.is_fire_pressed(),
            reload: self.is_reload_pressed(),
            weapon_slot: self.weapon_slot_pressed(),
            pause: self.is_pause_pressed(),
            quit_to_menu: self.is_key_pressed(KeyCode::KeyM),
            confirm: self.is_confirm_pressed(),
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
