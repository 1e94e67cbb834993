//! # Mapping Module
//!
//! Forward maps from physical device signals to game-action bits.
//!
//! This module handles:
//! - Keyboard mappings (one virtual-key slot per action bit)
//! - Joystick mappings (axes, hats and buttons with derived neutral masks)
//! - Mapping profile persistence through the [`store::MappingStore`] seam
//!
//! The tables here are pure data: only the mapping engine in
//! [`crate::device`] mutates them, and collaborators read them through the
//! description accessors.

pub mod joystick;
pub mod keyboard;
pub mod store;

pub use joystick::{AxisPosition, JoystickMapping};
pub use keyboard::KeyboardMapping;
pub use store::{MappingProfile, MappingStore, TomlProfileStore};
