//! # Fightpad Core
//!
//! Input-mapping engine and per-frame input history for a fighting-game
//! replay/network helper.
//!
//! This library translates raw device events (keyboard key codes, joystick
//! axes, hats and buttons) into a fixed set of game-action bits, supports
//! interactive rebinding while the game is running, and stores the
//! per-player, per-frame action masks the game loop and netcode consume.

pub mod action;
pub mod config;
pub mod error;
pub mod mapping;
pub mod device;
pub mod history;
