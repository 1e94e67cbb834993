//! # Joystick Mapping Module
//!
//! The forward map from joystick axes, hats and buttons to action bits.
//!
//! ## Derived Slots
//!
//! Only the primitive slots are stored: the positive/negative masks per
//! axis, the four cardinal masks per hat, and one mask per button. The
//! remaining slots of the classic table layout are *derived* and computed
//! on read:
//!
//! - An axis's CENTERED slot is `positive | negative` and doubles as the
//!   ownership mask ("bits this axis owns").
//! - Hat slot 5 (neutral) is the OR of the four cardinals and is the hat's
//!   ownership mask; the diagonal slots 1/3/7/9 are the OR of their two
//!   adjacent cardinals.
//!
//! Computing instead of storing keeps the derivation invariants true by
//! construction.
//!
//! ## Hat Values
//!
//! Hat positions are laid out as a numeric keypad:
//!
//! | Value | Position |
//! |-------|----------|
//! | 1 | down-left |
//! | 2 | down |
//! | 3 | down-right |
//! | 4 | left |
//! | 5 | neutral |
//! | 6 | right |
//! | 7 | up-left |
//! | 8 | up |
//! | 9 | up-right |

use serde::{Deserialize, Serialize};

use crate::action::ActionMask;
use crate::config::DeviceConfig;

/// Hat neutral position (numeric-keypad 5).
pub const HAT_NEUTRAL: u8 = 5;
/// Hat down position.
pub const HAT_DOWN: u8 = 2;
/// Hat left position.
pub const HAT_LEFT: u8 = 4;
/// Hat right position.
pub const HAT_RIGHT: u8 = 6;
/// Hat up position.
pub const HAT_UP: u8 = 8;

/// Enumerated state of a joystick axis after deadzone resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    /// Axis inside the deadzone.
    Centered,
    /// Axis deflected past the deadzone in the positive direction.
    Positive,
    /// Axis deflected past the deadzone in the negative direction.
    Negative,
}

/// Primitive slots for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSlots {
    pub positive: ActionMask,
    pub negative: ActionMask,
}

impl AxisSlots {
    /// Ownership mask: every bit any position of this axis can produce.
    /// Equals the classic table's CENTERED slot.
    #[must_use]
    pub fn owned(&self) -> ActionMask {
        self.positive | self.negative
    }

    /// Mask contributed at `position`; the centered contribution is the
    /// ownership mask.
    #[must_use]
    pub fn at(&self, position: AxisPosition) -> ActionMask {
        match position {
            AxisPosition::Centered => self.owned(),
            AxisPosition::Positive => self.positive,
            AxisPosition::Negative => self.negative,
        }
    }
}

/// Primitive (cardinal) slots for one hat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatSlots {
    pub up: ActionMask,
    pub down: ActionMask,
    pub left: ActionMask,
    pub right: ActionMask,
}

impl HatSlots {
    /// Ownership mask: OR of the four cardinals. Equals slot 5 of the
    /// classic table.
    #[must_use]
    pub fn owned(&self) -> ActionMask {
        self.up | self.down | self.left | self.right
    }

    /// Mask contributed at keypad position `value`. Diagonals are the OR
    /// of their adjacent cardinals; neutral is the ownership mask; values
    /// outside 1..=9 contribute nothing.
    #[must_use]
    pub fn at(&self, value: u8) -> ActionMask {
        match value {
            1 => self.down | self.left,
            2 => self.down,
            3 => self.down | self.right,
            4 => self.left,
            5 => self.owned(),
            6 => self.right,
            7 => self.up | self.left,
            8 => self.up,
            9 => self.up | self.right,
            _ => 0,
        }
    }

    /// Writes the cardinal slot for `value` (2, 4, 6 or 8). Other values
    /// are rejected by the caller.
    pub fn set_cardinal(&mut self, value: u8, mask: ActionMask) {
        match value {
            HAT_DOWN => self.down = mask,
            HAT_LEFT => self.left = mask,
            HAT_RIGHT => self.right = mask,
            HAT_UP => self.up = mask,
            _ => {}
        }
    }
}

/// Axis, hat and button slots for one joystick device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoystickMapping {
    /// Display name of the owning device.
    pub name: String,

    axes: Vec<AxisSlots>,
    hats: Vec<HatSlots>,
    buttons: Vec<ActionMask>,

    /// Axis deadzone in raw axis units.
    pub deadzone: u16,

    /// Cache-invalidation counter; bumped on every mutation.
    #[serde(skip)]
    generation: u64,
}

impl JoystickMapping {
    /// Creates an all-unbound mapping sized to the device's (clamped)
    /// dimensions, with the configured default deadzone.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        num_axes: usize,
        num_hats: usize,
        num_buttons: usize,
        config: &DeviceConfig,
    ) -> Self {
        Self {
            name: name.into(),
            axes: vec![AxisSlots::default(); num_axes.min(config.max_axes)],
            hats: vec![HatSlots::default(); num_hats.min(config.max_hats)],
            buttons: vec![0; num_buttons.min(config.max_buttons)],
            deadzone: config.default_deadzone,
            generation: 0,
        }
    }

    /// Number of axes this mapping tracks.
    #[must_use]
    pub fn num_axes(&self) -> usize {
        self.axes.len()
    }

    /// Number of hats this mapping tracks.
    #[must_use]
    pub fn num_hats(&self) -> usize {
        self.hats.len()
    }

    /// Number of buttons this mapping tracks.
    #[must_use]
    pub fn num_buttons(&self) -> usize {
        self.buttons.len()
    }

    /// Slots for `axis`, if within range.
    #[must_use]
    pub fn axis(&self, axis: usize) -> Option<&AxisSlots> {
        self.axes.get(axis)
    }

    /// Slots for `hat`, if within range.
    #[must_use]
    pub fn hat(&self, hat: usize) -> Option<&HatSlots> {
        self.hats.get(hat)
    }

    /// Mask bound to `button`, or 0 when out of range or unbound.
    #[must_use]
    pub fn button(&self, button: usize) -> ActionMask {
        self.buttons.get(button).copied().unwrap_or(0)
    }

    /// Binds `mask` to one axis direction and bumps the counter. The
    /// ownership mask follows automatically since it is derived.
    pub fn set_axis(&mut self, axis: usize, position: AxisPosition, mask: ActionMask) {
        let Some(slots) = self.axes.get_mut(axis) else {
            return;
        };

        match position {
            AxisPosition::Positive => slots.positive = mask,
            AxisPosition::Negative => slots.negative = mask,
            AxisPosition::Centered => return,
        }

        self.invalidate();
    }

    /// Binds `mask` to one hat cardinal (2, 4, 6 or 8) and bumps the
    /// counter. Diagonals and neutral follow automatically.
    pub fn set_hat(&mut self, hat: usize, value: u8, mask: ActionMask) {
        let Some(slots) = self.hats.get_mut(hat) else {
            return;
        };

        slots.set_cardinal(value, mask);
        self.invalidate();
    }

    /// Binds `mask` to `button` and bumps the counter.
    pub fn set_button(&mut self, button: usize, mask: ActionMask) {
        if let Some(slot) = self.buttons.get_mut(button) {
            *slot = mask;
            self.invalidate();
        }
    }

    /// Zeroes every stored slot that intersects `keys`. Returns whether
    /// any slot changed; bumps the counter if so.
    pub fn clear_keys(&mut self, keys: ActionMask) -> bool {
        let mut changed = false;

        for slots in &mut self.axes {
            for slot in [&mut slots.positive, &mut slots.negative] {
                if *slot & keys != 0 {
                    *slot = 0;
                    changed = true;
                }
            }
        }

        for slots in &mut self.hats {
            for slot in [
                &mut slots.up,
                &mut slots.down,
                &mut slots.left,
                &mut slots.right,
            ] {
                if *slot & keys != 0 {
                    *slot = 0;
                    changed = true;
                }
            }
        }

        for slot in &mut self.buttons {
            if *slot & keys != 0 {
                *slot = 0;
                changed = true;
            }
        }

        if changed {
            self.invalidate();
        }
        changed
    }

    /// Comma-joined description of every physical signal producing any bit
    /// of `key`: axis signs first, then 1-based button numbers.
    // TODO: describe hat bindings once a naming scheme for them is settled.
    #[must_use]
    pub fn describe(&self, key: ActionMask) -> String {
        let mut parts = Vec::new();

        for (index, slots) in self.axes.iter().enumerate() {
            if slots.positive & key != 0 {
                parts.push(format!("+ Axis {}", index + 1));
            }
            if slots.negative & key != 0 {
                parts.push(format!("- Axis {}", index + 1));
            }
        }

        for (index, &mask) in self.buttons.iter().enumerate() {
            if mask & key != 0 {
                parts.push(format!("Button {}", index + 1));
            }
        }

        parts.join(", ")
    }

    /// Restores defaults: clears every button bit and resets the deadzone.
    ///
    /// No axis or hat mappings are installed; a fresh joystick mapping is
    /// empty apart from the deadzone, and users bind their stick through
    /// capture.
    pub fn set_default(&mut self, default_deadzone: u16) {
        self.clear_keys(crate::action::MASK_BUTTONS);
        self.deadzone = default_deadzone;
        self.invalidate();
    }

    /// Bumps the cache-invalidation counter so downstream caches regenerate.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current value of the cache-invalidation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// Profile equality ignores the invalidation counter.
impl PartialEq for JoystickMapping {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.axes == other.axes
            && self.hats == other.hats
            && self.buttons == other.buttons
            && self.deadzone == other.deadzone
    }
}

impl Eq for JoystickMapping {}
