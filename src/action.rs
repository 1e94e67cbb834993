//! # Action Mask Module
//!
//! The 32-bit flag word of semantic game actions. This is the currency
//! between the mapping engine and the game: raw device signals are
//! translated into action bits, and the per-frame input history stores
//! one mask per player per frame.
//!
//! ## Bit Layout
//!
//! | Region | Bits | Contents |
//! |--------|------|----------|
//! | Directions | 0-15 | `BIT_UP`, `BIT_DOWN`, `BIT_LEFT`, `BIT_RIGHT` (rest reserved) |
//! | Buttons | 16-31 | Face buttons, confirm/cancel, start (rest reserved) |
//!
//! The two regions never overlap; `MASK_DIRS & MASK_BUTTONS == 0` always.

/// 32-bit flag word of semantic game actions.
pub type ActionMask = u32;

/// Number of addressable action bits (and keyboard mapping slots).
pub const NUM_ACTION_BITS: usize = 32;

/// Named action bits.
pub mod bits {
    use super::ActionMask;

    /// Up direction.
    pub const BIT_UP: ActionMask = 0x0000_0001;
    /// Down direction.
    pub const BIT_DOWN: ActionMask = 0x0000_0002;
    /// Left direction.
    pub const BIT_LEFT: ActionMask = 0x0000_0004;
    /// Right direction.
    pub const BIT_RIGHT: ActionMask = 0x0000_0008;

    /// Face button A.
    pub const BIT_A: ActionMask = 0x0001_0000;
    /// Face button B.
    pub const BIT_B: ActionMask = 0x0002_0000;
    /// Face button C.
    pub const BIT_C: ActionMask = 0x0004_0000;
    /// Face button D.
    pub const BIT_D: ActionMask = 0x0008_0000;
    /// Face button E.
    pub const BIT_E: ActionMask = 0x0010_0000;
    /// Start button.
    pub const BIT_START: ActionMask = 0x0020_0000;
    /// Menu confirm.
    pub const BIT_CONFIRM: ActionMask = 0x0040_0000;
    /// Menu cancel.
    pub const BIT_CANCEL: ActionMask = 0x0080_0000;
}

/// Mask covering the direction region (low 16 bits).
pub const MASK_DIRS: ActionMask = 0x0000_FFFF;

/// Mask covering the button/command region (high 16 bits).
pub const MASK_BUTTONS: ActionMask = 0xFFFF_0000;

/// Returns a short label for a single named action bit, or `None` for
/// reserved bits. Used when describing bindings to the user.
#[must_use]
pub fn bit_label(bit: ActionMask) -> Option<&'static str> {
    match bit {
        bits::BIT_UP => Some("Up"),
        bits::BIT_DOWN => Some("Down"),
        bits::BIT_LEFT => Some("Left"),
        bits::BIT_RIGHT => Some("Right"),
        bits::BIT_A => Some("A"),
        bits::BIT_B => Some("B"),
        bits::BIT_C => Some("C"),
        bits::BIT_D => Some("D"),
        bits::BIT_E => Some("E"),
        bits::BIT_START => Some("Start"),
        bits::BIT_CONFIRM => Some("Confirm"),
        bits::BIT_CANCEL => Some("Cancel"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_do_not_intersect() {
        assert_eq!(MASK_DIRS & MASK_BUTTONS, 0);
        assert_eq!(MASK_DIRS | MASK_BUTTONS, ActionMask::MAX);
    }

    #[test]
    fn test_direction_bits_in_direction_region() {
        for bit in [bits::BIT_UP, bits::BIT_DOWN, bits::BIT_LEFT, bits::BIT_RIGHT] {
            assert_eq!(bit & MASK_DIRS, bit);
            assert_eq!(bit & MASK_BUTTONS, 0);
        }
    }

    #[test]
    fn test_button_bits_in_button_region() {
        for bit in [
            bits::BIT_A,
            bits::BIT_B,
            bits::BIT_C,
            bits::BIT_D,
            bits::BIT_E,
            bits::BIT_START,
            bits::BIT_CONFIRM,
            bits::BIT_CANCEL,
        ] {
            assert_eq!(bit & MASK_BUTTONS, bit);
            assert_eq!(bit & MASK_DIRS, 0);
        }
    }

    #[test]
    fn test_named_bits_are_distinct() {
        let all = [
            bits::BIT_UP,
            bits::BIT_DOWN,
            bits::BIT_LEFT,
            bits::BIT_RIGHT,
            bits::BIT_A,
            bits::BIT_B,
            bits::BIT_C,
            bits::BIT_D,
            bits::BIT_E,
            bits::BIT_START,
            bits::BIT_CONFIRM,
            bits::BIT_CANCEL,
        ];
        let mut seen: ActionMask = 0;
        for bit in all {
            assert_eq!(seen & bit, 0, "bit {bit:#010x} overlaps another");
            seen |= bit;
        }
    }

    #[test]
    fn test_bit_labels() {
        assert_eq!(bit_label(bits::BIT_UP), Some("Up"));
        assert_eq!(bit_label(bits::BIT_START), Some("Start"));
        assert_eq!(bit_label(0x8000_0000), None);
    }
}
