//! # Keyboard Mapping Module
//!
//! The forward map from virtual-key codes to action bits.
//!
//! A keyboard mapping is an ordered array of 32 slots, one per bit of
//! [`ActionMask`](crate::action::ActionMask). Each slot holds a virtual-key
//! code (0 = unbound) and the key's display name. One physical key may be
//! bound to several slots, so a single keypress can contribute multiple
//! action bits.
//!
//! ## Slot Invariant
//!
//! A slot is bound iff its code is non-zero iff its name is non-empty.

use serde::{Deserialize, Serialize};

use crate::action::{ActionMask, NUM_ACTION_BITS};

/// Virtual-key slots for one keyboard device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardMapping {
    /// Display name of the owning device.
    pub name: String,

    /// Virtual-key code per action bit; 0 means unbound.
    codes: [u32; NUM_ACTION_BITS],

    /// Key display name per action bit; empty means unbound.
    names: [String; NUM_ACTION_BITS],

    /// Cache-invalidation counter; bumped on every mutation.
    #[serde(skip)]
    generation: u64,
}

impl KeyboardMapping {
    /// Creates an all-unbound mapping for the named device.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codes: [0; NUM_ACTION_BITS],
            names: std::array::from_fn(|_| String::new()),
            generation: 0,
        }
    }

    /// Virtual-key code bound to action bit `slot`, or 0.
    #[must_use]
    pub fn code(&self, slot: usize) -> u32 {
        self.codes[slot]
    }

    /// Display name of the key bound to action bit `slot`, or "".
    #[must_use]
    pub fn key_name(&self, slot: usize) -> &str {
        &self.names[slot]
    }

    /// Whether action bit `slot` has a key bound.
    #[must_use]
    pub fn is_bound(&self, slot: usize) -> bool {
        self.codes[slot] != 0
    }

    /// Binds `vk_code` to every bit of `key`, and unbinds `vk_code` from
    /// every slot outside `key` that currently holds it. A physical key
    /// maps to at most the captured bits plus pre-existing bindings to
    /// *different* keys.
    ///
    /// Bumps the invalidation counter.
    pub fn bind(&mut self, key: ActionMask, vk_code: u32, key_name: &str) {
        for slot in 0..NUM_ACTION_BITS {
            if key & (1u32 << slot) != 0 {
                self.codes[slot] = vk_code;
                self.names[slot] = key_name.to_string();
            } else if self.codes[slot] == vk_code {
                self.codes[slot] = 0;
                self.names[slot].clear();
            }
        }

        self.invalidate();
    }

    /// Unbinds every slot whose action bit is set in `keys`. Returns
    /// whether any slot changed; bumps the counter if so.
    pub fn clear_keys(&mut self, keys: ActionMask) -> bool {
        let mut changed = false;

        for slot in 0..NUM_ACTION_BITS {
            if keys & (1u32 << slot) != 0 && self.codes[slot] != 0 {
                self.codes[slot] = 0;
                self.names[slot].clear();
                changed = true;
            }
        }

        if changed {
            self.invalidate();
        }
        changed
    }

    /// Display name of the first bound slot whose bit is set in `key`.
    #[must_use]
    pub fn describe(&self, key: ActionMask) -> String {
        for slot in 0..NUM_ACTION_BITS {
            if key & (1u32 << slot) != 0 && self.codes[slot] != 0 {
                return self.names[slot].clone();
            }
        }

        String::new()
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
impl PartialEq for KeyboardMapping {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.codes == other.codes && self.names == other.names
    }
}

impl Eq for KeyboardMapping {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::bits::*;

    fn bit_index(key: ActionMask) -> usize {
        key.trailing_zeros() as usize
    }

    // ==================== Slot Invariant Tests ====================

    #[test]
    fn test_new_mapping_unbound() {
        let mapping = KeyboardMapping::new("Keyboard");
        for slot in 0..NUM_ACTION_BITS {
            assert!(!mapping.is_bound(slot));
            assert_eq!(mapping.code(slot), 0);
            assert!(mapping.key_name(slot).is_empty());
        }
    }

    #[test]
    fn test_slot_invariant_after_bind_and_clear() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_A, 0x41, "A");
        mapping.clear_keys(BIT_A);

        for slot in 0..NUM_ACTION_BITS {
            assert_eq!(mapping.code(slot) != 0, !mapping.key_name(slot).is_empty());
        }
    }

    // ==================== Bind Tests ====================

    #[test]
    fn test_bind_single_bit() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_A, 0x41, "A");

        assert_eq!(mapping.code(bit_index(BIT_A)), 0x41);
        assert_eq!(mapping.key_name(bit_index(BIT_A)), "A");
    }

    #[test]
    fn test_bind_multiple_bits_same_key() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_CONFIRM | BIT_A, 0x5A, "Z");

        assert_eq!(mapping.code(bit_index(BIT_A)), 0x5A);
        assert_eq!(mapping.code(bit_index(BIT_CONFIRM)), 0x5A);
    }

    #[test]
    fn test_bind_evicts_key_from_other_slots() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_B, 0x5A, "Z");
        mapping.bind(BIT_A, 0x5A, "Z");

        assert_eq!(mapping.code(bit_index(BIT_A)), 0x5A);
        assert!(!mapping.is_bound(bit_index(BIT_B)));
    }

    #[test]
    fn test_bind_leaves_other_keys_alone() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_B, 0x58, "X");
        mapping.bind(BIT_A, 0x5A, "Z");

        assert_eq!(mapping.code(bit_index(BIT_B)), 0x58);
    }

    #[test]
    fn test_bind_bumps_generation() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        let before = mapping.generation();
        mapping.bind(BIT_A, 0x41, "A");
        assert!(mapping.generation() > before);
    }

    // ==================== Clear Tests ====================

    #[test]
    fn test_clear_keys() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_A, 0x41, "A");
        mapping.bind(BIT_UP, 0x26, "Up Arrow");

        assert!(mapping.clear_keys(BIT_A));
        assert!(!mapping.is_bound(bit_index(BIT_A)));
        assert!(mapping.is_bound(bit_index(BIT_UP)));
    }

    #[test]
    fn test_clear_unbound_keys_is_noop() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        let before = mapping.generation();
        assert!(!mapping.clear_keys(BIT_A));
        assert_eq!(mapping.generation(), before);
    }

    // ==================== Describe Tests ====================

    #[test]
    fn test_describe_first_bound_slot() {
        let mut mapping = KeyboardMapping::new("Keyboard");
        mapping.bind(BIT_DOWN, 0x28, "Down Arrow");

        assert_eq!(mapping.describe(BIT_DOWN), "Down Arrow");
        assert_eq!(mapping.describe(BIT_UP | BIT_DOWN), "Down Arrow");
        assert_eq!(mapping.describe(BIT_UP), "");
    }

    // ==================== Equality Tests ====================

    #[test]
    fn test_equality_ignores_generation() {
        let mut a = KeyboardMapping::new("Keyboard");
        let mut b = KeyboardMapping::new("Keyboard");
        a.bind(BIT_A, 0x41, "A");
        b.bind(BIT_A, 0x41, "A");
        b.invalidate();

        assert_eq!(a, b);
    }
}
