//! # Name Registry
//!
//! Session-wide registry that gives every constructed device a unique
//! display name by appending a numeric discriminator on collision:
//! `"Pad"`, `"Pad (2)"`, `"Pad (3)"`, ...
//!
//! The registry is an explicit object shared by the device constructors
//! (via `Rc<RefCell<_>>`), not a process global, so sessions and tests
//! stay isolated.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Tracks display names in use and how many live devices share each base
/// name.
#[derive(Debug, Default)]
pub struct NameRegistry {
    /// Every display name currently registered.
    in_use: HashSet<String>,

    /// base name -> count of constructed devices sharing it.
    base_counts: HashMap<String, u32>,
}

impl NameRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device with the given base name and returns its unique
    /// display name: the base itself if unused, otherwise `"base (k)"` for
    /// the smallest free `k >= 2`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TooManyControllers`] if the discriminator
    /// counter would overflow before a free name is found.
    pub fn register(&mut self, base: &str) -> Result<String> {
        // Not named `display`: tracing's macros import `field::display`
        // into scope and would shadow the local.
        let display_name = if self.in_use.contains(base) {
            self.next_discriminated(base)?
        } else {
            base.to_string()
        };

        self.in_use.insert(display_name.clone());
        *self.base_counts.entry(base.to_string()).or_insert(0) += 1;

        debug!(base, display = %display_name, "registered device name");
        Ok(display_name)
    }

    fn next_discriminated(&self, base: &str) -> Result<String> {
        let mut index: u32 = 2;

        loop {
            let candidate = format!("{base} ({index})");
            if !self.in_use.contains(&candidate) {
                return Ok(candidate);
            }

            if index == u32::MAX {
                return Err(CoreError::TooManyControllers {
                    base: base.to_string(),
                });
            }
            index += 1;
        }
    }

    /// Releases a device's display name and decrements its base count,
    /// dropping the entry when it reaches zero.
    pub fn unregister(&mut self, display_name: &str, base: &str) {
        self.in_use.remove(display_name);

        if let Some(count) = self.base_counts.get_mut(base) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.base_counts.remove(base);
            }
        }

        debug!(base, display = display_name, "unregistered device name");
    }

    /// Whether exactly one live device uses this base name.
    #[must_use]
    pub fn is_unique(&self, base: &str) -> bool {
        self.base_counts.get(base) == Some(&1)
    }
}
