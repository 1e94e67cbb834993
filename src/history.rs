//! # Input History Module
//!
//! Sparse, append-extendable `(index, frame) -> input` store used by the
//! game loop and netcode.
//!
//! The container maps a player index to an ordered sequence of per-frame
//! inputs. Sequences grow densely: any write to frame `F` first pads frames
//! `0..F` with the zero value, so for every allocated index the frames
//! `[0, len)` are always defined.
//!
//! ## Lookup Semantics
//!
//! - Reading an unallocated index or an empty sequence yields the zero value.
//! - Reading past the end of a sequence yields the *last* stored element
//!   (saturating lookup), which lets the consumer treat the most recent
//!   input as still held.
//!
//! ## Fake-Input Tracking
//!
//! When [`InputHistory::fill_fake_inputs`] is enabled, a parallel buffer
//! records whether each frame was written explicitly (`true`) or filled by
//! padding (`false`). The parallel buffer grows lazily and only while the
//! switch is on.
//!
//! ## Usage
//!
//! ```
//! use fightpad_core::history::InputHistory;
//!
//! let mut history: InputHistory<u32> = InputHistory::new();
//! history.set(0, 10, 0xAB);
//!
//! assert_eq!(history.get(0, 0), 0);       // padded
//! assert_eq!(history.get(0, 10), 0xAB);   // stored
//! assert_eq!(history.get(0, 1000), 0xAB); // saturating
//! assert_eq!(history.end_frame(), 11);
//! ```

/// Sparse per-index, per-frame input store with saturating lookup.
///
/// `T` is the per-frame input value, typically an
/// [`ActionMask`](crate::action::ActionMask). The zero value used for
/// padding and missing lookups is `T::default()`.
///
/// # Thread Safety
///
/// `InputHistory` is owned by the game loop; it is not synchronized and
/// must not be written from multiple threads.
#[derive(Debug, Clone, Default)]
pub struct InputHistory<T> {
    /// Mapping: index -> frame -> input.
    inputs: Vec<Vec<T>>,

    /// Mapping: index -> frame -> written explicitly.
    real: Vec<Vec<bool>>,

    /// Enables the parallel `real` buffer.
    pub fill_fake_inputs: bool,
}

impl<T: Copy + Default> InputHistory<T> {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            real: Vec::new(),
            fill_fake_inputs: false,
        }
    }

    /// Returns the input at `(index, frame)`.
    ///
    /// Unallocated indices and empty sequences yield `T::default()`.
    /// Frames beyond the stored length yield the last stored element.
    #[must_use]
    pub fn get(&self, index: usize, frame: usize) -> T {
        let Some(seq) = self.inputs.get(index) else {
            return T::default();
        };

        match seq.get(frame) {
            Some(&value) => value,
            None => seq.last().copied().unwrap_or_default(),
        }
    }

    /// Copies `out.len()` consecutive inputs starting at `frame` into `out`.
    ///
    /// # Panics
    ///
    /// Calling this outside the allocated range is a programmer error:
    /// panics if `index` has no sequence or `frame + out.len()` exceeds its
    /// length.
    pub fn get_range(&self, index: usize, frame: usize, out: &mut [T]) {
        assert!(index < self.inputs.len(), "index {index} out of range");
        assert!(
            frame + out.len() <= self.inputs[index].len(),
            "frame range {}..{} exceeds stored length {}",
            frame,
            frame + out.len(),
            self.inputs[index].len()
        );

        out.copy_from_slice(&self.inputs[index][frame..frame + out.len()]);
    }

    /// Writes one input at `(index, frame)`, padding any gap with zeros.
    pub fn set(&mut self, index: usize, frame: usize, value: T) {
        self.resize(index, frame, 1);
        self.inputs[index][frame] = value;
    }

    /// Writes `n` copies of `value` starting at `(index, frame)`.
    pub fn set_run(&mut self, index: usize, frame: usize, value: T, n: usize) {
        self.resize(index, frame, n);
        self.inputs[index][frame..frame + n].fill(value);
    }

    /// Copies a slice of inputs in starting at `(index, frame)`.
    pub fn set_slice(&mut self, index: usize, frame: usize, values: &[T]) {
        self.resize(index, frame, values.len());
        self.inputs[index][frame..frame + values.len()].copy_from_slice(values);
    }

    /// Ensures `(index, frame..frame + n)` exists, padding new frames with
    /// zeros, and marks the written range real.
    fn resize(&mut self, index: usize, frame: usize, n: usize) {
        if index >= self.inputs.len() {
            self.inputs.resize_with(index + 1, Vec::new);
        }

        if frame + n > self.inputs[index].len() {
            self.inputs[index].resize(frame + n, T::default());
        }

        if self.fill_fake_inputs {
            if index >= self.real.len() {
                self.real.resize_with(index + 1, Vec::new);
            }

            if frame + n > self.real[index].len() {
                self.real[index].resize(frame + n, false);
            }

            self.real[index][frame..frame + n].fill(true);
        }
    }

    /// Returns whether `(index, frame)` was written explicitly rather than
    /// filled by padding. Only meaningful while `fill_fake_inputs` is on.
    #[must_use]
    pub fn is_real(&self, index: usize, frame: usize) -> bool {
        self.real
            .get(index)
            .and_then(|seq| seq.get(frame))
            .copied()
            .unwrap_or(false)
    }

    /// Drops all stored inputs and real-frame marks.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.real.clear();
    }

    /// Returns whether no index has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Returns whether `index` has no stored frames.
    #[must_use]
    pub fn is_index_empty(&self, index: usize) -> bool {
        self.inputs.get(index).map_or(true, Vec::is_empty)
    }

    /// Number of allocated index sequences.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.inputs.len()
    }

    /// Length of the last (highest) index's sequence, or 0 if empty.
    #[must_use]
    pub fn end_frame(&self) -> usize {
        self.inputs.last().map_or(0, Vec::len)
    }
}
