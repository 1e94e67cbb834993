//! # Collaborator Hooks
//!
//! Narrow interfaces through which the engine talks to its host. Keeping
//! these as traits instead of concrete types removes the cyclic dependency
//! between the engine and the host modules that own it.
//!
//! All callbacks fire on the core's single event thread, after the engine
//! has quiesced its own state. They carry the device's display name rather
//! than a device handle; a host that wants to reconfigure or drop the
//! device in response queues that work for after the event returns.

use std::collections::HashSet;

#[cfg(test)]
use mockall::automock;

use crate::action::ActionMask;

/// Receives a notification after any successful mutation of a mapping
/// table, identified by the device's display name.
#[cfg_attr(test, automock)]
pub trait ChangeSink {
    fn mappings_changed(&mut self, device: &str);
}

/// Receives the capture-completion callback. `key` is 0 when capture was
/// aborted with ESC.
#[cfg_attr(test, automock)]
pub trait DeviceOwner {
    fn done_mapping(&mut self, device: &str, key: ActionMask);
}

/// The host-side keyboard hook the engine subscribes to during capture.
///
/// Contract: at most one device is hooked at a time; hook/unhook calls are
/// paired by the engine. An empty `matched_keys` set means "observe every
/// key not in `ignored_keys`".
#[cfg_attr(test, automock)]
pub trait KeyboardObserver {
    fn hook(&mut self, device: &str, matched_keys: HashSet<u32>, ignored_keys: HashSet<u32>);
    fn unhook(&mut self);
}

/// Observer for hosts that have no keyboard hook (headless tests, replay
/// playback). Every operation is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl KeyboardObserver for NullObserver {
    fn hook(&mut self, _device: &str, _matched_keys: HashSet<u32>, _ignored_keys: HashSet<u32>) {}

    fn unhook(&mut self) {}
}
