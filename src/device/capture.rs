//! # Capture State Machine
//!
//! Transient state for an interactive (re)binding session. While a session
//! is active, incoming device events rewrite mapping-table slots instead of
//! updating live state.
//!
//! The session is a tagged state machine rather than a bag of booleans:
//! progress through a capture is exactly one of the [`CapturePhase`]
//! variants, and "no capture" is the absence of the session itself.

use std::cell::RefCell;
use std::rc::Weak;

use crate::action::ActionMask;
use crate::device::hooks::DeviceOwner;
use crate::mapping::AxisPosition;

/// Option bit: restart capture with fresh scratch after each completed
/// binding instead of ending the session.
pub const MAP_CONTINUOUSLY: u8 = 0x01;

/// Option bit: exclude signals that currently own direction bits from
/// capture, so rebinding buttons cannot silently destroy the stick.
pub const MAP_PRESERVE_DIRS: u8 = 0x02;

/// Flag set over `{MAP_CONTINUOUSLY, MAP_PRESERVE_DIRS}`.
pub type MapOptions = u8;

/// Progress of the active capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CapturePhase {
    /// The device was not neutral when capture began; every event runs in
    /// play mode until the live state first reaches zero.
    WaitNeutral,

    /// Armed; no candidate signal observed yet.
    Listening,

    /// An axis left neutral; binding completes when it returns.
    Axis { axis: usize, value: AxisPosition },

    /// A hat left neutral on a cardinal; binding completes at neutral.
    Hat { hat: usize, value: u8 },

    /// Buttons currently held down (bitmask by button index); the first
    /// release of a held button completes the binding.
    Buttons { pressed: u32 },
}

/// One interactive (re)binding session.
pub(crate) struct CaptureSession {
    /// Action bits being captured; never zero for a live session.
    pub target: ActionMask,

    /// Session options.
    pub options: MapOptions,

    /// Completion callback; `Weak` so a dropped owner aborts cleanly.
    pub owner: Weak<RefCell<dyn DeviceOwner>>,

    pub phase: CapturePhase,
}

impl CaptureSession {
    /// Resets scratch for the next binding of a continuous session.
    pub fn restart(&mut self) {
        self.phase = CapturePhase::Listening;
    }

    /// Whether events should run in play mode until neutral is reached.
    pub fn waiting_for_neutral(&self) -> bool {
        self.phase == CapturePhase::WaitNeutral
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("target", &format_args!("{:#010x}", self.target))
            .field("options", &self.options)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_resets_phase_only() {
        let mut session = CaptureSession {
            target: 0x1,
            options: MAP_CONTINUOUSLY,
            owner: Weak::<RefCell<crate::device::hooks::MockDeviceOwner>>::new(),
            phase: CapturePhase::Buttons { pressed: 0b100 },
        };

        session.restart();
        assert_eq!(session.phase, CapturePhase::Listening);
        assert_eq!(session.target, 0x1);
        assert_eq!(session.options, MAP_CONTINUOUSLY);
    }

    #[test]
    fn test_waiting_for_neutral() {
        let session = CaptureSession {
            target: 0x1,
            options: 0,
            owner: Weak::<RefCell<crate::device::hooks::MockDeviceOwner>>::new(),
            phase: CapturePhase::WaitNeutral,
        };
        assert!(session.waiting_for_neutral());
    }
}
