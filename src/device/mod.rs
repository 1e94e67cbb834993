//! # Device Module
//!
//! The mapping engine: one [`Controller`] per logical input device.
//!
//! This module handles:
//! - Translating raw device events into live action bits (play mode)
//! - Interactive (re)binding of mapping slots at runtime (capture mode)
//! - Unique display names through the session [`NameRegistry`]
//! - Saving and loading mapping profiles through a
//!   [`MappingStore`](crate::mapping::MappingStore)
//!
//! ## Event Flow
//!
//! The host installs a keyboard hook and a joystick poll that fan into one
//! `Controller` per device. In play mode each event updates the live
//! [`state`](Controller::state) bitmask through the device's mapping
//! table; in capture mode events rewrite table slots instead. A per-frame
//! collector ORs player devices' states into a single mask and writes it
//! to the [`InputHistory`](crate::history::InputHistory) at the current
//! frame.
//!
//! ## Threading
//!
//! The core is single-threaded cooperative: event handlers run to
//! completion on one thread and must not re-enter the engine for the same
//! device. Collaborator callbacks fire only after the engine has quiesced
//! its own state; they receive the device's display name rather than the
//! device itself, so hosts queue any reconfiguration for after the event
//! returns.

pub mod capture;
pub mod hooks;
pub mod keys;
pub mod registry;

pub use capture::{MapOptions, MAP_CONTINUOUSLY, MAP_PRESERVE_DIRS};
pub use hooks::{ChangeSink, DeviceOwner, KeyboardObserver, NullObserver};
pub use registry::NameRegistry;

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::{Rc, Weak};

use tracing::{debug, info, trace, warn};

use crate::action::{ActionMask, MASK_DIRS};
use crate::config::DeviceConfig;
use crate::error::{CoreError, Result};
use crate::mapping::joystick::HAT_NEUTRAL;
use crate::mapping::{
    AxisPosition, JoystickMapping, KeyboardMapping, MappingProfile, MappingStore,
};
use capture::{CapturePhase, CaptureSession};
use keys::{vk_key_name, VK_ESCAPE};

/// Base name of the per-session keyboard device.
pub const KEYBOARD_NAME: &str = "Keyboard";

/// The device's mapping table; the two shapes are mutually exclusive.
#[derive(Debug, Clone)]
enum DeviceMappings {
    Keyboard(KeyboardMapping),
    Joystick(JoystickMapping),
}

/// Outcome of routing one event through the capture state machine.
enum CaptureStep<T> {
    /// Not capturing (or gated out); run play mode.
    Play,
    /// Consumed by the capture session with no binding yet.
    Consume,
    /// Arm the session onto this signal.
    Arm(T),
    /// The signal finished its protocol; bind the remembered value.
    Complete(T),
}

/// One logical input device: its mapping table, live state and capture
/// session.
///
/// A controller is constructed either as the session keyboard or as a
/// joystick with a base name and device dimensions (clamped to the
/// configured maximums). Construction registers a unique display name;
/// dropping the controller releases it.
pub struct Controller {
    display_name: String,
    base_name: String,

    mappings: DeviceMappings,

    /// Live bitmask of currently-held actions.
    state: ActionMask,

    /// Latched buttons by index, regardless of mapping.
    any_button: u32,

    capture: Option<CaptureSession>,

    default_deadzone: u16,

    registry: Rc<RefCell<NameRegistry>>,
    observer: Rc<RefCell<dyn KeyboardObserver>>,
    sink: Rc<RefCell<dyn ChangeSink>>,
}

impl Controller {
    /// Constructs the session keyboard device.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TooManyControllers`](crate::error::CoreError)
    /// if the registry cannot produce a unique display name.
    pub fn keyboard(
        registry: Rc<RefCell<NameRegistry>>,
        observer: Rc<RefCell<dyn KeyboardObserver>>,
        sink: Rc<RefCell<dyn ChangeSink>>,
    ) -> Result<Self> {
        let display_name = registry.borrow_mut().register(KEYBOARD_NAME)?;

        info!(device = %display_name, "new keyboard");

        Ok(Self {
            mappings: DeviceMappings::Keyboard(KeyboardMapping::new(display_name.clone())),
            display_name,
            base_name: KEYBOARD_NAME.to_string(),
            state: 0,
            any_button: 0,
            capture: None,
            default_deadzone: DeviceConfig::default().default_deadzone,
            registry,
            observer,
            sink,
        })
    }

    /// Constructs a joystick device with the given base name and device
    /// dimensions, each clamped to the configured maximum. The initial
    /// mapping is empty apart from the deadzone.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TooManyControllers`](crate::error::CoreError)
    /// if the registry cannot produce a unique display name.
    #[allow(clippy::too_many_arguments)]
    pub fn joystick(
        base_name: &str,
        num_axes: usize,
        num_hats: usize,
        num_buttons: usize,
        config: &DeviceConfig,
        registry: Rc<RefCell<NameRegistry>>,
        observer: Rc<RefCell<dyn KeyboardObserver>>,
        sink: Rc<RefCell<dyn ChangeSink>>,
    ) -> Result<Self> {
        let display_name = registry.borrow_mut().register(base_name)?;
        let mappings =
            JoystickMapping::new(display_name.clone(), num_axes, num_hats, num_buttons, config);

        info!(
            device = %display_name,
            axes = mappings.num_axes(),
            hats = mappings.num_hats(),
            buttons = mappings.num_buttons(),
            "new joystick"
        );

        Ok(Self {
            mappings: DeviceMappings::Joystick(mappings),
            display_name,
            base_name: base_name.to_string(),
            state: 0,
            any_button: 0,
            capture: None,
            default_deadzone: config.default_deadzone,
            registry,
            observer,
            sink,
        })
    }

    // ==================== Accessors ====================

    /// Unique display name registered for this device.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.display_name
    }

    /// Whether no other live device shares this device's base name.
    #[must_use]
    pub fn is_unique_name(&self) -> bool {
        self.registry.borrow().is_unique(&self.base_name)
    }

    #[must_use]
    pub fn is_keyboard(&self) -> bool {
        matches!(self.mappings, DeviceMappings::Keyboard(_))
    }

    #[must_use]
    pub fn is_joystick(&self) -> bool {
        matches!(self.mappings, DeviceMappings::Joystick(_))
    }

    /// Static name of this device's kind, for logs and errors.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.mappings {
            DeviceMappings::Keyboard(_) => "keyboard",
            DeviceMappings::Joystick(_) => "joystick",
        }
    }

    /// Live bitmask of currently-held actions.
    #[must_use]
    pub fn state(&self) -> ActionMask {
        self.state
    }

    /// Latched buttons by index, regardless of mapping.
    #[must_use]
    pub fn any_button(&self) -> u32 {
        self.any_button
    }

    /// Whether a capture session is in progress.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        self.capture.is_some()
    }

    /// The keyboard mapping table, for keyboard devices.
    #[must_use]
    pub fn keyboard_mappings(&self) -> Option<&KeyboardMapping> {
        match &self.mappings {
            DeviceMappings::Keyboard(mapping) => Some(mapping),
            DeviceMappings::Joystick(_) => None,
        }
    }

    /// The joystick mapping table, for joystick devices.
    #[must_use]
    pub fn joystick_mappings(&self) -> Option<&JoystickMapping> {
        match &self.mappings {
            DeviceMappings::Joystick(mapping) => Some(mapping),
            DeviceMappings::Keyboard(_) => None,
        }
    }

    /// Human-readable description of the physical signals bound to `key`.
    ///
    /// While `key` is the live capture target and `placeholder` is
    /// non-empty, returns the placeholder instead (the UI shows "press a
    /// key..." in the slot being rebound).
    #[must_use]
    pub fn mapping_name(&self, key: ActionMask, placeholder: &str) -> String {
        if let Some(session) = &self.capture {
            if key == session.target && !placeholder.is_empty() {
                return placeholder.to_string();
            }
        }

        match &self.mappings {
            DeviceMappings::Keyboard(mapping) => mapping.describe(key),
            DeviceMappings::Joystick(mapping) => mapping.describe(key),
        }
    }

    // ==================== Event Handling ====================

    /// Handles a keyboard key event from the host's hook.
    ///
    /// Joystick devices ignore every key except ESC. Only key-down events
    /// drive capture: a non-ESC key-down binds the capture target, ESC
    /// aborts with `key = 0` and no table mutation. Outside capture the
    /// event is ignored (keyboards are polled elsewhere in play mode).
    pub fn keyboard_event(&mut self, vk_code: u32, is_down: bool) {
        if self.is_joystick() && vk_code != VK_ESCAPE {
            return;
        }

        let Some(session) = &self.capture else {
            return;
        };

        if !is_down {
            return;
        }

        let target = session.target;
        let mut key = 0;

        if vk_code != VK_ESCAPE {
            // Free the target bits everywhere before binding the new key.
            self.do_clear_mapping(target);

            let key_name = vk_key_name(vk_code);
            if let DeviceMappings::Keyboard(mapping) = &mut self.mappings {
                mapping.bind(target, vk_code, &key_name);
            }

            key = target;
            info!(
                device = %self.display_name,
                vk = format_args!("0x{vk_code:02X}"),
                name = %key_name,
                key = format_args!("{target:#010x}"),
                "mapped key"
            );
        }

        self.finish_capture(key);
    }

    /// Handles a joystick axis event.
    ///
    /// In play mode the axis's ownership mask is cleared from the live
    /// state and the position's contribution ORed back in. In capture
    /// mode the binding completes when the armed axis returns to neutral.
    pub fn joystick_axis_event(&mut self, axis: usize, value: AxisPosition) {
        let Some(mapping) = self.joystick_mappings() else {
            return;
        };
        if axis >= mapping.num_axes() {
            return;
        }

        match self.axis_capture_step(axis, value) {
            CaptureStep::Play => {}
            CaptureStep::Consume => return,
            CaptureStep::Arm(value) => {
                debug!(device = %self.display_name, axis, "capture armed on axis");
                if let Some(session) = &mut self.capture {
                    session.phase = CapturePhase::Axis { axis, value };
                }
                return;
            }
            CaptureStep::Complete(remembered) => {
                self.bind_axis(axis, remembered);
                return;
            }
        }

        // Play mode.
        let Some(mapping) = self.joystick_mappings() else {
            return;
        };
        let slots = match mapping.axis(axis) {
            Some(slots) => *slots,
            None => return,
        };

        let mask = slots.owned();
        if mask == 0 {
            return;
        }

        self.state &= !mask;
        if value != AxisPosition::Centered {
            self.state |= slots.at(value);
        }

        trace!(device = %self.display_name, axis, ?value, state = format_args!("{:#010x}", self.state), "axis");
        self.after_state_change();
    }

    /// Handles a joystick hat event with a numeric-keypad `value` in 1..=9.
    ///
    /// Capture arms only on cardinal values (2, 4, 6, 8) and completes at
    /// neutral (5); diagonal values run in play mode throughout.
    pub fn joystick_hat_event(&mut self, hat: usize, value: u8) {
        let Some(mapping) = self.joystick_mappings() else {
            return;
        };
        if hat >= mapping.num_hats() || !(1..=9).contains(&value) {
            return;
        }

        match self.hat_capture_step(hat, value) {
            CaptureStep::Play => {}
            CaptureStep::Consume => return,
            CaptureStep::Arm(value) => {
                debug!(device = %self.display_name, hat, value, "capture armed on hat");
                if let Some(session) = &mut self.capture {
                    session.phase = CapturePhase::Hat { hat, value };
                }
                return;
            }
            CaptureStep::Complete(remembered) => {
                self.bind_hat(hat, remembered);
                return;
            }
        }

        // Play mode.
        let Some(mapping) = self.joystick_mappings() else {
            return;
        };
        let slots = match mapping.hat(hat) {
            Some(slots) => *slots,
            None => return,
        };

        let mask = slots.owned();
        if mask == 0 {
            return;
        }

        self.state &= !mask;
        if value != HAT_NEUTRAL {
            self.state |= slots.at(value);
        }

        trace!(device = %self.display_name, hat, value, state = format_args!("{:#010x}", self.state), "hat");
        self.after_state_change();
    }

    /// Handles a joystick button event.
    ///
    /// Play mode latches the button into [`any_button`](Self::any_button)
    /// regardless of mapping, then applies the mapped bits. In capture
    /// mode the binding completes when a tracked button is released.
    pub fn joystick_button_event(&mut self, button: usize, is_down: bool) {
        let Some(mapping) = self.joystick_mappings() else {
            return;
        };
        if button >= mapping.num_buttons() {
            return;
        }

        match self.button_capture_step(button, is_down) {
            CaptureStep::Play => {}
            CaptureStep::Consume => return,
            CaptureStep::Arm(pressed) => {
                debug!(device = %self.display_name, button, "capture tracking button");
                if let Some(session) = &mut self.capture {
                    session.phase = CapturePhase::Buttons { pressed };
                }
                return;
            }
            CaptureStep::Complete(_) => {
                self.bind_button(button);
                return;
            }
        }

        // Play mode.
        if is_down {
            self.any_button |= 1u32 << button;
        } else {
            self.any_button &= !(1u32 << button);
        }

        let mapped = self
            .joystick_mappings()
            .map_or(0, |mapping| mapping.button(button));
        if mapped == 0 {
            return;
        }

        if is_down {
            self.state |= mapped;
        } else {
            self.state &= !mapped;
        }

        trace!(device = %self.display_name, button, is_down, state = format_args!("{:#010x}", self.state), "button");
        self.after_state_change();
    }

    /// Clears wait-for-neutral exactly when the live state first reaches
    /// zero.
    fn after_state_change(&mut self) {
        if self.state != 0 {
            return;
        }

        if let Some(session) = &mut self.capture {
            if session.waiting_for_neutral() {
                debug!(device = %self.display_name, "neutral reached, capture listening");
                session.restart();
            }
        }
    }

    // ==================== Capture Routing ====================

    /// Whether the active session's preserve-dirs option excludes a signal
    /// that currently owns `owned` bits.
    fn preserve_dirs_gate(session: &CaptureSession, owned: ActionMask) -> bool {
        session.options & MAP_PRESERVE_DIRS != 0 && owned & MASK_DIRS != 0
    }

    fn axis_capture_step(&self, axis: usize, value: AxisPosition) -> CaptureStep<AxisPosition> {
        let Some(session) = &self.capture else {
            return CaptureStep::Play;
        };
        if session.waiting_for_neutral() {
            return CaptureStep::Play;
        }

        let owned = self
            .joystick_mappings()
            .and_then(|mapping| mapping.axis(axis))
            .map_or(0, |slots| slots.owned());
        if Self::preserve_dirs_gate(session, owned) {
            return CaptureStep::Play;
        }

        match session.phase {
            CapturePhase::Listening => {
                if value == AxisPosition::Centered {
                    CaptureStep::Consume
                } else {
                    CaptureStep::Arm(value)
                }
            }
            CapturePhase::Axis { axis: armed, value: remembered } if armed == axis => {
                if value == AxisPosition::Centered {
                    CaptureStep::Complete(remembered)
                } else {
                    // Ignore flicker on the already-armed axis.
                    CaptureStep::Consume
                }
            }
            // Locked onto a different signal.
            _ => CaptureStep::Consume,
        }
    }

    fn hat_capture_step(&self, hat: usize, value: u8) -> CaptureStep<u8> {
        let Some(session) = &self.capture else {
            return CaptureStep::Play;
        };
        if session.waiting_for_neutral() {
            return CaptureStep::Play;
        }

        // Diagonals are never capture-eligible; they run in play mode.
        if value % 2 != 0 && value != HAT_NEUTRAL {
            return CaptureStep::Play;
        }

        let owned = self
            .joystick_mappings()
            .and_then(|mapping| mapping.hat(hat))
            .map_or(0, |slots| slots.owned());
        if Self::preserve_dirs_gate(session, owned) {
            return CaptureStep::Play;
        }

        match session.phase {
            CapturePhase::Listening => {
                if value == HAT_NEUTRAL {
                    CaptureStep::Consume
                } else {
                    CaptureStep::Arm(value)
                }
            }
            CapturePhase::Hat { hat: armed, value: remembered } if armed == hat => {
                if value == HAT_NEUTRAL {
                    CaptureStep::Complete(remembered)
                } else {
                    CaptureStep::Consume
                }
            }
            _ => CaptureStep::Consume,
        }
    }

    fn button_capture_step(&self, button: usize, is_down: bool) -> CaptureStep<u32> {
        let Some(session) = &self.capture else {
            return CaptureStep::Play;
        };
        if session.waiting_for_neutral() {
            return CaptureStep::Play;
        }

        let mapped = self
            .joystick_mappings()
            .map_or(0, |mapping| mapping.button(button));
        if Self::preserve_dirs_gate(session, mapped) {
            return CaptureStep::Play;
        }

        let bit = 1u32 << button;

        match session.phase {
            CapturePhase::Listening => {
                if is_down {
                    CaptureStep::Arm(bit)
                } else {
                    CaptureStep::Consume
                }
            }
            CapturePhase::Buttons { pressed } => {
                if is_down {
                    if pressed & bit != 0 {
                        CaptureStep::Consume
                    } else {
                        CaptureStep::Arm(pressed | bit)
                    }
                } else if pressed & bit != 0 {
                    CaptureStep::Complete(pressed)
                } else {
                    CaptureStep::Consume
                }
            }
            _ => CaptureStep::Consume,
        }
    }

    // ==================== Capture Binding ====================

    fn bind_axis(&mut self, axis: usize, value: AxisPosition) {
        let Some(target) = self.capture.as_ref().map(|session| session.target) else {
            return;
        };

        self.do_clear_mapping(target);
        if let DeviceMappings::Joystick(mapping) = &mut self.mappings {
            mapping.set_axis(axis, value, target);
        }

        info!(
            device = %self.display_name,
            axis,
            ?value,
            key = format_args!("{target:#010x}"),
            "mapped axis"
        );
        self.finish_capture(target);
    }

    fn bind_hat(&mut self, hat: usize, value: u8) {
        let Some(target) = self.capture.as_ref().map(|session| session.target) else {
            return;
        };

        self.do_clear_mapping(target);
        if let DeviceMappings::Joystick(mapping) = &mut self.mappings {
            mapping.set_hat(hat, value, target);
        }

        info!(
            device = %self.display_name,
            hat,
            value,
            key = format_args!("{target:#010x}"),
            "mapped hat"
        );
        self.finish_capture(target);
    }

    fn bind_button(&mut self, button: usize) {
        let Some(target) = self.capture.as_ref().map(|session| session.target) else {
            return;
        };

        self.do_clear_mapping(target);
        if let DeviceMappings::Joystick(mapping) = &mut self.mappings {
            mapping.set_button(button, target);
        }

        info!(
            device = %self.display_name,
            button,
            key = format_args!("{target:#010x}"),
            "mapped button"
        );
        self.finish_capture(target);
    }

    /// Runs the completion protocol: snapshot the owner, quiesce the
    /// session (restart for continuous mode, full cancel otherwise),
    /// notify the change sink, then the owner. Snapshots come first
    /// because the owner callback may reconfigure the device.
    fn finish_capture(&mut self, key: ActionMask) {
        let (owner, continuous) = match &self.capture {
            Some(session) => (
                session.owner.clone(),
                session.options & MAP_CONTINUOUSLY != 0,
            ),
            None => return,
        };

        if continuous {
            if let Some(session) = &mut self.capture {
                session.restart();
            }
        } else {
            self.cancel_mapping();
        }

        self.notify_mappings_changed();

        if let Some(owner) = owner.upgrade() {
            owner.borrow_mut().done_mapping(&self.display_name, key);
        }
    }

    // ==================== Capture Control ====================

    /// Begins a capture session for the bits of `key`.
    ///
    /// A prior continuous session keeps its hook and merely resets its
    /// scratch; any other prior session is cancelled first. If the device
    /// is not neutral, the session waits for release before a new press
    /// counts. Keyboards subscribe to every key not in `ignored_keys`;
    /// joysticks subscribe to ESC only.
    pub fn start_mapping(
        &mut self,
        owner: Weak<RefCell<dyn DeviceOwner>>,
        key: ActionMask,
        options: MapOptions,
        ignored_keys: HashSet<u32>,
    ) {
        let continuous = self
            .capture
            .as_ref()
            .map_or(false, |session| session.options & MAP_CONTINUOUSLY != 0);
        if !continuous {
            self.cancel_mapping();
        }

        debug!(
            device = %self.display_name,
            key = format_args!("{key:#010x}"),
            options,
            "starting mapping"
        );

        let phase = if self.state != 0 {
            CapturePhase::WaitNeutral
        } else {
            CapturePhase::Listening
        };

        self.capture = Some(CaptureSession {
            target: key,
            options,
            owner,
            phase,
        });

        let matched_keys = if self.is_keyboard() {
            HashSet::new() // empty = observe all except ignored
        } else {
            HashSet::from([VK_ESCAPE])
        };

        self.observer
            .borrow_mut()
            .hook(&self.display_name, matched_keys, ignored_keys);
    }

    /// Ends any capture session: unhooks the keyboard observer and drops
    /// the session's owner, target and scratch. Idempotent.
    pub fn cancel_mapping(&mut self) {
        if let Some(session) = &self.capture {
            debug!(
                device = %self.display_name,
                key = format_args!("{:#010x}", session.target),
                "cancel mapping"
            );
        }

        self.observer.borrow_mut().unhook();
        self.capture = None;
    }

    // ==================== Table Mutation ====================

    fn do_clear_mapping(&mut self, keys: ActionMask) -> bool {
        match &mut self.mappings {
            DeviceMappings::Keyboard(mapping) => mapping.clear_keys(keys),
            DeviceMappings::Joystick(mapping) => mapping.clear_keys(keys),
        }
    }

    fn notify_mappings_changed(&self) {
        self.sink.borrow_mut().mappings_changed(&self.display_name);
    }

    /// Unbinds every slot holding any bit of `keys` and notifies the
    /// change sink.
    pub fn clear_mapping(&mut self, keys: ActionMask) {
        self.do_clear_mapping(keys);
        self.notify_mappings_changed();
    }

    /// Restores joystick defaults (button bits cleared, deadzone reset)
    /// and notifies the change sink. No-op for keyboards.
    pub fn reset_to_defaults(&mut self) {
        let default_deadzone = self.default_deadzone;
        match &mut self.mappings {
            DeviceMappings::Joystick(mapping) => mapping.set_default(default_deadzone),
            DeviceMappings::Keyboard(_) => return,
        }

        self.notify_mappings_changed();
    }

    /// Replaces the keyboard mapping table wholesale. Ignored with a
    /// warning on joystick devices.
    pub fn set_keyboard_mappings(&mut self, mut mappings: KeyboardMapping) {
        if !self.is_keyboard() {
            warn!(device = %self.display_name, "keyboard mappings offered to a joystick device");
            return;
        }

        debug!(device = %self.display_name, "adopting keyboard mappings");
        mappings.invalidate();
        self.mappings = DeviceMappings::Keyboard(mappings);
        self.notify_mappings_changed();
    }

    /// Replaces the joystick mapping table wholesale. Ignored with a
    /// warning on keyboard devices.
    pub fn set_joystick_mappings(&mut self, mut mappings: JoystickMapping) {
        if !self.is_joystick() {
            warn!(device = %self.display_name, "joystick mappings offered to a keyboard device");
            return;
        }

        debug!(device = %self.display_name, "adopting joystick mappings");
        mappings.invalidate();
        self.mappings = DeviceMappings::Joystick(mappings);
        self.notify_mappings_changed();
    }

    // ==================== Persistence ====================

    /// Saves this device's mapping profile through `store`. Failures are
    /// logged and reported as `false`.
    pub fn save_mappings(&self, store: &dyn MappingStore, path: &Path) -> bool {
        let profile = match &self.mappings {
            DeviceMappings::Keyboard(mapping) => MappingProfile::Keyboard(mapping.clone()),
            DeviceMappings::Joystick(mapping) => MappingProfile::Joystick(mapping.clone()),
        };

        match store.save(path, &profile) {
            Ok(()) => true,
            Err(error) => {
                warn!(device = %self.display_name, %error, "failed to save mappings");
                false
            }
        }
    }

    /// Loads a mapping profile through `store` and adopts it.
    ///
    /// A profile whose kind does not match the device is logged and
    /// rejected without mutation. A name mismatch is logged but the
    /// mapping is still adopted.
    pub fn load_mappings(&mut self, store: &dyn MappingStore, path: &Path) -> bool {
        let profile = match store.load(path) {
            Ok(profile) => profile,
            Err(error) => {
                warn!(device = %self.display_name, %error, "failed to load mappings");
                return false;
            }
        };

        if profile.name() != self.display_name {
            warn!(
                device = %self.display_name,
                loaded = %profile.name(),
                "mapping name mismatch, adopting anyway"
            );
        }

        match (&self.mappings, profile) {
            (DeviceMappings::Keyboard(_), MappingProfile::Keyboard(mapping)) => {
                self.set_keyboard_mappings(mapping);
                true
            }
            (DeviceMappings::Joystick(_), MappingProfile::Joystick(mapping)) => {
                self.set_joystick_mappings(mapping);
                true
            }
            (_, profile) => {
                let error = CoreError::InvalidMappingProfile {
                    expected: self.kind_name(),
                    found: profile.kind_name(),
                };
                warn!(device = %self.display_name, %error, "rejecting mapping profile");
                false
            }
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        debug!(device = %self.display_name, "dropping controller");

        if self.capture.is_some() {
            self.observer.borrow_mut().unhook();
        }

        self.registry
            .borrow_mut()
            .unregister(&self.display_name, &self.base_name);
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("name", &self.display_name)
            .field("state", &format_args!("{:#010x}", self.state))
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}
