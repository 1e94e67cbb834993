//! # Virtual-Key Names
//!
//! Display names for virtual-key codes, used to label keyboard mapping
//! slots. Codes without a friendly name fall back to `Key Code 0xNN`.

/// Virtual-key code of the ESC key, the universal capture-abort key.
pub const VK_ESCAPE: u32 = 0x1B;

/// Returns a display name for a virtual-key code.
///
/// Letters and digits name themselves; common control, navigation and
/// numpad keys have friendly names; anything else falls back to
/// `Key Code 0xNN`.
///
/// # Examples
///
/// ```
/// use fightpad_core::device::keys::vk_key_name;
///
/// assert_eq!(vk_key_name(0x41), "A");
/// assert_eq!(vk_key_name(0x26), "Up Arrow");
/// assert_eq!(vk_key_name(0xE9), "Key Code 0xE9");
/// ```
#[must_use]
pub fn vk_key_name(vk_code: u32) -> String {
    // Letters A-Z and digits 0-9 map straight to their character.
    if (0x41..=0x5A).contains(&vk_code) || (0x30..=0x39).contains(&vk_code) {
        return char::from_u32(vk_code).unwrap_or('?').to_string();
    }

    let name = match vk_code {
        0x08 => "Backspace",
        0x09 => "Tab",
        0x0D => "Enter",
        0x10 => "Shift",
        0x11 => "Ctrl",
        0x12 => "Alt",
        0x13 => "Pause",
        0x14 => "Caps Lock",
        VK_ESCAPE => "Esc",
        0x20 => "Space",
        0x21 => "Page Up",
        0x22 => "Page Down",
        0x23 => "End",
        0x24 => "Home",
        0x25 => "Left Arrow",
        0x26 => "Up Arrow",
        0x27 => "Right Arrow",
        0x28 => "Down Arrow",
        0x2D => "Insert",
        0x2E => "Delete",
        0x60 => "Numpad 0",
        0x61 => "Numpad 1",
        0x62 => "Numpad 2",
        0x63 => "Numpad 3",
        0x64 => "Numpad 4",
        0x65 => "Numpad 5",
        0x66 => "Numpad 6",
        0x67 => "Numpad 7",
        0x68 => "Numpad 8",
        0x69 => "Numpad 9",
        0x6A => "Numpad *",
        0x6B => "Numpad +",
        0x6D => "Numpad -",
        0x6E => "Numpad .",
        0x6F => "Numpad /",
        0x70 => "F1",
        0x71 => "F2",
        0x72 => "F3",
        0x73 => "F4",
        0x74 => "F5",
        0x75 => "F6",
        0x76 => "F7",
        0x77 => "F8",
        0x78 => "F9",
        0x79 => "F10",
        0x7A => "F11",
        0x7B => "F12",
        _ => return format!("Key Code 0x{vk_code:02X}"),
    };

    name.to_string()
}
