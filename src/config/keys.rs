//! Aim key binding and virtual-key code naming

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Windows virtual-key code (e.g., VK_LBUTTON = 0x01, VK_XBUTTON1 = 0x05)
/// Serializes as the bare integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualKey(pub i32);

/// Named keys outside the contiguous digit/letter/function ranges
const NAMED_KEYS: &[(i32, &str)] = &[
    (0x01, "Mouse1"),
    (0x02, "Mouse2"),
    (0x04, "Mouse3"),
    (0x05, "Mouse4"),
    (0x06, "Mouse5"),
    (0x08, "Backspace"),
    (0x09, "Tab"),
    (0x0D, "Enter"),
    (0x10, "Shift"),
    (0x11, "Ctrl"),
    (0x12, "Alt"),
    (0x14, "CapsLock"),
    (0x1B, "Escape"),
    (0x20, "Space"),
    (0x21, "PageUp"),
    (0x22, "PageDown"),
    (0x23, "End"),
    (0x24, "Home"),
    (0x2D, "Insert"),
    (0x2E, "Delete"),
    (0xA0, "LShift"),
    (0xA1, "RShift"),
    (0xA2, "LCtrl"),
    (0xA3, "RCtrl"),
    (0xA4, "LAlt"),
    (0xA5, "RAlt"),
];

impl VirtualKey {
    pub const LBUTTON: Self = Self(0x01);

    /// Get human-readable display name for this key (for listings)
    pub fn display_name(self) -> String {
        let code = self.0;
        if let Some((_, name)) = NAMED_KEYS.iter().find(|(c, _)| *c == code) {
            return (*name).to_string();
        }
        match code {
            // '0'-'9' and 'A'-'Z' share their ASCII codes
            0x30..=0x39 | 0x41..=0x5A => char::from(code as u8).to_string(),
            0x70..=0x87 => format!("F{}", code - 0x70 + 1),
            _ => format!("VK 0x{:02X}", code),
        }
    }
}

impl Default for VirtualKey {
    fn default() -> Self {
        Self::LBUTTON
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for VirtualKey {
    type Err = String;

    /// Accepts a key name ("Mouse4", "F1", "G"), a decimal code, or a 0x-prefixed hex code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty key name".to_string());
        }

        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return i32::from_str_radix(hex, 16)
                .map(Self)
                .map_err(|_| format!("Invalid hex key code: {s}"));
        }

        // Single characters are letters/digits; check before decimal parsing so "5" means the digit key
        if s.len() == 1 {
            let c = s.as_bytes()[0].to_ascii_uppercase();
            if c.is_ascii_alphanumeric() {
                return Ok(Self(i32::from(c)));
            }
        }

        if let Ok(code) = s.parse::<i32>() {
            return Ok(Self(code));
        }

        if let Some((code, _)) = NAMED_KEYS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
        {
            return Ok(Self(*code));
        }

        if let Some(n) = s
            .strip_prefix(['F', 'f'])
            .and_then(|n| n.parse::<i32>().ok())
            && (1..=24).contains(&n)
        {
            return Ok(Self(0x70 + n - 1));
        }

        Err(format!("Unknown key: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(VirtualKey::LBUTTON.display_name(), "Mouse1");
        assert_eq!(VirtualKey(0x05).display_name(), "Mouse4");
        assert_eq!(VirtualKey(0x41).display_name(), "A");
        assert_eq!(VirtualKey(0x37).display_name(), "7");
        assert_eq!(VirtualKey(0x70).display_name(), "F1");
        assert_eq!(VirtualKey(0x87).display_name(), "F24");
        assert_eq!(VirtualKey(0xA4).display_name(), "LAlt");
        assert_eq!(VirtualKey(0xFF).display_name(), "VK 0xFF");
    }

    #[test]
    fn test_parse() {
        assert_eq!("mouse4".parse::<VirtualKey>(), Ok(VirtualKey(0x05)));
        assert_eq!("g".parse::<VirtualKey>(), Ok(VirtualKey(0x47)));
        assert_eq!("5".parse::<VirtualKey>(), Ok(VirtualKey(0x35)));
        assert_eq!("F12".parse::<VirtualKey>(), Ok(VirtualKey(0x7B)));
        assert_eq!("0x06".parse::<VirtualKey>(), Ok(VirtualKey(0x06)));
        assert_eq!("164".parse::<VirtualKey>(), Ok(VirtualKey(0xA4)));
        assert!("F25".parse::<VirtualKey>().is_err());
        assert!("".parse::<VirtualKey>().is_err());
        assert!("NotAKey".parse::<VirtualKey>().is_err());
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        for (code, name) in NAMED_KEYS {
            assert_eq!(name.parse::<VirtualKey>(), Ok(VirtualKey(*code)));
        }
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&VirtualKey(0x05)).unwrap(), "5");
        let key: VirtualKey = serde_json::from_str("2").unwrap();
        assert_eq!(key, VirtualKey(0x02));
    }
}
