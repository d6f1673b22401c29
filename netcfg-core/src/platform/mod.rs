//! Per-platform default tables.
//!
//! Each supported host MCU family contributes one [`HardwareConfig`] holding a
//! fallback for every parameter in the catalog. Exactly one table feeds a
//! resolution; picking it is the build's decision, not the resolver's.

use core::fmt;

use crate::hardware::HardwareConfig;
use crate::pins::Pin;

pub mod nrf5x;
pub mod stm32f4;

#[cfg(all(feature = "platform-stm32f4", feature = "platform-nrf5x"))]
compile_error!("enable at most one of `platform-stm32f4` and `platform-nrf5x`");

/// Host MCU family the configuration targets.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    Stm32f4,
    ZephyrNrf5x,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Stm32f4, Platform::ZephyrNrf5x];

    /// Short tag accepted on command lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Platform::Stm32f4 => "stm32f4",
            Platform::ZephyrNrf5x => "nrf5x",
        }
    }

    /// Parses a platform tag (case insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|platform| platform.name().eq_ignore_ascii_case(name))
    }

    /// Returns the default table for this platform.
    #[must_use]
    pub const fn defaults(self) -> HardwareConfig {
        match self {
            Platform::Stm32f4 => stm32f4::DEFAULTS,
            Platform::ZephyrNrf5x => nrf5x::DEFAULTS,
        }
    }

    /// Whether `pin` names a GPIO this platform has. The sentinel always
    /// passes.
    #[must_use]
    pub const fn has_pin(self, pin: Pin) -> bool {
        let Some(index) = pin.index() else {
            return true;
        };
        match self {
            Platform::Stm32f4 => index >> 4 < stm32f4::GPIO_BANK_COUNT,
            Platform::ZephyrNrf5x => index < nrf5x::GPIO_COUNT,
        }
    }

    /// Wraps `pin` so it displays with this platform's port naming.
    #[must_use]
    pub const fn pin_label(self, pin: Pin) -> PinLabel {
        PinLabel {
            platform: self,
            pin,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Platform selected by cargo feature, if any.
#[cfg(feature = "platform-stm32f4")]
pub const BUILD_PLATFORM: Option<Platform> = Some(Platform::Stm32f4);
/// Platform selected by cargo feature, if any.
#[cfg(feature = "platform-nrf5x")]
pub const BUILD_PLATFORM: Option<Platform> = Some(Platform::ZephyrNrf5x);
/// Platform selected by cargo feature, if any.
#[cfg(not(any(feature = "platform-stm32f4", feature = "platform-nrf5x")))]
pub const BUILD_PLATFORM: Option<Platform> = None;

/// Pin rendered with the port naming of its platform (`PE_14`, `P1.01`).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PinLabel {
    platform: Platform,
    pin: Pin,
}

impl fmt::Display for PinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(index) = self.pin.index() else {
            return f.write_str("-");
        };
        match self.platform {
            Platform::Stm32f4 => {
                let bank = index >> 4;
                if bank < 26 {
                    let letter = char::from(b'A' + bank as u8);
                    write!(f, "P{letter}_{}", index & 0x0f)
                } else {
                    write!(f, "{index:#x}")
                }
            }
            Platform::ZephyrNrf5x => write!(f, "P{}.{:02}", index / 32, index % 32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_tags_round_trip() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_name(platform.name()), Some(platform));
        }
        assert_eq!(Platform::from_name("STM32F4"), Some(Platform::Stm32f4));
        assert_eq!(Platform::from_name("esp32"), None);
    }

    #[test]
    fn stm32_labels_use_bank_and_pin_nibbles() {
        let label = Platform::Stm32f4.pin_label(Pin::new(0x4e));
        assert_eq!(label.to_string(), "PE_14");
        let label = Platform::Stm32f4.pin_label(Pin::new(0x09));
        assert_eq!(label.to_string(), "PA_9");
    }

    #[test]
    fn pins_outside_the_gpio_banks_do_not_exist() {
        assert!(Platform::Stm32f4.has_pin(Pin::new(0x4e)));
        assert!(Platform::Stm32f4.has_pin(Pin::new(0xaf)));
        assert!(!Platform::Stm32f4.has_pin(Pin::new(0xb0)));
        assert!(!Platform::Stm32f4.has_pin(Pin::new(0x1000)));
        assert!(Platform::ZephyrNrf5x.has_pin(Pin::new(47)));
        assert!(!Platform::ZephyrNrf5x.has_pin(Pin::new(48)));
        for platform in Platform::ALL {
            assert!(platform.has_pin(Pin::UNCONNECTED));
        }
    }

    #[test]
    fn nrf_labels_use_port_and_pin() {
        let label = Platform::ZephyrNrf5x.pin_label(Pin::new(33));
        assert_eq!(label.to_string(), "P1.01");
        let label = Platform::ZephyrNrf5x.pin_label(Pin::UNCONNECTED);
        assert_eq!(label.to_string(), "-");
    }
}
