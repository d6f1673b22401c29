//! Binds every parameter to exactly one value and builds the records.
//!
//! Resolution takes the selected platform's default table, replaces each
//! entry that has an override, builds the network records from the result and
//! finally validates them.

use core::fmt;

use crate::hardware::{HardwareConfig, KindMismatch};
use crate::overrides::{OverrideFileError, Overrides};
use crate::params::{self, ParameterId, ParameterSpec, ParameterValue};
use crate::platform::Platform;
use crate::records::{NetworkConfigs, ValidationError};

/// Where a resolved value came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueSource {
    Default,
    Override,
}

impl ValueSource {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ValueSource::Default => "default",
            ValueSource::Override => "override",
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hardware table after overrides, with the provenance of every entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResolvedHardware {
    pub platform: Platform,
    pub config: HardwareConfig,
    sources: [ValueSource; ParameterId::COUNT],
}

impl ResolvedHardware {
    #[must_use]
    pub const fn source(&self, id: ParameterId) -> ValueSource {
        self.sources[id.as_index()]
    }

    #[must_use]
    pub const fn value(&self, id: ParameterId) -> ParameterValue {
        self.config.get(id)
    }

    /// Iterates over every parameter in catalog order.
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = (&'static ParameterSpec, ParameterValue, ValueSource)> + '_ {
        params::parameters()
            .iter()
            .map(|spec| (spec, self.value(spec.id), self.source(spec.id)))
    }

    /// Number of parameters bound from an override.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|source| **source == ValueSource::Override)
            .count()
    }
}

/// Applies `overrides` on top of `platform`'s default table.
pub fn resolve_hardware(
    platform: Platform,
    overrides: &Overrides,
) -> Result<ResolvedHardware, KindMismatch> {
    let mut config = platform.defaults();
    let mut sources = [ValueSource::Default; ParameterId::COUNT];
    for (id, value) in overrides.parameters() {
        config.set(id, value)?;
        sources[id.as_index()] = ValueSource::Override;
    }
    Ok(ResolvedHardware {
        platform,
        config,
        sources,
    })
}

/// Fully resolved configuration: wiring plus validated records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedConfig {
    pub hardware: ResolvedHardware,
    pub records: NetworkConfigs,
}

/// Errors returned by [`resolve`] and [`resolve_source`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    Overrides(OverrideFileError),
    Hardware(KindMismatch),
    Validation(ValidationError),
}

impl From<OverrideFileError> for ConfigError {
    fn from(error: OverrideFileError) -> Self {
        ConfigError::Overrides(error)
    }
}

impl From<KindMismatch> for ConfigError {
    fn from(error: KindMismatch) -> Self {
        ConfigError::Hardware(error)
    }
}

impl From<ValidationError> for ConfigError {
    fn from(error: ValidationError) -> Self {
        ConfigError::Validation(error)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Overrides(error) => write!(f, "override source: {error}"),
            ConfigError::Hardware(error) => write!(
                f,
                "{} cannot hold a {:?} value",
                error.parameter, error.found
            ),
            ConfigError::Validation(error) => write!(f, "invalid configuration: {error}"),
        }
    }
}

/// Resolves the wiring for `platform` and builds validated records.
pub fn resolve(platform: Platform, overrides: &Overrides) -> Result<ResolvedConfig, ConfigError> {
    let hardware = resolve_hardware(platform, overrides)?;
    let records = NetworkConfigs::build(&hardware.config, overrides.selection());
    records.validate()?;
    records.validate_pins(platform, &hardware.config)?;
    Ok(ResolvedConfig { hardware, records })
}

/// Parses an override source and resolves it in one step.
pub fn resolve_source(platform: Platform, source: &str) -> Result<ResolvedConfig, ConfigError> {
    let overrides = Overrides::from_source(source)?;
    resolve(platform, &overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::{Pin, UartId};

    #[test]
    fn unoverridden_parameters_come_from_defaults() {
        let resolved = resolve_hardware(Platform::Stm32f4, &Overrides::new()).expect("defaults");
        assert_eq!(resolved.config, Platform::Stm32f4.defaults());
        assert_eq!(resolved.override_count(), 0);
        assert!(
            resolved
                .entries()
                .all(|(_, _, source)| source == ValueSource::Default)
        );
    }

    #[test]
    fn overrides_replace_defaults_and_are_tagged() {
        let overrides = Overrides::from_source("cell.uart = 2\ncell.pin.txd = 0x35\n")
            .expect("valid source");
        let resolved = resolve_hardware(Platform::Stm32f4, &overrides).expect("resolved");

        assert_eq!(resolved.config.cell.uart, UartId::new(2));
        assert_eq!(resolved.config.cell.pins.txd, Pin::new(0x35));
        assert_eq!(resolved.source(ParameterId::CellUart), ValueSource::Override);
        assert_eq!(resolved.source(ParameterId::CellPinRxd), ValueSource::Default);
        assert_eq!(resolved.config.cell.pins.rxd, Pin::new(0x0a));
        assert_eq!(resolved.override_count(), 2);
    }

    #[test]
    fn validation_failures_surface_as_config_errors() {
        let error = resolve_source(
            Platform::ZephyrNrf5x,
            "test.cell.module = SARA_R5\ntest.gnss.module = M9\n",
        )
        .expect_err("cell and GNSS share UART 1");
        assert!(matches!(error, ConfigError::Validation(_)));

        let error = resolve_source(
            Platform::Stm32f4,
            "test.cell.module = SARA_R5\ncell.pin.reset = 0x1000\n",
        )
        .expect_err("no GPIO bank 0x100");
        assert_eq!(
            error,
            ConfigError::Validation(ValidationError::NoSuchPin {
                parameter: ParameterId::CellPinReset,
                pin: Pin::new(0x1000),
            })
        );

        let resolved = resolve_source(
            Platform::Stm32f4,
            "test.gnss.module = M8\ngnss.pin.en = 0x4e\n",
        )
        .expect("cellular is off, so PE_14 is free");
        assert_eq!(resolved.hardware.config.gnss.enable, Pin::new(0x4e));

        let error = resolve_source(Platform::ZephyrNrf5x, "test.gnss.module = M10\n")
            .expect_err("unknown module");
        assert!(matches!(error, ConfigError::Overrides(_)));
    }
}
