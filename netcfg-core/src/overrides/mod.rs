//! Build-level overrides: typed values that replace platform defaults and the
//! module selectors that switch network types on.
//!
//! An [`Overrides`] set binds at most one value per key. Binding a key twice is
//! rejected so a resolved parameter always has exactly one source.

use core::fmt;
use core::time::Duration;

use heapless::String;

use crate::hardware::KindMismatch;
use crate::network::{CellModuleType, GnssModuleType, ShortRangeModuleType, ShortRangeRole};
use crate::params::{self, ParameterId, ParameterKind, ParameterValue};
use crate::pins::{Pin, UartId, ValueError};
use crate::selection::{SelectorId, TestSelection, ValueKind};

pub mod parser;

pub use parser::{Assignment, RawValue, SyntaxError, parse_line};

/// Reasons an override assignment is refused.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OverrideError {
    UnknownKey,
    WrongValueType { expected: ValueKind },
    UnknownName,
    InvalidValue(ValueError),
    TooLong { max: usize },
    OutOfRange,
    Duplicate,
    KindMismatch(KindMismatch),
    Syntax(SyntaxError),
}

impl From<ValueError> for OverrideError {
    fn from(error: ValueError) -> Self {
        OverrideError::InvalidValue(error)
    }
}

impl From<SyntaxError> for OverrideError {
    fn from(error: SyntaxError) -> Self {
        OverrideError::Syntax(error)
    }
}

impl From<KindMismatch> for OverrideError {
    fn from(error: KindMismatch) -> Self {
        OverrideError::KindMismatch(error)
    }
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideError::UnknownKey => f.write_str("unknown key"),
            OverrideError::WrongValueType { expected } => write!(f, "expected {expected}"),
            OverrideError::UnknownName => f.write_str("unknown module or role name"),
            OverrideError::InvalidValue(error) => write!(f, "{error}"),
            OverrideError::TooLong { max } => write!(f, "longer than {max} bytes"),
            OverrideError::OutOfRange => f.write_str("value out of range"),
            OverrideError::Duplicate => f.write_str("key already overridden"),
            OverrideError::KindMismatch(mismatch) => {
                write!(f, "{} cannot hold a {:?} value", mismatch.parameter, mismatch.found)
            }
            OverrideError::Syntax(error) => write!(f, "{error}"),
        }
    }
}

/// Override error tagged with the 1-based source line it came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OverrideFileError {
    pub line: usize,
    pub error: OverrideError,
}

impl fmt::Display for OverrideFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Key understood by [`Overrides::apply`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OverrideKey {
    Parameter(ParameterId),
    Selector(SelectorId),
}

impl OverrideKey {
    /// Looks up a parameter or selector key (case insensitive).
    #[must_use]
    pub fn find(key: &str) -> Option<Self> {
        params::find(key)
            .map(|spec| OverrideKey::Parameter(spec.id))
            .or_else(|| SelectorId::find(key).map(OverrideKey::Selector))
    }
}

/// Set of overrides collected from one or more sources.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Overrides {
    parameters: [Option<ParameterValue>; ParameterId::COUNT],
    selection: TestSelection,
    selectors: [bool; SelectorId::COUNT],
}

impl Overrides {
    /// Empty set: every parameter falls back to its default and no network
    /// type is selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: [None; ParameterId::COUNT],
            selection: TestSelection::new(),
            selectors: [false; SelectorId::COUNT],
        }
    }

    /// Parses a whole override source.
    pub fn from_source(source: &str) -> Result<Self, OverrideFileError> {
        let mut overrides = Self::new();
        overrides.load_source(source)?;
        Ok(overrides)
    }

    /// Applies every assignment in `source`, stopping at the first bad line.
    /// Lines before the failing one stay applied.
    pub fn load_source(&mut self, source: &str) -> Result<usize, OverrideFileError> {
        let mut applied = 0;
        for (index, line) in source.lines().enumerate() {
            let tag = |error| OverrideFileError {
                line: index + 1,
                error,
            };
            let Some(assignment) = parse_line(line).map_err(|error| tag(error.into()))? else {
                continue;
            };
            self.apply(assignment.key, assignment.value).map_err(tag)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Binds `value` to `key`.
    pub fn apply(&mut self, key: &str, value: RawValue<'_>) -> Result<(), OverrideError> {
        match OverrideKey::find(key).ok_or(OverrideError::UnknownKey)? {
            OverrideKey::Parameter(id) => {
                let value = parameter_value(id.kind(), value)?;
                self.set_parameter(id, value)
            }
            OverrideKey::Selector(id) => self.set_selector(id, value),
        }
    }

    /// Binds a typed value to a hardware parameter.
    pub fn set_parameter(
        &mut self,
        id: ParameterId,
        value: ParameterValue,
    ) -> Result<(), OverrideError> {
        if value.kind() != id.kind() {
            return Err(OverrideError::KindMismatch(KindMismatch {
                parameter: id,
                found: value.kind(),
            }));
        }
        let slot = &mut self.parameters[id.as_index()];
        if slot.is_some() {
            return Err(OverrideError::Duplicate);
        }
        *slot = Some(value);
        Ok(())
    }

    /// Sets a module selector or cellular test setting.
    pub fn set_selector(
        &mut self,
        id: SelectorId,
        value: RawValue<'_>,
    ) -> Result<(), OverrideError> {
        if self.selectors[id.as_index()] {
            return Err(OverrideError::Duplicate);
        }
        let expected = id.value_kind();
        let wrong = OverrideError::WrongValueType { expected };
        let selection = &mut self.selection;
        match (id, value) {
            (SelectorId::CellModule, RawValue::Name(name)) => {
                selection.cell_module =
                    Some(CellModuleType::from_name(name).ok_or(OverrideError::UnknownName)?);
            }
            (SelectorId::ShortRangeModule, RawValue::Name(name)) => {
                selection.short_range_module =
                    Some(ShortRangeModuleType::from_name(name).ok_or(OverrideError::UnknownName)?);
            }
            (SelectorId::WifiModule, RawValue::Name(name)) => {
                selection.wifi_module =
                    Some(ShortRangeModuleType::from_name(name).ok_or(OverrideError::UnknownName)?);
            }
            (SelectorId::GnssModule, RawValue::Name(name)) => {
                selection.gnss_module =
                    Some(GnssModuleType::from_name(name).ok_or(OverrideError::UnknownName)?);
            }
            (SelectorId::BleInternal, RawValue::Boolean(enabled)) => {
                selection.ble_internal = enabled;
            }
            (SelectorId::CellSimPin, RawValue::Text(text)) => {
                selection.cell.sim_pin = Some(bounded(text)?);
            }
            (SelectorId::CellApn, RawValue::Text(text)) => {
                selection.cell.apn = Some(bounded(text)?);
            }
            (SelectorId::CellConnectTimeout, RawValue::Integer(seconds)) => {
                let seconds = u64::try_from(seconds).map_err(|_| OverrideError::OutOfRange)?;
                selection.cell.connect_timeout = Duration::from_secs(seconds);
            }
            _ => return Err(wrong),
        }
        self.selectors[id.as_index()] = true;
        Ok(())
    }

    /// Drops any override bound to `key`. Returns `false` when nothing was
    /// bound.
    pub fn unset(&mut self, key: &str) -> Result<bool, OverrideError> {
        match OverrideKey::find(key).ok_or(OverrideError::UnknownKey)? {
            OverrideKey::Parameter(id) => Ok(self.parameters[id.as_index()].take().is_some()),
            OverrideKey::Selector(id) => Ok(self.clear_selector(id)),
        }
    }

    fn clear_selector(&mut self, id: SelectorId) -> bool {
        let was_set = core::mem::replace(&mut self.selectors[id.as_index()], false);
        let defaults = TestSelection::new();
        let selection = &mut self.selection;
        match id {
            SelectorId::CellModule => selection.cell_module = None,
            SelectorId::ShortRangeModule => selection.short_range_module = None,
            SelectorId::BleInternal => selection.ble_internal = false,
            SelectorId::WifiModule => selection.wifi_module = None,
            SelectorId::GnssModule => selection.gnss_module = None,
            SelectorId::CellSimPin => selection.cell.sim_pin = None,
            SelectorId::CellApn => selection.cell.apn = None,
            SelectorId::CellConnectTimeout => {
                selection.cell.connect_timeout = defaults.cell.connect_timeout;
            }
        }
        was_set
    }

    /// Override bound to `id`, if any.
    #[must_use]
    pub fn parameter(&self, id: ParameterId) -> Option<ParameterValue> {
        self.parameters[id.as_index()]
    }

    /// Iterates over the overridden parameters in catalog order.
    pub fn parameters(&self) -> impl Iterator<Item = (ParameterId, ParameterValue)> + '_ {
        params::parameters()
            .iter()
            .filter_map(|spec| self.parameter(spec.id).map(|value| (spec.id, value)))
    }

    #[must_use]
    pub fn is_selector_set(&self, id: SelectorId) -> bool {
        self.selectors[id.as_index()]
    }

    /// Module selection and cellular settings gathered so far.
    #[must_use]
    pub fn selection(&self) -> &TestSelection {
        &self.selection
    }

    /// Returns `true` when no key has been bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.iter().all(Option::is_none) && !self.selectors.iter().any(|set| *set)
    }
}

impl Default for Overrides {
    fn default() -> Self {
        Self::new()
    }
}

fn parameter_value(
    kind: ParameterKind,
    value: RawValue<'_>,
) -> Result<ParameterValue, OverrideError> {
    match (kind, value) {
        (ParameterKind::Uart, RawValue::Integer(raw)) => {
            Ok(ParameterValue::Uart(UartId::from_raw(raw)?))
        }
        (ParameterKind::Pin, RawValue::Integer(raw)) => {
            Ok(ParameterValue::Pin(Pin::from_raw(raw)?))
        }
        (ParameterKind::Role, RawValue::Integer(raw)) => {
            Ok(ParameterValue::Role(ShortRangeRole::from_raw(raw)?))
        }
        (ParameterKind::Role, RawValue::Name(name)) => ShortRangeRole::from_name(name)
            .map(ParameterValue::Role)
            .ok_or(OverrideError::UnknownName),
        _ => Err(OverrideError::WrongValueType {
            expected: ValueKind::Integer,
        }),
    }
}

fn bounded<const N: usize>(text: &str) -> Result<String<N>, OverrideError> {
    let mut bounded = String::new();
    bounded
        .push_str(text)
        .map_err(|_| OverrideError::TooLong { max: N })?;
    Ok(bounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_binds_parameters_and_selectors() {
        let overrides = Overrides::from_source(
            "# C030-U201\n\
             test.cell.module = SARA_U201\n\
             cell.uart = 2\n\
             cell.pin.txd = 0x35\n\
             \n\
             test.cell.apn = \"internet\"\n",
        )
        .expect("valid source");

        assert_eq!(
            overrides.parameter(ParameterId::CellUart),
            Some(ParameterValue::Uart(UartId::new(2)))
        );
        assert_eq!(
            overrides.parameter(ParameterId::CellPinTxd),
            Some(ParameterValue::Pin(Pin::new(0x35)))
        );
        assert_eq!(overrides.parameter(ParameterId::CellPinRxd), None);
        assert_eq!(
            overrides.selection().cell_module,
            Some(CellModuleType::SaraU201)
        );
        assert_eq!(overrides.selection().cell.apn.as_deref(), Some("internet"));
        assert_eq!(overrides.parameters().count(), 2);
    }

    #[test]
    fn duplicate_keys_are_rejected_with_line_numbers() {
        let error = Overrides::from_source("cell.uart = 2\ncell.uart = 3\n")
            .expect_err("duplicate key");
        assert_eq!(
            error,
            OverrideFileError {
                line: 2,
                error: OverrideError::Duplicate,
            }
        );
    }

    #[test]
    fn unknown_keys_and_syntax_errors_are_reported() {
        let error = Overrides::from_source("\ncell.pin.dtr = 4\n").expect_err("unknown key");
        assert_eq!(error.line, 2);
        assert_eq!(error.error, OverrideError::UnknownKey);

        let error = Overrides::from_source("cell.uart 2").expect_err("missing equals");
        assert_eq!(
            error.error,
            OverrideError::Syntax(SyntaxError { column: 11 })
        );
    }

    #[test]
    fn values_are_checked_against_the_parameter_kind() {
        let mut overrides = Overrides::new();
        assert_eq!(
            overrides.apply("cell.pin.txd", RawValue::Integer(-2)),
            Err(OverrideError::InvalidValue(ValueError::PinOutOfRange(-2)))
        );
        assert_eq!(
            overrides.apply("short_range.role", RawValue::Integer(3)),
            Err(OverrideError::InvalidValue(ValueError::RoleOutOfRange(3)))
        );
        assert_eq!(
            overrides.apply("cell.uart", RawValue::Text("1")),
            Err(OverrideError::WrongValueType {
                expected: ValueKind::Integer
            })
        );
        assert_eq!(
            overrides.apply("test.ble.internal", RawValue::Integer(1)),
            Err(OverrideError::WrongValueType {
                expected: ValueKind::Boolean
            })
        );
        assert!(overrides.is_empty());
    }

    #[test]
    fn role_accepts_keyword_or_number() {
        let mut overrides = Overrides::new();
        overrides
            .apply("short_range.role", RawValue::Name("central"))
            .expect("keyword role");
        assert_eq!(
            overrides.parameter(ParameterId::ShortRangeRole),
            Some(ParameterValue::Role(ShortRangeRole::Central))
        );
    }

    #[test]
    fn long_text_is_refused() {
        let mut overrides = Overrides::new();
        assert_eq!(
            overrides.apply("test.cell.sim_pin", RawValue::Text("123456789")),
            Err(OverrideError::TooLong { max: 8 })
        );
        assert!(!overrides.is_selector_set(SelectorId::CellSimPin));
    }

    #[test]
    fn unset_restores_the_default() {
        let mut overrides = Overrides::new();
        overrides
            .apply("test.cell.connect_timeout_s", RawValue::Integer(30))
            .expect("timeout");
        overrides
            .apply("gnss.uart", RawValue::Integer(2))
            .expect("uart");

        assert_eq!(overrides.unset("test.cell.connect_timeout_s"), Ok(true));
        assert_eq!(
            overrides.selection().cell.connect_timeout,
            crate::selection::DEFAULT_CONNECT_TIMEOUT
        );
        assert_eq!(overrides.unset("gnss.uart"), Ok(true));
        assert_eq!(overrides.unset("gnss.uart"), Ok(false));
        assert!(overrides.is_empty());

        overrides
            .apply("gnss.uart", RawValue::Integer(3))
            .expect("rebinding after unset");
    }
}
