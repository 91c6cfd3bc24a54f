use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Header segments rendered in front of every line.
///
/// The numeric values match the classic `log` flag layout, so raw values
/// read from configuration (`HLOG_FLAGS=3`) keep their meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    /// The date in the logger's time zone: `2009/01/23`.
    pub const DATE: Flags = Flags(1);
    /// The time in the logger's time zone: `01:23:23`.
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full file name and line number: `/a/b/c/d.rs:23`.
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final file name element and line number: `d.rs:23`. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Render date and time in UTC rather than the timestamp's own offset.
    pub const UTC: Flags = Flags(1 << 5);
    /// Initial value for new loggers.
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    pub const fn empty() -> Self {
        Flags(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Unknown bits are kept and ignored when rendering.
    pub const fn from_bits_retain(bits: u32) -> Self {
        Flags(bits)
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub(crate) const fn wants_location(self) -> bool {
        self.intersects(Flags(Self::LONG_FILE.0 | Self::SHORT_FILE.0))
    }

    pub(crate) const fn wants_clock(self) -> bool {
        self.intersects(Flags(Self::TIME.0 | Self::MICROSECONDS.0))
    }
}

impl BitOr for Flags {
    type Output = Flags;
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;
    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl From<u32> for Flags {
    fn from(bits: u32) -> Self {
        Flags::from_bits_retain(bits)
    }
}

/// Raw value that switches the debug gate on.
pub const DEBUG_ON: i32 = 1;

/// Switch controlling whether debug-level lines are emitted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugGate {
    #[default]
    Off,
    On,
}

impl DebugGate {
    /// Only [`DEBUG_ON`] opens the gate; every other value keeps it closed.
    pub fn from_raw(raw: i32) -> Self {
        if raw == DEBUG_ON {
            DebugGate::On
        } else {
            DebugGate::Off
        }
    }

    pub fn is_on(self) -> bool {
        self == DebugGate::On
    }
}

impl From<bool> for DebugGate {
    fn from(on: bool) -> Self {
        if on { DebugGate::On } else { DebugGate::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values() {
        assert_eq!(Flags::DATE.bits(), 1);
        assert_eq!(Flags::TIME.bits(), 2);
        assert_eq!(Flags::MICROSECONDS.bits(), 4);
        assert_eq!(Flags::LONG_FILE.bits(), 8);
        assert_eq!(Flags::SHORT_FILE.bits(), 16);
        assert_eq!(Flags::UTC.bits(), 32);
        assert_eq!(Flags::STD, Flags::DATE | Flags::TIME);
        assert_eq!(Flags::from(3), Flags::STD);
    }

    #[test]
    fn test_combining_flags() {
        let mut flags = Flags::empty();
        assert!(flags.is_empty());
        flags |= Flags::DATE;
        flags |= Flags::SHORT_FILE;
        assert!(!flags.is_empty());
        assert_eq!(flags.bits(), 17);
        assert!(flags.contains(Flags::SHORT_FILE));
        assert!(!flags.contains(Flags::STD));
        assert_eq!(flags & Flags::STD, Flags::DATE);
        assert_eq!(Flags::from_bits_retain(1 << 9).bits(), 512);
    }

    #[test]
    fn test_location_and_clock_queries() {
        assert!(!Flags::STD.wants_location());
        assert!(Flags::SHORT_FILE.wants_location());
        assert!((Flags::LONG_FILE | Flags::SHORT_FILE).wants_location());
        assert!(Flags::MICROSECONDS.wants_clock());
        assert!(!Flags::DATE.wants_clock());
    }

    #[test]
    fn test_debug_gate_from_raw() {
        assert_eq!(DebugGate::from_raw(DEBUG_ON), DebugGate::On);
        assert_eq!(DebugGate::from_raw(0), DebugGate::Off);
        assert_eq!(DebugGate::from_raw(2), DebugGate::Off);
        assert!(DebugGate::from(true).is_on());
    }
}
