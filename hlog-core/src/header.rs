use std::panic::Location;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike};

use crate::{flags::Flags, itoa::itoa};

/// Source position a line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> Caller<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Placeholder used when the call site cannot be resolved.
    pub fn unknown() -> Caller<'static> {
        Caller {
            file: "???",
            line: 0,
        }
    }
}

impl From<&'static Location<'static>> for Caller<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Caller {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Final path element of `file`. A separator at index 0 is not a cut point,
/// so `/main.rs` stays as is.
pub fn short_file(file: &str) -> &str {
    file.char_indices()
        .rev()
        .find(|&(i, c)| i > 0 && (c == '/' || c == '\\'))
        .map_or(file, |(i, _)| &file[i + 1..])
}

/// Appends `<prefix><date><time><location>` to `buf`.
///
/// Segments whose flag is not set are left out entirely. `caller` is only
/// consulted when a file flag is set; `None` renders as `???:0`.
pub fn format_header(
    buf: &mut Vec<u8>,
    prefix: &str,
    time: DateTime<FixedOffset>,
    caller: Option<Caller<'_>>,
    flags: Flags,
) {
    buf.extend_from_slice(prefix.as_bytes());
    if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
        let time: NaiveDateTime = if flags.contains(Flags::UTC) {
            time.naive_utc()
        } else {
            time.naive_local()
        };
        if flags.contains(Flags::DATE) {
            itoa(buf, time.year().max(0) as u64, 4);
            buf.push(b'/');
            itoa(buf, time.month() as u64, 2);
            buf.push(b'/');
            itoa(buf, time.day() as u64, 2);
            buf.push(b' ');
        }
        if flags.wants_clock() {
            itoa(buf, time.hour() as u64, 2);
            buf.push(b':');
            itoa(buf, time.minute() as u64, 2);
            buf.push(b':');
            itoa(buf, time.second() as u64, 2);
            if flags.contains(Flags::MICROSECONDS) {
                buf.push(b'.');
                // leap seconds report nanoseconds past 1e9
                let micros = (time.nanosecond() / 1_000).min(999_999);
                itoa(buf, micros as u64, 6);
            }
            buf.push(b' ');
        }
    }
    if flags.wants_location() {
        let caller = caller.unwrap_or(Caller::unknown());
        let file = if flags.contains(Flags::SHORT_FILE) {
            short_file(caller.file)
        } else {
            caller.file
        };
        buf.extend_from_slice(file.as_bytes());
        buf.push(b':');
        itoa(buf, caller.line as u64, -1);
        buf.extend_from_slice(b": ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn render(prefix: &str, time: &str, caller: Option<Caller<'_>>, flags: Flags) -> String {
        let mut buf = Vec::new();
        format_header(&mut buf, prefix, at(time), caller, flags);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_date_only() {
        let header = render("", "2024-03-07T01:02:03Z", None, Flags::DATE);
        assert_eq!(header, "2024/03/07 ");
        assert_eq!(header.len(), 11);
    }

    #[test]
    fn test_date_and_time() {
        assert_eq!(
            render("", "2024-03-07T01:02:03Z", None, Flags::STD),
            "2024/03/07 01:02:03 "
        );
    }

    #[test]
    fn test_microseconds_imply_time() {
        assert_eq!(
            render("", "2024-03-07T01:02:03.000042Z", None, Flags::MICROSECONDS),
            "01:02:03.000042 "
        );
        assert_eq!(
            render(
                "",
                "2024-03-07T01:02:03.123456789Z",
                None,
                Flags::TIME | Flags::MICROSECONDS
            ),
            "01:02:03.123456 "
        );
    }

    #[test]
    fn test_prefix_comes_first() {
        assert_eq!(
            render("[X] ", "2024-01-02T03:04:05Z", None, Flags::STD),
            "[X] 2024/01/02 03:04:05 "
        );
        assert_eq!(render("[X] ", "2024-01-02T03:04:05Z", None, Flags::empty()), "[X] ");
    }

    #[test]
    fn test_utc_conversion() {
        let time = "2024-01-01T01:30:00+02:00";
        assert_eq!(render("", time, None, Flags::STD), "2024/01/01 01:30:00 ");
        assert_eq!(
            render("", time, None, Flags::STD | Flags::UTC),
            "2023/12/31 23:30:00 "
        );
    }

    #[test]
    fn test_long_and_short_file() {
        let caller = Some(Caller::new("src/net/conn.rs", 123));
        assert_eq!(
            render("", "2024-01-02T03:04:05Z", caller, Flags::LONG_FILE),
            "src/net/conn.rs:123: "
        );
        assert_eq!(
            render("", "2024-01-02T03:04:05Z", caller, Flags::SHORT_FILE),
            "conn.rs:123: "
        );
        assert_eq!(
            render(
                "",
                "2024-01-02T03:04:05Z",
                caller,
                Flags::LONG_FILE | Flags::SHORT_FILE
            ),
            "conn.rs:123: "
        );
    }

    #[test]
    fn test_unknown_caller() {
        assert_eq!(
            render("", "2024-01-02T03:04:05Z", None, Flags::SHORT_FILE),
            "???:0: "
        );
    }

    #[test]
    fn test_full_header_order() {
        let caller = Some(Caller::new("/a/b/main.rs", 9));
        assert_eq!(
            render(
                "[INFO] ",
                "2024-01-02T03:04:05.000006Z",
                caller,
                Flags::STD | Flags::MICROSECONDS | Flags::SHORT_FILE
            ),
            "[INFO] 2024/01/02 03:04:05.000006 main.rs:9: "
        );
    }

    #[test]
    fn test_short_file() {
        assert_eq!(short_file("a/b/c.rs"), "c.rs");
        assert_eq!(short_file("c.rs"), "c.rs");
        assert_eq!(short_file("/c.rs"), "/c.rs");
        assert_eq!(short_file("src\\win\\c.rs"), "c.rs");
    }

    #[test]
    fn test_location_from_track_caller() {
        let caller = Caller::from(Location::caller());
        assert!(caller.file.ends_with("header.rs"));
        assert!(caller.line > 0);
    }
}
