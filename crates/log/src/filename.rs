//! Default log file naming.

use chrono::{DateTime, Local, TimeZone};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

const FALLBACK_PROGRAM: &str = "petal";
const TIME_FORMAT: &str = "%Y-%m-%d_%Hh%Mm%Ss";

/// Log filename for the running process, stamped with the local time.
///
/// For a binary `/usr/bin/server` started at 15:04:05 on 2006-01-02 this is
/// `server_2006-01-02_15h04m05s.log`.
pub fn std_filename() -> String {
    let program = std::env::args_os().next();
    let program = program
        .as_deref()
        .map_or_else(|| Path::new(FALLBACK_PROGRAM), Path::new);
    std_filename_for(program, &Local::now())
}

/// Log filename for `program` at `time`.
pub fn std_filename_for<Tz>(program: impl AsRef<Path>, time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let stem = program
        .as_ref()
        .file_stem()
        .map_or_else(|| Cow::Borrowed(FALLBACK_PROGRAM), |stem| stem.to_string_lossy());
    format!("{stem}_{}.log", time.format(TIME_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn filename_uses_program_stem_and_time() {
        let time = Utc
            .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
            .single()
            .unwrap_or_default();

        assert_eq!(
            std_filename_for("/usr/local/bin/server.exe", &time),
            "server_2006-01-02_15h04m05s.log"
        );
        assert_eq!(
            std_filename_for("tool", &time),
            "tool_2006-01-02_15h04m05s.log"
        );
        assert_eq!(std_filename_for("", &time), "petal_2006-01-02_15h04m05s.log");
    }

    #[test]
    fn running_process_gets_a_log_name() {
        let name = std_filename();
        assert!(name.ends_with(".log"));
        assert!(name.contains('_'));
    }
}
