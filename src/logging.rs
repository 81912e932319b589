use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use env_logger::{Builder, Env, Target};
use log::{warn, Level};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Installs the global logger.
///
/// The filter defaults to `info` and honours `RUST_LOG`. With `debug_log` set,
/// records are appended to that file instead of stderr.
pub fn init(debug_log: Option<&Path>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        format_line(buf, Local::now().naive_local(), record.level(), record.args())
    });

    let mut open_failure = None;
    if let Some(path) = debug_log {
        match open_target(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(err) => open_failure = Some((path, err)),
        }
    }

    if builder.try_init().is_err() {
        return;
    }

    if let Some((path, err)) = open_failure {
        warn!(
            "Could not open debug log {}, logging to stderr: {}",
            path.display(),
            err
        );
    }
}

/// Writes one record as `[YYYY-MM-DD HH:MM:SS] LEVEL message`.
fn format_line(
    out: &mut impl Write,
    at: NaiveDateTime,
    level: Level,
    args: &fmt::Arguments<'_>,
) -> io::Result<()> {
    writeln!(out, "[{}] {:<5} {}", at.format(TIMESTAMP_FORMAT), level, args)
}

/// Opens the debug log for appending, creating it when missing.
fn open_target(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::PathBuf;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(8, 5, 3))
            .unwrap()
    }

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("codeviz-log-{}-{}", std::process::id(), name))
    }

    #[test]
    fn line_has_timestamp_padded_level_and_message() {
        let mut buf = Vec::new();
        format_line(&mut buf, stamp(), Level::Info, &format_args!("Reading {}", "x.rs")).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[2026-10-19 08:05:03] INFO  Reading x.rs\n"
        );

        let mut buf = Vec::new();
        format_line(&mut buf, stamp(), Level::Error, &format_args!("boom")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[2026-10-19 08:05:03] ERROR boom\n");
    }

    #[test]
    fn debug_log_is_appended_not_truncated() {
        let path = temp_log("append.log");
        fs::write(&path, "earlier run\n").unwrap();

        let mut file = open_target(&path).unwrap();
        format_line(&mut file, stamp(), Level::Warn, &format_args!("later run")).unwrap();
        drop(file);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "earlier run\n[2026-10-19 08:05:03] WARN  later run\n"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn debug_log_is_created_when_missing() {
        let path = temp_log("fresh.log");
        let _ = fs::remove_file(&path);

        open_target(&path).unwrap();
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test_log::test]
    fn unopenable_debug_log_falls_back_to_stderr() {
        let path = temp_log("missing-dir").join("nested").join("debug.log");
        assert!(open_target(&path).is_err());

        // The global logger is already installed here, so this only has to
        // survive the failed open without panicking.
        init(Some(&path));
        assert!(!path.exists());
    }
}
