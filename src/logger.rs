use std::io::Write;

use log::{
    set_boxed_logger,
    set_max_level,
    LevelFilter,
    Log,
    Metadata,
    Record,
};

/**
An implementation of `Log` that writes to standard error.

Standard output is left for the records a run prints, so diagnostics
never get mixed into them.
*/
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    fn format(record: &Record) -> String {
        format!("{:<5} {}: {}", record.level(), record.target(), record.args())
    }
}

impl Log for Logger {
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let stderr = std::io::stderr();
        let mut stderr = stderr.lock();

        let _ = writeln!(stderr, "{}", Logger::format(record));
    }

    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

pub fn init(level: LevelFilter) {
    // A logger may already be installed, in which case we keep using it
    if set_boxed_logger(Box::new(Logger { level })).is_ok() {
        set_max_level(level);
    }
}
