/*
Copyright 2025  The Pagewalk Authors.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/


use std::io::Write;

use log::{Log, Metadata, Record, set_logger, set_max_level};
use pagewalk_common::log_level::LogFilter;

use crate::error::{Result, ToolError};

static LOGGER: StderrLogger = StderrLogger {};

/// Writes log records to stderr so that stdout only ever carries tool output.
pub struct StderrLogger {}

impl StderrLogger {
    fn format(record: &Record) -> String {
        format!(
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

/// Install the stderr logger with the given filter. May only be called once
/// per process.
pub fn init(filter: LogFilter) -> Result<()> {
    set_logger(&LOGGER).map_err(|e| ToolError::LoggerInitFailed(e.to_string()))?;
    set_max_level(filter.into());
    Ok(())
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        // Nowhere left to report a failure to write a log line
        let _ = writeln!(stderr, "{}", Self::format(record));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
