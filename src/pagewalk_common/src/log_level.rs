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


/// Log level filter for the stderr logger of the tools.
///
/// NOTE: This is converted to `log::LevelFilter` by matching rather than
/// casting, the discriminants of the two enums are not guaranteed to agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogFilter {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogFilter> for log::LevelFilter {
    fn from(filter: LogFilter) -> Self {
        match filter {
            LogFilter::Off => log::LevelFilter::Off,
            LogFilter::Error => log::LevelFilter::Error,
            LogFilter::Warn => log::LevelFilter::Warn,
            LogFilter::Info => log::LevelFilter::Info,
            LogFilter::Debug => log::LevelFilter::Debug,
            LogFilter::Trace => log::LevelFilter::Trace,
        }
    }
}
