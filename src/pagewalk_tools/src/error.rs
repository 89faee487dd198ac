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


use pagewalk_common::ParseError;
use thiserror::Error;

/// Process exit code for a malformed command line
pub const EXIT_USAGE: u8 = 1;
/// Process exit code for an argument that could not be converted
pub const EXIT_INVALID_ARGUMENT: u8 = 2;
/// Process exit code for a failed file operation
pub const EXIT_IO: u8 = 3;
/// Process exit code for a failure to set up the tool itself
pub const EXIT_INTERNAL: u8 = 4;

/// The error type for pagewalk tool invocations
#[derive(Error, Debug)]
pub enum ToolError {
    /// A generic error with a message
    #[error("{0}")]
    Error(String),

    /// Reading Writing or Seeking data failed.
    #[error("Reading Writing or Seeking data failed {0:?}")]
    IOError(#[from] std::io::Error),

    /// The logger could not be installed
    #[error("failed to install logger: {0}")]
    LoggerInitFailed(String),

    /// An argument that has to be text is not valid UTF-8
    #[error("argument {0:?} is not valid UTF-8")]
    NonUtf8Argument(std::ffi::OsString),

    /// A numeric argument could not be parsed
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ParseError),

    /// Patching the target file failed
    #[error("failed to patch {path}: {source}")]
    PatchFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Too few or too many positional arguments
    #[error("expected {expected} argument(s), got {got}")]
    WrongArgumentCount { expected: usize, got: usize },
}

impl ToolError {
    /// The process exit code this error terminates the tool with.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::WrongArgumentCount { .. } => EXIT_USAGE,
            ToolError::Error(_)
            | ToolError::InvalidArgument(_)
            | ToolError::NonUtf8Argument(_) => EXIT_INVALID_ARGUMENT,
            ToolError::IOError(_) | ToolError::PatchFailed { .. } => EXIT_IO,
            ToolError::LoggerInitFailed(_) => EXIT_INTERNAL,
        }
    }

    /// Usage errors are answered with the usage line rather than a diagnostic.
    pub fn is_usage_error(&self) -> bool {
        self.exit_code() == EXIT_USAGE
    }
}

/// The result type for pagewalk tool invocations
pub type Result<T> = core::result::Result<T, ToolError>;

/// Creates a `ToolError::Error` from a string literal or format string
#[macro_export]
macro_rules! new_error {
    ($msg:literal $(,)?) => {{
        let __args = std::format_args!($msg);
        let __err_msg = match __args.as_str() {
            Some(msg) => String::from(msg),
            None => std::format!($msg),
        };
        $crate::error::ToolError::Error(__err_msg)
    }};
    ($fmtstr:expr, $($arg:tt)*) => {{
           let __err_msg = std::format!($fmtstr, $($arg)*);
           $crate::error::ToolError::Error(__err_msg)
    }};
}
