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

use alloc::string::String;

use thiserror::Error;

/// The error type for numeric command line arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace, a sign or a radix prefix
    #[error("no digits in {0:?}")]
    Empty(String),

    /// A character that is not a digit in the expected radix
    #[error("invalid digit {found:?} in {input:?}")]
    InvalidDigit { input: String, found: char },

    /// Underscore separators must sit between two digits
    #[error("misplaced '_' separator in {0:?}")]
    MisplacedSeparator(String),

    /// The value has a leading minus sign
    #[error("{0:?} is negative")]
    Negative(String),

    /// The value does not fit in the target integer type
    #[error("{input:?} is out of range (max {max})")]
    OutOfRange { input: String, max: u64 },
}
