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


#![cfg_attr(not(any(test, debug_assertions)), warn(clippy::panic))]
#![cfg_attr(not(any(test, debug_assertions)), warn(clippy::expect_used))]
#![cfg_attr(not(any(test, debug_assertions)), warn(clippy::unwrap_used))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

/// The error type for parsing numeric arguments
pub mod error;

/// Log level filter for the `log` facade
pub mod log_level;

/// Parsing of hexadecimal addresses and decimal offsets/values as typed on a
/// command line
pub mod parse;

/// The x86-64 paging layout and the decomposition of a virtual address into
/// page table indices
pub mod vmem;

pub use error::ParseError;
pub use vmem::{Decomposition, Level, PagingLayout, VirtAddr, decompose};
