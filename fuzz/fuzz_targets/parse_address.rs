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


#![no_main]

use libfuzzer_sys::fuzz_target;
use pagewalk_common::parse::parse_address;
use pagewalk_common::{ParseError, decompose};

// Arbitrary text must either parse or fail with one of the documented
// errors; it must never panic. Anything that parses decomposes into fields
// that stay inside their table ranges.
fuzz_target!(|data: &str| {
    match parse_address(data) {
        Ok(parsed) => {
            let d = decompose(parsed.address);
            assert!(d.indices().all(|(_, index)| index < 512));
            assert!(d.data < 4096);
        }
        Err(
            ParseError::Empty(_)
            | ParseError::InvalidDigit { .. }
            | ParseError::MisplacedSeparator(_)
            | ParseError::Negative(_),
        ) => {}
        Err(e) => panic!("unexpected error for hex address {data:?}: {e:?}"),
    }
});
