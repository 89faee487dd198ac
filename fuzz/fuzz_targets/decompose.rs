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
use pagewalk_common::{PagingLayout, decompose};

// The fixed extractor and the layout-driven one agree, and the translated
// bits of every address survive a decompose/reassemble cycle.
fuzz_target!(|address: u64| {
    let layout = PagingLayout::X86_64_4LEVEL;
    let d = decompose(address);
    assert_eq!(layout.decompose(address), d);
    assert_eq!(d.to_address(), address & layout.address_mask());
});
