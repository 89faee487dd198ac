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


use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};

pub mod simplelogger;

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Create a file with `contents` in the system temp directory and return its
/// path. Names are unique per process and per call so tests can run in
/// parallel; callers remove the file when done.
pub fn scratch_file(stem: &str, contents: &[u8]) -> Result<PathBuf> {
    let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "pagewalk-{stem}-{}-{n}.bin",
        std::process::id()
    ));
    fs::write(&path, contents)
        .with_context(|| format!("failed to create scratch file {}", path.display()))?;
    Ok(path)
}

/// Read back a scratch file created by [`scratch_file`].
pub fn read_scratch_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read scratch file {}", path.display()))
}
