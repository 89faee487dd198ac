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


//! Overwrite a little-endian `u32` at a byte offset inside a file.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{Span, instrument};

use crate::error::{Result, ToolError};
use crate::new_error;

/// Number of bytes written by a patch
pub const PATCH_WIDTH: u64 = size_of::<u32>() as u64;

/// Seek to `offset` and write `value` as 4 little-endian bytes. Every other
/// byte of `target` is left untouched; writing past the end extends it.
pub fn patch_u32_le<F: Write + Seek>(
    target: &mut F,
    offset: u64,
    value: u32,
) -> std::io::Result<()> {
    target.seek(SeekFrom::Start(offset))?;
    target.write_all(&value.to_le_bytes())?;
    target.flush()
}

/// Patch the file at `path` in place. The file must already exist.
#[instrument(skip_all, parent = Span::current(), level = "Trace")]
pub fn patch_file(path: &Path, offset: u64, value: u32) -> Result<()> {
    if offset.checked_add(PATCH_WIDTH).is_none() {
        return Err(new_error!(
            "offset {} leaves no room for {} bytes",
            offset,
            PATCH_WIDTH
        ));
    }

    let failed = |source| ToolError::PatchFailed {
        path: path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(failed)?;
    let len = file.metadata().map_err(failed)?.len();
    if offset > len {
        log::warn!(
            target: "pagewalk",
            "offset {offset} is past the end of {} ({len} bytes), the gap will be zero-filled",
            path.display()
        );
    }
    patch_u32_le(&mut file, offset, value).map_err(failed)?;
    log::info!(
        target: "pagewalk",
        "wrote {value:#010x} at offset {offset} of {}",
        path.display()
    );
    Ok(())
}
