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


//! Argument handling shared by the pagewalk binaries.
//!
//! Each tool takes a fixed number of positional arguments and nothing else.
//! Arguments stay `OsString` until a tool needs them as text, so file names
//! that are not valid UTF-8 reach the file system unchanged.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use pagewalk_common::parse::{parse_address, parse_decimal_u32, parse_decimal_u64};
use pagewalk_common::{PagingLayout, decompose};
use tracing::{Span, instrument};

use crate::config::ToolConfig;
use crate::error::{Result, ToolError};
use crate::{logger, patch};

/// A command line tool: its name, positional arguments and body.
pub struct Tool {
    pub name: &'static str,
    /// Shown after the program name in the usage line
    pub usage_args: &'static str,
    pub positional: usize,
    pub command: fn(&Invocation, &mut dyn Write) -> Result<()>,
}

/// Decompose a virtual address into page table indices
pub const PAGETABLE: Tool = Tool {
    name: "pagetable",
    usage_args: "0x[address]",
    positional: 1,
    command: pagetable,
};

/// Overwrite a little-endian u32 inside a binary file
pub const PATCH_BIN_INT: Tool = Tool {
    name: "patch_bin_int",
    usage_args: "[filename] [offset] [uint32 to write]",
    positional: 3,
    command: patch_bin_int,
};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: ToolConfig,
    pub positional: Vec<OsString>,
}

fn as_text(arg: &OsStr) -> Result<&str> {
    arg.to_str()
        .ok_or_else(|| ToolError::NonUtf8Argument(arg.to_os_string()))
}

impl Tool {
    pub fn usage(&self, program: &str) -> String {
        format!("usage: {program} {}", self.usage_args)
    }

    /// Check the arguments following the program name.
    pub fn parse_args<I: IntoIterator<Item = OsString>>(&self, args: I) -> Result<Invocation> {
        let positional: Vec<OsString> = args.into_iter().collect();
        if positional.len() != self.positional {
            return Err(ToolError::WrongArgumentCount {
                expected: self.positional,
                got: positional.len(),
            });
        }
        Ok(Invocation {
            config: ToolConfig::default(),
            positional,
        })
    }
}

fn dispatch<W: Write>(
    tool: &Tool,
    args: impl IntoIterator<Item = OsString>,
    out: &mut W,
    on_config: impl FnOnce(&ToolConfig) -> Result<()>,
) -> Result<()> {
    let invocation = tool.parse_args(args)?;
    on_config(&invocation.config)?;
    (tool.command)(&invocation, out)
}

fn report<W: Write, E: Write>(
    tool: &Tool,
    program: &str,
    error: &ToolError,
    out: &mut W,
    err: &mut E,
) -> u8 {
    log::debug!(target: "pagewalk", "{program} failed: {error:?}");
    // The process is about to exit, failures to print are not actionable
    if error.is_usage_error() {
        let _ = writeln!(out, "{}", tool.usage(program));
    } else {
        let _ = writeln!(err, "error: {error}");
    }
    error.exit_code()
}

/// Run `tool` over a full argument list (program name first) and return the
/// process exit code. Tool output goes to `out`, diagnostics to `err`.
///
/// `on_config` is called with the configuration before the tool body runs;
/// the binaries use it to install the logger.
pub fn run<W: Write, E: Write>(
    tool: &Tool,
    args: impl IntoIterator<Item = OsString>,
    out: &mut W,
    err: &mut E,
    on_config: impl FnOnce(&ToolConfig) -> Result<()>,
) -> u8 {
    let mut args = args.into_iter();
    let program = args
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| tool.name.to_string());
    match dispatch(tool, args, out, on_config) {
        Ok(()) => 0,
        Err(error) => report(tool, &program, &error, out, err),
    }
}

/// Entry point for the binaries: real arguments, stdio and the stderr logger.
pub fn main(tool: &Tool) -> ExitCode {
    let code = run(
        tool,
        std::env::args_os(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
        |config| logger::init(config.log_filter),
    );
    ExitCode::from(code)
}

#[instrument(skip_all, parent = Span::current(), level = "Trace")]
fn pagetable(invocation: &Invocation, out: &mut dyn Write) -> Result<()> {
    let [text] = invocation.positional.as_slice() else {
        return Err(ToolError::WrongArgumentCount {
            expected: 1,
            got: invocation.positional.len(),
        });
    };
    let text = as_text(text)?;

    let parsed = parse_address(text)?;
    if parsed.truncated {
        log::info!(
            target: "pagewalk",
            "{text} is wider than 64 bits, only the low 64 bits are used"
        );
    }

    let layout = PagingLayout::X86_64_4LEVEL;
    let discarded = parsed.address & !layout.address_mask();
    if discarded != 0 {
        log::info!(
            target: "pagewalk",
            "bits {discarded:#x} are above the {}-bit translated range and were discarded",
            layout.translated_bits()
        );
    }

    let decomposition = decompose(parsed.address);
    writeln!(out, "{text}: {decomposition}")?;
    Ok(())
}

#[instrument(skip_all, parent = Span::current(), level = "Trace")]
fn patch_bin_int(invocation: &Invocation, _out: &mut dyn Write) -> Result<()> {
    let [path, offset, value] = invocation.positional.as_slice() else {
        return Err(ToolError::WrongArgumentCount {
            expected: 3,
            got: invocation.positional.len(),
        });
    };

    let offset = parse_decimal_u64(as_text(offset)?)?;
    let value = parse_decimal_u32(as_text(value)?)?;
    patch::patch_file(Path::new(path), offset, value)
}

#[cfg(test)]
mod tests {
    use pagewalk_testing::simplelogger::{LOGGER, SimpleLogger};
    use pagewalk_testing::{read_scratch_file, scratch_file};

    use super::*;

    struct Output {
        code: u8,
        stdout: String,
        stderr: String,
    }

    fn run_os(tool: &Tool, args: Vec<OsString>) -> Output {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(tool, args, &mut out, &mut err, |_| Ok(()));
        Output {
            code,
            stdout: String::from_utf8(out).unwrap(),
            stderr: String::from_utf8(err).unwrap(),
        }
    }

    fn run_tool(tool: &Tool, args: &[&str]) -> Output {
        run_os(tool, args.iter().map(OsString::from).collect())
    }

    // ==================== pagetable ====================

    #[test]
    fn test_pagetable_known_address() {
        let output = run_tool(&PAGETABLE, &["pagetable", "0x1fee000"]);
        assert_eq!(output.code, 0);
        assert_eq!(
            output.stdout,
            "0x1fee000: PGD=0, PUD=0, PMD=15, PTD=494, data=0\n"
        );
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_pagetable_records_decomposition() {
        SimpleLogger::initialize_test_logger();
        let output = run_tool(&PAGETABLE, &["pagetable", "0x7f12_3456_7abc"]);
        assert_eq!(output.code, 0);
        assert!(LOGGER.any_log_call(|call| {
            call.target == "pagewalk"
                && call.args == "decomposed 0x7f1234567abc into PGD=254, PUD=72, PMD=418, PTD=359, data=2748"
        }));
        assert_eq!(
            output.stdout,
            "0x7f12_3456_7abc: PGD=254, PUD=72, PMD=418, PTD=359, data=2748\n"
        );
    }

    #[test]
    fn test_pagetable_echoes_input_text() {
        let output = run_tool(&PAGETABLE, &["pt", "FFFF_FFFF_FFFF"]);
        assert_eq!(output.code, 0);
        assert_eq!(
            output.stdout,
            "FFFF_FFFF_FFFF: PGD=511, PUD=511, PMD=511, PTD=511, data=4095\n"
        );
    }

    #[test]
    fn test_pagetable_discards_high_bits() {
        let output = run_tool(&PAGETABLE, &["pt", "0xffff800000001234"]);
        assert_eq!(output.code, 0);
        assert_eq!(
            output.stdout,
            "0xffff800000001234: PGD=256, PUD=0, PMD=0, PTD=1, data=564\n"
        );
    }

    #[test]
    fn test_pagetable_no_arguments() {
        let output = run_tool(&PAGETABLE, &["./pagetable"]);
        assert_eq!(output.code, 1);
        assert_eq!(output.stdout, "usage: ./pagetable 0x[address]\n");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_pagetable_empty_argv_uses_tool_name() {
        let output = run_tool(&PAGETABLE, &[]);
        assert_eq!(output.code, 1);
        assert_eq!(output.stdout, "usage: pagetable 0x[address]\n");
    }

    #[test]
    fn test_pagetable_surplus_arguments() {
        let output = run_tool(&PAGETABLE, &["pt", "0x1000", "0x2000"]);
        assert_eq!(output.code, 1);
        assert_eq!(output.stdout, "usage: pt 0x[address]\n");
    }

    #[test]
    fn test_pagetable_invalid_address() {
        let output = run_tool(&PAGETABLE, &["pt", "xyz"]);
        assert_eq!(output.code, 2);
        assert!(output.stdout.is_empty());
        assert_eq!(
            output.stderr,
            "error: invalid argument: invalid digit 'x' in \"xyz\"\n"
        );
    }

    #[test]
    fn test_pagetable_negative_address() {
        let output = run_tool(&PAGETABLE, &["pt", "-0x10"]);
        assert_eq!(output.code, 2);
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_pagetable_flags_are_addresses() {
        let output = run_tool(&PAGETABLE, &["pt", "-v"]);
        assert_eq!(output.code, 2);
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_on_config_runs_after_successful_parse() {
        let mut seen = None;
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            &PAGETABLE,
            ["pt", "0x0"].map(OsString::from),
            &mut out,
            &mut err,
            |config| {
                seen = Some(*config);
                Ok(())
            },
        );
        assert_eq!(code, 0);
        assert_eq!(seen, Some(ToolConfig::default()));
    }

    #[test]
    fn test_on_config_failure_stops_the_tool() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            &PAGETABLE,
            ["pt", "0x0"].map(OsString::from),
            &mut out,
            &mut err,
            |_| Err(ToolError::LoggerInitFailed("already set".to_string())),
        );
        assert_eq!(code, crate::error::EXIT_INTERNAL);
        assert!(out.is_empty());
    }

    // ==================== patch_bin_int ====================

    #[test]
    fn test_patch_bin_int_writes_value() {
        let path = scratch_file("cli", &[0u8; 8]).unwrap();
        let path_str = path.display().to_string();
        let output = run_tool(&PATCH_BIN_INT, &["patch", &path_str, "2", "305419896"]);
        let contents = read_scratch_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(output.code, 0, "{}", output.stderr);
        assert!(output.stdout.is_empty());
        assert_eq!(contents, vec![0, 0, 0x78, 0x56, 0x34, 0x12, 0, 0]);
    }

    #[cfg(unix)]
    #[test]
    fn test_patch_bin_int_non_utf8_file_name() {
        use std::os::unix::ffi::OsStrExt;

        let pid = std::process::id().to_string();
        let name = [b"pagewalk-cli-".as_slice(), pid.as_bytes(), &[0xff], b".bin"].concat();
        let path = std::env::temp_dir().join(OsStr::from_bytes(&name));
        std::fs::write(&path, [0u8; 4]).unwrap();

        let output = run_os(
            &PATCH_BIN_INT,
            vec![
                "patch".into(),
                path.clone().into_os_string(),
                "0".into(),
                "258".into(),
            ],
        );
        let contents = read_scratch_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(output.code, 0, "{}", output.stderr);
        assert_eq!(contents, vec![2, 1, 0, 0]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_numeric_argument() {
        use std::os::unix::ffi::OsStrExt;

        let output = run_os(
            &PATCH_BIN_INT,
            vec![
                "patch".into(),
                "file.bin".into(),
                OsStr::from_bytes(&[b'1', 0xff]).to_os_string(),
                "1".into(),
            ],
        );
        assert_eq!(output.code, 2);
        assert!(output.stderr.contains("not valid UTF-8"), "{}", output.stderr);
    }

    #[test]
    fn test_patch_bin_int_usage() {
        let output = run_tool(&PATCH_BIN_INT, &["patch", "file", "0"]);
        assert_eq!(output.code, 1);
        assert_eq!(
            output.stdout,
            "usage: patch [filename] [offset] [uint32 to write]\n"
        );
    }

    #[test]
    fn test_patch_bin_int_value_out_of_range() {
        let path = scratch_file("cli-range", &[7u8; 4]).unwrap();
        let path_str = path.display().to_string();
        let output = run_tool(&PATCH_BIN_INT, &["patch", &path_str, "0", "4294967296"]);
        let contents = read_scratch_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(output.code, 2);
        assert!(output.stderr.contains("out of range"), "{}", output.stderr);
        assert_eq!(contents, vec![7u8; 4]);
    }

    #[test]
    fn test_patch_bin_int_missing_file() {
        let output = run_tool(
            &PATCH_BIN_INT,
            &["patch", "/nonexistent/pagewalk/file.bin", "0", "1"],
        );
        assert_eq!(output.code, 3);
        assert!(output.stderr.starts_with("error: failed to patch"), "{}", output.stderr);
        assert_eq!(output.stderr.lines().count(), 1);
    }
}
