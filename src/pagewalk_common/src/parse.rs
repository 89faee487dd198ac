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


//! Conversion of command line arguments to integers.
//!
//! Accepts the forms users already type at a shell: surrounding whitespace,
//! an optional `+`, an optional `0x` prefix for hexadecimal values and
//! single `_` digit separators (`0xffff_8000_0000_0000`).

use alloc::string::ToString;

use crate::error::ParseError;
use crate::vmem::VirtAddr;

/// A virtual address parsed from its textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAddress {
    pub address: VirtAddr,
    /// The text had set bits above bit 63 which were dropped
    pub truncated: bool,
}

/// Result of folding the digits of a number into a `u64`.
struct Digits {
    value: u64,
    overflowed: bool,
}

fn strip_sign(input: &str) -> Result<&str, ParseError> {
    let text = input.trim();
    if text.starts_with('-') {
        return Err(ParseError::Negative(input.to_string()));
    }
    Ok(text.strip_prefix('+').unwrap_or(text))
}

/// Fold `digits` into a `u64`, keeping only the low 64 bits of the value.
fn fold_digits(
    input: &str,
    digits: &str,
    radix: u32,
    after_prefix: bool,
) -> Result<Digits, ParseError> {
    let mut value: u64 = 0;
    let mut overflowed = false;
    let mut seen_digit = false;
    // An underscore is allowed directly after a radix prefix
    let mut last_was_sep = false;
    let mut sep_allowed = after_prefix;

    for c in digits.chars() {
        if c == '_' {
            if !sep_allowed || last_was_sep {
                return Err(ParseError::MisplacedSeparator(input.to_string()));
            }
            last_was_sep = true;
            continue;
        }

        let digit = c.to_digit(radix).ok_or_else(|| ParseError::InvalidDigit {
            input: input.to_string(),
            found: c,
        })?;

        match value
            .checked_mul(radix as u64)
            .and_then(|v| v.checked_add(digit as u64))
        {
            Some(v) => value = v,
            None => {
                overflowed = true;
                value = value
                    .wrapping_mul(radix as u64)
                    .wrapping_add(digit as u64);
            }
        }
        seen_digit = true;
        last_was_sep = false;
        sep_allowed = true;
    }

    if last_was_sep {
        return Err(ParseError::MisplacedSeparator(input.to_string()));
    }
    if !seen_digit {
        return Err(ParseError::Empty(input.to_string()));
    }
    Ok(Digits { value, overflowed })
}

/// Parse a hexadecimal virtual address, with or without a `0x` prefix.
///
/// Values wider than 64 bits are not an error: like every bit above the
/// translated range they cannot influence the decomposition, so only the
/// low 64 bits are kept and `truncated` is set.
pub fn parse_address(input: &str) -> Result<ParsedAddress, ParseError> {
    let text = strip_sign(input)?;
    let (digits, after_prefix) = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(rest) => (rest, true),
        None => (text, false),
    };

    // Wrapping multiplication by 16 is a plain shift, so the folded value is
    // exactly the low 64 bits of the full number.
    let Digits { value, overflowed } = fold_digits(input, digits, 16, after_prefix)?;
    Ok(ParsedAddress {
        address: value,
        truncated: overflowed,
    })
}

/// Parse a non-negative decimal integer that must fit in a `u64`.
pub fn parse_decimal_u64(input: &str) -> Result<u64, ParseError> {
    let text = strip_sign(input)?;
    let Digits { value, overflowed } = fold_digits(input, text, 10, false)?;
    if overflowed {
        return Err(ParseError::OutOfRange {
            input: input.to_string(),
            max: u64::MAX,
        });
    }
    Ok(value)
}

/// Parse a non-negative decimal integer that must fit in a `u32`.
pub fn parse_decimal_u32(input: &str) -> Result<u32, ParseError> {
    let value = parse_decimal_u64(input).map_err(|e| match e {
        ParseError::OutOfRange { input, .. } => ParseError::OutOfRange {
            input,
            max: u32::MAX as u64,
        },
        other => other,
    })?;
    u32::try_from(value).map_err(|_| ParseError::OutOfRange {
        input: input.to_string(),
        max: u32::MAX as u64,
    })
}
