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

//! x86-64 4-level virtual address decomposition.
//!
//! A virtual address indexes into each of the page tables:
//!
//! ```text
//!    6         5         4         3         2         1
//! ---|---------|---------|---------|---------|---------|----------
//! 3210987654321098765432109876543210987654321098765432109876543210
//!                 [  PGD  ][  PUD  ][  PMD  ][  PTD  ][  OFFSET  ]
//!                         |        |        |        |
//!                         |        |        |        |------------- PAGE_SHIFT (12)
//!                         |        |        |---------------------- PMD_SHIFT  (21)
//!                         |        |------------------------------- PUD_SHIFT  (30)
//!                         |---------------------------------------- PGD_SHIFT  (39)
//! ```
//!
//! - PGD (Page Global Directory) - bits 47:39 - 512 entries, each covering 512GB
//! - PUD (Page Upper Directory) - bits 38:30 - 512 entries, each covering 1GB
//! - PMD (Page Middle Directory) - bits 29:21 - 512 entries, each covering 2MB
//! - PTD (Page Table Directory) - bits 20:12 - 512 entries, each covering 4KB pages
//!
//! Bits 63:48 are the sign-extension bits of a canonical address. They are
//! not translated by the hierarchy and decomposition discards them rather
//! than rejecting the address.

use core::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

pub type VirtAddr = u64;

pub const PAGE_SHIFT: u8 = 12;
pub const PMD_SHIFT: u8 = 21;
pub const PUD_SHIFT: u8 = 30;
pub const PGD_SHIFT: u8 = 39;

pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
/// Number of bits used to select an entry at each level
pub const PAGE_TABLE_INDEX_BITS: u8 = 9;
pub const PAGE_TABLE_ENTRIES_PER_TABLE: usize = 1 << PAGE_TABLE_INDEX_BITS;

/// One level of the page table hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Page Global Directory
    Pgd,
    /// Page Upper Directory
    Pud,
    /// Page Middle Directory
    Pmd,
    /// Page Table Directory
    Ptd,
}

impl Level {
    /// All levels, most significant first.
    pub const ALL: [Level; 4] = [Level::Pgd, Level::Pud, Level::Pmd, Level::Ptd];

    /// The lowest address bit used to index into this level's table.
    pub const fn shift(self) -> u8 {
        match self {
            Level::Pgd => PGD_SHIFT,
            Level::Pud => PUD_SHIFT,
            Level::Pmd => PMD_SHIFT,
            Level::Ptd => PAGE_SHIFT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Pgd => "PGD",
            Level::Pud => "PUD",
            Level::Pmd => "PMD",
            Level::Ptd => "PTD",
        }
    }

    pub const fn entries(self) -> usize {
        PAGE_TABLE_ENTRIES_PER_TABLE
    }

    /// Bytes of virtual address space mapped by a single entry at this level.
    pub const fn coverage(self) -> u64 {
        1 << self.shift()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes how a virtual address is split between the table levels and the
/// in-page offset.
///
/// `levels` is ordered from least to most significant, which is also the
/// order in which fields are peeled off the address. The only layout is
/// [`PagingLayout::X86_64_4LEVEL`]; its widths keep every shift below 64 and
/// every field within a `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingLayout {
    page_shift: u8,
    index_bits: u8,
    levels: [Level; 4],
}

impl PagingLayout {
    /// 4KB pages, four 9-bit levels: the standard x86-64 long mode layout.
    pub const X86_64_4LEVEL: PagingLayout = PagingLayout {
        page_shift: PAGE_SHIFT,
        index_bits: PAGE_TABLE_INDEX_BITS,
        levels: [Level::Ptd, Level::Pmd, Level::Pud, Level::Pgd],
    };

    /// Number of low address bits that take part in translation.
    pub const fn translated_bits(&self) -> u32 {
        self.page_shift as u32 + self.index_bits as u32 * self.levels.len() as u32
    }

    /// Mask of the address bits that survive decomposition.
    pub const fn address_mask(&self) -> u64 {
        (1 << self.translated_bits()) - 1
    }

    /// Split `address` into its table indices and page offset.
    ///
    /// Fields are extracted from the bottom up: 12 bits of data offset, then
    /// 9 bits each of PTD, PMD, PUD and PGD. Whatever is left above the last
    /// level is dropped.
    pub const fn decompose(&self, address: VirtAddr) -> Decomposition {
        let data_mask = (1u64 << self.page_shift) - 1;
        let index_mask = (1u64 << self.index_bits) - 1;

        let mut address = address;
        // 12 bits of offset into data page.
        let data = (address & data_mask) as u16;
        address >>= self.page_shift;

        let mut result = Decomposition {
            pgd: 0,
            pud: 0,
            pmd: 0,
            ptd: 0,
            data,
        };

        let mut i = 0;
        while i < self.levels.len() {
            let index = (address & index_mask) as u16;
            match self.levels[i] {
                Level::Ptd => result.ptd = index,
                Level::Pmd => result.pmd = index,
                Level::Pud => result.pud = index,
                Level::Pgd => result.pgd = index,
            }
            address >>= self.index_bits;
            i += 1;
        }

        result
    }
}

impl Default for PagingLayout {
    fn default() -> Self {
        Self::X86_64_4LEVEL
    }
}

/// The page table indices and page offset of a single virtual address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decomposition {
    pub pgd: u16,
    pub pud: u16,
    pub pmd: u16,
    pub ptd: u16,
    /// Byte offset into the 4KB data page
    pub data: u16,
}

impl Decomposition {
    pub const fn index(&self, level: Level) -> u16 {
        match level {
            Level::Pgd => self.pgd,
            Level::Pud => self.pud,
            Level::Pmd => self.pmd,
            Level::Ptd => self.ptd,
        }
    }

    /// The table indices, most significant level first.
    pub fn indices(&self) -> impl Iterator<Item = (Level, u16)> + '_ {
        Level::ALL.into_iter().map(|level| (level, self.index(level)))
    }

    /// Reassemble the (48-bit, zero-extended) address these fields came from.
    pub const fn to_address(&self) -> VirtAddr {
        self.data as u64
            + ((self.ptd as u64) << PAGE_SHIFT)
            + ((self.pmd as u64) << PMD_SHIFT)
            + ((self.pud as u64) << PUD_SHIFT)
            + ((self.pgd as u64) << PGD_SHIFT)
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PGD={}, PUD={}, PMD={}, PTD={}, data={}",
            self.pgd, self.pud, self.pmd, self.ptd, self.data
        )
    }
}

/// Decompose `address` according to the x86-64 4-level layout.
///
/// Bits 48 and above are silently discarded.
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn decompose(address: VirtAddr) -> Decomposition {
    let result = PagingLayout::X86_64_4LEVEL.decompose(address);
    log::debug!(target: "pagewalk", "decomposed {address:#x} into {result}");
    result
}
