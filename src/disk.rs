//! # Disk Compaction
//!
//! A disk map is a dense string of digits alternating between file lengths and
//! free-gap lengths, starting with a file. Files get ids 0, 1, 2, ... in order
//! of appearance. Expanding the map gives a [`Disk`]: one [`Block`] per unit of
//! storage, either free or stamped with a file id.
//!
//! Two compaction policies are provided:
//!
//! * [`Disk::compact_blocks`] moves the last file block into the first free
//!   block, one block at a time, until no free block precedes a file block.
//! * [`Disk::compact_files`] tries each whole file once, highest id first, and
//!   moves it into the leftmost free run that fits before it.
//!
//! Neither policy changes the length of the disk or the number of blocks owned
//! by any file; only positions move.

use crate::error::DiskError;
use itertools::Itertools;
use std::cmp::Reverse;
use std::str::FromStr;

pub type FileId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Free,
    File(FileId),
}

impl Block {
    pub fn is_free(&self) -> bool {
        matches!(self, Block::Free)
    }
}

/// A contiguous run of blocks owned by one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSpan {
    pub id: FileId,
    pub start: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Single-block shift, iterated to a fixpoint.
    #[default]
    Blocks,
    /// Whole-file best fit, one pass in descending id order.
    Files,
}

/// The parsed digit string, before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskMap {
    lengths: Vec<u8>,
}

impl DiskMap {
    /// Parses a line of ASCII digits. Surrounding whitespace is ignored.
    ///
    /// Even offsets are file lengths and odd offsets are gap lengths, so a map
    /// may end with either a file or a gap.
    pub fn parse(input: &str) -> Result<Self, DiskError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DiskError::Empty);
        }
        let lengths = input
            .chars()
            .enumerate()
            .map(|(offset, ch)| {
                ch.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(DiskError::BadDigit { ch, offset })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> &[u8] {
        &self.lengths
    }

    pub fn file_count(&self) -> usize {
        self.lengths.len().div_ceil(2)
    }

    pub fn expand(&self) -> Disk {
        let total = self.lengths.iter().map(|&l| l as usize).sum();
        let mut blocks = Vec::with_capacity(total);
        for (i, &len) in self.lengths.iter().enumerate() {
            let block = if i % 2 == 0 {
                Block::File((i / 2) as FileId)
            } else {
                Block::Free
            };
            blocks.extend(std::iter::repeat_n(block, len as usize));
        }
        Disk { blocks }
    }
}

impl FromStr for DiskMap {
    type Err = DiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    blocks: Vec<Block>,
}

impl Disk {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of `position * id` over every file block.
    pub fn checksum(&self) -> u64 {
        self.blocks
            .iter()
            .enumerate()
            .map(|(pos, block)| match *block {
                Block::File(id) => pos as u64 * id as u64,
                Block::Free => 0,
            })
            .sum()
    }

    /// One character per block: the last digit of the file id, or `.`.
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match *block {
                Block::File(id) => char::from_digit(id % 10, 10).unwrap_or('?'),
                Block::Free => '.',
            })
            .join("")
    }

    /// Every maximal run of same-id blocks, left to right.
    pub fn files(&self) -> Vec<FileSpan> {
        let mut spans: Vec<FileSpan> = vec![];
        for (pos, block) in self.blocks.iter().enumerate() {
            let Block::File(id) = *block else {
                continue;
            };
            match spans.last_mut() {
                Some(span) if span.id == id && span.start + span.len == pos => span.len += 1,
                _ => spans.push(FileSpan {
                    id,
                    start: pos,
                    len: 1,
                }),
            }
        }
        spans
    }

    /// Start of the leftmost run of at least `len` free blocks lying entirely
    /// before position `before`.
    pub fn find_free_run(&self, len: usize, before: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let mut run = 0;
        for pos in 0..before.min(self.blocks.len()) {
            if self.blocks[pos].is_free() {
                run += 1;
                if run == len {
                    return Some(pos + 1 - len);
                }
            } else {
                run = 0;
            }
        }
        None
    }

    fn move_span(&mut self, span: FileSpan, to: usize) {
        self.blocks[span.start..span.start + span.len].fill(Block::Free);
        self.blocks[to..to + span.len].fill(Block::File(span.id));
    }

    /// Moves the last file block into the first free block until no free
    /// block precedes a file block. Returns the number of blocks moved.
    pub fn compact_blocks(&mut self) -> usize {
        let mut moves = 0;
        let mut free = 0;
        let mut end = self.blocks.len();
        loop {
            while free < self.blocks.len() && !self.blocks[free].is_free() {
                free += 1;
            }
            while end > 0 && self.blocks[end - 1].is_free() {
                end -= 1;
            }
            if end == 0 || free >= end - 1 {
                return moves;
            }
            self.blocks.swap(free, end - 1);
            moves += 1;
        }
    }

    /// Tries each file once, highest id first, moving it whole into the
    /// leftmost free run that fits before it. Returns the number of files
    /// moved.
    pub fn compact_files(&mut self) -> usize {
        let mut files = self.files();
        files.sort_by_key(|span| Reverse(span.id));
        let mut moved = 0;
        for span in files {
            if let Some(to) = self.find_free_run(span.len, span.start) {
                self.move_span(span, to);
                moved += 1;
            }
        }
        moved
    }

    pub fn compact(&mut self, strategy: Strategy) -> usize {
        match strategy {
            Strategy::Blocks => self.compact_blocks(),
            Strategy::Files => self.compact_files(),
        }
    }
}

/// Parses, expands, compacts and checksums in one go.
pub fn compacted_checksum(input: &str, strategy: Strategy) -> Result<u64, DiskError> {
    let mut disk = DiskMap::parse(input)?.expand();
    disk.compact(strategy);
    Ok(disk.checksum())
}
