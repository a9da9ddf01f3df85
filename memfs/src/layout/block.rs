//! 数据块序列
//!
//! 每个描述符独占一列定长数据块，块在分配时清零。
//! 字节区间按块边界切分为若干段，逐段处理。

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::iter;
use core::ops::Range;

use crate::BLOCK_SIZE;
use crate::DataBlock;
use crate::Error;

#[derive(Debug, Default)]
pub struct BlockStore {
    blocks: Vec<Box<DataBlock>>,
}

impl BlockStore {
    /// 占用块数
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// 所有块加起来能容纳的字节数
    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * BLOCK_SIZE
    }

    /// 追加清零的块，直到能容纳 `[0, end)`
    ///
    /// 内存不足时返回 [`Error::OutOfMemory`]，块序列保持原样。
    pub fn grow_to(&mut self, end: usize) -> Result<(), Error> {
        let before = self.blocks.len();
        let needed = end.div_ceil(BLOCK_SIZE);
        if needed <= before {
            return Ok(());
        }

        self.blocks
            .try_reserve(needed - before)
            .map_err(|_| Error::OutOfMemory)?;
        while self.blocks.len() < needed {
            match zeroed_block() {
                Some(block) => self.blocks.push(block),
                None => {
                    self.blocks.truncate(before);
                    return Err(Error::OutOfMemory);
                }
            }
        }

        log::debug!("grow blocks {before} -> {needed}");
        Ok(())
    }

    /// 丢弃末尾的块，但在 `size` 之外仍保留一块的余量
    pub fn shrink_to(&mut self, size: usize) {
        let before = self.blocks.len();
        while self.capacity() > size + BLOCK_SIZE {
            self.blocks.pop();
        }
        if self.blocks.len() != before {
            log::debug!("shrink blocks {before} -> {}", self.blocks.len());
        }
    }

    /// 以 `value` 填满字节区间，区间须已在容量之内
    pub fn fill(&mut self, range: Range<usize>, value: u8) {
        debug_assert!(range.end <= self.capacity());
        for (block_index, inner) in segments(range) {
            self.blocks[block_index][inner].fill(value);
        }
    }

    /// 跨块按序拼接字节区间，区间须已在容量之内
    pub fn read(&self, range: Range<usize>) -> Vec<u8> {
        debug_assert!(range.end <= self.capacity());
        let mut bytes = Vec::with_capacity(range.len());
        for (block_index, inner) in segments(range) {
            bytes.extend_from_slice(&self.blocks[block_index][inner]);
        }
        bytes
    }
}

/// 分配一个清零的块，失败时返回 `None` 而不是中止
fn zeroed_block() -> Option<Box<DataBlock>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(BLOCK_SIZE).ok()?;
    bytes.resize(BLOCK_SIZE, 0);
    bytes.into_boxed_slice().try_into().ok()
}

/// 将字节区间切分为 (块索引, 块内区间)
fn segments(range: Range<usize>) -> impl Iterator<Item = (usize, Range<usize>)> {
    let Range { mut start, end } = range;
    iter::from_fn(move || {
        (start < end).then(|| {
            let block_index = start / BLOCK_SIZE;
            let block_start = block_index * BLOCK_SIZE;
            let inner = start - block_start..(end - block_start).min(BLOCK_SIZE);
            start = block_start + inner.end;
            (block_index, inner)
        })
    })
}
