use alloc::string::String;
use alloc::vec::Vec;

use derive_more::{Display, From, Into};

use super::BlockStore;
use crate::Error;

/// 描述符编号，位于 `[0, capacity)`
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[repr(transparent)]
pub struct DescriptorId(usize);

#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptorKind {
    #[default]
    #[display(fmt = "regular")]
    Regular,
}

/// 描述符，即内存中的 inode
#[derive(Debug)]
pub struct Descriptor {
    id: DescriptorId,
    kind: DescriptorKind,
    /// 文件长度
    size: usize,
    blocks: BlockStore,
    /// 硬链接个数，主绑定也算一个
    links: usize,
    /// 主绑定的名字
    name: String,
}

impl Descriptor {
    #[inline]
    pub fn new(id: DescriptorId, name: String) -> Self {
        Self {
            id,
            kind: DescriptorKind::Regular,
            size: 0,
            blocks: BlockStore::default(),
            links: 1,
            name,
        }
    }

    #[inline]
    pub fn id(&self) -> DescriptorId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn links(&self) -> usize {
        self.links
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn link(&mut self) {
        self.links += 1;
    }

    #[inline]
    pub fn unlink(&mut self) {
        debug_assert!(self.links > 1, "primary binding can't be unlinked");
        self.links -= 1;
    }

    /// 以单个字节 `value` 填满 `[offset, offset + size)`，
    /// 必要时追加清零的块。
    pub fn write(&mut self, offset: usize, size: usize, value: u8) -> Result<(), Error> {
        let end = offset.checked_add(size).ok_or(Error::OffsetOverflow)?;

        self.blocks.grow_to(end)?;
        self.blocks.fill(offset..end, value);
        self.size = self.size.max(end);
        Ok(())
    }

    /// 读取 `[offset, offset + size)`，不允许越过文件末尾
    pub fn read(&self, offset: usize, size: usize) -> Result<Vec<u8>, Error> {
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= self.size)
            .ok_or(Error::ReadOutOfBounds)?;

        Ok(self.blocks.read(offset..end))
    }

    pub fn truncate(&mut self, size: usize) -> Result<(), Error> {
        if size < self.size {
            self.blocks.shrink_to(size);
        } else if size > self.size {
            // 收缩留下的余量块里可能还有旧数据，须显式清零
            self.blocks.grow_to(size)?;
            self.blocks.fill(self.size..size, 0);
        }
        self.size = size;
        Ok(())
    }
}
