//! # 打开文件表层
//!
//! 每个句柄记录目标描述符与独立的偏移量；
//! 同一描述符可被多次打开，共享其长度与数据块。

use alloc::vec::Vec;

use derive_more::{Display, From, Into};

use crate::{DescriptorId, Error};

/// 打开文件的句柄，总是取最小的空闲编号
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[repr(transparent)]
pub struct Handle(usize);

#[derive(Debug, Clone, Copy)]
pub struct OpenFile {
    target: DescriptorId,
    /// **文件**内的偏移量，读取时才检查上界
    offset: usize,
}

impl OpenFile {
    #[inline]
    pub fn target(&self) -> DescriptorId {
        self.target
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }
}

#[derive(Debug, Default)]
pub struct OpenFileTable {
    files: Vec<Option<OpenFile>>,
}

impl OpenFileTable {
    pub fn alloc(&mut self, target: DescriptorId) -> Handle {
        let fd = self
            .files
            .iter()
            .position(Option::is_none)
            .unwrap_or_else(|| {
                self.files.push(None);
                self.files.len() - 1
            });
        self.files[fd] = Some(OpenFile { target, offset: 0 });
        Handle(fd)
    }

    pub fn dealloc(&mut self, handle: Handle) -> Result<OpenFile, Error> {
        // 该线性表只增不减，留空位置以便复用
        self.files
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(Error::HandleNotOpen)
    }

    pub fn get(&self, handle: Handle) -> Result<&OpenFile, Error> {
        self.files
            .get(handle.0)
            .and_then(Option::as_ref)
            .ok_or(Error::HandleNotOpen)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut OpenFile, Error> {
        self.files
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(Error::HandleNotOpen)
    }

    /// 当前打开的句柄数
    pub fn len(&self) -> usize {
        self.files.iter().flatten().count()
    }
}
