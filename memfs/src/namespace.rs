//! # 名字空间层
//!
//! 一张扁平的表，按创建顺序记录名字到描述符的绑定。
//! 绑定分两种：随描述符一同创建的主绑定，以及由 `link` 创建的别名。

use alloc::string::String;
use alloc::vec::Vec;

use crate::{DescriptorId, Error, MAX_FILE_NAME_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Primary(DescriptorId),
    Alias(DescriptorId),
}

impl Binding {
    /// 绑定所指向的描述符
    #[inline]
    pub fn target(self) -> DescriptorId {
        match self {
            Self::Primary(id) | Self::Alias(id) => id,
        }
    }
}

#[derive(Debug)]
pub struct Entry {
    name: String,
    binding: Binding,
}

impl Entry {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn binding(&self) -> Binding {
        self.binding
    }
}

#[derive(Debug, Default)]
pub struct Namespace {
    entries: Vec<Entry>,
}

impl Namespace {
    /// 按字符计数检查名字长度
    pub fn check_len(name: &str) -> Result<(), Error> {
        if name.chars().count() > MAX_FILE_NAME_LENGTH {
            return Err(Error::NameTooLong);
        }
        Ok(())
    }

    /// 检查名字能否用于新绑定
    pub fn check_new(&self, name: &str) -> Result<(), Error> {
        Self::check_len(name)?;
        if self.get(name).is_some() {
            return Err(Error::NameExists);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Binding> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(Entry::binding)
    }

    /// 名字须已通过 [`Namespace::check_new`]
    pub fn bind(&mut self, name: &str, binding: Binding) {
        debug_assert!(self.get(name).is_none());
        self.entries.push(Entry {
            name: name.into(),
            binding,
        });
    }

    /// 删除名字所对应的别名，返回其指向的描述符
    pub fn unbind_alias(&mut self, name: &str) -> Result<DescriptorId, Error> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or(Error::NotFound)?;

        match self.entries[position].binding {
            Binding::Primary(_) => Err(Error::UnlinkPrimaryForbidden),
            Binding::Alias(target) => {
                // 保持其余绑定的创建顺序
                self.entries.remove(position);
                Ok(target)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// 指向 `target` 的别名个数
    pub fn aliases_of(&self, target: DescriptorId) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.binding == Binding::Alias(target))
            .count()
    }
}
