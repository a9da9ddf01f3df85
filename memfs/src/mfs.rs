//! # 文件系统层
//!
//! 汇总描述符表、名字空间与打开文件表，对外提供完整的操作集。
//! 每个操作先完成全部检查再修改状态，失败时状态保持不变。

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::layout::{Bitmap, Descriptor};
use crate::namespace::{Binding, Namespace};
use crate::open_file::OpenFileTable;
use crate::{DescriptorId, Error, Handle, Stat};

#[derive(Debug)]
pub struct MemFileSystem {
    /// 描述符位图，第 i 位置位当且仅当描述符 i 已分配
    bitmap: Bitmap,
    descriptors: BTreeMap<DescriptorId, Descriptor>,
    namespace: Namespace,
    open_files: OpenFileTable,
}

impl MemFileSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            bitmap: Bitmap::new(capacity),
            descriptors: BTreeMap::new(),
            namespace: Namespace::default(),
            open_files: OpenFileTable::default(),
        }
    }

    /// 描述符的最大个数
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bitmap.capacity()
    }

    /// 已分配的描述符个数
    #[inline]
    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    /// 当前打开的句柄个数
    #[inline]
    pub fn open_count(&self) -> usize {
        self.open_files.len()
    }

    /// 分配编号最小的空闲描述符，并以 `name` 作为其主绑定
    pub fn create(&mut self, name: &str) -> Result<Stat, Error> {
        Namespace::check_len(name)?;
        if self.descriptor_count() >= self.capacity() {
            return Err(Error::CapacityExceeded);
        }
        self.namespace.check_new(name)?;

        let id = DescriptorId::from(self.bitmap.alloc().ok_or(Error::CapacityExceeded)?);
        let desc = Descriptor::new(id, name.into());
        let stat = Stat::new(name, &desc, false);
        self.descriptors.insert(id, desc);
        self.namespace.bind(name, Binding::Primary(id));
        debug_assert!(self.bitmap.is_allocated(id.into()));
        debug_assert_eq!(self.bitmap.count(), self.descriptors.len());

        log::debug!("create {name:?} -> descriptor {id}");
        Ok(stat)
    }

    /// 为 `name` 所指向的描述符添加别名 `new_name`
    pub fn link(&mut self, name: &str, new_name: &str) -> Result<Stat, Error> {
        self.namespace.check_new(new_name)?;
        let id = self.namespace.get(name).ok_or(Error::NotFound)?.target();

        let desc = self.descriptor_mut(id);
        desc.link();
        let stat = Stat::new(new_name, desc, true);
        self.namespace.bind(new_name, Binding::Alias(id));
        self.check_links(id);

        log::debug!("link {new_name:?} -> descriptor {id}");
        Ok(stat)
    }

    /// 删除别名，主绑定不可删除
    pub fn unlink(&mut self, name: &str) -> Result<(), Error> {
        let id = self.namespace.unbind_alias(name)?;
        self.descriptor_mut(id).unlink();
        self.check_links(id);

        log::debug!("unlink {name:?} from descriptor {id}");
        Ok(())
    }

    /// 打开文件，别名会透明地解析为其目标描述符
    pub fn open(&mut self, name: &str) -> Result<Handle, Error> {
        let id = self.namespace.get(name).ok_or(Error::NotFound)?.target();
        let handle = self.open_files.alloc(id);

        log::debug!("open {name:?} -> handle {handle}");
        Ok(handle)
    }

    pub fn close(&mut self, handle: Handle) -> Result<(), Error> {
        self.open_files.dealloc(handle)?;

        log::debug!("close handle {handle}");
        Ok(())
    }

    /// 设置偏移量，不检查上界
    pub fn seek(&mut self, handle: Handle, offset: usize) -> Result<(), Error> {
        self.open_files.get_mut(handle)?.seek(offset);
        Ok(())
    }

    /// 从句柄的偏移量起，以单个字节 `value` 填满 `size` 个字节
    pub fn write(&mut self, handle: Handle, size: usize, value: &[u8]) -> Result<(), Error> {
        let &[value] = value else {
            return Err(Error::InvalidValueSize);
        };
        let file = *self.open_files.get(handle)?;

        self.descriptor_mut(file.target())
            .write(file.offset(), size, value)
    }

    /// 从句柄的偏移量起读取 `size` 个字节，不允许越过文件末尾
    pub fn read(&self, handle: Handle, size: usize) -> Result<Vec<u8>, Error> {
        let file = self.open_files.get(handle)?;
        self.descriptor(file.target()).read(file.offset(), size)
    }

    pub fn truncate(&mut self, name: &str, size: usize) -> Result<(), Error> {
        let id = self.namespace.get(name).ok_or(Error::NotFound)?.target();
        self.descriptor_mut(id).truncate(size)?;

        log::debug!("truncate descriptor {id} to {size}");
        Ok(())
    }

    pub fn stat(&self, name: &str) -> Result<Stat, Error> {
        let binding = self.namespace.get(name).ok_or(Error::NotFound)?;
        Ok(self.stat_of(name, binding))
    }

    /// 按创建顺序列出名字空间中的所有项
    pub fn list(&self) -> Vec<Stat> {
        self.namespace
            .iter()
            .map(|entry| self.stat_of(entry.name(), entry.binding()))
            .collect()
    }
}

impl MemFileSystem {
    fn stat_of(&self, name: &str, binding: Binding) -> Stat {
        let desc = self.descriptor(binding.target());
        Stat::new(name, desc, matches!(binding, Binding::Alias(_)))
    }

    /// 名字空间中的绑定总是指向已分配的描述符
    fn descriptor(&self, id: DescriptorId) -> &Descriptor {
        &self.descriptors[&id]
    }

    fn descriptor_mut(&mut self, id: DescriptorId) -> &mut Descriptor {
        self.descriptors
            .get_mut(&id)
            .unwrap_or_else(|| unreachable!("dangling descriptor {id}"))
    }

    #[inline]
    fn check_links(&self, id: DescriptorId) {
        debug_assert_eq!(
            self.descriptor(id).links(),
            1 + self.namespace.aliases_of(id)
        );
    }
}
