//! # 初始化守卫层
//!
//! [`Volume`] 至多持有一个存活的 [`MemFileSystem`]：
//! 未初始化时所有操作都返回 [`Error::NotInitialized`]，
//! 存活时再次 `mkfs` 返回 [`Error::AlreadyInitialized`]。

use alloc::sync::Arc;
use alloc::vec::Vec;

use spin::Mutex;

use crate::{Error, Handle, MemFileSystem, Stat};

/// 被多个调用者共享的卷，每次操作都独占整个文件系统
pub type SharedVolume = Arc<Mutex<Volume>>;

#[derive(Debug, Default)]
pub struct Volume {
    fs: Option<MemFileSystem>,
}

/// 解析文本形式的容量
pub fn parse_capacity(text: &str) -> Result<usize, Error> {
    text.trim().parse().map_err(|_| Error::InvalidCapacity)
}

impl Volume {
    #[inline]
    pub const fn new() -> Self {
        Self { fs: None }
    }

    #[inline]
    pub fn shared() -> SharedVolume {
        Arc::new(Mutex::new(Self::new()))
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.fs.is_some()
    }

    pub fn fs(&self) -> Result<&MemFileSystem, Error> {
        self.fs.as_ref().ok_or(Error::NotInitialized)
    }

    pub fn fs_mut(&mut self) -> Result<&mut MemFileSystem, Error> {
        self.fs.as_mut().ok_or(Error::NotInitialized)
    }

    /// 创建容量为 `capacity` 个描述符的文件系统
    pub fn mkfs(&mut self, capacity: usize) -> Result<(), Error> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }

        self.fs = Some(MemFileSystem::new(capacity));
        log::debug!("mkfs capacity={capacity}");
        Ok(())
    }

    /// 同 [`Volume::mkfs`]，但先检查是否已初始化，再解析容量
    pub fn mkfs_str(&mut self, capacity: &str) -> Result<(), Error> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        self.mkfs(parse_capacity(capacity)?)
    }

    /// 销毁文件系统，释放所有描述符与数据块
    pub fn umount(&mut self) -> Result<(), Error> {
        let fs = self.fs.take().ok_or(Error::NotInitialized)?;
        log::debug!(
            "umount: {} descriptors, {} open handles",
            fs.descriptor_count(),
            fs.open_count()
        );
        Ok(())
    }

    pub fn create(&mut self, name: &str) -> Result<Stat, Error> {
        self.fs_mut()?.create(name)
    }

    pub fn link(&mut self, name: &str, new_name: &str) -> Result<Stat, Error> {
        self.fs_mut()?.link(name, new_name)
    }

    pub fn unlink(&mut self, name: &str) -> Result<(), Error> {
        self.fs_mut()?.unlink(name)
    }

    pub fn open(&mut self, name: &str) -> Result<Handle, Error> {
        self.fs_mut()?.open(name)
    }

    pub fn close(&mut self, handle: Handle) -> Result<(), Error> {
        self.fs_mut()?.close(handle)
    }

    pub fn seek(&mut self, handle: Handle, offset: usize) -> Result<(), Error> {
        self.fs_mut()?.seek(handle, offset)
    }

    pub fn write(&mut self, handle: Handle, size: usize, value: &[u8]) -> Result<(), Error> {
        self.fs_mut()?.write(handle, size, value)
    }

    pub fn read(&self, handle: Handle, size: usize) -> Result<Vec<u8>, Error> {
        self.fs()?.read(handle, size)
    }

    pub fn truncate(&mut self, name: &str, size: usize) -> Result<(), Error> {
        self.fs_mut()?.truncate(name, size)
    }

    pub fn stat(&self, name: &str) -> Result<Stat, Error> {
        self.fs()?.stat(name)
    }

    pub fn list(&self) -> Result<Vec<Stat>, Error> {
        Ok(self.fs()?.list())
    }
}

#[cfg(test)]
mod tests {
    use super::{Volume, parse_capacity};
    use crate::{Error, Handle};

    #[test]
    fn not_initialized() {
        let mut volume = Volume::new();
        assert_eq!(Err(Error::NotInitialized), volume.create("a"));
        assert_eq!(Err(Error::NotInitialized), volume.link("a", "b"));
        assert_eq!(Err(Error::NotInitialized), volume.unlink("a"));
        assert_eq!(Err(Error::NotInitialized), volume.open("a"));
        assert_eq!(Err(Error::NotInitialized), volume.close(Handle::from(0)));
        assert_eq!(Err(Error::NotInitialized), volume.seek(Handle::from(0), 1));
        // 未初始化先于字节数检查
        assert_eq!(
            Err(Error::NotInitialized),
            volume.write(Handle::from(0), 1, b"xx")
        );
        assert_eq!(Err(Error::NotInitialized), volume.read(Handle::from(0), 1));
        assert_eq!(Err(Error::NotInitialized), volume.truncate("a", 1));
        assert_eq!(Err(Error::NotInitialized), volume.stat("a"));
        assert_eq!(Err(Error::NotInitialized), volume.list());
        assert_eq!(Err(Error::NotInitialized), volume.umount());
    }

    #[test]
    fn mkfs_once() {
        let mut volume = Volume::new();
        volume.mkfs(4).unwrap();
        assert_eq!(Err(Error::AlreadyInitialized), volume.mkfs(8));
        assert_eq!(Err(Error::AlreadyInitialized), volume.mkfs_str("oops"));
        assert_eq!(4, volume.fs().unwrap().capacity());
    }

    #[test]
    fn mkfs_after_umount() {
        let mut volume = Volume::new();
        volume.mkfs(1).unwrap();
        volume.create("a").unwrap();
        volume.umount().unwrap();
        assert!(!volume.is_initialized());

        volume.mkfs_str("2").unwrap();
        assert_eq!(2, volume.fs().unwrap().capacity());
        assert_eq!(Err(Error::NotFound), volume.stat("a"));
    }

    #[test]
    fn capacity_text() {
        assert_eq!(Ok(0), parse_capacity("0"));
        assert_eq!(Ok(12), parse_capacity(" 12 "));
        assert_eq!(Err(Error::InvalidCapacity), parse_capacity("-1"));
        assert_eq!(Err(Error::InvalidCapacity), parse_capacity("1.5"));
        assert_eq!(Err(Error::InvalidCapacity), parse_capacity("four"));

        let mut volume = Volume::new();
        assert_eq!(Err(Error::InvalidCapacity), volume.mkfs_str("-3"));
        assert!(!volume.is_initialized());
    }
}
