use derive_more::Display;

/// 文件系统操作的错误
///
/// 任何一种错误都不会改动已有的状态：所有检查都先于修改。
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display(fmt = "The file system is not initialised!")]
    NotInitialized,
    #[display(fmt = "The file system was already been initialised!")]
    AlreadyInitialized,
    /// 容量不是非负整数
    #[display(fmt = "Capacity should be a non-negative integer!")]
    InvalidCapacity,
    #[display(
        fmt = "File name is too large. should be at most {} characters",
        crate::MAX_FILE_NAME_LENGTH
    )]
    NameTooLong,
    #[display(fmt = "An instance with this name was already created!")]
    NameExists,
    /// 描述符位图已满
    #[display(fmt = "All descriptors were used!")]
    CapacityExceeded,
    #[display(fmt = "There is no file with this name")]
    NotFound,
    /// 主绑定只能随文件系统一同销毁
    #[display(fmt = "It is a file, not a link!")]
    UnlinkPrimaryForbidden,
    #[display(fmt = "Val should be 1 byte size!")]
    InvalidValueSize,
    #[display(fmt = "Can't read past the end of the file")]
    ReadOutOfBounds,
    #[display(fmt = "There is no file opened with this ID")]
    HandleNotOpen,
    /// `offset + size` 超出了 `usize` 的表示范围
    #[display(fmt = "Offset is out of range")]
    OffsetOverflow,
    /// 追加数据块时分配失败
    #[display(fmt = "Not enough memory for the file blocks")]
    OutOfMemory,
}

impl core::error::Error for Error {}
