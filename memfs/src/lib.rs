#![no_std]

extern crate alloc;

/* memfs 的整体架构，自上而下 */

// 初始化守卫层：文件系统的创建、卸载与共享
mod volume;

// 文件系统层：汇总名字空间、描述符表与打开文件表
mod mfs;

// 打开文件表层：句柄、偏移量
mod open_file;

// 名字空间层：名字到描述符的绑定
mod namespace;

// 内存数据结构层：位图、描述符、块
mod layout;

mod error;
mod stat;

pub use self::{
    error::Error,
    layout::{DescriptorId, DescriptorKind},
    mfs::MemFileSystem,
    open_file::Handle,
    stat::Stat,
    volume::{SharedVolume, Volume, parse_capacity},
};

/// 块大小（字节）
pub const BLOCK_SIZE: usize = 128;
/// 名字的最大长度（字符）
pub const MAX_FILE_NAME_LENGTH: usize = 20;

type DataBlock = [u8; BLOCK_SIZE];
