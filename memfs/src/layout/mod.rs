//! # 内存数据结构层
//!
//! 描述符位图 | 描述符 | 数据块

mod bitmap;
mod block;
mod descriptor;

pub use self::{
    bitmap::Bitmap,
    block::BlockStore,
    descriptor::{Descriptor, DescriptorId, DescriptorKind},
};
