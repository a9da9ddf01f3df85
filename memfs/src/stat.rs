use alloc::string::String;

use crate::{DescriptorId, DescriptorKind};
use crate::layout::Descriptor;

/// 名字空间中一项的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub id: DescriptorId,
    pub kind: DescriptorKind,
    /// 硬链接个数
    pub links: usize,
    /// 文件长度
    pub size: usize,
    /// 占用块数
    pub blocks: usize,
    pub name: String,
    /// 别名所指向描述符的主名字；主绑定为空
    pub target: Option<String>,
}

impl Stat {
    pub(crate) fn new(name: &str, desc: &Descriptor, is_alias: bool) -> Self {
        Self {
            id: desc.id(),
            kind: desc.kind(),
            links: desc.links(),
            size: desc.size(),
            blocks: desc.block_count(),
            name: name.into(),
            target: is_alias.then(|| desc.name().into()),
        }
    }
}
