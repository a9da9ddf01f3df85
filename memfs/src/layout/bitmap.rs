use alloc::vec;
use alloc::vec::Vec;

/// 位组，每一位指示一个描述符编号
type BitGroup = u64;

const GROUP_BITS: usize = BitGroup::BITS as usize;

/// 描述符位图，记录描述符编号的分配情况
#[derive(Debug)]
pub struct Bitmap {
    groups: Vec<BitGroup>,
    /// 可分配的编号总数
    capacity: usize,
}

impl Bitmap {
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            groups: vec![0; capacity.div_ceil(GROUP_BITS)],
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 已分配的编号数
    pub fn count(&self) -> usize {
        self.groups
            .iter()
            .map(|bits| bits.count_ones() as usize)
            .sum()
    }

    pub fn is_allocated(&self, id: usize) -> bool {
        id < self.capacity && self.groups[id / GROUP_BITS] & (1 << (id % GROUP_BITS)) != 0
    }

    /// 分配最小的空闲编号。
    /// 若位图已满，则返回空。
    pub fn alloc(&mut self) -> Option<usize> {
        // 寻找还有剩余空间的位组(即还有0)
        let (group_index, ingroup_index) =
            self.groups
                .iter()
                .enumerate()
                .find_map(|(group_index, &bits)| {
                    (bits != BitGroup::MAX).then_some((group_index, bits.trailing_ones() as usize))
                })?;

        let id = group_index * GROUP_BITS + ingroup_index;
        // 最后一组的高位不对应任何编号
        if id >= self.capacity {
            return None;
        }

        self.groups[group_index] |= 1 << ingroup_index;
        Some(id)
    }
}
