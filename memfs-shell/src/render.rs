//! 终端输出：成功信息为绿色，错误为红色，表格与数据不着色

use memfs::Stat;

const GREEN: u8 = 92;
const RED: u8 = 91;

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    #[inline]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn ok(&self, message: &str) -> String {
        self.paint(GREEN, message)
    }

    pub fn error(&self, message: &str) -> String {
        self.paint(RED, message)
    }

    fn paint(&self, color: u8, message: &str) -> String {
        if self.color {
            format!("\u{1B}[{color}m{message}\u{1B}[0m")
        } else {
            message.to_owned()
        }
    }
}

pub fn header() -> String {
    format!(
        "{:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {}",
        "№", "type", "links", "length", "blocks", "name"
    )
}

pub fn row(stat: &Stat) -> String {
    let name = match &stat.target {
        Some(target) => format!("{}->{target}", stat.name),
        None => stat.name.clone(),
    };
    format!(
        "{:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {name}",
        stat.id.to_string(),
        stat.kind.to_string(),
        stat.links,
        stat.size,
        stat.blocks
    )
}

/// 表头加上每项一行
pub fn table<'a>(stats: impl IntoIterator<Item = &'a Stat>) -> Vec<String> {
    std::iter::once(header())
        .chain(stats.into_iter().map(row))
        .collect()
}

/// 读出的字节按文本输出，零字节显示为 `0`
///
/// 前移偏移量后写入留下的零与截断扩展补上的零原本显示不同：
/// 前者输出不可见的 NUL 字符，后者输出数字 `0`。这里把两者合并，统一显示为 `0`。
pub fn bytes(data: &[u8]) -> String {
    data.iter()
        .map(|&b| if b == 0 { '0' } else { char::from(b) })
        .collect()
}

#[cfg(test)]
mod tests {
    use memfs::Volume;

    use super::{Painter, bytes, header, row, table};

    #[test]
    fn colors() {
        assert_eq!("\u{1B}[92mdone\u{1B}[0m", Painter::new(true).ok("done"));
        assert_eq!("\u{1B}[91mfail\u{1B}[0m", Painter::new(true).error("fail"));
        assert_eq!("fail", Painter::new(false).error("fail"));
    }

    #[test]
    fn rows() {
        let mut volume = Volume::new();
        volume.mkfs(2).unwrap();
        let file = volume.create("a").unwrap();
        let link = volume.link("a", "b").unwrap();

        assert_eq!(
            "         №        type       links      length      blocks  name",
            header()
        );
        assert_eq!(
            "         0     regular           1           0           0  a",
            row(&file)
        );
        assert_eq!(
            "         0     regular           2           0           0  b->a",
            row(&link)
        );
        assert_eq!(3, table(&volume.list().unwrap()).len());
    }

    #[test]
    fn zero_bytes_as_digits() {
        assert_eq!("xx00", bytes(b"xx\0\0"));
        assert_eq!("", bytes(&[]));
    }
}
