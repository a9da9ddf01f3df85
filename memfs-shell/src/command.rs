//! 命令行文本到文件系统操作的翻译

use derive_more::{Display, From};
use memfs::Handle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 容量保持文本形式，交由文件系统判断其合法性
    Mkfs(String),
    Create(String),
    Link(String, String),
    Unlink(String),
    Open(String),
    Close(Handle),
    Seek(Handle, usize),
    Write(Handle, usize, String),
    Read(Handle, usize),
    Truncate(String, usize),
    Stat(String),
    Ls,
    Umount,
    Help,
    Exit,
}

#[derive(Debug, Display, From, PartialEq, Eq)]
pub enum CommandError {
    #[display(fmt = "Unknown command: {}", _0)]
    #[from(ignore)]
    Unknown(String),
    #[display(fmt = "Usage: {}", _0)]
    #[from(ignore)]
    Usage(&'static str),
    #[display(fmt = "Type should be int! got {:?}", _0)]
    #[from(ignore)]
    NotInt(String),
    #[display(fmt = "{}", _0)]
    Fs(memfs::Error),
}

pub const HELP: &str = "\
mkfs n               initialise the file system with n descriptors
create name          create a file
link name1 name2     add name2 as a link to name1
unlink name          remove a link
open name            open a file, printing its id
close fd             close an opened file
seek fd offset       set the offset of an opened file
write fd size val    fill size bytes at the offset with val
read fd size         read size bytes at the offset
truncate name size   change the length of a file
stat name            show a file or link
ls                   list everything
umount               destroy the file system
help                 show this message
exit                 leave the shell";

impl Command {
    /// 解析一行输入；空行与 `#` 开头的注释返回空
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("mkfs", &[n]) => Self::Mkfs(n.into()),
            ("mkfs", _) => return Err(CommandError::Usage("mkfs n")),
            ("create", &[name]) => Self::Create(name.into()),
            ("create", _) => return Err(CommandError::Usage("create name")),
            ("link", &[name, new_name]) => Self::Link(name.into(), new_name.into()),
            ("link", _) => return Err(CommandError::Usage("link name1 name2")),
            ("unlink", &[name]) => Self::Unlink(name.into()),
            ("unlink", _) => return Err(CommandError::Usage("unlink name")),
            ("open", &[name]) => Self::Open(name.into()),
            ("open", _) => return Err(CommandError::Usage("open name")),
            ("close", &[fd]) => Self::Close(handle(fd)?),
            ("close", _) => return Err(CommandError::Usage("close fd")),
            ("seek", &[fd, offset]) => Self::Seek(handle(fd)?, int(offset)?),
            ("seek", _) => return Err(CommandError::Usage("seek fd offset")),
            ("write", &[fd, size, value]) => Self::Write(handle(fd)?, int(size)?, value.into()),
            ("write", _) => return Err(CommandError::Usage("write fd size val")),
            ("read", &[fd, size]) => Self::Read(handle(fd)?, int(size)?),
            ("read", _) => return Err(CommandError::Usage("read fd size")),
            ("truncate", &[name, size]) => Self::Truncate(name.into(), int(size)?),
            ("truncate", _) => return Err(CommandError::Usage("truncate name size")),
            ("stat", &[name]) => Self::Stat(name.into()),
            ("stat", _) => return Err(CommandError::Usage("stat name")),
            ("ls", []) => Self::Ls,
            ("umount", []) => Self::Umount,
            ("help", _) => Self::Help,
            ("exit" | "quit", _) => Self::Exit,
            ("ls", _) => return Err(CommandError::Usage("ls")),
            ("umount", _) => return Err(CommandError::Usage("umount")),
            _ => return Err(CommandError::Unknown(name.into())),
        };

        Ok(Some(command))
    }
}

fn int(arg: &str) -> Result<usize, CommandError> {
    arg.parse().map_err(|_| CommandError::NotInt(arg.into()))
}

fn handle(arg: &str) -> Result<Handle, CommandError> {
    int(arg).map(Handle::from)
}

#[cfg(test)]
mod tests {
    use memfs::Handle;

    use super::{Command, CommandError};

    #[test]
    fn parse_commands() {
        assert_eq!(Ok(Some(Command::Mkfs("4".into()))), Command::parse("mkfs 4"));
        assert_eq!(
            Ok(Some(Command::Link("a".into(), "b".into()))),
            Command::parse("  link   a b ")
        );
        assert_eq!(
            Ok(Some(Command::Write(Handle::from(0), 10, "x".into()))),
            Command::parse("write 0 10 x")
        );
        assert_eq!(Ok(Some(Command::Ls)), Command::parse("ls"));
        assert_eq!(Ok(Some(Command::Exit)), Command::parse("quit"));
        assert_eq!(Ok(None), Command::parse("   "));
        assert_eq!(Ok(None), Command::parse("# comment"));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Err(CommandError::Unknown("mount".into())),
            Command::parse("mount 3")
        );
        assert_eq!(
            Err(CommandError::Usage("read fd size")),
            Command::parse("read 0")
        );
        assert_eq!(
            Err(CommandError::NotInt("-1".into())),
            Command::parse("seek 0 -1")
        );
        assert_eq!(Err(CommandError::Usage("ls")), Command::parse("ls -l"));
        // 容量的合法性由文件系统判断
        assert_eq!(
            Ok(Some(Command::Mkfs("abc".into()))),
            Command::parse("mkfs abc")
        );
    }

    #[test]
    fn fs_error_converts() {
        let err = CommandError::from(memfs::Error::NotFound);
        assert_eq!(CommandError::Fs(memfs::Error::NotFound), err);
        assert_eq!(memfs::Error::NotFound.to_string(), err.to_string());
    }
}
