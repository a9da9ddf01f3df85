//! 执行命令并生成输出行

use memfs::{Stat, Volume};

use crate::command::{Command, CommandError, HELP};
use crate::render::{self, Painter};

/// 一条命令执行后的结果，尚未着色
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok(String),
    Table(Vec<Stat>),
    Data(Vec<u8>),
    Help,
    Exit,
}

pub struct Shell {
    volume: Volume,
    painter: Painter,
}

impl Shell {
    #[inline]
    pub fn new(painter: Painter) -> Self {
        Self {
            volume: Volume::new(),
            painter,
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        log::debug!("{command:?}");
        let vol = &mut self.volume;

        let outcome = match command {
            Command::Mkfs(capacity) => {
                vol.mkfs_str(&capacity)?;
                Outcome::Ok("File system is initialised!".into())
            }
            Command::Create(name) => Outcome::Table(vec![vol.create(&name)?]),
            Command::Link(name, new_name) => Outcome::Table(vec![vol.link(&name, &new_name)?]),
            Command::Unlink(name) => {
                vol.unlink(&name)?;
                Outcome::Ok("Unlinked!".into())
            }
            Command::Open(name) => {
                let fd = vol.open(&name)?;
                Outcome::Ok(format!("File {name} is opened with id {fd}!"))
            }
            Command::Close(fd) => {
                vol.close(fd)?;
                Outcome::Ok(format!("File with id {fd} is closed!"))
            }
            Command::Seek(fd, offset) => {
                vol.seek(fd, offset)?;
                Outcome::Ok("Offset was set!".into())
            }
            Command::Write(fd, size, value) => {
                vol.write(fd, size, value.as_bytes())?;
                Outcome::Ok("Data were written to file!".into())
            }
            Command::Read(fd, size) => Outcome::Data(vol.read(fd, size)?),
            Command::Truncate(name, size) => {
                vol.truncate(&name, size)?;
                Outcome::Ok(format!("File {name} was successfully truncated!"))
            }
            Command::Stat(name) => Outcome::Table(vec![vol.stat(&name)?]),
            Command::Ls => Outcome::Table(vol.list()?),
            Command::Umount => {
                vol.umount()?;
                Outcome::Ok("File system is destroyed!".into())
            }
            Command::Help => Outcome::Help,
            Command::Exit => Outcome::Exit,
        };

        Ok(outcome)
    }

    /// 解析并执行一行输入，返回要打印的行；遇到 `exit` 时返回空
    pub fn run_line(&mut self, line: &str) -> Option<Vec<String>> {
        let result = Command::parse(line).and_then(|command| {
            command
                .map(|command| self.execute(command))
                .transpose()
        });

        let lines = match result {
            Ok(None) => Vec::new(),
            Ok(Some(Outcome::Exit)) => return None,
            Ok(Some(Outcome::Ok(message))) => vec![self.painter.ok(&message)],
            Ok(Some(Outcome::Table(stats))) => render::table(&stats),
            Ok(Some(Outcome::Data(data))) => vec![render::bytes(&data)],
            Ok(Some(Outcome::Help)) => HELP.lines().map(str::to_owned).collect(),
            Err(err) => vec![self.painter.error(&err.to_string())],
        };
        Some(lines)
    }
}

#[cfg(test)]
mod tests {
    use memfs::{Error, Handle};

    use super::{Outcome, Shell};
    use crate::command::{Command, CommandError};
    use crate::render::Painter;

    fn shell() -> Shell {
        Shell::new(Painter::new(false))
    }

    #[test]
    fn session() {
        let mut shell = shell();
        assert_eq!(
            Err(CommandError::Fs(Error::NotInitialized)),
            shell.execute(Command::Create("a".into()))
        );
        assert_eq!(
            Some(vec!["File system is initialised!".to_owned()]),
            shell.run_line("mkfs 4")
        );
        assert_eq!(
            Some(vec!["The file system was already been initialised!".to_owned()]),
            shell.run_line("mkfs 4")
        );

        assert_eq!(2, shell.run_line("create a").unwrap().len());
        assert_eq!(
            Some(vec!["File a is opened with id 0!".to_owned()]),
            shell.run_line("open a")
        );
        shell.run_line("write 0 10 x").unwrap();
        assert_eq!(Some(vec!["xxxxxxxxxx".to_owned()]), shell.run_line("read 0 10"));
        assert_eq!(
            Ok(Outcome::Data(b"xxxxx".to_vec())),
            shell.execute(Command::Read(Handle::from(0), 5))
        );
        assert_eq!(
            Some(vec![Error::ReadOutOfBounds.to_string()]),
            shell.run_line("read 0 20")
        );
        assert_eq!(
            Some(vec!["File a was successfully truncated!".to_owned()]),
            shell.run_line("truncate a 12")
        );
        assert_eq!(Some(vec!["xxxxxxxxxx00".to_owned()]), shell.run_line("read 0 12"));
    }

    #[test]
    fn links_listed() {
        let mut shell = shell();
        shell.run_line("mkfs 2").unwrap();
        shell.run_line("create a").unwrap();
        shell.run_line("link a b").unwrap();
        let lines = shell.run_line("ls").unwrap();
        assert_eq!(3, lines.len());
        assert!(lines[2].ends_with("  b->a"));

        assert_eq!(
            Some(vec![Error::UnlinkPrimaryForbidden.to_string()]),
            shell.run_line("unlink a")
        );
        assert_eq!(Some(vec!["Unlinked!".to_owned()]), shell.run_line("unlink b"));
    }

    #[test]
    fn exit_and_blank_lines() {
        let mut shell = shell();
        assert_eq!(Some(vec![]), shell.run_line(""));
        assert_eq!(None, shell.run_line("exit"));
        assert!(shell.run_line("help").unwrap().len() > 10);
    }

    #[test]
    fn invalid_value_and_capacity() {
        let mut shell = shell();
        assert_eq!(
            Some(vec![Error::InvalidCapacity.to_string()]),
            shell.run_line("mkfs -2")
        );
        shell.run_line("mkfs 1").unwrap();
        shell.run_line("create a").unwrap();
        shell.run_line("open a").unwrap();
        assert_eq!(
            Some(vec![Error::InvalidValueSize.to_string()]),
            shell.run_line("write 0 3 xy")
        );
    }

    #[test]
    fn huge_truncate_reports_error() {
        let mut shell = shell();
        shell.run_line("mkfs 1").unwrap();
        shell.run_line("create a").unwrap();
        assert_eq!(
            Some(vec![Error::OutOfMemory.to_string()]),
            shell.run_line(&format!("truncate a {}", usize::MAX))
        );
        assert_eq!(
            Some(vec!["File a was successfully truncated!".to_owned()]),
            shell.run_line("truncate a 3")
        );
    }
}
