mod cli;
mod command;
mod render;
mod shell;

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use clap::Parser;

use self::{cli::Cli, render::Painter, shell::Shell};

const LINE_START: &str = ">> ";

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut shell = Shell::new(Painter::new(!cli.no_color));
    let mut stdout = io::stdout().lock();

    if let Some(capacity) = cli.capacity {
        log::info!("capacity={capacity}");
        for line in shell.run_line(&format!("mkfs {capacity}")).unwrap_or_default() {
            writeln!(stdout, "{line}")?;
        }
    }

    let (input, prompt): (Box<dyn BufRead>, bool) = match &cli.script {
        Some(script) => {
            log::info!("script={script:?}");
            (Box::new(BufReader::new(File::open(script)?)), false)
        }
        None => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            (Box::new(stdin.lock()), prompt)
        }
    };

    if prompt {
        write!(stdout, "{LINE_START}")?;
        stdout.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        if cli.echo {
            writeln!(stdout, "{LINE_START}{line}")?;
        }

        let Some(output) = shell.run_line(&line) else {
            break;
        };
        for line in output {
            writeln!(stdout, "{line}")?;
        }

        if prompt {
            write!(stdout, "{LINE_START}")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
