mod parse;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use ntm::Scheduler;

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let program = parse::parse(&mut reader).context("parse machine definition")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for run in &program.runs {
        let verdict = Scheduler::run(&program.index, run, program.max_steps);
        writeln!(out, "{}", verdict.as_char()).context("write verdict")?;
    }
    out.flush().context("flush stdout")?;

    Ok(())
}
