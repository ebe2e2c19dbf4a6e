//! Reads the five-section stdin protocol into a `TransitionIndex`, a step
//! budget, and the list of run strings.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use ntm::{Move, State, Symbol, TransitionIndex};

pub struct Program {
    pub index: TransitionIndex,
    pub max_steps: u64,
    pub runs: Vec<Vec<u8>>,
}

/// Read one line, stripping the trailing `\n` (and a `\r` before it, if
/// present). Returns `None` at EOF with nothing left to read.
fn read_line(reader: &mut impl BufRead) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).context("read line")?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(buf))
}

fn expect_line(reader: &mut impl BufRead, keyword: &str) -> Result<()> {
    let line = read_line(reader)?.with_context(|| format!("expected '{keyword}' section"))?;
    if line.as_slice() != keyword.as_bytes() {
        bail!("expected '{keyword}' section");
    }
    Ok(())
}

/// Parse one `tr` record: `<q_in> <c_in> <c_out> <move> <q_out>`. `None`
/// means the line is not a well-formed record (the `tr` section has ended).
fn parse_transition(line: &[u8]) -> Option<(State, Symbol, Symbol, Move, State)> {
    let line = std::str::from_utf8(line).ok()?;
    let mut fields = line.split(' ');
    let q_in: u32 = fields.next()?.parse().ok()?;
    let c_in = fields.next()?;
    let c_out = fields.next()?;
    let move_ = fields.next()?;
    let q_out: u32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let symbol = |token: &str| -> Option<Symbol> {
        if token == "_" {
            Some(Symbol::BLANK)
        } else {
            let bytes = token.as_bytes();
            (bytes.len() == 1).then(|| Symbol(bytes[0]))
        }
    };
    let c_in = symbol(c_in)?;
    let c_out = symbol(c_out)?;
    let move_ = match move_ {
        "L" => Move::Left,
        "S" => Move::Stay,
        "R" => Move::Right,
        other => {
            log::debug!("invalid move character {other:?}, treating as Stay");
            Move::Stay
        }
    };
    Some((State(q_in), c_in, c_out, move_, State(q_out)))
}

/// Parse a bare decimal state number, e.g. one line of the `acc` section.
fn parse_state(line: &[u8]) -> Option<State> {
    std::str::from_utf8(line).ok()?.parse().ok().map(State)
}

pub fn parse(reader: &mut impl BufRead) -> Result<Program> {
    expect_line(reader, "tr")?;

    let mut index = TransitionIndex::new();
    let acc_line = loop {
        let Some(line) = read_line(reader)? else {
            bail!("expected 'acc' section");
        };
        match parse_transition(&line) {
            Some((q_in, c_in, c_out, move_, q_out)) => {
                index.insert(q_in, c_in, c_out, move_, q_out);
            }
            None => break line,
        }
    };
    if acc_line.as_slice() != b"acc" {
        bail!("expected 'acc' section");
    }

    let max_line = loop {
        let Some(line) = read_line(reader)? else {
            bail!("expected 'max' section");
        };
        match parse_state(&line) {
            Some(state) => index.mark_accept(state),
            None => break line,
        }
    };
    if max_line.as_slice() != b"max" {
        bail!("expected 'max' section");
    }

    let max_steps: u64 = read_line(reader)?
        .context("expected max steps value")
        .and_then(|line| {
            std::str::from_utf8(&line)
                .context("max steps value is not valid UTF-8")?
                .parse()
                .context("max steps value is not a valid integer")
        })?;

    expect_line(reader, "run")?;

    let mut runs = Vec::new();
    while let Some(line) = read_line(reader)? {
        runs.push(line);
    }

    Ok(Program {
        index,
        max_steps,
        runs,
    })
}
