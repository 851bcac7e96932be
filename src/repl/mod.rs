//! REPL Module
//!
//! The interactive command loop: read a line, parse it, run it, repeat.

pub mod command;
pub mod session;

use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::api::DataSource;

pub use command::{clean_input, Command, COMMANDS};
pub use session::{Flow, Session, CATCH_ROLL};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Reads commands from `input` until `exit` or end of input.
///
/// Command failures are reported on `out` and do not end the loop; only a
/// failure to read input or write output does.
pub async fn run<S, R, I, W>(session: &mut Session<S, R>, input: I, out: &mut W) -> std::io::Result<()>
where
    S: DataSource,
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            debug!("input closed");
            return Ok(());
        };

        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match session.execute(command, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }
}
