//! Interactive event loop
//!
//! Reads one command per line, applies it to the session and re-renders.
//! Generic over reader/writer so tests can drive it with in-memory buffers.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::application::{Event, HierarchySession, Outcome, TableRenderer, EVENT_HELP};

const PROMPT: &str = "> ";

/// Run until `quit` or end of input.
pub fn run_browse<R: BufRead, W: Write>(
    session: &mut HierarchySession,
    renderer: &TableRenderer,
    input: R,
    mut out: W,
) -> io::Result<()> {
    write!(out, "{}", renderer.render(&session.rows()))?;
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match line.parse::<Event>() {
            Ok(event) => {
                debug!("event: {:?}", event);
                match session.apply(event) {
                    Outcome::Render => write!(out, "{}", renderer.render(&session.rows()))?,
                    Outcome::Help => writeln!(out, "{}", EVENT_HELP)?,
                    Outcome::Quit => return Ok(()),
                }
            }
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}
