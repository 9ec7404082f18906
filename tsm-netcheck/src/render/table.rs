use std::io::Write;
use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::error::NetcheckError;
use crate::probe::{Outcome, ProbeRegistry, ProbeState};


// ": " after the label
const LABEL_PADDING: usize = 2;


/// Draws one line per probe: the padded label followed by the newest
/// outcomes that fit into the terminal width.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    column_width: usize,
    terminal_width: usize,
}


impl TableRenderer {
    pub fn new(registry: &ProbeRegistry, terminal_width: usize) -> TableRenderer {
        return TableRenderer {
            column_width: TableRenderer::column_width_for(registry),
            terminal_width,
        };
    }

    /// Width of the widest "<kind> <target>" label plus the separator
    pub fn column_width_for(registry: &ProbeRegistry) -> usize {
        let widest = registry
            .iter()
            .map(|definition| definition.label().chars().count())
            .max()
            .unwrap_or(0);

        widest + LABEL_PADDING
    }

    /// Number of outcomes shown per line
    pub fn history_budget(&self) -> usize {
        self.terminal_width.saturating_sub(self.column_width)
    }

    /// Writes the table and returns the number of lines written
    pub fn render<W: Write>(&self, out: &mut W, states: &[ProbeState]) -> Result<usize, NetcheckError> {
        for state in states {
            self.render_line(out, state)?;
        }

        out.flush()?;
        return Ok(states.len());
    }

    fn render_line<W: Write>(&self, out: &mut W, state: &ProbeState) -> Result<(), NetcheckError> {
        let label = format!("{}: ", state.label());
        queue!(out, Print(format!("{:<width$}", label, width = self.column_width)))?;

        for outcome in state.get_history().tail(self.history_budget()) {
            queue!(
                out,
                SetForegroundColor(color_for(*outcome)),
                Print(outcome.symbol()),
                ResetColor
            )?;
        }

        queue!(out, ResetColor, Print("\n"))?;
        return Ok(());
    }

    /// Moves the cursor back to the first line of the table so the next
    /// frame overwrites this one
    pub fn rewind<W: Write>(&self, out: &mut W, lines: usize) -> Result<(), NetcheckError> {
        if lines == 0 {
            return Ok(());
        }

        let rows = u16::try_from(lines).unwrap_or(u16::MAX);
        queue!(out, MoveUp(rows))?;
        out.flush()?;
        return Ok(());
    }
}


fn color_for(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Success => Color::Green,
        Outcome::Fail | Outcome::Unknown => Color::Red,
        Outcome::Pending => Color::DarkGrey,
    }
}


/// Removes CSI escape sequences, leaving what the terminal actually shows
#[cfg(test)]
pub(crate) fn visible_text(raw: &str) -> String {
    let mut visible = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            while let Some(next) = chars.next() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        visible.push(c);
    }

    visible
}
