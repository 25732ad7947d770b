//! Interactive stepping through a sequence of grids

use super::display::{ColorOutput, SolutionFormatter};
use crate::game_of_life::Grid;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// A command read from the viewer prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    Next,
    Previous,
    Quit,
}

impl ViewerCommand {
    /// `n`/`l` forward, `p`/`h` back, `q` quits; anything else is ignored
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "n" | "l" => Some(ViewerCommand::Next),
            "p" | "h" => Some(ViewerCommand::Previous),
            "q" => Some(ViewerCommand::Quit),
            _ => None,
        }
    }
}

/// Cursor over a non-empty list of frames, wrapping at both ends
#[derive(Debug, Clone)]
pub struct SequenceViewer {
    frames: Vec<(String, Grid)>,
    position: usize,
}

impl SequenceViewer {
    /// Frames are `(label, grid)` pairs; at least one is required
    pub fn new(frames: Vec<(String, Grid)>) -> Result<Self> {
        if frames.is_empty() {
            anyhow::bail!("Nothing to view: no grids given");
        }
        Ok(Self { frames, position: 0 })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current(&self) -> &Grid {
        &self.frames[self.position].1
    }

    pub fn forward(&mut self) {
        self.position = (self.position + 1) % self.frames.len();
    }

    pub fn backward(&mut self) {
        self.position = (self.position + self.frames.len() - 1) % self.frames.len();
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let (label, grid) = &self.frames[self.position];
        writeln!(
            out,
            "{}",
            ColorOutput::highlight(&format!("[{}/{}] {}", self.position + 1, self.frames.len(), label))
        )?;
        write!(out, "{}", SolutionFormatter::format_grid_compact(grid))?;
        write!(out, "(n/l next, p/h previous, q quit) > ")?;
        out.flush()?;
        Ok(())
    }

    /// Read commands from `input` until `q` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        let mut line = String::new();
        loop {
            self.render(&mut out)?;

            line.clear();
            let read = input.read_line(&mut line).context("Failed to read viewer command")?;
            if read == 0 {
                writeln!(out)?;
                return Ok(());
            }

            match ViewerCommand::parse(&line) {
                Some(ViewerCommand::Next) => self.forward(),
                Some(ViewerCommand::Previous) => self.backward(),
                Some(ViewerCommand::Quit) => return Ok(()),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::parse_grid_from_string;
    use std::io::Cursor;

    fn frames() -> Vec<(String, Grid)> {
        ["000\n111\n000", "010\n010\n010", "000\n000\n000"]
            .iter()
            .enumerate()
            .map(|(i, text)| (format!("frame {}", i), parse_grid_from_string(text).unwrap()))
            .collect()
    }

    #[test]
    fn test_navigation_wraps() {
        let mut viewer = SequenceViewer::new(frames()).unwrap();
        viewer.backward();
        assert_eq!(viewer.position(), 2);
        viewer.forward();
        assert_eq!(viewer.position(), 0);
        viewer.forward();
        assert_eq!(viewer.current().living_count(), 3);
        assert_eq!(viewer.position(), 1);
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(ViewerCommand::parse("n\n"), Some(ViewerCommand::Next));
        assert_eq!(ViewerCommand::parse(" l "), Some(ViewerCommand::Next));
        assert_eq!(ViewerCommand::parse("h"), Some(ViewerCommand::Previous));
        assert_eq!(ViewerCommand::parse("q"), Some(ViewerCommand::Quit));
        assert_eq!(ViewerCommand::parse("x"), None);
    }

    #[test]
    fn test_run_until_quit() {
        let mut viewer = SequenceViewer::new(frames()).unwrap();
        let mut out = Vec::new();
        viewer.run(Cursor::new("n\nn\nx\np\nq\nn\n"), &mut out).unwrap();

        assert_eq!(viewer.position(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("frame 2"));
        assert!(text.contains("·█·"));
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let mut viewer = SequenceViewer::new(frames()).unwrap();
        viewer.run(Cursor::new("p\n"), std::io::sink()).unwrap();
        assert_eq!(viewer.position(), 2);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(SequenceViewer::new(Vec::new()).is_err());
    }
}
