//! Modal equation displays.

use std::io::{self, BufRead, Write};

use crate::viewer::SizedView;

/// Shows a fitted equation, returning once the user dismisses it.
pub trait EquationDisplay {
    fn show_modal(&mut self, view: &SizedView) -> io::Result<()>;
}

impl<D: EquationDisplay + ?Sized> EquationDisplay for Box<D> {
    fn show_modal(&mut self, view: &SizedView) -> io::Result<()> {
        (**self).show_modal(view)
    }
}

/// Draws a framed view whose size in cells follows the trimmed container,
/// then waits for Enter.
pub struct TerminalDisplay<W, R> {
    out: W,
    input: R,
    wait: bool,
    cell_width_pt: f64,
    cell_height_pt: f64,
}

impl<W: Write, R: BufRead> TerminalDisplay<W, R> {
    pub fn new(out: W, input: R, cell_width_pt: f64, cell_height_pt: f64) -> Self {
        Self {
            out,
            input,
            wait: true,
            cell_width_pt,
            cell_height_pt,
        }
    }

    pub fn no_wait(mut self) -> Self {
        self.wait = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, R: BufRead> EquationDisplay for TerminalDisplay<W, R> {
    fn show_modal(&mut self, view: &SizedView) -> io::Result<()> {
        let frame = render_frame(view, self.cell_width_pt, self.cell_height_pt);
        self.out.write_all(frame.as_bytes())?;
        if self.wait {
            write!(self.out, "Press Enter to close. ")?;
            self.out.flush()?;
            let mut line = String::new();
            self.input.read_line(&mut line)?;
        } else {
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Writes one JSON report per view, never waits.
pub struct JsonDisplay<W> {
    out: W,
}

impl<W: Write> JsonDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> EquationDisplay for JsonDisplay<W> {
    fn show_modal(&mut self, view: &SizedView) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &view.report()).map_err(io::Error::from)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

fn cells(points: f64, cell_pt: f64) -> usize {
    if cell_pt > 0.0 && points.is_finite() {
        (points / cell_pt).round().max(1.0) as usize
    } else {
        1
    }
}

/// Box-drawn frame with the block's lines centred; the font size labels the
/// bottom edge.
pub fn render_frame(view: &SizedView, cell_width_pt: f64, cell_height_pt: f64) -> String {
    let lines = view.block.lines();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let cols = cells(view.container.width, cell_width_pt).max(widest + 2);
    let rows = cells(view.container.height, cell_height_pt).max(lines.len());

    let top_pad = (rows - lines.len()) / 2;
    let mut frame = String::new();
    frame.push('┌');
    frame.push_str(&"─".repeat(cols));
    frame.push_str("┐\n");

    for row in 0..rows {
        let text = row
            .checked_sub(top_pad)
            .and_then(|i| lines.get(i))
            .copied()
            .unwrap_or("");
        frame.push_str(&format!("│{:^width$}│\n", text, width = cols));
    }

    let label = format!(" {:.1} pt ", view.block.font_size);
    frame.push('└');
    if label.chars().count() + 2 <= cols {
        let rest = cols - label.chars().count() - 1;
        frame.push('─');
        frame.push_str(&label);
        frame.push_str(&"─".repeat(rest));
    } else {
        frame.push_str(&"─".repeat(cols));
    }
    frame.push_str("┘\n");
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use eqn_typeset::{Container, RenderedBlock};

    fn view(block: RenderedBlock, width: f64, height: f64) -> SizedView {
        SizedView {
            expression: "x".to_string(),
            block,
            container: Container::new(width, height),
        }
    }

    #[test]
    fn test_frame_size_follows_container() {
        let block = RenderedBlock::fallback("x y").with_font_size(12.0);
        let frame = render_frame(&view(block, 700.0, 56.0), 7.0, 14.0);
        let rows: Vec<&str> = frame.lines().collect();

        assert_eq!(rows.len(), 4 + 2);
        assert_eq!(rows[0].chars().count(), 100 + 2);
        assert!(rows.iter().all(|r| r.chars().count() == rows[0].chars().count()));
        assert!(frame.contains("x y"));
        assert!(rows[rows.len() - 1].contains("12.0 pt"));
    }

    #[test]
    fn test_frame_widens_for_long_lines() {
        let block = RenderedBlock::fallback("a very long literal expression");
        let frame = render_frame(&view(block, 7.0, 14.0), 7.0, 14.0);
        assert!(frame.contains("a very long literal expression"));
    }

    #[test]
    fn test_terminal_display_waits_for_enter() {
        let block = RenderedBlock::fallback("x");
        let mut display = TerminalDisplay::new(Vec::new(), &b"\n"[..], 7.0, 14.0);
        display.show_modal(&view(block, 140.0, 28.0)).unwrap();

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert!(out.ends_with("Press Enter to close. "));
    }

    #[test]
    fn test_json_display_writes_report() {
        let block = RenderedBlock::fallback("hello world");
        let mut out = Vec::new();
        JsonDisplay::new(&mut out)
            .show_modal(&view(block, 100.0, 50.0))
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["expression"], "x");
        assert_eq!(json["fallback"], true);
        assert!(json["latex"].is_null());
        assert_eq!(json["container"]["width"], 100.0);
    }
}
