//! Terminal output for the markdown produced by `marshal_core::display`.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled through termimad or as-is.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Writes `markdown` to stdout.
    ///
    /// Headers keep their leading hashes in rich mode; status lines are
    /// colored by their `Success:` or `Error:` prefix.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_style(line) {
                LineStyle::Header => println!("\x1b[36m{line}\x1b[0m"),
                LineStyle::Success => println!("\x1b[32m{line}\x1b[0m"),
                LineStyle::Error => println!("\x1b[31m{line}\x1b[0m"),
                LineStyle::Inline => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum LineStyle {
    Header,
    Success,
    Error,
    Inline,
}

fn line_style(line: &str) -> LineStyle {
    if line.starts_with('#') {
        LineStyle::Header
    } else if line.starts_with("Success:") {
        LineStyle::Success
    } else if line.starts_with("Error:") {
        LineStyle::Error
    } else {
        LineStyle::Inline
    }
}
