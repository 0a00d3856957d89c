//! Terminal rendering of the markdown produced by core `Display` impls.
//!
//! Rich output goes through termimad; `--no-color` prints the markdown as is.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match header_line(line) {
                // keep the leading hashes visible
                Some(header) => println!("\x1b[34m{header}\x1b[0m"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A markdown header line (`#` to `######` followed by a space).
fn header_line(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    ((1..=6).contains(&hashes) && line[hashes..].starts_with(' ')).then_some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        assert!(!TerminalRenderer::new(false).rich_enabled);
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_header_detection() {
        assert_eq!(header_line("# 1. Star"), Some("# 1. Star"));
        assert_eq!(header_line("## Details"), Some("## Details"));
        assert_eq!(header_line("#hashtag"), None);
        assert_eq!(header_line("- Status: draft"), None);
        assert_eq!(header_line("####### too deep"), None);
    }
}
