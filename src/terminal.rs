use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::types::Style;

/// Raw-mode terminal session with mouse reporting enabled.
/// State is restored when the session drops.
pub struct Session {
    stdout: io::Stdout,
}

impl Session {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                // Block until event
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))
    }

    /// Queue a styled run of text at the given cell. Call [`Session::flush`]
    /// once the frame is complete.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: &Style) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(x, y))?;

        if let Some(fg) = style.foreground {
            let rgb = fg.to_rgb();
            queue!(
                self.stdout,
                SetForegroundColor(CtColor::Rgb {
                    r: rgb.r,
                    g: rgb.g,
                    b: rgb.b,
                })
            )?;
        }
        if let Some(bg) = style.background {
            let rgb = bg.to_rgb();
            queue!(
                self.stdout,
                SetBackgroundColor(CtColor::Rgb {
                    r: rgb.r,
                    g: rgb.g,
                    b: rgb.b,
                })
            )?;
        }
        if style.text_style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.text_style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        if style.text_style.italic {
            queue!(self.stdout, SetAttribute(Attribute::Italic))?;
        }
        if style.text_style.underline {
            queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
        }

        queue!(self.stdout, Print(text), SetAttribute(Attribute::Reset))?;
        queue!(self.stdout, crossterm::style::ResetColor)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
