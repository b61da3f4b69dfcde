//! Coloured status messages

use std::fmt::Display;

use owo_colors::{OwoColorize, Style, colors::css};
pub use supports_color::Stream;

/// The kinds of status message the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Green
    Success,
    /// Amber
    Warning,
    /// Blue
    Info,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().fg::<css::Green>(),
            Self::Warning => Style::new().fg::<css::Orange>(),
            Self::Info => Style::new().fg::<css::LightBlue>(),
        }
    }

    /// Colours `text` if the stream it will be written to supports colour.
    pub fn paint(self, text: impl Display, stream: Stream) -> String {
        self.apply(text, supports_color::on(stream).is_some())
    }

    fn apply(self, text: impl Display, colour: bool) -> String {
        if colour {
            text.style(self.style()).to_string()
        } else {
            text.to_string()
        }
    }
}
