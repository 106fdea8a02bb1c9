use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::capture::Rgba;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, EnumIter, AsRefStr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    #[strum(serialize = "dark")]
    Dark,
    #[strum(serialize = "light")]
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub surface: Rgba,
    pub border: Rgba,
    pub text: Rgba,
    pub text_muted: Rgba,
    pub accent: Rgba,
    pub positive: Rgba,
    pub negative: Rgba,
}

const DARK: Palette = Palette {
    background: Rgba::opaque(0x05, 0x09, 0x0f),
    surface: Rgba::opaque(0x0d, 0x15, 0x20),
    border: Rgba::new(255, 255, 255, 20),
    text: Rgba::opaque(0xe6, 0xed, 0xf7),
    text_muted: Rgba::opaque(0x7f, 0x8b, 0xa0),
    accent: Rgba::opaque(0x5c, 0xb0, 0xff),
    positive: Rgba::opaque(0x3f, 0xb6, 0x8b),
    negative: Rgba::opaque(0xf0, 0x63, 0x5c),
};

const LIGHT: Palette = Palette {
    background: Rgba::opaque(0xf8, 0xfb, 0xff),
    surface: Rgba::WHITE,
    border: Rgba::new(0, 0, 0, 15),
    text: Rgba::opaque(0x0c, 0x16, 0x25),
    text_muted: Rgba::opaque(0x5b, 0x66, 0x78),
    accent: Rgba::opaque(0x25, 0x63, 0xeb),
    positive: Rgba::opaque(0x0e, 0xa6, 0x6c),
    negative: Rgba::opaque(0xe1, 0x1d, 0x48),
};

impl Theme {
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Background fill for captures so saved images match the screen.
    pub fn capture_background(&self) -> String {
        self.palette().background.to_css()
    }

    /// Custom properties consumed by the dashboard stylesheet.
    pub fn css_variables(&self) -> String {
        let p = self.palette();
        [
            ("--bg", p.background),
            ("--panel", p.surface),
            ("--border", p.border),
            ("--text", p.text),
            ("--text-muted", p.text_muted),
            ("--accent", p.accent),
            ("--positive", p.positive),
            ("--negative", p.negative),
        ]
        .iter()
        .map(|(name, color)| format!("{}: {};", name, color.to_css()))
        .collect::<Vec<_>>()
        .join(" ")
    }
}
