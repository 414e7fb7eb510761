// Color palette for the admin console
//
// The web dashboard uses a single cyan accent on white cards. Terminals vary,
// so "auto" sticks to the ANSI palette and only the accent is true color.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Brand accent (#00c6d8)
pub const ACCENT: Color = Color::Rgb(0x00, 0xc6, 0xd8);

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub accent: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub error: Color,
    pub success: Color,
    pub buyer: Color,
    pub seller: Color,
    pub star: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

impl Theme {
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::auto(),
        }
    }

    /// Terminal palette with the brand accent
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_type: BorderType::Rounded,
            accent: ACCENT,
            highlight: Color::Yellow,
            selected_bg: ACCENT,
            selected_fg: Color::Black,
            error: Color::Red,
            success: Color::Green,
            buyer: Color::Blue,
            seller: Color::Magenta,
            star: Color::Yellow,
        }
    }

    /// White cards, close to the web dashboard
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::Rgb(0xff, 0xff, 0xff),
            foreground: Color::Rgb(0x1f, 0x29, 0x37),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            border: Color::Rgb(0xd1, 0xd5, 0xdb),
            border_type: BorderType::Rounded,
            accent: ACCENT,
            highlight: Color::Rgb(0x00, 0x8c, 0x99),
            selected_bg: Color::Rgb(0xe0, 0xf7, 0xfa),
            selected_fg: Color::Rgb(0x1f, 0x29, 0x37),
            error: Color::Rgb(0xdc, 0x26, 0x26),
            success: Color::Rgb(0x16, 0xa3, 0x4a),
            buyer: Color::Rgb(0x25, 0x63, 0xeb),
            seller: Color::Rgb(0x93, 0x33, 0xea),
            star: Color::Rgb(0xf5, 0x9e, 0x0b),
        }
    }
}
