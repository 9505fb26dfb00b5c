//! Terminal colour palettes.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub surface: Color,
    pub border: Color,
    pub bar_bg: Color,
    pub text_on_bar: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Theme {
    /// Dark red-on-zinc palette matching the playbook's print styling.
    pub fn ember() -> Self {
        Self {
            name: "ember",
            accent: Color::Rgb(239, 68, 68),         // #EF4444
            success: Color::Rgb(74, 222, 128),       // #4ADE80
            warning: Color::Rgb(250, 204, 21),       // #FACC15
            error: Color::Rgb(239, 68, 68),          // #EF4444
            surface: Color::Rgb(24, 24, 27),         // #18181B
            border: Color::Rgb(63, 63, 70),          // #3F3F46
            bar_bg: Color::Rgb(39, 39, 42),          // #27272A
            text_on_bar: Color::Rgb(228, 228, 231),  // #E4E4E7
            text_primary: Color::Rgb(241, 245, 249), // #F1F5F9
            text_secondary: Color::Rgb(148, 163, 184), // #94A3B8
            highlight_bg: Color::Rgb(127, 29, 29),   // #7F1D1D
            highlight_fg: Color::Rgb(241, 245, 249), // #F1F5F9
        }
    }

    pub fn slate() -> Self {
        Self {
            name: "slate",
            accent: Color::Rgb(96, 165, 250),        // #60A5FA
            success: Color::Rgb(52, 211, 153),       // #34D399
            warning: Color::Rgb(251, 191, 36),       // #FBBF24
            error: Color::Rgb(248, 113, 113),        // #F87171
            surface: Color::Rgb(15, 23, 42),         // #0F172A
            border: Color::Rgb(51, 65, 85),          // #334155
            bar_bg: Color::Rgb(30, 41, 59),          // #1E293B
            text_on_bar: Color::Rgb(226, 232, 240),  // #E2E8F0
            text_primary: Color::Rgb(248, 250, 252), // #F8FAFC
            text_secondary: Color::Rgb(148, 163, 184), // #94A3B8
            highlight_bg: Color::Rgb(30, 58, 138),   // #1E3A8A
            highlight_fg: Color::Rgb(248, 250, 252), // #F8FAFC
        }
    }

    pub fn next(self) -> Self {
        match self.name {
            "ember" => Self::slate(),
            _ => Self::ember(),
        }
    }
}
