use glowdeck_engine::paint::Color;

/// Panel color palette. Two fixed variants, toggled from the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub panel: Color,
    pub field: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub button: Color,
    pub button_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            panel: Color::from_hex(0x0A1128).with_alpha(0.96),
            field: Color::from_hex(0x060A18),
            fg: Color::from_hex(0xE8F4FF),
            muted: Color::from_hex(0x8FA8C0),
            accent: Color::from_hex(0x11F4FF),
            button: Color::from_hex(0x0040FF),
            button_fg: Color::from_hex(0xFFFFFF),
        }
    }

    pub fn light() -> Self {
        Self {
            panel: Color::from_hex(0xF2F6FA).with_alpha(0.96),
            field: Color::from_hex(0xFFFFFF),
            fg: Color::from_hex(0x101828),
            muted: Color::from_hex(0x5A6B80),
            accent: Color::from_hex(0x0077CC),
            button: Color::from_hex(0x0040FF),
            button_fg: Color::from_hex(0xFFFFFF),
        }
    }
}
