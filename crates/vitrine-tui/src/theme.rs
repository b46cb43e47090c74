use ratatui::style::Color;

/// Gruvbox Material palette used across the widgets
pub struct GruvboxMaterial;

impl GruvboxMaterial {
    pub const BG0: Color = Color::Rgb(0x28, 0x28, 0x28);
    pub const BG2: Color = Color::Rgb(0x45, 0x40, 0x3d);

    pub const FG0: Color = Color::Rgb(0xd4, 0xbe, 0x98);
    pub const GREY0: Color = Color::Rgb(0x7c, 0x6f, 0x64);
    pub const GREY1: Color = Color::Rgb(0x92, 0x83, 0x74);
    pub const GREY2: Color = Color::Rgb(0xa8, 0x99, 0x84);

    pub const RED: Color = Color::Rgb(0xea, 0x69, 0x62);
    pub const ORANGE: Color = Color::Rgb(0xe7, 0x8a, 0x4e);
    pub const YELLOW: Color = Color::Rgb(0xd8, 0xa6, 0x57);
    pub const GREEN: Color = Color::Rgb(0xa9, 0xb6, 0x65);
    pub const AQUA: Color = Color::Rgb(0x89, 0xb4, 0x82);
    pub const BLUE: Color = Color::Rgb(0x7d, 0xae, 0xa3);
    pub const PURPLE: Color = Color::Rgb(0xd3, 0x86, 0x9b);

    pub const ERROR: Color = Self::RED;
    pub const ACCENT: Color = Self::AQUA;
}
