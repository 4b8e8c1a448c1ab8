use colored::Color;

pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 200, g: 200, b: 200 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const PRIMARY: Color = Color::TrueColor { r: 95, g: 215, b: 175 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 175, b: 95 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 135, g: 175, b: 255 };
pub const SERVICE: Color = Color::TrueColor { r: 215, g: 175, b: 255 };
pub const HIGHLIGHT: Color = Color::BrightGreen;
