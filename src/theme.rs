// Theme constants - soft palette shared by every panel
use crossterm::style::Color;

// Headers
pub const HEADER_TITLE: Color = Color::Rgb { r: 219, g: 112, b: 147 };   // Soft pink
pub const HEADER_INVOICE: Color = Color::Rgb { r: 176, g: 196, b: 222 }; // Light steel blue
pub const HEADER_DEBUG: Color = Color::Rgb { r: 152, g: 195, b: 121 };   // Soft green

// Text colors
pub const TEXT_PRIMARY: Color = Color::Rgb { r: 248, g: 248, b: 242 };
pub const TEXT_SECONDARY: Color = Color::Rgb { r: 180, g: 180, b: 180 };
pub const TEXT_DIM: Color = Color::Rgb { r: 120, g: 120, b: 120 };
pub const TEXT_HEADER: Color = Color::Black;

// UI elements
pub const BORDER: Color = Color::Rgb { r: 100, g: 100, b: 100 };
pub const SIDEBAR_BG: Color = Color::Rgb { r: 34, g: 34, b: 40 };
pub const BUTTON_BG: Color = Color::Rgb { r: 68, g: 71, b: 90 };
pub const BUTTON_DISABLED_FG: Color = Color::Rgb { r: 90, g: 90, b: 96 };
pub const SELECTION_BG: Color = Color::Rgb { r: 68, g: 71, b: 90 };
pub const JSON_KEY: Color = Color::Rgb { r: 139, g: 233, b: 253 };
pub const CHART_BAR: Color = Color::Rgb { r: 219, g: 112, b: 147 };

// Status bar
pub const BG_STATUS: Color = Color::Rgb { r: 40, g: 40, b: 46 };
pub const FG_STATUS: Color = Color::Rgb { r: 200, g: 200, b: 200 };

// Status colors
pub const ERROR: Color = Color::Rgb { r: 255, g: 85, b: 85 };
pub const WARNING: Color = Color::Rgb { r: 255, g: 184, b: 108 };
pub const SUCCESS: Color = Color::Rgb { r: 152, g: 195, b: 121 };
