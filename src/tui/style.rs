//! Color constants for the TUI.

use ratatui::style::Color;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Gauge fill for the selected slider.
pub const SELECTED: Color = Color::Yellow;
/// Gauge fill for the other sliders.
pub const UNSELECTED: Color = Color::Cyan;
/// Power readout color when producing.
pub const OUTPUT_ON: Color = Color::Green;
/// Power readout color when clamped to zero.
pub const OUTPUT_OFF: Color = Color::DarkGray;

/// Returns the slider gauge color.
pub fn slider_color(selected: bool) -> Color {
    if selected { SELECTED } else { UNSELECTED }
}

/// Returns the readout color for a clamped power value.
pub fn output_color(power_kw: f64) -> Color {
    if power_kw > 0.0 { OUTPUT_ON } else { OUTPUT_OFF }
}
