//! Layout constants shared by the screens and the controller.

/// Vertical gap after the title line
pub const TITLE_GAP: i32 = 4;

/// Vertical gap after each body line
pub const LINE_GAP: i32 = 2;

/// Shown on the network screen while WiFi is up but the SSID is unknown
pub const SSID_SEARCHING: &str = "Searching...";

/// Reference glyph used to measure line height
pub const LINE_HEIGHT_PROBE: &str = "A";
