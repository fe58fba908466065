use serde::Serialize;

use crate::overlay::domain::overlay_state::OverlayBox;
use crate::shared::constants::{OVERLAY_BORDER_WIDTH, OVERLAY_Z_INDEX};

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([0xff, 0xff, 0xff, 0xff]);

    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.0;
        if a == 0xff {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// Appearance of the overlay box: an unfilled, absolutely positioned frame
/// stacked above the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub border_width: f64,
    pub border_color: Rgba,
    pub z_index: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            border_width: OVERLAY_BORDER_WIDTH,
            border_color: Rgba::WHITE,
            z_index: OVERLAY_Z_INDEX,
        }
    }
}

/// Absolute placement of one overlay box on the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayout {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub border_width: f64,
    pub border_color: String,
    pub z_index: u32,
}

impl OverlayStyle {
    pub fn layout(&self, overlay: &OverlayBox) -> OverlayLayout {
        OverlayLayout {
            top: overlay.y,
            left: overlay.x,
            width: overlay.width,
            height: overlay.height,
            border_width: self.border_width,
            border_color: self.border_color.to_hex(),
            z_index: self.z_index,
        }
    }
}
