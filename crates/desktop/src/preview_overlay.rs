use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme};

use facecam_core::overlay::domain::coordinate_mapper::{CoordinateMapper, ScaleMapper};
use facecam_core::overlay::domain::overlay_state::OverlayState;
use facecam_core::overlay::domain::overlay_style::OverlayStyle;

/// Draws the face box over the camera preview.
///
/// The overlay arrives in preview-pixel coordinates; it is stretched onto the
/// widget bounds the same way the preview image is, and mirrored when the
/// preview is shown mirrored.
pub struct PreviewOverlay {
    pub overlay: OverlayState,
    /// Size of the preview the detector saw.
    pub source_size: (u32, u32),
    pub mirrored: bool,
    pub style: OverlayStyle,
}

impl PreviewOverlay {
    fn mapper(&self, bounds: Size) -> ScaleMapper {
        let (w, h) = self.source_size;
        let mapper = ScaleMapper::fit(
            w as f64,
            h as f64,
            bounds.width as f64,
            bounds.height as f64,
        );
        if self.mirrored {
            mapper.mirrored(bounds.width as f64)
        } else {
            mapper
        }
    }
}

impl<Message> canvas::Program<Message> for PreviewOverlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let Some(overlay) = self.overlay.as_box() else {
            return vec![];
        };

        let mut frame = Frame::new(renderer, bounds.size());
        let mapped = self.mapper(bounds.size()).map(overlay.to_bounds());
        let rect = Path::rectangle(
            Point::new(mapped.x() as f32, mapped.y() as f32),
            Size::new(mapped.width() as f32, mapped.height() as f32),
        );

        let [r, g, b, a] = self.style.border_color.0;
        frame.stroke(
            &rect,
            Stroke::default()
                .with_width(self.style.border_width as f32)
                .with_color(Color::from_rgba8(r, g, b, a as f32 / 255.0)),
        );

        vec![frame.into_geometry()]
    }
}
