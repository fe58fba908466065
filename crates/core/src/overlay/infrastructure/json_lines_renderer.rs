use std::io::Write;

use serde::Serialize;

use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::overlay::domain::overlay_state::OverlayState;
use crate::overlay::domain::overlay_style::{OverlayLayout, OverlayStyle};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayLine {
    timestamp_ms: u64,
    overlay: Option<OverlayLayout>,
}

/// Writes one JSON object per rendered state: `overlay` is `null` when no
/// face is shown, otherwise the styled box placement.
pub struct JsonLinesRenderer<W: Write + Send> {
    out: W,
    style: OverlayStyle,
}

impl<W: Write + Send> JsonLinesRenderer<W> {
    pub fn new(out: W, style: OverlayStyle) -> Self {
        Self { out, style }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> OverlayRenderer for JsonLinesRenderer<W> {
    fn render(
        &mut self,
        timestamp_ms: u64,
        state: &OverlayState,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let line = OverlayLine {
            timestamp_ms,
            overlay: state.as_box().map(|b| self.style.layout(b)),
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::overlay_state::OverlayBox;

    fn lines(renderer: JsonLinesRenderer<Vec<u8>>) -> Vec<serde_json::Value> {
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        text.lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_state_writes_null_overlay() {
        let mut renderer = JsonLinesRenderer::new(Vec::new(), OverlayStyle::default());
        renderer.render(100, &OverlayState::Empty).unwrap();

        let out = lines(renderer);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["timestampMs"], 100);
        assert!(out[0]["overlay"].is_null());
    }

    #[test]
    fn test_box_state_writes_layout() {
        let mut renderer = JsonLinesRenderer::new(Vec::new(), OverlayStyle::default());
        renderer
            .render(0, &OverlayState::Box(OverlayBox::new(10.0, 20.0, 100.0, 150.0)))
            .unwrap();

        let out = lines(renderer);
        let overlay = &out[0]["overlay"];
        assert_eq!(overlay["left"], 10.0);
        assert_eq!(overlay["top"], 20.0);
        assert_eq!(overlay["width"], 100.0);
        assert_eq!(overlay["height"], 150.0);
        assert_eq!(overlay["borderWidth"], 2.0);
        assert_eq!(overlay["borderColor"], "#ffffff");
    }

    #[test]
    fn test_one_line_per_render() {
        let mut renderer = JsonLinesRenderer::new(Vec::new(), OverlayStyle::default());
        renderer.render(0, &OverlayState::Empty).unwrap();
        renderer
            .render(100, &OverlayState::Box(OverlayBox::new(1.0, 1.0, 1.0, 1.0)))
            .unwrap();
        renderer.render(200, &OverlayState::Empty).unwrap();

        let out = lines(renderer);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2]["timestampMs"], 200);
    }
}
