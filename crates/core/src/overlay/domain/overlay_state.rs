use crate::shared::geometry::Bounds;

/// Rectangle drawn over the camera preview around the tracked face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_bounds(self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

impl From<Bounds> for OverlayBox {
    fn from(bounds: Bounds) -> Self {
        Self::new(bounds.x(), bounds.y(), bounds.width(), bounds.height())
    }
}

/// What the renderer should draw for the latest detection event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Empty,
    Box(OverlayBox),
}

impl OverlayState {
    pub fn is_empty(&self) -> bool {
        matches!(self, OverlayState::Empty)
    }

    pub fn as_box(&self) -> Option<&OverlayBox> {
        match self {
            OverlayState::Empty => None,
            OverlayState::Box(b) => Some(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let state = OverlayState::default();
        assert!(state.is_empty());
        assert!(state.as_box().is_none());
    }

    #[test]
    fn test_box_from_bounds_is_identity() {
        let b = OverlayBox::from(Bounds::new(10.0, 20.0, 100.0, 150.0));
        assert_eq!(b, OverlayBox::new(10.0, 20.0, 100.0, 150.0));
        assert_eq!(b.to_bounds(), Bounds::new(10.0, 20.0, 100.0, 150.0));
    }

    #[test]
    fn test_as_box() {
        let b = OverlayBox::new(1.0, 2.0, 3.0, 4.0);
        let state = OverlayState::Box(b);
        assert!(!state.is_empty());
        assert_eq!(state.as_box(), Some(&b));
    }
}
