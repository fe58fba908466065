use crate::shared::geometry::Bounds;

/// Maps detector (camera-preview) coordinates onto the rendering surface.
pub trait CoordinateMapper: Send {
    fn map(&self, bounds: Bounds) -> Bounds;
}

/// Detector and renderer share a coordinate space.
pub struct IdentityMapper;

impl CoordinateMapper for IdentityMapper {
    fn map(&self, bounds: Bounds) -> Bounds {
        bounds
    }
}

/// Scales each axis independently, optionally mirroring horizontally.
///
/// Mirroring reflects about the vertical center of a surface `mirror_width`
/// units wide, measured after scaling. Front-camera previews are typically
/// displayed mirrored while the detector reports unmirrored coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapper {
    scale_x: f64,
    scale_y: f64,
    mirror_width: Option<f64>,
}

impl ScaleMapper {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            mirror_width: None,
        }
    }

    /// Mapper that stretches a `from` sized preview onto a `to` sized surface.
    pub fn fit(from_width: f64, from_height: f64, to_width: f64, to_height: f64) -> Self {
        let sx = if from_width > 0.0 { to_width / from_width } else { 1.0 };
        let sy = if from_height > 0.0 { to_height / from_height } else { 1.0 };
        Self::new(sx, sy)
    }

    pub fn mirrored(mut self, surface_width: f64) -> Self {
        self.mirror_width = Some(surface_width);
        self
    }
}

impl CoordinateMapper for ScaleMapper {
    fn map(&self, bounds: Bounds) -> Bounds {
        let width = bounds.width() * self.scale_x;
        let height = bounds.height() * self.scale_y;
        let mut x = bounds.x() * self.scale_x;
        let y = bounds.y() * self.scale_y;
        if let Some(surface) = self.mirror_width {
            x = surface - x - width;
        }
        Bounds::new(x, y, width, height)
    }
}
