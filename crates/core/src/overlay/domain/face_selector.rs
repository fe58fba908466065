use serde::{Deserialize, Serialize};

use crate::detection::domain::detected_face::DetectedFace;

/// Picks the one face the overlay follows out of a detection event.
pub trait FaceSelector: Send {
    fn select<'a>(&self, faces: &'a [DetectedFace]) -> Option<&'a DetectedFace>;
}

/// First face in detector order. No scoring: additional faces are ignored.
///
/// This is the camera screen's established behavior and the default policy.
pub struct FirstFaceSelector;

impl FaceSelector for FirstFaceSelector {
    fn select<'a>(&self, faces: &'a [DetectedFace]) -> Option<&'a DetectedFace> {
        faces.first()
    }
}

/// Largest face by area; ties go to the earliest face in detector order.
pub struct LargestFaceSelector;

impl FaceSelector for LargestFaceSelector {
    fn select<'a>(&self, faces: &'a [DetectedFace]) -> Option<&'a DetectedFace> {
        let mut best: Option<&DetectedFace> = None;
        for face in faces {
            match best {
                Some(b) if b.bounds.area() >= face.bounds.area() => {}
                _ => best = Some(face),
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    #[default]
    First,
    Largest,
}

impl SelectionPolicy {
    pub const ALL: &[SelectionPolicy] = &[SelectionPolicy::First, SelectionPolicy::Largest];

    pub fn selector(self) -> Box<dyn FaceSelector> {
        match self {
            SelectionPolicy::First => Box::new(FirstFaceSelector),
            SelectionPolicy::Largest => Box::new(LargestFaceSelector),
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::First => write!(f, "First face"),
            SelectionPolicy::Largest => write!(f, "Largest face"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::Bounds;
    use rstest::rstest;

    fn face(x: f64, w: f64, h: f64) -> DetectedFace {
        DetectedFace::new(Bounds::new(x, 0.0, w, h))
    }

    #[test]
    fn test_first_selector_empty() {
        assert!(FirstFaceSelector.select(&[]).is_none());
    }

    #[test]
    fn test_first_selector_ignores_larger_later_faces() {
        let faces = vec![face(0.0, 10.0, 10.0), face(50.0, 200.0, 200.0)];
        let picked = FirstFaceSelector.select(&faces).unwrap();
        assert_eq!(picked, &faces[0]);
    }

    #[test]
    fn test_largest_selector_empty() {
        assert!(LargestFaceSelector.select(&[]).is_none());
    }

    #[test]
    fn test_largest_selector_picks_biggest_area() {
        let faces = vec![
            face(0.0, 10.0, 10.0),
            face(50.0, 200.0, 200.0),
            face(90.0, 20.0, 20.0),
        ];
        let picked = LargestFaceSelector.select(&faces).unwrap();
        assert_eq!(picked, &faces[1]);
    }

    #[test]
    fn test_largest_selector_tie_goes_to_first() {
        let faces = vec![face(0.0, 10.0, 20.0), face(50.0, 20.0, 10.0)];
        let picked = LargestFaceSelector.select(&faces).unwrap();
        assert_eq!(picked, &faces[0]);
    }

    #[rstest]
    #[case::first(SelectionPolicy::First, 0.0)]
    #[case::largest(SelectionPolicy::Largest, 50.0)]
    fn test_policy_builds_matching_selector(#[case] policy: SelectionPolicy, #[case] x: f64) {
        let faces = vec![face(0.0, 10.0, 10.0), face(50.0, 200.0, 200.0)];
        let picked = policy.selector().select(&faces).unwrap();
        assert_eq!(picked.bounds.x(), x);
    }

    #[test]
    fn test_default_policy_is_first() {
        assert_eq!(SelectionPolicy::default(), SelectionPolicy::First);
    }
}
