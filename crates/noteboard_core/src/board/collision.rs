//! Drop-target detection by nearest center.

use serde::Serialize;

/// Axis-aligned rectangle in board pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same rectangle shifted by a pointer delta.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    fn center_distance(&self, other: &Rect) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }
}

/// Returns the key of the candidate whose center is closest to `dragged`.
///
/// Ties keep the earliest candidate. Empty input yields `None`.
pub fn closest_center<K>(
    dragged: &Rect,
    candidates: impl IntoIterator<Item = (K, Rect)>,
) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (key, rect) in candidates {
        let distance = dragged.center_distance(&rect);
        let closer = best
            .as_ref()
            .map_or(true, |(_, best_distance)| distance < *best_distance);
        if closer {
            best = Some((key, distance));
        }
    }
    best.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::{closest_center, Rect};

    #[test]
    fn nearest_center_wins() {
        let slots = vec![
            ("a", Rect::new(0.0, 0.0, 100.0, 50.0)),
            ("b", Rect::new(0.0, 60.0, 100.0, 50.0)),
            ("c", Rect::new(0.0, 120.0, 100.0, 50.0)),
        ];
        let dragged = Rect::new(0.0, 0.0, 100.0, 50.0).translated(0.0, 70.0);

        assert_eq!(closest_center(&dragged, slots), Some("b"));
    }

    #[test]
    fn ties_keep_first_candidate_and_empty_yields_none() {
        let dragged = Rect::new(50.0, 0.0, 10.0, 10.0);
        let slots = vec![
            (1, Rect::new(0.0, 0.0, 10.0, 10.0)),
            (2, Rect::new(100.0, 0.0, 10.0, 10.0)),
        ];

        assert_eq!(closest_center(&dragged, slots), Some(1));
        assert_eq!(closest_center::<u8>(&dragged, Vec::new()), None);
    }
}
