use super::geometry::Point;

/// Identifies the input stream that produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(i32),
}

impl PointerId {
    pub fn is_touch(&self) -> bool {
        matches!(self, PointerId::Touch(_))
    }
}

// Currently pressed touch points, in press order, with their last position.
#[derive(Default, Debug, Clone)]
pub struct ActivePointers {
    points: Vec<(i32, Point)>,
}

impl ActivePointers {
    pub fn press(&mut self, id: i32, at: Point) {
        if let Some(slot) = self.points.iter_mut().find(|(pid, _)| *pid == id) {
            slot.1 = at;
        } else {
            self.points.push((id, at));
        }
    }

    pub fn update(&mut self, id: i32, at: Point) {
        if let Some(slot) = self.points.iter_mut().find(|(pid, _)| *pid == id) {
            slot.1 = at;
        }
    }

    pub fn release(&mut self, id: i32) {
        self.points.retain(|(pid, _)| *pid != id);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn position(&self, id: i32) -> Option<Point> {
        self.points.iter().find(|(pid, _)| *pid == id).map(|(_, p)| *p)
    }

    /// Distance between two tracked touches, if both are still down.
    pub fn distance(&self, a: i32, b: i32) -> Option<f64> {
        Some(self.position(a)?.distance_to(self.position(b)?))
    }
}
