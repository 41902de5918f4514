// The lab's visual surface: draggable boxes, hit-testing, mutation sink
use super::geometry::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoxId(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Indicator {
    #[default]
    Idle,
    Sticky,
}

impl Indicator {
    pub fn color(&self) -> &'static str {
        match self {
            Indicator::Idle => "red",
            Indicator::Sticky => "blue",
        }
    }
}

/// What a point landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Body(BoxId),
    Handle(BoxId),
}

impl Hit {
    pub fn id(&self) -> BoxId {
        match *self {
            Hit::Body(id) | Hit::Handle(id) => id,
        }
    }
}

/// A single visible change the controller asks the surface to make.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mutation {
    Move { id: BoxId, left: f64, top: f64 },
    Resize { id: BoxId, width: f64, height: f64 },
    Indicator { id: BoxId, indicator: Indicator },
    /// Cancellation: position and indicator go back to the session snapshot.
    Restore { id: BoxId, left: f64, top: f64, indicator: Indicator },
}

/// Read-only view of the surface the controller needs.
pub trait Surface {
    fn hit_test(&self, at: Point) -> Option<Hit>;
    fn bounds(&self, id: BoxId) -> Option<Rect>;
    fn indicator(&self, id: BoxId) -> Option<Indicator>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxItem {
    pub id: BoxId,
    pub rect: Rect,
    pub indicator: Indicator,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub items: Vec<BoxItem>,
    pub handle_size: f64,
}

impl Board {
    pub fn new(handle_size: f64) -> Self {
        Self {
            items: Vec::new(),
            handle_size,
        }
    }

    /// Three 100x100 boxes on a diagonal.
    pub fn with_defaults(handle_size: f64) -> Self {
        let mut board = Self::new(handle_size);
        for (x, y) in [(100.0, 100.0), (300.0, 300.0), (500.0, 500.0)] {
            board.add_box(x, y, 100.0, 100.0);
        }
        board
    }

    pub fn add_box(&mut self, left: f64, top: f64, width: f64, height: f64) -> BoxId {
        let id = BoxId(self.items.iter().map(|b| b.id.0 + 1).max().unwrap_or(0));
        self.items.push(BoxItem {
            id,
            rect: Rect { left, top, width, height },
            indicator: Indicator::Idle,
        });
        id
    }

    pub fn get(&self, id: BoxId) -> Option<&BoxItem> {
        self.items.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: BoxId) -> Option<&mut BoxItem> {
        self.items.iter_mut().find(|b| b.id == id)
    }

    /// Write a mutation onto the matching box. Unknown ids are ignored.
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Move { id, left, top } => {
                if let Some(b) = self.get_mut(id) {
                    b.rect.left = left;
                    b.rect.top = top;
                }
            }
            Mutation::Resize { id, width, height } => {
                if let Some(b) = self.get_mut(id) {
                    b.rect.width = width;
                    b.rect.height = height;
                }
            }
            Mutation::Indicator { id, indicator } => {
                if let Some(b) = self.get_mut(id) {
                    b.indicator = indicator;
                }
            }
            Mutation::Restore {
                id,
                left,
                top,
                indicator,
            } => {
                if let Some(b) = self.get_mut(id) {
                    b.rect.left = left;
                    b.rect.top = top;
                    b.indicator = indicator;
                }
            }
        }
    }
}

impl Surface for Board {
    fn hit_test(&self, at: Point) -> Option<Hit> {
        // later boxes render on top
        let b = self.items.iter().rev().find(|b| b.rect.contains(at))?;
        let r = b.rect;
        let on_handle = at.x >= r.left + r.width - self.handle_size
            && at.y >= r.top + r.height - self.handle_size;
        Some(if on_handle { Hit::Handle(b.id) } else { Hit::Body(b.id) })
    }

    fn bounds(&self, id: BoxId) -> Option<Rect> {
        self.get(id).map(|b| b.rect)
    }

    fn indicator(&self, id: BoxId) -> Option<Indicator> {
        self.get(id).map(|b| b.indicator)
    }
}
