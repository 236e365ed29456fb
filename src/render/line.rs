//! Integer screen points and the line parameterization the scan-fillers
//! walk.
//!
//! A [`Line`] is parameterized by its dominant axis: steep segments are
//! "reflected" and stepped along y instead of x, so walking integer steps
//! never leaves gaps. Horizontal and vertical segments get zero sentinel
//! slopes instead of a true division.

use std::ops::{Add, Sub};

/// An integer pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pt {
    pub x: i32,
    pub y: i32,
}

impl Pt {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Pt> for Pt {
    type Output = Pt;

    fn add(self, rhs: Pt) -> Self::Output {
        Pt::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Pt> for Pt {
    type Output = Pt;

    fn sub(self, rhs: Pt) -> Self::Output {
        Pt::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A screen-space segment parameterized by its dominant axis.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    start: Pt,
    end: Pt,
    /// dy per unit x; 0 for horizontal and vertical segments.
    x_slope: f32,
    /// dx per unit y; 0 for horizontal and vertical segments.
    y_slope: f32,
    /// Steps along the dominant axis.
    len: i32,
    /// Direction along the dominant axis; 0 only for placeholders and
    /// zero-length segments.
    step: i32,
    reflected: bool,
}

impl Line {
    /// A sentinel line. The quadrilateral filler pairs each corner with
    /// two boundary lines by filling placeholder slots.
    pub fn placeholder() -> Self {
        Self {
            start: Pt::new(0, 0),
            end: Pt::new(0, 0),
            x_slope: 0.0,
            y_slope: 0.0,
            len: 0,
            step: 0,
            reflected: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.step == 0
    }

    pub fn new(start: Pt, end: Pt) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let horizontal = dy == 0;
        let vertical = dx == 0;

        let (x_slope, y_slope) = if horizontal || vertical {
            (0.0, 0.0)
        } else {
            (dy as f32 / dx as f32, dx as f32 / dy as f32)
        };

        let reflected = !horizontal && dy.abs() >= dx.abs();
        let (len, step) = if reflected {
            (dy.abs(), dy.signum())
        } else {
            (dx.abs(), dx.signum())
        };

        Self {
            start,
            end,
            x_slope,
            y_slope,
            len,
            step,
            reflected,
        }
    }

    pub fn start(&self) -> Pt {
        self.start
    }

    pub fn end(&self) -> Pt {
        self.end
    }

    pub fn len(&self) -> i32 {
        self.len
    }

    /// The point `i` integer steps from the start along the dominant axis.
    pub fn eval(&self, i: i32) -> Pt {
        let t = self.step * i;
        if self.reflected {
            Pt::new(self.start.x + (self.y_slope * t as f32) as i32, self.start.y + t)
        } else {
            Pt::new(self.start.x + t, self.start.y + (self.x_slope * t as f32) as i32)
        }
    }

    /// The x coordinate where the line crosses scanline `y`. For the
    /// sentinel slopes (horizontal, vertical, zero-length) this is the
    /// start's x, which is what the scan-fillers want.
    pub fn x_at(&self, y: i32) -> i32 {
        self.start.x + (self.y_slope * (y - self.start.y) as f32) as i32
    }

    /// Whether two lines cover the same segment, in either direction.
    pub fn same_segment(&self, other: &Line) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}
