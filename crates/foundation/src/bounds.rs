/// Screen-space rectangle in CSS pixels, as reported by
/// `getBoundingClientRect`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    /// Length of the longer side.
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Converts a viewport point into coordinates relative to this rectangle.
    pub fn to_local(&self, point: Point) -> Point {
        Point {
            x: point.x - self.left,
            y: point.y - self.top,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn local_coordinates_subtract_origin() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.to_local(Point::new(15.0, 30.0)), Point::new(5.0, 10.0));
        assert_eq!(r.max_side(), 100.0);
    }
}
