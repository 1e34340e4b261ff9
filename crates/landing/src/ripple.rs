use foundation::bounds::{Point, Rect};

/// Identifies a spawned ripple until its removal timer fires.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RippleId(pub u64);

/// Size and position of a ripple `span`, relative to its button.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// A circle as large as the button's longer side, centred on the click.
    pub fn from_click(button: Rect, click: Point) -> Self {
        let size = button.max_side();
        let local = button.to_local(click);
        Self {
            size,
            left: local.x - size / 2.0,
            top: local.y - size / 2.0,
        }
    }

    /// `(property, value)` pairs for the span's inline style.
    pub fn style_properties(&self) -> [(&'static str, String); 4] {
        [
            ("width", px(self.size)),
            ("height", px(self.size)),
            ("left", px(self.left)),
            ("top", px(self.top)),
        ]
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centred_on_click() {
        let button = Rect::new(100.0, 50.0, 120.0, 40.0);
        let g = RippleGeometry::from_click(button, Point::new(130.0, 70.0));
        assert_eq!(
            g,
            RippleGeometry {
                size: 120.0,
                left: -30.0,
                top: -40.0,
            }
        );
    }

    #[test]
    fn style_uses_pixels() {
        let g = RippleGeometry {
            size: 48.0,
            left: 1.5,
            top: -2.0,
        };
        let props = g.style_properties();
        assert_eq!(props[0], ("width", "48px".to_string()));
        assert_eq!(props[1], ("height", "48px".to_string()));
        assert_eq!(props[2], ("left", "1.5px".to_string()));
        assert_eq!(props[3], ("top", "-2px".to_string()));
    }
}
