use crate::rect::Rect;
use crate::units::Pt;

/// How a card face is mapped onto a page: a scale about the origin followed by
/// a translation. Card faces are never rotated or sheared, so the general PDF
/// matrix reduces to these four numbers.
///
/// ```
/// use spell_cards::{Pt, Rect, Transform};
///
/// // a 750 x 1050 card face shrunk into a 150 x 210 slot at (20, 30)
/// let slot = Rect::from_origin(Pt(20.0), Pt(30.0), Pt(150.0), Pt(210.0));
/// let transform = Transform::fit_into(Pt(750.0), Pt(1050.0), &slot);
/// assert_eq!(transform.matrix(), [0.2, 0.0, 0.0, 0.2, 20.0, 30.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: Pt,
    pub offset_y: Pt,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::scale(1.0, 1.0)
    }
}

impl Transform {
    pub fn translate(x: Pt, y: Pt) -> Transform {
        Transform {
            offset_x: x,
            offset_y: y,
            ..Transform::default()
        }
    }

    pub fn scale(scale_x: f32, scale_y: f32) -> Transform {
        Transform {
            scale_x,
            scale_y,
            offset_x: Pt::ZERO,
            offset_y: Pt::ZERO,
        }
    }

    /// Move the result of this transform by (x, y)
    pub fn with_translate(self, x: Pt, y: Pt) -> Transform {
        Transform {
            offset_x: self.offset_x + x,
            offset_y: self.offset_y + y,
            ..self
        }
    }

    /// Map a `width` x `height` box sitting on the origin onto `target`
    pub fn fit_into(width: Pt, height: Pt, target: &Rect) -> Transform {
        Transform::scale(*(target.width() / width), *(target.height() / height))
            .with_translate(target.x1, target.y1)
    }

    pub fn apply(&self, x: Pt, y: Pt) -> (Pt, Pt) {
        (
            x * self.scale_x + self.offset_x,
            y * self.scale_y + self.offset_y,
        )
    }

    /// The operands of the `cm` operator
    pub fn matrix(&self) -> [f32; 6] {
        [
            self.scale_x,
            0.0,
            0.0,
            self.scale_y,
            *self.offset_x,
            *self.offset_y,
        ]
    }
}
