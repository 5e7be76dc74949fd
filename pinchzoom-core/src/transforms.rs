use crate::state::TransformState;

/// An elementary 2D affine operation in element-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Translate by (dx, dy). Positive dx moves right, positive dy moves down.
    Translate { dx: f64, dy: f64 },
    /// Scale by `factor` around the fixed point (center_x, center_y).
    Scale {
        factor: f64,
        center_x: f64,
        center_y: f64,
    },
}

/// A 3x3 homogeneous matrix for 2D affine transformations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Row-major: [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]]
    pub data: [[f64; 3]; 3],
}

impl Mat3 {
    /// Identity (no transformation).
    pub fn identity() -> Self {
        Self {
            data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Translation by (dx, dy).
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            data: [[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]],
        }
    }

    /// Scale around a point (cx, cy): translate(-cx, -cy), scale, translate
    /// back. The point (cx, cy) is fixed under the result.
    pub fn scale_around(factor: f64, cx: f64, cy: f64) -> Self {
        Self {
            data: [
                [factor, 0.0, cx * (1.0 - factor)],
                [0.0, factor, cy * (1.0 - factor)],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// Matrix product `self × other`.
    pub fn multiply(&self, other: &Mat3) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.data[i][0] * other.data[0][j]
                    + self.data[i][1] * other.data[1][j]
                    + self.data[i][2] * other.data[2][j];
            }
        }

        Self { data: result }
    }

    /// Map an element-local point through this transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.data[0][0] * x + self.data[0][1] * y + self.data[0][2],
            self.data[1][0] * x + self.data[1][1] * y + self.data[1][2],
        )
    }

    /// CSS `matrix(a, b, c, d, e, f)` form of this transform.
    ///
    /// Meant to be applied with `transform-origin: 0 0`; scale anchoring is
    /// already baked into the matrix, so the default 50%/50% origin would
    /// anchor it twice.
    pub fn to_css(&self) -> String {
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            self.data[0][0],
            self.data[1][0],
            self.data[0][1],
            self.data[1][1],
            self.data[0][2],
            self.data[1][2],
        )
    }

    /// Whether every entry is within `tolerance` of the other matrix.
    pub fn approx_eq(&self, other: &Mat3, tolerance: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

/// Collapse an ordered op list into a single matrix.
///
/// Ops are listed outermost first, as in a CSS transform list: the last op
/// in the sequence is the first one applied to a point. Equivalently the
/// result is `M(op_1) × M(op_2) × … × M(op_n)`.
pub fn compose_transform_ops(ops: impl IntoIterator<Item = TransformOp>) -> Mat3 {
    let mut result = Mat3::identity();

    for op in ops {
        let matrix = match op {
            TransformOp::Translate { dx, dy } => Mat3::translation(dx, dy),
            TransformOp::Scale {
                factor,
                center_x,
                center_y,
            } => Mat3::scale_around(factor, center_x, center_y),
        };

        result = result.multiply(&matrix);
    }

    result
}

/// The render-time op list for a pose, outermost first.
///
/// The inner translate/scale/translate-back triple anchors the in-flight
/// pinch at its focal point; the outer ops carry the committed pan, the
/// committed scale, and the translation folded out of earlier pinches. The
/// order is load-bearing: reordering it moves the zoom anchor.
pub fn pose_transform_ops(state: &TransformState) -> [TransformOp; 6] {
    let center = state.center_of_view;
    [
        TransformOp::Translate {
            dx: state.translate_x,
            dy: state.translate_y,
        },
        TransformOp::Scale {
            factor: state.offset_scale,
            center_x: center.x,
            center_y: center.y,
        },
        TransformOp::Translate {
            dx: state.after_pinch_translate_x,
            dy: state.after_pinch_translate_y,
        },
        TransformOp::Translate {
            dx: state.focal_translate_x,
            dy: state.focal_translate_y,
        },
        TransformOp::Scale {
            factor: state.pinch_scale,
            center_x: center.x,
            center_y: center.y,
        },
        TransformOp::Translate {
            dx: -state.focal_translate_x,
            dy: -state.focal_translate_y,
        },
    ]
}

/// The composited render-time matrix for a pose.
pub fn pose_matrix(state: &TransformState) -> Mat3 {
    compose_transform_ops(pose_transform_ops(state))
}
