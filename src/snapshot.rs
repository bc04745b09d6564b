use glam::{DMat4, Mat4};

use crate::camera::CameraFrame;

/// Camera state published by [`Orbiter::tick`](crate::Orbiter::tick).
///
/// Every field is an owned copy; nothing aliases the model's buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// World-to-view matrix, column-major.
    pub matrix: [f64; 16],
    /// Orientation quaternion `[x, y, z, w]`.
    pub rotation: [f64; 4],
    /// Camera up direction.
    pub up: [f64; 3],
    /// Eye position.
    pub eye: [f64; 3],
    /// Orbit center.
    pub center: [f64; 3],
    /// Eye-to-center distance.
    pub distance: f64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::from_frame(&CameraFrame::default())
    }
}

impl Snapshot {
    /// Copy a model frame, converting log-radius to a distance.
    #[must_use]
    pub fn from_frame(frame: &CameraFrame) -> Self {
        Self {
            matrix: frame.matrix,
            rotation: frame.rotation,
            up: frame.up,
            eye: frame.eye,
            center: frame.center,
            distance: frame.log_radius.exp(),
        }
    }

    /// Whether any matrix entry moved by more than `tolerance`.
    ///
    /// Entries whose difference is NaN are not counted as moved.
    #[must_use]
    pub fn matrix_differs(&self, other: &Self, tolerance: f64) -> bool {
        self.matrix
            .iter()
            .zip(&other.matrix)
            .any(|(a, b)| (a - b).abs() > tolerance)
    }

    /// The view matrix as a glam type.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    /// Narrow to an `f32` block ready for a uniform buffer.
    #[must_use]
    pub fn to_uniform(&self) -> ViewUniform {
        ViewUniform {
            view: self.view_matrix().as_mat4().to_cols_array_2d(),
            eye: [self.eye[0] as f32, self.eye[1] as f32, self.eye[2] as f32],
            distance: self.distance as f32,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block holding the view matrix and eye position.
pub struct ViewUniform {
    /// World-to-view matrix.
    pub view: [[f32; 4]; 4],
    /// Eye position in world space.
    pub eye: [f32; 3],
    /// Eye-to-center distance.
    pub distance: f32,
}

impl Default for ViewUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0, 0.0, 1.0],
            distance: 1.0,
        }
    }
}
