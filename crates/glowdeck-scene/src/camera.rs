use glam::{Mat4, Vec3};

/// Perspective projection parameters. The view side comes from the orbit
/// rig; this type only owns projection state and the current aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            near,
            far,
            aspect: 1.0,
        }
    }

    /// Updates the aspect ratio from a pixel extent. Zero extents are
    /// ignored so a minimized window does not poison the projection.
    pub fn set_viewport(&mut self, width_px: u32, height_px: u32) {
        if width_px > 0 && height_px > 0 {
            self.aspect = width_px as f32 / height_px as f32;
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Captures the matrices for one frame given the rig's eye and target.
    pub fn snapshot(&self, eye: Vec3, target: Vec3) -> CameraSnapshot {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = self.projection();
        CameraSnapshot {
            view,
            proj,
            view_proj: proj * view,
            eye,
        }
    }
}

/// Frozen camera state for one frame.
///
/// Every pass that needs the camera (forward scene, overlay compositor,
/// pointer unprojection) reads the same snapshot, so the panel can never
/// drift against the scene within a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub view: Mat4,
    pub proj: Mat4,
    pub view_proj: Mat4,
    pub eye: Vec3,
}

impl CameraSnapshot {
    /// World-space ray through a cursor position, for picking.
    ///
    /// `cursor_px` and `viewport_px` are physical pixels. Returns
    /// `(origin, direction)` with a normalized direction.
    pub fn cursor_ray(&self, cursor_px: (f32, f32), viewport_px: (f32, f32)) -> (Vec3, Vec3) {
        let ndc_x = cursor_px.0 / viewport_px.0.max(1.0) * 2.0 - 1.0;
        let ndc_y = 1.0 - cursor_px.1 / viewport_px.1.max(1.0) * 2.0;

        let inv = (self.proj * self.view).inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        (self.eye, (far - near).normalize_or_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_viewport_keeps_previous_aspect() {
        let mut cam = PerspectiveCamera::new(35.0, 0.1, 100.0);
        cam.set_viewport(1600, 800);
        cam.set_viewport(0, 800);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn snapshot_view_proj_is_product() {
        let cam = PerspectiveCamera::new(35.0, 0.1, 100.0);
        let snap = cam.snapshot(Vec3::new(0.0, 1.25, 3.5), Vec3::new(0.0, 1.0, 0.0));
        let expected = snap.proj * snap.view;
        assert!((snap.view_proj - expected).abs_diff_eq(Mat4::ZERO, 1e-6));
    }

    #[test]
    fn center_cursor_ray_points_at_target() {
        let cam = PerspectiveCamera::new(35.0, 0.1, 100.0);
        let eye = Vec3::new(0.0, 1.0, 4.0);
        let target = Vec3::new(0.0, 1.0, 0.0);
        let snap = cam.snapshot(eye, target);
        let (origin, dir) = snap.cursor_ray((400.0, 300.0), (800.0, 600.0));
        assert_eq!(origin, eye);
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }
}
