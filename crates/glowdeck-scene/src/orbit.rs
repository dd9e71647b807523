use glam::Vec3;

/// Orbit camera rig: yaw/pitch around a fixed target with clamped zoom
/// and exponential damping toward the input-driven goal state. Panning is
/// deliberately not offered; the tablet stays centered.
#[derive(Debug, Clone)]
pub struct OrbitRig {
    target: Vec3,

    yaw: f32,
    pitch: f32,
    distance: f32,

    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,

    min_distance: f32,
    max_distance: f32,
    min_pitch: f32,
    max_pitch: f32,

    rotate_speed: f32,
    zoom_speed: f32,
    damping: f32,
}

impl OrbitRig {
    /// Rig matching the tablet scene: target above the floor, zoom window
    /// of 3..5 meters, pitch kept off the poles.
    pub fn tablet_default() -> Self {
        let start_eye = Vec3::new(0.0, 1.25, 3.5);
        let target = Vec3::new(0.0, 1.0, 0.0);
        let offset = start_eye - target;
        let distance = offset.length();
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).asin();

        Self {
            target,
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
            min_distance: 3.0,
            max_distance: 5.0,
            min_pitch: -1.4,
            max_pitch: 1.4,
            rotate_speed: 0.005,
            zoom_speed: 0.25,
            damping: 10.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Applies a pointer drag, in logical pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.goal_yaw -= dx * self.rotate_speed;
        self.goal_pitch = (self.goal_pitch + dy * self.rotate_speed)
            .clamp(self.min_pitch, self.max_pitch);
    }

    /// Applies wheel scroll, in lines; positive zooms in.
    pub fn zoom(&mut self, lines: f32) {
        self.goal_distance =
            (self.goal_distance - lines * self.zoom_speed).clamp(self.min_distance, self.max_distance);
    }

    /// Advances the damped state toward the goals.
    pub fn update(&mut self, dt: f32) {
        let k = 1.0 - (-self.damping * dt.max(0.0)).exp();
        self.yaw += (self.goal_yaw - self.yaw) * k;
        self.pitch += (self.goal_pitch - self.pitch) * k;
        self.distance += (self.goal_distance - self.distance) * k;
    }

    /// Current eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(rig: &mut OrbitRig) {
        for _ in 0..600 {
            rig.update(1.0 / 60.0);
        }
    }

    #[test]
    fn default_eye_matches_start_pose() {
        let rig = OrbitRig::tablet_default();
        let eye = rig.eye();
        assert!((eye - Vec3::new(0.0, 1.25, 3.5)).length() < 1e-4);
    }

    #[test]
    fn zoom_clamps_to_distance_window() {
        let mut rig = OrbitRig::tablet_default();
        rig.zoom(100.0);
        settle(&mut rig);
        assert!(((rig.eye() - rig.target()).length() - 3.0).abs() < 1e-3);

        rig.zoom(-100.0);
        settle(&mut rig);
        assert!(((rig.eye() - rig.target()).length() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_never_reaches_the_poles() {
        let mut rig = OrbitRig::tablet_default();
        rig.rotate(0.0, 1e6);
        settle(&mut rig);
        let eye = rig.eye();
        let offset = eye - rig.target();
        // Some horizontal component must survive the clamp.
        assert!(offset.x.abs() + offset.z.abs() > 1e-3);
    }

    #[test]
    fn update_converges_on_goal() {
        let mut rig = OrbitRig::tablet_default();
        rig.rotate(200.0, 0.0);
        let before = rig.eye();
        settle(&mut rig);
        let after = rig.eye();
        assert!((after - before).length() > 1e-3);
        // Distance is preserved by pure rotation.
        assert!(((after - rig.target()).length() - (before - rig.target()).length()).abs() < 1e-3);
    }
}
