use raylib::prelude::*;

use crate::config::CameraSection;

/// Per-frame pointer input relevant to orbiting.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitInput {
    /// Mouse delta in pixels while the rotate button is held.
    pub drag: Vector2,
    /// Wheel ticks, positive zooms in.
    pub wheel: f32,
}

/// Orbits the origin. Rotation and zoom accumulate into velocities that
/// decay by `damping` each frame.
pub struct OrbitCamera {
    pub target: Vector3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    pub distance: f32,
    pub fov: f32,
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    yaw_vel: f32,
    pitch_vel: f32,
    zoom_scale: f32,
}

impl OrbitCamera {
    pub fn new(cfg: &CameraSection) -> Self {
        Self {
            target: Vector3::zero(),
            // looking down -z from +z, like a camera placed at (0, 0, distance)
            yaw: 90.0,
            pitch: 0.0,
            distance: cfg.distance,
            fov: cfg.fov,
            damping: cfg.damping.clamp(0.01, 1.0),
            rotate_speed: cfg.rotate_speed,
            zoom_speed: cfg.zoom_speed,
            min_distance: 2.0,
            max_distance: 900.0,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
            zoom_scale: 1.0,
        }
    }

    pub fn position(&self) -> Vector3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        self.target
            + Vector3::new(
                yaw_rad.cos() * pitch_rad.cos(),
                pitch_rad.sin(),
                yaw_rad.sin() * pitch_rad.cos(),
            ) * self.distance
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D::perspective(
            self.position(),
            self.target,
            Vector3::new(0.0, 1.0, 0.0),
            self.fov,
        )
    }

    pub fn update(&mut self, input: OrbitInput) {
        self.yaw_vel += input.drag.x * self.rotate_speed;
        self.pitch_vel += input.drag.y * self.rotate_speed;
        if input.wheel != 0.0 {
            self.zoom_scale *= 0.95f32.powf(input.wheel * self.zoom_speed);
        }

        self.yaw += self.yaw_vel * self.damping;
        self.pitch = (self.pitch + self.pitch_vel * self.damping).clamp(-89.0, 89.0);
        self.distance =
            (self.distance * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        let keep = 1.0 - self.damping;
        self.yaw_vel *= keep;
        self.pitch_vel *= keep;
        self.zoom_scale = 1.0 + (self.zoom_scale - 1.0) * keep;
    }

    /// Samples raylib input; `blocked` when the pointer belongs to the UI.
    pub fn input_from(rl: &RaylibHandle, blocked: bool) -> OrbitInput {
        if blocked {
            return OrbitInput::default();
        }
        let drag = if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
            rl.get_mouse_delta()
        } else {
            Vector2::zero()
        };
        OrbitInput {
            drag,
            wheel: rl.get_mouse_wheel_move(),
        }
    }
}
