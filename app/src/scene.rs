use std::f32::consts::TAU;

use cg_math::{Interpolate, Quaternion, Transform};
use glam::Vec3;
use loop_core::Simulation;

use crate::renderer::Renderer;

/// Simulation snapshot of the FPS-camera exercise scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    pub time: f32,
    pub teapot: Transform,
    pub box_orbit: Transform,
    pub box_tumble: Transform,
}

impl SceneState {
    pub fn at(time: f32) -> Self {
        let tumble_axis = Vec3::new(1.0, 1.0, 0.0).normalize();
        let orbit_angle = time * 0.5;

        Self {
            time,
            teapot: Transform::from_position(Vec3::new(0.0, 1.0, 0.0))
                .with_rotation(Quaternion::from_axis_angle(Vec3::Y, time)),
            box_orbit: Transform::from_position(Vec3::new(
                4.0 * orbit_angle.cos(),
                0.5,
                4.0 * orbit_angle.sin(),
            ))
            .with_rotation(Quaternion::from_axis_angle(Vec3::Y, -orbit_angle))
            .with_scale(Vec3::splat(0.5)),
            box_tumble: Transform::from_position(Vec3::new(-3.0, 1.0 + (time * TAU * 0.25).sin(), 2.0))
                .with_rotation(Quaternion::from_axis_angle(tumble_axis, time * 2.0)),
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl Interpolate for SceneState {
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        Self {
            time: self.time.interpolate(&other.time, alpha),
            teapot: self.teapot.interpolate(&other.teapot, alpha),
            box_orbit: self.box_orbit.interpolate(&other.box_orbit, alpha),
            box_tumble: self.box_tumble.interpolate(&other.box_tumble, alpha),
        }
    }
}

pub struct FpsScene<R: Renderer> {
    time_scale: f32,
    renderer: R,
}

impl<R: Renderer> FpsScene<R> {
    pub fn new(time_scale: f32, renderer: R) -> Self {
        Self {
            time_scale,
            renderer,
        }
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: Renderer> Simulation for FpsScene<R> {
    type State = SceneState;

    fn update(&mut self, state: &SceneState, dt: f32) -> SceneState {
        SceneState::at(state.time + dt * self.time_scale)
    }

    fn render(&mut self, state: &SceneState) {
        self.renderer.submit("teapot", state.teapot.to_mat4());
        self.renderer.submit("box", state.box_orbit.to_mat4());
        self.renderer.submit("box2", state.box_tumble.to_mat4());
        self.renderer.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use loop_core::{LoopConfig, Scheduler};

    #[derive(Default)]
    struct Capture {
        frames: Vec<Vec<(&'static str, Mat4)>>,
        current: Vec<(&'static str, Mat4)>,
    }

    impl Renderer for Capture {
        fn submit(&mut self, object: &'static str, model: Mat4) {
            self.current.push((object, model));
        }

        fn present(&mut self) {
            self.frames.push(std::mem::take(&mut self.current));
        }
    }

    #[test]
    fn update_scales_scene_time() {
        let mut scene = FpsScene::new(2.0, Capture::default());
        let next = scene.update(&SceneState::default(), 0.1);
        assert!((next.time - 0.2).abs() < 1.0e-6);
        assert_eq!(next, SceneState::at(next.time));
    }

    #[test]
    fn render_submits_every_object_once_per_frame() {
        let cfg = LoopConfig::default().with_frame_rate(0.0);
        let mut sched = Scheduler::new(cfg, FpsScene::new(1.0, Capture::default()), SceneState::default());

        sched.advance(0.0);
        sched.advance(0.15);

        let frames = &sched.simulation().renderer().frames;
        assert_eq!(frames.len(), 2);
        let names: Vec<_> = frames[1].iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["teapot", "box", "box2"]);
    }

    #[test]
    fn blended_teapot_sits_between_snapshots() {
        let a = SceneState::at(1.0);
        let b = SceneState::at(1.1);
        let mid = a.interpolate(&b, 0.5);

        assert!((mid.time - 1.05).abs() < 1.0e-5);
        let expected = Quaternion::from_axis_angle(Vec3::Y, 1.05);
        assert!((mid.teapot.rotation.dot(expected).abs() - 1.0).abs() < 1.0e-5);
        assert!((mid.box_tumble.rotation.norm() - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn log_renderer_counts_frames() {
        let mut r = crate::renderer::LogRenderer::new(2);
        let mut scene = FpsScene::new(1.0, &mut r);
        scene.render(&SceneState::default());
        scene.render(&SceneState::at(0.5));
        drop(scene);
        assert_eq!(r.frames(), 2);
        assert_eq!(r.submissions(), 6);
    }
}
