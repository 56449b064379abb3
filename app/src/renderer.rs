use glam::Mat4;
use log::debug;

/// Sink for per-object model matrices. Window, shaders and meshes live behind it.
pub trait Renderer {
    fn submit(&mut self, object: &'static str, model: Mat4);
    fn present(&mut self);
}

/// Headless renderer: counts what it is given and logs a sample now and then.
pub struct LogRenderer {
    log_every_frames: u64,
    frames: u64,
    submissions: u64,
    pending: Vec<(&'static str, Mat4)>,
}

impl LogRenderer {
    pub fn new(log_every_frames: u64) -> Self {
        Self {
            log_every_frames,
            frames: 0,
            submissions: 0,
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn submissions(&self) -> u64 {
        self.submissions
    }
}

impl Renderer for LogRenderer {
    fn submit(&mut self, object: &'static str, model: Mat4) {
        self.submissions += 1;
        self.pending.push((object, model));
    }

    fn present(&mut self) {
        self.frames += 1;

        if self.log_every_frames > 0 && self.frames % self.log_every_frames == 0 {
            for (object, model) in self.pending.iter() {
                let t = model.w_axis;
                debug!(
                    "frame {} {object}: translation=({:.3}, {:.3}, {:.3})",
                    self.frames, t.x, t.y, t.z
                );
            }
        }
        self.pending.clear();
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    #[inline]
    fn submit(&mut self, object: &'static str, model: Mat4) {
        (**self).submit(object, model)
    }

    #[inline]
    fn present(&mut self) {
        (**self).present()
    }
}
