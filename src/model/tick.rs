use glam::DVec2;

/// Input gathered over one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer movement since the previous tick, in pixels (x right, y down)
    pub mouse_motion: DVec2,
}

/// One simulation step as seen by entities
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tick {
    pub frame: u64,
    /// Seconds since the previous tick
    pub dt: f64,
    pub elapsed: f64,
    pub input: InputSnapshot,
}

impl Tick {
    pub fn with_motion(dx: f64, dy: f64) -> Self {
        Self {
            input: InputSnapshot { mouse_motion: DVec2::new(dx, dy) },
            ..Self::default()
        }
    }
}
