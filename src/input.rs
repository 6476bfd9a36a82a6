// Pointer bookkeeping for orbit dragging. Kept free of web types so it can be
// tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Orbit drag mapping: primary button rotates (pans with a modifier held),
/// secondary button pans. Anything else does not drag.
#[inline]
pub fn drag_mode_for(button: i16, modifier: bool) -> Option<DragMode> {
    match (button, modifier) {
        (0, false) => Some(DragMode::Rotate),
        (0, true) => Some(DragMode::Pan),
        (2, _) => Some(DragMode::Pan),
        _ => None,
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub mode: Option<DragMode>,
    pub last: [f32; 2],
}

impl DragState {
    pub fn begin(&mut self, mode: Option<DragMode>, x: f32, y: f32) {
        self.mode = mode;
        self.last = [x, y];
    }

    /// Movement since the last call while a drag is active.
    pub fn moved(&mut self, x: f32, y: f32) -> Option<(DragMode, f32, f32)> {
        let mode = self.mode?;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let dx = x - self.last[0];
        let dy = y - self.last[1];
        self.last = [x, y];
        Some((mode, dx, dy))
    }

    pub fn end(&mut self) {
        self.mode = None;
    }
}

/// Wheel delta converted to pixels. `delta_mode` follows the DOM constants:
/// 0 pixels, 1 lines, 2 pages.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f64 {
    match delta_mode {
        1 => delta_y * 16.0,
        2 => delta_y * 800.0,
        _ => delta_y,
    }
}

/// Normalise wheel deltas (pixel or line mode) to signed notches.
#[inline]
pub fn wheel_notches(delta_y: f64, notch_px: f32) -> f32 {
    if !delta_y.is_finite() || notch_px <= 0.0 {
        return 0.0;
    }
    (delta_y as f32 / notch_px).clamp(-3.0, 3.0)
}

/// One step of a two-finger gesture: `scale` is the previous finger
/// distance over the new one (below 1 when spreading), `pan` is the
/// midpoint movement in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchStep {
    pub scale: f32,
    pub pan: [f32; 2],
}

/// Tracks up to two active touch points for pinch zoom and two-finger pan.
#[derive(Default, Clone, Debug)]
pub struct TouchGesture {
    points: Vec<(i32, [f32; 2])>,
}

impl TouchGesture {
    pub fn down(&mut self, id: i32, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        if let Some(p) = self.points.iter_mut().find(|(pid, _)| *pid == id) {
            p.1 = [x, y];
        } else if self.points.len() < 2 {
            self.points.push((id, [x, y]));
        }
    }

    pub fn up(&mut self, id: i32) {
        self.points.retain(|(pid, _)| *pid != id);
    }

    /// True while two fingers are down.
    #[inline]
    pub fn is_pinching(&self) -> bool {
        self.points.len() == 2
    }

    /// Update finger `id`; returns a step only while pinching.
    pub fn moved(&mut self, id: i32, x: f32, y: f32) -> Option<PinchStep> {
        if !self.is_pinching() || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (dist_before, mid_before) = self.span()?;
        let slot = self.points.iter_mut().find(|(pid, _)| *pid == id)?;
        slot.1 = [x, y];
        let (dist_after, mid_after) = self.span()?;
        let scale = if dist_after > 1.0 && dist_before > 1.0 {
            dist_before / dist_after
        } else {
            1.0
        };
        Some(PinchStep {
            scale,
            pan: [mid_after[0] - mid_before[0], mid_after[1] - mid_before[1]],
        })
    }

    fn span(&self) -> Option<(f32, [f32; 2])> {
        let [(_, a), (_, b)] = self.points.as_slice() else {
            return None;
        };
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        let mid = [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5];
        Some(((dx * dx + dy * dy).sqrt(), mid))
    }
}
