//! Frame-rate independent smoothing helpers.

/// Exponentially damp `current` toward `target` at `rate` (1/s) over `dt`
/// seconds: `target + (current - target) * exp(-rate * dt)`.
///
/// Never lands exactly on `target`; callers that need a discrete state
/// compare against a tolerance instead.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    target + (current - target) * (-rate * dt).exp()
}

/// Hermite smoothstep of `x` over `[edge0, edge1]`, 0 below and 1 above.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let t = (x - edge0) / (edge1 - edge0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Upper bound on damping steps needed to bring `|current - target|` under
/// `epsilon` with a fixed step `dt`.
#[cfg(test)]
fn steps_to_converge(distance: f32, epsilon: f32, rate: f32, dt: f32) -> u32 {
    if distance <= epsilon {
        return 0;
    }
    ((distance / epsilon).ln() / (rate * dt)).ceil() as u32 + 1
}
