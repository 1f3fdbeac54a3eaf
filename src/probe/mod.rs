//! Probe placement geometry
//!
//! Both generators are plain iterators over computed positions; they hold no
//! state beyond the loop counter and can be rebuilt from their inputs.

/// Default distance between probes drawn along an event.
pub const PROBE_SPACING: i64 = 100_000;

/// Default triangle shape for point-like events.
pub const TRIANGLE_HEIGHT: f64 = 2.5;
pub const TRIANGLE_WIDTH: i64 = 5001;
pub const TRIANGLE_STEPS: i64 = 15;

/// Evenly spaced positions along `[start, end]`.
///
/// `start` is always the first position. The interval is split into at least
/// two sub-spacings, so any `end > start` yields at least three positions.
#[derive(Debug, Clone)]
pub struct SpacedProbes {
    start: i64,
    end: i64,
    step: f64,
    i: i64,
    done: bool,
}

pub fn spaced_probes(start: i64, end: i64, spacing: i64) -> SpacedProbes {
    let len = end - start;
    let n = if len > 0 { len / spacing.max(1) } else { 0 };
    SpacedProbes {
        start,
        end,
        step: len as f64 / n.max(2) as f64,
        i: 0,
        done: false,
    }
}

impl Iterator for SpacedProbes {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        let pos = self.start + (self.i as f64 * self.step) as i64;
        if pos > self.end {
            self.done = true;
            return None;
        }
        self.i += 1;
        // A zero-length interval would otherwise repeat `start` forever.
        if self.step <= 0.0 {
            self.done = true;
        }
        Some(pos)
    }
}

/// `(position, height)` pairs drawing a symmetric triangle on `center`.
///
/// Heights fall linearly from `height + 0.1` at the center to `0.1` at both
/// ends; `steps` should be odd.
#[derive(Debug, Clone)]
pub struct TriangleProbes {
    center: i64,
    height: f64,
    pos_step: i64,
    height_step: f64,
    i: i64,
    last: i64,
}

/// Triangle with the default shape (15 points over 5001 bp, height 2.5).
pub fn triangle_probes(center: i64) -> TriangleProbes {
    TriangleProbes::new(center, TRIANGLE_HEIGHT, TRIANGLE_WIDTH, TRIANGLE_STEPS)
}

impl TriangleProbes {
    pub fn new(center: i64, height: f64, width: i64, steps: i64) -> Self {
        let steps = steps.max(3);
        let half = steps / 2;
        Self {
            center,
            height,
            pos_step: (width - 1) / (steps - 1),
            height_step: height / ((steps - 1) / 2) as f64,
            i: -half,
            last: half,
        }
    }
}

impl Iterator for TriangleProbes {
    type Item = (i64, f64);

    fn next(&mut self) -> Option<(i64, f64)> {
        if self.i > self.last {
            return None;
        }
        let i = self.i;
        self.i += 1;
        Some((
            self.center + i * self.pos_step,
            self.height - self.height_step * i.abs() as f64 + 0.1,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last - self.i + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}
