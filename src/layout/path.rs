//! Smoothed curve through the level positions.
use std::fmt::Write as _;

use serde::Serialize;

use super::PathPosition;
use crate::config::JitterConfig;

/// Source of uniform samples in `[0, 1)` for control-point jitter.
pub trait Jitter {
    fn next_unit(&mut self) -> f64;

    /// Zero-mean offset in `[-span/2, span/2)`.
    fn offset(&mut self, span: f64) -> f64 {
        (self.next_unit() - 0.5) * span
    }
}

/// No jitter at all; control points sit exactly on the midpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroJitter;

impl Jitter for ZeroJitter {
    fn next_unit(&mut self) -> f64 {
        0.5
    }
}

/// Seeded linear congruential source, reproducible across runs (not crypto secure).
#[derive(Clone, Debug)]
pub struct LcgJitter {
    state: u32,
}

impl LcgJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ (seed >> 32)) as u32,
        }
    }
}

impl Jitter for LcgJitter {
    fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// OS / browser randomness. A failed read degrades to no jitter for that sample.
#[cfg(feature = "rng")]
#[derive(Clone, Copy, Debug, Default)]
pub struct OsJitter;

#[cfg(feature = "rng")]
impl Jitter for OsJitter {
    fn next_unit(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64,
            Err(err) => {
                tracing::debug!(%err, "random source unavailable; skipping jitter");
                0.5
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PathSegment {
    MoveTo { to: PathPosition },
    QuadTo { control: PathPosition, to: PathPosition },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SmoothPath {
    pub segments: Vec<PathSegment>,
}

impl SmoothPath {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// SVG path data, e.g. `M 25.00 30.00 Q 50.40 29.10 75.00 30.00`.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match seg {
                PathSegment::MoveTo { to } => write!(out, "M {:.2} {:.2}", to.x, to.y),
                PathSegment::QuadTo { control, to } => write!(
                    out,
                    "Q {:.2} {:.2} {:.2} {:.2}",
                    control.x, control.y, to.x, to.y
                ),
            };
        }
        out
    }
}

/// Move to the first point, then one quadratic segment per following point with
/// its control point near the midpoint. Output is cosmetic and varies per call
/// unless the jitter source is deterministic.
pub fn smooth_path(points: &[PathPosition], jitter: &mut dyn Jitter, cfg: &JitterConfig) -> SmoothPath {
    let Some(first) = points.first() else {
        return SmoothPath::default();
    };
    let mut segments = Vec::with_capacity(points.len());
    segments.push(PathSegment::MoveTo { to: *first });
    for pair in points.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let mid = prev.midpoint(cur);
        let control = PathPosition {
            x: mid.x + jitter.offset(cfg.span_x),
            y: mid.y + jitter.offset(cfg.span_y),
        };
        segments.push(PathSegment::QuadTo { control, to: cur });
    }
    SmoothPath { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<PathPosition> {
        vec![
            PathPosition::new(10.0, 10.0),
            PathPosition::new(50.0, 10.0),
            PathPosition::new(50.0, 60.0),
        ]
    }

    #[test]
    fn test_empty_input_gives_empty_path() {
        let path = smooth_path(&[], &mut ZeroJitter, &JitterConfig::default());
        assert!(path.is_empty());
        assert_eq!(path.to_svg(), "");
    }

    #[test]
    fn test_zero_jitter_uses_midpoints() {
        let path = smooth_path(&points(), &mut ZeroJitter, &JitterConfig::default());
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.segments[0], PathSegment::MoveTo { to: PathPosition::new(10.0, 10.0) });
        assert_eq!(
            path.segments[2],
            PathSegment::QuadTo {
                control: PathPosition::new(50.0, 35.0),
                to: PathPosition::new(50.0, 60.0),
            }
        );
        assert_eq!(
            path.to_svg(),
            "M 10.00 10.00 Q 30.00 10.00 50.00 10.00 Q 50.00 35.00 50.00 60.00"
        );
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let cfg = JitterConfig::default();
        let pts: Vec<PathPosition> = (0..200).map(|i| PathPosition::new(i as f64 % 100.0, 40.0)).collect();
        let path = smooth_path(&pts, &mut LcgJitter::new(7), &cfg);
        for (seg, pair) in path.segments[1..].iter().zip(pts.windows(2)) {
            let PathSegment::QuadTo { control, .. } = seg else {
                panic!("expected quad segment");
            };
            let mid = pair[0].midpoint(pair[1]);
            assert!((control.x - mid.x).abs() <= 5.0);
            assert!((control.y - mid.y).abs() <= 2.5);
        }
    }

    #[test]
    fn test_lcg_is_reproducible() {
        let cfg = JitterConfig::default();
        let a = smooth_path(&points(), &mut LcgJitter::new(99), &cfg);
        let b = smooth_path(&points(), &mut LcgJitter::new(99), &cfg);
        assert_eq!(a, b);
    }

    #[cfg(feature = "rng")]
    #[test]
    fn test_os_jitter_unit_range() {
        let mut j = OsJitter;
        for _ in 0..100 {
            let u = j.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
