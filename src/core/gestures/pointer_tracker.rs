use log::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDelta {
    Drag { dx: f32, dy: f32 },
    Pinch { old_distance: f32, new_distance: f32 },
}

/// Converts successive multi-pointer samples into drag or pinch deltas.
///
/// A change in pointer count only re-establishes the baseline, so going from
/// two pointers to one (or back) never produces a jump.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    previous: Vec<(f32, f32)>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, pointers: &[(f32, f32)]) -> Option<PointerDelta> {
        let previous = std::mem::replace(&mut self.previous, pointers.to_vec());

        if pointers.is_empty() || previous.len() != pointers.len() {
            trace!("pointer baseline reset: {} -> {}", previous.len(), pointers.len());
            return None;
        }

        match pointers {
            [(x, y)] => {
                let (px, py) = previous[0];
                Some(PointerDelta::Drag {
                    dx: x - px,
                    dy: y - py,
                })
            }
            [a, b, ..] => Some(PointerDelta::Pinch {
                old_distance: distance(previous[0], previous[1]),
                new_distance: distance(*a, *b),
            }),
            [] => None,
        }
    }

    pub fn release(&mut self) {
        self.previous.clear();
    }

    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.previous.len()
    }
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}
