use std::collections::BTreeMap;

/// A window pointer event reduced to what the engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerAction {
    Down { x: f32, y: f32 },
    /// Positions of every pointer still down.
    Sample(Vec<(f32, f32)>),
    Up,
    /// A wheel step, expressed as a pinch between two distances.
    Zoom { old_distance: f32, new_distance: f32 },
}

/// Reference distance for wheel zoom; only the ratio matters.
const WHEEL_BASE_DISTANCE: f32 = 100.0;
const WHEEL_STEP: f32 = 1.1;

/// Merges mouse and touch input into one pointer stream.
#[derive(Debug, Default)]
pub struct PointerInput {
    mouse_down: bool,
    cursor: Option<(f32, f32)>,
    touches: BTreeMap<u64, (f32, f32)>,
}

impl PointerInput {
    pub fn mouse_pressed(&mut self) -> Option<PointerAction> {
        let (x, y) = self.cursor?;
        self.mouse_down = true;
        Some(PointerAction::Down { x, y })
    }

    pub fn mouse_released(&mut self) -> Option<PointerAction> {
        std::mem::take(&mut self.mouse_down).then_some(PointerAction::Up)
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> Option<PointerAction> {
        self.cursor = Some((x, y));
        self.mouse_down.then(|| PointerAction::Sample(vec![(x, y)]))
    }

    /// `lines` is positive when scrolling up, which zooms in.
    #[must_use]
    pub fn wheel(&self, lines: f32) -> Option<PointerAction> {
        if lines == 0.0 || !lines.is_finite() {
            return None;
        }
        Some(PointerAction::Zoom {
            old_distance: WHEEL_BASE_DISTANCE,
            new_distance: WHEEL_BASE_DISTANCE * WHEEL_STEP.powf(lines),
        })
    }

    pub fn touch_started(&mut self, id: u64, x: f32, y: f32) -> PointerAction {
        self.touches.insert(id, (x, y));
        if self.touches.len() == 1 {
            PointerAction::Down { x, y }
        } else {
            self.sample()
        }
    }

    pub fn touch_moved(&mut self, id: u64, x: f32, y: f32) -> Option<PointerAction> {
        let position = self.touches.get_mut(&id)?;
        *position = (x, y);
        Some(self.sample())
    }

    pub fn touch_ended(&mut self, id: u64) -> Option<PointerAction> {
        self.touches.remove(&id)?;
        if self.touches.is_empty() {
            Some(PointerAction::Up)
        } else {
            Some(self.sample())
        }
    }

    fn sample(&self) -> PointerAction {
        PointerAction::Sample(self.touches.values().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_drag_produces_down_samples_up() {
        let mut input = PointerInput::default();

        assert_eq!(input.cursor_moved(1.0, 2.0), None);
        assert_eq!(input.mouse_pressed(), Some(PointerAction::Down { x: 1.0, y: 2.0 }));
        assert_eq!(
            input.cursor_moved(4.0, 2.0),
            Some(PointerAction::Sample(vec![(4.0, 2.0)]))
        );
        assert_eq!(input.mouse_released(), Some(PointerAction::Up));
        assert_eq!(input.mouse_released(), None);
    }

    #[test]
    fn test_press_before_cursor_is_known_is_ignored() {
        let mut input = PointerInput::default();

        assert_eq!(input.mouse_pressed(), None);
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let input = PointerInput::default();

        let Some(PointerAction::Zoom {
            old_distance,
            new_distance,
        }) = input.wheel(1.0)
        else {
            panic!("expected zoom");
        };

        assert!(new_distance > old_distance);
        assert_eq!(input.wheel(0.0), None);
    }

    #[test]
    fn test_second_finger_turns_samples_into_pairs() {
        let mut input = PointerInput::default();

        assert_eq!(
            input.touch_started(7, 0.0, 0.0),
            PointerAction::Down { x: 0.0, y: 0.0 }
        );
        assert_eq!(
            input.touch_started(9, 10.0, 0.0),
            PointerAction::Sample(vec![(0.0, 0.0), (10.0, 0.0)])
        );
        assert_eq!(
            input.touch_moved(9, 20.0, 0.0),
            Some(PointerAction::Sample(vec![(0.0, 0.0), (20.0, 0.0)]))
        );
        assert_eq!(
            input.touch_ended(7),
            Some(PointerAction::Sample(vec![(20.0, 0.0)]))
        );
        assert_eq!(input.touch_ended(9), Some(PointerAction::Up));
        assert_eq!(input.touch_moved(9, 0.0, 0.0), None);
    }
}
