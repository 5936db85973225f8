use log::{debug, trace};

use crate::core::data::dimensions::Dimensions;
use crate::core::data::parameter_map::SharedParameters;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// A drag or pinch just finished; re-render once.
    Render,
    /// Release without a gesture.
    Tap { x: f32, y: f32 },
    None,
}

/// Turns drag and pinch deltas into `centerX`/`centerY`/`scale` updates.
#[derive(Debug, Clone)]
pub struct GestureController {
    touch_scale: f32,
    surface: Option<Dimensions>,
    in_progress: bool,
    last_pointer: Option<(f32, f32)>,
}

impl GestureController {
    #[must_use]
    pub fn new(touch_scale: f32) -> Self {
        Self {
            touch_scale,
            surface: None,
            in_progress: false,
            last_pointer: None,
        }
    }

    pub fn set_surface(&mut self, surface: Dimensions) {
        self.surface = Some(surface);
    }

    /// Plane units per screen unit for drags, `touch_scale / min(width, height)`.
    #[must_use]
    pub fn drag_factor(&self) -> Option<f32> {
        self.surface
            .map(|surface| self.touch_scale / surface.shorter_side() as f32)
    }

    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.last_pointer = Some((x, y));
        self.in_progress = false;
    }

    /// Returns whether any parameter changed. Fractals without centre keys
    /// ignore drags.
    pub fn on_drag_delta(&mut self, parameters: &SharedParameters, dx: f32, dy: f32) -> bool {
        self.in_progress = true;

        let Some(factor) = self.drag_factor() else {
            return false;
        };

        let (moved_x, moved_y) = parameters.with(|map| {
            (
                map.update("centerX", |x| x + dx * factor),
                map.update("centerY", |y| y - dy * factor),
            )
        });

        trace!("drag dx={} dy={} -> centerX={:?} centerY={:?}", dx, dy, moved_x, moved_y);

        moved_x.is_some() || moved_y.is_some()
    }

    /// Multiplies `scale` by `new_distance / old_distance`. Does nothing until
    /// a positive baseline distance exists.
    pub fn on_pinch(
        &mut self,
        parameters: &SharedParameters,
        old_distance: f32,
        new_distance: f32,
    ) -> bool {
        self.in_progress = true;

        if old_distance.is_nan() || old_distance <= 0.0 || !new_distance.is_finite() {
            return false;
        }

        let ratio = new_distance / old_distance;
        let scale = parameters.with(|map| map.update("scale", |scale| scale * ratio));

        trace!("pinch {} -> {} scale={:?}", old_distance, new_distance, scale);

        scale.is_some()
    }

    pub fn on_gesture_end(&mut self) -> GestureOutcome {
        if std::mem::take(&mut self.in_progress) {
            debug!("gesture finished, requesting render");
            return GestureOutcome::Render;
        }

        match self.last_pointer {
            Some((x, y)) => {
                debug!("tap at ({}, {})", x, y);
                GestureOutcome::Tap { x, y }
            }
            None => GestureOutcome::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parameter_map::ParameterMap;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    fn controller(width: u32, height: u32) -> GestureController {
        let mut controller = GestureController::new(1.5);
        controller.set_surface(Dimensions::new(width, height).unwrap());
        controller
    }

    fn centred() -> SharedParameters {
        SharedParameters::new(
            [("centerX", 0.0), ("centerY", 0.0), ("scale", 2.0)]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn test_drag_moves_center_by_scaled_delta() {
        let mut gestures = controller(200, 200);
        let params = centred();

        assert!(gestures.on_drag_delta(&params, 10.0, 0.0));

        assert!(approx(params.get("centerX").unwrap(), 0.075));
        assert_eq!(params.get("centerY"), Some(0.0));
    }

    #[test]
    fn test_drag_inverts_vertical_axis() {
        let mut gestures = controller(300, 200);
        let params = centred();

        gestures.on_drag_delta(&params, 0.0, 20.0);

        assert!(approx(params.get("centerY").unwrap(), -0.15));
    }

    #[test]
    fn test_drag_without_center_keys_is_a_no_op() {
        let mut gestures = controller(200, 200);
        let params = SharedParameters::new([("scale", 2.0)].into_iter().collect());

        assert!(!gestures.on_drag_delta(&params, 10.0, 5.0));
        assert!(gestures.on_pinch(&params, 100.0, 150.0));

        let expected: ParameterMap = [("scale", 3.0)].into_iter().collect();
        assert_eq!(params.snapshot(), expected);
    }

    #[test]
    fn test_drag_before_surface_is_known_changes_nothing() {
        let mut gestures = GestureController::new(1.5);
        let params = centred();

        assert!(!gestures.on_drag_delta(&params, 10.0, 10.0));
        assert_eq!(params.get("centerX"), Some(0.0));
    }

    #[test]
    fn test_pinch_multiplies_scale() {
        let mut gestures = controller(200, 200);
        let params = centred();

        gestures.on_pinch(&params, 100.0, 150.0);

        assert!(approx(params.get("scale").unwrap(), 3.0));
    }

    #[test]
    fn test_pinch_without_baseline_is_a_no_op() {
        let mut gestures = controller(200, 200);
        let params = centred();

        assert!(!gestures.on_pinch(&params, 0.0, 150.0));
        assert!(!gestures.on_pinch(&params, -1.0, 150.0));
        assert!(!gestures.on_pinch(&params, f32::NAN, 150.0));

        assert_eq!(params.get("scale"), Some(2.0));
    }

    #[test]
    fn test_release_after_gesture_requests_one_render() {
        let mut gestures = controller(200, 200);
        let params = centred();
        gestures.on_pointer_down(10.0, 10.0);
        gestures.on_drag_delta(&params, 1.0, 1.0);
        gestures.on_drag_delta(&params, 1.0, 1.0);

        assert_eq!(gestures.on_gesture_end(), GestureOutcome::Render);
        assert!(!gestures.in_progress());
    }

    #[test]
    fn test_release_without_gesture_is_a_tap() {
        let mut gestures = controller(200, 200);
        gestures.on_pointer_down(42.0, 7.0);

        assert_eq!(
            gestures.on_gesture_end(),
            GestureOutcome::Tap { x: 42.0, y: 7.0 }
        );
    }

    #[test]
    fn test_release_with_no_pointer_history_does_nothing() {
        let mut gestures = controller(200, 200);

        assert_eq!(gestures.on_gesture_end(), GestureOutcome::None);
    }
}
