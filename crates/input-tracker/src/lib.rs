//! Badgesmith Input Tracker
//!
//! Turns raw gesture events on the drawing surface into photo transform
//! edits:
//!
//! - **Drag:** primary-button mouse drag or single-finger drag moves the photo
//! - **Wheel:** each notch scales by a fixed step
//! - **Pinch:** two-finger distance change scales proportionally
//!
//! Native browser-style zoom and multi-touch scrolling are reported back
//! as [`EventDisposition::PreventDefault`] so the host can suppress them.

use badgesmith_badge_model::event::{pinch_distance, GestureEvent, MouseButton, TouchPoint};
use badgesmith_badge_model::transform::PhotoTransform;
use badgesmith_common::config::GestureSettings;

/// What the host should do with the native handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Let the platform handle the event as usual.
    Default,
    /// Suppress native zoom/scroll; the tracker consumed the event.
    PreventDefault,
}

/// Drag and pinch bookkeeping between successive events.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    settings: GestureSettings,
    dragging: bool,
    last_position: (f64, f64),
    last_distance: Option<f64>,
}

impl GestureTracker {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            dragging: false,
            last_position: (0.0, 0.0),
            last_distance: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one event to `transform`.
    pub fn handle(
        &mut self,
        event: &GestureEvent,
        transform: &mut PhotoTransform,
    ) -> EventDisposition {
        match event {
            GestureEvent::PointerDown { x, y, button } => {
                if *button == MouseButton::Left {
                    self.dragging = true;
                    self.last_position = (*x, *y);
                }
            }
            GestureEvent::PointerMove { x, y } => {
                self.drag_to(*x, *y, transform);
            }
            GestureEvent::PointerUp | GestureEvent::PointerLeave => {
                self.stop();
            }
            GestureEvent::TouchStart { touches } => {
                if let Some(first) = touches.first() {
                    self.dragging = true;
                    self.last_position = (first.x, first.y);
                    self.last_distance = pinch_distance(touches);
                }
            }
            GestureEvent::TouchMove { touches } => {
                self.touch_move(touches, transform);
            }
            GestureEvent::TouchEnd { touches } => match touches.first() {
                Some(remaining) if touches.len() == 1 => {
                    self.last_position = (remaining.x, remaining.y);
                    self.last_distance = None;
                }
                Some(_) => {
                    self.last_distance = pinch_distance(touches);
                }
                None => self.stop(),
            },
            GestureEvent::Wheel { delta_y } => {
                let step = if *delta_y < 0.0 {
                    self.settings.wheel_step
                } else {
                    -self.settings.wheel_step
                };
                transform.adjust_scale(step);
                tracing::trace!(scale = transform.scale(), "wheel zoom");
            }
        }

        disposition_for(event)
    }

    /// Feed a whole gesture script in order.
    pub fn replay<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a GestureEvent>,
        transform: &mut PhotoTransform,
    ) -> usize {
        let mut applied = 0;
        for event in events {
            self.handle(event, transform);
            applied += 1;
        }
        tracing::debug!(
            events = applied,
            scale = transform.scale(),
            dx = transform.offset().0,
            dy = transform.offset().1,
            "Gesture script replayed"
        );
        applied
    }

    fn touch_move(&mut self, touches: &[TouchPoint], transform: &mut PhotoTransform) {
        if !self.dragging {
            return;
        }
        if touches.len() == 2 {
            let current = pinch_distance(touches);
            if let (Some(previous), Some(current)) = (self.last_distance, current) {
                transform.adjust_scale((current - previous) * self.settings.pinch_coefficient);
                tracing::trace!(scale = transform.scale(), "pinch zoom");
            }
            self.last_distance = current;
            return;
        }
        if let Some(point) = touches.first() {
            self.drag_to(point.x, point.y, transform);
        }
    }

    fn drag_to(&mut self, x: f64, y: f64, transform: &mut PhotoTransform) {
        if !self.dragging {
            return;
        }
        let (last_x, last_y) = self.last_position;
        transform.translate(x - last_x, y - last_y);
        self.last_position = (x, y);
    }

    fn stop(&mut self) {
        self.dragging = false;
        self.last_distance = None;
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

fn disposition_for(event: &GestureEvent) -> EventDisposition {
    match event {
        GestureEvent::Wheel { .. } => EventDisposition::PreventDefault,
        GestureEvent::TouchStart { .. } | GestureEvent::TouchMove { .. }
            if event.touch_count() > 1 =>
        {
            EventDisposition::PreventDefault
        }
        _ => EventDisposition::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badgesmith_badge_model::transform::MIN_SCALE;
    use proptest::prelude::*;

    fn touches(points: &[(f64, f64)]) -> Vec<TouchPoint> {
        points.iter().map(|&(x, y)| TouchPoint::new(x, y)).collect()
    }

    #[test]
    fn mouse_drag_accumulates_offset() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;

        tracker.handle(&GestureEvent::pointer_down(100.0, 100.0), &mut t);
        tracker.handle(&GestureEvent::pointer_move(110.0, 95.0), &mut t);
        tracker.handle(&GestureEvent::pointer_move(130.0, 90.0), &mut t);
        tracker.handle(&GestureEvent::PointerUp, &mut t);
        tracker.handle(&GestureEvent::pointer_move(500.0, 500.0), &mut t);

        assert_eq!(t.offset(), (30.0, -10.0));
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        tracker.handle(&GestureEvent::pointer_move(40.0, 40.0), &mut t);
        assert_eq!(t, PhotoTransform::IDENTITY);
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        tracker.handle(
            &GestureEvent::PointerDown {
                x: 0.0,
                y: 0.0,
                button: MouseButton::Right,
            },
            &mut t,
        );
        tracker.handle(&GestureEvent::pointer_move(20.0, 20.0), &mut t);
        assert_eq!(t.offset(), (0.0, 0.0));
    }

    #[test]
    fn leaving_the_surface_ends_the_drag() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        tracker.handle(&GestureEvent::pointer_down(0.0, 0.0), &mut t);
        tracker.handle(&GestureEvent::PointerLeave, &mut t);
        tracker.handle(&GestureEvent::pointer_move(9.0, 9.0), &mut t);
        assert_eq!(t.offset(), (0.0, 0.0));
    }

    #[test]
    fn wheel_up_grows_and_wheel_down_floors() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        for _ in 0..10 {
            let disposition = tracker.handle(&GestureEvent::wheel(-100.0), &mut t);
            assert_eq!(disposition, EventDisposition::PreventDefault);
        }
        assert!((t.scale() - 1.5).abs() < 1e-9);

        for _ in 0..30 {
            tracker.handle(&GestureEvent::wheel(100.0), &mut t);
        }
        assert_eq!(t.scale(), MIN_SCALE);
    }

    #[test]
    fn pinch_scales_by_distance_change() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;

        let start = GestureEvent::TouchStart {
            touches: touches(&[(0.0, 0.0), (100.0, 0.0)]),
        };
        assert_eq!(
            tracker.handle(&start, &mut t),
            EventDisposition::PreventDefault
        );

        tracker.handle(
            &GestureEvent::TouchMove {
                touches: touches(&[(0.0, 0.0), (140.0, 0.0)]),
            },
            &mut t,
        );
        // +40px * 0.005 = +0.2
        assert!((t.scale() - 1.2).abs() < 1e-9);

        tracker.handle(
            &GestureEvent::TouchMove {
                touches: touches(&[(0.0, 0.0), (120.0, 0.0)]),
            },
            &mut t,
        );
        assert!((t.scale() - 1.1).abs() < 1e-9);
        assert_eq!(t.offset(), (0.0, 0.0));
    }

    #[test]
    fn single_finger_drag_moves_photo() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        let start = GestureEvent::TouchStart {
            touches: touches(&[(50.0, 50.0)]),
        };
        assert_eq!(tracker.handle(&start, &mut t), EventDisposition::Default);
        tracker.handle(
            &GestureEvent::TouchMove {
                touches: touches(&[(60.0, 45.0)]),
            },
            &mut t,
        );
        assert_eq!(t.offset(), (10.0, -5.0));
    }

    #[test]
    fn lifting_one_of_two_fingers_continues_as_drag() {
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        tracker.handle(
            &GestureEvent::TouchStart {
                touches: touches(&[(0.0, 0.0), (100.0, 0.0)]),
            },
            &mut t,
        );
        tracker.handle(
            &GestureEvent::TouchEnd {
                touches: touches(&[(100.0, 0.0)]),
            },
            &mut t,
        );
        tracker.handle(
            &GestureEvent::TouchMove {
                touches: touches(&[(90.0, 10.0)]),
            },
            &mut t,
        );
        assert_eq!(t.offset(), (-10.0, 10.0));

        tracker.handle(&GestureEvent::TouchEnd { touches: vec![] }, &mut t);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn replay_counts_events() {
        let script = vec![
            GestureEvent::pointer_down(0.0, 0.0),
            GestureEvent::pointer_move(5.0, 5.0),
            GestureEvent::PointerUp,
            GestureEvent::wheel(-1.0),
        ];
        let mut tracker = GestureTracker::default();
        let mut t = PhotoTransform::IDENTITY;
        assert_eq!(tracker.replay(&script, &mut t), 4);
        assert_eq!(t.offset(), (5.0, 5.0));
        assert!((t.scale() - 1.05).abs() < 1e-9);
    }

    #[test]
    fn custom_settings_change_steps() {
        let mut tracker = GestureTracker::new(GestureSettings {
            wheel_step: 0.25,
            pinch_coefficient: 0.01,
        });
        let mut t = PhotoTransform::IDENTITY;
        tracker.handle(&GestureEvent::wheel(-3.0), &mut t);
        assert!((t.scale() - 1.25).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn pinch_never_inverts_scale(distances in prop::collection::vec(0.0f64..2000.0, 1..100)) {
            let mut tracker = GestureTracker::default();
            let mut t = PhotoTransform::IDENTITY;
            tracker.handle(
                &GestureEvent::TouchStart { touches: touches(&[(0.0, 0.0), (distances[0], 0.0)]) },
                &mut t,
            );
            for d in distances {
                tracker.handle(
                    &GestureEvent::TouchMove { touches: touches(&[(0.0, 0.0), (d, 0.0)]) },
                    &mut t,
                );
                prop_assert!(t.scale() >= MIN_SCALE);
            }
        }
    }
}
