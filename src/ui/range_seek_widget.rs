use std::any::Any;

use egui::{pos2, Color32, CornerRadius, Pos2, Rect};

use crate::range_seek::{Canvas, MeasureSpec, RangeSeekBar, ThumbImage, TouchEvent};
use crate::ui::thumbs::ThumbTextures;

/// [`Canvas`] that paints into an egui painter, offset to the widget rect.
pub struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    thumbs: &'a ThumbTextures,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2, thumbs: &'a ThumbTextures) -> Self {
        Self {
            painter,
            origin,
            thumbs,
        }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn draw_rect(&mut self, rect: Rect, color: Color32) {
        self.painter
            .rect_filled(rect.translate(self.origin.to_vec2()), CornerRadius::ZERO, color);
    }

    fn draw_image(&mut self, image: ThumbImage, top_left: Pos2) {
        let rect = Rect::from_min_size(self.origin + top_left.to_vec2(), self.thumbs.size());
        self.painter.image(
            self.thumbs.texture(image).id(),
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

/// Pointer gesture on the widget, kept in egui memory between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Gesture {
    active: bool,
    last_x: f32,
}

/// Pointer state for one frame, with x relative to the widget's left edge.
#[derive(Debug, Clone, Copy, Default)]
struct PointerFrame {
    down_on: bool,
    released: bool,
    clicked: bool,
    x: Option<f32>,
    press_x: Option<f32>,
}

fn translate_pointer(gesture: Gesture, frame: PointerFrame) -> (Vec<TouchEvent>, Gesture) {
    let x = frame.x.unwrap_or(gesture.last_x);
    let mut events = Vec::new();
    let mut next = Gesture {
        active: gesture.active,
        last_x: x,
    };

    if !gesture.active {
        if frame.down_on {
            let press_x = frame.press_x.unwrap_or(x);
            events.push(TouchEvent::down(press_x));
            if press_x != x {
                events.push(TouchEvent::moved(x));
            }
            next.active = true;
        } else if frame.clicked {
            // Press and release landed in the same frame
            events.push(TouchEvent::down(frame.press_x.unwrap_or(x)));
            events.push(TouchEvent::up(x));
        }
    } else if frame.down_on {
        if x != gesture.last_x {
            events.push(TouchEvent::moved(x));
        }
    } else {
        events.push(if frame.released {
            TouchEvent::up(x)
        } else {
            TouchEvent::cancel(x)
        });
        next.active = false;
    }

    (events, next)
}

/// Lays out, drives and paints a range seek bar inside `ui`.
///
/// The response is marked changed whenever the selection moved this frame.
pub fn range_seek_ui<T: Any + Clone>(
    ui: &mut egui::Ui,
    bar: &mut RangeSeekBar<T>,
    thumbs: &ThumbTextures,
) -> egui::Response {
    let available = ui.available_size();
    let desired = bar.on_measure(
        MeasureSpec::from_available(available.x),
        MeasureSpec::from_available(available.y),
    );
    let (rect, mut response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());
    bar.layout(rect.size());

    let relative_x = |pos: Pos2| pos.x - rect.left();
    let frame = PointerFrame {
        down_on: response.is_pointer_button_down_on(),
        released: ui.input(|i| i.pointer.any_released()),
        clicked: response.clicked(),
        x: response.interact_pointer_pos().map(relative_x),
        press_x: ui.input(|i| i.pointer.press_origin()).map(relative_x),
    };

    let gesture = ui.data(|d| d.get_temp::<Gesture>(response.id)).unwrap_or_default();
    let (events, next) = translate_pointer(gesture, frame);
    ui.data_mut(|d| d.insert_temp(response.id, next));

    let before = (bar.normalized_min(), bar.normalized_max());
    for event in &events {
        bar.on_touch(event);
    }
    if (bar.normalized_min(), bar.normalized_max()) != before {
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let mut canvas = PainterCanvas::new(ui.painter(), rect.min, thumbs);
        bar.on_draw(&mut canvas);
    }

    if bar.take_redraw_request() {
        ui.ctx().request_repaint();
    }

    response
}

/// Widget form of [`range_seek_ui`]:
/// ``` ignore
/// ui.add(range_seek(&mut bar, &thumbs));
/// ```
pub fn range_seek<'a, T: Any + Clone>(
    bar: &'a mut RangeSeekBar<T>,
    thumbs: &'a ThumbTextures,
) -> impl egui::Widget + 'a {
    move |ui: &mut egui::Ui| range_seek_ui(ui, bar, thumbs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_seek::TouchPhase;

    fn phases(events: &[TouchEvent]) -> Vec<(TouchPhase, f32)> {
        events.iter().map(|e| (e.phase, e.x)).collect()
    }

    #[test]
    fn test_press_drag_release() {
        let idle = Gesture::default();
        let (events, gesture) = translate_pointer(
            idle,
            PointerFrame {
                down_on: true,
                x: Some(12.0),
                press_x: Some(12.0),
                ..Default::default()
            },
        );
        assert_eq!(phases(&events), vec![(TouchPhase::Down, 12.0)]);
        assert!(gesture.active);

        let (events, gesture) = translate_pointer(
            gesture,
            PointerFrame {
                down_on: true,
                x: Some(40.0),
                ..Default::default()
            },
        );
        assert_eq!(phases(&events), vec![(TouchPhase::Move, 40.0)]);

        // No movement, no event
        let (events, gesture) = translate_pointer(
            gesture,
            PointerFrame {
                down_on: true,
                x: Some(40.0),
                ..Default::default()
            },
        );
        assert!(events.is_empty());

        let (events, gesture) = translate_pointer(
            gesture,
            PointerFrame {
                released: true,
                ..Default::default()
            },
        );
        assert_eq!(phases(&events), vec![(TouchPhase::Up, 40.0)]);
        assert!(!gesture.active);
    }

    #[test]
    fn test_drag_from_press_origin() {
        let (events, _) = translate_pointer(
            Gesture::default(),
            PointerFrame {
                down_on: true,
                x: Some(30.0),
                press_x: Some(10.0),
                ..Default::default()
            },
        );
        assert_eq!(
            phases(&events),
            vec![(TouchPhase::Down, 10.0), (TouchPhase::Move, 30.0)]
        );
    }

    #[test]
    fn test_lost_pointer_cancels() {
        let active = Gesture {
            active: true,
            last_x: 55.0,
        };
        let (events, gesture) = translate_pointer(active, PointerFrame::default());
        assert_eq!(phases(&events), vec![(TouchPhase::Cancel, 55.0)]);
        assert!(!gesture.active);
    }

    #[test]
    fn test_single_frame_click() {
        let (events, gesture) = translate_pointer(
            Gesture::default(),
            PointerFrame {
                released: true,
                clicked: true,
                x: Some(90.0),
                press_x: Some(90.0),
                ..Default::default()
            },
        );
        assert_eq!(
            phases(&events),
            vec![(TouchPhase::Down, 90.0), (TouchPhase::Up, 90.0)]
        );
        assert!(!gesture.active);
    }

    #[test]
    fn test_idle_pointer_is_ignored() {
        let (events, gesture) = translate_pointer(
            Gesture::default(),
            PointerFrame {
                released: true,
                x: Some(90.0),
                ..Default::default()
            },
        );
        assert!(events.is_empty());
        assert!(!gesture.active);
    }

    #[test]
    fn test_widget_lays_out_in_headless_frame() {
        let ctx = egui::Context::default();
        let thumbs = ThumbTextures::new(&ctx, 20.0);
        let mut bar = RangeSeekBar::new(0i32, 100i32, thumbs.metrics()).unwrap();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.set_width(240.0);
                let response = ui.add(range_seek(&mut bar, &thumbs));
                assert!(!response.changed());
            });
        });

        assert_eq!(bar.size().y, 20.0);
        assert!(bar.size().x > 0.0);
        assert_eq!(bar.selected_min_value(), 0);
        assert_eq!(bar.selected_max_value(), 100);
    }
}
