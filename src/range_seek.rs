//! Toolkit-independent core of the dual-thumb range seek bar.
//!
//! The bar keeps its selection as a pair of normalized values in `[0, 1]` and
//! only converts to the caller's numeric type at the boundary. Hosts feed it
//! touch events, measurement constraints and a [`Canvas`] to draw on, and
//! collect redraw requests through [`RangeSeekBar::take_redraw_request`].

use std::any::Any;

use egui::{pos2, Color32, Pos2, Rect, Vec2};

use crate::errors::{RangeSeekError, Result};
use crate::numeric::NumberKind;

/// Width used when the host leaves the horizontal size unconstrained
pub const DEFAULT_WIDTH: f32 = 200.0;

/// Height of the bar lines relative to half the thumb height
const LINE_HEIGHT_RATIO: f32 = 0.3;

pub const DEFAULT_BAR_COLOR: Color32 = Color32::from_rgb(136, 136, 136);
pub const DEFAULT_ACTIVE_COLOR: Color32 = Color32::from_rgb(255, 165, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single-pointer touch event. `x` is relative to the left edge of the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f32,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, x: f32) -> Self {
        Self { phase, x }
    }

    pub fn down(x: f32) -> Self {
        Self::new(TouchPhase::Down, x)
    }

    pub fn moved(x: f32) -> Self {
        Self::new(TouchPhase::Move, x)
    }

    pub fn up(x: f32) -> Self {
        Self::new(TouchPhase::Up, x)
    }

    pub fn cancel(x: f32) -> Self {
        Self::new(TouchPhase::Cancel, x)
    }
}

/// Layout constraint for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    Unspecified,
    Bounded(f32),
}

impl MeasureSpec {
    /// Treats infinite or NaN space as unconstrained
    pub fn from_available(available: f32) -> Self {
        if available.is_finite() {
            MeasureSpec::Bounded(available.max(0.0))
        } else {
            MeasureSpec::Unspecified
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbImage {
    Normal,
    Pressed,
}

/// Size of the thumb images supplied by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbMetrics {
    pub width: f32,
    pub height: f32,
}

impl ThumbMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        0.5 * self.width
    }

    pub fn half_height(&self) -> f32 {
        0.5 * self.height
    }

    pub fn line_height(&self) -> f32 {
        LINE_HEIGHT_RATIO * self.half_height()
    }
}

/// Drawing surface. Coordinates are relative to the bar's top-left corner.
pub trait Canvas {
    fn draw_rect(&mut self, rect: Rect, color: Color32);
    fn draw_image(&mut self, image: ThumbImage, top_left: Pos2);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarColors {
    pub background: Color32,
    pub active: Color32,
}

impl Default for BarColors {
    fn default() -> Self {
        Self {
            background: DEFAULT_BAR_COLOR,
            active: DEFAULT_ACTIVE_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Selection {
    normalized_min: f64,
    normalized_max: f64,
}

type RangeListener<T> = Box<dyn FnMut(T, T)>;

/// Dual-thumb range selector over one of the supported numeric kinds.
pub struct RangeSeekBar<T> {
    min_value: T,
    max_value: T,
    kind: NumberKind,
    abs_min: f64,
    abs_max: f64,
    selection: Selection,
    pressed_thumb: Option<Thumb>,
    redraw_requested: bool,
    notify_while_dragging: bool,
    listener: Option<RangeListener<T>>,
    thumb: ThumbMetrics,
    colors: BarColors,
    size: Vec2,
}

impl<T: Any + Clone> RangeSeekBar<T> {
    /// Creates a bar spanning `[min_value, max_value]` with the full range selected.
    pub fn new(min_value: T, max_value: T, thumb: ThumbMetrics) -> Result<Self> {
        let kind = NumberKind::of(&min_value)?;
        let abs_min = finite_bound(kind, &min_value)?;
        let abs_max = finite_bound(kind, &max_value)?;
        let span = abs_max - abs_min;
        if !span.is_finite() {
            return Err(RangeSeekError::NonFiniteValue { kind, value: span });
        }

        tracing::debug!(%kind, abs_min, abs_max, "range seek bar created");

        Ok(Self {
            min_value,
            max_value,
            kind,
            abs_min,
            abs_max,
            selection: Selection {
                normalized_min: 0.0,
                normalized_max: 1.0,
            },
            pressed_thumb: None,
            redraw_requested: true,
            notify_while_dragging: false,
            listener: None,
            thumb,
            colors: BarColors::default(),
            size: Vec2::new(DEFAULT_WIDTH, thumb.height),
        })
    }

    pub fn with_colors(mut self, colors: BarColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn set_colors(&mut self, colors: BarColors) {
        if self.colors != colors {
            self.colors = colors;
            self.invalidate();
        }
    }

    pub fn number_kind(&self) -> NumberKind {
        self.kind
    }

    pub fn absolute_min_value(&self) -> &T {
        &self.min_value
    }

    pub fn absolute_max_value(&self) -> &T {
        &self.max_value
    }

    pub fn is_notify_while_dragging(&self) -> bool {
        self.notify_while_dragging
    }

    /// Whether the listener hears about every move of a dragged thumb, or only
    /// about the final values when the gesture ends.
    pub fn set_notify_while_dragging(&mut self, flag: bool) {
        self.notify_while_dragging = flag;
    }

    /// Registers the single change listener, replacing any previous one.
    pub fn set_on_range_changed(&mut self, listener: impl FnMut(T, T) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_on_range_changed(&mut self) {
        self.listener = None;
    }

    pub fn selected_min_value(&self) -> T {
        self.normalized_to_value(self.selection.normalized_min)
    }

    pub fn selected_max_value(&self) -> T {
        self.normalized_to_value(self.selection.normalized_max)
    }

    /// Clamped to the absolute range and never above the selected max.
    pub fn set_selected_min_value(&mut self, value: T) {
        if self.is_degenerate() {
            self.set_normalized_min(0.0);
        } else {
            let normalized = self.normalize_value(&value);
            self.set_normalized_min(normalized);
        }
    }

    /// Clamped to the absolute range and never below the selected min.
    pub fn set_selected_max_value(&mut self, value: T) {
        if self.is_degenerate() {
            self.set_normalized_max(1.0);
        } else {
            let normalized = self.normalize_value(&value);
            self.set_normalized_max(normalized);
        }
    }

    fn normalized_to_value(&self, normalized: f64) -> T {
        self.kind
            .from_f64(self.abs_min + normalized * (self.abs_max - self.abs_min))
            .expect("numeric kind was resolved from T and bounds are finite")
    }

    fn normalize_value(&self, value: &T) -> f64 {
        let value = self.kind.to_f64(value).unwrap_or(self.abs_min);
        (value - self.abs_min) / (self.abs_max - self.abs_min)
    }

    fn notify_listener(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let min = self.selected_min_value();
        let max = self.selected_max_value();
        tracing::debug!(
            normalized_min = self.selection.normalized_min,
            normalized_max = self.selection.normalized_max,
            "range changed"
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(min, max);
        }
    }
}

impl<T> RangeSeekBar<T> {
    pub fn normalized_min(&self) -> f64 {
        self.selection.normalized_min
    }

    pub fn normalized_max(&self) -> f64 {
        self.selection.normalized_max
    }

    pub fn pressed_thumb(&self) -> Option<Thumb> {
        self.pressed_thumb
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed_thumb.is_some()
    }

    fn is_degenerate(&self) -> bool {
        self.abs_max - self.abs_min == 0.0
    }

    /// Keeps `0 <= normalized_min <= normalized_max`.
    pub fn set_normalized_min(&mut self, value: f64) {
        self.selection.normalized_min = value.min(self.selection.normalized_max).clamp(0.0, 1.0);
        self.invalidate();
    }

    /// Keeps `normalized_min <= normalized_max <= 1`.
    pub fn set_normalized_max(&mut self, value: f64) {
        self.selection.normalized_max = value.max(self.selection.normalized_min).clamp(0.0, 1.0);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn on_measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
        let width = match width {
            MeasureSpec::Unspecified => DEFAULT_WIDTH,
            MeasureSpec::Bounded(size) => size,
        };
        let height = match height {
            MeasureSpec::Unspecified => self.thumb.height,
            MeasureSpec::Bounded(size) => self.thumb.height.min(size),
        };
        Vec2::new(width, height)
    }

    /// Stores the size granted by the host after measurement.
    pub fn layout(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.invalidate();
        }
    }

    fn padding(&self) -> f64 {
        f64::from(self.thumb.half_width())
    }

    pub fn normalized_to_screen(&self, normalized: f64) -> f32 {
        let padding = self.padding();
        (padding + normalized * (f64::from(self.size.x) - 2.0 * padding)) as f32
    }

    /// Returns 0 when the bar is too narrow to hold both thumbs.
    pub fn screen_to_normalized(&self, screen_x: f32) -> f64 {
        let width = f64::from(self.size.x);
        let padding = self.padding();
        if width <= 2.0 * padding {
            0.0
        } else {
            ((f64::from(screen_x) - padding) / (width - 2.0 * padding)).clamp(0.0, 1.0)
        }
    }

    fn is_in_thumb_range(&self, touch_x: f32, normalized_thumb: f64) -> bool {
        (touch_x - self.normalized_to_screen(normalized_thumb)).abs() <= self.thumb.half_width()
    }

    fn eval_pressed_thumb(&self, touch_x: f32) -> Option<Thumb> {
        let min_pressed = self.is_in_thumb_range(touch_x, self.selection.normalized_min);
        let max_pressed = self.is_in_thumb_range(touch_x, self.selection.normalized_max);
        match (min_pressed, max_pressed) {
            // Overlapping thumbs: take the one with more room to move, so the
            // pair cannot get stuck together at either end.
            (true, true) if touch_x / self.size.x > 0.5 => Some(Thumb::Min),
            (true, true) => Some(Thumb::Max),
            (true, false) => Some(Thumb::Min),
            (false, true) => Some(Thumb::Max),
            (false, false) => None,
        }
    }

    pub fn on_draw(&self, canvas: &mut impl Canvas) {
        let height = self.size.y;
        let line_height = self.thumb.line_height();
        let padding = self.thumb.half_width();
        let top = 0.5 * (height - line_height);
        let bottom = 0.5 * (height + line_height);

        let background = Rect::from_min_max(pos2(padding, top), pos2(self.size.x - padding, bottom));
        canvas.draw_rect(background, self.colors.background);

        let active = Rect::from_min_max(
            pos2(self.normalized_to_screen(self.selection.normalized_min), top),
            pos2(self.normalized_to_screen(self.selection.normalized_max), bottom),
        );
        canvas.draw_rect(active, self.colors.active);

        self.draw_thumb(canvas, self.selection.normalized_min, self.pressed_thumb == Some(Thumb::Min));
        self.draw_thumb(canvas, self.selection.normalized_max, self.pressed_thumb == Some(Thumb::Max));
    }

    fn draw_thumb(&self, canvas: &mut impl Canvas, normalized: f64, pressed: bool) {
        let image = if pressed { ThumbImage::Pressed } else { ThumbImage::Normal };
        let top_left = pos2(
            self.normalized_to_screen(normalized) - self.thumb.half_width(),
            0.5 * self.size.y - self.thumb.half_height(),
        );
        canvas.draw_image(image, top_left);
    }
}

impl<T: Any + Clone> RangeSeekBar<T> {
    /// Drives the drag state machine. Always consumes the event.
    pub fn on_touch(&mut self, event: &TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Down => {
                self.pressed_thumb = self.eval_pressed_thumb(event.x);
                tracing::trace!(x = event.x, thumb = ?self.pressed_thumb, "touch down");
                self.invalidate();
            }
            TouchPhase::Move => {
                if let Some(thumb) = self.pressed_thumb {
                    let normalized = self.screen_to_normalized(event.x);
                    match thumb {
                        Thumb::Min => self.set_normalized_min(normalized),
                        Thumb::Max => self.set_normalized_max(normalized),
                    }
                    if self.notify_while_dragging {
                        self.notify_listener();
                    }
                }
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                tracing::trace!(x = event.x, phase = ?event.phase, "touch released");
                self.pressed_thumb = None;
                self.invalidate();
                self.notify_listener();
            }
        }
        true
    }
}

fn finite_bound<T: Any>(kind: NumberKind, value: &T) -> Result<f64> {
    let value = kind.to_f64(value).unwrap_or(f64::NAN);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RangeSeekError::NonFiniteValue { kind, value })
    }
}
