use std::any::Any;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use egui::{RichText, Vec2};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;
use crate::range_seek::{RangeSeekBar, ThumbMetrics};
use crate::settings::Settings;
use crate::ui::common::{info_row, TEXT_SECONDARY};
use crate::ui::range_seek_widget::range_seek_ui;
use crate::ui::thumbs::ThumbTextures;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Cancelled,
}

/// A preference backed by a range seek bar, edited in a modal-style dialog.
///
/// The selection is restored from [`Settings`] on construction and written
/// back only when the dialog is confirmed.
pub struct RangeSeekPreference<T> {
    key: String,
    title: String,
    bar: RangeSeekBar<T>,
    pending: Rc<RefCell<Option<(T, T)>>>,
    committed: (T, T),
    open: bool,
}

impl<T> RangeSeekPreference<T>
where
    T: Any + Clone + Display + Serialize + DeserializeOwned,
{
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        min_value: T,
        max_value: T,
        thumb: ThumbMetrics,
        settings: &Settings,
    ) -> Result<Self> {
        let key = key.into();
        let mut bar = RangeSeekBar::new(min_value, max_value, thumb)?;
        bar.set_colors(settings.bar_colors());
        bar.set_notify_while_dragging(settings.notify_while_dragging);

        if let Some((min, max)) = settings.stored_range::<T>(&key) {
            bar.set_selected_min_value(min);
            bar.set_selected_max_value(max);
        }

        let pending = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&pending);
        bar.set_on_range_changed(move |min, max| {
            *sink.borrow_mut() = Some((min, max));
        });

        let committed = (bar.selected_min_value(), bar.selected_max_value());
        tracing::debug!(key = %key, min = %committed.0, max = %committed.1, "preference created");

        Ok(Self {
            key,
            title: title.into(),
            bar,
            pending,
            committed,
            open: false,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The last confirmed selection
    pub fn value(&self) -> &(T, T) {
        &self.committed
    }

    pub fn summary(&self) -> String {
        format!(
            "{} to {}",
            self.format_value(&self.committed.0),
            self.format_value(&self.committed.1)
        )
    }

    /// Integral kinds print as-is, fractional kinds with two decimals.
    pub fn format_value(&self, value: &T) -> String {
        let kind = self.bar.number_kind();
        if kind.is_integral() {
            return value.to_string();
        }
        match kind.to_f64(value) {
            Some(value) => format!("{:.2}", value),
            None => value.to_string(),
        }
    }

    pub fn bar(&self) -> &RangeSeekBar<T> {
        &self.bar
    }

    pub fn bar_mut(&mut self) -> &mut RangeSeekBar<T> {
        &mut self.bar
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.pending.borrow_mut().take();
    }

    /// The most recent values reported by the bar, if any arrived since the last call.
    pub fn take_pending_change(&mut self) -> Option<(T, T)> {
        self.pending.borrow_mut().take()
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.bar.set_colors(settings.bar_colors());
        self.bar.set_notify_while_dragging(settings.notify_while_dragging);
    }

    /// Commits the current selection and writes it into `settings`.
    pub fn confirm(&mut self, settings: &mut Settings) -> Result<()> {
        let min = self.bar.selected_min_value();
        let max = self.bar.selected_max_value();
        settings.store_range(&self.key, &min, &max)?;
        tracing::debug!(key = %self.key, %min, %max, "preference confirmed");
        self.committed = (min, max);
        self.open = false;
        Ok(())
    }

    /// Forgets the stored selection and goes back to the full range.
    pub fn reset(&mut self, settings: &mut Settings) {
        if settings.remove_range(&self.key) {
            tracing::debug!(key = %self.key, "stored range removed");
        }
        self.bar.set_normalized_min(0.0);
        self.bar.set_normalized_max(1.0);
        self.committed = (self.bar.selected_min_value(), self.bar.selected_max_value());
        self.pending.borrow_mut().take();
        self.open = false;
    }

    /// Drops unconfirmed edits and closes the dialog.
    pub fn cancel(&mut self) {
        // Widen first so neither setter is capped by the other thumb
        self.bar.set_normalized_min(0.0);
        self.bar.set_normalized_max(1.0);
        self.bar.set_selected_min_value(self.committed.0.clone());
        self.bar.set_selected_max_value(self.committed.1.clone());
        self.pending.borrow_mut().take();
        self.open = false;
    }

    /// Shows the dialog if it is open. Returns how it was closed, if it was.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        thumbs: &ThumbTextures,
        settings: &mut Settings,
    ) -> Option<DialogOutcome> {
        if !self.open {
            return None;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.cancel();
            return Some(DialogOutcome::Cancelled);
        }

        let mut outcome = None;
        let mut reset = false;
        let min = self.format_value(&self.bar.selected_min_value());
        let max = self.format_value(&self.bar.selected_max_value());

        egui::Window::new(self.title.clone())
            .id(egui::Id::new(("range_seek_preference", self.key.as_str())))
            .collapsible(false)
            .resizable(true)
            .default_width(360.0)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                info_row(ui, "Minimum", &min);
                info_row(ui, "Maximum", &max);

                ui.add_space(8.0);
                range_seek_ui(ui, &mut self.bar, thumbs);
                ui.add_space(4.0);

                ui.label(
                    RichText::new(format!(
                        "Range: {} to {}",
                        self.bar.absolute_min_value(),
                        self.bar.absolute_max_value()
                    ))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
                );

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_sized(Vec2::new(80.0, 28.0), egui::Button::new("✓ OK"))
                        .clicked()
                    {
                        outcome = Some(DialogOutcome::Confirmed);
                    }
                    ui.add_space(8.0);
                    if ui
                        .add_sized(Vec2::new(80.0, 28.0), egui::Button::new("✕ Cancel"))
                        .clicked()
                    {
                        outcome = Some(DialogOutcome::Cancelled);
                    }
                    ui.add_space(8.0);
                    if ui
                        .add_sized(Vec2::new(80.0, 28.0), egui::Button::new("↺ Reset"))
                        .clicked()
                    {
                        reset = true;
                    }
                });
            });

        if reset {
            self.reset(settings);
            return Some(DialogOutcome::Confirmed);
        }

        match outcome {
            Some(DialogOutcome::Confirmed) => {
                if let Err(e) = self.confirm(settings) {
                    e.log();
                    return None;
                }
            }
            Some(DialogOutcome::Cancelled) => self.cancel(),
            None => {}
        }
        outcome
    }
}
