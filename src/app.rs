use anyhow::Context as _;
use bigdecimal::BigDecimal;
use eframe::egui::{self, RichText, Vec2};

use range_seek::settings::{AccentColor, BarColor};
use range_seek::ui::common::TEXT_SECONDARY;
use range_seek::ui::{DialogOutcome, RangeSeekPreference, ThumbTextures};
use range_seek::Settings;

/// The range preferences shown by the demo
struct Preferences {
    price: RangeSeekPreference<i32>,
    zoom: RangeSeekPreference<f64>,
    tolerance: RangeSeekPreference<BigDecimal>,
}

impl Preferences {
    fn new(settings: &Settings, thumbs: &ThumbTextures) -> anyhow::Result<Self> {
        let metrics = thumbs.metrics();
        Ok(Self {
            price: RangeSeekPreference::new("price", "Price", 0, 100, metrics, settings)
                .context("creating price preference")?,
            zoom: RangeSeekPreference::new("zoom", "Zoom", 0.1, 20.0, metrics, settings)
                .context("creating zoom preference")?,
            tolerance: RangeSeekPreference::new(
                "tolerance",
                "Tolerance",
                BigDecimal::from(0),
                BigDecimal::from(1),
                metrics,
                settings,
            )
            .context("creating tolerance preference")?,
        })
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.price.apply_settings(settings);
        self.zoom.apply_settings(settings);
        self.tolerance.apply_settings(settings);
    }
}

pub struct RangeSeekDemoApp {
    settings: Settings,
    thumbs: ThumbTextures,
    preferences: Preferences,
    last_change: Option<String>,
    error_message: Option<String>,
}

impl RangeSeekDemoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> anyhow::Result<Self> {
        let thumbs = ThumbTextures::new(&cc.egui_ctx, settings.thumb_diameter);
        let preferences = Preferences::new(&settings, &thumbs)?;

        Ok(Self {
            settings,
            thumbs,
            preferences,
            last_change: None,
            error_message: None,
        })
    }

    fn rebuild_thumbs(&mut self, ctx: &egui::Context) {
        self.thumbs = ThumbTextures::new(ctx, self.settings.thumb_diameter);
        match Preferences::new(&self.settings, &self.thumbs) {
            Ok(preferences) => self.preferences = preferences,
            Err(e) => {
                log::error!("Failed to rebuild preferences: {:#}", e);
                self.error_message = Some(format!("{:#}", e));
            }
        }
    }

    fn collect_changes(&mut self) {
        if let Some(change) = describe_change(&mut self.preferences.price) {
            self.last_change = Some(change);
        }
        if let Some(change) = describe_change(&mut self.preferences.zoom) {
            self.last_change = Some(change);
        }
        if let Some(change) = describe_change(&mut self.preferences.tolerance) {
            self.last_change = Some(change);
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let outcomes = [
            self.preferences.price.show(ctx, &self.thumbs, &mut self.settings),
            self.preferences.zoom.show(ctx, &self.thumbs, &mut self.settings),
            self.preferences.tolerance.show(ctx, &self.thumbs, &mut self.settings),
        ];
        if outcomes.contains(&Some(DialogOutcome::Confirmed)) {
            self.settings.save();
        }
    }

    fn render_preferences(&mut self, ui: &mut egui::Ui) {
        ui.heading("Ranges");
        ui.add_space(4.0);

        let dialog_open = self.preferences.price.is_open()
            || self.preferences.zoom.is_open()
            || self.preferences.tolerance.is_open();

        ui.add_enabled_ui(!dialog_open, |ui| {
            preference_row(ui, &mut self.preferences.price);
            preference_row(ui, &mut self.preferences.zoom);
            preference_row(ui, &mut self.preferences.tolerance);
        });

        if let Some(change) = &self.last_change {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Last reported: {}", change))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
            );
        }
    }

    fn render_appearance(&mut self, ui: &mut egui::Ui) {
        ui.heading("Appearance");
        ui.add_space(4.0);

        let before_colors = (self.settings.bar_color, self.settings.active_color);
        let before_notify = self.settings.notify_while_dragging;

        ui.horizontal(|ui| {
            ui.label("Bar:");
            egui::ComboBox::from_id_salt("bar_color")
                .selected_text(format!("{:?}", self.settings.bar_color))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.settings.bar_color, BarColor::Gray, "Gray");
                    ui.selectable_value(&mut self.settings.bar_color, BarColor::Dark, "Dark");
                    ui.selectable_value(&mut self.settings.bar_color, BarColor::Light, "Light");
                });
        });

        ui.horizontal(|ui| {
            ui.label("Selection:");
            egui::ComboBox::from_id_salt("active_color")
                .selected_text(format!("{:?}", self.settings.active_color))
                .show_ui(ui, |ui| {
                    for (color, name) in [
                        (AccentColor::Orange, "Orange"),
                        (AccentColor::Blue, "Blue"),
                        (AccentColor::Purple, "Purple"),
                        (AccentColor::Green, "Green"),
                        (AccentColor::Red, "Red"),
                        (AccentColor::Cyan, "Cyan"),
                    ] {
                        ui.selectable_value(&mut self.settings.active_color, color, name);
                    }
                });
        });

        let diameter = ui.horizontal(|ui| {
            ui.label("Thumb size:");
            ui.add(egui::Slider::new(&mut self.settings.thumb_diameter, 16.0..=48.0).suffix("pt"))
        });

        ui.checkbox(
            &mut self.settings.notify_while_dragging,
            "Report values while dragging",
        );
        ui.checkbox(&mut self.settings.debug_logging, "Debug logging (applies on restart)");

        if diameter.inner.drag_stopped() || (diameter.inner.changed() && !diameter.inner.dragged())
        {
            self.rebuild_thumbs(ui.ctx());
        } else if before_colors != (self.settings.bar_color, self.settings.active_color)
            || before_notify != self.settings.notify_while_dragging
        {
            self.preferences.apply_settings(&self.settings);
        }

        ui.add_space(8.0);
        if ui
            .add_sized(Vec2::new(120.0, 28.0), egui::Button::new("↺ Reset Defaults"))
            .clicked()
        {
            self.settings = Settings::default();
            self.rebuild_thumbs(ui.ctx());
        }
    }
}

fn describe_change<T>(preference: &mut RangeSeekPreference<T>) -> Option<String>
where
    T: std::any::Any + Clone + std::fmt::Display + serde::Serialize + serde::de::DeserializeOwned,
{
    let (min, max) = preference.take_pending_change()?;
    Some(format!(
        "{}: {} to {}",
        preference.title(),
        preference.format_value(&min),
        preference.format_value(&max)
    ))
}

fn preference_row<T>(ui: &mut egui::Ui, preference: &mut RangeSeekPreference<T>)
where
    T: std::any::Any + Clone + std::fmt::Display + serde::Serialize + serde::de::DeserializeOwned,
{
    ui.horizontal(|ui| {
        ui.label(RichText::new(preference.title()).strong());
        ui.label(RichText::new(preference.summary()).color(TEXT_SECONDARY).monospace());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Edit…").clicked() {
                preference.open();
            }
        });
    });
}

impl eframe::App for RangeSeekDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_dialogs(ctx);
        self.collect_changes();

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = &self.error_message {
                ui.colored_label(egui::Color32::YELLOW, message);
                ui.separator();
            }
            self.render_preferences(ui);
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(12.0);
            self.render_appearance(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.save();
    }
}
