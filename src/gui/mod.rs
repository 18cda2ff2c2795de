mod aspect_ratio_dialog;
mod grid_options_dialog;

pub use aspect_ratio_dialog::{AspectInputMode, AspectRatioForm, FieldError};
pub use grid_options_dialog::GridOptionsForm;

use crate::grid::model::GridColor;
use crate::grid::settings::GridConfig;
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome<T> {
    Accepted(T),
    Cancelled,
}

/// Values edited by the grid options dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptionsValues {
    pub segments: u32,
    pub line_thickness: u32,
    pub line_color: GridColor,
    pub golden_lines_color: GridColor,
    pub toolbar_color: GridColor,
    pub frame_color: GridColor,
    pub frame_thickness: u32,
}

impl GridOptionsValues {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            segments: config.segments,
            line_thickness: config.line_thickness,
            line_color: config.line_color,
            golden_lines_color: config.golden_lines_color,
            toolbar_color: config.toolbar_color,
            frame_color: config.frame_color,
            frame_thickness: config.frame_thickness,
        }
    }

    /// Writes the values into `config`, clamped and sentinel-safe.
    pub fn apply_to(&self, config: &mut GridConfig) {
        config.segments = self.segments;
        config.line_thickness = self.line_thickness;
        config.line_color = self.line_color;
        config.golden_lines_color = self.golden_lines_color;
        config.toolbar_color = self.toolbar_color;
        config.frame_color = self.frame_color;
        config.frame_thickness = self.frame_thickness;
        config.clamp_ranges();
        config.sanitize_for_sentinel();
    }
}

/// Modal option forms. Each call blocks until the user accepts or cancels.
pub trait OptionsDialogs {
    fn grid_options(&mut self, current: &GridOptionsValues) -> DialogOutcome<GridOptionsValues>;
    fn aspect_ratio(&mut self, current_ratio: f64) -> DialogOutcome<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Accept,
    Cancel,
}

/// A form that can be shown in its own modal viewport.
pub trait DialogForm {
    type Output;

    fn title(&self) -> &'static str;
    fn inner_size(&self) -> [f32; 2];
    fn show(&mut self, ui: &mut egui::Ui) -> FormAction;
    /// `None` while the form is invalid.
    fn output(&self) -> Option<Self::Output>;
}

/// Runs each dialog in a native egui window through eframe.
#[derive(Debug, Clone, Copy, Default)]
pub struct EframeDialogs;

impl OptionsDialogs for EframeDialogs {
    fn grid_options(&mut self, current: &GridOptionsValues) -> DialogOutcome<GridOptionsValues> {
        run_modal(GridOptionsForm::new(current.clone()))
    }

    fn aspect_ratio(&mut self, current_ratio: f64) -> DialogOutcome<f64> {
        run_modal(AspectRatioForm::new(current_ratio))
    }
}

struct DialogApp<F: DialogForm> {
    form: F,
    result: Rc<RefCell<Option<DialogOutcome<F::Output>>>>,
}

impl<F: DialogForm> eframe::App for DialogApp<F> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = FormAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = self.form.show(ui);
        });

        match action {
            FormAction::Accept => {
                if let Some(value) = self.form.output() {
                    *self.result.borrow_mut() = Some(DialogOutcome::Accepted(value));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
            FormAction::Cancel => {
                *self.result.borrow_mut() = Some(DialogOutcome::Cancelled);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            FormAction::None => {}
        }
    }
}

pub fn run_modal<F>(form: F) -> DialogOutcome<F::Output>
where
    F: DialogForm + 'static,
    F::Output: 'static,
{
    let title = form.title();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(form.inner_size())
            .with_resizable(false)
            .with_always_on_top(),
        ..Default::default()
    };

    let result = Rc::new(RefCell::new(None));
    let app_result = Rc::clone(&result);
    if let Err(err) = eframe::run_native(
        title,
        native_options,
        Box::new(move |_cc| {
            Box::new(DialogApp {
                form,
                result: app_result,
            })
        }),
    ) {
        tracing::error!(error = %err, dialog = title, "failed to show dialog");
    }

    let outcome = result.borrow_mut().take();
    outcome.unwrap_or(DialogOutcome::Cancelled)
}

/// Accepts both `.` and `,` as the decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn edit_color(ui: &mut egui::Ui, label: &str, color: &mut GridColor) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        let mut rgb = color.to_rgb_array();
        changed = ui.color_edit_button_srgb(&mut rgb).changed();
        if changed {
            *color = GridColor::from_rgb_array(rgb);
        }
    });
    changed
}
