use crate::grid::settings::{AspectRatioState, MAX_RATIO, MIN_RATIO};
use crate::gui::{parse_decimal, DialogForm, FormAction};
use eframe::egui;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectInputMode {
    Ratio,
    PaperSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Empty,
    Invalid,
    NotPositive,
    OutOfRange,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Empty => f.write_str("Field cannot be empty"),
            FieldError::Invalid => f.write_str("Invalid number"),
            FieldError::NotPositive => f.write_str("Value must be greater than zero"),
            FieldError::OutOfRange => {
                write!(f, "Ratio must be between {MIN_RATIO} and {MAX_RATIO}")
            }
        }
    }
}

fn parse_positive(text: &str) -> Result<f64, FieldError> {
    if text.trim().is_empty() {
        return Err(FieldError::Empty);
    }
    let value = parse_decimal(text).ok_or(FieldError::Invalid)?;
    if value <= 0.0 {
        return Err(FieldError::NotPositive);
    }
    Ok(value)
}

/// Aspect ratio entered directly or as a paper size.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRatioForm {
    mode: AspectInputMode,
    ratio_text: String,
    width_text: String,
    height_text: String,
}

impl AspectRatioForm {
    pub fn new(current_ratio: f64) -> Self {
        Self {
            mode: AspectInputMode::Ratio,
            ratio_text: format!("{current_ratio:.4}"),
            width_text: String::new(),
            height_text: String::new(),
        }
    }

    pub fn mode(&self) -> AspectInputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AspectInputMode) {
        self.mode = mode;
    }

    pub fn ratio_text(&self) -> &str {
        &self.ratio_text
    }

    pub fn set_ratio_text(&mut self, text: &str) {
        self.ratio_text = text.to_string();
    }

    /// Typing a paper dimension switches to paper mode.
    pub fn set_width_text(&mut self, text: &str) {
        self.width_text = text.to_string();
        self.mode = AspectInputMode::PaperSize;
    }

    pub fn set_height_text(&mut self, text: &str) {
        self.height_text = text.to_string();
        self.mode = AspectInputMode::PaperSize;
    }

    pub fn ratio_error(&self) -> Option<FieldError> {
        parse_positive(&self.ratio_text).err()
    }

    pub fn width_error(&self) -> Option<FieldError> {
        parse_positive(&self.width_text).err()
    }

    pub fn height_error(&self) -> Option<FieldError> {
        parse_positive(&self.height_text).err()
    }

    /// The ratio of the active mode, or the first field error.
    pub fn validate(&self) -> Result<f64, FieldError> {
        let ratio = match self.mode {
            AspectInputMode::Ratio => parse_positive(&self.ratio_text)?,
            AspectInputMode::PaperSize => {
                let width = parse_positive(&self.width_text)?;
                let height = parse_positive(&self.height_text)?;
                width / height
            }
        };
        if !AspectRatioState::is_ratio_in_range(ratio) {
            return Err(FieldError::OutOfRange);
        }
        Ok(ratio)
    }
}

impl DialogForm for AspectRatioForm {
    type Output = f64;

    fn title(&self) -> &'static str {
        "Aspect ratio"
    }

    fn inner_size(&self) -> [f32; 2] {
        [320.0, 220.0]
    }

    fn show(&mut self, ui: &mut egui::Ui) -> FormAction {
        ui.radio_value(
            &mut self.mode,
            AspectInputMode::Ratio,
            "Aspect ratio (width / height)",
        );
        ui.horizontal(|ui| {
            ui.add_space(20.0);
            ui.add_enabled(
                self.mode == AspectInputMode::Ratio,
                egui::TextEdit::singleline(&mut self.ratio_text).desired_width(90.0),
            );
        });
        if self.mode == AspectInputMode::Ratio {
            if let Some(err) = self.ratio_error() {
                ui.colored_label(egui::Color32::RED, err.to_string());
            }
        }

        ui.radio_value(&mut self.mode, AspectInputMode::PaperSize, "Paper size");
        let mut typed = false;
        ui.horizontal(|ui| {
            ui.add_space(20.0);
            ui.label("Width");
            typed |= ui
                .add(egui::TextEdit::singleline(&mut self.width_text).desired_width(60.0))
                .changed();
            ui.label("Height");
            typed |= ui
                .add(egui::TextEdit::singleline(&mut self.height_text).desired_width(60.0))
                .changed();
        });
        if typed {
            self.mode = AspectInputMode::PaperSize;
        }
        if self.mode == AspectInputMode::PaperSize {
            if let Some(err) = self.width_error() {
                ui.colored_label(egui::Color32::RED, format!("Width: {err}"));
            }
            if let Some(err) = self.height_error() {
                ui.colored_label(egui::Color32::RED, format!("Height: {err}"));
            }
        }

        if let Err(err @ FieldError::OutOfRange) = self.validate() {
            ui.colored_label(egui::Color32::RED, err.to_string());
        }

        ui.separator();
        let mut action = FormAction::None;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.validate().is_ok(), egui::Button::new("Accept"))
                .clicked()
            {
                action = FormAction::Accept;
            }
            if ui.button("Cancel").clicked() {
                action = FormAction::Cancel;
            }
        });
        action
    }

    fn output(&self) -> Option<f64> {
        self.validate().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_ratio_is_shown_with_four_decimals() {
        let form = AspectRatioForm::new(1.5);
        assert_eq!(form.ratio_text(), "1.5000");
        assert_eq!(form.validate(), Ok(1.5));
    }

    #[test]
    fn typing_paper_size_switches_mode() {
        let mut form = AspectRatioForm::new(1.0);
        form.set_width_text("297");
        assert_eq!(form.mode(), AspectInputMode::PaperSize);
        assert_eq!(form.validate(), Err(FieldError::Empty));
        form.set_height_text("210");
        let ratio = form.validate().expect("paper ratio");
        assert!((ratio - 297.0 / 210.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_input_is_rejected_with_messages() {
        let mut form = AspectRatioForm::new(1.0);
        form.set_ratio_text("");
        assert_eq!(form.validate(), Err(FieldError::Empty));
        assert_eq!(FieldError::Empty.to_string(), "Field cannot be empty");
        form.set_ratio_text("abc");
        assert_eq!(form.validate(), Err(FieldError::Invalid));
        assert_eq!(FieldError::Invalid.to_string(), "Invalid number");
        form.set_ratio_text("-2");
        assert_eq!(form.validate(), Err(FieldError::NotPositive));
        assert_eq!(form.output(), None);
    }

    #[test]
    fn extreme_ratios_are_rejected() {
        let mut form = AspectRatioForm::new(1.0);
        form.set_ratio_text("0.000000000001");
        assert_eq!(form.validate(), Err(FieldError::OutOfRange));
        assert_eq!(form.output(), None);
        assert_eq!(
            FieldError::OutOfRange.to_string(),
            "Ratio must be between 0.01 and 100"
        );

        form.set_width_text("1");
        form.set_height_text("1000000000");
        assert_eq!(form.validate(), Err(FieldError::OutOfRange));

        form.set_height_text("100");
        assert_eq!(form.validate(), Ok(0.01));
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        let mut form = AspectRatioForm::new(1.0);
        form.set_ratio_text("1,25");
        assert_eq!(form.validate(), Ok(1.25));
    }
}
