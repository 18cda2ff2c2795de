use crate::grid::settings::{
    MAX_FRAME_THICKNESS, MAX_LINE_THICKNESS, MAX_SEGMENTS, MIN_FRAME_THICKNESS,
    MIN_LINE_THICKNESS, MIN_SEGMENTS,
};
use crate::gui::{edit_color, DialogForm, FormAction, GridOptionsValues};
use eframe::egui;

pub struct GridOptionsForm {
    values: GridOptionsValues,
}

impl GridOptionsForm {
    pub fn new(values: GridOptionsValues) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &GridOptionsValues {
        &self.values
    }
}

impl DialogForm for GridOptionsForm {
    type Output = GridOptionsValues;

    fn title(&self) -> &'static str {
        "Grid options"
    }

    fn inner_size(&self) -> [f32; 2] {
        [300.0, 280.0]
    }

    fn show(&mut self, ui: &mut egui::Ui) -> FormAction {
        let values = &mut self.values;
        egui::Grid::new("grid_options_form")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Segments");
                ui.add(
                    egui::DragValue::new(&mut values.segments)
                        .clamp_range(MIN_SEGMENTS..=MAX_SEGMENTS),
                );
                ui.end_row();

                ui.label("Line thickness");
                ui.add(
                    egui::DragValue::new(&mut values.line_thickness)
                        .clamp_range(MIN_LINE_THICKNESS..=MAX_LINE_THICKNESS),
                );
                ui.end_row();

                ui.label("Frame thickness");
                ui.add(
                    egui::DragValue::new(&mut values.frame_thickness)
                        .clamp_range(MIN_FRAME_THICKNESS..=MAX_FRAME_THICKNESS),
                );
                ui.end_row();
            });

        ui.separator();
        edit_color(ui, "Grid lines", &mut values.line_color);
        edit_color(ui, "Golden lines", &mut values.golden_lines_color);
        edit_color(ui, "Toolbar", &mut values.toolbar_color);
        edit_color(ui, "Frame", &mut values.frame_color);
        if [
            values.line_color,
            values.golden_lines_color,
            values.toolbar_color,
            values.frame_color,
        ]
        .iter()
        .any(|color| color.collides_with_sentinel())
        {
            ui.label("Pure black is drawn as near-black.");
        }

        ui.separator();
        let mut action = FormAction::None;
        ui.horizontal(|ui| {
            if ui.button("Accept").clicked() {
                action = FormAction::Accept;
            }
            if ui.button("Cancel").clicked() {
                action = FormAction::Cancel;
            }
        });
        action
    }

    fn output(&self) -> Option<GridOptionsValues> {
        let mut values = self.values.clone();
        values.segments = values.segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);
        values.line_thickness = values
            .line_thickness
            .clamp(MIN_LINE_THICKNESS, MAX_LINE_THICKNESS);
        values.frame_thickness = values
            .frame_thickness
            .clamp(MIN_FRAME_THICKNESS, MAX_FRAME_THICKNESS);
        for color in [
            &mut values.line_color,
            &mut values.golden_lines_color,
            &mut values.toolbar_color,
            &mut values.frame_color,
        ] {
            *color = color.resolve_sentinel_collision();
        }
        Some(values)
    }
}
