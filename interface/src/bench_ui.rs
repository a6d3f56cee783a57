use egui::{Button, ComboBox, Grid, Id, RichText, Ui};
use lab_engine::bench::{BenchAction, Control, Simulation};

use crate::{
    consts::{LAMP_SIZE, PULSE_SIZE, TOGGLE_SIZE},
    true_false_color,
    update_ops::LabOps,
    utils::bit_text,
};

/// Draws the bench's controls and output lamps and returns what the
/// learner did with them.
pub fn render(bench: &dyn Simulation, ui: &mut Ui) -> Vec<LabOps> {
    let mut ops = Vec::new();

    ui.label(RichText::new("Inputs").strong());
    Grid::new("bench_controls")
        .num_columns(2)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            for control in bench.controls() {
                if let Some(action) = control_row(&control, ui) {
                    ops.push(LabOps::Bench(action));
                }
                ui.end_row();
            }
        });

    ui.separator();
    ui.label(RichText::new("Outputs").strong());
    ui.horizontal_wrapped(|ui| {
        for r in bench.readouts() {
            ui.vertical(|ui| {
                ui.add(
                    Button::new(RichText::new(bit_text(r.value)).strong())
                        .fill(true_false_color!(r.value))
                        .min_size(LAMP_SIZE)
                        .sense(egui::Sense::hover()),
                );
                ui.label(r.label);
            });
        }
    });

    ui.separator();
    egui::CollapsingHeader::new("Signals")
        .default_open(false)
        .show(ui, |ui| {
            Grid::new("bench_signals").striped(true).show(ui, |ui| {
                for (key, value) in bench.snapshot().iter() {
                    ui.monospace(key);
                    ui.monospace(value.to_string());
                    ui.end_row();
                }
            });
        });
    ops
}

fn control_row(control: &Control, ui: &mut Ui) -> Option<BenchAction> {
    let mut action = None;
    match control {
        Control::Toggle { key, label, value } => {
            ui.label(label);
            let btn = Button::new(bit_text(*value))
                .fill(true_false_color!(*value))
                .min_size(TOGGLE_SIZE);
            if ui.add(btn).clicked() {
                action = Some(BenchAction::Set(key.clone(), !*value));
            }
        }
        Control::Choice {
            key,
            label,
            options,
            selected,
        } => {
            ui.label(label);
            ComboBox::from_id_salt(Id::new(key))
                .selected_text(selected.as_str())
                .show_ui(ui, |ui| {
                    for option in options {
                        if ui.selectable_label(option == selected, option).clicked()
                            && option != selected
                        {
                            action = Some(BenchAction::Select(key.clone(), option.clone()));
                        }
                    }
                });
        }
        Control::Pulse { key, label } => {
            ui.label("");
            if ui.add(Button::new(label).min_size(PULSE_SIZE)).clicked() {
                action = Some(BenchAction::Pulse(key.clone()));
            }
        }
    }
    action
}
