use egui::{Button, CollapsingHeader, ProgressBar, RichText, Ui};
use lab_engine::{
    curriculum::Experiment,
    tutor::{ContextSnapshot, Evaluation, StepStatus, StepTutor, TutorState},
};

use crate::{
    consts::{GREEN_COL, HINT_COL, MUTED_COL},
    update_ops::LabOps,
    utils::plain_text,
};

pub fn render(
    ui: &mut Ui,
    tutor: &StepTutor<&TutorState>,
    exp: &Experiment,
    context: &ContextSnapshot,
    banner: Option<&str>,
) -> Vec<LabOps> {
    let mut ops = Vec::new();
    let total = exp.total_steps();

    ui.heading("Step Tutor");
    ui.add(ProgressBar::new(tutor.progress(exp.id, total)).show_percentage());
    ui.add_space(8.0);

    match tutor.evaluate(exp.id, &exp.steps, context) {
        Evaluation::Done => {
            ui.label(
                RichText::new("Experiment complete!")
                    .color(GREEN_COL)
                    .strong()
                    .size(18.0),
            );
            if let Some(msg) = banner {
                ui.label(RichText::new(msg).color(GREEN_COL));
            }
            ui.label(format!("All {} steps of {} are done.", total, exp.title));
            if ui.button("Reset experiment").clicked() {
                ops.push(LabOps::ResetExperiment);
            }
        }
        ev @ Evaluation::Active { .. } => {
            if let Some(g) = ev.guidance() {
                ui.label(
                    RichText::new(format!("Step {} of {}: {}", g.step_number, total, g.title))
                        .strong(),
                );
                ui.label(plain_text(&g.instruction));
                if let Some(hint) = &g.hint {
                    CollapsingHeader::new("Hint")
                        .id_salt(("hint", exp.id, g.step_number))
                        .default_open(false)
                        .show(ui, |ui| {
                            ui.colored_label(HINT_COL, plain_text(hint));
                        });
                }
                ui.add_space(6.0);
                if g.satisfied {
                    ui.colored_label(GREEN_COL, &g.success_message);
                } else {
                    ui.colored_label(
                        MUTED_COL,
                        "Pending verification: waiting for the right configuration.",
                    );
                }
                if ui.add_enabled(g.satisfied, Button::new("Next step")).clicked() {
                    ops.push(LabOps::Advance);
                }
            }
        }
    }

    ui.add_space(8.0);
    CollapsingHeader::new("All steps")
        .id_salt(("outline", exp.id))
        .default_open(false)
        .show(ui, |ui| {
            for (step, status) in exp.steps.iter().zip(tutor.outline(exp.id, &exp.steps)) {
                let (mark, color) = match status {
                    StepStatus::Done => ("✔", GREEN_COL),
                    StepStatus::Current => ("▶", HINT_COL),
                    StepStatus::Pending => ("○", MUTED_COL),
                };
                ui.colored_label(color, format!("{} {}", mark, step.title));
            }
        });
    ops
}
