use std::collections::HashMap;

use egui::{Button, Layout, ProgressBar, RichText, Ui};
use lab_engine::{
    bench::Simulation,
    curriculum::Curriculum,
    tutor::{StepTutor, TutorState},
};
use log::{debug, error, info, warn};

use crate::{
    bench_ui,
    config::LabConfig,
    consts::{DASHBOARD_WIDTH, GREEN_COL, TUTOR_PANEL_WIDTH},
    tutor_panel,
    update_ops::{LabOps, SyncState},
};

pub struct LabApp {
    config: LabConfig,
    curriculum: Curriculum,
    state: TutorState,
    selected: usize,
    // built on first visit, kept while the learner moves between experiments
    benches: HashMap<&'static str, Box<dyn Simulation>>,
    sync: SyncState,
    banner: Option<String>,
}

impl LabApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: LabConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: LabConfig) -> Self {
        let curriculum = Curriculum::standard();
        let selected = match config.start_experiment.as_deref() {
            Some(id) => curriculum.position(id).unwrap_or_else(|| {
                warn!("no experiment '{}', opening the first one", id);
                0
            }),
            None => 0,
        };
        let mut app = LabApp {
            config,
            curriculum,
            state: TutorState::new(),
            selected,
            benches: HashMap::new(),
            sync: SyncState::Synced,
            banner: None,
        };
        app.ensure_bench();
        app
    }

    pub fn state(&self) -> &TutorState {
        &self.state
    }
    pub fn selected_id(&self) -> &'static str {
        self.curriculum.get(self.selected).map(|e| e.id).unwrap_or("")
    }
    pub fn bench(&self) -> Option<&dyn Simulation> {
        self.benches.get(self.selected_id()).map(|b| b.as_ref())
    }
    pub fn sync(&self) -> &SyncState {
        &self.sync
    }
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    fn ensure_bench(&mut self) {
        let Some(exp) = self.curriculum.get(self.selected) else {
            return;
        };
        if self.benches.contains_key(exp.id) {
            return;
        }
        match exp.build_bench() {
            Ok(b) => {
                self.benches.insert(exp.id, b);
            }
            Err(e) => {
                error!("could not build the bench for {}: {}", exp.id, e);
                self.sync = SyncState::Error(e.to_string());
            }
        }
    }

    pub fn apply(&mut self, op: LabOps) {
        let id = self.selected_id();
        match op {
            LabOps::Bench(action) => {
                let Some(bench) = self.benches.get_mut(id) else {
                    return;
                };
                debug!("{}: {:?}", id, action);
                self.sync = match bench.apply(action) {
                    Ok(()) => SyncState::Synced,
                    Err(e) => {
                        error!("{}: {}", id, e);
                        SyncState::Error(e.to_string())
                    }
                };
            }
            LabOps::Advance => {
                let (Some(exp), Some(bench)) =
                    (self.curriculum.get(self.selected), self.benches.get(id))
                else {
                    return;
                };
                let mut tutor = StepTutor::new(&mut self.state);
                // re-checked here so a stale click can never skip a step
                if !tutor
                    .evaluate(id, &exp.steps, &bench.snapshot())
                    .is_satisfied()
                {
                    debug!("{}: advance ignored, step not satisfied", id);
                    return;
                }
                tutor.advance(id);
                if exp.is_complete(&self.state)
                    && self.config.celebrate
                    && self.state.mark_celebrated(id)
                {
                    info!("{} completed", id);
                    self.banner = Some(format!("You finished {}.", exp.title));
                }
            }
            LabOps::ResetExperiment => {
                StepTutor::new(&mut self.state).reset(id);
                self.benches.remove(id);
                self.banner = None;
                self.ensure_bench();
            }
            LabOps::ResetAll => {
                Curriculum::reset_all(&mut self.state);
                self.benches.clear();
                self.banner = None;
                self.ensure_bench();
            }
            LabOps::Select(index) => {
                if index < self.curriculum.len() && index != self.selected {
                    self.selected = index;
                    self.banner = None;
                    self.sync = SyncState::Synced;
                    self.ensure_bench();
                }
            }
        }
    }

    fn dashboard(&self, ui: &mut Ui) -> Vec<LabOps> {
        let mut ops = Vec::new();
        ui.heading(crate::consts::APP_TITLE);
        let summary = self.curriculum.summary(&self.state);
        ui.add(
            ProgressBar::new(summary.fraction())
                .text(format!("{} of {} experiments", summary.completed, summary.total)),
        );
        ui.separator();

        let mut unit = 0;
        for (i, exp) in self.curriculum.iter().enumerate() {
            if exp.unit != unit {
                unit = exp.unit;
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Unit {}: {}", unit, Curriculum::unit_title(unit)))
                        .strong(),
                );
            }
            let text = if exp.is_complete(&self.state) {
                RichText::new(format!("✔ {}", exp.title)).color(GREEN_COL)
            } else {
                RichText::new(exp.title)
            };
            if ui.selectable_label(i == self.selected, text).clicked() {
                ops.push(LabOps::Select(i));
            }
        }

        ui.with_layout(Layout::bottom_up(egui::Align::Min), |ui| {
            if ui.button("Reset all progress").clicked() {
                ops.push(LabOps::ResetAll);
            }
        });
        ops
    }

    fn status_line(&self, ui: &mut Ui) {
        ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = Button::new(if self.sync.is_synced() {
                "Circuit OK"
            } else {
                self.sync.error_msg()
            })
            .fill(crate::true_false_color!(!self.sync.is_error()));
            ui.add(btn);
        });
    }
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut ops = Vec::new();

        egui::SidePanel::left("dashboard")
            .exact_width(DASHBOARD_WIDTH)
            .show(ctx, |ui| {
                ops.extend(self.dashboard(ui));
            });

        let id = self.selected_id();
        let snapshot = self.bench().map(|b| b.snapshot()).unwrap_or_default();
        egui::SidePanel::right("tutor")
            .default_width(TUTOR_PANEL_WIDTH)
            .show(ctx, |ui| {
                if let Some(exp) = self.curriculum.find(id) {
                    let tutor = StepTutor::new(&self.state);
                    ops.extend(tutor_panel::render(
                        ui,
                        &tutor,
                        exp,
                        &snapshot,
                        self.banner.as_deref(),
                    ));
                }
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.status_line(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(exp) = self.curriculum.get(self.selected) {
                ui.heading(exp.title);
                ui.label(exp.objective);
                ui.separator();
            }
            match self.bench() {
                Some(bench) => ops.extend(bench_ui::render(bench, ui)),
                None => {
                    ui.label("This experiment's circuit is unavailable.");
                }
            }
        });

        for op in ops {
            self.apply(op);
        }
    }
}
