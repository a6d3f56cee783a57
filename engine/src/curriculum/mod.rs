//! The lab's experiments, grouped by unit, and the dashboard's view of a
//! learner's progress through them.

mod unit1;
mod unit2;
mod unit3;

use std::fmt;

use crate::{
    bench::Simulation,
    errors::EngineError,
    tutor::{StepDefinition, StepTutor, TutorState},
};

pub type BenchFactory = fn() -> Result<Box<dyn Simulation>, EngineError>;

pub const UNIT_TITLES: [(u8, &str); 3] = [
    (1, "Boolean Basics"),
    (2, "Combinational Circuits"),
    (3, "Sequential Circuits"),
];

pub struct Experiment {
    pub id: &'static str,
    pub unit: u8,
    pub title: &'static str,
    pub objective: &'static str,
    pub steps: Vec<StepDefinition>,
    bench: BenchFactory,
}

impl Experiment {
    pub fn new(
        id: &'static str,
        unit: u8,
        title: &'static str,
        objective: &'static str,
        steps: Vec<StepDefinition>,
        bench: BenchFactory,
    ) -> Self {
        Experiment {
            id,
            unit,
            title,
            objective,
            steps,
            bench,
        }
    }
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }
    // a fresh circuit in its default configuration
    pub fn build_bench(&self) -> Result<Box<dyn Simulation>, EngineError> {
        (self.bench)()
    }
    pub fn is_complete(&self, state: &TutorState) -> bool {
        state.step_of(self.id) >= self.total_steps()
    }
}

impl fmt::Debug for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Experiment")
            .field("id", &self.id)
            .field("unit", &self.unit)
            .field("steps", &self.steps.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f32 / self.total as f32
    }
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }
}

#[derive(Debug)]
pub struct Curriculum {
    experiments: Vec<Experiment>,
}

impl Curriculum {
    pub fn standard() -> Curriculum {
        Curriculum {
            experiments: vec![
                unit1::gate_analysis(),
                unit2::adder_studio(),
                unit2::multiplexer(),
                unit3::flip_flops(),
                unit3::counter(),
            ],
        }
    }
    pub fn find(&self, id: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.id == id)
    }
    pub fn position(&self, id: &str) -> Option<usize> {
        self.experiments.iter().position(|e| e.id == id)
    }
    pub fn get(&self, index: usize) -> Option<&Experiment> {
        self.experiments.get(index)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter()
    }
    pub fn len(&self) -> usize {
        self.experiments.len()
    }
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
    pub fn unit_title(unit: u8) -> &'static str {
        UNIT_TITLES
            .iter()
            .find(|(n, _)| *n == unit)
            .map(|(_, t)| *t)
            .unwrap_or("Unit")
    }

    // read only: the dashboard never moves anyone's progress
    pub fn summary(&self, state: &TutorState) -> ProgressSummary {
        ProgressSummary {
            completed: self.iter().filter(|e| e.is_complete(state)).count(),
            total: self.len(),
        }
    }

    pub fn reset_all(state: &mut TutorState) {
        log::info!("all progress reset");
        state.clear();
    }

    pub fn progress_of(&self, state: &TutorState, id: &str) -> f32 {
        let total = self.find(id).map(|e| e.total_steps()).unwrap_or(0);
        StepTutor::new(state).progress(id, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let c = Curriculum::standard();
        let ids: Vec<&str> = c.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["u1_ex1", "u2_ex3", "u2_ex4", "u3_ex6", "u3_ex8"]);
        assert_eq!(c.find("u2_ex4").unwrap().unit, 2);
        assert_eq!(c.position("u3_ex6"), Some(3));
        assert!(c.find("u9_ex1").is_none());
        for e in c.iter() {
            assert!(e.total_steps() > 0, "{} has no steps", e.id);
            assert!(e.build_bench().is_ok(), "{} bench failed", e.id);
        }
        assert_eq!(Curriculum::unit_title(3), "Sequential Circuits");
    }

    #[test]
    fn summary_counts_finished_experiments() {
        let c = Curriculum::standard();
        let mut state = TutorState::new();
        assert_eq!(c.summary(&state), ProgressSummary { completed: 0, total: 5 });

        let gates = c.find("u1_ex1").unwrap();
        state.set_step("u1_ex1", gates.total_steps());
        state.set_step("u2_ex3", 1);
        let s = c.summary(&state);
        assert_eq!(s.completed, 1);
        assert_eq!(s.remaining(), 4);
        assert!((s.fraction() - 0.2).abs() < f32::EPSILON);
        assert!((c.progress_of(&state, "u1_ex1") - 1.0).abs() < f32::EPSILON);

        // summarising does not move anything
        assert_eq!(state.step_of("u2_ex3"), 1);

        Curriculum::reset_all(&mut state);
        assert_eq!(c.summary(&state).completed, 0);
    }
}
