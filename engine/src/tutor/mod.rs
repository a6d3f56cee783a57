//! Guided, step-by-step checking of a learner's work.
//!
//! Every experiment has an ordered script of [`StepDefinition`]s. The
//! [`StepTutor`] remembers which step each experiment is on (in a
//! [`TutorState`] owned by the caller) and judges the current step against a
//! [`ContextSnapshot`] of the simulation. Progress only moves when the caller
//! asks for it with [`StepTutor::advance`]; judging a step never moves it.

pub mod context;
pub mod state;
pub mod step;

use std::{
    borrow::{Borrow, BorrowMut},
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

use log::{debug, info};

pub use context::{ContextSnapshot, Value};
pub use state::TutorState;
pub use step::{
    legacy_steps, Criterion, CriterionResult, StepCheck, StepDefinition, LEGACY_POSITION_KEY,
};

#[derive(Debug)]
pub enum Evaluation<'a> {
    // the whole script has been worked through
    Done,
    Active {
        step_index: usize,
        step: &'a StepDefinition,
        satisfied: bool,
    },
}

/// What the render surface needs to show the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    pub step_number: usize,
    pub title: String,
    pub instruction: String,
    pub hint: Option<String>,
    pub satisfied: bool,
    pub success_message: String,
}

impl<'a> Evaluation<'a> {
    pub fn is_done(&self) -> bool {
        matches!(self, Evaluation::Done)
    }
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Evaluation::Active { satisfied: true, .. })
    }
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Evaluation::Done => None,
            Evaluation::Active { step_index, .. } => Some(*step_index),
        }
    }
    pub fn guidance(&self) -> Option<Guidance> {
        match self {
            Evaluation::Done => None,
            Evaluation::Active {
                step_index,
                step,
                satisfied,
            } => Some(Guidance {
                step_number: step_index + 1,
                title: step.title.clone(),
                instruction: step.instruction.clone(),
                hint: step.hint.clone(),
                satisfied: *satisfied,
                success_message: step.success_message().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Pending,
}

thread_local! {
    static CHECKING: Cell<bool> = const { Cell::new(false) };
}
static QUIET_HOOK: Once = Once::new();

// runs a criterion with its panics routed to the debug log instead of stderr
fn check_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CHECKING.with(Cell::get) {
                debug!("criterion panicked: {}", info);
            } else {
                previous(info);
            }
        }));
    });
    let outer = CHECKING.with(|c| c.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CHECKING.with(|c| c.set(outer));
    result
}

/// Walks experiments through their scripts.
///
/// Built over `&TutorState` it can only read (current step, evaluation,
/// progress, outline); over `&mut TutorState` it can also move progress.
pub struct StepTutor<S> {
    state: S,
}

impl<S: Borrow<TutorState>> StepTutor<S> {
    pub fn new(state: S) -> Self {
        StepTutor { state }
    }
    pub fn state(&self) -> &TutorState {
        self.state.borrow()
    }

    pub fn current_step(&self, experiment_id: &str) -> usize {
        self.state().step_of(experiment_id)
    }

    pub fn evaluate<'a>(
        &self,
        experiment_id: &str,
        steps: &'a [StepDefinition],
        context: &ContextSnapshot,
    ) -> Evaluation<'a> {
        let idx = self.current_step(experiment_id);
        let step = match steps.get(idx) {
            Some(s) => s,
            None => return Evaluation::Done,
        };
        // a criterion may reach for keys this configuration never produces,
        // or even panic; either way the step simply stays unsatisfied
        let satisfied = match check_quietly(|| step.is_met(idx, context)) {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => {
                debug!("{} step {} not checkable yet: {}", experiment_id, idx, e);
                false
            }
            Err(_) => {
                debug!("{} step {} criterion panicked", experiment_id, idx);
                false
            }
        };
        Evaluation::Active {
            step_index: idx,
            step,
            satisfied,
        }
    }

    pub fn progress(&self, experiment_id: &str, total_steps: usize) -> f32 {
        if total_steps == 0 {
            return 1.0;
        }
        let curr = self.current_step(experiment_id) as f32;
        (curr / total_steps as f32).min(1.0)
    }

    pub fn outline(&self, experiment_id: &str, steps: &[StepDefinition]) -> Vec<StepStatus> {
        let idx = self.current_step(experiment_id);
        (0..steps.len())
            .map(|i| {
                if i < idx {
                    StepStatus::Done
                } else if i == idx {
                    StepStatus::Current
                } else {
                    StepStatus::Pending
                }
            })
            .collect()
    }
}

impl<S: BorrowMut<TutorState>> StepTutor<S> {
    // no bounds check: seeking to an arbitrary step is allowed
    pub fn set_current_step(&mut self, experiment_id: &str, index: usize) {
        self.state.borrow_mut().set_step(experiment_id, index);
    }
    pub fn advance(&mut self, experiment_id: &str) -> usize {
        // an index at or past the end stays there
        let next = self.current_step(experiment_id).saturating_add(1);
        self.set_current_step(experiment_id, next);
        info!("{} advanced to step {}", experiment_id, next);
        next
    }
    pub fn reset(&mut self, experiment_id: &str) {
        let state = self.state.borrow_mut();
        if state.has_entry(experiment_id) {
            info!("{} progress reset", experiment_id);
        }
        state.remove(experiment_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CriterionError;

    fn and_script() -> Vec<StepDefinition> {
        vec![StepDefinition::new(
            "Golden case",
            "Set both inputs of the AND gate high",
            |c| Ok(c.is("gate", "AND") && c.is("a", 1) && c.is("b", 1)),
        )]
    }

    fn three_steps() -> Vec<StepDefinition> {
        (0..3)
            .map(|i| StepDefinition::new(&format!("s{}", i), "", |_| Ok(true)))
            .collect()
    }

    #[test]
    fn unknown_experiments_start_at_zero() {
        let mut state = TutorState::new();
        let tutor = StepTutor::new(&mut state);
        for id in ["u1_ex1", "", "never-written"] {
            assert_eq!(tutor.current_step(id), 0);
        }
    }

    #[test]
    fn k_advances_reach_k() {
        let steps = three_steps();
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        let mut last = tutor.current_step("x");
        for k in 1..=steps.len() {
            assert_eq!(tutor.advance("x"), k);
            let now = tutor.current_step("x");
            assert_eq!(now, k);
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        tutor.reset("nothing-here");
        assert_eq!(tutor.current_step("nothing-here"), 0);
        tutor.advance("u1_ex1");
        tutor.reset("u1_ex1");
        tutor.reset("u1_ex1");
        assert_eq!(tutor.current_step("u1_ex1"), 0);
    }

    #[test]
    fn failing_criteria_are_unsatisfied() {
        let steps = vec![
            StepDefinition::new("strict", "", |c| Ok(c.int("count")? >= 8)),
            StepDefinition::new("custom", "", |_| {
                Err(CriterionError::Other("bench not wired".into()))
            }),
            StepDefinition::new("boom", "", |c| {
                let bits: Vec<i64> = Vec::new();
                Ok(bits[c.int_or("i", 3) as usize] == 1)
            }),
        ];
        let ctx = ContextSnapshot::new().with("gate", "NOT");
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        for i in 0..steps.len() {
            tutor.set_current_step("f", i);
            let ev = tutor.evaluate("f", &steps, &ctx);
            assert_eq!(ev.step_index(), Some(i));
            assert!(!ev.is_satisfied());
        }
    }

    #[test]
    fn terminal_index_is_done_whatever_the_context() {
        let steps = and_script();
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        tutor.set_current_step("u1_ex1", steps.len());
        let contexts = [
            ContextSnapshot::new(),
            ContextSnapshot::new().with("gate", "AND").with("a", 1).with("b", 1),
            ContextSnapshot::new().with("a", "garbage"),
        ];
        for ctx in &contexts {
            assert!(tutor.evaluate("u1_ex1", &steps, ctx).is_done());
        }
        // seeking past the end is permitted and still reads as done
        tutor.set_current_step("u1_ex1", 40);
        assert!(tutor.evaluate("u1_ex1", &steps, &contexts[0]).is_done());
    }

    #[test]
    fn advancing_from_the_largest_index_stays_done() {
        let steps = and_script();
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        tutor.set_current_step("u1_ex1", usize::MAX);
        assert_eq!(tutor.advance("u1_ex1"), usize::MAX);
        assert_eq!(tutor.current_step("u1_ex1"), usize::MAX);
        assert!(tutor
            .evaluate("u1_ex1", &steps, &ContextSnapshot::new())
            .is_done());
        assert_eq!(tutor.progress("u1_ex1", steps.len()), 1.0);
    }

    #[test]
    fn criterion_panics_are_kept_off_stderr() {
        let steps = vec![StepDefinition::new("boom", "", |_| -> CriterionResult {
            panic!("criterion bug")
        })];
        let mut state = TutorState::new();
        let tutor = StepTutor::new(&mut state);
        for _ in 0..3 {
            assert!(!tutor.evaluate("p", &steps, &ContextSnapshot::new()).is_satisfied());
            assert!(!CHECKING.with(Cell::get));
        }
        assert_eq!(check_quietly(|| CHECKING.with(Cell::get)).ok(), Some(true));
        // nested checks restore the outer flag
        let nested = check_quietly(|| {
            let _ = check_quietly(|| ());
            CHECKING.with(Cell::get)
        });
        assert_eq!(nested.ok(), Some(true));
        assert!(!CHECKING.with(Cell::get));
    }

    #[test]
    fn reads_work_through_a_shared_borrow() {
        let steps = three_steps();
        let mut state = TutorState::new();
        state.set_step("r", 1);
        let view = StepTutor::new(&state);
        let other = StepTutor::new(&state);
        assert_eq!(view.current_step("r"), 1);
        assert_eq!(other.evaluate("r", &steps, &ContextSnapshot::new()).step_index(), Some(1));
        assert!((view.progress("r", steps.len()) - 1.0 / 3.0).abs() < f32::EPSILON);
        assert_eq!(
            other.outline("r", &steps),
            vec![StepStatus::Done, StepStatus::Current, StepStatus::Pending]
        );
        assert_eq!(view.state().step_of("r"), 1);
    }

    #[test]
    fn empty_script_is_done_immediately() {
        let mut state = TutorState::new();
        let tutor = StepTutor::new(&mut state);
        let ev = tutor.evaluate("empty", &[], &ContextSnapshot::new());
        assert!(ev.is_done());
        assert!(ev.guidance().is_none());
        assert_eq!(tutor.progress("empty", 0), 1.0);
    }

    #[test]
    fn and_gate_walkthrough() {
        let steps = and_script();
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);

        let ok = ContextSnapshot::new().with("gate", "AND").with("a", 1).with("b", 1);
        let ev = tutor.evaluate("u1_ex1", &steps, &ok);
        assert!(ev.is_satisfied());
        assert_eq!(ev.step_index(), Some(0));

        let wrong_gate = ContextSnapshot::new().with("gate", "OR").with("a", 1).with("b", 1);
        assert!(!tutor.evaluate("u1_ex1", &steps, &wrong_gate).is_satisfied());

        // evaluating twice does not move anything
        assert_eq!(tutor.current_step("u1_ex1"), 0);
        tutor.advance("u1_ex1");
        assert_eq!(tutor.current_step("u1_ex1"), 1);
        assert!(tutor.evaluate("u1_ex1", &steps, &ok).is_done());

        tutor.reset("u1_ex1");
        assert_eq!(tutor.current_step("u1_ex1"), 0);
        assert!(!tutor.evaluate("u1_ex1", &steps, &ContextSnapshot::new()).is_done());
    }

    #[test]
    fn guidance_carries_step_text() {
        let steps = vec![StepDefinition::new("Pick OR", "Select the OR gate", |c| {
            Ok(c.is("gate", "OR"))
        })
        .hint("second in the list")];
        let mut state = TutorState::new();
        let tutor = StepTutor::new(&mut state);
        let g = tutor
            .evaluate("g", &steps, &ContextSnapshot::new().with("gate", "OR"))
            .guidance()
            .unwrap();
        assert_eq!(g.step_number, 1);
        assert_eq!(g.title, "Pick OR");
        assert_eq!(g.hint.as_deref(), Some("second in the list"));
        assert!(g.satisfied);
        assert_eq!(g.success_message, step::DEFAULT_SUCCESS_MESSAGE);
    }

    #[test]
    fn legacy_script_through_evaluate() {
        let steps = legacy_steps(&["read", "wire", "test"]);
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        let at = |p: i64| ContextSnapshot::new().with(LEGACY_POSITION_KEY, p);
        assert!(!tutor.evaluate("old", &steps, &at(0)).is_satisfied());
        assert!(tutor.evaluate("old", &steps, &at(1)).is_satisfied());
        tutor.advance("old");
        assert!(!tutor.evaluate("old", &steps, &at(1)).is_satisfied());
        assert!(tutor.evaluate("old", &steps, &at(2)).is_satisfied());
    }

    #[test]
    fn progress_and_outline() {
        let steps = three_steps();
        let mut state = TutorState::new();
        let mut tutor = StepTutor::new(&mut state);
        assert_eq!(tutor.progress("p", steps.len()), 0.0);
        tutor.advance("p");
        assert_eq!(
            tutor.outline("p", &steps),
            vec![StepStatus::Done, StepStatus::Current, StepStatus::Pending]
        );
        tutor.set_current_step("p", 7);
        assert_eq!(tutor.progress("p", steps.len()), 1.0);
        assert_eq!(tutor.outline("p", &steps), vec![StepStatus::Done; 3]);
    }
}
