use std::collections::{HashMap, HashSet};

/// Per-session progress: the current step of every experiment the learner
/// has touched. Owned by whoever drives the session and lent to
/// [`StepTutor`](super::StepTutor).
#[derive(Debug, Clone, Default)]
pub struct TutorState {
    steps: HashMap<String, usize>,
    celebrated: HashSet<String>,
}

impl TutorState {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn step_of(&self, experiment_id: &str) -> usize {
        self.steps.get(experiment_id).copied().unwrap_or(0)
    }
    pub fn set_step(&mut self, experiment_id: &str, index: usize) {
        self.steps.insert(experiment_id.to_string(), index);
    }
    pub fn remove(&mut self, experiment_id: &str) {
        self.steps.remove(experiment_id);
        self.celebrated.remove(experiment_id);
    }
    pub fn has_entry(&self, experiment_id: &str) -> bool {
        self.steps.contains_key(experiment_id)
    }
    // "reset all progress"
    pub fn clear(&mut self) {
        self.steps.clear();
        self.celebrated.clear();
    }
    // true only the first time an experiment is marked since its last reset
    pub fn mark_celebrated(&mut self, experiment_id: &str) -> bool {
        self.celebrated.insert(experiment_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::TutorState;

    #[test]
    fn entries_appear_on_write_and_vanish_on_remove() {
        let mut s = TutorState::new();
        assert_eq!(s.step_of("u1_ex1"), 0);
        assert!(!s.has_entry("u1_ex1"));
        s.set_step("u1_ex1", 3);
        assert!(s.has_entry("u1_ex1"));
        assert_eq!(s.step_of("u1_ex1"), 3);
        s.remove("u1_ex1");
        assert!(!s.has_entry("u1_ex1"));
        assert_eq!(s.step_of("u1_ex1"), 0);
    }

    #[test]
    fn celebration_happens_once_per_completion() {
        let mut s = TutorState::new();
        assert!(s.mark_celebrated("u2_ex3"));
        assert!(!s.mark_celebrated("u2_ex3"));
        s.remove("u2_ex3");
        assert!(s.mark_celebrated("u2_ex3"));
        s.set_step("u3_ex6", 2);
        s.clear();
        assert!(s.mark_celebrated("u2_ex3"));
        assert_eq!(s.step_of("u3_ex6"), 0);
    }
}
