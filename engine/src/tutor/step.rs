use std::fmt;

use crate::errors::CriterionError;

use super::context::ContextSnapshot;

pub type CriterionResult = Result<bool, CriterionError>;

// context key through which a legacy caller reports how far along it is
pub const LEGACY_POSITION_KEY: &str = "legacy_position";

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Correct! Proceed to the next step.";

/// Judges whether a snapshot meets a step's goal. Implemented for any
/// `Fn(&ContextSnapshot) -> CriterionResult`.
pub trait Criterion {
    fn check(&self, ctx: &ContextSnapshot) -> CriterionResult;
}

impl<F> Criterion for F
where
    F: Fn(&ContextSnapshot) -> CriterionResult,
{
    fn check(&self, ctx: &ContextSnapshot) -> CriterionResult {
        self(ctx)
    }
}

pub enum StepCheck {
    Criterion(Box<dyn Criterion>),
    // flat list-of-strings scripts: done once the caller's position is past it
    Indexed,
}

pub struct StepDefinition {
    pub title: String,
    pub instruction: String,
    pub hint: Option<String>,
    pub success_message: Option<String>,
    check: StepCheck,
}

impl StepDefinition {
    pub fn new<F>(title: &str, instruction: &str, criterion: F) -> StepDefinition
    where
        F: Fn(&ContextSnapshot) -> CriterionResult + 'static,
    {
        Self::from_criterion(title, instruction, criterion)
    }
    pub fn from_criterion(
        title: &str,
        instruction: &str,
        criterion: impl Criterion + 'static,
    ) -> StepDefinition {
        StepDefinition {
            title: title.to_string(),
            instruction: instruction.to_string(),
            hint: None,
            success_message: None,
            check: StepCheck::Criterion(Box::new(criterion)),
        }
    }
    pub fn indexed(label: &str) -> StepDefinition {
        StepDefinition {
            title: label.to_string(),
            instruction: label.to_string(),
            hint: None,
            success_message: None,
            check: StepCheck::Indexed,
        }
    }
    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
    pub fn success(mut self, msg: &str) -> Self {
        self.success_message = Some(msg.to_string());
        self
    }
    pub fn success_message(&self) -> &str {
        self.success_message
            .as_deref()
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
    }
    pub fn check(&self) -> &StepCheck {
        &self.check
    }

    // `index` is this step's position in its script
    pub(crate) fn is_met(&self, index: usize, ctx: &ContextSnapshot) -> CriterionResult {
        match &self.check {
            StepCheck::Criterion(c) => c.check(ctx),
            StepCheck::Indexed => {
                let position = ctx.int_or(LEGACY_POSITION_KEY, 0);
                Ok((index as i64) < position)
            }
        }
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("title", &self.title)
            .field(
                "check",
                &match self.check {
                    StepCheck::Criterion(_) => "criterion",
                    StepCheck::Indexed => "indexed",
                },
            )
            .finish()
    }
}

// builds a legacy script from plain labels
pub fn legacy_steps(labels: &[&str]) -> Vec<StepDefinition> {
    labels.iter().map(|l| StepDefinition::indexed(l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_default_message() {
        let step = StepDefinition::new("Pick AND", "Select the AND gate", |c| {
            Ok(c.is("gate", "AND"))
        })
        .hint("It is the first option");
        assert_eq!(step.hint.as_deref(), Some("It is the first option"));
        assert_eq!(step.success_message(), DEFAULT_SUCCESS_MESSAGE);
        let step = step.success("Selected");
        assert_eq!(step.success_message(), "Selected");
        assert!(matches!(step.check(), StepCheck::Criterion(_)));
    }

    struct AtLeast(&'static str, i64);

    impl Criterion for AtLeast {
        fn check(&self, ctx: &ContextSnapshot) -> CriterionResult {
            Ok(ctx.int(self.0)? >= self.1)
        }
    }

    #[test]
    fn value_object_criteria() {
        let step = StepDefinition::from_criterion("Count up", "Reach eight", AtLeast("count", 8));
        let ctx = ContextSnapshot::new().with("count", 9);
        assert_eq!(step.is_met(0, &ctx), Ok(true));
        assert_eq!(
            step.is_met(0, &ContextSnapshot::new()),
            Err(CriterionError::MissingKey("count".into()))
        );
    }

    #[test]
    fn indexed_step_follows_supplied_position() {
        let steps = legacy_steps(&["wire", "power", "measure"]);
        let ctx = ContextSnapshot::new().with(LEGACY_POSITION_KEY, 2);
        assert_eq!(steps[0].is_met(0, &ctx), Ok(true));
        assert_eq!(steps[1].is_met(1, &ctx), Ok(true));
        assert_eq!(steps[2].is_met(2, &ctx), Ok(false));
        // no position supplied reads as the very start
        assert_eq!(steps[0].is_met(0, &ContextSnapshot::new()), Ok(false));
        assert_eq!(steps[1].instruction, "power");
    }
}
