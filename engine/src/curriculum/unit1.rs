use crate::{
    bench::{GateBench, Simulation},
    errors::EngineError,
    tutor::{ContextSnapshot, StepDefinition},
};

use super::Experiment;

fn bench() -> Result<Box<dyn Simulation>, EngineError> {
    Ok(Box::new(GateBench::new()?))
}

fn gate_reads(c: &ContextSnapshot, gate: &str, a: i64, b: i64, out: i64) -> bool {
    c.is("gate", gate) && c.is("in_a", a) && c.is("in_b", b) && c.is("out", out)
}

pub(super) fn gate_analysis() -> Experiment {
    let steps = vec![
        StepDefinition::new(
            "Select the AND gate",
            "Pick **AND** from the gate list. A 0 stands for a LOW voltage and a 1 for a HIGH one.",
            |c| Ok(c.is("gate", "AND")),
        ),
        StepDefinition::new(
            "AND with both inputs low",
            "Set **A = 0** and **B = 0** and look at the output lamp.",
            |c| Ok(gate_reads(c, "AND", 0, 0, 0)),
        )
        .hint("Both switches start low, so the lamp should already be off."),
        StepDefinition::new(
            "AND with one input high",
            "Keep **A = 0** and raise **B** to 1. Predict the output before you look.",
            |c| Ok(gate_reads(c, "AND", 0, 1, 0)),
        ),
        StepDefinition::new(
            "AND with both inputs high",
            "Set **A = 1** and **B = 1**. This is the only row of the AND table that lights the lamp.",
            |c| Ok(gate_reads(c, "AND", 1, 1, 1)),
        )
        .success("Right, AND needs every input high."),
        StepDefinition::new(
            "OR with a single high input",
            "Switch to **OR** and set **A = 0**, **B = 1**. One high input is enough for OR.",
            |c| Ok(gate_reads(c, "OR", 0, 1, 1)),
        ),
        StepDefinition::new(
            "Invert with NOT",
            "Switch to **NOT** and set **A = 1**. NOT has a single input and flips it.",
            |c| Ok(c.is("gate", "NOT") && c.is("in_a", 1) && c.is("out", 0)),
        )
        .hint("The B switch disappears for NOT."),
        StepDefinition::new(
            "XOR with equal inputs",
            "Switch to **XOR** and set **A = 1**, **B = 1**. XOR is high only when the inputs differ.",
            |c| Ok(gate_reads(c, "XOR", 1, 1, 0)),
        ),
        StepDefinition::new(
            "NAND with both inputs high",
            "Switch to **NAND** with **A = 1**, **B = 1**. NAND is an AND followed by a NOT.",
            |c| Ok(gate_reads(c, "NAND", 1, 1, 0)),
        ),
        StepDefinition::new(
            "NOR with both inputs low",
            "Switch to **NOR** and set **A = 0**, **B = 0**. What does inverting OR(0, 0) give?",
            |c| Ok(gate_reads(c, "NOR", 0, 0, 1)),
        )
        .success("Every basic gate has been checked."),
    ];
    Experiment::new(
        "u1_ex1",
        1,
        "Logic Gate Analysis",
        "Verify the truth tables of the basic logic gates.",
        steps,
        bench,
    )
}
