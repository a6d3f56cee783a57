use crate::{
    bench::{adder::FULL_ADDER, adder::HALF_ADDER, AdderBench, MuxBench, Simulation},
    errors::EngineError,
    tutor::{ContextSnapshot, CriterionResult, StepDefinition},
};

use super::Experiment;

fn adder_bench() -> Result<Box<dyn Simulation>, EngineError> {
    Ok(Box::new(AdderBench::new()?))
}

fn mux_bench() -> Result<Box<dyn Simulation>, EngineError> {
    Ok(Box::new(MuxBench::new()?))
}

fn adds(c: &ContextSnapshot, kind: &str, a: i64, b: i64, sum: i64, carry: i64) -> bool {
    c.is("circuit_type", kind)
        && c.is("a", a)
        && c.is("b", b)
        && c.is("sum", sum)
        && c.is("carry", carry)
}

pub(super) fn adder_studio() -> Experiment {
    let steps = vec![
        StepDefinition::new(
            "Select the half adder",
            "Choose **Half Adder** as the circuit type. It adds two single bits.",
            |c| Ok(c.is("circuit_type", HALF_ADDER)),
        ),
        StepDefinition::new(
            "Zero plus zero",
            "Set **A = 0** and **B = 0**. Both Sum and Carry should stay at 0.",
            |c| Ok(adds(c, HALF_ADDER, 0, 0, 0, 0)),
        ),
        StepDefinition::new(
            "One plus zero",
            "Set **A = 1**, **B = 0**. The sum bit comes from an XOR gate.",
            |c| Ok(adds(c, HALF_ADDER, 1, 0, 1, 0)),
        ),
        StepDefinition::new(
            "One plus one",
            "Set **A = 1**, **B = 1**. In binary 1 + 1 = 10: Sum is 0 and Carry is 1.",
            |c| Ok(adds(c, HALF_ADDER, 1, 1, 0, 1)),
        )
        .hint("The carry is an AND of the two inputs."),
        StepDefinition::new(
            "Full adder at its maximum",
            "Switch to **Full Adder** and set **A**, **B** and **Cin** all to 1. 1 + 1 + 1 = 11 in binary.",
            |c| Ok(adds(c, FULL_ADDER, 1, 1, 1, 1) && c.is("cin", 1)),
        ),
        StepDefinition::new(
            "Carry in on its own",
            "Clear **A** and **B** but keep **Cin = 1**. The incoming carry alone shows up on Sum.",
            |c| Ok(adds(c, FULL_ADDER, 0, 0, 1, 0) && c.is("cin", 1)),
        )
        .success("That is how each stage of a ripple-carry adder works."),
    ];
    Experiment::new(
        "u2_ex3",
        2,
        "Adder Studio",
        "Build up binary addition from a half adder to a full adder.",
        steps,
        adder_bench,
    )
}

// output equals whatever data line the select inputs address
fn routes(c: &ContextSnapshot, s1: i64, s0: i64) -> CriterionResult {
    let line = c.int(&format!("d{}", s1 * 2 + s0))?;
    Ok(c.is("s1", s1) && c.is("s0", s0) && c.int("output")? == line)
}

pub(super) fn multiplexer() -> Experiment {
    let steps = vec![
        StepDefinition::new(
            "Read the data lines",
            "A 4:1 multiplexer has data lines D0 to D3 and select lines S1, S0. Check that **D0 = 1**.",
            |c| Ok(c.is("d0", 1)),
        ),
        StepDefinition::new(
            "Address 00",
            "Set **S1 = 0**, **S0 = 0**. Address 0 routes D0 to the output.",
            |c| Ok(c.is("s1", 0) && c.is("s0", 0) && c.is("output", 1)),
        ),
        StepDefinition::new(
            "Address 01",
            "Set **S0 = 1**. The output now shows D1, which is 0.",
            |c| Ok(c.is("s1", 0) && c.is("s0", 1) && c.is("output", 0)),
        ),
        StepDefinition::new(
            "Change the routed line",
            "Still at address 01, raise **D1** to 1 and watch the output follow it.",
            |c| Ok(c.is("s1", 0) && c.is("s0", 1) && c.is("d1", 1) && c.is("output", 1)),
        ),
        StepDefinition::new(
            "Address 10",
            "Set **S1 = 1**, **S0 = 0**. The output should match D2.",
            |c| routes(c, 1, 0),
        ),
        StepDefinition::new(
            "Address 11",
            "Set **S1 = 1**, **S0 = 1**. The output should match D3.",
            |c| routes(c, 1, 1),
        )
        .hint("S1 picks the upper pair of lines, S0 the line within the pair.")
        .success("All four paths through the multiplexer have been tested."),
    ];
    Experiment::new(
        "u2_ex4",
        2,
        "Multiplexer Logic",
        "Route one of four data lines to the output with two select lines.",
        steps,
        mux_bench,
    )
}
