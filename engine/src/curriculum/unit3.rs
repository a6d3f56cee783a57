use crate::{
    bench::{CounterBench, FlipFlopBench, Simulation},
    errors::EngineError,
    tutor::StepDefinition,
};

use super::Experiment;

fn flip_flop_bench() -> Result<Box<dyn Simulation>, EngineError> {
    Ok(Box::new(FlipFlopBench::new()?))
}

fn counter_bench() -> Result<Box<dyn Simulation>, EngineError> {
    Ok(Box::new(CounterBench::new()?))
}

pub(super) fn flip_flops() -> Experiment {
    let steps = vec![
        StepDefinition::new(
            "Select the SR flip-flop",
            "Choose **SR**. Its outputs only change on a rising clock edge.",
            |c| Ok(c.is("ff_type", "SR")),
        ),
        StepDefinition::new(
            "Prepare a set",
            "Set **S = 1** and **R = 0**. Notice that Q does not move yet.",
            |c| Ok(c.is("ff_type", "SR") && c.is("s", 1) && c.is("r", 0)),
        ),
        StepDefinition::new(
            "Clock the set",
            "Press **Clock Pulse**. Q should go to 1 and Q' to 0.",
            |c| {
                Ok(c.is("ff_type", "SR")
                    && c.is("s", 1)
                    && c.is("clk_pulsed", 1)
                    && c.is("q", 1))
            },
        ),
        StepDefinition::new(
            "Reset the flip-flop",
            "Set **S = 0**, **R = 1** and pulse the clock to bring Q back to 0.",
            |c| {
                Ok(c.is("ff_type", "SR")
                    && c.is("s", 0)
                    && c.is("r", 1)
                    && c.is("clk_pulsed", 1)
                    && c.is("q", 0))
            },
        )
        .hint("Change the inputs first, then pulse."),
        StepDefinition::new(
            "The forbidden input",
            "Raise both **S** and **R**. The bench flags this combination as invalid.",
            |c| Ok(c.is("ff_type", "SR") && c.flag("invalid")?),
        ),
        StepDefinition::new(
            "JK toggle",
            "Switch to **JK**, set **J = 1**, **K = 1** and pulse once. J = K = 1 toggles Q.",
            |c| {
                Ok(c.is("ff_type", "JK")
                    && c.is("j", 1)
                    && c.is("k", 1)
                    && c.is("clk_pulsed", 1)
                    && c.is("q", 1))
            },
        ),
        StepDefinition::new(
            "Store a bit in a D flip-flop",
            "Switch to **D**, set **D = 1** and pulse. Q copies D on the edge.",
            |c| Ok(c.is("ff_type", "D") && c.is("q", 1)),
        ),
        StepDefinition::new(
            "Toggle with T",
            "Switch to **T**, set **T = 1** and pulse the clock.",
            |c| Ok(c.is("ff_type", "T") && c.is("t", 1) && c.is("clk_pulsed", 1)),
        )
        .success("You have clocked all four flip-flop types."),
    ];
    Experiment::new(
        "u3_ex6",
        3,
        "Flip-Flop Fundamentals",
        "Compare how SR, JK, D and T flip-flops respond to a clock edge.",
        steps,
        flip_flop_bench,
    )
}

pub(super) fn counter() -> Experiment {
    let steps = vec![
        StepDefinition::new(
            "Initial state",
            "The counter starts at **0000**. Every clock pulse adds one.",
            |c| Ok(c.is("count", 0)),
        ),
        StepDefinition::new(
            "First count",
            "Press **Clock Pulse** once. Q0 toggles on every edge.",
            |c| Ok(c.is("count", 1)),
        ),
        StepDefinition::new(
            "Count to two",
            "Pulse again. Q0 falls back to 0 and Q1 rises: 0010.",
            |c| Ok(c.is("count", 2)),
        ),
        StepDefinition::new(
            "Reach five",
            "Keep pulsing until the counter shows **0101**.",
            |c| Ok(c.is("count", 5)),
        ),
        StepDefinition::new(
            "Cross into the upper half",
            "Pulse until the count is at least **8**, when Q3 rises.",
            |c| Ok(c.int("count")? >= 8),
        ),
        StepDefinition::new(
            "Maximum count",
            "Carry on to **1111**, the largest 4-bit value.",
            |c| Ok(c.is("count", 15)),
        ),
        StepDefinition::new(
            "Roll over",
            "Pulse once more. The counter wraps around to 0000.",
            |c| Ok(c.int("rollovers")? >= 1 && c.is("count", 0)),
        )
        .hint("All four stages toggle on the same edge."),
        StepDefinition::new(
            "Count down",
            "Turn on **Down (M)** and pulse. From 0000 a down counter wraps to 1111.",
            |c| Ok(c.is("down", 1) && c.is("count", 15)),
        ),
        StepDefinition::new(
            "Reset",
            "Press **Reset** to clear every stage without the clock.",
            |c| Ok(c.is("count", 0) && c.is("pulses", 0)),
        )
        .success("The counter is back at zero."),
    ];
    Experiment::new(
        "u3_ex8",
        3,
        "Synchronous Counter",
        "Watch a 4-bit synchronous counter count up, wrap around and count down.",
        steps,
        counter_bench,
    )
}
