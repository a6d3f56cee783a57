use crate::{
    errors::EngineError,
    tutor::ContextSnapshot,
    types::{CLOCK_PIN, ID},
};

use super::{bit, choice, pick, pulse, BenchAction, Board, Control, Readout, Simulation};

pub const FLIP_FLOP_KINDS: [&str; 4] = ["SR", "JK", "D", "T"];

// (key, label) of the data inputs of each kind, in pin order
fn data_inputs(kind: &str) -> &'static [(&'static str, &'static str)] {
    match kind {
        "SR" => &[("s", "S"), ("r", "R")],
        "JK" => &[("j", "J"), ("k", "K")],
        "D" => &[("d", "D")],
        _ => &[("t", "T")],
    }
}

/// One edge-triggered flip-flop with its complement output and a manual
/// clock button.
pub struct FlipFlopBench {
    kind: String,
    board: Board,
    clk: ID,
    q: ID,
    q_bar: ID,
    // set by a clock pulse, cleared by the next input change
    pulsed: bool,
}

impl FlipFlopBench {
    pub fn new() -> Result<Self, EngineError> {
        Self::build("SR")
    }

    fn build(kind: &str) -> Result<Self, EngineError> {
        let mut board = Board::new();
        let pins: Vec<ID> = data_inputs(kind)
            .iter()
            .map(|(key, label)| board.switch(key, label, false))
            .collect();
        let ckt = &mut board.ckt;
        let clk = ckt.add_input("CLK", false);
        let q = ckt.add_gate(kind, "Q", &pins)?;
        ckt.connect(q, CLOCK_PIN, clk)?;
        let q_bar = ckt.add_gate("NOT", "Q'", &[q])?;
        ckt.track_output(q);
        ckt.track_output(q_bar);
        ckt.power_on()?;
        Ok(FlipFlopBench {
            kind: kind.to_string(),
            board,
            clk,
            q,
            q_bar,
            pulsed: false,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    // S = R = 1 on an SR flip-flop
    pub fn is_invalid(&self) -> bool {
        self.kind == "SR" && self.board.is_high("s") && self.board.is_high("r")
    }
}

impl Simulation for FlipFlopBench {
    fn snapshot(&self) -> ContextSnapshot {
        let mut ctx = ContextSnapshot::new().with("ff_type", self.kind.as_str());
        self.board.record_switches(&mut ctx);
        ctx.insert("q", self.board.level(self.q));
        ctx.insert("q_bar", self.board.level(self.q_bar));
        ctx.insert("clk_pulsed", bit(self.pulsed));
        ctx.insert("invalid", self.is_invalid());
        ctx
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = vec![choice("ff_type", "Flip-Flop", &FLIP_FLOP_KINDS, &self.kind)];
        controls.extend(self.board.toggles());
        controls.push(pulse("clk", "Clock Pulse"));
        controls
    }

    fn apply(&mut self, action: BenchAction) -> Result<(), EngineError> {
        match action {
            BenchAction::Select(key, option) if key == "ff_type" => {
                let kind = pick(&key, &FLIP_FLOP_KINDS, &option)?;
                *self = Self::build(&kind)?;
                Ok(())
            }
            BenchAction::Set(key, value) => {
                self.board.set(&key, value)?;
                self.pulsed = false;
                Ok(())
            }
            BenchAction::Pulse(key) if key == "clk" => {
                self.board.ckt.pulse_clock(self.clk)?;
                self.pulsed = true;
                Ok(())
            }
            other => Err(EngineError::UnknownControl(other.key().to_string())),
        }
    }

    fn readouts(&self) -> Vec<Readout> {
        self.board.readouts()
    }
}
