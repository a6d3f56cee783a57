use crate::{
    errors::EngineError,
    tutor::ContextSnapshot,
    types::ID,
};

use super::{choice, pick, BenchAction, Board, Control, Readout, Simulation};

pub const GATE_KINDS: [&str; 6] = ["AND", "OR", "NOT", "NAND", "NOR", "XOR"];

// a single gate between two switches and a lamp
pub struct GateBench {
    kind: String,
    board: Board,
    out: ID,
}

impl GateBench {
    pub fn new() -> Result<Self, EngineError> {
        Self::build("AND", false, false)
    }

    fn build(kind: &str, a: bool, b: bool) -> Result<Self, EngineError> {
        let mut board = Board::new();
        let ia = board.switch("in_a", "A", a);
        let mut pins = vec![ia];
        if kind != "NOT" {
            pins.push(board.switch("in_b", "B", b));
        }
        let out = board.ckt.add_gate(kind, "Out", &pins)?;
        board.ckt.track_output(out);
        board.ckt.power_on()?;
        Ok(GateBench {
            kind: kind.to_string(),
            board,
            out,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl Simulation for GateBench {
    fn snapshot(&self) -> ContextSnapshot {
        let mut ctx = ContextSnapshot::new().with("gate", self.kind.as_str());
        self.board.record_switches(&mut ctx);
        ctx.insert("out", self.board.level(self.out));
        ctx
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = vec![choice("gate", "Logic Gate", &GATE_KINDS, &self.kind)];
        controls.extend(self.board.toggles());
        controls
    }

    fn apply(&mut self, action: BenchAction) -> Result<(), EngineError> {
        match action {
            BenchAction::Select(key, option) if key == "gate" => {
                let kind = pick(&key, &GATE_KINDS, &option)?;
                // inputs keep their levels across a gate swap
                let a = self.board.is_high("in_a");
                let b = self.board.is_high("in_b");
                *self = Self::build(&kind, a, b)?;
                Ok(())
            }
            BenchAction::Set(key, value) => self.board.set(&key, value),
            other => Err(EngineError::UnknownControl(other.key().to_string())),
        }
    }

    fn readouts(&self) -> Vec<Readout> {
        self.board.readouts()
    }
}
