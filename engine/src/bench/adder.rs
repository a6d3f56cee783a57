use crate::{errors::EngineError, tutor::ContextSnapshot, types::ID};

use super::{choice, pick, BenchAction, Board, Control, Readout, Simulation};

pub const HALF_ADDER: &str = "Half Adder";
pub const FULL_ADDER: &str = "Full Adder";
pub const ADDER_KINDS: [&str; 2] = [HALF_ADDER, FULL_ADDER];

pub struct AdderBench {
    kind: String,
    board: Board,
    sum: ID,
    carry: ID,
}

impl AdderBench {
    pub fn new() -> Result<Self, EngineError> {
        Self::build(HALF_ADDER, [false; 3])
    }

    // half: S = A^B, C = AB
    // full: S = A^B^Cin, Cout = AB + Cin(A^B)
    fn build(kind: &str, levels: [bool; 3]) -> Result<Self, EngineError> {
        let mut board = Board::new();
        let a = board.switch("a", "A", levels[0]);
        let b = board.switch("b", "B", levels[1]);
        let (sum, carry) = if kind == FULL_ADDER {
            let cin = board.switch("cin", "Cin", levels[2]);
            let ckt = &mut board.ckt;
            let half = ckt.add_gate("XOR", "A^B", &[a, b])?;
            let sum = ckt.add_gate("XOR", "Sum", &[half, cin])?;
            let ab = ckt.add_gate("AND", "AB", &[a, b])?;
            let c_half = ckt.add_gate("AND", "Cin(A^B)", &[half, cin])?;
            let carry = ckt.add_gate("OR", "Cout", &[ab, c_half])?;
            (sum, carry)
        } else {
            let ckt = &mut board.ckt;
            let sum = ckt.add_gate("XOR", "Sum", &[a, b])?;
            let carry = ckt.add_gate("AND", "Carry", &[a, b])?;
            (sum, carry)
        };
        board.ckt.track_output(sum);
        board.ckt.track_output(carry);
        board.ckt.power_on()?;
        Ok(AdderBench {
            kind: kind.to_string(),
            board,
            sum,
            carry,
        })
    }

    pub fn is_full(&self) -> bool {
        self.kind == FULL_ADDER
    }
}

impl Simulation for AdderBench {
    fn snapshot(&self) -> ContextSnapshot {
        let mut ctx = ContextSnapshot::new().with("circuit_type", self.kind.as_str());
        self.board.record_switches(&mut ctx);
        ctx.insert("sum", self.board.level(self.sum));
        ctx.insert("carry", self.board.level(self.carry));
        ctx
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = vec![choice("circuit_type", "Circuit", &ADDER_KINDS, &self.kind)];
        controls.extend(self.board.toggles());
        controls
    }

    fn apply(&mut self, action: BenchAction) -> Result<(), EngineError> {
        match action {
            BenchAction::Select(key, option) if key == "circuit_type" => {
                let kind = pick(&key, &ADDER_KINDS, &option)?;
                if kind != self.kind {
                    let levels = [
                        self.board.is_high("a"),
                        self.board.is_high("b"),
                        self.board.is_high("cin"),
                    ];
                    *self = Self::build(&kind, levels)?;
                }
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
