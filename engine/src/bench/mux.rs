use crate::{errors::EngineError, tutor::ContextSnapshot, types::ID};

use super::{BenchAction, Board, Control, Readout, Simulation};

// data lines start out as 1 0 1 0 so that every select value shows a change
pub const DEFAULT_DATA: [bool; 4] = [true, false, true, false];

/// 4:1 multiplexer from a 2:4 decoder, four AND gates and an OR tree.
pub struct MuxBench {
    board: Board,
    output: ID,
}

impl MuxBench {
    pub fn new() -> Result<Self, EngineError> {
        let mut board = Board::new();
        let mut data = [0; 4];
        for (i, d) in data.iter_mut().enumerate() {
            *d = board.switch(&format!("d{}", i), &format!("D{}", i), DEFAULT_DATA[i]);
        }
        let s1 = board.switch("s1", "S1", false);
        let s0 = board.switch("s0", "S0", false);

        let ckt = &mut board.ckt;
        let ns1 = ckt.add_gate("NOT", "S1'", &[s1])?;
        let ns0 = ckt.add_gate("NOT", "S0'", &[s0])?;
        let selects = [
            ckt.add_gate("AND", "S1'S0'", &[ns1, ns0])?,
            ckt.add_gate("AND", "S1'S0", &[ns1, s0])?,
            ckt.add_gate("AND", "S1S0'", &[s1, ns0])?,
            ckt.add_gate("AND", "S1S0", &[s1, s0])?,
        ];
        let mut terms = [0; 4];
        for i in 0..4 {
            terms[i] = ckt.add_gate("AND", &format!("T{}", i), &[data[i], selects[i]])?;
        }
        let low = ckt.add_gate("OR", "T0+T1", &[terms[0], terms[1]])?;
        let high = ckt.add_gate("OR", "T2+T3", &[terms[2], terms[3]])?;
        let output = ckt.add_gate("OR", "Y", &[low, high])?;
        ckt.track_output(output);
        ckt.power_on()?;
        Ok(MuxBench { board, output })
    }

    pub fn selected_line(&self) -> usize {
        ((self.board.is_high("s1") as usize) << 1) | self.board.is_high("s0") as usize
    }
}

impl Simulation for MuxBench {
    fn snapshot(&self) -> ContextSnapshot {
        let mut ctx = ContextSnapshot::new();
        self.board.record_switches(&mut ctx);
        ctx.insert("output", self.board.level(self.output));
        ctx
    }

    fn controls(&self) -> Vec<Control> {
        self.board.toggles()
    }

    fn apply(&mut self, action: BenchAction) -> Result<(), EngineError> {
        match action {
            BenchAction::Set(key, value) => self.board.set(&key, value),
            other => Err(EngineError::UnknownControl(other.key().to_string())),
        }
    }

    fn readouts(&self) -> Vec<Readout> {
        self.board.readouts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(bench: &mut MuxBench, line: usize) {
        bench.apply(BenchAction::set("s1", line & 2 != 0)).unwrap();
        bench.apply(BenchAction::set("s0", line & 1 != 0)).unwrap();
    }

    #[test]
    fn defaults() {
        let bench = MuxBench::new().unwrap();
        let ctx = bench.snapshot();
        for (i, v) in [1, 0, 1, 0].iter().enumerate() {
            assert!(ctx.is(&format!("d{}", i), *v));
        }
        assert!(ctx.is("s1", 0) && ctx.is("s0", 0));
        assert!(ctx.is("output", 1));
        assert_eq!(bench.controls().len(), 6);
    }

    #[test]
    fn output_follows_selected_line() {
        let mut bench = MuxBench::new().unwrap();
        for line in 0..4 {
            select(&mut bench, line);
            assert_eq!(bench.selected_line(), line);
            let ctx = bench.snapshot();
            assert_eq!(
                ctx.int("output").unwrap(),
                ctx.int(&format!("d{}", line)).unwrap()
            );
        }
        // changing an unselected line leaves the output alone
        select(&mut bench, 1);
        bench.apply(BenchAction::set("d3", true)).unwrap();
        assert!(bench.snapshot().is("output", 0));
        bench.apply(BenchAction::set("d1", true)).unwrap();
        assert!(bench.snapshot().is("output", 1));
    }

    #[test]
    fn no_choices_or_pulses() {
        let mut bench = MuxBench::new().unwrap();
        assert!(bench.apply(BenchAction::pulse("clk")).is_err());
        assert!(bench.apply(BenchAction::select("gate", "AND")).is_err());
    }
}
