use log::debug;

use crate::{
    errors::EngineError,
    tutor::ContextSnapshot,
    types::{CLOCK_PIN, ID},
};

use super::{pulse, BenchAction, Board, Control, Readout, Simulation};

pub const COUNTER_BITS: usize = 4;
pub const COUNTER_MODULUS: i64 = 1 << COUNTER_BITS;

/// 4-bit synchronous up/down counter built from JK flip-flops.
///
/// Every stage shares one clock. Stage `i` toggles when all lower stages
/// are 1 (counting up) or all lower stages are 0 (counting down, `M = 1`):
///
/// ```text
///   T0 = 1
///   Ti = M'·Q0·…·Q(i-1) + M·Q0'·…·Q(i-1)'
/// ```
pub struct CounterBench {
    board: Board,
    clk: ID,
    // least significant first
    stages: [ID; COUNTER_BITS],
    pulses: i64,
    rollovers: i64,
}

impl CounterBench {
    pub fn new() -> Result<Self, EngineError> {
        let mut board = Board::new();
        let m = board.switch("down", "Down (M)", false);
        let ckt = &mut board.ckt;
        let clk = ckt.add_input("CLK", false);
        let one = ckt.add_input("1", true);
        let not_m = ckt.add_gate("NOT", "M'", &[m])?;

        let mut stages = [0; COUNTER_BITS];
        // carry terms into the next stage, up and down
        let mut up = not_m;
        let mut down = m;
        let mut toggle = one;
        for (i, stage) in stages.iter_mut().enumerate() {
            let ff = ckt.add_component("JK", &format!("Q{}", i))?;
            ckt.connect(ff, CLOCK_PIN, clk)?;
            ckt.connect(ff, 1, toggle)?;
            ckt.connect(ff, 2, toggle)?;
            *stage = ff;
            if i + 1 == COUNTER_BITS {
                break;
            }
            let not_q = ckt.add_gate("NOT", &format!("Q{}'", i), &[ff])?;
            up = ckt.add_gate("AND", &format!("up{}", i), &[up, ff])?;
            down = ckt.add_gate("AND", &format!("down{}", i), &[down, not_q])?;
            toggle = ckt.add_gate("OR", &format!("T{}", i + 1), &[up, down])?;
        }
        for ff in stages.iter().rev() {
            ckt.track_output(*ff);
        }
        ckt.power_on()?;
        Ok(CounterBench {
            board,
            clk,
            stages,
            pulses: 0,
            rollovers: 0,
        })
    }

    pub fn count(&self) -> i64 {
        self.stages
            .iter()
            .enumerate()
            .map(|(i, ff)| self.board.level(*ff) << i)
            .sum()
    }

    pub fn counts_down(&self) -> bool {
        self.board.is_high("down")
    }

    fn clock(&mut self) -> Result<(), EngineError> {
        let before = self.count();
        self.board.ckt.pulse_clock(self.clk)?;
        self.pulses += 1;
        let after = self.count();
        let wrapped = if self.counts_down() {
            before == 0 && after == COUNTER_MODULUS - 1
        } else {
            before == COUNTER_MODULUS - 1 && after == 0
        };
        if wrapped {
            self.rollovers += 1;
            debug!("counter rolled over ({} so far)", self.rollovers);
        }
        Ok(())
    }

    // asynchronous clear of every stage
    fn reset(&mut self) -> Result<(), EngineError> {
        for ff in self.stages {
            self.board.ckt.force_state(ff, false)?;
        }
        self.pulses = 0;
        self.rollovers = 0;
        Ok(())
    }
}

impl Simulation for CounterBench {
    fn snapshot(&self) -> ContextSnapshot {
        let mut ctx = ContextSnapshot::new().with("count", self.count());
        for (i, ff) in self.stages.iter().enumerate() {
            ctx.insert(&format!("q{}", i), self.board.level(*ff));
        }
        self.board.record_switches(&mut ctx);
        ctx.insert("pulses", self.pulses);
        ctx.insert("rollovers", self.rollovers);
        ctx
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = self.board.toggles();
        controls.push(pulse("clk", "Clock Pulse"));
        controls.push(pulse("reset", "Reset"));
        controls
    }

    fn apply(&mut self, action: BenchAction) -> Result<(), EngineError> {
        match action {
            BenchAction::Set(key, value) => self.board.set(&key, value),
            BenchAction::Pulse(key) if key == "clk" => self.clock(),
            BenchAction::Pulse(key) if key == "reset" => self.reset(),
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

    fn pulses(bench: &mut CounterBench, n: usize) {
        for _ in 0..n {
            bench.apply(BenchAction::pulse("clk")).unwrap();
        }
    }

    #[test]
    fn counts_up_through_every_value() {
        let mut bench = CounterBench::new().unwrap();
        assert_eq!(bench.count(), 0);
        for expected in 1..COUNTER_MODULUS {
            pulses(&mut bench, 1);
            assert_eq!(bench.count(), expected);
        }
        let ctx = bench.snapshot();
        assert!(ctx.is("q0", 1) && ctx.is("q3", 1));
        assert!(ctx.is("rollovers", 0));
        pulses(&mut bench, 1);
        let ctx = bench.snapshot();
        assert!(ctx.is("count", 0) && ctx.is("rollovers", 1) && ctx.is("pulses", 16));
    }

    #[test]
    fn counts_down_and_wraps() {
        let mut bench = CounterBench::new().unwrap();
        pulses(&mut bench, 3);
        bench.apply(BenchAction::set("down", true)).unwrap();
        pulses(&mut bench, 1);
        assert_eq!(bench.count(), 2);
        pulses(&mut bench, 2);
        assert_eq!(bench.count(), 0);
        pulses(&mut bench, 1);
        assert_eq!(bench.count(), 15);
        assert!(bench.snapshot().is("rollovers", 1));
        assert!(bench.snapshot().is("down", 1));
    }

    #[test]
    fn reset_clears_everything() {
        let mut bench = CounterBench::new().unwrap();
        pulses(&mut bench, 18);
        assert_eq!(bench.count(), 2);
        bench.apply(BenchAction::pulse("reset")).unwrap();
        let ctx = bench.snapshot();
        assert!(ctx.is("count", 0) && ctx.is("pulses", 0) && ctx.is("rollovers", 0));
        // counting resumes normally from zero
        pulses(&mut bench, 5);
        assert_eq!(bench.count(), 5);
    }

    #[test]
    fn readouts_are_msb_first() {
        let mut bench = CounterBench::new().unwrap();
        pulses(&mut bench, 1);
        let labels: Vec<String> = bench.readouts().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Q3", "Q2", "Q1", "Q0"]);
        assert!(bench.readouts()[3].value);
        assert!(bench.apply(BenchAction::select("mode", "up")).is_err());
    }
}
