//! Interactive circuits that experiments are run on.
//!
//! A bench owns a [`BCircuit`], tells the UI which controls it offers,
//! applies the learner's actions to the circuit and reports what the
//! circuit shows as a [`ContextSnapshot`] for the tutor.

pub mod adder;
pub mod counter;
pub mod flip_flop;
pub mod gates;
pub mod mux;

use crate::{
    circuit::BCircuit,
    errors::EngineError,
    tutor::ContextSnapshot,
    types::ID,
};

pub use adder::AdderBench;
pub use counter::CounterBench;
pub use flip_flop::FlipFlopBench;
pub use gates::GateBench;
pub use mux::MuxBench;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Toggle {
        key: String,
        label: String,
        value: bool,
    },
    Choice {
        key: String,
        label: String,
        options: Vec<String>,
        selected: String,
    },
    Pulse {
        key: String,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchAction {
    Set(String, bool),
    Select(String, String),
    Pulse(String),
}

impl BenchAction {
    pub fn set(key: &str, value: bool) -> Self {
        BenchAction::Set(key.to_string(), value)
    }
    pub fn select(key: &str, option: &str) -> Self {
        BenchAction::Select(key.to_string(), option.to_string())
    }
    pub fn pulse(key: &str) -> Self {
        BenchAction::Pulse(key.to_string())
    }
    pub fn key(&self) -> &str {
        match self {
            BenchAction::Set(k, _) | BenchAction::Select(k, _) | BenchAction::Pulse(k) => k,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub label: String,
    pub value: bool,
}

/// The simulation side of an experiment page.
pub trait Simulation {
    fn snapshot(&self) -> ContextSnapshot;
    fn controls(&self) -> Vec<Control>;
    fn apply(&mut self, action: BenchAction) -> Result<(), EngineError>;
    // output levels worth showing next to the controls
    fn readouts(&self) -> Vec<Readout>;
}

pub(crate) fn bit(v: bool) -> i64 {
    v as i64
}

pub(crate) fn choice(key: &str, label: &str, options: &[&str], selected: &str) -> Control {
    Control::Choice {
        key: key.to_string(),
        label: label.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        selected: selected.to_string(),
    }
}

pub(crate) fn pulse(key: &str, label: &str) -> Control {
    Control::Pulse {
        key: key.to_string(),
        label: label.to_string(),
    }
}

pub(crate) fn pick(control: &str, options: &[&str], option: &str) -> Result<String, EngineError> {
    if options.contains(&option) {
        Ok(option.to_string())
    } else {
        Err(EngineError::InvalidOption {
            control: control.to_string(),
            option: option.to_string(),
        })
    }
}

struct Switch {
    key: String,
    label: String,
    id: ID,
}

// a circuit plus the learner-operated input switches wired into it
pub(crate) struct Board {
    pub ckt: BCircuit,
    switches: Vec<Switch>,
}

impl Board {
    pub fn new() -> Board {
        Board {
            ckt: BCircuit::new(),
            switches: Vec::new(),
        }
    }
    pub fn switch(&mut self, key: &str, label: &str, init: bool) -> ID {
        let id = self.ckt.add_input(label, init);
        self.switches.push(Switch {
            key: key.to_string(),
            label: label.to_string(),
            id,
        });
        id
    }
    pub fn set(&mut self, key: &str, value: bool) -> Result<(), EngineError> {
        let id = self
            .switches
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.id)
            .ok_or_else(|| EngineError::UnknownControl(key.to_string()))?;
        self.ckt.set_component_state(id, value)
    }
    pub fn level(&self, id: ID) -> i64 {
        self.ckt.state(id).map(bit).unwrap_or(0)
    }
    pub fn is_high(&self, key: &str) -> bool {
        self.switches
            .iter()
            .find(|s| s.key == key)
            .map(|s| self.level(s.id) == 1)
            .unwrap_or(false)
    }
    pub fn toggles(&self) -> Vec<Control> {
        self.switches
            .iter()
            .map(|s| Control::Toggle {
                key: s.key.clone(),
                label: s.label.clone(),
                value: self.level(s.id) == 1,
            })
            .collect()
    }
    // switch levels keyed the way criteria read them
    pub fn record_switches(&self, ctx: &mut ContextSnapshot) {
        for s in &self.switches {
            ctx.insert(&s.key, self.level(s.id));
        }
    }
    pub fn readouts(&self) -> Vec<Readout> {
        self.ckt
            .tracked_states()
            .into_iter()
            .map(|(label, value)| Readout { label, value })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_switches_drive_the_circuit() {
        let mut b = Board::new();
        let a = b.switch("a", "A", false);
        let n = b.ckt.add_gate("NOT", "Y", &[a]).unwrap();
        b.ckt.track_output(n);
        b.ckt.power_on().unwrap();
        assert_eq!(b.readouts(), vec![Readout { label: "Y".into(), value: true }]);
        b.set("a", true).unwrap();
        assert!(b.is_high("a"));
        assert_eq!(b.level(n), 0);
        assert_eq!(
            b.set("z", true),
            Err(EngineError::UnknownControl("z".into()))
        );
        let mut ctx = ContextSnapshot::new();
        b.record_switches(&mut ctx);
        assert!(ctx.is("a", 1));
    }

    #[test]
    fn pick_validates_options() {
        assert_eq!(pick("gate", &["AND", "OR"], "OR"), Ok("OR".to_string()));
        assert!(pick("gate", &["AND", "OR"], "MUX").is_err());
        assert_eq!(BenchAction::pulse("clk").key(), "clk");
    }
}
