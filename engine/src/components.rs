use std::fmt;

use crate::{
    clock_manager::ClockManager,
    errors::EngineError,
    types::{BinaryLogicReducer, CompType, CLOCK_PIN, ID, NULL, PIN},
};

#[derive(Clone)]
pub struct ComponentDefParams {
    pub name: String,
    pub label: String,
    pub comp_type: CompType,
    pub eval: BinaryLogicReducer,
    pub default_inputs: u16,
}

pub struct Gate {
    pub name: String,
    pub id: ID,
    pub comp_type: CompType,
    pub label: String,
    eval: BinaryLogicReducer,
    pub state: bool,
    output_recvlist: Vec<(ID, PIN)>,
    pub n_inp: u16,
    // index 0 mirrors the clock level, data pins start at 1
    in_pins: Vec<bool>,
    pub clock_manager: Option<ClockManager>,
}

impl Gate {
    pub fn from_params(p: ComponentDefParams) -> Gate {
        let mut c = Gate {
            name: p.name.clone(),
            id: NULL,
            comp_type: p.comp_type,
            label: p.label.to_owned(),
            eval: p.eval,
            state: false,
            output_recvlist: Vec::new(),
            n_inp: p.default_inputs,
            in_pins: vec![false; p.default_inputs as usize + 1],
            clock_manager: None,
        };
        match c.comp_type {
            // sound initial assumption: every pin starts low
            CompType::Combinational => c.state = (c.eval)(&c.in_pins, false),
            CompType::Sequential => c.clock_manager = Some(ClockManager::new()),
            CompType::Input => {}
        }
        c
    }
    pub fn make_input(lab: &str, init: bool) -> Gate {
        // the eval function will not be called on input elements
        let mut c = Gate::from_params(ComponentDefParams {
            name: String::from("Input"),
            label: lab.to_owned(),
            eval: |_, q| q,
            default_inputs: 0,
            comp_type: CompType::Input,
        });
        c.state = init;
        c
    }
    pub fn add_notify(&mut self, target_id: ID, n_pin: PIN) {
        self.output_recvlist.push((target_id, n_pin));
    }
    pub fn get_output_receivers(&self) -> &[(ID, PIN)] {
        &self.output_recvlist
    }
    pub fn num_inputs(&self) -> usize {
        self.n_inp as usize
    }
    pub fn is_clocked(&self) -> bool {
        self.clock_manager.is_some()
    }

    pub fn set_pin_val(&mut self, pin: PIN, val: bool) -> Result<(), EngineError> {
        if pin == CLOCK_PIN {
            match &mut self.clock_manager {
                Some(k) => k.push(val),
                None => return Err(EngineError::NotClocked(self.id)),
            }
        } else if pin > self.num_inputs() {
            return Err(EngineError::PinOutOfRange {
                pin,
                available: self.num_inputs(),
            });
        }
        self.in_pins[pin] = val;
        Ok(())
    }

    // recomputes the output from the current pins and reports whether
    // it changed. sequential components only move on a clock edge.
    pub fn update(&mut self) -> bool {
        let old_state = self.state;
        match self.comp_type {
            CompType::Input => return false,
            CompType::Combinational => {
                self.state = (self.eval)(&self.in_pins, old_state);
            }
            CompType::Sequential => {
                if let Some(mag) = &mut self.clock_manager {
                    if mag.clock_triggered() {
                        mag.reset_clock_hist();
                        self.state = (self.eval)(&self.in_pins, old_state);
                    }
                }
            }
        }
        self.state != old_state
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' ({} input{}) - {}",
            self.name,
            self.label,
            self.n_inp,
            if self.n_inp == 1 { "" } else { "s" },
            if self.state { "ON" } else { "OFF" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_params() -> ComponentDefParams {
        ComponentDefParams {
            name: "AND".into(),
            label: "g".into(),
            comp_type: CompType::Combinational,
            eval: |v, _| v[1] && v[2],
            default_inputs: 2,
        }
    }

    #[test]
    fn combinational_update_reports_change() {
        let mut g = Gate::from_params(and_params());
        assert!(!g.state);
        g.set_pin_val(1, true).unwrap();
        assert!(!g.update());
        g.set_pin_val(2, true).unwrap();
        assert!(g.update());
        assert!(g.state);
    }

    #[test]
    fn rejects_bad_pins() {
        let mut g = Gate::from_params(and_params());
        assert_eq!(
            g.set_pin_val(3, true),
            Err(EngineError::PinOutOfRange {
                pin: 3,
                available: 2
            })
        );
        assert_eq!(g.set_pin_val(CLOCK_PIN, true), Err(EngineError::NotClocked(NULL)));
    }

    #[test]
    fn input_keeps_its_level() {
        let mut i = Gate::make_input("A", true);
        assert!(!i.update());
        assert!(i.state);
        assert_eq!(i.to_string(), "Input 'A' (0 inputs) - ON");
    }
}
