use std::{
    cell::RefCell,
    collections::{HashMap, HashSet, VecDeque},
};

use log::debug;

use crate::{
    bootstrap::bootstrap_ckt,
    components::{ComponentDefParams, Gate},
    errors::EngineError,
    types::{CompType, CLOCK_PIN, ID, MAX_PROPAGATION_STEPS, PIN},
};

pub struct BCircuit {
    pub component_definitions: HashMap<String, ComponentDefParams>,
    components: HashMap<ID, RefCell<Gate>>,
    inputs: HashMap<String, ID>,
    outputs: Vec<ID>,
    last_id: ID,
    exec_queue: VecDeque<ID>,
}

impl Default for BCircuit {
    fn default() -> Self {
        Self::new()
    }
}

impl BCircuit {
    pub fn new() -> BCircuit {
        let mut c = BCircuit {
            component_definitions: HashMap::new(),
            components: HashMap::new(),
            inputs: HashMap::new(),
            outputs: Vec::new(),
            last_id: 0,
            exec_queue: VecDeque::new(),
        };
        bootstrap_ckt(&mut c);
        c
    }
    pub fn define_gate(&mut self, p: ComponentDefParams) {
        self.component_definitions.insert(p.name.clone(), p);
    }
    pub fn add_component(&mut self, typ: &str, label: &str) -> Result<ID, EngineError> {
        let mut def = self
            .component_definitions
            .get(typ)
            .ok_or_else(|| EngineError::UndefinedGate(typ.to_string()))?
            .clone();
        def.label = label.to_string();
        let mut comp = Gate::from_params(def);
        let id = self.new_id();
        comp.id = id;
        debug!("added {}", comp);
        self.components.insert(id, RefCell::new(comp));
        Ok(id)
    }
    pub fn add_input(&mut self, label: &str, init_val: bool) -> ID {
        let mut inp = Gate::make_input(label, init_val);
        let id = self.new_id();
        inp.id = id;
        self.components.insert(id, RefCell::new(inp));
        self.inputs.insert(label.to_string(), id);
        id
    }
    // adds a component and wires `inputs` to its data pins in order
    pub fn add_gate(&mut self, typ: &str, label: &str, inputs: &[ID]) -> Result<ID, EngineError> {
        let id = self.add_component(typ, label)?;
        for (i, emitter) in inputs.iter().enumerate() {
            self.connect(id, i + 1, *emitter)?;
        }
        Ok(id)
    }
    pub fn connect(&mut self, receiver_id: ID, pin: PIN, emitter_id: ID) -> Result<(), EngineError> {
        {
            let receiver = self
                .components
                .get(&receiver_id)
                .ok_or(EngineError::UnknownComponent(receiver_id))?
                .borrow();
            if pin == CLOCK_PIN && !receiver.is_clocked() {
                return Err(EngineError::NotClocked(receiver_id));
            }
            if pin > receiver.num_inputs() {
                return Err(EngineError::PinOutOfRange {
                    pin,
                    available: receiver.num_inputs(),
                });
            }
        }
        self.components
            .get(&emitter_id)
            .ok_or(EngineError::UnknownComponent(emitter_id))?
            .borrow_mut()
            .add_notify(receiver_id, pin);
        Ok(())
    }
    pub fn track_output(&mut self, comp_id: ID) -> bool {
        if !self.components.contains_key(&comp_id) {
            return false;
        }
        if !self.outputs.contains(&comp_id) {
            self.outputs.push(comp_id);
        }
        true
    }
    // (label, level) of every tracked output, in tracking order
    pub fn tracked_states(&self) -> Vec<(String, bool)> {
        self.outputs
            .iter()
            .filter_map(|id| self.components.get(id))
            .map(|c| {
                let c = c.borrow();
                (c.label.clone(), c.state)
            })
            .collect()
    }

    // every component pushes its output to its receivers at least once,
    // after that only changes travel.
    pub fn power_on(&mut self) -> Result<(), EngineError> {
        let mut ids: Vec<ID> = self.components.keys().copied().collect();
        ids.sort();
        self.propagate(ids)
    }
    pub fn set_component_state(&mut self, id: ID, val: bool) -> Result<(), EngineError> {
        {
            let mut comp = self
                .components
                .get(&id)
                .ok_or(EngineError::UnknownComponent(id))?
                .borrow_mut();
            if comp.comp_type != CompType::Input {
                return Err(EngineError::NotAnInput(id));
            }
            if comp.state == val {
                return Ok(());
            }
            comp.state = val;
        }
        self.propagate(vec![id])
    }
    // asynchronous preset/clear, bypasses the clock
    pub fn force_state(&mut self, id: ID, val: bool) -> Result<(), EngineError> {
        {
            let mut comp = self
                .components
                .get(&id)
                .ok_or(EngineError::UnknownComponent(id))?
                .borrow_mut();
            if comp.state == val {
                return Ok(());
            }
            comp.state = val;
            if let Some(mag) = &mut comp.clock_manager {
                mag.reset_clock_hist();
            }
        }
        self.propagate(vec![id])
    }
    pub fn pulse_clock(&mut self, clk_id: ID) -> Result<(), EngineError> {
        self.set_component_state(clk_id, true)?;
        self.set_component_state(clk_id, false)
    }
    pub fn state(&self, id: ID) -> Result<bool, EngineError> {
        self.components
            .get(&id)
            .map(|c| c.borrow().state)
            .ok_or(EngineError::UnknownComponent(id))
    }
    pub fn input_id(&self, label: &str) -> Option<ID> {
        self.inputs.get(label).copied()
    }
    fn new_id(&mut self) -> ID {
        self.last_id += 1;
        self.last_id
    }

    // breadth-first from the seeds. the FIFO order makes every element on a
    // shared clock sample its pins before any of them publishes a new state.
    fn propagate(&mut self, seeds: Vec<ID>) -> Result<(), EngineError> {
        let must_emit: HashSet<ID> = seeds.iter().copied().collect();
        self.exec_queue.extend(seeds);
        match self.run_queue(must_emit) {
            Ok(steps) => {
                debug!("circuit settled after {} updates", steps);
                Ok(())
            }
            Err(e) => {
                // nothing left over for the next input change to pick up
                self.exec_queue.clear();
                Err(e)
            }
        }
    }

    fn run_queue(&mut self, mut must_emit: HashSet<ID>) -> Result<usize, EngineError> {
        let mut steps = 0;
        while let Some(id) = self.exec_queue.pop_front() {
            steps += 1;
            if steps > MAX_PROPAGATION_STEPS {
                return Err(EngineError::Unstable(MAX_PROPAGATION_STEPS));
            }
            let (state, receivers) = {
                let mut gate = self
                    .components
                    .get(&id)
                    .ok_or(EngineError::UnknownComponent(id))?
                    .borrow_mut();
                let changed = gate.update();
                // remove() must run even when the state changed
                if !(must_emit.remove(&id) | changed) {
                    continue;
                }
                (gate.state, gate.get_output_receivers().to_vec())
            };
            for (rid, pin) in receivers {
                self.components
                    .get(&rid)
                    .ok_or(EngineError::UnknownComponent(rid))?
                    .borrow_mut()
                    .set_pin_val(pin, state)?;
                // same id twice in a row needs one update only
                if self.exec_queue.back() != Some(&rid) {
                    self.exec_queue.push_back(rid);
                }
            }
        }
        Ok(steps)
    }
}
