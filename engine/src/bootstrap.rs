use crate::{circuit::BCircuit, components::ComponentDefParams, types::CompType};

fn gate(name: &str, inputs: u16, eval: fn(&[bool], bool) -> bool) -> ComponentDefParams {
    ComponentDefParams {
        name: name.to_string(),
        label: String::new(),
        comp_type: CompType::Combinational,
        eval,
        default_inputs: inputs,
    }
}

fn flip_flop(name: &str, inputs: u16, eval: fn(&[bool], bool) -> bool) -> ComponentDefParams {
    ComponentDefParams {
        name: name.to_string(),
        label: String::new(),
        comp_type: CompType::Sequential,
        eval,
        default_inputs: inputs,
    }
}

pub(crate) fn bootstrap_ckt(c: &mut BCircuit) {
    c.define_gate(gate("AND", 2, |v, _| v[1] && v[2]));
    c.define_gate(gate("OR", 2, |v, _| v[1] || v[2]));
    c.define_gate(gate("NAND", 2, |v, _| !(v[1] && v[2])));
    c.define_gate(gate("NOR", 2, |v, _| !(v[1] || v[2])));
    c.define_gate(gate("XOR", 2, |v, _| v[1] != v[2]));
    c.define_gate(gate("XNOR", 2, |v, _| v[1] == v[2]));
    c.define_gate(gate("NOT", 1, |v, _| !v[1]));
    // buffer
    c.define_gate(gate("BFR", 1, |v, _| v[1]));

    c.define_gate(flip_flop("JK", 2, |v, q| {
        let j = v[1];
        let k = v[2];
        (j && !q) || (!k && q)
    }));
    // S = R = 1 is forbidden; the element simply holds
    c.define_gate(flip_flop("SR", 2, |v, q| match (v[1], v[2]) {
        (true, false) => true,
        (false, true) => false,
        _ => q,
    }));
    c.define_gate(flip_flop("D", 1, |v, _| v[1]));
    c.define_gate(flip_flop("T", 1, |v, q| v[1] != q));
}
