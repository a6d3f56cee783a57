// pins are 1-indexed for data inputs; pin 0 is reserved for the clock
pub type BinaryLogicReducer = fn(&[bool], bool) -> bool;

pub type ID = i32;
pub type PIN = usize;

pub const CLOCK_PIN: PIN = 0;
pub const NULL: ID = -1;

// upper bound on component updates in one propagation wave
pub const MAX_PROPAGATION_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompType {
    Input,
    Combinational,
    Sequential,
}
