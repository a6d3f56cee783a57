//! Simulation and tutoring core of the digital logic lab.
//!
//! [`circuit::BCircuit`] simulates gates and clocked flip-flops, the
//! [`bench`] module wraps small circuits into interactive experiments, and
//! [`tutor::StepTutor`] walks a learner through each experiment's script.

pub mod bench;
pub mod circuit;
pub mod clock_manager;
pub mod components;
pub mod curriculum;
pub mod errors;
pub mod tutor;
pub mod types;
mod bootstrap;
