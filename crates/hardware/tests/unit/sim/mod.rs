pub mod journal;
pub mod observer;
pub mod simulator;
pub mod single_cycle;
