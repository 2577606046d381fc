


/// Field extraction, immediates and the encoding table.
pub mod isa;

/// Executors, simulator facade, journal, loader, breakpoints, observers.
pub mod sim;


/// Statistics counters and reports.
pub mod stats;
