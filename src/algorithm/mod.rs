/// Fixed-capacity candidate tile sets
pub mod bitset;
/// Observable events and per-step results
pub mod events;
/// Wave function state machine and retry loop
pub mod executor;
/// Exhaustive and incremental constraint propagation
pub mod propagation;
/// Lowest-entropy cell selection
pub mod selection;
