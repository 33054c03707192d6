// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe what a sensor observation is,
// which risk labels are valid, and how the pipeline can fail.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only structs, enums, constants and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One row of the sensor dataset + canonical column names
pub mod record;

// Every fatal failure the pipeline can report
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
