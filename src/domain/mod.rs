// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O beyond the Persistable implementations
//   - Only plain structs, enums, and traits

// A labelled training sentence
pub mod example;

// The immutable token-to-id mapping built from the training split
pub mod vocabulary;

// The named error taxonomy shared by every layer
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
