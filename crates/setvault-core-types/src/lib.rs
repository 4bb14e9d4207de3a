//! Core types shared across setvault facilities
//!
//! Holds the event names emitted by the structured logging macros and the
//! field keys read back by the test capture layer.

pub mod schema;
