//! Job search core: filter model, predicate library, pagination engine,
//! response cache, display formatting.

pub mod cache;
pub mod engine;
pub mod format;
pub mod predicates;
pub mod spec;
