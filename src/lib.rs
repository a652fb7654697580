//! Declarative mapping between model object graphs and JSON.
//!
//! Model types declare their fields once; the engine encodes instances into
//! `serde_json` trees and reconstructs typed instances from them, detecting the
//! model type of loose JSON objects through a [`mapping::Registry`].

pub mod mapping;
