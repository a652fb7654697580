//! Field declarations, type resolution and the encode/decode engine.

mod error;
mod field;
mod io;
mod model;
mod normalize;
mod reconstruct;
mod registry;
mod resolve;
mod schema;
mod temporal;
mod value;

#[cfg(test)]
mod test_support;

/// Error and result aliases.
pub use error::{ErrorKind, MapError, Result};
/// Field declaration types.
pub use field::{FieldDescriptor, FieldMode, FieldOptions, FieldShape, Fields};
/// Text, reader, writer and file wrappers.
pub use io::{from_reader, from_reader_auto, from_str, from_str_auto, read_file, to_string, to_string_pretty, to_writer, write_file};
/// Model traits and the cached per-type field registry.
pub use model::{Model, ModelObject, ModelType};
/// Encode entry points and options.
pub use normalize::{EncodeOptions, normalize, to_json, to_json_with};
/// Decode entry points and options.
pub use reconstruct::{DecodeOptions, from_json, from_json_auto, from_json_with, reconstruct};
/// Set of types visible to auto-detection.
pub use registry::Registry;
/// Structural type matching.
pub use resolve::{Resolution, resolve};
/// Serializable field registry summaries.
pub use schema::{FieldSchema, ModelSchema};
/// ISO-8601 codec.
pub use temporal::{Temporal, format_date, format_datetime, format_offset_datetime, parse as parse_temporal};
/// In-memory value types.
pub use value::{FromValue, Opaque, Value};
