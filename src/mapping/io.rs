use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::mapping::{Model, Registry, Result, Value, from_json, from_json_auto, to_json};

/// Encode a model instance as compact JSON text.
pub fn to_string<T: Model>(model: &T) -> Result<String> {
	Ok(serde_json::to_string(&to_json(model)?)?)
}

/// Encode a model instance as indented JSON text.
pub fn to_string_pretty<T: Model>(model: &T) -> Result<String> {
	Ok(serde_json::to_string_pretty(&to_json(model)?)?)
}

/// Encode a model instance as JSON into a writer.
pub fn to_writer<T: Model, W: Write>(writer: W, model: &T) -> Result<()> {
	let json = to_json(model)?;
	let mut writer = BufWriter::new(writer);
	serde_json::to_writer(&mut writer, &json)?;
	writer.flush()?;
	Ok(())
}

/// Decode JSON text into `T`.
pub fn from_str<T: Model>(registry: &Registry, text: &str) -> Result<T> {
	let json: serde_json::Value = serde_json::from_str(text)?;
	from_json(registry, &json)
}

/// Decode JSON read from `reader` into `T`.
pub fn from_reader<T: Model, R: Read>(registry: &Registry, reader: R) -> Result<T> {
	let json: serde_json::Value = serde_json::from_reader(BufReader::new(reader))?;
	from_json(registry, &json)
}

/// Decode JSON text, detecting model types.
pub fn from_str_auto(registry: &Registry, text: &str) -> Result<Value> {
	let json: serde_json::Value = serde_json::from_str(text)?;
	from_json_auto(registry, &json)
}

/// Decode JSON read from `reader`, detecting model types.
pub fn from_reader_auto<R: Read>(registry: &Registry, reader: R) -> Result<Value> {
	let json: serde_json::Value = serde_json::from_reader(BufReader::new(reader))?;
	from_json_auto(registry, &json)
}

/// Write a model instance as JSON to a file, replacing it.
pub fn write_file<T: Model>(path: impl AsRef<Path>, model: &T) -> Result<()> {
	to_writer(File::create(path)?, model)
}

/// Read a JSON file and decode it into `T`.
pub fn read_file<T: Model>(registry: &Registry, path: impl AsRef<Path>) -> Result<T> {
	from_reader(registry, File::open(path)?)
}
