use serde_json::Value as JsonValue;

use crate::mapping::temporal::{format_date, format_datetime, format_offset_datetime};
use crate::mapping::{MapError, Model, ModelObject, Result, Value};

/// Runtime limits for encoding.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
	/// Maximum nesting depth of containers and model instances.
	pub max_depth: u32,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self { max_depth: 512 }
	}
}

/// Encode a model instance with default options.
pub fn to_json<T: Model>(model: &T) -> Result<JsonValue> {
	to_json_with(model, &EncodeOptions::default())
}

/// Encode a model instance into a JSON tree.
pub fn to_json_with<T: Model>(model: &T, options: &EncodeOptions) -> Result<JsonValue> {
	normalize_model(model, options, 0)
}

/// Convert an in-memory value into a JSON tree.
///
/// Model instances emit every encodable field, `null` included. Opaque host values
/// and non-finite floats are rejected wherever they occur.
pub fn normalize(value: &Value, options: &EncodeOptions) -> Result<JsonValue> {
	normalize_impl(value, options, 0)
}

fn normalize_impl(value: &Value, opt: &EncodeOptions, depth: u32) -> Result<JsonValue> {
	if depth >= opt.max_depth {
		return Err(MapError::DepthExceeded { max_depth: opt.max_depth });
	}

	let json = match value {
		Value::Null => JsonValue::Null,
		Value::Bool(flag) => JsonValue::Bool(*flag),
		Value::Int(number) => JsonValue::from(*number),
		Value::UInt(number) => JsonValue::from(*number),
		Value::Float(number) => serde_json::Number::from_f64(*number)
			.map(JsonValue::Number)
			.ok_or(MapError::NonFiniteNumber { value: *number })?,
		Value::String(text) => JsonValue::String(text.clone()),
		Value::List(items) => JsonValue::Array(
			items
				.iter()
				.map(|item| normalize_impl(item, opt, depth + 1))
				.collect::<Result<_>>()?,
		),
		Value::Map(entries) => JsonValue::Object(
			entries
				.iter()
				.map(|(key, item)| Ok((key.clone(), normalize_impl(item, opt, depth + 1)?)))
				.collect::<Result<_>>()?,
		),
		Value::Object(model) => normalize_model(model.as_ref(), opt, depth)?,
		Value::Date(date) => JsonValue::String(format_date(*date)?),
		Value::DateTime(datetime) => JsonValue::String(format_datetime(*datetime)?),
		Value::OffsetDateTime(datetime) => JsonValue::String(format_offset_datetime(*datetime)?),
		Value::Opaque(opaque) => {
			return Err(MapError::UnsupportedType {
				type_name: opaque.type_name(),
			});
		}
	};
	Ok(json)
}

fn normalize_model(model: &dyn ModelObject, opt: &EncodeOptions, depth: u32) -> Result<JsonValue> {
	let model_type = model.model_type();
	model_type.ensure_fields()?;

	let mut out = serde_json::Map::new();
	for field in model_type.fields().iter().filter(|field| field.mode().encodes()) {
		let value = field.read(model)?;
		out.insert(field.name().to_owned(), normalize_impl(&value, opt, depth + 1)?);
	}
	Ok(JsonValue::Object(out))
}
