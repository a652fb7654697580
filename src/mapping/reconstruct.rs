use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::mapping::resolve::{Resolution, resolve};
use crate::mapping::temporal;
use crate::mapping::{FieldShape, MapError, Model, ModelType, Registry, Result, Value};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of containers and model instances.
	pub max_depth: u32,
	/// Turn ISO-8601 looking strings into temporal values.
	pub detect_temporal: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 512,
			detect_temporal: true,
		}
	}
}

/// Decode a JSON tree into `T` with default options.
pub fn from_json<T: Model>(registry: &Registry, json: &JsonValue) -> Result<T> {
	from_json_with(registry, json, &DecodeOptions::default())
}

/// Decode a JSON tree into `T`.
///
/// Nested objects under fields declared with [`FieldShape::Model`] decode into that
/// type; other nested objects are resolved through `registry`.
pub fn from_json_with<T: Model>(registry: &Registry, json: &JsonValue, options: &DecodeOptions) -> Result<T> {
	let target = ModelType::of::<T>();
	reconstruct(registry, &Value::from(json), Some(&target), options)?.into_model::<T>()
}

/// Decode a JSON tree, detecting the model type of every object.
pub fn from_json_auto(registry: &Registry, json: &JsonValue) -> Result<Value> {
	reconstruct(registry, &Value::from(json), None, &DecodeOptions::default())
}

/// Rebuild an in-memory value from its JSON-shaped form.
///
/// With a `target` the value must be a map carrying at least one of the target's
/// field names. Without one, a top-level map must resolve to a registered type and
/// anything else is reconstructed element-wise.
pub fn reconstruct(registry: &Registry, value: &Value, target: Option<&ModelType>, options: &DecodeOptions) -> Result<Value> {
	let decoder = Decoder { registry, opt: options };
	match target {
		Some(model_type) => decoder.model(model_type, value, 0),
		None => decoder.root(value),
	}
}

struct Decoder<'a> {
	registry: &'a Registry,
	opt: &'a DecodeOptions,
}

impl Decoder<'_> {
	fn root(&self, value: &Value) -> Result<Value> {
		let Value::Map(entries) = value else {
			return self.value(value, FieldShape::Dynamic, 0);
		};

		match resolve(self.registry, entries.keys().map(String::as_str)) {
			Resolution::Match(model_type) => self.model(model_type, value, 0),
			Resolution::Partial { .. } | Resolution::NoMatch => Err(MapError::MissingObject {
				keys: entries.keys().cloned().collect(),
			}),
		}
	}

	fn value(&self, value: &Value, shape: FieldShape, depth: u32) -> Result<Value> {
		self.check_depth(depth)?;

		match value {
			Value::String(text) => Ok(match shape {
				FieldShape::Text => Value::String(text.clone()),
				FieldShape::Dynamic | FieldShape::Model(_) => self.string(text),
			}),
			Value::List(items) => Ok(Value::List(
				items.iter().map(|item| self.value(item, shape, depth + 1)).collect::<Result<_>>()?,
			)),
			Value::Map(entries) => match shape {
				FieldShape::Model(model_type) => self.model(&model_type(), value, depth),
				FieldShape::Text => self.plain_map(entries, shape, depth),
				FieldShape::Dynamic => self.nested_map(value, entries, depth),
			},
			Value::Object(model) => Err(MapError::AlreadyMaterialized {
				type_name: model.model_name(),
			}),
			Value::Opaque(opaque) => Err(MapError::AlreadyMaterialized {
				type_name: opaque.type_name(),
			}),
			Value::Null
			| Value::Bool(_)
			| Value::Int(_)
			| Value::UInt(_)
			| Value::Float(_)
			| Value::Date(_)
			| Value::DateTime(_)
			| Value::OffsetDateTime(_) => Ok(value.clone()),
		}
	}

	fn nested_map(&self, value: &Value, entries: &BTreeMap<String, Value>, depth: u32) -> Result<Value> {
		match resolve(self.registry, entries.keys().map(String::as_str)) {
			Resolution::Match(model_type) => self.model(model_type, value, depth),
			// Decoding into the closest type reports the first missing required field.
			Resolution::Partial { model_type, missing } => {
				tracing::trace!(model = model_type.name(), ?missing, "nested object lacks required fields");
				self.model(model_type, value, depth)
			}
			Resolution::NoMatch => {
				tracing::trace!(keys = entries.len(), "nested object kept as map");
				self.plain_map(entries, FieldShape::Dynamic, depth)
			}
		}
	}

	fn plain_map(&self, entries: &BTreeMap<String, Value>, shape: FieldShape, depth: u32) -> Result<Value> {
		let mut out = BTreeMap::new();
		for (key, item) in entries {
			out.insert(key.clone(), self.value(item, shape, depth + 1)?);
		}
		Ok(Value::Map(out))
	}

	fn model(&self, model_type: &ModelType, value: &Value, depth: u32) -> Result<Value> {
		self.check_depth(depth)?;
		model_type.ensure_fields()?;

		match value {
			Value::Map(entries) => self.model_from_map(model_type, entries, depth),
			Value::Object(model) => Err(MapError::AlreadyMaterialized {
				type_name: model.model_name(),
			}),
			Value::Opaque(opaque) => Err(MapError::AlreadyMaterialized {
				type_name: opaque.type_name(),
			}),
			other => Err(MapError::mismatch(model_type.name(), other.kind())),
		}
	}

	fn model_from_map(&self, model_type: &ModelType, entries: &BTreeMap<String, Value>, depth: u32) -> Result<Value> {
		if !entries.is_empty() && !entries.keys().any(|key| model_type.field(key).is_some()) {
			return Err(MapError::mismatch(model_type.name(), "object without any of its fields"));
		}

		let mut instance = model_type.instantiate();
		for field in model_type.fields().iter().filter(|field| field.mode().decodes()) {
			let Some(raw) = entries.get(field.name()) else {
				if field.is_required() {
					return Err(MapError::MissingRequiredField {
						type_name: model_type.name(),
						field: field.name(),
					});
				}
				tracing::trace!(model = model_type.name(), field = field.name(), "absent, keeping default");
				continue;
			};

			let decoded = if raw.is_null() {
				if field.is_not_nullable() {
					return Err(MapError::NullField {
						type_name: model_type.name(),
						field: field.name(),
					});
				}
				Value::Null
			} else {
				self.value(raw, field.shape(), depth + 1)?
			};

			tracing::trace!(model = model_type.name(), field = field.name(), kind = decoded.kind(), "decoded field");
			field.write(instance.as_mut(), decoded)?;
		}
		Ok(Value::Object(instance))
	}

	fn string(&self, text: &str) -> Value {
		let parsed = if self.opt.detect_temporal { temporal::parse(text) } else { None };
		parsed.map_or_else(|| Value::String(text.to_owned()), Value::from)
	}

	fn check_depth(&self, depth: u32) -> Result<()> {
		if depth >= self.opt.max_depth {
			return Err(MapError::DepthExceeded {
				max_depth: self.opt.max_depth,
			});
		}
		Ok(())
	}
}
