use crate::mapping::{FieldMode, ModelType, Registry};

/// Serializable summary of one model type's resolved fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModelSchema {
	/// Model type name.
	pub name: &'static str,
	/// Supertype names, nearest first.
	pub ancestors: Vec<&'static str>,
	/// Fields in registry order.
	pub fields: Vec<FieldSchema>,
}

/// Serializable summary of one field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldSchema {
	/// External name.
	pub name: &'static str,
	/// Declaring type.
	pub owner: &'static str,
	/// Direction mode.
	pub mode: FieldMode,
	/// Must be present on decode.
	pub required: bool,
	/// Must not be `null` on decode.
	pub not_nullable: bool,
}

impl ModelType {
	/// Describe this type's resolved field registry.
	pub fn schema(&self) -> ModelSchema {
		ModelSchema {
			name: self.name(),
			ancestors: self.ancestors().to_vec(),
			fields: self
				.fields()
				.iter()
				.map(|field| FieldSchema {
					name: field.name(),
					owner: field.owner(),
					mode: field.mode(),
					required: field.is_required(),
					not_nullable: field.is_not_nullable(),
				})
				.collect(),
		}
	}
}

impl Registry {
	/// Describe every registered type in registration order.
	pub fn schema(&self) -> Vec<ModelSchema> {
		self.types().map(ModelType::schema).collect()
	}
}
