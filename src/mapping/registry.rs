use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::mapping::{Model, ModelType};

/// Set of model types visible to type auto-detection.
///
/// Every type that may be materialized from a JSON object without an explicit target
/// must be registered before the first such decode. Registration order is the final
/// tie-break of the resolver.
#[derive(Debug, Default, Clone)]
pub struct Registry {
	types: Vec<Arc<ModelType>>,
	by_id: HashMap<TypeId, usize>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `T`; registering twice keeps the first position.
	pub fn register<T: Model>(&mut self) -> &mut Self {
		let type_id = TypeId::of::<T>();
		if !self.by_id.contains_key(&type_id) {
			self.by_id.insert(type_id, self.types.len());
			self.types.push(ModelType::of::<T>());
		}
		self
	}

	/// Builder form of [`Registry::register`].
	pub fn with<T: Model>(mut self) -> Self {
		self.register::<T>();
		self
	}

	/// Registered entry for `T`.
	pub fn get<T: Model>(&self) -> Option<&ModelType> {
		self.by_id
			.get(&TypeId::of::<T>())
			.and_then(|index| self.types.get(*index))
			.map(Arc::as_ref)
	}

	/// First registered entry with the given model name.
	pub fn get_by_name(&self, name: &str) -> Option<&ModelType> {
		self.types().find(|model_type| model_type.name() == name)
	}

	/// Registered types in registration order.
	pub fn types(&self) -> impl Iterator<Item = &ModelType> + '_ {
		self.types.iter().map(Arc::as_ref)
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}
