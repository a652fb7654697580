use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::mapping::{FieldDescriptor, Fields, MapError, Result};

/// A user type that participates in JSON mapping.
///
/// Implementors declare their members once in [`Model::declare`]; the resolved
/// descriptor list is built on first use and cached for the whole process.
///
/// ```
/// use jsonmap::mapping::{Fields, FromValue, Model, Value};
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Person {
/// 	name: String,
/// }
///
/// impl Model for Person {
/// 	const NAME: &'static str = "Person";
///
/// 	fn declare(fields: &mut Fields<Self>) {
/// 		fields
/// 			.field("name", |this: &Self| Value::from(this.name.as_str()), |this: &mut Self, value| {
/// 				this.name = String::from_value(value)?;
/// 				Ok(())
/// 			})
/// 			.required();
/// 	}
/// }
///
/// let json = jsonmap::mapping::to_json(&Person { name: "Ada".to_owned() }).unwrap();
/// assert_eq!(json, serde_json::json!({"name": "Ada"}));
/// ```
pub trait Model: Default + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
	/// Type name used in diagnostics and registry lookups.
	const NAME: &'static str;

	/// Declare this type's own fields and its optional supertype.
	fn declare(fields: &mut Fields<Self>);
}

/// Object-safe view of a model instance.
pub trait ModelObject: Any + fmt::Debug + Send + Sync {
	/// Model type name.
	fn model_name(&self) -> &'static str;
	/// Resolved field registry of the concrete type.
	fn model_type(&self) -> Arc<ModelType>;
	/// Borrow as [`Any`] for downcasting.
	fn as_any(&self) -> &dyn Any;
	/// Mutably borrow as [`Any`] for downcasting.
	fn as_any_mut(&mut self) -> &mut dyn Any;
	/// Convert into a boxed [`Any`].
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
	/// Clone behind a fresh box.
	fn clone_boxed(&self) -> Box<dyn ModelObject>;
	/// Compare with another instance of possibly different type.
	fn eq_dyn(&self, other: &dyn ModelObject) -> bool;
}

impl<T: Model> ModelObject for T {
	fn model_name(&self) -> &'static str {
		T::NAME
	}

	fn model_type(&self) -> Arc<ModelType> {
		ModelType::of::<T>()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}

	fn clone_boxed(&self) -> Box<dyn ModelObject> {
		Box::new(self.clone())
	}

	fn eq_dyn(&self, other: &dyn ModelObject) -> bool {
		other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
	}
}

impl Clone for Box<dyn ModelObject> {
	fn clone(&self) -> Self {
		self.as_ref().clone_boxed()
	}
}

impl PartialEq for dyn ModelObject {
	fn eq(&self, other: &Self) -> bool {
		self.eq_dyn(other)
	}
}

/// Resolved, immutable field registry for one model type.
pub struct ModelType {
	name: &'static str,
	type_id: TypeId,
	ancestors: Vec<&'static str>,
	fields: Vec<FieldDescriptor>,
	construct: fn() -> Box<dyn ModelObject>,
}

static MODEL_TYPES: OnceLock<RwLock<HashMap<TypeId, Arc<ModelType>>>> = OnceLock::new();

impl ModelType {
	/// Return the cached registry for `T`, building it on first use.
	pub fn of<T: Model>() -> Arc<Self> {
		let type_id = TypeId::of::<T>();
		let cache = MODEL_TYPES.get_or_init(Default::default);
		if let Some(found) = cache.read().unwrap_or_else(PoisonError::into_inner).get(&type_id) {
			return Arc::clone(found);
		}

		// Built outside the lock: declarations resolve their supertype through this cache.
		let built = Arc::new(Self::build::<T>());
		let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(guard.entry(type_id).or_insert(built))
	}

	fn build<T: Model>() -> Self {
		let mut declared = Fields::<T>::new();
		T::declare(&mut declared);
		let (ancestors, fields) = declared.finish();
		tracing::debug!(model = T::NAME, fields = fields.len(), ancestors = ancestors.len(), "built field registry");

		Self {
			name: T::NAME,
			type_id: TypeId::of::<T>(),
			ancestors,
			fields,
			construct: construct::<T>,
		}
	}

	/// Model type name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Rust type identity.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Supertype names, nearest first.
	pub fn ancestors(&self) -> &[&'static str] {
		&self.ancestors
	}

	/// Whether this type is `name` or inherits from it.
	pub fn is_a(&self, name: &str) -> bool {
		self.name == name || self.ancestors.contains(&name)
	}

	/// Inheritance-resolved fields, ancestors first.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Look up a field by external name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name() == name)
	}

	/// All external field names, in registry order.
	pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.fields.iter().map(FieldDescriptor::name)
	}

	/// Names of decodable fields that must be present in a JSON object.
	pub fn required_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.fields
			.iter()
			.filter(|field| field.is_required() && field.mode().decodes())
			.map(FieldDescriptor::name)
	}

	/// Fail with a configuration error when the chain declares no fields.
	pub fn ensure_fields(&self) -> Result<()> {
		if self.fields.is_empty() {
			return Err(MapError::Configuration { type_name: self.name });
		}
		Ok(())
	}

	/// Create a default-constructed instance.
	pub fn instantiate(&self) -> Box<dyn ModelObject> {
		(self.construct)()
	}
}

impl fmt::Debug for ModelType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelType")
			.field("name", &self.name)
			.field("ancestors", &self.ancestors)
			.field("fields", &self.fields)
			.finish()
	}
}

fn construct<T: Model>() -> Box<dyn ModelObject> {
	Box::new(T::default())
}
