use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::mapping::{FromValue, MapError, Model, ModelObject, ModelType, Result, Value};

type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;
type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;

/// Direction in which a field participates in mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
	/// Written by encode, ignored by decode.
	Encode,
	/// Read by decode, omitted from encode.
	Decode,
	/// Both directions.
	#[default]
	Both,
}

impl FieldMode {
	/// Whether encode emits this field.
	pub fn encodes(self) -> bool {
		matches!(self, Self::Encode | Self::Both)
	}

	/// Whether decode populates this field.
	pub fn decodes(self) -> bool {
		matches!(self, Self::Decode | Self::Both)
	}
}

/// What decode expects to find under a field, steering how strings and objects are rebuilt.
#[derive(Debug, Clone, Copy, Default)]
pub enum FieldShape {
	/// ISO-8601 strings become temporal values and objects resolve through the registry.
	#[default]
	Dynamic,
	/// Strings are kept as written, at any depth below the field.
	Text,
	/// Objects decode into the given model type, at any depth below the field.
	Model(fn() -> Arc<ModelType>),
}

/// Type-erased metadata and accessors for one mapped member.
#[derive(Clone)]
pub struct FieldDescriptor {
	name: &'static str,
	owner: &'static str,
	mode: FieldMode,
	required: bool,
	not_nullable: bool,
	shape: FieldShape,
	get: Getter,
	set: Setter,
}

impl FieldDescriptor {
	/// External (JSON) name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Model type that declared this member.
	pub fn owner(&self) -> &'static str {
		self.owner
	}

	/// Direction mode.
	pub fn mode(&self) -> FieldMode {
		self.mode
	}

	/// Decode requires the name to be present.
	pub fn is_required(&self) -> bool {
		self.required
	}

	/// Decode rejects JSON `null` for this name.
	pub fn is_not_nullable(&self) -> bool {
		self.not_nullable
	}

	/// Decode shape of the member.
	pub fn shape(&self) -> FieldShape {
		self.shape
	}

	/// Read the member from an instance.
	pub fn read(&self, instance: &dyn ModelObject) -> Result<Value> {
		(self.get)(instance.as_any())
	}

	/// Write the member on an instance.
	pub fn write(&self, instance: &mut dyn ModelObject, value: Value) -> Result<()> {
		(self.set)(instance.as_any_mut(), value)
	}

	fn project<T: Model, P: Model>(&self, project: fn(&T) -> &P, project_mut: fn(&mut T) -> &mut P) -> Self {
		let get = Arc::clone(&self.get);
		let set = Arc::clone(&self.set);
		Self {
			get: Arc::new(move |any: &dyn Any| {
				let parent: &dyn Any = project(downcast_ref::<T>(any)?);
				get(parent)
			}),
			set: Arc::new(move |any: &mut dyn Any, value| {
				let parent: &mut dyn Any = project_mut(downcast_mut::<T>(any)?);
				set(parent, value)
			}),
			..self.clone()
		}
	}
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("owner", &self.owner)
			.field("mode", &self.mode)
			.field("required", &self.required)
			.field("not_nullable", &self.not_nullable)
			.field("shape", &self.shape)
			.finish()
	}
}

/// Declaration context handed to [`Model::declare`].
pub struct Fields<T> {
	ancestors: Vec<&'static str>,
	inherited: Vec<FieldDescriptor>,
	own: Vec<FieldDescriptor>,
	_model: PhantomData<fn() -> T>,
}

impl<T: Model> Fields<T> {
	pub(crate) fn new() -> Self {
		Self {
			ancestors: Vec::new(),
			inherited: Vec::new(),
			own: Vec::new(),
			_model: PhantomData,
		}
	}

	/// Declare a mapped member with its accessor and mutator.
	pub fn field<G, S>(&mut self, name: &'static str, get: G, set: S) -> FieldOptions<'_>
	where
		G: Fn(&T) -> Value + Send + Sync + 'static,
		S: Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
	{
		let index = self.own.len();
		self.own.push(FieldDescriptor {
			name,
			owner: T::NAME,
			mode: FieldMode::Both,
			required: false,
			not_nullable: false,
			shape: FieldShape::Dynamic,
			get: Arc::new(move |any: &dyn Any| downcast_ref::<T>(any).map(|this| get(this))),
			set: Arc::new(move |any: &mut dyn Any, value| set(downcast_mut::<T>(any)?, value).map_err(|err| err.in_field(T::NAME, name))),
		});
		FieldOptions {
			descriptor: &mut self.own[index],
		}
	}

	/// Declare a member stored directly on `T`, converted through [`Value`] and [`FromValue`].
	pub fn member<V>(&mut self, name: &'static str, get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> FieldOptions<'_>
	where
		V: Clone + Into<Value> + FromValue + 'static,
	{
		self.field(
			name,
			move |this| get(this).clone().into(),
			move |this, value| {
				*get_mut(this) = V::from_value(value)?;
				Ok(())
			},
		)
		.shape(V::shape())
	}

	/// Declare an optional nested model; objects under `name` always decode into `P`.
	pub fn model<P: Model>(
		&mut self,
		name: &'static str,
		get: fn(&T) -> &Option<P>,
		get_mut: fn(&mut T) -> &mut Option<P>,
	) -> FieldOptions<'_> {
		self.field(
			name,
			move |this| get(this).clone().map_or(Value::Null, Value::object),
			move |this, value| {
				*get_mut(this) = match value {
					Value::Null => None,
					other => Some(other.into_model::<P>()?),
				};
				Ok(())
			},
		)
		.shape(FieldShape::Model(ModelType::of::<P>))
	}

	/// Declare a list of nested models; every element decodes into `P`.
	pub fn models<P: Model>(&mut self, name: &'static str, get: fn(&T) -> &Vec<P>, get_mut: fn(&mut T) -> &mut Vec<P>) -> FieldOptions<'_> {
		self.field(
			name,
			move |this| Value::List(get(this).iter().cloned().map(Value::object).collect()),
			move |this, value| {
				*get_mut(this) = Vec::<Value>::from_value(value)?
					.into_iter()
					.map(Value::into_model::<P>)
					.collect::<Result<_>>()?;
				Ok(())
			},
		)
		.shape(FieldShape::Model(ModelType::of::<P>))
	}

	/// Declare `P` as the single supertype, reached through the given projections.
	///
	/// The supertype's resolved fields are inherited ahead of this type's own; a later
	/// call replaces an earlier one.
	pub fn extends<P: Model>(&mut self, project: fn(&T) -> &P, project_mut: fn(&mut T) -> &mut P) -> &mut Self {
		let parent = ModelType::of::<P>();
		self.inherited = parent.fields().iter().map(|field| field.project(project, project_mut)).collect();
		self.ancestors = std::iter::once(P::NAME).chain(parent.ancestors().iter().copied()).collect();
		self
	}

	/// Merge inherited and own descriptors, overriding by external name.
	pub(crate) fn finish(self) -> (Vec<&'static str>, Vec<FieldDescriptor>) {
		let mut merged = self.inherited;
		for descriptor in self.own {
			match merged.iter_mut().find(|existing| existing.name == descriptor.name) {
				Some(slot) => *slot = descriptor,
				None => merged.push(descriptor),
			}
		}
		(self.ancestors, merged)
	}
}

/// Builder handle for the constraints of a freshly declared field.
pub struct FieldOptions<'a> {
	descriptor: &'a mut FieldDescriptor,
}

impl FieldOptions<'_> {
	/// Decode fails when the name is absent.
	pub fn required(self) -> Self {
		self.descriptor.required = true;
		self
	}

	/// Decode fails when the value is JSON `null`.
	pub fn not_nullable(self) -> Self {
		self.descriptor.not_nullable = true;
		self
	}

	/// Override the decode shape.
	pub fn shape(self, shape: FieldShape) -> Self {
		self.descriptor.shape = shape;
		self
	}

	/// Restrict the field to one direction.
	pub fn mode(self, mode: FieldMode) -> Self {
		self.descriptor.mode = mode;
		self
	}
}

fn downcast_ref<T: Model>(any: &dyn Any) -> Result<&T> {
	any.downcast_ref::<T>()
		.ok_or_else(|| MapError::mismatch(T::NAME, "instance of another model type"))
}

fn downcast_mut<T: Model>(any: &mut dyn Any) -> Result<&mut T> {
	any.downcast_mut::<T>()
		.ok_or_else(|| MapError::mismatch(T::NAME, "instance of another model type"))
}
