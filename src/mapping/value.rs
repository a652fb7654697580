use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::mapping::{FieldShape, MapError, Model, ModelObject, ModelType, Result};

/// In-memory value walked by the normalizer and produced by the reconstructor.
///
/// Every host value is classified into exactly one variant before it is mapped, so
/// normalization and reconstruction are exhaustive matches over this enum.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	/// Absent value, maps to JSON `null`.
	#[default]
	Null,
	/// Boolean, kept apart from integers.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Unsigned integer above `i64::MAX`.
	UInt(u64),
	/// Floating point number.
	Float(f64),
	/// UTF-8 string.
	String(String),
	/// Ordered sequence (lists, tuples, sets in iteration order).
	List(Vec<Value>),
	/// String-keyed map.
	Map(BTreeMap<String, Value>),
	/// Materialized model instance.
	Object(Box<dyn ModelObject>),
	/// Calendar date without time.
	Date(Date),
	/// Date and time without an offset.
	DateTime(PrimitiveDateTime),
	/// Date and time with a UTC offset.
	OffsetDateTime(OffsetDateTime),
	/// Host value without a mapping rule.
	Opaque(Opaque),
}

/// Host value the engine has no rule for, kept only to be reported.
#[derive(Clone)]
pub struct Opaque {
	type_name: &'static str,
	inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
	/// Host type name captured at wrap time.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Borrow the wrapped host value.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref::<T>()
	}
}

impl fmt::Debug for Opaque {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Opaque({})", self.type_name)
	}
}

impl PartialEq for Opaque {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Value {
	/// Wrap a model instance.
	pub fn object<T: Model>(model: T) -> Self {
		Self::Object(Box::new(model))
	}

	/// Wrap a host value that has no normalization rule.
	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		Self::Opaque(Opaque {
			type_name: std::any::type_name::<T>(),
			inner: Arc::new(value),
		})
	}

	/// Short name of the variant (or model type) for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "integer",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::List(_) => "list",
			Self::Map(_) => "map",
			Self::Object(model) => model.model_name(),
			Self::Date(_) => "date",
			Self::DateTime(_) => "datetime",
			Self::OffsetDateTime(_) => "offset datetime",
			Self::Opaque(opaque) => opaque.type_name(),
		}
	}

	/// Whether this is [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text.as_str()),
			_ => None,
		}
	}

	/// Signed integer payload, if it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			Self::UInt(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Borrow the sequence payload.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items.as_slice()),
			_ => None,
		}
	}

	/// Borrow the map payload.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Self::Map(entries) => Some(entries),
			_ => None,
		}
	}

	/// Borrow a materialized model of type `T`.
	pub fn as_object<T: Model>(&self) -> Option<&T> {
		match self {
			Self::Object(model) => model.as_any().downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Take a materialized model of type `T` out of this value.
	///
	/// An instance of a subtype of `T` is narrowed by copying the fields `T` declares.
	pub fn into_model<T: Model>(self) -> Result<T> {
		match self {
			Self::Object(model) if model.as_any().is::<T>() => model
				.into_any()
				.downcast::<T>()
				.map(|model| *model)
				.map_err(|_| MapError::mismatch(T::NAME, "model")),
			Self::Object(model) if model.model_type().is_a(T::NAME) => narrow::<T>(model.as_ref()),
			other => Err(MapError::mismatch(T::NAME, other.kind())),
		}
	}

	/// Convert into a typed member value.
	pub fn into_typed<T: FromValue>(self) -> Result<T> {
		T::from_value(self)
	}
}

fn narrow<T: Model>(source: &dyn ModelObject) -> Result<T> {
	let source_type = source.model_type();
	let mut narrowed = T::default();
	for field in ModelType::of::<T>().fields() {
		if let Some(from) = source_type.field(field.name()) {
			field.write(&mut narrowed, from.read(source)?)?;
		}
	}
	Ok(narrowed)
}

/// Typed extraction used by field mutators.
pub trait FromValue: Sized {
	/// Convert a reconstructed value into `Self`, failing with a type mismatch.
	fn from_value(value: Value) -> Result<Self>;

	/// Decode shape of a field holding `Self`.
	fn shape() -> FieldShape {
		FieldShape::Dynamic
	}
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self> {
		Ok(value)
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Bool(flag) => Ok(flag),
			other => Err(MapError::mismatch("bool", other.kind())),
		}
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::String(text) => Ok(text),
			other => Err(MapError::mismatch("string", other.kind())),
		}
	}

	fn shape() -> FieldShape {
		FieldShape::Text
	}
}

impl FromValue for f64 {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Float(number) => Ok(number),
			Value::Int(number) => Ok(number as f64),
			Value::UInt(number) => Ok(number as f64),
			other => Err(MapError::mismatch("f64", other.kind())),
		}
	}
}

impl FromValue for f32 {
	fn from_value(value: Value) -> Result<Self> {
		f64::from_value(value).map(|number| number as f32)
	}
}

macro_rules! int_from_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromValue for $ty {
				fn from_value(value: Value) -> Result<Self> {
					let converted = match &value {
						Value::Int(number) => <$ty>::try_from(*number).ok(),
						Value::UInt(number) => <$ty>::try_from(*number).ok(),
						_ => None,
					};
					converted.ok_or_else(|| MapError::mismatch(stringify!($ty), value.kind()))
				}
			}
		)*
	};
}

int_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for Date {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Date(date) => Ok(date),
			other => Err(MapError::mismatch("date", other.kind())),
		}
	}
}

impl FromValue for PrimitiveDateTime {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::DateTime(datetime) => Ok(datetime),
			other => Err(MapError::mismatch("datetime", other.kind())),
		}
	}
}

impl FromValue for OffsetDateTime {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::OffsetDateTime(datetime) => Ok(datetime),
			other => Err(MapError::mismatch("offset datetime", other.kind())),
		}
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Null => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}

	fn shape() -> FieldShape {
		T::shape()
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::List(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(MapError::mismatch("list", other.kind())),
		}
	}

	fn shape() -> FieldShape {
		T::shape()
	}
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Map(entries) => entries.into_iter().map(|(key, item)| Ok((key, T::from_value(item)?))).collect(),
			other => Err(MapError::mismatch("map", other.kind())),
		}
	}

	fn shape() -> FieldShape {
		T::shape()
	}
}

impl<T: FromValue> FromValue for HashMap<String, T> {
	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Map(entries) => entries.into_iter().map(|(key, item)| Ok((key, T::from_value(item)?))).collect(),
			other => Err(MapError::mismatch("map", other.kind())),
		}
	}

	fn shape() -> FieldShape {
		T::shape()
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! signed_into_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Int(i64::from(value))
				}
			}
		)*
	};
}

signed_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		i64::try_from(value).map_or(Self::UInt(value), Self::Int)
	}
}

impl From<usize> for Value {
	fn from(value: usize) -> Self {
		Self::from(value as u64)
	}
}

impl From<isize> for Value {
	fn from(value: isize) -> Self {
		Self::Int(value as i64)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Float(f64::from(value))
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<Date> for Value {
	fn from(value: Date) -> Self {
		Self::Date(value)
	}
}

impl From<PrimitiveDateTime> for Value {
	fn from(value: PrimitiveDateTime) -> Self {
		Self::DateTime(value)
	}
}

impl From<OffsetDateTime> for Value {
	fn from(value: OffsetDateTime) -> Self {
		Self::OffsetDateTime(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
	fn from(value: &[T]) -> Self {
		Self::List(value.iter().cloned().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<VecDeque<T>> for Value {
	fn from(value: VecDeque<T>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
	fn from(value: HashSet<T, S>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
	fn from(value: BTreeSet<T>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
	fn from((a, b): (A, B)) -> Self {
		Self::List(vec![a.into(), b.into()])
	}
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
	fn from((a, b, c): (A, B, C)) -> Self {
		Self::List(vec![a.into(), b.into(), c.into()])
	}
}

impl<T: Into<Value>, S> From<HashMap<String, T, S>> for Value {
	fn from(value: HashMap<String, T, S>) -> Self {
		Self::Map(value.into_iter().map(|(key, item)| (key, item.into())).collect())
	}
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
	fn from(value: BTreeMap<String, T>) -> Self {
		Self::Map(value.into_iter().map(|(key, item)| (key, item.into())).collect())
	}
}

impl From<&serde_json::Value> for Value {
	fn from(value: &serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(flag) => Self::Bool(*flag),
			serde_json::Value::Number(number) => {
				if let Some(signed) = number.as_i64() {
					Self::Int(signed)
				} else if let Some(unsigned) = number.as_u64() {
					Self::UInt(unsigned)
				} else {
					number.as_f64().map_or(Self::Null, Self::Float)
				}
			}
			serde_json::Value::String(text) => Self::String(text.clone()),
			serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
			serde_json::Value::Object(entries) => Self::Map(entries.iter().map(|(key, item)| (key.clone(), Self::from(item))).collect()),
		}
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		Self::from(&value)
	}
}
