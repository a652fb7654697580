//! Shared model fixtures and helpers for workspace tests.

use std::path::{Path, PathBuf};

use jsonmap::mapping::{FieldMode, Fields, Model, Registry, Value};
use time::{Date, OffsetDateTime};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Fresh path for a scratch file under `<target>/jsonmap-tests`.
pub fn scratch_path(name: &str) -> PathBuf {
	let dir = target_dir().join("jsonmap-tests");
	std::fs::create_dir_all(&dir).expect("scratch directory is creatable");
	dir.join(format!("{}-{name}", std::process::id()))
}

/// Registry with every fixture, in declaration order of this module.
pub fn registry() -> Registry {
	Registry::new()
		.with::<Container>()
		.with::<Car>()
		.with::<ExtendedCar>()
		.with::<ExtendedExtendedCar>()
		.with::<RequiredFieldModel>()
		.with::<IssueType>()
		.with::<IssuePriority>()
		.with::<EncodeOnlyContainer>()
		.with::<DecodeOnlyContainer>()
		.with::<NullableFields>()
		.with::<Garage>()
		.with::<Person>()
}

/// Holder of one arbitrary value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
	/// Any value.
	pub container: Value,
}

impl Container {
	/// Wrap `value`.
	pub fn new(value: impl Into<Value>) -> Self {
		Self { container: value.into() }
	}
}

impl Model for Container {
	const NAME: &'static str = "Container";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("container", |this| &this.container, |this| &mut this.container);
	}
}

/// Base of the car hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Car {
	/// Model name.
	pub model_name: Option<String>,
	/// Top speed.
	pub max_speed: Option<i64>,
}

impl Car {
	/// Car with both fields set.
	pub fn new(model_name: &str, max_speed: i64) -> Self {
		Self {
			model_name: Some(model_name.to_owned()),
			max_speed: Some(max_speed),
		}
	}
}

impl Model for Car {
	const NAME: &'static str = "Car";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("modelName", |this| &this.model_name, |this| &mut this.model_name);
		fields.member("maxSpeed", |this| &this.max_speed, |this| &mut this.max_speed);
	}
}

/// Car with an engine rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedCar {
	/// Inherited car fields.
	pub car: Car,
	/// Engine rating.
	pub horsepower: Option<i64>,
}

impl Model for ExtendedCar {
	const NAME: &'static str = "ExtendedCar";

	fn declare(fields: &mut Fields<Self>) {
		fields.extends::<Car>(|this| &this.car, |this| &mut this.car);
		fields.member("horsepower", |this| &this.horsepower, |this| &mut this.horsepower);
	}
}

/// Two levels below [`Car`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedExtendedCar {
	/// Inherited extended car fields.
	pub extended: ExtendedCar,
	/// Paint color.
	pub color: Option<String>,
}

impl Model for ExtendedExtendedCar {
	const NAME: &'static str = "ExtendedExtendedCar";

	fn declare(fields: &mut Fields<Self>) {
		fields.extends::<ExtendedCar>(|this| &this.extended, |this| &mut this.extended);
		fields.member("color", |this| &this.color, |this| &mut this.color);
	}
}

/// One optional and one required field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredFieldModel {
	/// Optional field.
	pub some_field: Option<String>,
	/// Required field.
	pub required_field: Option<String>,
}

impl Model for RequiredFieldModel {
	const NAME: &'static str = "RequiredFieldModel";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("someField", |this| &this.some_field, |this| &mut this.some_field);
		fields
			.member("requiredField", |this| &this.required_field, |this| &mut this.required_field)
			.required();
	}
}

/// Issue tracker type descriptor; every field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueType {
	/// Identifier.
	pub id: String,
	/// Human description.
	pub description: String,
	/// Icon location.
	pub icon_url: String,
	/// Display name.
	pub name: String,
	/// Whether this is a sub-task type.
	pub sub_task: bool,
}

impl Model for IssueType {
	const NAME: &'static str = "IssueType";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("id", |this| &this.id, |this| &mut this.id).required();
		fields
			.member("description", |this| &this.description, |this| &mut this.description)
			.required();
		fields.member("iconUrl", |this| &this.icon_url, |this| &mut this.icon_url).required();
		fields.member("name", |this| &this.name, |this| &mut this.name).required();
		fields.member("subTask", |this| &this.sub_task, |this| &mut this.sub_task).required();
	}
}

/// Issue tracker priority descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuePriority {
	/// Display name.
	pub name: String,
	/// Icon location.
	pub icon_url: String,
}

impl Model for IssuePriority {
	const NAME: &'static str = "IssuePriority";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("name", |this| &this.name, |this| &mut this.name).required();
		fields.member("iconUrl", |this| &this.icon_url, |this| &mut this.icon_url).required();
	}
}

/// Field written by encode only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeOnlyContainer {
	/// Encode-only value.
	pub encode_only: Value,
}

impl Model for EncodeOnlyContainer {
	const NAME: &'static str = "EncodeOnlyContainer";

	fn declare(fields: &mut Fields<Self>) {
		fields
			.member("encodeOnly", |this| &this.encode_only, |this| &mut this.encode_only)
			.required()
			.mode(FieldMode::Encode);
	}
}

/// Field read by decode only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeOnlyContainer {
	/// Decode-only value.
	pub decode_only: Value,
}

impl Model for DecodeOnlyContainer {
	const NAME: &'static str = "DecodeOnlyContainer";

	fn declare(fields: &mut Fields<Self>) {
		fields
			.member("decodeOnly", |this| &this.decode_only, |this| &mut this.decode_only)
			.required()
			.mode(FieldMode::Decode);
	}
}

/// One not-nullable and one nullable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullableFields {
	/// Must not be `null` when present.
	pub strict: Option<String>,
	/// May be `null`.
	pub loose: Option<String>,
}

impl Model for NullableFields {
	const NAME: &'static str = "NullableFields";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("strict", |this| &this.strict, |this| &mut this.strict).not_nullable();
		fields.member("loose", |this| &this.loose, |this| &mut this.loose);
	}
}

/// Model without any mapped field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoFields;

impl Model for NoFields {
	const NAME: &'static str = "NoFields";

	fn declare(_fields: &mut Fields<Self>) {}
}

/// Owner of a list of cars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Garage {
	/// Parked cars.
	pub cars: Vec<Car>,
	/// Owner name.
	pub owner: String,
}

impl Model for Garage {
	const NAME: &'static str = "Garage";

	fn declare(fields: &mut Fields<Self>) {
		fields.models("cars", |this| &this.cars, |this| &mut this.cars);
		fields.member("owner", |this| &this.owner, |this| &mut this.owner).required();
	}
}

/// Model with temporal members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
	/// Full name.
	pub full_name: String,
	/// Calendar birth date.
	pub birth_date: Option<Date>,
	/// Last sighting with offset.
	pub last_seen: Option<OffsetDateTime>,
}

impl Model for Person {
	const NAME: &'static str = "Person";

	fn declare(fields: &mut Fields<Self>) {
		fields.member("fullName", |this| &this.full_name, |this| &mut this.full_name).required();
		fields.member("birthDate", |this| &this.birth_date, |this| &mut this.birth_date);
		fields.member("lastSeen", |this| &this.last_seen, |this| &mut this.last_seen);
	}
}

/// Host type without any mapping rule.
#[derive(Debug)]
pub struct NotSerializableObject;
