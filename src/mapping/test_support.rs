use std::sync::OnceLock;

use crate::mapping::{FieldMode, FieldShape, Fields, Model, Registry, Value};

static REGISTRY: OnceLock<Registry> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Car {
	pub(crate) model_name: Option<String>,
	pub(crate) max_speed: Option<i64>,
}

impl Model for Car {
	const NAME: &'static str = "Car";

	fn declare(fields: &mut Fields<Self>) {
		fields
			.field(
				"modelName",
				|this| Value::from(this.model_name.clone()),
				|this, value| {
					this.model_name = value.into_typed()?;
					Ok(())
				},
			)
			.shape(FieldShape::Text);
		fields.field(
			"maxSpeed",
			|this| Value::from(this.max_speed),
			|this, value| {
				this.max_speed = value.into_typed()?;
				Ok(())
			},
		);
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ExtendedCar {
	pub(crate) car: Car,
	pub(crate) horsepower: Option<i64>,
}

impl Model for ExtendedCar {
	const NAME: &'static str = "ExtendedCar";

	fn declare(fields: &mut Fields<Self>) {
		fields.extends::<Car>(|this| &this.car, |this| &mut this.car);
		fields.field(
			"horsepower",
			|this| Value::from(this.horsepower),
			|this, value| {
				this.horsepower = value.into_typed()?;
				Ok(())
			},
		);
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Container {
	pub(crate) container: Value,
}

impl Model for Container {
	const NAME: &'static str = "Container";

	fn declare(fields: &mut Fields<Self>) {
		fields.field(
			"container",
			|this| this.container.clone(),
			|this, value| {
				this.container = value;
				Ok(())
			},
		);
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Ticket {
	pub(crate) id: i64,
	pub(crate) title: Option<String>,
}

impl Model for Ticket {
	const NAME: &'static str = "Ticket";

	fn declare(fields: &mut Fields<Self>) {
		fields
			.field(
				"id",
				|this| Value::from(this.id),
				|this, value| {
					this.id = value.into_typed()?;
					Ok(())
				},
			)
			.required();
		fields
			.field(
				"title",
				|this| Value::from(this.title.clone()),
				|this, value| {
					this.title = value.into_typed()?;
					Ok(())
				},
			)
			.not_nullable();
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Directional {
	pub(crate) outgoing: Option<String>,
	pub(crate) incoming: Option<String>,
}

impl Model for Directional {
	const NAME: &'static str = "Directional";

	fn declare(fields: &mut Fields<Self>) {
		fields
			.field(
				"outgoing",
				|this| Value::from(this.outgoing.clone()),
				|this, value| {
					this.outgoing = value.into_typed()?;
					Ok(())
				},
			)
			.required()
			.mode(FieldMode::Encode);
		fields
			.field(
				"incoming",
				|this| Value::from(this.incoming.clone()),
				|this, value| {
					this.incoming = value.into_typed()?;
					Ok(())
				},
			)
			.mode(FieldMode::Decode);
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Fleet {
	pub(crate) lead: Option<Car>,
	pub(crate) cars: Vec<Car>,
}

impl Model for Fleet {
	const NAME: &'static str = "Fleet";

	fn declare(fields: &mut Fields<Self>) {
		fields.model("lead", |this| &this.lead, |this| &mut this.lead);
		fields.models("cars", |this| &this.cars, |this| &mut this.cars);
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Blank;

impl Model for Blank {
	const NAME: &'static str = "Blank";

	fn declare(_fields: &mut Fields<Self>) {}
}

/// Registry with every fixture above, `Car` ahead of `ExtendedCar`.
pub(crate) fn registry() -> &'static Registry {
	REGISTRY.get_or_init(|| {
		Registry::new()
			.with::<Container>()
			.with::<Car>()
			.with::<ExtendedCar>()
			.with::<Ticket>()
			.with::<Directional>()
	})
}
