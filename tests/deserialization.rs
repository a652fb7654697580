#![allow(missing_docs)]

use jsonmap::mapping::{DecodeOptions, ErrorKind, MapError, ModelType, Registry, Value, from_json, from_json_auto, reconstruct, to_json};
use jsonmap_testkit::{
	Car, Container, ExtendedCar, ExtendedExtendedCar, Garage, IssuePriority, IssueType, NoFields, NullableFields, RequiredFieldModel,
	registry,
};
use serde_json::json;

#[test]
fn container_is_detected() {
	let value = from_json_auto(&registry(), &json!({"container": "some value"})).expect("decodes");
	let container = value.into_model::<Container>().expect("container");
	assert_eq!(container.container.as_str(), Some("some value"));
}

#[test]
fn detection_requires_registration() {
	let only_cars = Registry::new().with::<Car>();
	let err = from_json_auto(&only_cars, &json!({"container": "some value"})).expect_err("container not registered");
	assert_eq!(err.kind(), ErrorKind::MissingObject);
}

#[test]
fn resolver_prefers_more_matched_fields() {
	let value = from_json_auto(&registry(), &json!({"modelName": "X", "maxSpeed": 130, "horsepower": 30})).expect("decodes");
	let car = value.as_object::<ExtendedCar>().expect("extended car chosen");
	assert_eq!(car.car, Car::new("X", 130));
	assert_eq!(car.horsepower, Some(30));

	let value = from_json_auto(&registry(), &json!({"modelName": "X", "color": "red"})).expect("decodes");
	let car = value.as_object::<ExtendedExtendedCar>().expect("deepest subtype chosen");
	assert_eq!(car.color.as_deref(), Some("red"));

	let value = from_json_auto(&registry(), &json!({"modelName": "X", "maxSpeed": 1})).expect("decodes");
	assert!(value.as_object::<Car>().is_some(), "tightest exact fit is the base car");
}

#[test]
fn unknown_object_is_missing() {
	let err = from_json_auto(&registry(), &json!({"some_unknown_field": "x"})).expect_err("nothing matches");
	assert!(matches!(&err, MapError::MissingObject { keys } if keys == &["some_unknown_field"]));
	assert!(err.to_string().contains("some_unknown_field"));
}

#[test]
fn issue_payloads_pick_their_types() {
	let issue_type = json!({
		"self": "https://jira.example/rest/api/2/issuetype/1",
		"id": "1",
		"description": "A problem which impairs or prevents the functions of the product.",
		"iconUrl": "https://jira.example/images/icons/bug.png",
		"name": "Bug",
		"subTask": false,
		"avatarId": 10303
	});
	let value = from_json_auto(&registry(), &issue_type).expect("issue type decodes");
	let decoded = value.as_object::<IssueType>().expect("issue type chosen");
	assert_eq!(decoded.name, "Bug");
	assert!(!decoded.sub_task);

	let priority = json!({"self": "https://jira.example/rest/api/2/priority/3", "iconUrl": "https://jira.example/p3.svg", "name": "Major", "id": "3"});
	let value = from_json_auto(&registry(), &priority).expect("priority decodes");
	assert_eq!(value.as_object::<IssuePriority>().map(|priority| priority.name.as_str()), Some("Major"));
}

#[test]
fn missing_required_field_top_level() {
	let err = from_json::<RequiredFieldModel>(&registry(), &json!({"someField": "x"})).expect_err("required missing");
	assert!(matches!(
		err,
		MapError::MissingRequiredField {
			type_name: "RequiredFieldModel",
			field: "requiredField"
		}
	));
	assert_eq!(err.kind(), ErrorKind::FieldValidation);
}

#[test]
fn missing_required_field_at_any_depth() {
	let nested_object = json!({"container": {"someField": "x"}});
	let list_element = json!({"container": [{"someField": "a", "requiredField": "b"}, {"someField": "x"}]});
	let map_value = json!({"container": {"outer": {"someField": "x"}}});

	for json in [nested_object, list_element, map_value] {
		let err = from_json::<Container>(&registry(), &json).expect_err("nested required missing");
		assert!(err.is_field_validation(), "{json}: {err}");

		let err = from_json_auto(&registry(), &json).expect_err("nested required missing without target");
		assert!(err.is_field_validation(), "{json}: {err}");
	}
}

#[test]
fn not_nullable_rejects_null() {
	let err = from_json::<NullableFields>(&registry(), &json!({"strict": null})).expect_err("null rejected");
	assert!(matches!(
		err,
		MapError::NullField {
			type_name: "NullableFields",
			field: "strict"
		}
	));
}

#[test]
fn nullable_null_round_trips() {
	let decoded: NullableFields = from_json(&registry(), &json!({"strict": "set", "loose": null})).expect("decodes");
	assert_eq!(decoded.loose, None);
	assert_eq!(to_json(&decoded).expect("encodes"), json!({"strict": "set", "loose": null}));
}

#[test]
fn both_mode_round_trips() {
	let car = ExtendedExtendedCar {
		extended: ExtendedCar {
			car: Car::new("Cooper", 200),
			horsepower: Some(136),
		},
		color: Some("green".to_owned()),
	};
	let decoded: ExtendedExtendedCar = from_json(&registry(), &to_json(&car).expect("encodes")).expect("decodes");
	assert_eq!(decoded, car);

	let garage = Garage {
		cars: vec![Car::new("A", 1), Car::new("B", 2)],
		owner: "Sam".to_owned(),
	};
	let decoded: Garage = from_json(&registry(), &to_json(&garage).expect("encodes")).expect("decodes");
	assert_eq!(decoded, garage);

	let container = Container::new(vec![Value::object(Car::new("C", 3)), Value::from("text"), Value::Int(4)]);
	let decoded: Container = from_json(&registry(), &to_json(&container).expect("encodes")).expect("decodes");
	assert_eq!(decoded, container);
}

#[test]
fn garage_decodes_without_a_registry() {
	let garage = Garage {
		cars: vec![Car::new("A", 1), Car::new("B", 2)],
		owner: "Sam".to_owned(),
	};
	let json = to_json(&garage).expect("encodes");
	assert_eq!(from_json::<Garage>(&Registry::new(), &json).expect("decodes"), garage);
}

#[test]
fn date_like_strings_round_trip() {
	for name in ["20200101", "2018-08-13", "2018-08-13T16"] {
		let car = Car::new(name, 130);
		let json = to_json(&car).expect("encodes");
		assert_eq!(json, json!({"modelName": name, "maxSpeed": 130}));
		assert_eq!(from_json::<Car>(&registry(), &json).expect("decodes"), car, "{name}");

		let priority = IssuePriority {
			name: name.to_owned(),
			icon_url: "https://example.com/p.png".to_owned(),
		};
		let decoded: IssuePriority = from_json(&registry(), &to_json(&priority).expect("encodes")).expect("decodes");
		assert_eq!(decoded, priority, "{name}");
	}
}

#[test]
fn subtype_elements_narrow_into_declared_type() {
	let json = json!({"owner": "Sam", "cars": [{"modelName": "A", "maxSpeed": 1, "horsepower": 90}]});
	let garage: Garage = from_json(&registry(), &json).expect("decodes");
	assert_eq!(garage.cars, [Car::new("A", 1)]);
}

#[test]
fn mismatched_shapes_are_type_errors() {
	let err = from_json::<Car>(&registry(), &json!({"owner": "Sam"})).expect_err("garage shape");
	assert!(err.is_type_error());

	let err = from_json::<Car>(&registry(), &json!("Beetle")).expect_err("string shape");
	assert!(err.is_type_error());

	let err = from_json::<Garage>(&registry(), &json!({"owner": 7})).expect_err("owner is a string");
	assert!(err.to_string().contains("Garage.owner"));
}

#[test]
fn materialized_object_is_rejected() {
	let target = ModelType::of::<Container>();
	let err = reconstruct(&registry(), &Value::object(Car::default()), Some(&target), &DecodeOptions::default()).expect_err("materialized");
	assert_eq!(err.kind(), ErrorKind::Type);

	let err = reconstruct(&registry(), &Value::object(Car::default()), None, &DecodeOptions::default()).expect_err("materialized");
	assert!(matches!(err, MapError::AlreadyMaterialized { type_name: "Car" }));
}

#[test]
fn field_less_target_is_a_configuration_error() {
	let err = from_json::<NoFields>(&registry(), &json!({"anything": 1})).expect_err("no fields");
	assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn unresolved_nested_maps_stay_maps() {
	let json = json!({"container": {"alpha": 1, "beta": [true, null]}});
	let decoded: Container = from_json(&registry(), &json).expect("decodes");
	let map = decoded.container.as_map().expect("map kept");
	assert_eq!(map["alpha"], Value::Int(1));
	assert_eq!(map["beta"], Value::List(vec![Value::Bool(true), Value::Null]));
}
