use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::mapping::{ModelType, Registry};

/// Outcome of matching a JSON object's key set against the registry.
#[derive(Debug, Clone)]
pub enum Resolution<'r> {
	/// Type whose decodable required fields are all present.
	Match(&'r ModelType),
	/// Best structural overlap that lacks some required fields.
	Partial {
		/// Closest type.
		model_type: &'r ModelType,
		/// Required names absent from the object.
		missing: Vec<&'static str>,
	},
	/// No registered type shares a field name with the object.
	NoMatch,
}

/// Pick the registered type that best fits a JSON object with the given keys.
///
/// A type is a candidate when every decodable required field is present and at
/// least one of its decodable field names occurs; unknown extra keys are tolerated. Among
/// candidates the most matched names wins, then the fewest declared fields, then
/// registration order.
pub fn resolve<'r, 'k>(registry: &'r Registry, keys: impl IntoIterator<Item = &'k str>) -> Resolution<'r> {
	let keys: BTreeSet<&str> = keys.into_iter().collect();

	let mut best: Option<((Reverse<usize>, usize, usize), &'r ModelType)> = None;
	let mut closest: Option<((Reverse<usize>, usize, usize, usize), &'r ModelType, Vec<&'static str>)> = None;

	for (position, model_type) in registry.types().enumerate() {
		let total = model_type.fields().len();
		let matched = model_type
			.fields()
			.iter()
			.filter(|field| field.mode().decodes() && keys.contains(field.name()))
			.count();
		if matched == 0 {
			continue;
		}

		let missing: Vec<&'static str> = model_type.required_names().filter(|name| !keys.contains(name)).collect();
		if missing.is_empty() {
			let rank = (Reverse(matched), total, position);
			if best.as_ref().is_none_or(|(current, _)| rank < *current) {
				best = Some((rank, model_type));
			}
		} else {
			let rank = (Reverse(matched), missing.len(), total, position);
			if closest.as_ref().is_none_or(|(current, _, _)| rank < *current) {
				closest = Some((rank, model_type, missing));
			}
		}
	}

	if let Some((_, model_type)) = best {
		tracing::debug!(model = model_type.name(), "resolved JSON object");
		return Resolution::Match(model_type);
	}
	match closest {
		Some((_, model_type, missing)) => Resolution::Partial { model_type, missing },
		None => Resolution::NoMatch,
	}
}
