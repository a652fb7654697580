use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MapError>;

/// Coarse error classes surfaced to callers of encode and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A model type declares no fields anywhere in its chain.
	Configuration,
	/// Encode met a value with no normalization rule.
	UnsupportedType,
	/// A value shape does not fit the requested type.
	Type,
	/// A required field is absent or a not-nullable field is `null`.
	FieldValidation,
	/// Auto-detection found no registered type for a JSON object.
	MissingObject,
	/// Configured recursion ceiling was hit.
	Limit,
	/// Text, stream or temporal formatting failure outside the engine proper.
	Format,
}

/// Errors produced while normalizing and reconstructing model graphs.
#[derive(Debug, Error)]
pub enum MapError {
	/// Model type has no declared fields in its whole inheritance chain.
	#[error("model type {type_name} doesn't declare any fields which can be mapped to JSON")]
	Configuration {
		/// Offending model type.
		type_name: &'static str,
	},
	/// Encode encountered a value without a normalization rule.
	#[error("the value type `{type_name}` is not JSON serializable")]
	UnsupportedType {
		/// Host type name of the offending value.
		type_name: &'static str,
	},
	/// Float value is NaN or infinite and has no JSON representation.
	#[error("non-finite number {value} is not JSON serializable")]
	NonFiniteNumber {
		/// Offending float.
		value: f64,
	},
	/// Value shape is incompatible with the requested type.
	#[error("type mismatch{}: expected {expected}, got {got}", render_context(.context))]
	TypeMismatch {
		/// Expected shape or type name.
		expected: String,
		/// Actual shape description.
		got: String,
		/// Optional `Type.field` location.
		context: Option<String>,
	},
	/// Decode input already contains a materialized host value.
	#[error("cannot reconstruct from an already materialized {type_name}")]
	AlreadyMaterialized {
		/// Host type name of the materialized value.
		type_name: &'static str,
	},
	/// Required field is absent from the JSON object.
	#[error("{type_name}: missing required field `{field}`")]
	MissingRequiredField {
		/// Model type being reconstructed.
		type_name: &'static str,
		/// External field name.
		field: &'static str,
	},
	/// Not-nullable field carries JSON `null`.
	#[error("{type_name}: field `{field}` must not be null")]
	NullField {
		/// Model type being reconstructed.
		type_name: &'static str,
		/// External field name.
		field: &'static str,
	},
	/// No registered model type matches a JSON object.
	#[error("no registered model type matches a JSON object with keys {keys:?}")]
	MissingObject {
		/// Keys of the unmatched JSON object, sorted.
		keys: Vec<String>,
	},
	/// Recursion went deeper than the configured ceiling.
	#[error("mapping depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Temporal value could not be formatted.
	#[error("temporal format: {0}")]
	Format(#[from] time::error::Format),
	/// JSON text could not be parsed or written.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Reader or writer failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
}

impl MapError {
	/// Return the coarse class of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Configuration { .. } => ErrorKind::Configuration,
			Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
			Self::NonFiniteNumber { .. } | Self::TypeMismatch { .. } | Self::AlreadyMaterialized { .. } => ErrorKind::Type,
			Self::MissingRequiredField { .. } | Self::NullField { .. } => ErrorKind::FieldValidation,
			Self::MissingObject { .. } => ErrorKind::MissingObject,
			Self::DepthExceeded { .. } => ErrorKind::Limit,
			Self::Format(_) | Self::Json(_) | Self::Io(_) => ErrorKind::Format,
		}
	}

	/// Whether this error belongs to the type-error family (shape mismatch or unsupported type).
	pub fn is_type_error(&self) -> bool {
		matches!(self.kind(), ErrorKind::Type | ErrorKind::UnsupportedType)
	}

	/// Whether this error is a required/not-null constraint violation.
	pub fn is_field_validation(&self) -> bool {
		self.kind() == ErrorKind::FieldValidation
	}

	pub(crate) fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
		Self::TypeMismatch {
			expected: expected.into(),
			got: got.into(),
			context: None,
		}
	}

	/// Attach a `Type.field` location to a type mismatch that has none yet.
	pub(crate) fn in_field(self, type_name: &str, field: &str) -> Self {
		match self {
			Self::TypeMismatch {
				expected,
				got,
				context: None,
			} => Self::TypeMismatch {
				expected,
				got,
				context: Some(format!("{type_name}.{field}")),
			},
			other => other,
		}
	}
}

fn render_context(context: &Option<String>) -> String {
	context.as_ref().map(|at| format!(" at {at}")).unwrap_or_default()
}
