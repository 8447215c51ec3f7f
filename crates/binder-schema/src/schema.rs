//! Property schema tables and raw-value decoding.
//!
//! A [`PropertySchema`] is the declarative specification of one element
//! kind's named properties. It is plain data: the decoder walks the table,
//! converts raw strings, applies defaults, and runs validators.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::location::SourceLocation;
use crate::value::{PropertyBag, PropertyKind, PropertyValue};

/// Validation rule attached to a property spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validator {
    /// Inclusive length bounds on text values.
    TextLength { min: usize, max: usize },
    /// Inclusive bounds on integer values.
    IntegerRange { min: i64, max: i64 },
}

impl Validator {
    /// Check a decoded value against this rule.
    pub fn validate(&self, value: &PropertyValue) -> std::result::Result<(), String> {
        match (self, value) {
            (Validator::TextLength { min, max }, PropertyValue::Text(s)) => {
                if s.len() < *min || s.len() > *max {
                    Err(format!(
                        "length {} outside allowed range {min}..={max}",
                        s.len()
                    ))
                } else {
                    Ok(())
                }
            }
            (Validator::IntegerRange { min, max }, PropertyValue::Integer(i)) => {
                if i < min || i > max {
                    Err(format!("{i} outside allowed range {min}..={max}"))
                } else {
                    Ok(())
                }
            }
            // A validator attached to a value of another semantic type is a
            // schema-authoring mistake; treat the value as failing.
            _ => Err(format!("validator not applicable to {value}")),
        }
    }
}

/// Declaration of a single named property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Unique property name within the schema.
    pub name: String,
    /// Semantic type used for conversion.
    pub kind: PropertyKind,
    /// Value used when the property is not supplied.
    pub default: Option<PropertyValue>,
    /// Whether the property must be supplied (or defaulted).
    pub required: bool,
    /// Whether the property participates in the element's identity key.
    pub is_key: bool,
    /// Optional validation rule applied after conversion.
    pub validator: Option<Validator>,
}

impl PropertySpec {
    /// A required key property with no default, e.g. the element `name`.
    pub fn key(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            required: true,
            is_key: true,
            validator: None,
        }
    }

    /// An optional property that falls back to `default`.
    pub fn optional(
        name: impl Into<String>,
        kind: PropertyKind,
        default: PropertyValue,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default),
            required: false,
            is_key: false,
            validator: None,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Ordered table of property specs for one element kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    specs: Vec<PropertySpec>,
}

impl PropertySchema {
    /// Build a schema from an ordered spec list.
    ///
    /// Fails with [`Error::DuplicateSpec`] if two specs share a name.
    pub fn new(specs: Vec<PropertySpec>) -> Result<Self> {
        for (i, spec) in specs.iter().enumerate() {
            if specs[..i].iter().any(|s| s.name == spec.name) {
                return Err(Error::DuplicateSpec {
                    name: spec.name.clone(),
                });
            }
        }
        Ok(Self { specs })
    }

    /// Schema with no declared properties.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropertySpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn specs(&self) -> &[PropertySpec] {
        &self.specs
    }

    /// Decode raw string pairs into a typed property bag.
    ///
    /// Unknown names, duplicate raw keys, conversion failures, validator
    /// failures, and missing required properties all surface as typed
    /// errors. Optional properties absent from the input take their
    /// declared defaults, in schema order.
    pub fn decode(
        &self,
        raw: &[(String, String)],
        location: Option<&SourceLocation>,
    ) -> Result<PropertyBag> {
        let mut bag = PropertyBag::new();

        for (i, (name, value)) in raw.iter().enumerate() {
            if raw[..i].iter().any(|(n, _)| n == name) {
                return Err(Error::DuplicateProperty { name: name.clone() });
            }
            let spec = self.get(name).ok_or_else(|| Error::UnknownProperty {
                name: name.clone(),
                location: location.cloned(),
            })?;
            let decoded = convert(spec, value, location)?;
            if let Some(validator) = &spec.validator {
                validator
                    .validate(&decoded)
                    .map_err(|reason| Error::InvalidValue {
                        name: name.clone(),
                        reason,
                        location: location.cloned(),
                    })?;
            }
            bag.set(name.clone(), decoded);
        }

        // Defaults and required checks, in declaration order.
        for spec in &self.specs {
            if bag.get(&spec.name).is_some() {
                continue;
            }
            match (&spec.default, spec.required) {
                (Some(default), _) => bag.set(spec.name.clone(), default.clone()),
                (None, true) => {
                    return Err(Error::MissingProperty {
                        name: spec.name.clone(),
                    });
                }
                (None, false) => {}
            }
        }

        Ok(bag)
    }
}

fn convert(
    spec: &PropertySpec,
    raw: &str,
    location: Option<&SourceLocation>,
) -> Result<PropertyValue> {
    let kind = spec.kind.name();
    let invalid = |reason: String| Error::InvalidValue {
        name: spec.name.clone(),
        reason,
        location: location.cloned(),
    };

    match &spec.kind {
        PropertyKind::Text => Ok(PropertyValue::Text(raw.to_string())),
        PropertyKind::TypeName => {
            if raw.is_empty() {
                Err(invalid(format!("{kind} must not be empty")))
            } else {
                Ok(PropertyValue::TypeName(raw.to_string()))
            }
        }
        PropertyKind::Flag => match raw {
            "true" => Ok(PropertyValue::Flag(true)),
            "false" => Ok(PropertyValue::Flag(false)),
            other => Err(invalid(format!("{kind} expects 'true' or 'false', got '{other}'"))),
        },
        PropertyKind::Integer => raw
            .parse::<i64>()
            .map(PropertyValue::Integer)
            .map_err(|e| invalid(format!("not a valid {kind}: {e}"))),
        PropertyKind::Choice { allowed } => {
            if allowed.iter().any(|a| a == raw) {
                Ok(PropertyValue::Choice(raw.to_string()))
            } else {
                Err(invalid(format!(
                    "'{raw}' is not one of [{}]",
                    allowed.join(", ")
                )))
            }
        }
    }
}
