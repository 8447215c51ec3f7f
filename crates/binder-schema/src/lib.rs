//! Named-property schema for Service Binder configuration elements.
//!
//! Every configurable element kind declares its properties as data: an
//! ordered table of (name, semantic type, default, validator, flags).
//! Raw string values from declarative configuration are decoded against
//! that table into typed [`PropertyBag`]s, so the rest of the system only
//! ever sees validated, typed values.

pub mod error;
pub mod location;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use location::SourceLocation;
pub use schema::{PropertySchema, PropertySpec, Validator};
pub use value::{PropertyBag, PropertyKind, PropertyValue};
