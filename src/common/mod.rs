/// Shared error taxonomy
pub mod error;

pub use error::{ConstructionError, Error, Missing, MissingKind, UnwrapError, UnwrapOrigin};
