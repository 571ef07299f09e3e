pub mod diagnostic;
pub mod input;
pub mod node;
pub mod resolve;
pub mod types;

use crate::{input::InputError, node::NodeError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        diag,
        diagnostic::{Diagnostic, DiagnosticId, Diagnostics, Location, Severity},
        node::*,
        types::{AccessorShape, Accessibility, Capability, SetterAccess, TypeKind, TypeRef},
    };
    pub use autoprop_utils::NamingConvention;
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    InputError(#[from] InputError),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}
