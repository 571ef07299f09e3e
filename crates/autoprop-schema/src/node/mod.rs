mod member;
mod r#type;
mod union;

pub use self::member::*;
pub use self::r#type::*;
pub use self::union::*;

use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Debug, ThisError)]
pub enum NodeError {
    #[error("member name is empty")]
    EmptyName,

    #[error("member '{0}' has an empty key name")]
    EmptyKeyName(String),

    #[error("member '{0}' has an unresolved type")]
    UnresolvedType(String),

    #[error("union tag '{0}' is declared more than once")]
    DuplicateUnionTag(String),
}
