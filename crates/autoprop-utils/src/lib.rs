//! Identifier helpers shared by the schema model and the code generators.
//!
//! - `case`: key-name mutation between naming conventions.
//! - `ident`: accessor name derivation from storage identifiers.

pub mod case;
pub mod ident;

pub use case::{NamingConvention, mutate};
pub use ident::{NO_UPPERCASABLE_LETTER, property_name};
