//! Structured diagnostics, collected as values and reported by the caller.

use crate::prelude::*;
use derive_more::Display;
use std::fmt;

///
/// DiagnosticId
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum DiagnosticId {
    UnexpectedError,
    ClassNotFound,
    MustBePartial,
    VariableNameNotFound,
    CapabilityNotRecognized,
    NestedNotAllow,
    AbstractMustUnion,
    ConcreteTypeCantBeUnion,
    UnionTagDuplicate,
    UnionMemberTypeNotImplementBaseType,
    UnionMemberTypeNotDerivedBaseType,
    UnionMemberNotAllowStruct,
    UnionMemberMustBeSerializable,
}

impl DiagnosticId {
    /// Stable identifier, never renumbered.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnexpectedError => "AUTOPROP001",
            Self::ClassNotFound => "AUTOPROP002",
            Self::MustBePartial => "AUTOPROP003",
            Self::VariableNameNotFound => "AUTOPROP004",
            Self::CapabilityNotRecognized => "AUTOPROP005",
            Self::NestedNotAllow => "AUTOPROP006",
            Self::AbstractMustUnion => "AUTOPROP007",
            Self::ConcreteTypeCantBeUnion => "AUTOPROP008",
            Self::UnionTagDuplicate => "AUTOPROP009",
            Self::UnionMemberTypeNotImplementBaseType => "AUTOPROP010",
            Self::UnionMemberTypeNotDerivedBaseType => "AUTOPROP011",
            Self::UnionMemberNotAllowStruct => "AUTOPROP012",
            Self::UnionMemberMustBeSerializable => "AUTOPROP013",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::UnexpectedError => "Unexpected error during code generation",
            Self::ClassNotFound => "Owning type of an annotated member not found",
            Self::MustBePartial => "Generated type must be partial",
            Self::VariableNameNotFound => "Member type could not be resolved",
            Self::CapabilityNotRecognized => "Accessor capability not recognized",
            Self::NestedNotAllow => "Serializable type must not be nested",
            Self::AbstractMustUnion => "Abstract serializable type must declare a union",
            Self::ConcreteTypeCantBeUnion => "Concrete type cannot declare a union",
            Self::UnionTagDuplicate => "Union tag is duplicated",
            Self::UnionMemberTypeNotImplementBaseType => {
                "Union member does not implement the union interface"
            }
            Self::UnionMemberTypeNotDerivedBaseType => {
                "Union member does not derive from the union base type"
            }
            Self::UnionMemberNotAllowStruct => "Union member cannot be a struct",
            Self::UnionMemberMustBeSerializable => "Union member must be serializable",
        }
    }

    /// Message template with positional `{0}`, `{1}` placeholders.
    #[must_use]
    pub const fn message_format(self) -> &'static str {
        match self {
            Self::UnexpectedError => "Unexpected error occurred during code generation: {0}",
            Self::ClassNotFound => "Owning type not found for annotated member(s) '{0}'",
            Self::MustBePartial => "The type declaration '{0}' must be partial",
            Self::VariableNameNotFound => "The type of member '{0}' could not be resolved",
            Self::CapabilityNotRecognized => {
                "The accessor capability '{1}' on member '{0}' is not recognized"
            }
            Self::NestedNotAllow => "The serializable type '{0}' must not be a nested type",
            Self::AbstractMustUnion => {
                "The abstract or interface serializable type '{0}' must declare union members"
            }
            Self::ConcreteTypeCantBeUnion => {
                "The type '{0}' declares union members but only abstract types and interfaces can"
            }
            Self::UnionTagDuplicate => "The type '{0}' declares union tag '{1}' more than once",
            Self::UnionMemberTypeNotImplementBaseType => {
                "The type '{0}' union member '{1}' does not implement the union interface"
            }
            Self::UnionMemberTypeNotDerivedBaseType => {
                "The type '{0}' union member '{1}' does not derive from the union type"
            }
            Self::UnionMemberNotAllowStruct => {
                "The type '{0}' union member '{1}' is a struct, only reference types are allowed"
            }
            Self::UnionMemberMustBeSerializable => {
                "The type '{0}' union member '{1}' must itself be marked serializable"
            }
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        Severity::Error
    }
}

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Severity {
    #[display("error")]
    Error,
}

///
/// Location
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Location {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub location: Option<Location>,
    pub args: Vec<String>,
}

impl Diagnostic {
    #[must_use]
    pub const fn new(id: DiagnosticId, location: Option<Location>, args: Vec<String>) -> Self {
        Self { id, location, args }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.id.severity()
    }

    /// Render the message template with this diagnostic's arguments.
    ///
    /// Placeholders are resolved in one scan over the template, so argument
    /// text is never reinterpreted. `{n}` without a matching argument is kept.
    #[must_use]
    pub fn message(&self) -> String {
        let format = self.id.message_format();
        let mut out = String::with_capacity(format.len());
        let mut rest = format;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start + 1..];

            let arg = tail.find('}').and_then(|end| {
                let idx: usize = tail[..end].parse().ok()?;
                self.args.get(idx).map(|a| (a, end + 1))
            });
            match arg {
                Some((arg, consumed)) => {
                    out.push_str(arg);
                    rest = &tail[consumed..];
                }
                None => {
                    out.push('{');
                    rest = tail;
                }
            }
        }
        out.push_str(rest);

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.severity(),
            self.id.code(),
            self.message()
        )?;
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }

        Ok(())
    }
}

///
/// Diagnostics
///
/// Ordered list of diagnostics for one unit of work.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Number of diagnostics carrying `id`.
    #[must_use]
    pub fn count(&self, id: DiagnosticId) -> usize {
        self.0.iter().filter(|d| d.id == id).count()
    }

    #[must_use]
    pub fn contains(&self, id: DiagnosticId) -> bool {
        self.0.iter().any(|d| d.id == id)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.0 {
            writeln!(f, "{diagnostic}")?;
        }

        Ok(())
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Push a diagnostic: `diag!(diags, DiagnosticId::MustBePartial, location, name)`.
#[macro_export]
macro_rules! diag {
    ($diags:expr, $id:expr, $location:expr $(, $arg:expr)* $(,)?) => {{
        $diags.add($crate::diagnostic::Diagnostic::new(
            $id,
            $location,
            vec![$($arg.to_string()),*],
        ));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_substitutes_positional_args() {
        let d = Diagnostic::new(
            DiagnosticId::UnionTagDuplicate,
            None,
            vec!["Shape".into(), "circle".into()],
        );

        assert_eq!(
            d.message(),
            "The type 'Shape' declares union tag 'circle' more than once"
        );
    }

    #[test]
    fn argument_text_is_not_substituted_again() {
        let d = Diagnostic::new(
            DiagnosticId::UnionTagDuplicate,
            None,
            vec!["Box{1}".into(), "lid".into()],
        );

        assert_eq!(
            d.message(),
            "The type 'Box{1}' declares union tag 'lid' more than once"
        );
    }

    #[test]
    fn missing_argument_keeps_placeholder() {
        let d = Diagnostic::new(DiagnosticId::UnionTagDuplicate, None, vec!["Shape".into()]);

        assert_eq!(
            d.message(),
            "The type 'Shape' declares union tag '{1}' more than once"
        );
    }

    #[test]
    fn display_includes_code_and_location() {
        let d = Diagnostic::new(
            DiagnosticId::MustBePartial,
            Some(Location::new("Player.cs", 3, 14)),
            vec!["Player".into()],
        );

        assert_eq!(
            d.to_string(),
            "error AUTOPROP003: The type declaration 'Player' must be partial at Player.cs:3:14"
        );
    }

    #[test]
    fn codes_are_unique() {
        use std::collections::HashSet;

        let ids = [
            DiagnosticId::UnexpectedError,
            DiagnosticId::ClassNotFound,
            DiagnosticId::MustBePartial,
            DiagnosticId::VariableNameNotFound,
            DiagnosticId::CapabilityNotRecognized,
            DiagnosticId::NestedNotAllow,
            DiagnosticId::AbstractMustUnion,
            DiagnosticId::ConcreteTypeCantBeUnion,
            DiagnosticId::UnionTagDuplicate,
            DiagnosticId::UnionMemberTypeNotImplementBaseType,
            DiagnosticId::UnionMemberTypeNotDerivedBaseType,
            DiagnosticId::UnionMemberNotAllowStruct,
            DiagnosticId::UnionMemberMustBeSerializable,
        ];
        let codes: HashSet<_> = ids.iter().map(|id| id.code()).collect();

        assert_eq!(codes.len(), ids.len());
    }

    #[test]
    fn diag_macro_pushes_rendered_args() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diag!(diags, DiagnosticId::ClassNotFound, None, "a/b");
        assert_eq!(diags.count(DiagnosticId::ClassNotFound), 1);
        assert_eq!(diags.iter().next().unwrap().args, ["a/b"]);
    }
}
