//! Records supplied by the declaration-discovery collaborator.
//!
//! These are deserialized as-is; nothing here is validated until a pipeline
//! resolves it into descriptors.

use crate::prelude::*;
use derive_more::Display;
use std::ops::Not;
use thiserror::Error as ThisError;

///
/// InputError
///

#[derive(Debug, ThisError)]
pub enum InputError {
    #[error("invalid compilation input: {0}")]
    Json(#[from] serde_json::Error),
}

///
/// Compilation
///
/// One snapshot of the discovered declarations for a single pass.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Compilation {
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    #[serde(default)]
    pub annotated_members: Vec<AnnotatedMember>,
}

impl Compilation {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn find_type(&self, id: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Types carrying the serializable marker, in declaration order.
    pub fn serializable_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter().filter(|t| t.serializable.is_some())
    }
}

///
/// TypeDecl
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    /// Fully qualified identity, unique within the compilation.
    pub id: String,
    pub name: String,

    /// Containing namespace, `None` or empty for the global namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_partial: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_nested: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializable: Option<SerializableMarker>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unions: Vec<UnionEntry>,

    /// Ids of every base type and implemented interface, transitively.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,

    /// Instance and static members, inherited ones included, in
    /// declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<SourceMember>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl TypeDecl {
    /// Abstract classes and interfaces.
    #[must_use]
    pub const fn is_abstract_like(&self) -> bool {
        self.is_abstract || matches!(self.kind, TypeKind::Interface)
    }

    #[must_use]
    pub fn derives_from(&self, base_id: &str) -> bool {
        self.bases.iter().any(|b| b == base_id)
    }
}

///
/// SerializableMarker
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SerializableMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingConvention>,
}

///
/// UnionEntry
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UnionEntry {
    pub tag: String,
    /// Id of the subtype declaration.
    pub subtype: String,
}

///
/// MemberKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum MemberKind {
    #[default]
    Field,
    Property,
}

///
/// SourceMember
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceMember {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,

    #[serde(default)]
    pub kind: MemberKind,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_static: bool,

    /// Compiler-synthesized (backing fields and the like).
    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_implicit: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub ignored: bool,

    #[serde(default = "public")]
    pub accessibility: Accessibility,

    #[serde(default = "yes")]
    pub has_getter: bool,

    #[serde(default = "yes")]
    pub has_setter: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_indexer: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberMarker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl SourceMember {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(TypeRef::new(ty)),
            kind: MemberKind::Field,
            is_static: false,
            is_implicit: false,
            ignored: false,
            accessibility: Accessibility::Public,
            has_getter: true,
            has_setter: true,
            is_indexer: false,
            member: None,
            location: None,
        }
    }

    /// Setter-only properties cannot be read back.
    #[must_use]
    pub const fn is_write_only(&self) -> bool {
        matches!(self.kind, MemberKind::Property) && !self.has_getter && self.has_setter
    }
}

const fn public() -> Accessibility {
    Accessibility::Public
}

const fn yes() -> bool {
    true
}

///
/// MemberMarker
///
/// Optional per-member serialization marker: key alias and explicit order.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemberMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

///
/// AnnotatedMember
///
/// A storage member carrying the accessor annotation.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotatedMember {
    /// Id of the owning type, `None` when it could not be located.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<TypeRef>,

    #[serde(default)]
    pub args: AnnotationArgs,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl AnnotatedMember {
    #[must_use]
    pub fn new(owner: &str, name: impl Into<String>, storage_type: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.to_string()),
            name: name.into(),
            storage_type: Some(TypeRef::new(storage_type)),
            args: AnnotationArgs::default(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.args.capability = Some(CapabilityArg::Name(capability.to_string()));
        self
    }

    #[must_use]
    pub fn with_target_type(mut self, target: impl Into<String>) -> Self {
        self.args.target_type = Some(TypeRef::new(target));
        self
    }
}

///
/// AnnotationArgs
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<CapabilityArg>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Accessor name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

///
/// CapabilityArg
///
/// Raw capability value: the flag bits or the variant name.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CapabilityArg {
    Bits(i64),
    Name(String),
}

impl CapabilityArg {
    #[must_use]
    pub fn resolve(&self) -> Option<Capability> {
        match self {
            Self::Bits(bits) => Capability::from_bits(*bits),
            Self::Name(name) => name.parse().ok(),
        }
    }
}
