use crate::{input::TypeDecl, node::NodeError, prelude::*};
use std::collections::HashSet;

///
/// TypeDescriptor
///
/// A type's declaration info with its resolved members and union entries.
/// Members are kept in effective order: ascending `order`, ties broken by
/// the sequence they were supplied in.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub accessibility: Accessibility,
    pub kind: TypeKind,
    pub is_augmentable: bool,
    pub naming: NamingConvention,

    members: Vec<MemberDescriptor>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    unions: Vec<UnionDescriptor>,

    #[serde(skip)]
    pub location: Option<Location>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn from_decl(decl: &TypeDecl, naming: NamingConvention) -> Self {
        let namespace = decl
            .namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(ToString::to_string);

        Self {
            id: decl.id.clone(),
            name: decl.name.clone(),
            namespace,
            accessibility: decl.accessibility,
            kind: decl.kind,
            is_augmentable: decl.is_partial,
            naming,
            members: Vec::new(),
            unions: Vec::new(),
            location: decl.location.clone(),
        }
    }

    #[must_use]
    pub fn with_members(mut self, mut members: Vec<MemberDescriptor>) -> Self {
        // sort_by_key is stable
        members.sort_by_key(|m| m.order);
        self.members = members;
        self
    }

    pub fn with_unions(mut self, unions: Vec<UnionDescriptor>) -> Result<Self, NodeError> {
        let mut seen = HashSet::new();
        for union in &unions {
            if !seen.insert(union.tag.as_str()) {
                return Err(NodeError::DuplicateUnionTag(union.tag.clone()));
            }
        }
        self.unions = unions;

        Ok(self)
    }

    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    #[must_use]
    pub fn unions(&self) -> &[UnionDescriptor] {
        &self.unions
    }

    /// `None` for the global namespace.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}
