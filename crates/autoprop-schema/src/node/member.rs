use crate::{node::NodeError, prelude::*};
use autoprop_utils::{mutate, property_name};
use std::ops::Not;

///
/// MemberDescriptor
///
/// One annotated storage member, resolved against its owning type.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub storage_type: TypeRef,
    pub target_type: TypeRef,
    pub capability: Capability,

    pub order: i32,
    #[serde(skip_serializing_if = "Not::not")]
    pub has_explicit_order: bool,

    pub key_name: String,
    #[serde(skip_serializing_if = "Not::not")]
    pub has_key_alias: bool,

    pub property_name: String,

    #[serde(skip)]
    pub location: Option<Location>,
}

impl MemberDescriptor {
    /// Build a descriptor with every derived default applied: the target type
    /// equals the storage type, the key name is the mutated member name and
    /// the order is the declaration sequence.
    pub fn new(
        name: &str,
        storage_type: TypeRef,
        naming: NamingConvention,
        sequential_order: i32,
    ) -> Result<Self, NodeError> {
        if name.is_empty() {
            return Err(NodeError::EmptyName);
        }
        if !storage_type.is_resolved() {
            return Err(NodeError::UnresolvedType(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            target_type: storage_type.clone(),
            storage_type,
            capability: Capability::default(),
            order: sequential_order,
            has_explicit_order: false,
            key_name: mutate(name, naming),
            has_key_alias: false,
            property_name: property_name(name),
            location: None,
        })
    }

    pub fn with_target_type(mut self, target_type: TypeRef) -> Result<Self, NodeError> {
        if !target_type.is_resolved() {
            return Err(NodeError::UnresolvedType(self.name));
        }
        self.target_type = target_type;

        Ok(self)
    }

    #[must_use]
    pub const fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = capability;
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self.has_explicit_order = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Result<Self, NodeError> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(NodeError::EmptyKeyName(self.name));
        }
        self.key_name = alias;
        self.has_key_alias = true;

        Ok(self)
    }

    #[must_use]
    pub fn with_property_name(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = property_name.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// The accessor exposes a different type than the member stores.
    #[must_use]
    pub fn is_coerced(&self) -> bool {
        self.target_type != self.storage_type
    }

    #[must_use]
    pub const fn shape(&self) -> AccessorShape {
        self.capability.shape()
    }
}
