use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// Accessibility
///
/// Declared accessibility of a type, and the visibility tier of an accessor.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum Accessibility {
    #[default]
    Internal,
    Private,
    Protected,
    ProtectedInternal,
    Public,
}

impl Accessibility {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::ProtectedInternal => "protected internal",
            Self::Public => "public",
        }
    }
}

///
/// TypeKind
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[remain::sorted]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Record,
    Struct,
}

impl TypeKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::Struct => "struct",
        }
    }

    #[must_use]
    pub const fn is_value_type(self) -> bool {
        matches!(self, Self::Struct)
    }
}

///
/// SetterAccess
///
/// Whether an accessor has a setter, and at which visibility.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum SetterAccess {
    /// Read-only, no setter is emitted.
    None,
    /// Setter at the getter's own tier.
    Tier,
    /// Setter narrowed to private regardless of the getter's tier.
    Private,
}

///
/// AccessorShape
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct AccessorShape {
    pub visibility: Accessibility,
    pub setter: SetterAccess,
}

impl AccessorShape {
    const fn new(visibility: Accessibility, setter: SetterAccess) -> Self {
        Self { visibility, setter }
    }

    #[must_use]
    pub const fn has_setter(self) -> bool {
        !matches!(self.setter, SetterAccess::None)
    }

    /// Setter keyword as it appears inside the accessor body.
    #[must_use]
    pub const fn setter_keyword(self) -> Option<&'static str> {
        match self.setter {
            SetterAccess::None => None,
            SetterAccess::Tier => Some("set"),
            SetterAccess::Private => Some("private set"),
        }
    }
}

///
/// Capability
///
/// The fourteen accessor capabilities. Discriminants are the flag values of
/// the annotation enum emitted in the scaffold unit.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize,
)]
#[repr(u32)]
pub enum Capability {
    #[default]
    PublicGet = 1,
    PublicGetSet = 1 << 1,
    PublicGetPrivateSet = 1 << 2,
    PrivateGet = 1 << 3,
    PrivateGetSet = 1 << 4,
    ProtectedGet = 1 << 5,
    ProtectedGetSet = 1 << 6,
    ProtectedGetPrivateSet = 1 << 7,
    InternalGet = 1 << 8,
    InternalGetSet = 1 << 9,
    InternalGetPrivateSet = 1 << 10,
    ProtectedInternalGet = 1 << 11,
    ProtectedInternalGetSet = 1 << 12,
    ProtectedInternalGetPrivateSet = 1 << 13,
}

impl Capability {
    pub const ALL: [Self; 14] = [
        Self::PublicGet,
        Self::PublicGetSet,
        Self::PublicGetPrivateSet,
        Self::PrivateGet,
        Self::PrivateGetSet,
        Self::ProtectedGet,
        Self::ProtectedGetSet,
        Self::ProtectedGetPrivateSet,
        Self::InternalGet,
        Self::InternalGetSet,
        Self::InternalGetPrivateSet,
        Self::ProtectedInternalGet,
        Self::ProtectedInternalGetSet,
        Self::ProtectedInternalGetPrivateSet,
    ];

    #[must_use]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn from_bits(bits: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.bits()) == bits)
    }

    /// The capability table: visibility tier and setter shape.
    #[must_use]
    pub const fn shape(self) -> AccessorShape {
        use Accessibility as A;
        use SetterAccess as S;

        match self {
            Self::PublicGet => AccessorShape::new(A::Public, S::None),
            Self::PublicGetSet => AccessorShape::new(A::Public, S::Tier),
            Self::PublicGetPrivateSet => AccessorShape::new(A::Public, S::Private),
            Self::PrivateGet => AccessorShape::new(A::Private, S::None),
            Self::PrivateGetSet => AccessorShape::new(A::Private, S::Tier),
            Self::ProtectedGet => AccessorShape::new(A::Protected, S::None),
            Self::ProtectedGetSet => AccessorShape::new(A::Protected, S::Tier),
            Self::ProtectedGetPrivateSet => AccessorShape::new(A::Protected, S::Private),
            Self::InternalGet => AccessorShape::new(A::Internal, S::None),
            Self::InternalGetSet => AccessorShape::new(A::Internal, S::Tier),
            Self::InternalGetPrivateSet => AccessorShape::new(A::Internal, S::Private),
            Self::ProtectedInternalGet => AccessorShape::new(A::ProtectedInternal, S::None),
            Self::ProtectedInternalGetSet => AccessorShape::new(A::ProtectedInternal, S::Tier),
            Self::ProtectedInternalGetPrivateSet => {
                AccessorShape::new(A::ProtectedInternal, S::Private)
            }
        }
    }
}

///
/// TypeRef
///
/// A resolved type as it is spelled in generated code. Two references are
/// the same type exactly when their spellings are equal.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_capability_has_exactly_one_setter_shape() {
        for cap in Capability::ALL {
            let shape = cap.shape();
            let outcomes = [
                shape.setter == SetterAccess::None,
                shape.setter == SetterAccess::Tier,
                shape.setter == SetterAccess::Private,
            ];
            assert_eq!(outcomes.iter().filter(|b| **b).count(), 1, "{cap}");
            assert_eq!(shape, cap.shape(), "table lookup must be pure");
        }
    }

    #[test]
    fn capability_table_partitions_tiers() {
        let count = |tier: Accessibility| {
            Capability::ALL
                .into_iter()
                .filter(|c| c.shape().visibility == tier)
                .count()
        };

        assert_eq!(count(Accessibility::Private), 2);
        assert_eq!(count(Accessibility::Public), 3);
        assert_eq!(count(Accessibility::Protected), 3);
        assert_eq!(count(Accessibility::Internal), 3);
        assert_eq!(count(Accessibility::ProtectedInternal), 3);
    }

    #[test]
    fn private_tier_has_no_downgraded_variant() {
        assert!(
            Capability::ALL
                .into_iter()
                .filter(|c| c.shape().visibility == Accessibility::Private)
                .all(|c| c.shape().setter != SetterAccess::Private)
        );
    }

    #[test]
    fn capability_flags_are_distinct_and_round_trip() {
        let bits: HashSet<u32> = Capability::ALL.into_iter().map(Capability::bits).collect();
        assert_eq!(bits.len(), Capability::ALL.len());

        for cap in Capability::ALL {
            assert_eq!(Capability::from_bits(i64::from(cap.bits())), Some(cap));
        }
        assert_eq!(Capability::from_bits(0), None);
        assert_eq!(Capability::from_bits(3), None);
        assert_eq!(Capability::from_bits(1 << 14), None);
    }

    #[test]
    fn setter_keywords() {
        assert_eq!(Capability::PublicGet.shape().setter_keyword(), None);
        assert_eq!(Capability::InternalGetSet.shape().setter_keyword(), Some("set"));
        assert_eq!(
            Capability::ProtectedGetPrivateSet.shape().setter_keyword(),
            Some("private set")
        );
        assert_eq!(Capability::PrivateGetSet.shape().setter_keyword(), Some("set"));
    }

    #[test]
    fn protected_internal_keyword() {
        assert_eq!(Accessibility::ProtectedInternal.keyword(), "protected internal");
        assert_eq!(
            Capability::ProtectedInternalGet.shape().visibility.keyword(),
            "protected internal"
        );
    }

    #[test]
    fn type_ref_resolution() {
        assert!(TypeRef::new("int").is_resolved());
        assert!(!TypeRef::new("  ").is_resolved());
        assert_ne!(TypeRef::new("int"), TypeRef::new("float"));
    }
}
