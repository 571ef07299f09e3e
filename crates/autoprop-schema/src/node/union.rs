use crate::prelude::*;

///
/// UnionDescriptor
///
/// Discriminator tag mapped to one concrete subtype.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UnionDescriptor {
    pub tag: String,
    pub subtype: TypeRef,
}

impl UnionDescriptor {
    #[must_use]
    pub fn new(tag: impl Into<String>, subtype: TypeRef) -> Self {
        Self {
            tag: tag.into(),
            subtype,
        }
    }
}
