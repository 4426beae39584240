use crate::DealId;
use serde::Serialize;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelationEntity {
    Deal,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelationType {
    Linked,
}

/// Payload for `POST /relations`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Relation {
    pub from_type: RelationEntity,
    pub from_id: DealId,
    pub to_type: RelationEntity,
    pub to_id: DealId,
    pub relation_type: RelationType,
}

impl Relation {
    /// Links a duplicate back to the deal it was copied from.
    pub fn linked_deals(original: DealId, duplicate: DealId) -> Self {
        Self {
            from_type: RelationEntity::Deal,
            from_id: original,
            to_type: RelationEntity::Deal,
            to_id: duplicate,
            relation_type: RelationType::Linked,
        }
    }
}
