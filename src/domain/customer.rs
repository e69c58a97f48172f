//! Customer entity.

use crate::domain::Id;

/// A customer projects are billed to.
///
/// `project_ids` mirrors the persisted record's foreign-identifier list.
/// Decoding a customer never fetches the referenced projects; resolution is
/// an explicit, batchable call through the data-access layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Option<Id>,
    pub name: String,
    /// Tax identifier.
    pub cuit: String,
    pub project_ids: Vec<Id>,
}
