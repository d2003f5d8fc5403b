/// Filter for [`ComponentRegistry::query_instances`](super::ComponentRegistry::query_instances).
///
/// At most one of `id`, `index` and `name` is applied, in that order of
/// precedence. `sub_type` narrows whatever they select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    /// Ordinal position among instances of the main-type.
    pub index: Option<i64>,
    /// Exact identifier match.
    pub id: Option<String>,
    /// Exact name match.
    pub name: Option<String>,
    /// Restrict to one sub-type.
    pub sub_type: Option<String>,
}

impl Selector {
    /// Select every instance.
    pub fn all() -> Self {
        Self::default()
    }

    /// Select by ordinal position.
    pub fn index(index: i64) -> Self {
        Self {
            index: Some(index),
            ..Default::default()
        }
    }

    /// Select by identifier.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Select by name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Narrow to one sub-type.
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.index.is_none() && self.id.is_none() && self.name.is_none() && self.sub_type.is_none()
    }
}
