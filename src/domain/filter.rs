/// Ticket list filters. An empty field places no constraint on the list and is
/// left out of the outgoing query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub status: String,
    pub priority: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Status,
    Priority,
    Category,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Search => "search",
            FilterField::Status => "status",
            FilterField::Priority => "priority",
            FilterField::Category => "category",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "search" => Some(FilterField::Search),
            "status" => Some(FilterField::Status),
            "priority" => Some(FilterField::Priority),
            "category" => Some(FilterField::Category),
            _ => None,
        }
    }
}

impl FilterCriteria {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Status => &self.status,
            FilterField::Priority => &self.priority,
            FilterField::Category => &self.category,
        }
    }

    /// Replaces one field and reports whether the criteria actually changed.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            FilterField::Search => &mut self.search,
            FilterField::Status => &mut self.status,
            FilterField::Priority => &mut self.priority,
            FilterField::Category => &mut self.category,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn is_unconstrained(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters for the list request, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            FilterField::Search,
            FilterField::Status,
            FilterField::Priority,
            FilterField::Category,
        ]
        .into_iter()
        .map(|field| (field.as_str(), self.get(field)))
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}
