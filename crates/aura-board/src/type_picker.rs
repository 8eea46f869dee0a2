//! Type picker contract
//!
//! The picker is shown once a connection has both endpoints. It sees the two
//! task titles and the full catalogue, and answers with exactly one type or a
//! dismissal.

use crate::connection::{ConnectionEvent, DismissReason};
use aura_domain::registry::{self, TypeInfo};
use aura_domain::RelationshipType;
use serde::Serialize;

/// What the type picker is asked to show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePrompt {
    /// Title of the task the drag started from
    pub source_title: String,
    /// Title of the task the drag ended on
    pub target_title: String,
    /// Types to offer, in catalogue order
    #[serde(skip)]
    pub options: &'static [TypeInfo],
}

impl TypePrompt {
    /// Prompt offering the whole catalogue
    pub fn new(source_title: impl Into<String>, target_title: impl Into<String>) -> Self {
        Self {
            source_title: source_title.into(),
            target_title: target_title.into(),
            options: registry::catalogue(),
        }
    }

    /// Option at a 1-based menu position
    pub fn option(&self, number: usize) -> Option<&'static TypeInfo> {
        number.checked_sub(1).and_then(|index| self.options.get(index))
    }
}

/// The picker's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeChoice {
    /// A type was chosen
    Selected(RelationshipType),
    /// The picker was closed without a choice
    Dismissed(DismissReason),
}

impl From<TypeChoice> for ConnectionEvent {
    fn from(choice: TypeChoice) -> Self {
        match choice {
            TypeChoice::Selected(kind) => ConnectionEvent::TypeSelected(kind),
            TypeChoice::Dismissed(reason) => ConnectionEvent::Dismissed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_offers_catalogue() {
        let prompt = TypePrompt::new("Design API", "Implement API");
        assert_eq!(prompt.options.len(), RelationshipType::ALL.len());
        assert_eq!(prompt.option(1).map(|info| info.kind), Some(RelationshipType::Blocks));
        assert_eq!(prompt.option(6).map(|info| info.kind), Some(RelationshipType::ChildOf));
        assert!(prompt.option(0).is_none());
        assert!(prompt.option(7).is_none());
    }

    #[test]
    fn test_choice_to_event() {
        assert_eq!(
            ConnectionEvent::from(TypeChoice::Selected(RelationshipType::RelatesTo)),
            ConnectionEvent::TypeSelected(RelationshipType::RelatesTo)
        );
        assert_eq!(
            ConnectionEvent::from(TypeChoice::Dismissed(DismissReason::Escape)),
            ConnectionEvent::Dismissed(DismissReason::Escape)
        );
    }
}
