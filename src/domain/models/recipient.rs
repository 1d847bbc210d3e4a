use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecipientKind {
    Lead,
    Account,
    Contact,
}

impl RecipientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientKind::Lead => "lead",
            RecipientKind::Account => "account",
            RecipientKind::Contact => "contact",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "lead" => Some(RecipientKind::Lead),
            "account" => Some(RecipientKind::Account),
            "contact" => Some(RecipientKind::Contact),
            _ => None,
        }
    }
}

/// Polymorphic reference to any business entity that can receive a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RecipientRef {
    pub kind: RecipientKind,
    pub id: Uuid,
}

impl RecipientRef {
    pub fn new(kind: RecipientKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}
