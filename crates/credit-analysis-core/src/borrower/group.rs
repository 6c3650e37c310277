use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::guarantor::Guarantor;

/// Workflow stage of the analysis the group belongs to. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisStatus {
    #[default]
    Draft,
    DataReview,
    Adjustments,
    Relationship,
    DebtService,
    Memo,
    Completed,
}

/// The full relationship unit underwritten together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: AnalysisStatus,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub guarantors: Vec<Guarantor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BorrowerGroup {
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Entities flagged to count toward the global ratio, in group order.
    pub fn included_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.include_in_global)
    }
}
