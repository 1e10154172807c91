//! Per-definition reconciliation outcomes and batch totals.

use serde::{Deserialize, Serialize};

/// What happened to one desired definition during a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileOutcome {
    /// A new job was created; nothing matched the definition's lineage id.
    Created,
    /// A matching live job was removed and the definition recreated.
    Replaced,
    /// A matching live job exists and overwriting is disabled.
    Skipped,
    /// Creation failed (after the sanitized retry, when one applied).
    Failed,
}

impl std::fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileOutcome::Created => write!(f, "created"),
            ReconcileOutcome::Replaced => write!(f, "replaced"),
            ReconcileOutcome::Skipped => write!(f, "skipped"),
            ReconcileOutcome::Failed => write!(f, "failed"),
        }
    }
}

/// A definition's identity paired with its outcome.
///
/// The vector of these is how a caller learns which definitions of a
/// partially-failed batch failed; the reconciler never raises for a single
/// definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionOutcome {
    pub input_path: String,
    pub outcome: ReconcileOutcome,
}

/// Aggregated counts over a batch of [`DefinitionOutcome`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportTotals {
    pub created: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ImportTotals {
    #[must_use]
    pub fn from_outcomes(outcomes: &[DefinitionOutcome]) -> Self {
        let mut totals = Self::default();
        for entry in outcomes {
            match entry.outcome {
                ReconcileOutcome::Created => totals.created += 1,
                ReconcileOutcome::Replaced => totals.replaced += 1,
                ReconcileOutcome::Skipped => totals.skipped += 1,
                ReconcileOutcome::Failed => totals.failed += 1,
            }
        }
        totals
    }

    /// Returns `true` if no definition in the batch failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for ImportTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} replaced, {} skipped, {} failed",
            self.created, self.replaced, self.skipped, self.failed
        )
    }
}
