//! Rule Store
//!
//! Ordered in-memory rule list with a write-through persistence seam.
//! Every mutation builds the next list, asks the backend to persist it,
//! and only swaps it in on success, so a failed commit leaves the store
//! exactly as it was.

use super::validator::{sanitize_draft, validate_rule};
use shared::error::{RuleError, RuleResult, StoreAction};
use shared::models::{Rule, RuleDraft, RuleStatus};
use thiserror::Error;

/// Persistence backend failure
#[derive(Debug, Clone, Error)]
#[error("store write failed: {0}")]
pub struct StoreWriteError(pub String);

/// Write-through persistence seam
///
/// Implementors commit the full rule list atomically. The engine ships no
/// real backend (persistence is the host's concern); [`NoopPersistence`]
/// accepts everything.
pub trait RulePersistence {
    fn persist(&self, rules: &[Rule]) -> Result<(), StoreWriteError>;
}

/// Backend that keeps rules in memory only
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

impl RulePersistence for NoopPersistence {
    fn persist(&self, _rules: &[Rule]) -> Result<(), StoreWriteError> {
        Ok(())
    }
}

/// Rule store with CRUD lifecycle and id assignment
#[derive(Debug, Clone)]
pub struct RuleStore<P: RulePersistence = NoopPersistence> {
    rules: Vec<Rule>,
    backend: P,
}

impl RuleStore<NoopPersistence> {
    pub fn new() -> Self {
        Self::with_backend(NoopPersistence)
    }
}

impl Default for RuleStore<NoopPersistence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RulePersistence> RuleStore<P> {
    pub fn with_backend(backend: P) -> Self {
        Self {
            rules: Vec::new(),
            backend,
        }
    }

    /// Seed the store with already-persisted rules (no validation)
    pub fn with_rules(backend: P, rules: Vec<Rule>) -> Self {
        Self { rules, backend }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn find(&self, id: i64) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Create a rule from a draft: sanitize, validate, assign id, commit
    pub fn create(&mut self, draft: &RuleDraft) -> RuleResult<Rule> {
        let mut rule = sanitize_draft(draft)?;
        validate_rule(&rule, &self.rules, None)?;
        rule.id = self.next_id();

        let mut next = self.rules.clone();
        next.push(rule.clone());
        self.commit(next, StoreAction::Create)?;
        Ok(rule)
    }

    /// Update a rule by id
    ///
    /// A status-only draft toggles `status` with no validation. A full
    /// draft is sanitized, conflict-checked excluding the target, and
    /// merged: absent `name`/`message` keep the stored values, absent
    /// `status` resets to enabled, trigger/discount are replaced wholesale,
    /// `id` is preserved.
    pub fn update(&mut self, id: i64, draft: &RuleDraft) -> RuleResult<Rule> {
        let index = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(RuleError::NotFound)?;

        let updated = if draft.is_status_only() {
            let mut rule = self.rules[index].clone();
            rule.status = draft.status.unwrap_or(RuleStatus::Enabled);
            rule
        } else {
            let mut candidate = sanitize_draft(draft)?;
            candidate.id = id;
            validate_rule(&candidate, &self.rules, Some(id))?;

            let old = &self.rules[index];
            if draft.name.is_none() {
                candidate.name = old.name.clone();
            }
            if draft.message.is_none() {
                candidate.message = old.message.clone();
            }
            candidate
        };

        let mut next = self.rules.clone();
        next[index] = updated.clone();
        self.commit(next, StoreAction::Update)?;
        Ok(updated)
    }

    /// Delete a rule by id
    pub fn delete(&mut self, id: i64) -> RuleResult<()> {
        let index = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(RuleError::NotFound)?;

        let mut next = self.rules.clone();
        next.remove(index);
        self.commit(next, StoreAction::Delete)
    }

    /// Insert a rule without sanitization or conflict checks
    ///
    /// Mirrors editing the stored record directly; evaluation does not
    /// re-validate, so conflicting rules inserted this way will stack.
    pub fn insert_unchecked(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Unix-timestamp id, bumped past the current maximum so rapid
    /// creations within one second stay unique
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let max_id = self.rules.iter().map(|r| r.id).max().unwrap_or(0);
        now.max(max_id + 1)
    }

    fn commit(&mut self, next: Vec<Rule>, action: StoreAction) -> RuleResult<()> {
        if let Err(e) = self.backend.persist(&next) {
            tracing::error!("failed to persist rules on {action}: {e}");
            return Err(RuleError::Store(action));
        }
        self.rules = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DiscountDraft, DiscountKind, TriggerDraft, TriggerKind};

    /// Backend that rejects every commit
    struct FailingPersistence;

    impl RulePersistence for FailingPersistence {
        fn persist(&self, _rules: &[Rule]) -> Result<(), StoreWriteError> {
            Err(StoreWriteError("disk full".to_string()))
        }
    }

    fn make_draft(value: f64) -> RuleDraft {
        RuleDraft {
            name: Some("promo".to_string()),
            kind: Some(shared::models::RuleKind::CartBased),
            trigger: Some(TriggerDraft {
                kind: Some(TriggerKind::CartTotal),
                value: Some(value),
                products: None,
                categories: None,
            }),
            discount: Some(DiscountDraft {
                kind: Some(DiscountKind::Percentage),
                value: Some(10.0),
            }),
            message: Some("Nice!".to_string()),
            status: None,
        }
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let mut store = RuleStore::new();
        let a = store.create(&make_draft(100.0)).unwrap();
        let b = store.create(&make_draft(200.0)).unwrap();
        assert!(a.id > 0);
        assert!(b.id > a.id);
        assert_eq!(store.rules().len(), 2);
    }

    #[test]
    fn test_create_rejects_conflict() {
        let mut store = RuleStore::new();
        store.create(&make_draft(100.0)).unwrap();
        assert_eq!(
            store.create(&make_draft(100.0)),
            Err(RuleError::DuplicateCartTotal)
        );
        assert_eq!(store.rules().len(), 1);
    }

    #[test]
    fn test_status_only_update_bypasses_validation() {
        let mut store = RuleStore::new();
        let rule = store.create(&make_draft(100.0)).unwrap();

        let draft = RuleDraft {
            status: Some(RuleStatus::Disabled),
            ..Default::default()
        };
        let updated = store.update(rule.id, &draft).unwrap();
        assert_eq!(updated.status, RuleStatus::Disabled);
        assert_eq!(updated.name, "promo");
    }

    #[test]
    fn test_full_update_merges_and_keeps_id() {
        let mut store = RuleStore::new();
        let rule = store.create(&make_draft(100.0)).unwrap();

        let mut draft = make_draft(150.0);
        draft.name = None; // keep stored name
        draft.message = None; // keep stored message
        let updated = store.update(rule.id, &draft).unwrap();

        assert_eq!(updated.id, rule.id);
        assert_eq!(updated.name, "promo");
        assert_eq!(updated.message, "Nice!");
        assert_eq!(updated.trigger.unwrap().value, 150.0);
        assert_eq!(updated.status, RuleStatus::Enabled);
    }

    #[test]
    fn test_full_update_conflict_excludes_self() {
        let mut store = RuleStore::new();
        let first = store.create(&make_draft(100.0)).unwrap();
        store.create(&make_draft(200.0)).unwrap();

        // Re-submitting the same threshold for the same rule is fine
        assert!(store.update(first.id, &make_draft(100.0)).is_ok());
        // Colliding with the other rule is not
        assert_eq!(
            store.update(first.id, &make_draft(200.0)),
            Err(RuleError::DuplicateCartTotal)
        );
    }

    #[test]
    fn test_update_missing_rule() {
        let mut store = RuleStore::new();
        assert_eq!(
            store.update(999, &make_draft(100.0)),
            Err(RuleError::NotFound)
        );
    }

    #[test]
    fn test_delete() {
        let mut store = RuleStore::new();
        let rule = store.create(&make_draft(100.0)).unwrap();
        store.delete(rule.id).unwrap();
        assert!(store.rules().is_empty());
        assert_eq!(store.delete(rule.id), Err(RuleError::NotFound));
    }

    #[test]
    fn test_failed_persist_leaves_store_unchanged() {
        let mut store = RuleStore::with_backend(FailingPersistence);
        assert_eq!(
            store.create(&make_draft(100.0)),
            Err(RuleError::Store(StoreAction::Create))
        );
        assert!(store.rules().is_empty());
    }

    #[test]
    fn test_insert_unchecked_bypasses_conflict() {
        let mut store = RuleStore::new();
        let rule = store.create(&make_draft(100.0)).unwrap();
        let mut dup = rule.clone();
        dup.id = rule.id + 1;
        store.insert_unchecked(dup);
        assert_eq!(store.rules().len(), 2);
    }
}
