//! Solved-state propagation
//!
//! A problem can exist as several rows (the same problem copied into
//! different playlists). Solving any of them marks every row with the same
//! title as solved for that user. Unrelated problems that happen to share a
//! title are cross-marked too.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::{ProblemStore, SolvedStore},
    error::{AppError, AppResult},
};

/// What a mark-solved call changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSolvedOutcome {
    /// The user had already solved this exact problem; nothing was written
    pub already_solved: bool,
    /// The problem itself plus its title-equivalent duplicates
    pub affected_problems: usize,
    /// Solved records that did not exist before this call
    pub newly_marked: u64,
}

/// Solved-state service
pub struct SolvedService;

impl SolvedService {
    /// Mark `problem_id` and every problem sharing its title as solved by `user_id`
    ///
    /// Idempotent: repeated calls never create duplicate records.
    pub async fn mark_solved<S>(
        store: &S,
        user_id: Uuid,
        problem_id: Uuid,
    ) -> AppResult<MarkSolvedOutcome>
    where
        S: ProblemStore + SolvedStore + ?Sized,
    {
        let problem = store
            .find_problem(problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if store.is_solved(user_id, problem_id).await? {
            debug!(%user_id, %problem_id, "Problem already solved");
            return Ok(MarkSolvedOutcome {
                already_solved: true,
                affected_problems: 0,
                newly_marked: 0,
            });
        }

        let equivalents = Self::title_equivalents(store, &problem.title, problem_id).await?;

        // Problem and duplicates in one write: on failure no record exists
        let mut marked = Vec::with_capacity(equivalents.len() + 1);
        marked.push(problem_id);
        marked.extend_from_slice(&equivalents);
        let newly_marked = store.insert_solved(user_id, &marked).await?;

        info!(
            %user_id,
            %problem_id,
            duplicates = equivalents.len(),
            newly_marked,
            "Marked problem as solved"
        );

        Ok(MarkSolvedOutcome {
            already_solved: false,
            affected_problems: equivalents.len() + 1,
            newly_marked,
        })
    }

    /// Other problem ids with the same title, deduplicated and sorted
    async fn title_equivalents<S>(store: &S, title: &str, problem_id: Uuid) -> AppResult<Vec<Uuid>>
    where
        S: ProblemStore + ?Sized,
    {
        let class: BTreeSet<Uuid> = store
            .find_problem_ids_by_title(title)
            .await?
            .into_iter()
            .filter(|id| *id != problem_id)
            .collect();

        Ok(class.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryStore;

    #[tokio::test]
    async fn test_mark_solved_twice_creates_one_record() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let problem = store.add_problem("Two Sum");

        let first = SolvedService::mark_solved(&store, user, problem).await.unwrap();
        let second = SolvedService::mark_solved(&store, user, problem).await.unwrap();

        assert!(!first.already_solved);
        assert_eq!(first.newly_marked, 1);
        assert!(second.already_solved);
        assert_eq!(store.solved_count(user, problem), 1);
        assert_eq!(store.solved_records().len(), 1);
    }

    #[tokio::test]
    async fn test_propagates_to_same_title() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let a = store.add_problem("Valid Parentheses");
        let b = store.add_problem("Valid Parentheses");
        let c = store.add_problem("Valid Parentheses");
        let other = store.add_problem("Merge Intervals");

        let outcome = SolvedService::mark_solved(&store, user, a).await.unwrap();

        assert_eq!(outcome.affected_problems, 3);
        assert_eq!(outcome.newly_marked, 3);
        for id in [a, b, c] {
            assert_eq!(store.solved_count(user, id), 1);
        }
        assert_eq!(store.solved_count(user, other), 0);

        SolvedService::mark_solved(&store, user, a).await.unwrap();
        assert_eq!(store.solved_records().len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_already_solved_is_not_duplicated() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let a = store.add_problem("Climbing Stairs");
        let b = store.add_problem("Climbing Stairs");

        SolvedService::mark_solved(&store, user, b).await.unwrap();
        // a was marked through b; solving it directly is a no-op
        let outcome = SolvedService::mark_solved(&store, user, a).await.unwrap();

        assert!(outcome.already_solved);
        assert_eq!(store.solved_records().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_can_be_retried() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let a = store.add_problem("Jump Game");
        let b = store.add_problem("Jump Game");
        store.fail_next_insert();

        let err = SolvedService::mark_solved(&store, user, a).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(store.solved_records().is_empty());

        let outcome = SolvedService::mark_solved(&store, user, a).await.unwrap();
        assert!(!outcome.already_solved);
        assert_eq!(outcome.newly_marked, 2);
        assert_eq!(store.solved_count(user, a), 1);
        assert_eq!(store.solved_count(user, b), 1);
    }

    #[tokio::test]
    async fn test_solved_state_is_per_user() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let problem = store.add_problem("Binary Search");

        SolvedService::mark_solved(&store, alice, problem).await.unwrap();

        assert_eq!(store.solved_count(alice, problem), 1);
        assert_eq!(store.solved_count(bob, problem), 0);
    }

    #[tokio::test]
    async fn test_missing_problem_is_not_found() {
        let store = MemoryStore::new();
        let err = SolvedService::mark_solved(&store, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.solved_records().is_empty());
    }
}
