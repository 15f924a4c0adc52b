//! Problem model

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

use super::ProblemTestCase;

/// Problem database model
///
/// The same problem may exist as several rows (one per playlist copy); rows
/// with an identical title are treated as one problem for solved-state.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub examples: serde_json::Value,
    pub constraints: String,
    pub hints: Option<String>,
    pub editorial: Option<String>,
    #[serde(skip_serializing)]
    pub testcases: Json<Vec<ProblemTestCase>>,
    pub code_snippets: serde_json::Value,
    #[serde(skip_serializing)]
    pub reference_solutions: Json<BTreeMap<String, String>>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Problem row to insert
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub examples: serde_json::Value,
    pub constraints: String,
    pub hints: Option<String>,
    pub editorial: Option<String>,
    pub testcases: Vec<ProblemTestCase>,
    pub code_snippets: serde_json::Value,
    pub reference_solutions: BTreeMap<String, String>,
    pub user_id: Uuid,
}

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks a problem as solved by a user
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSolved {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A problem with the requesting user's solved records for it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemListing {
    #[serde(flatten)]
    pub problem: Problem,
    /// Empty unless the user solved the problem
    pub solved_by: Vec<ProblemSolved>,
}

impl ProblemListing {
    /// Attach each user solved record to its problem, keeping problem order
    pub fn attach(problems: Vec<Problem>, solved: Vec<ProblemSolved>) -> Vec<Self> {
        let mut by_problem: HashMap<Uuid, Vec<ProblemSolved>> = HashMap::new();
        for record in solved {
            by_problem.entry(record.problem_id).or_default().push(record);
        }

        problems
            .into_iter()
            .map(|problem| Self {
                solved_by: by_problem.remove(&problem.id).unwrap_or_default(),
                problem,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(title: &str) -> Problem {
        let now = Utc::now();
        Problem {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            difficulty: Difficulty::Medium.to_string(),
            tags: Vec::new(),
            examples: serde_json::Value::Null,
            constraints: String::new(),
            hints: None,
            editorial: None,
            testcases: Json(Vec::new()),
            code_snippets: serde_json::Value::Null,
            reference_solutions: Json(BTreeMap::new()),
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_attach_marks_only_solved_problems() {
        let user = Uuid::new_v4();
        let first = problem("Two Sum");
        let second = problem("Three Sum");
        let now = Utc::now();
        let record = ProblemSolved {
            id: Uuid::new_v4(),
            user_id: user,
            problem_id: second.id,
            created_at: now,
            updated_at: now,
        };

        let listings = ProblemListing::attach(vec![first.clone(), second.clone()], vec![record]);

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].problem.id, first.id);
        assert!(listings[0].solved_by.is_empty());
        assert_eq!(listings[1].solved_by.len(), 1);
        assert_eq!(listings[1].solved_by[0].user_id, user);
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listing = ProblemListing {
            problem: problem("Two Sum"),
            solved_by: Vec::new(),
        };
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["title"], "Two Sum");
        assert_eq!(json["solvedBy"], serde_json::json!([]));
        assert!(json.get("referenceSolutions").is_none());
    }
}
