//! Problem request DTOs

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH},
    models::{Difficulty, NewProblem, ProblemTestCase},
};

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: String,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Worked examples keyed by language, shown to users
    #[serde(default)]
    pub examples: serde_json::Value,

    #[serde(default)]
    pub constraints: String,

    pub hints: Option<String>,

    pub editorial: Option<String>,

    #[validate(length(min = 1))]
    pub testcases: Vec<ProblemTestCase>,

    /// Starter code keyed by language
    #[serde(default)]
    pub code_snippets: serde_json::Value,

    /// Known-good solution per language, e.g. `{"PYTHON": "..."}`
    #[validate(length(min = 1))]
    pub reference_solutions: BTreeMap<String, String>,
}

impl CreateProblemRequest {
    pub fn into_new_problem(self, user_id: Uuid) -> NewProblem {
        NewProblem {
            title: self.title.trim().to_string(),
            description: self.description,
            difficulty: self.difficulty,
            tags: self.tags,
            examples: self.examples,
            constraints: self.constraints,
            hints: self.hints,
            editorial: self.editorial,
            testcases: self.testcases,
            code_snippets: self.code_snippets,
            reference_solutions: self.reference_solutions,
            user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_create_problem() {
        let raw = r#"{
            "title": " Two Sum ",
            "description": "Find two numbers",
            "difficulty": "EASY",
            "tags": ["array"],
            "testcases": [{"input": "1 2", "output": "3"}],
            "codeSnippets": {"PYTHON": "def solve(): pass"},
            "referenceSolutions": {"PYTHON": "print(3)"}
        }"#;

        let request: CreateProblemRequest = serde_json::from_str(raw).unwrap();
        assert!(request.validate().is_ok());

        let problem = request.into_new_problem(Uuid::new_v4());
        assert_eq!(problem.title, "Two Sum");
        assert_eq!(problem.difficulty, Difficulty::Easy);
        assert_eq!(problem.reference_solutions["PYTHON"], "print(3)");
        assert_eq!(problem.examples, serde_json::Value::Null);
    }

    #[test]
    fn test_empty_testcases_fail_validation() {
        let raw = r#"{
            "title": "Two Sum",
            "description": "Find two numbers",
            "difficulty": "HARD",
            "testcases": [],
            "referenceSolutions": {"PYTHON": "print(3)"}
        }"#;

        let request: CreateProblemRequest = serde_json::from_str(raw).unwrap();
        assert!(request.validate().is_err());
    }
}
