//! Execution request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_SOURCE_CODE_SIZE;

/// Run code against caller-supplied test cases
#[derive(Debug, Deserialize, Validate)]
pub struct ExecuteCodeRequest {
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub source_code: String,

    /// Judge0 language id
    #[validate(range(min = 1))]
    pub language_id: i32,

    /// One entry per test case
    pub stdin: Vec<String>,

    /// Same length as `stdin`
    pub expected_outputs: Vec<String>,

    /// Clients send this one camelCased
    #[serde(alias = "problemId")]
    pub problem_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(problem_key: &str, problem_id: Uuid) -> serde_json::Value {
        serde_json::json!({
            "source_code": "print(input())",
            "language_id": 71,
            "stdin": ["1", "2"],
            "expected_outputs": ["1", "2"],
            problem_key: problem_id,
        })
    }

    #[test]
    fn test_decode_accepts_both_problem_id_spellings() {
        let id = Uuid::new_v4();

        for key in ["problem_id", "problemId"] {
            let request: ExecuteCodeRequest = serde_json::from_value(body(key, id)).unwrap();
            assert_eq!(request.problem_id, id);
            assert_eq!(request.stdin, vec!["1", "2"]);
            assert!(request.validate().is_ok());
        }
    }

    #[test]
    fn test_missing_problem_id_is_rejected() {
        let mut value = body("problem_id", Uuid::new_v4());
        value.as_object_mut().unwrap().remove("problem_id");

        assert!(serde_json::from_value::<ExecuteCodeRequest>(value).is_err());
    }
}
