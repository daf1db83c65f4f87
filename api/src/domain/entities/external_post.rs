//! Records served by the upstream feed

use serde::{Deserialize, Serialize};

/// A post as returned by the upstream JSON API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPost {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_upstream_post() {
        let json = r#"{"userId": 1, "id": 3, "title": "qui est esse", "body": "est rerum"}"#;
        let post: ExternalPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.id, 3);
        assert_eq!(post.title, "qui est esse");
    }

    #[test]
    fn parse_upstream_post_missing_field() {
        let json = r#"{"id": 3, "title": "x"}"#;
        let result: Result<ExternalPost, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
