use serde::{Deserialize, Serialize};

use super::{GhIssue, GhIssueComment, GhIssueCommentAction};
use crate::types::common::{GhRepository, GhUser};

/// GitHub Issue comment event.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct GhIssueCommentEvent {
    /// Action.
    pub action: GhIssueCommentAction,
    /// Issue.
    pub issue: Option<GhIssue>,
    /// Comment.
    pub comment: GhIssueComment,
    /// Repository.
    pub repository: Option<GhRepository>,
    /// Sender.
    pub sender: GhUser,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::GhIssuePullRequest;

    #[test]
    fn test_deserialize() {
        let event: GhIssueCommentEvent = serde_json::from_str(
            r#"{
                "action": "created",
                "issue": {
                    "number": 3,
                    "title": "Add feature",
                    "pull_request": {"url": "https://api.github.com/repos/me/test/pulls/3"}
                },
                "comment": {"id": 12, "body": "/ci authorize abcdef", "user": {"login": "john"}},
                "repository": {"name": "test", "full_name": "me/test"},
                "sender": {"login": "john"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            event,
            GhIssueCommentEvent {
                action: GhIssueCommentAction::Created,
                issue: Some(GhIssue {
                    number: 3,
                    pull_request: Some(GhIssuePullRequest {
                        url: "https://api.github.com/repos/me/test/pulls/3".into()
                    })
                }),
                comment: GhIssueComment {
                    id: 12,
                    body: "/ci authorize abcdef".into(),
                    user: GhUser {
                        login: "john".into()
                    }
                },
                repository: Some(GhRepository {
                    name: "test".into(),
                    full_name: "me/test".into()
                }),
                sender: GhUser {
                    login: "john".into()
                }
            }
        );
    }

    #[test]
    fn test_deserialize_unknown_action() {
        let event: GhIssueCommentEvent = serde_json::from_str(
            r#"{"action": "pinned", "comment": {"id": 1, "body": "", "user": {"login": "a"}}, "sender": {"login": "a"}}"#,
        )
        .unwrap();

        assert_eq!(event.action, GhIssueCommentAction::Unknown);
        assert_eq!(event.issue, None);
    }
}
