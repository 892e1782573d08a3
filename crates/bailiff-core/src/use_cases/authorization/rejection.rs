use std::fmt;

use crate::mirror::RepushTarget;

/// Reason why an authorization request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    NoIssue,
    NotPullRequest,
    NotCreation,
    PullRequestNotFound,
    PullRequestNotOpen,
    PullRequestFromUpstream,
    NonWhitelisted,
    CommentTooLong,
    NoTriggerPattern,
    MismatchedSha,
}

impl Rejection {
    pub const ALL: [Rejection; 10] = [
        Rejection::NoIssue,
        Rejection::NotPullRequest,
        Rejection::NotCreation,
        Rejection::PullRequestNotFound,
        Rejection::PullRequestNotOpen,
        Rejection::PullRequestFromUpstream,
        Rejection::NonWhitelisted,
        Rejection::CommentTooLong,
        Rejection::NoTriggerPattern,
        Rejection::MismatchedSha,
    ];

    /// Label used in logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Rejection::NoIssue => "no-issue-found",
            Rejection::NotPullRequest => "not-a-pull-request",
            Rejection::NotCreation => "not-a-creation-event",
            Rejection::PullRequestNotFound => "pull-request-not-found",
            Rejection::PullRequestNotOpen => "pull-request-not-open",
            Rejection::PullRequestFromUpstream => "pull-request-from-upstream-repo",
            Rejection::NonWhitelisted => "non-whitelisted-user",
            Rejection::CommentTooLong => "comment-too-long",
            Rejection::NoTriggerPattern => "no-trigger-pattern-found",
            Rejection::MismatchedSha => "mismatched-sha",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a handled authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// The fork commit was mirrored and its status published.
    Authorized(RepushTarget),
    Rejected(Rejection),
}
