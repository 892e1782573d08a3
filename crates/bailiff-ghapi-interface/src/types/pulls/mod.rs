mod pull_request;
mod pull_request_state;

pub use pull_request::GhPullRequest;
pub use pull_request_state::GhPullRequestState;
