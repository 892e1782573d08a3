//! Webhook constants.

use std::time::Duration;

/// GitHub event header.
pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";
/// GitHub signature header.
pub const GITHUB_SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
/// Signature prefix.
pub const SIGNATURE_PREFIX: &str = "sha256=";
/// Liveness check path.
pub const HEALTH_CHECK_PATH: &str = "/healthz";
/// Maximum accepted webhook payload size.
pub const MAX_PAYLOAD_SIZE: usize = 25 * 1024 * 1024;
/// Processing timeout for one webhook, also used as the graceful shutdown timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);
