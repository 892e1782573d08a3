use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use bailiff_ghapi_interface::ApiService;
use tokio::{
    sync::RwLock,
    time::{interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::MembershipService;
use crate::MembershipError;

/// Periodically refreshed set of privileged team members.
pub struct TeamMembershipCache {
    org: String,
    teams: Vec<String>,
    members: RwLock<HashSet<String>>,
}

impl TeamMembershipCache {
    pub fn new(org: String, teams: Vec<String>) -> Self {
        Self {
            org,
            teams,
            members: RwLock::new(HashSet::new()),
        }
    }

    /// Rebuild the member set from every configured team.
    ///
    /// The visible set is only replaced when every team was listed.
    #[tracing::instrument(skip_all, fields(org = %self.org))]
    pub async fn refresh(&self, api_service: &dyn ApiService) -> Result<(), MembershipError> {
        let mut members = HashSet::new();
        for team in &self.teams {
            let team_members = api_service
                .team_members_list(&self.org, team)
                .await
                .map_err(|e| MembershipError::TeamSyncFailed {
                    team: team.clone(),
                    source: e,
                })?;

            members.extend(team_members.into_iter().map(|user| user.login));
        }

        let count = members.len();
        *self.members.write().await = members;
        debug!(members_count = count, message = "Refreshed team membership");

        Ok(())
    }

    /// Refresh now, then on every interval tick, until cancelled.
    pub async fn run_periodic(
        &self,
        api_service: &dyn ApiService,
        period: Duration,
        cancellation_token: CancellationToken,
    ) -> Result<(), MembershipError> {
        if period.is_zero() {
            return Err(MembershipError::InvalidPeriod);
        }

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            teams = ?self.teams,
            period_secs = period.as_secs(),
            message = "Starting team membership refresh"
        );

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    info!(message = "Stopping team membership refresh");
                    return Err(MembershipError::Cancelled);
                }
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = cancellation_token.cancelled() => {
                            info!(message = "Stopping team membership refresh during sync");
                            return Err(MembershipError::Cancelled);
                        }
                        result = self.refresh(api_service) => {
                            if let Err(e) = result {
                                error!(error = %e, message = "Could not refresh team membership");
                            }
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl MembershipService for TeamMembershipCache {
    async fn is_member(&self, login: &str) -> bool {
        self.members.read().await.contains(login)
    }
}

#[cfg(test)]
mod tests {
    use bailiff_ghapi_interface::{
        types::{GhCommitStatusState, GhPullRequest, GhUser},
        ApiError, MockApiService,
    };

    use super::*;

    fn users(logins: &[&str]) -> Vec<GhUser> {
        logins
            .iter()
            .map(|login| GhUser {
                login: login.to_string(),
            })
            .collect()
    }

    fn arrange_cache() -> TeamMembershipCache {
        TeamMembershipCache::new("me".into(), vec!["editors".into(), "maintainers".into()])
    }

    #[tokio::test]
    async fn refresh_merges_every_team() {
        let mut api_service = MockApiService::new();
        api_service
            .expect_team_members_list()
            .withf(|org, team| org == "me" && team == "editors")
            .once()
            .return_once(|_, _| Ok(users(&["john", "jenny"])));
        api_service
            .expect_team_members_list()
            .withf(|org, team| org == "me" && team == "maintainers")
            .once()
            .return_once(|_, _| Ok(users(&["jenny", "max"])));

        let cache = arrange_cache();
        cache.refresh(&api_service).await.unwrap();

        assert!(cache.is_member("john").await);
        assert!(cache.is_member("jenny").await);
        assert!(cache.is_member("max").await);
        assert!(!cache.is_member("anyone-else").await);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_members() {
        let cache = arrange_cache();

        let mut api_service = MockApiService::new();
        api_service
            .expect_team_members_list()
            .times(2)
            .returning(|_, team| {
                Ok(if team == "editors" {
                    users(&["john"])
                } else {
                    users(&["max"])
                })
            });
        cache.refresh(&api_service).await.unwrap();

        let mut api_service = MockApiService::new();
        api_service
            .expect_team_members_list()
            .withf(|org, team| org == "me" && team == "editors")
            .once()
            .return_once(|_, _| Ok(users(&["jenny"])));
        api_service
            .expect_team_members_list()
            .withf(|org, team| org == "me" && team == "maintainers")
            .once()
            .return_once(|_, _| {
                Err(ApiError::ImplementationError {
                    source: "boom".into(),
                })
            });

        let result = cache.refresh(&api_service).await;
        assert!(matches!(
            result,
            Err(MembershipError::TeamSyncFailed { ref team, .. }) if team == "maintainers"
        ));

        assert!(cache.is_member("john").await);
        assert!(cache.is_member("max").await);
        assert!(!cache.is_member("jenny").await);
    }

    #[tokio::test(start_paused = true)]
    async fn run_periodic_refreshes_until_cancelled() {
        let cache = TeamMembershipCache::new("me".into(), vec!["editors".into()]);
        let token = CancellationToken::new();

        let mut api_service = MockApiService::new();
        api_service
            .expect_team_members_list()
            .times(3)
            .returning(|_, _| Ok(users(&["john"])));

        let (result, _) = tokio::join!(
            cache.run_periodic(&api_service, Duration::from_secs(60), token.clone()),
            async {
                tokio::time::sleep(Duration::from_secs(125)).await;
                token.cancel();
            }
        );

        assert!(matches!(result, Err(MembershipError::Cancelled)));
        assert!(cache.is_member("john").await);
    }

    #[tokio::test(start_paused = true)]
    async fn run_periodic_survives_refresh_failures() {
        let cache = TeamMembershipCache::new("me".into(), vec!["editors".into()]);
        let token = CancellationToken::new();

        let mut api_service = MockApiService::new();
        let mut seq = mockall::Sequence::new();
        api_service
            .expect_team_members_list()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(ApiError::ImplementationError {
                    source: "boom".into(),
                })
            });
        api_service
            .expect_team_members_list()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(users(&["jenny"])));

        let (result, _) = tokio::join!(
            cache.run_periodic(&api_service, Duration::from_secs(60), token.clone()),
            async {
                tokio::time::sleep(Duration::from_secs(90)).await;
                token.cancel();
            }
        );

        assert!(matches!(result, Err(MembershipError::Cancelled)));
        assert!(cache.is_member("jenny").await);
    }

    #[tokio::test(start_paused = true)]
    async fn run_periodic_rejects_zero_period() {
        let cache = arrange_cache();
        let mut api_service = MockApiService::new();
        api_service.expect_team_members_list().never();

        let result = cache
            .run_periodic(&api_service, Duration::ZERO, CancellationToken::new())
            .await;

        assert!(matches!(result, Err(MembershipError::InvalidPeriod)));
    }

    /// Team listing that never answers.
    struct StalledApiService;

    #[async_trait]
    impl ApiService for StalledApiService {
        async fn pulls_get(
            &self,
            _owner: &str,
            _name: &str,
            _issue_number: u64,
        ) -> bailiff_ghapi_interface::Result<GhPullRequest> {
            unimplemented!()
        }

        async fn team_members_list(
            &self,
            _org: &str,
            _team_slug: &str,
        ) -> bailiff_ghapi_interface::Result<Vec<GhUser>> {
            std::future::pending().await
        }

        async fn commit_statuses_update(
            &self,
            _owner: &str,
            _name: &str,
            _git_ref: &str,
            _status: GhCommitStatusState,
            _title: &str,
            _body: &str,
        ) -> bailiff_ghapi_interface::Result<()> {
            unimplemented!()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_periodic_cancels_stalled_refresh() {
        let cache = arrange_cache();
        let token = CancellationToken::new();

        let (result, _) = tokio::join!(
            cache.run_periodic(&StalledApiService, Duration::from_secs(60), token.clone()),
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                token.cancel();
            }
        );

        assert!(matches!(result, Err(MembershipError::Cancelled)));
        assert!(!cache.is_member("john").await);
    }
}
