use bailiff_config::Config;
use bailiff_ghapi_interface::ApiService;

use crate::{membership::MembershipService, mirror::MirrorService, CoreModule, TriggerPattern};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub trigger_pattern: &'a TriggerPattern,
    pub api_service: &'a (dyn ApiService + 'a),
    pub membership_service: &'a (dyn MembershipService + 'a),
    pub mirror_service: &'a (dyn MirrorService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use bailiff_config::{Config, DEFAULT_TRIGGER_PATTERN};
    use bailiff_ghapi_interface::MockApiService;

    use crate::{
        membership::MockMembershipService, mirror::MockMirrorService, CoreContext, CoreModule,
        TriggerPattern,
    };

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub trigger_pattern: TriggerPattern,
        pub api_service: MockApiService,
        pub membership_service: MockMembershipService,
        pub mirror_service: MockMirrorService,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            let mut config = Config::from_env_no_version();
            config.repository.org = "ethereum-optimism".into();
            config.repository.repo = "optimism".into();
            config.repository.admin_teams = vec!["editors".into()];

            Self {
                config,
                core_module: CoreModule::builder().build(),
                trigger_pattern: TriggerPattern::new(DEFAULT_TRIGGER_PATTERN)
                    .expect("default trigger pattern should compile"),
                api_service: MockApiService::new(),
                membership_service: MockMembershipService::new(),
                mirror_service: MockMirrorService::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                trigger_pattern: &self.trigger_pattern,
                api_service: &self.api_service,
                membership_service: &self.membership_service,
                mirror_service: &self.mirror_service,
            }
        }
    }
}
