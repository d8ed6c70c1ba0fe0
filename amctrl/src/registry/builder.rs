use amcore::repo::RepoBackend;
use amrepo::GitBackend;
use clap::Parser;

use crate::policy::SwitchPolicy;
use super::Registry;

#[derive(Clone, Debug, Default, Parser)]
pub struct Builder {
    #[clap(
        long,
        value_name = "AM_SWITCH_POLICY",
        env = "AM_SWITCH_POLICY",
        value_enum,
        default_value_t = SwitchPolicy::AutoClear,
    )]
    pub am_switch_policy: SwitchPolicy,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn am_switch_policy(mut self, value: SwitchPolicy) -> Self {
        self.am_switch_policy = value;
        self
    }

    pub fn build_with(self, backend: impl RepoBackend + 'static) -> Registry {
        Registry::new(backend, self.am_switch_policy)
    }

    /// A registry over working trees opened with libgit2.
    pub fn build(self) -> Registry {
        self.build_with(GitBackend::new())
    }
}
