pub const EXTERNAL_FORK_BRANCH_PREFIX: &str = "external-fork/";

/// Destination branch for a fork branch in the trusted repository.
pub fn dest_branch_name(fork_repo: &str, source_branch: &str) -> String {
    format!(
        "{EXTERNAL_FORK_BRANCH_PREFIX}{}",
        bailiff_crypto::sha256_hex(format!("{fork_repo}/{source_branch}").as_bytes())
    )
}

/// One mirror operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepushTarget {
    fork_repo: String,
    source_branch: String,
    dest_branch: String,
    expected_sha: String,
}

impl RepushTarget {
    pub fn new(fork_repo: String, source_branch: String, expected_sha: String) -> Self {
        let dest_branch = dest_branch_name(&fork_repo, &source_branch);
        Self {
            fork_repo,
            source_branch,
            dest_branch,
            expected_sha,
        }
    }

    pub fn fork_repo(&self) -> &str {
        &self.fork_repo
    }

    pub fn source_branch(&self) -> &str {
        &self.source_branch
    }

    pub fn dest_branch(&self) -> &str {
        &self.dest_branch
    }

    pub fn expected_sha(&self) -> &str {
        &self.expected_sha
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_dest_branch_name() {
        for (fork_repo, source_branch, expected) in [
            (
                "foo/optimism",
                "master",
                "external-fork/0aeca8bc7690cfe752f8b495980e5606e84b607a445e8a53552072566ddd7478",
            ),
            (
                "foo/otherrepo",
                "master",
                "external-fork/10c55da1bd272ed42ca341d89501741aa027d56ae6be51bca669bed4372a00cc",
            ),
            (
                "foouser/optimism",
                "branch/with/slashes",
                "external-fork/d884bc21bd02f15d28349e1dfdd0dd5ad04a875084e1b77d931379a5e8319cc4",
            ),
        ] {
            assert_eq!(dest_branch_name(fork_repo, source_branch), expected);
        }
    }

    #[test]
    fn test_new_derives_dest_branch() {
        let target = RepushTarget::new(
            "not-ethereum-optimism/optimism".into(),
            "feat/super-branch".into(),
            "aaaaaaaa".into(),
        );

        assert_eq!(
            target.dest_branch(),
            "external-fork/3593dababb1188e36163c6b679d9e382371b697de298374183ac5457082c334d"
        );
        assert_eq!(target.expected_sha(), "aaaaaaaa");
    }
}
