//! Property-test run profile read from the environment.
//!
//! Suites call [`ProptestRunProfile::load`] with their own defaults so CI can
//! raise or lower case counts for every suite from one place.

use std::env;

/// Environment variable overriding proptest case counts.
pub const PROPTEST_CASES_ENV_KEY: &str = "PROPTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const ZIGFIX_PBT_FORK_ENV_KEY: &str = "ZIGFIX_PBT_FORK";

/// Case count and fork policy for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the given defaults when a variable is
    /// unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use zigfix_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROPTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(ZIGFIX_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let original = env::var(key).ok();
            // SAFETY: tests serialize access with ENV_LOCK.
            unsafe {
                match value {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: tests serialize access with ENV_LOCK.
            unsafe {
                match &self.original {
                    Some(value) => env::set_var(self.key, value),
                    None => env::remove_var(self.key),
                }
            }
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _cases = EnvGuard::new(PROPTEST_CASES_ENV_KEY, cases);
        let _fork = EnvGuard::new(ZIGFIX_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(64, default_fork)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = load_with(None, None, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 256 ", 256)]
    #[case("10000", 10_000)]
    fn case_overrides_are_honoured(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("many")]
    fn malformed_case_overrides_fall_back(#[case] raw: &str) {
        assert_eq!(load_with(Some(raw), None, false).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("ON", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("False", false)]
    #[case("0", false)]
    fn fork_overrides_are_honoured(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(load_with(None, Some(raw), !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("sometimes")]
    fn malformed_fork_overrides_fall_back(#[case] raw: &str) {
        assert!(load_with(None, Some(raw), true).fork());
    }
}
