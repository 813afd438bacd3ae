//! AWS credential profile resolution
//!
//! Precedence: `--aws-profile` flag, then the `AWS_PROFILE` environment
//! variable, then `"default"`. Empty values are treated as absent.

pub const AWS_PROFILE_ENV: &str = "AWS_PROFILE";
pub const DEFAULT_AWS_PROFILE: &str = "default";

pub fn resolve_aws_profile(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| env.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_AWS_PROFILE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        assert_eq!(
            resolve_aws_profile(Some("prod"), Some("staging".into())),
            "prod"
        );
    }

    #[test]
    fn test_env_used_without_flag() {
        assert_eq!(resolve_aws_profile(None, Some("staging".into())), "staging");
    }

    #[test]
    fn test_default_fallback() {
        assert_eq!(resolve_aws_profile(None, None), "default");
        assert_eq!(resolve_aws_profile(Some(""), Some("  ".into())), "default");
    }
}
