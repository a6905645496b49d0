//! Legacy `action` discriminator

use serde_json::Value;

/// Operation selected by a legacy `auth.php` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyAction {
    Login,
    Logout,
    /// Also the fallback for unrecognized actions
    Check,
}

impl LegacyAction {
    /// Pick the action for one request.
    ///
    /// A body `action` key wins over the query parameter, whatever its value.
    /// Only an exact `"login"` or `"logout"` selects those operations; any
    /// other present value (blank, differently cased, non-string) is a check.
    /// When the key is missing from both, POST means login and anything else
    /// means check.
    pub fn resolve(is_post: bool, body_action: Option<&Value>, query_action: Option<&str>) -> Self {
        match (body_action, query_action) {
            (Some(value), _) => Self::parse(value.as_str()),
            (None, Some(action)) => Self::parse(Some(action)),
            (None, None) if is_post => Self::Login,
            (None, None) => Self::Check,
        }
    }

    fn parse(action: Option<&str>) -> Self {
        match action {
            Some("login") => Self::Login,
            Some("logout") => Self::Logout,
            _ => Self::Check,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Check => "check",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_depend_on_method() {
        assert_eq!(LegacyAction::resolve(true, None, None), LegacyAction::Login);
        assert_eq!(LegacyAction::resolve(false, None, None), LegacyAction::Check);
    }

    #[test]
    fn test_body_wins_over_query() {
        assert_eq!(
            LegacyAction::resolve(true, Some(&json!("logout")), Some("login")),
            LegacyAction::Logout
        );
        assert_eq!(
            LegacyAction::resolve(false, None, Some("logout")),
            LegacyAction::Logout
        );
        assert_eq!(
            LegacyAction::resolve(false, None, Some("login")),
            LegacyAction::Login
        );
    }

    #[test]
    fn test_present_blank_is_check() {
        assert_eq!(
            LegacyAction::resolve(true, Some(&json!("")), None),
            LegacyAction::Check
        );
        assert_eq!(
            LegacyAction::resolve(true, Some(&json!("  ")), Some("login")),
            LegacyAction::Check
        );
        assert_eq!(LegacyAction::resolve(true, None, Some("")), LegacyAction::Check);
    }

    #[test]
    fn test_non_string_action_is_check() {
        assert_eq!(
            LegacyAction::resolve(true, Some(&json!(123)), None),
            LegacyAction::Check
        );
        assert_eq!(
            LegacyAction::resolve(true, Some(&Value::Null), None),
            LegacyAction::Check
        );
    }

    #[test]
    fn test_matching_is_exact() {
        assert_eq!(
            LegacyAction::resolve(true, Some(&json!("bogus")), None),
            LegacyAction::Check
        );
        assert_eq!(
            LegacyAction::resolve(true, Some(&json!("LOGIN")), None),
            LegacyAction::Check
        );
        assert_eq!(
            LegacyAction::resolve(false, None, Some(" logout ")),
            LegacyAction::Check
        );
    }
}
