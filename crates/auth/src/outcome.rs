//! Tagged authentication outcome.

/// Result of looking up the current user.
///
/// The three states are explicit variants rather than sentinel values
/// sharing the user type: `Unauthenticated` means no valid session exists
/// (the caller should answer 401), `Denied` means the session is valid but
/// access is disallowed (403).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome<U> {
    Authenticated(U),
    Unauthenticated,
    Denied,
}

impl<U> AuthOutcome<U> {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The user, if authenticated.
    pub fn user(&self) -> Option<&U> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn map<V>(self, f: impl FnOnce(U) -> V) -> AuthOutcome<V> {
        match self {
            Self::Authenticated(user) => AuthOutcome::Authenticated(f(user)),
            Self::Unauthenticated => AuthOutcome::Unauthenticated,
            Self::Denied => AuthOutcome::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_the_non_user_variants() {
        let unauth: AuthOutcome<u32> = AuthOutcome::Unauthenticated;
        assert_eq!(unauth.map(|n| n + 1), AuthOutcome::Unauthenticated);

        let denied: AuthOutcome<u32> = AuthOutcome::Denied;
        assert_eq!(denied.map(|n| n + 1), AuthOutcome::Denied);

        assert_eq!(
            AuthOutcome::Authenticated(1u32).map(|n| n + 1),
            AuthOutcome::Authenticated(2)
        );
    }

    #[test]
    fn user_is_only_present_when_authenticated() {
        assert_eq!(AuthOutcome::Authenticated("u").user(), Some(&"u"));
        assert_eq!(AuthOutcome::<&str>::Unauthenticated.user(), None);
        assert_eq!(AuthOutcome::<&str>::Denied.user(), None);
    }
}
