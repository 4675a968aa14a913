//! Role-based view gating.
//!
//! [`authorize`] is a pure decision function: it never performs I/O and never
//! mutates the user or the guard. The caller acts on the returned [`Access`]
//! (render, or navigate to login / the unauthorized page).

use crate::model::{Role, User};

/// Outcome of an authorization check for a protected surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToLogin,
    RedirectToUnauthorized,
}

/// Permitted roles for one route, fixed at configuration time.
///
/// An empty guard means the surface is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: &'static [Role],
}

impl RouteGuard {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub const fn public() -> Self {
        Self { allowed: &[] }
    }

    pub fn is_public(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

/// Decide whether `user` may view a surface guarded by `guard`.
///
/// Rules, evaluated in order: an empty guard allows anyone; a missing user is
/// sent to login; a user whose role is not permitted is sent to the
/// unauthorized page. Absence of data counts as "not authorized", never as an
/// error.
pub fn authorize(user: Option<&User>, guard: &RouteGuard) -> Access {
    if guard.is_public() {
        return Access::Allow;
    }
    let Some(user) = user else {
        return Access::RedirectToLogin;
    };
    if guard.permits(user.role) {
        Access::Allow
    } else {
        Access::RedirectToUnauthorized
    }
}

/// Route prefixes that bounce to the login page when a 401 invalidates the
/// session. Unauthorized responses on any other route stay where they are.
pub const PROTECTED_PATHS: &[&str] = &[
    "/dashboard",
    "/updateprofile",
    "/journals/uploads",
    "/manage-journals",
];

/// Whether an expired session on `path` should redirect to login.
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PATHS.iter().any(|p| path.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.org".into(),
            role,
        }
    }

    #[test]
    fn empty_guard_allows_everyone() {
        let guard = RouteGuard::public();
        assert_eq!(authorize(None, &guard), Access::Allow);
        for role in [Role::Admin, Role::Author, Role::User] {
            assert_eq!(authorize(Some(&user(role)), &guard), Access::Allow);
        }
    }

    #[test]
    fn missing_user_redirects_to_login() {
        let guard = RouteGuard::new(&[Role::Admin]);
        assert_eq!(authorize(None, &guard), Access::RedirectToLogin);
    }

    #[test]
    fn wrong_role_redirects_to_unauthorized() {
        let guard = RouteGuard::new(&[Role::Admin]);
        assert_eq!(
            authorize(Some(&user(Role::User)), &guard),
            Access::RedirectToUnauthorized
        );
        assert_eq!(
            authorize(Some(&user(Role::Author)), &guard),
            Access::RedirectToUnauthorized
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        let guard = RouteGuard::new(&[Role::Admin, Role::Author]);
        assert_eq!(authorize(Some(&user(Role::Admin)), &guard), Access::Allow);
        assert_eq!(authorize(Some(&user(Role::Author)), &guard), Access::Allow);
    }

    #[test]
    fn gate_does_not_mutate_inputs() {
        let guard = RouteGuard::new(&[Role::Author]);
        let u = user(Role::Author);
        let before = u.clone();
        let _ = authorize(Some(&u), &guard);
        assert_eq!(u, before);
    }

    #[test]
    fn protected_paths_match_by_prefix() {
        assert!(is_protected_path("/dashboard"));
        assert!(is_protected_path("/manage-journals/42"));
        assert!(!is_protected_path("/journals"));
        assert!(!is_protected_path("/login"));
    }
}
