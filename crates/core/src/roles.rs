//! Well-known role name constants.
//!
//! These must match the check constraint on `user_roles.role` in the
//! initial migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Roles that pass the elevated SQL execution gate.
pub const ELEVATED_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SUPER_ADMIN];

pub fn is_known_role(role: &str) -> bool {
    ELEVATED_ROLES.contains(&role)
}

/// Presence of any role row makes a user an admin for UI gating.
pub fn grants_admin<S: AsRef<str>>(roles: &[S]) -> bool {
    !roles.is_empty()
}

/// Whether any of `roles` may use the privileged SQL gateway.
pub fn grants_elevated_sql<S: AsRef<str>>(roles: &[S]) -> bool {
    roles.iter().any(|r| is_known_role(r.as_ref()))
}
