//! The admin CRUD pages (students, teachers, site settings, admin users).
//!
//! Each page edits one registry table through the row gateway. A resource
//! adds the form rules on top: required fields, which column labels a row in
//! the activity log, and any per-page value checks.

use crate::error::CoreError;
use crate::roles;
use crate::tables::{self, is_plain_identifier, is_system_column};
use crate::value::{Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminResource {
    /// URL segment, e.g. `site-settings`.
    pub slug: &'static str,
    pub table: &'static str,
    /// Entity type recorded in the activity log.
    pub entity_type: &'static str,
    pub required: &'static [&'static str],
    /// Column whose value names a row in activity details.
    pub label_column: &'static str,
    pub order_column: &'static str,
}

pub const STUDENTS: AdminResource = AdminResource {
    slug: "students",
    table: tables::STUDENTS,
    entity_type: "student",
    required: &["roll_number", "name"],
    label_column: "roll_number",
    order_column: "roll_number",
};

pub const TEACHERS: AdminResource = AdminResource {
    slug: "teachers",
    table: tables::TEACHERS,
    entity_type: "teacher",
    required: &["teacher_id", "name"],
    label_column: "teacher_id",
    order_column: "name",
};

pub const SITE_SETTINGS: AdminResource = AdminResource {
    slug: "site-settings",
    table: tables::SITE_SETTINGS,
    entity_type: "site_setting",
    required: &["key"],
    label_column: "key",
    order_column: "key",
};

pub const ADMIN_USERS: AdminResource = AdminResource {
    slug: "admin-users",
    table: tables::USER_ROLES,
    entity_type: "admin_user",
    required: &["user_id", "role"],
    label_column: "user_id",
    order_column: "granted_at",
};

pub const RESOURCES: &[AdminResource] = &[STUDENTS, TEACHERS, SITE_SETTINGS, ADMIN_USERS];

pub fn find_resource(slug: &str) -> Option<&'static AdminResource> {
    RESOURCES.iter().find(|r| r.slug == slug)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Drop system columns and reject names that are not plain identifiers.
///
/// The result is the editable field set sent to the gateway.
pub fn editable_fields(fields: &Row) -> Result<Row, CoreError> {
    let mut out = Row::new();
    for (column, value) in fields {
        if !is_plain_identifier(column) {
            return Err(CoreError::Validation(format!("Invalid column name: {column}")));
        }
        if is_system_column(column) {
            continue;
        }
        out.insert(column.clone(), value.clone());
    }
    Ok(out)
}

impl AdminResource {
    /// Check a submitted form. `partial` is used for updates, where absent
    /// required fields are fine but present ones must not be blank.
    pub fn validate(&self, fields: &Row, partial: bool) -> Result<(), CoreError> {
        for &name in self.required {
            match fields.get(name) {
                Some(v) if is_blank(v) => {
                    return Err(CoreError::Validation(format!("{name} is required")));
                }
                None if !partial => {
                    return Err(CoreError::Validation(format!("{name} is required")));
                }
                _ => {}
            }
        }

        if self.table == tables::USER_ROLES {
            if let Some(role) = fields.get("role") {
                let role = role.as_plain_string();
                if !roles::is_known_role(&role) {
                    return Err(CoreError::Validation(format!(
                        "role must be one of: {}",
                        roles::ELEVATED_ROLES.join(", ")
                    )));
                }
            }
            if let Some(user_id) = fields.get("user_id") {
                if uuid::Uuid::parse_str(&user_id.as_plain_string()).is_err() {
                    return Err(CoreError::Validation("user_id must be a UUID".into()));
                }
            }
        }
        Ok(())
    }

    /// Label of `row` for activity details; empty when the column is absent.
    pub fn label(&self, row: &Row) -> String {
        row.get(self.label_column)
            .map(Value::as_plain_string)
            .unwrap_or_default()
    }
}
