//! Identity, roles, and profile models.
//!
//! The decoded credential claim is the source of truth for identity and role.
//! Client-side role handling only selects routes and visible UI; authorization
//! is enforced server-side on every request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Route shown when no session is active.
pub const LOGIN_ROUTE: &str = "/login";

/// User role for routing and display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    Goffice,
    DeptHead,
}

impl Role {
    /// Parse a role claim. Total: an unrecognized role degrades to `Student`,
    /// which routes to the default dashboard.
    pub fn parse(role: &str) -> Role {
        match role {
            "admin" => Role::Admin,
            "goffice" => Role::Goffice,
            "dept_head" => Role::DeptHead,
            _ => Role::Student,
        }
    }

    /// Post-login redirect target for this role.
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Admin => "/admin-dashboard",
            Role::DeptHead => "/dept-dashboard",
            Role::Goffice => "/goffice-dashboard",
            Role::Student => "/dashboard",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
            Role::Goffice => write!(f, "goffice"),
            Role::DeptHead => write!(f, "dept_head"),
        }
    }
}

/// Decoded credential payload. `sub` doubles as the identity's primary key
/// and email address.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Decoded identity, owned exclusively by the session context. Created on
/// successful login or credential decode at startup, destroyed on logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub role: Role,
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            id: claims.sub.clone(),
            role: Role::parse(&claims.role),
            email: claims.sub,
        }
    }
}

/// Student profile as returned by `GET /profile/me`. A 404 on that endpoint
/// means the profile has not been created yet, which is a normal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    pub enrollment_no: Option<String>,
    pub department: Option<String>,
    pub branch: Option<String>,
    pub mobile_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub category: Option<String>,
    pub annual_family_income: Option<f64>,
    pub current_year_or_semester: Option<String>,
}

/// User account envelope (profile endpoint response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub profile: Option<StudentProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("goffice"), Role::Goffice);
        assert_eq!(Role::parse("dept_head"), Role::DeptHead);
        assert_eq!(Role::parse("student"), Role::Student);
    }

    #[test]
    fn test_role_parse_unknown_defaults_to_student() {
        assert_eq!(Role::parse("superuser"), Role::Student);
        assert_eq!(Role::parse(""), Role::Student);
    }

    #[test]
    fn test_dashboard_routes() {
        assert_eq!(Role::Admin.dashboard_route(), "/admin-dashboard");
        assert_eq!(Role::DeptHead.dashboard_route(), "/dept-dashboard");
        assert_eq!(Role::Goffice.dashboard_route(), "/goffice-dashboard");
        assert_eq!(Role::Student.dashboard_route(), "/dashboard");
    }

    #[test]
    fn test_identity_from_claims() {
        let claims = Claims {
            sub: "a@b.com".to_string(),
            role: "dept_head".to_string(),
            exp: None,
        };
        let identity = Identity::from(claims);
        assert_eq!(identity.id, "a@b.com");
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.role, Role::DeptHead);
    }
}
