use serde::{Deserialize, Serialize};

/// Portal roles. Each portal is scoped to exactly one role; there is no
/// hierarchy between them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Trainer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Trainer => "trainer",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "member" => Some(Role::Member),
            "trainer" => Some(Role::Trainer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Login page for this role's portal. Guard failures redirect here.
    pub fn login_path(&self) -> &'static str {
        match self {
            Role::Member => "/member/login",
            Role::Trainer => "/trainer/login",
            Role::Admin => "/admin/login",
        }
    }

    /// Landing page after a successful login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Member => "/member/dashboard",
            Role::Trainer => "/trainer/schedule",
            Role::Admin => "/admin/dashboard",
        }
    }

    /// Credential table backing this role.
    pub(crate) fn credential_table(&self) -> &'static str {
        match self {
            Role::Member => "members",
            Role::Trainer => "trainers",
            Role::Admin => "admin_staff",
        }
    }
}

/// Signed session cookie payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Role,
    pub name: String,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated user attached to guarded requests.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i32,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterMemberForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "crate::web::forms::empty_string_as_none")]
    pub date_of_birth: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Member, Role::Trainer, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("Trainer"), Some(Role::Trainer));
        assert_eq!(Role::from_str("receptionist"), None);
    }

    #[test]
    fn test_portal_paths() {
        assert_eq!(Role::Member.login_path(), "/member/login");
        assert_eq!(Role::Member.dashboard_path(), "/member/dashboard");
        assert_eq!(Role::Trainer.dashboard_path(), "/trainer/schedule");
        assert_eq!(Role::Admin.dashboard_path(), "/admin/dashboard");
    }
}
