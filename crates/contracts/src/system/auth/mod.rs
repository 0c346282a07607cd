use serde::{Deserialize, Serialize};

/// Credentials for `POST auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// Bearer token issued by `POST auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Closed role taxonomy of the system.
///
/// Anything the API sends besides the two known roles deserializes to
/// `Unknown`, which is denied on every role-gated screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrador")]
    Administrator,
    #[serde(rename = "trabajador")]
    Worker,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles an administrator can hand out
    pub const ASSIGNABLE: [Role; 2] = [Role::Administrator, Role::Worker];

    /// Inverse of [`Role::as_str`]; unknown text maps to `Unknown`
    pub fn from_api(raw: &str) -> Role {
        Role::ASSIGNABLE
            .into_iter()
            .find(|r| r.as_str() == raw)
            .unwrap_or(Role::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrador",
            Role::Worker => "trabajador",
            Role::Unknown => "desconocido",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Worker => "Trabajador",
            Role::Unknown => "Sin rol",
        }
    }
}

/// Identity of the current actor, returned by `GET auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub given_name: String,
    #[serde(rename = "apellidos")]
    pub family_names: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "is_active", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_names)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_from_api_json() {
        let json = r#"{"id":7,"nombre":"Ana","apellidos":"García Ruiz","correo":"ana@x.pe","rol":"trabajador","is_active":true}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Worker);
        assert_eq!(user.full_name(), "Ana García Ruiz");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_unrecognised_role_is_unknown() {
        let json = r#"{"id":1,"nombre":"X","apellidos":"Y","correo":"x@y.pe","rol":"supervisor"}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Unknown);
        assert!(user.active);
    }

    #[test]
    fn test_login_request_uses_api_field_names() {
        let req = LoginRequest {
            email: "a@b.pe".to_string(),
            password: "secreto".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["correo"], "a@b.pe");
        assert_eq!(value["contraseña"], "secreto");
    }
}
