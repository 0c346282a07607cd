use crate::system::auth::Role;
use serde::{Deserialize, Serialize};

/// User row as listed by `GET users/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub given_name: String,
    #[serde(rename = "apellidos")]
    pub family_names: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Body of `POST auth/registro`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserDto {
    #[serde(rename = "nombre")]
    pub given_name: String,
    #[serde(rename = "apellidos")]
    pub family_names: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "contraseña")]
    pub password: String,
    pub is_active: bool,
}

/// Body of `PUT users/{id}`; an empty password keeps the current one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[serde(skip)]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub given_name: String,
    #[serde(rename = "apellidos")]
    pub family_names: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "contraseña", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_names)
            .trim()
            .to_string()
    }
}

/// Create/edit form of the users screen
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub id: Option<i64>,
    pub given_name: String,
    pub family_names: String,
    pub email: String,
    pub role: Role,
    /// Required on create; empty on edit keeps the current password
    pub password: String,
    pub is_active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            id: None,
            given_name: String::new(),
            family_names: String::new(),
            email: String::new(),
            role: Role::Worker,
            password: String::new(),
            is_active: true,
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id),
            given_name: user.given_name.clone(),
            family_names: user.family_names.clone(),
            email: user.email.clone(),
            role: user.role,
            password: String::new(),
            is_active: user.is_active,
        }
    }

    pub fn first_invalid_field(&self) -> Option<&'static str> {
        if self.given_name.trim().is_empty() {
            return Some("Nombre");
        }
        if self.family_names.trim().is_empty() {
            return Some("Apellidos");
        }
        if !self.email.contains('@') {
            return Some("Correo");
        }
        if self.role == Role::Unknown {
            return Some("Rol");
        }
        if self.id.is_none() && self.password.is_empty() {
            return Some("Contraseña");
        }
        None
    }

    pub fn to_create(&self) -> CreateUserDto {
        CreateUserDto {
            given_name: self.given_name.trim().to_string(),
            family_names: self.family_names.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            password: self.password.clone(),
            is_active: self.is_active,
        }
    }

    pub fn to_update(&self, id: i64) -> UpdateUserDto {
        UpdateUserDto {
            id,
            given_name: self.given_name.trim().to_string(),
            family_names: self.family_names.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            password: Some(self.password.clone()).filter(|p| !p.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_from_api() {
        let user: User = serde_json::from_str(
            r#"{"id":5,"nombre":"Rosa","apellidos":"Huamán","correo":"rosa@tienda.pe","rol":"trabajador"}"#,
        )
        .unwrap();
        assert!(user.is_active);
        assert_eq!(user.role, Role::Worker);
        assert_eq!(user.full_name(), "Rosa Huamán");
    }

    #[test]
    fn test_password_required_only_on_create() {
        let mut form = UserForm {
            given_name: "Rosa".into(),
            family_names: "Huamán".into(),
            email: "rosa@tienda.pe".into(),
            ..Default::default()
        };
        assert_eq!(form.first_invalid_field(), Some("Contraseña"));
        form.id = Some(5);
        assert_eq!(form.first_invalid_field(), None);
    }

    #[test]
    fn test_update_without_password_omits_field() {
        let form = UserForm {
            id: Some(5),
            given_name: "Rosa".into(),
            family_names: "Huamán".into(),
            email: "rosa@tienda.pe".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(form.to_update(5)).unwrap();
        assert!(json.get("contraseña").is_none());
        assert_eq!(json["rol"], "trabajador");
    }

    #[test]
    fn test_role_from_api() {
        assert_eq!(Role::from_api("administrador"), Role::Administrator);
        assert_eq!(Role::from_api("gerente"), Role::Unknown);
    }
}
