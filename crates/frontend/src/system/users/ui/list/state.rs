use contracts::system::users::User;
use leptos::prelude::*;

use crate::shared::list_utils::{contains_ci, sort_list, Sortable};

#[derive(Clone, Debug)]
pub struct UsersListState {
    pub all: Vec<User>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            search_query: String::new(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "email" => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            "role" => self.role.label().cmp(other.role.label()),
            "is_active" => self.is_active.cmp(&other.is_active),
            _ => self
                .full_name()
                .to_lowercase()
                .cmp(&other.full_name().to_lowercase()),
        }
    }
}

impl UsersListState {
    /// Rows matching the search (name, e-mail or role), sorted
    pub fn visible(&self) -> Vec<User> {
        let needle = self.search_query.trim().to_lowercase();
        let mut rows: Vec<User> = self
            .all
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || contains_ci(&u.full_name(), &needle)
                    || contains_ci(&u.email, &needle)
                    || contains_ci(u.role.label(), &needle)
            })
            .cloned()
            .collect();
        sort_list(&mut rows, &self.sort_field, self.sort_ascending);
        rows
    }

    /// Swap in the server's copy of one row
    pub fn replace(&mut self, user: User) {
        if let Some(slot) = self.all.iter_mut().find(|u| u.id == user.id) {
            *slot = user;
        } else {
            self.all.push(user);
        }
    }
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::Role;

    fn user(id: i64, name: &str, role: Role, active: bool) -> User {
        User {
            id,
            given_name: name.to_string(),
            family_names: "Quispe".to_string(),
            email: format!("{}@tienda.pe", name.to_lowercase()),
            role,
            is_active: active,
        }
    }

    #[test]
    fn test_search_by_role_label() {
        let state = UsersListState {
            all: vec![
                user(1, "Ana", Role::Administrator, true),
                user(2, "Luis", Role::Worker, true),
            ],
            search_query: "trabaj".to_string(),
            ..Default::default()
        };
        let ids: Vec<i64> = state.visible().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_replace_keeps_order() {
        let mut state = UsersListState {
            all: vec![
                user(1, "Ana", Role::Administrator, true),
                user(2, "Luis", Role::Worker, true),
            ],
            ..Default::default()
        };
        state.replace(user(1, "Ana", Role::Administrator, false));
        assert!(!state.all[0].is_active);
        assert_eq!(state.all.len(), 2);
    }
}
