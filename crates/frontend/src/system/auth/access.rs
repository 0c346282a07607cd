//! Access Controller: pure role checks for navigation and screen entry.

use contracts::system::auth::{Role, UserInfo};

use super::session::{Session, SessionStatus};

pub const ADMIN_ONLY: &[Role] = &[Role::Administrator];
pub const STAFF: &[Role] = &[Role::Administrator, Role::Worker];

#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    /// Tab key opened on click
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub required_roles: &'static [Role],
    pub badge: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavSection {
    pub id: &'static str,
    pub label: &'static str,
    pub entries: Vec<NavEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Identity still resolving: show a loader, never redirect yet
    Pending,
    Allow,
    /// No token: go to the login screen
    Redirect,
    /// Token present, role not allowed: show the access-denied view
    Deny,
}

/// An empty role set admits any resolved identity; `Unknown` never passes a role gate.
pub fn role_permits(required: &[Role], role: Role) -> bool {
    if required.is_empty() {
        return true;
    }
    role != Role::Unknown && required.contains(&role)
}

pub fn filter_navigation(sections: &[NavSection], identity: Option<&UserInfo>) -> Vec<NavSection> {
    let Some(user) = identity else {
        return Vec::new();
    };
    sections
        .iter()
        .filter_map(|section| {
            let entries: Vec<NavEntry> = section
                .entries
                .iter()
                .filter(|e| role_permits(e.required_roles, user.role))
                .cloned()
                .collect();
            if entries.is_empty() {
                None
            } else {
                Some(NavSection {
                    entries,
                    ..section.clone()
                })
            }
        })
        .collect()
}

pub fn guard_route(required: &[Role], session: &Session) -> RouteDecision {
    match session.status {
        SessionStatus::Uninitialized | SessionStatus::Resolving => return RouteDecision::Pending,
        SessionStatus::Ready => {}
    }
    if session.token.is_none() {
        return RouteDecision::Redirect;
    }
    match &session.user {
        Some(user) if role_permits(required, user.role) => RouteDecision::Allow,
        Some(_) => RouteDecision::Deny,
        None => RouteDecision::Redirect,
    }
}

/// Roles allowed to open a tab, by tab key
pub fn required_roles_for(key: &str) -> &'static [Role] {
    const ADMIN_PREFIXES: &[&str] = &[
        "a002_product_new",
        "a003_client",
        "a004_provider",
        "a006_purchase",
        "u502_new_purchase",
        "sys_users",
    ];
    if ADMIN_PREFIXES.iter().any(|p| key.starts_with(p)) {
        ADMIN_ONLY
    } else {
        STAFF
    }
}

/// Static navigation catalog. Badges are filled in by the sidebar.
pub fn navigation_catalog() -> Vec<NavSection> {
    vec![
        NavSection {
            id: "principal",
            label: "Principal",
            entries: vec![NavEntry {
                key: "d400_overview",
                label: "Inicio",
                icon: "dashboard",
                required_roles: STAFF,
                badge: None,
            }],
        },
        NavSection {
            id: "gestion",
            label: "Gestión",
            entries: vec![
                NavEntry {
                    key: "a002_product",
                    label: "Productos",
                    icon: "products",
                    required_roles: STAFF,
                    badge: None,
                },
                NavEntry {
                    key: "a003_client",
                    label: "Clientes",
                    icon: "customers",
                    required_roles: ADMIN_ONLY,
                    badge: None,
                },
                NavEntry {
                    key: "a004_provider",
                    label: "Proveedores",
                    icon: "suppliers",
                    required_roles: ADMIN_ONLY,
                    badge: None,
                },
                NavEntry {
                    key: "u501_new_sale",
                    label: "Ventas",
                    icon: "sales",
                    required_roles: STAFF,
                    badge: None,
                },
                NavEntry {
                    key: "u502_new_purchase",
                    label: "Compras",
                    icon: "purchases",
                    required_roles: ADMIN_ONLY,
                    badge: None,
                },
            ],
        },
        NavSection {
            id: "historial",
            label: "Historial",
            entries: vec![
                NavEntry {
                    key: "a005_sale",
                    label: "Historial de ventas",
                    icon: "history",
                    required_roles: STAFF,
                    badge: None,
                },
                NavEntry {
                    key: "a006_purchase",
                    label: "Historial de compras",
                    icon: "history",
                    required_roles: ADMIN_ONLY,
                    badge: None,
                },
            ],
        },
        NavSection {
            id: "sistema",
            label: "Sistema",
            entries: vec![NavEntry {
                key: "sys_users",
                label: "Usuarios",
                icon: "users",
                required_roles: ADMIN_ONLY,
                badge: None,
            }],
        },
    ]
}

/// Catalog label of a tab key, if it is a top-level entry
pub fn nav_label_for_key(key: &str) -> Option<&'static str> {
    navigation_catalog()
        .into_iter()
        .flat_map(|s| s.entries)
        .find(|e| e.key == key)
        .map(|e| e.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserInfo {
        UserInfo {
            id: 1,
            given_name: "Luis".into(),
            family_names: "Rojas".into(),
            email: "luis@tienda.pe".into(),
            role,
            active: true,
        }
    }

    fn session(status: SessionStatus, token: Option<&str>, role: Option<Role>) -> Session {
        Session {
            token: token.map(str::to_string),
            user: role.map(user),
            status,
        }
    }

    #[test]
    fn test_guard_route_table() {
        let signed_in = |role| session(SessionStatus::Ready, Some("t"), Some(role));
        let cases = [
            (session(SessionStatus::Resolving, Some("t"), None), ADMIN_ONLY, RouteDecision::Pending),
            (session(SessionStatus::Uninitialized, None, None), ADMIN_ONLY, RouteDecision::Pending),
            (session(SessionStatus::Ready, None, None), ADMIN_ONLY, RouteDecision::Redirect),
            (signed_in(Role::Worker), ADMIN_ONLY, RouteDecision::Deny),
            (signed_in(Role::Administrator), ADMIN_ONLY, RouteDecision::Allow),
            (signed_in(Role::Worker), STAFF, RouteDecision::Allow),
        ];
        for (session, required, expected) in cases {
            assert_eq!(guard_route(required, &session), expected, "{:?}", session);
        }
    }

    #[test]
    fn test_unknown_role_is_denied_on_gated_routes() {
        let s = session(SessionStatus::Ready, Some("t"), Some(Role::Unknown));
        assert_eq!(guard_route(STAFF, &s), RouteDecision::Deny);
        assert_eq!(guard_route(ADMIN_ONLY, &s), RouteDecision::Deny);
        assert_eq!(guard_route(&[], &s), RouteDecision::Allow);
    }

    #[test]
    fn test_filter_navigation_without_identity_is_empty() {
        assert!(filter_navigation(&navigation_catalog(), None).is_empty());
    }

    #[test]
    fn test_worker_navigation_drops_empty_sections() {
        let worker = user(Role::Worker);
        let nav = filter_navigation(&navigation_catalog(), Some(&worker));
        let ids: Vec<_> = nav.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["principal", "gestion", "historial"]);

        let keys: Vec<_> = nav.iter().flat_map(|s| s.entries.iter().map(|e| e.key)).collect();
        assert_eq!(keys, vec!["d400_overview", "a002_product", "u501_new_sale", "a005_sale"]);
    }

    #[test]
    fn test_admin_sees_whole_catalog() {
        let admin = user(Role::Administrator);
        let nav = filter_navigation(&navigation_catalog(), Some(&admin));
        assert_eq!(nav, navigation_catalog());
    }

    #[test]
    fn test_required_roles_for_detail_keys() {
        assert_eq!(required_roles_for("a003_client_detail_4"), ADMIN_ONLY);
        assert_eq!(required_roles_for("a006_purchase_detail_9"), ADMIN_ONLY);
        assert_eq!(required_roles_for("a005_sale_detail_9"), STAFF);
        assert_eq!(required_roles_for("a002_product_detail_3"), STAFF);
        assert_eq!(required_roles_for("a002_product_new"), ADMIN_ONLY);
    }
}
