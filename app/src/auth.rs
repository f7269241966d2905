//! FILENAME: app/src/auth.rs
//! PURPOSE: Login session and role-based permission checks.
//! CONTEXT: Credentials are verified by the host over `auth:login`. The
//! returned user is kept in memory and persisted under `auth_user` so the
//! session survives a restart.

use persistence::{load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};

use crate::api_types::{LoginRequest, Role, User};
use crate::bridge::{Api, IpcBridge};
use crate::{log_info, log_warn, AppState};

pub const KEY_AUTH_USER: &str = "auth_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    ProcessSales,
    ManageInventory,
    ViewFinance,
    ManageSettings,
}

impl Role {
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Cashier => &[Permission::ProcessSales],
            Role::Manager => &[
                Permission::ProcessSales,
                Permission::ManageInventory,
                Permission::ViewFinance,
            ],
            Role::Admin => &[
                Permission::ProcessSales,
                Permission::ManageInventory,
                Permission::ViewFinance,
                Permission::ManageSettings,
            ],
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

/// Restore a persisted session. Unreadable records are dropped.
pub fn load_session(store: &dyn KeyValueStore) -> Option<User> {
    match load_json::<User>(store, KEY_AUTH_USER) {
        Ok(user) => user,
        Err(e) => {
            log_warn!("AUTH", "discarding unreadable session: {}", e);
            None
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn login(
    state: &AppState,
    bridge: &dyn IpcBridge,
    username: &str,
    password: &str,
) -> Result<User, String> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Username and password are required".to_string());
    }

    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let user = Api::new(bridge)
        .auth_login(&request)
        .map_err(|e| e.to_string())?;

    state.with_store(|store| save_json(store, KEY_AUTH_USER, &user))?;
    let mut session = state.session.lock().map_err(|e| e.to_string())?;
    *session = Some(user.clone());

    log_info!("AUTH", "{} logged in as {:?}", user.username, user.role);
    Ok(user)
}

pub fn logout(state: &AppState) -> Result<(), String> {
    let previous = {
        let mut session = state.session.lock().map_err(|e| e.to_string())?;
        session.take()
    };
    state.with_store(|store| store.remove(KEY_AUTH_USER))?;

    if let Some(user) = previous {
        log_info!("AUTH", "{} logged out", user.username);
    }
    Ok(())
}

pub fn current_user(state: &AppState) -> Result<Option<User>, String> {
    let session = state.session.lock().map_err(|e| e.to_string())?;
    Ok(session.clone())
}

/// False when nobody is logged in.
pub fn has_permission(state: &AppState, permission: Permission) -> Result<bool, String> {
    let session = state.session.lock().map_err(|e| e.to_string())?;
    Ok(session.as_ref().map_or(false, |user| user.role.can(permission)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_matrix() {
        assert!(Role::Cashier.can(Permission::ProcessSales));
        assert!(!Role::Cashier.can(Permission::ManageInventory));
        assert!(!Role::Cashier.can(Permission::ViewFinance));

        assert!(Role::Manager.can(Permission::ManageInventory));
        assert!(Role::Manager.can(Permission::ViewFinance));
        assert!(!Role::Manager.can(Permission::ManageSettings));

        assert!(Role::Admin.can(Permission::ManageSettings));
    }
}
