//! Single-operator login gate.
//!
//! The system ships with one built-in administrator and a fixed shared
//! password; there is no account management. The current identity is part
//! of the persisted document so a restart keeps the operator signed in, and
//! imports always reset it to the built-in administrator.

use log::{info, warn};

use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::User;
use crate::backend::storage::Store;

/// Shared operator password.
const OPERATOR_PASSWORD: &str = "admin";

#[derive(Clone)]
pub struct AuthService {
    store: Store,
}

impl AuthService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn login(&self, username: &str, password: &str) -> DomainResult<User> {
        let user = self
            .store
            .read(|document| document.users.iter().find(|u| u.username == username).cloned());
        let Some(user) = user else {
            warn!("login rejected for unknown username {}", username);
            return Err(DomainError::Validation("invalid credentials".to_string()));
        };
        if password != OPERATOR_PASSWORD {
            warn!("login rejected for {}: wrong password", username);
            return Err(DomainError::Validation("invalid credentials".to_string()));
        }
        let user_id = user.id.clone();
        self.store
            .mutate(|document| document.current_user_id = Some(user_id))?;
        info!("{} signed in", user.username);
        Ok(user)
    }

    pub fn logout(&self) -> DomainResult<()> {
        self.store
            .mutate(|document| document.current_user_id = None)?;
        info!("signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.read(|document| {
            document
                .current_user_id
                .as_deref()
                .and_then(|id| document.users.iter().find(|u| u.id == id))
                .cloned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryConnection;

    fn setup() -> AuthService {
        AuthService::new(Store::open(MemoryConnection::new()).unwrap())
    }

    #[test]
    fn test_admin_signs_in_with_the_shared_password() {
        let service = setup();
        let user = service.login("admin", "admin").unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(service.current_user().unwrap().id, user.id);
    }

    #[test]
    fn test_wrong_password_or_username_is_rejected() {
        let service = setup();
        assert!(service.login("admin", "hunter2").is_err());
        assert!(service.login("nobody", "admin").is_err());
    }

    #[test]
    fn test_logout_clears_the_current_identity() {
        let service = setup();
        service.login("admin", "admin").unwrap();
        service.logout().unwrap();
        assert!(service.current_user().is_none());
    }
}
