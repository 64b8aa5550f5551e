use std::sync::Arc;

use chrono::Utc;

use crate::errors::RepoError;
use crate::models::{NewUser, User};
use crate::store::JsonStore;

pub struct UserRepository {
    store: Arc<JsonStore>,
}

impl UserRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.load_users().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.load_users().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Insert a new account. The email must not already be registered.
    pub async fn create(&self, input: NewUser) -> Result<User, RepoError> {
        self.store
            .update_users(move |users| {
                if users.iter().any(|u| u.email == input.email) {
                    return Err(RepoError::Duplicate {
                        entity: "user",
                        id: input.email.clone(),
                    });
                }
                let user = User::new(input);
                users.push(user.clone());
                Ok(user)
            })
            .await?
    }

    /// Refresh `updated_at`, e.g. on successful login. Unknown ids are a
    /// no-op.
    pub async fn touch(&self, id: &str) -> Result<(), RepoError> {
        self.store
            .update_users(|users| {
                if let Some(user) = users.iter_mut().find(|u| u.id == id) {
                    user.updated_at = Utc::now();
                }
            })
            .await?;
        Ok(())
    }
}
