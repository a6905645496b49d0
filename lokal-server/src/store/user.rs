//! User Repository

use shared::models::{User, UserRole};
use shared::util::{new_id, now_millis};

use super::{MemoryStore, StoreError, StoreResult};

/// Input for a new account (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Clone)]
pub struct UserRepository {
    store: MemoryStore,
}

impl UserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Case-insensitive lookup
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let tables = self.store.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.store.read().await.users.get(id).cloned())
    }

    /// Create an account. The first account becomes admin, later ones cashiers.
    pub async fn create(&self, data: NewUser) -> StoreResult<User> {
        let email = data.email.trim().to_lowercase();
        let mut tables = self.store.write().await;

        if tables.users.values().any(|u| u.email == email) {
            return Err(StoreError::EmailExists(email));
        }

        let role = if tables.users.is_empty() {
            UserRole::Admin
        } else {
            UserRole::Cashier
        };
        let now = now_millis();
        let user = User {
            id: new_id(),
            name: data.name.trim().to_string(),
            email,
            password_hash: data.password_hash,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> StoreResult<User> {
        let mut tables = self.store.write().await;
        let user = tables
            .users
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(super::Entity::User, id.to_string()))?;
        user.is_active = is_active;
        user.updated_at = now_millis();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Dewi".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn test_email_is_case_insensitive_and_unique() {
        let repo = UserRepository::new(MemoryStore::new());
        let first = repo.create(new_user("Dewi@Toko.ID")).await.unwrap();
        assert_eq!(first.email, "dewi@toko.id");
        assert_eq!(first.role, UserRole::Admin);

        let dup = repo.create(new_user("dewi@toko.id ")).await;
        assert!(matches!(dup, Err(StoreError::EmailExists(_))));

        let found = repo.find_by_email("DEWI@toko.id").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_second_user_is_cashier() {
        let repo = UserRepository::new(MemoryStore::new());
        repo.create(new_user("a@toko.id")).await.unwrap();
        let second = repo.create(new_user("b@toko.id")).await.unwrap();
        assert_eq!(second.role, UserRole::Cashier);
    }

    #[tokio::test]
    async fn test_set_active() {
        let repo = UserRepository::new(MemoryStore::new());
        let user = repo.create(new_user("a@toko.id")).await.unwrap();
        let user = repo.set_active(&user.id, false).await.unwrap();
        assert!(!user.is_active);
        assert!(repo.set_active("missing", true).await.is_err());
    }
}
