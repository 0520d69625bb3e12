use super::file::FileStore;
use chrono::Utc;
use tenantbill_core::ids::{generate_id, USER_PREFIX};
use tenantbill_core::models::User;
use tenantbill_core::AppError;

const COLLECTION: &str = "users";

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    store: FileStore,
}

impl UserRepository {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "list"))]
    pub async fn list(&self) -> Vec<User> {
        self.store.read_collection(COLLECTION).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find", store.record_id = %id))]
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.list().await.into_iter().find(|u| u.id == id)
    }

    /// Exact, case-sensitive email match.
    #[tracing::instrument(skip(self), fields(store.collection = COLLECTION, store.operation = "find"))]
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.list().await.into_iter().find(|u| u.email == email)
    }

    #[tracing::instrument(skip(self, password), fields(store.collection = COLLECTION, store.operation = "create"))]
    pub async fn create(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> Result<User, AppError> {
        let mut users = self.list().await;
        let user = User {
            id: generate_id(USER_PREFIX),
            email,
            password,
            name,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.store.write_collection(COLLECTION, &users).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, UserRepository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = UserRepository::new(FileStore::new(dir.path()));
        (dir, repo)
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let (_dir, repo) = repo();
        let created = repo
            .create(
                "x".to_string(),
                "pw".to_string(),
                "Xavier".to_string(),
            )
            .await
            .expect("create");
        assert!(created.id.starts_with("user_"));

        let found = repo.find_by_email("x").await.expect("user exists");
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_sensitive() {
        let (_dir, repo) = repo();
        repo.create(
            "A@b.com".to_string(),
            "pw".to_string(),
            "Upper".to_string(),
        )
        .await
        .expect("create");

        // "A@b.com" and "a@b.com" are distinct keys.
        assert!(repo.find_by_email("A@b.com").await.is_some());
        assert!(repo.find_by_email("a@b.com").await.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let (_dir, repo) = repo();
        assert!(repo.find_by_id("user_nope").await.is_none());
    }
}
