//! Shared test utilities for deck-db unit tests.

pub(crate) mod helpers {
    use deck_core::entities::{NewTask, Task, User};
    use deck_core::enums::{Category, Priority};

    use crate::DeckDb;
    use crate::service::DeckService;

    /// Create an in-memory service.
    pub async fn test_service() -> DeckService {
        let db = DeckDb::open_local(":memory:").await.unwrap();
        DeckService::from_db(db)
    }

    /// Insert a user with a throwaway password hash.
    pub async fn create_test_user(svc: &DeckService, email: &str) -> User {
        svc.create_user(email, None, "$2b$04$not-a-real-hash").await.unwrap()
    }

    pub fn draft(title: &str, priority: Priority, category: Category) -> NewTask {
        NewTask {
            title: title.to_string(),
            priority: Some(priority),
            category: Some(category),
            ..Default::default()
        }
    }

    /// Insert a medium backend task for `owner`.
    pub async fn create_test_task(svc: &DeckService, owner: &str, title: &str) -> Task {
        svc.create_task(owner, draft(title, Priority::Medium, Category::Backend))
            .await
            .unwrap()
    }
}
