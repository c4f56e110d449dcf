//! Staff accounts (administration)

use super::resource::{Resource, ResourceService};
use crate::domain::{Result, User, UserDraft, UserFilter, UserId};

/// `users` collection
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    const ENDPOINT: &'static str = "users";
    type Record = User;
    type Id = UserId;
    type Draft = UserDraft;
    type Filter = UserFilter;
}

pub type UserService = ResourceService<Users>;

impl ResourceService<Users> {
    /// Accounts with the clinician role, for assignment pickers
    ///
    /// # Errors
    ///
    /// Returns the classified API error.
    pub async fn clinicians(&self) -> Result<Vec<User>> {
        Ok(self.api().get("users/medecins").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::Role;
    use crate::services::testing;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_clinicians() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/medecins")
            .with_status(200)
            .with_body(
                r#"[{"id":2,"email":"dr.martin@cabinet.fr","nom":"Martin","prenom":"Claire","role":"MEDECIN"}]"#,
            )
            .create_async()
            .await;

        let service = UserService::new(testing::api(server.url()));
        let clinicians = service.clinicians().await.unwrap();

        assert_eq!(clinicians[0].role, Role::Clinician);
        assert!(clinicians[0].active);
    }

    #[tokio::test]
    async fn test_create_sends_initial_password() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/users")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "sec@cabinet.fr",
                "role": "SECRETAIRE",
                "password": "initial-pass"
            })))
            .with_status(201)
            .with_body(
                r#"{"id":9,"email":"sec@cabinet.fr","nom":"Bernard","prenom":"Lucie","role":"SECRETAIRE"}"#,
            )
            .create_async()
            .await;

        let service = UserService::new(testing::api(server.url()));
        let draft = UserDraft {
            email: "sec@cabinet.fr".to_string(),
            last_name: "Bernard".to_string(),
            first_name: "Lucie".to_string(),
            role: Role::Secretary,
            phone: None,
            password: Some(secret_string("initial-pass".to_string())),
        };
        let created = service.create(&draft).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, UserId::new(9));
    }
}
