//! User account operations.

use gameshelf_protocol::{NewUser, User, UserId, UserUpdate};
use gameshelf_transport::{Method, Request, Transport};

use crate::{ApiClient, ApiError};

const USERS: &str = "/users";

fn user_path(id: &UserId) -> String {
    format!("{USERS}/{id}")
}

/// Account operations. Obtained from [`ApiClient::users`].
#[derive(Debug)]
pub struct Users<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> Users<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Creates an account. `POST /users/register`
    ///
    /// Registering does not sign the new user in; call
    /// [`Auth::login`](crate::auth::Auth::login) afterwards.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        let request = self.client.request_with(
            Method::Post,
            format!("{USERS}/register"),
            user,
        )?;
        self.client.fetch(request).await
    }

    /// Returns the account the stored credential belongs to.
    /// `GET /users/me`
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client
            .fetch(Request::new(Method::Get, format!("{USERS}/me")))
            .await
    }

    /// `GET /users/{id}`
    pub async fn get(&self, id: &UserId) -> Result<User, ApiError> {
        self.client
            .fetch(Request::new(Method::Get, user_path(id)))
            .await
    }

    /// `PUT /users/{id}`
    pub async fn update(
        &self,
        id: &UserId,
        changes: &UserUpdate,
    ) -> Result<User, ApiError> {
        let request =
            self.client.request_with(Method::Put, user_path(id), changes)?;
        self.client.fetch(request).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        self.client
            .execute(Request::new(Method::Delete, user_path(id)))
            .await
    }
}
