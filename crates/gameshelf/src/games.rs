//! Game library operations.

use gameshelf_protocol::{Game, GameId, GameUpdate, NewGame};
use gameshelf_transport::{Method, Request, Transport};

use crate::{ApiClient, ApiError};

const GAMES: &str = "/games";

fn game_path(id: &GameId) -> String {
    format!("{GAMES}/{id}")
}

/// Operations on the signed-in user's game library.
///
/// Obtained from [`ApiClient::games`].
#[derive(Debug)]
pub struct Games<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> Games<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Adds a game to the library. `POST /games`
    pub async fn create(&self, game: &NewGame) -> Result<Game, ApiError> {
        let request =
            self.client.request_with(Method::Post, GAMES.to_string(), game)?;
        self.client.fetch(request).await
    }

    /// Lists every game in the library. `GET /games`
    pub async fn list(&self) -> Result<Vec<Game>, ApiError> {
        self.client.fetch(Request::new(Method::Get, GAMES)).await
    }

    /// Fetches one game. `GET /games/{id}`
    pub async fn get(&self, id: &GameId) -> Result<Game, ApiError> {
        self.client
            .fetch(Request::new(Method::Get, game_path(id)))
            .await
    }

    /// Applies a partial update and returns the stored result.
    /// `PUT /games/{id}`
    pub async fn update(
        &self,
        id: &GameId,
        changes: &GameUpdate,
    ) -> Result<Game, ApiError> {
        let request =
            self.client.request_with(Method::Put, game_path(id), changes)?;
        self.client.fetch(request).await
    }

    /// Removes a game from the library. `DELETE /games/{id}`
    pub async fn delete(&self, id: &GameId) -> Result<(), ApiError> {
        self.client
            .execute(Request::new(Method::Delete, game_path(id)))
            .await
    }
}
