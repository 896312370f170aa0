//! A short tour of the Gameshelf client.
//!
//! ```text
//! GAMESHELF_API_URL=http://localhost:8080 cargo run -p shelf-tour -- alice secret
//! ```
//!
//! Signs in (or reuses the credential saved by a previous run), lists the
//! library, and adds a game if it is empty. Pass `--logout` to forget the
//! saved credential.

use std::path::PathBuf;

use gameshelf::prelude::*;

/// Where the credential is kept between runs.
fn state_dir() -> PathBuf {
    std::env::var_os("GAMESHELF_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("gameshelf"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    gameshelf::logging::init()?;

    let storage = FileTokenStorage::new(state_dir());
    tracing::debug!(dir = %storage.dir().display(), "credential storage");
    let store = CredentialStore::with_storage(storage)?;
    let client = ApiClient::builder()
        .config(ClientConfig::from_env()?)
        .credentials(store)
        .build()?;

    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(SessionEvent::Expired { redirect_to }) = events.recv().await {
            tracing::warn!(%redirect_to, "session expired, sign in again");
        }
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--logout") {
        client.auth().logout();
        return Ok(());
    }

    let user = match args.as_slice() {
        [username, password, ..] => client.auth().login(username, password).await?,
        _ if client.auth().is_authenticated() => client.users().me().await?,
        _ => {
            eprintln!("usage: shelf-tour <username> <password> | --logout");
            std::process::exit(2);
        }
    };
    println!("Signed in as {} <{}>", user.username, user.email);

    let mut games = client.games().list().await?;
    if games.is_empty() {
        let game = client
            .games()
            .create(&NewGame {
                developer: Some("Maddy Makes Games".into()),
                status: Some(GameStatus::Wishlist),
                ..NewGame::named("Celeste")
            })
            .await?;
        println!("Library was empty, added {}", game.name);
        games.push(game);
    }

    for game in &games {
        let star = if game.favorite { "*" } else { " " };
        println!("{star} {:<32} {:?}", game.name, game.status);
    }

    Ok(())
}
