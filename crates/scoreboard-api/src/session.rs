// Session and change-tracking endpoints
//
// The server keeps the logged-in user in a cookie, so `login` only has
// to succeed once per client; the shared cookie jar carries it forward.

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{ChangeMarker, Credentials, CurrentUser, Empty, LastChanged};

impl ApiClient {
    /// Log in with a username and password.
    ///
    /// `POST /login` with `{"username": "...", "password": "..."}`.
    /// A wrong password is answered with HTTP 401.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        debug!(username, "logging in");
        let _: Empty = self
            .post(
                Endpoint::Login,
                &Credentials {
                    username: Some(username),
                    password,
                },
            )
            .await?;
        Ok(())
    }

    /// End the current session.
    ///
    /// `GET /logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let _: Empty = self.get(Endpoint::Logout).await?;
        Ok(())
    }

    /// The user bound to the current session, if any.
    ///
    /// `GET /current_user`
    pub async fn current_user(&self) -> Result<CurrentUser, Error> {
        self.get(Endpoint::CurrentUser).await
    }

    /// The server's latest change marker.
    ///
    /// `GET /last_changed`
    pub async fn last_changed(&self) -> Result<ChangeMarker, Error> {
        let out: LastChanged = self.get(Endpoint::LastChanged).await?;
        Ok(out.date)
    }
}
