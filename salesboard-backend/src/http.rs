//! REST client for the managed account/vote store.
//!
//! Contract:
//!   POST {base}/auth/signup   {email, password} -> {user_id, email, token}
//!   POST {base}/auth/signin   {email, password} -> {user_id, email, token}
//!   POST {base}/auth/signout  (bearer token)    -> 200
//!   GET  {base}/votes/{id}    -> vote document, or 404 when absent
//!   PUT  {base}/votes/{id}    with If-None-Match: * -> 201, or 412/409
//!                             when a document already exists
//!
//! The conditional PUT is what makes a vote write-once: the store, not
//! this client, arbitrates races.

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::header::IF_NONE_MATCH;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AuthSession, UserIdentity, Vote, VoteChoice};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn auth_request(&self, endpoint: &str, email: &str, password: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct Req<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct Resp {
            user_id: String,
            email: String,
            token: String,
        }

        let url = format!("{}/auth/{endpoint}", self.base_url);
        debug!(%url, "auth request");
        let resp = self
            .client
            .post(&url)
            .json(&Req { email, password })
            .send()
            .await
            .with_context(|| format!("{endpoint} request"))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            bail!("{endpoint} rejected: check the email and password");
        }
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("{endpoint} error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse auth response")?;
        Ok(AuthSession {
            user: UserIdentity {
                user_id: out.user_id,
                email: out.email,
            },
            token: out.token,
        })
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.auth_request("signup", email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.auth_request("signin", email, password).await
    }

    pub async fn sign_out(&self, token: &str) -> Result<()> {
        let url = format!("{}/auth/signout", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("signout request")?;

        let status = resp.status();
        // An already-dead token is a successful sign-out
        if !status.is_success() && status != StatusCode::UNAUTHORIZED {
            bail!("signout error: {status}");
        }
        Ok(())
    }

    pub async fn get_vote(&self, user_id: &str) -> Result<Option<Vote>> {
        let url = format!("{}/votes/{user_id}", self.base_url);
        debug!(%url, "fetching vote");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("vote lookup request")?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            bail!("vote lookup error: {status}");
        }

        let vote: Vote = resp.json().await.context("parse vote document")?;
        Ok(Some(vote))
    }

    /// Write-once vote: the first writer wins and everyone gets the
    /// winning document back
    pub async fn cast_vote(&self, user: &UserIdentity, choice: VoteChoice) -> Result<Vote> {
        let vote = Vote::new(user, choice);
        let url = format!("{}/votes/{}", self.base_url, user.user_id);
        debug!(%url, choice = choice.label(), "casting vote");
        let resp = self
            .client
            .put(&url)
            .header(IF_NONE_MATCH, "*")
            .json(&vote)
            .send()
            .await
            .context("vote write request")?;

        let status = resp.status();
        if status == StatusCode::PRECONDITION_FAILED || status == StatusCode::CONFLICT {
            // Lost the race (or voted before); the stored document stands
            return match self.get_vote(&user.user_id).await? {
                Some(existing) => Ok(existing),
                None => bail!("store reported an existing vote but returned none"),
            };
        }
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("vote write error: {status} {txt}");
        }

        Ok(vote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let backend = HttpBackend::new("https://store.example.org/api/");
        assert_eq!(backend.base_url(), "https://store.example.org/api");
        let backend = HttpBackend::new("https://store.example.org/api");
        assert_eq!(backend.base_url(), "https://store.example.org/api");
    }
}
