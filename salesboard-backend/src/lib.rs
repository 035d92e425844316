//! salesboard-backend: account and vote storage behind one handle.
//!
//! The dashboard treats the store as an opaque collaborator: sign in, sign
//! out, read a vote, write a vote at most once. `Backend` picks between
//! the managed HTTP store and a local file-backed stand-in at
//! construction time; callers never branch on which one they got.

pub mod types;
pub mod http;
pub mod local;

pub use http::HttpBackend;
pub use local::LocalBackend;
pub use types::{AuthSession, UserIdentity, Vote, VoteChoice, validate_email};

use anyhow::Result;

#[derive(Debug, Clone)]
pub enum Backend {
    Http(HttpBackend),
    Local(LocalBackend),
}

impl Backend {
    /// Short form for status lines
    pub fn describe(&self) -> String {
        match self {
            Backend::Http(backend) => backend.base_url().to_string(),
            Backend::Local(_) => "local store".to_string(),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        validate_email(email)?;
        match self {
            Backend::Http(backend) => backend.sign_up(email, password).await,
            Backend::Local(backend) => backend.sign_up(email, password).await,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        match self {
            Backend::Http(backend) => backend.sign_in(email, password).await,
            Backend::Local(backend) => backend.sign_in(email, password).await,
        }
    }

    pub async fn sign_out(&self, token: &str) -> Result<()> {
        match self {
            Backend::Http(backend) => backend.sign_out(token).await,
            Backend::Local(backend) => backend.sign_out(token).await,
        }
    }

    pub async fn get_vote(&self, user_id: &str) -> Result<Option<Vote>> {
        match self {
            Backend::Http(backend) => backend.get_vote(user_id).await,
            Backend::Local(backend) => backend.get_vote(user_id).await,
        }
    }

    /// Set-if-absent: the returned vote is whatever the store holds after
    /// the call, which may not be `choice`
    pub async fn cast_vote(&self, user: &UserIdentity, choice: VoteChoice) -> Result<Vote> {
        match self {
            Backend::Http(backend) => backend.cast_vote(user, choice).await,
            Backend::Local(backend) => backend.cast_vote(user, choice).await,
        }
    }
}
