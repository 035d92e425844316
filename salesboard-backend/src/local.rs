//! File-backed store for offline development and tests.
//!
//! Matches the HTTP store's behavior closely enough that the CLI cannot
//! tell them apart: same error shapes, same write-once vote guarantee.
//! Votes are staged to a temp file and published with a no-clobber
//! persist, so concurrent writers race on an atomic link and the vote
//! path never holds a partial document.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::types::{AuthSession, UserIdentity, Vote, VoteChoice};

/// Plaintext credentials; this store is a development stand-in, not a
/// production auth system
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalUser {
    user_id: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn users_path(&self) -> PathBuf {
        self.root.join("users.json")
    }

    fn vote_path(&self, user_id: &str) -> PathBuf {
        self.root.join("votes").join(format!("{user_id}.json"))
    }

    fn load_users(&self) -> Result<HashMap<String, LocalUser>> {
        let p = self.users_path();
        if !p.exists() {
            return Ok(HashMap::new());
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        Ok(serde_json::from_str(&s)?)
    }

    fn save_users(&self, users: &HashMap<String, LocalUser>) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| format!("create {}", self.root.display()))?;
        let p = self.users_path();
        let s = serde_json::to_string_pretty(users)?;
        fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        let mut users = self.load_users()?;
        if users.contains_key(email) {
            bail!("an account for {email} already exists; sign in instead");
        }

        let user_id = format!("user-{:04}", users.len() + 1);
        users.insert(
            email.to_string(),
            LocalUser {
                user_id: user_id.clone(),
                email: email.to_string(),
                password: password.to_string(),
            },
        );
        self.save_users(&users)?;
        debug!(%user_id, "local account created");

        Ok(AuthSession {
            user: UserIdentity {
                user_id: user_id.clone(),
                email: email.to_string(),
            },
            token: format!("local-{user_id}"),
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let users = self.load_users()?;
        let user = match users.get(email) {
            Some(user) if user.password == password => user,
            _ => bail!("signin rejected: check the email and password"),
        };

        Ok(AuthSession {
            user: UserIdentity {
                user_id: user.user_id.clone(),
                email: user.email.clone(),
            },
            token: format!("local-{}", user.user_id),
        })
    }

    pub async fn sign_out(&self, _token: &str) -> Result<()> {
        // Local tokens are derived, nothing to revoke
        Ok(())
    }

    pub async fn get_vote(&self, user_id: &str) -> Result<Option<Vote>> {
        let p = self.vote_path(user_id);
        let s = match fs::read_to_string(&p) {
            Ok(s) => s,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).with_context(|| format!("read {}", p.display())),
        };
        Ok(Some(serde_json::from_str(&s)?))
    }

    /// Write-once vote via an atomic no-clobber publish; a second cast
    /// returns the stored vote untouched
    pub async fn cast_vote(&self, user: &UserIdentity, choice: VoteChoice) -> Result<Vote> {
        let votes_dir = self.root.join("votes");
        fs::create_dir_all(&votes_dir)
            .with_context(|| format!("create {}", votes_dir.display()))?;

        let vote = Vote::new(user, choice);
        let p = self.vote_path(&user.user_id);

        // Stage the full document first; the vote path only ever appears
        // with complete JSON behind it
        let mut staged = NamedTempFile::new_in(&votes_dir)
            .with_context(|| format!("stage vote in {}", votes_dir.display()))?;
        let s = serde_json::to_string_pretty(&vote)?;
        staged
            .write_all(s.as_bytes())
            .with_context(|| format!("write {}", staged.path().display()))?;

        match staged.persist_noclobber(&p) {
            Ok(_) => {
                debug!(user_id = %user.user_id, choice = choice.label(), "local vote recorded");
                Ok(vote)
            }
            // A losing racer reads the winner's complete document
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                match self.get_vote(&user.user_id).await? {
                    Some(existing) => Ok(existing),
                    None => bail!("vote file vanished while casting"),
                }
            }
            Err(err) => Err(err.error).with_context(|| format!("publish {}", p.display())),
        }
    }
}
