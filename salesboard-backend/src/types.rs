//! Account and vote types shared by every store implementation

use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in user as the store reports it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
}

/// Identity plus the bearer token the store handed out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub user: UserIdentity,
    pub token: String,
}

/// The one choice a user gets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteChoice {
    #[serde(rename = "yay")]
    Yay,
    #[serde(rename = "nay")]
    Nay,
}

impl VoteChoice {
    pub fn label(&self) -> &'static str {
        match self {
            VoteChoice::Yay => "yay",
            VoteChoice::Nay => "nay",
        }
    }
}

impl FromStr for VoteChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yay" | "yes" | "y" => Ok(VoteChoice::Yay),
            "nay" | "no" | "n" => Ok(VoteChoice::Nay),
            other => bail!("unknown vote '{}' (expected yay or nay)", other),
        }
    }
}

/// A recorded vote; immutable once written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub user_id: String,
    pub vote: VoteChoice,
    pub created_at: DateTime<Utc>,
    pub email: String,
}

impl Vote {
    /// Build a fresh vote stamped with the current time
    pub fn new(user: &UserIdentity, vote: VoteChoice) -> Self {
        Self {
            user_id: user.user_id.clone(),
            vote,
            created_at: Utc::now(),
            email: user.email.clone(),
        }
    }
}

/// Loose shape check before an email ever reaches the store
pub fn validate_email(email: &str) -> anyhow::Result<()> {
    // One @, no whitespace, something resembling a domain
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?;
    if !re.is_match(email) {
        bail!("'{}' does not look like an email address", email);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_choice_parse() {
        assert_eq!("yay".parse::<VoteChoice>().unwrap(), VoteChoice::Yay);
        assert_eq!("NO".parse::<VoteChoice>().unwrap(), VoteChoice::Nay);
        assert!("maybe".parse::<VoteChoice>().is_err());
    }

    #[test]
    fn test_vote_choice_serde_uses_lowercase_keys() {
        assert_eq!(
            serde_json::to_string(&VoteChoice::Yay).unwrap(),
            "\"yay\""
        );
        let back: VoteChoice = serde_json::from_str("\"nay\"").unwrap();
        assert_eq!(back, VoteChoice::Nay);
    }

    #[test]
    fn test_vote_carries_identity() {
        let user = UserIdentity {
            user_id: "user-0001".to_string(),
            email: "sam@example.org".to_string(),
        };
        let vote = Vote::new(&user, VoteChoice::Nay);
        assert_eq!(vote.user_id, "user-0001");
        assert_eq!(vote.email, "sam@example.org");
        assert_eq!(vote.vote, VoteChoice::Nay);
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("sam@example.org").is_ok());
        assert!(validate_email("a.b+c@sub.domain.io").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("two@@example.org").is_err());
        assert!(validate_email("spaces in@example.org").is_err());
        assert!(validate_email("no-domain@host").is_err());
    }
}
