//! Account commands: sign-up, sign-in, sign-out, whoami, and voting.

use anyhow::{Context, Result, bail};
use std::io::{self, Write};

use salesboard_backend::{Backend, VoteChoice};

use crate::session::{clear_session, load_session, save_session};

fn prompt_line(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read stdin")?;
    Ok(line.trim().to_string())
}

pub async fn sign_up(backend: &Backend, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("email")?,
    };
    let password = prompt_line("password")?;

    let session = backend.sign_up(&email, &password).await?;
    save_session(&session)?;
    println!(
        "Signed up and in as {} ({})",
        session.user.email, session.user.user_id
    );
    Ok(())
}

pub async fn sign_in(backend: &Backend, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("email")?,
    };
    let password = prompt_line("password")?;

    let session = backend.sign_in(&email, &password).await?;
    save_session(&session)?;
    println!("Signed in as {}", session.user.email);
    Ok(())
}

pub async fn sign_out(backend: &Backend) -> Result<()> {
    match load_session()? {
        Some(session) => {
            backend.sign_out(&session.token).await?;
            clear_session()?;
            println!("Signed out {}", session.user.email);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

pub fn whoami() -> Result<()> {
    match load_session()? {
        Some(session) => println!("{} ({})", session.user.email, session.user.user_id),
        None => println!("Not signed in."),
    }
    Ok(())
}

pub async fn vote_cast(backend: &Backend, choice: VoteChoice) -> Result<()> {
    let Some(session) = load_session()? else {
        bail!("not signed in; run `salesboard auth sign-in` first");
    };

    let stored = backend.cast_vote(&session.user, choice).await?;
    if stored.vote == choice {
        println!("Vote recorded: {}", stored.vote.label());
    } else {
        // The store kept an earlier vote; report what actually stands
        println!(
            "An earlier vote stands: {} (cast {})",
            stored.vote.label(),
            stored.created_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    Ok(())
}

pub async fn vote_show(backend: &Backend) -> Result<()> {
    let Some(session) = load_session()? else {
        bail!("not signed in; run `salesboard auth sign-in` first");
    };

    match backend.get_vote(&session.user.user_id).await? {
        Some(vote) => println!(
            "{} voted {} on {}",
            vote.email,
            vote.vote.label(),
            vote.created_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("No vote on record."),
    }
    Ok(())
}
