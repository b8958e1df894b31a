//! Voting page handlers.
//!
//! - `GET /`  : render both counts
//! - `POST /` : form field `vote` is one of the two options (increment) or
//!   `reset` (zero both); responds with the updated page

pub mod error;
pub mod page;

use axum::{
    extract::State,
    response::Html,
    Form,
};
use serde::Deserialize;

use votebox_core::{Ballot, VoteError};

use crate::app_state::AppState;

pub use error::WebError;

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub vote: Option<String>,
}

pub async fn index(State(app): State<AppState>) -> Result<Html<String>, WebError> {
    let tally = app.votes().tally(app.options()).await?;
    Ok(Html(page::render_page(app.title(), &tally)))
}

pub async fn vote(
    State(app): State<AppState>,
    Form(form): Form<VoteForm>,
) -> Result<Html<String>, WebError> {
    let raw = form
        .vote
        .ok_or_else(|| VoteError::BadRequest("missing form field: vote".into()))?;
    let options = app.options();

    let tally = match Ballot::parse(&raw, options)? {
        Ballot::Reset => app.votes().reset(options).await?,
        Ballot::Cast(choice) => {
            app.votes().increment(options.name(choice)).await?;
            app.votes().tally(options).await?
        }
    };

    Ok(Html(page::render_page(app.title(), &tally)))
}
