//! SendGrid provider implementation.
//!
//! Talks to the v3 REST API with a tenant's API key as bearer token.
//!
//! Endpoints: `/v3/user/credits`, `/v3/subusers`, `/v3/subusers/{name}`,
//! `/v3/subusers/stats`

mod api;
mod error;
pub(crate) mod parser;
mod provider;

pub use api::{SendGridClient, MAX_SUBUSERS_PER_STATS_REQUEST, SENDGRID_API_BASE};
pub use error::SendGridError;
pub use parser::{CreditsResponse, StatsDay, StatsEntry, SubuserEntry};
pub use provider::SENDGRID_PROVIDER_ID;
