//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Server side of the authorization code flow:
//! - **Request Classification**: Tells a browser landing on `/callback` apart
//!   from the front end's follow-up `fetch`
//! - **Redirect URI**: Rebuilds the redirect URI from the live request so it
//!   matches what the front end sent to the authorize endpoint
//! - **Token Exchange**: Trades the code plus client credentials for a token
//!
//! ### Artist Module
//!
//! [`artists`] - Bearer-token client for the Web API:
//! - **Top Artists**: A user's most listened artists for a time range
//!
//! ## Token Handling
//!
//! Tokens are never stored server side. The front end keeps the access
//! token and sends it back on every data request as
//! `Authorization: Bearer <token>`.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Authorization code exchange
//! - `GET /me/top/artists` - User's top artists

pub mod artists;
pub mod auth;

pub use artists::SpotifyClient;
