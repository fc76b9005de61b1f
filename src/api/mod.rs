//! # API Module
//!
//! HTTP handlers for the Spotify Universe backend, built on
//! [Axum](https://docs.rs/axum). Every handler receives the shared
//! [`crate::AppState`] through an `Extension`.
//!
//! ## Endpoints
//!
//! ### Pages
//!
//! - [`index`] / [`universe`] - The two HTML pages of the front end
//! - [`static_files`] - Files below `static/`, including cached artist images
//! - [`script`] - Fallback serving `*.js` files from the public directory
//!
//! ### Authentication
//!
//! - [`callback`] - Spotify's redirect target. Browser navigations are sent
//!   back to `/` with the code; programmatic calls exchange it for a token.
//! - [`spotify_config`] - Client id and redirect URI for the authorize URL
//!
//! ### Data
//!
//! - [`get_data`] - The caller's top artists ranked by Last.fm scrobbles
//!
//! ### Monitoring
//!
//! - [`health`] - Status, version and which settings are present
//! - [`debug`] - How the server sees the request URL

mod callback;
mod data;
mod health;
mod pages;

pub use callback::callback;
pub use data::get_data;
pub use data::spotify_config;
pub use health::health;
pub use pages::debug;
pub use pages::index;
pub use pages::script;
pub use pages::static_files;
pub use pages::universe;
