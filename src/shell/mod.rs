//! Session shell: the login/bootstrap flow of the dashboard.
//!
//! [`SessionState`] holds everything the view layer shows: the credential
//! inputs, the session flag, a user-visible message and the opaque overview
//! payload. [`SessionShell`] drives the two backend calls that move that state
//! forward:
//!
//! ```no_run
//! use vreport::shell::{Credentials, SessionShell, SessionState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let shell = SessionShell::new(reqwest::Client::new(), "http://127.0.0.1:8000");
//! let mut state = SessionState::default();
//! shell
//!     .login(&mut state, Credentials::new("vc.example.com", "admin", "secret"))
//!     .await?;
//! assert!(state.logged_in);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod state;

pub use client::{set_silent, SessionShell, LOGIN_FAILED};
pub use error::ShellError;
pub use state::{Credentials, Overview, SessionState};
