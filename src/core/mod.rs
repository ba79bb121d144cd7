//! Core shell emulation components.
//!
//! This module contains the backend-independent shell logic:
//!
//! - **tokenizer**: Command line splitting with quote handling
//! - **history**: In-memory command history with arrow-key navigation
//! - **surface**: Styled text buffer abstraction the session writes into
//! - **guard**: Input region guard keeping prior output immutable
//! - **dispatcher**: Command dispatch contract and stub commands
//! - **prompt**: Prompt derivation from user and host name
//! - **session**: Session engine tying the above together
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── Surface (styled text + cursor + selection)
//! ├── SessionState
//! │   ├── InputGuard (input boundary)
//! │   └── CommandHistory (log + cursor + pending edit)
//! └── CommandDispatcher (tokenized command → result)
//! ```

pub mod tokenizer;
pub mod history;
pub mod surface;
pub mod guard;
pub mod dispatcher;
pub mod prompt;
pub mod session;

pub use dispatcher::{LaunchParams, StubDispatcher};
pub use guard::EditKey;
pub use prompt::Identity;
pub use session::{ScriptOutcome, Session, SessionEvent};
pub use surface::{Cell, Style, Surface, TextSurface};
