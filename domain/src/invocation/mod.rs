//! Invocation building
//!
//! Turns a [`CapabilityModel`](crate::capability::CapabilityModel) plus a
//! caller's [`InvocationRequest`] into an [`InvocationVector`]: the exact
//! tokens handed to the process runner.
//!
//! # Build order
//!
//! 1. Configured defaults are merged in (caller values win)
//! 2. Leading subcommand from the [`ConventionTable`], if any
//! 3. Session continuation: `--continue` for `latest`, else the session flag,
//!    else the resume flag, each with the id as value
//! 4. Prompt: through a `--prompt` option when the model has one and the
//!    convention does not force positional placement, otherwise bare
//! 5. Remaining options in model order; booleans only when strictly `true`
//!
//! Only a missing required positional is an error ([`BuildError`]).

pub mod builder;
pub mod conventions;
pub mod overlay;
pub mod request;
pub mod session;

pub use builder::{BuildError, InvocationBuilder, InvocationVector, TokenRole};
pub use conventions::{ConventionTable, ToolConvention};
pub use overlay::ToolOverlay;
pub use request::InvocationRequest;
pub use session::{LATEST_SESSION, SESSION_ID_KEY, SessionFlags, with_session_option};
