//! # Check-in Library
//!
//! Pure decision logic for attendance check-ins. Nothing in this crate touches the
//! database or the clock; callers hand in the session, the attempt, the records that
//! already exist for the session and the current [`CheckInPolicy`], and get back a
//! [`Decision`] or a [`CheckInError`] rejection.
//!
//! ## Key Concepts
//! - **Geofence**: great-circle distance between the session anchor and the submitted
//!   position, compared against the allowed radius ([`geo`], [`location`]).
//! - **Window**: whether the attempt falls inside the session and whether it is late ([`window`]).
//! - **Shared devices**: fingerprint/IP reuse across different students of one session ([`fingerprint`]).
//! - **Flags**: fraud signals raised by a decision, persisted separately by the caller.

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod geo;
pub mod location;
pub mod policy;
pub mod types;
pub mod window;

pub use engine::{CheckInEngine, Decision, RaisedFlag};
pub use error::CheckInError;
pub use policy::CheckInPolicy;
pub use types::{AttendanceStatus, CheckInAttempt, Coordinates, FlagKind, PriorCheckIn, SessionSnapshot};
