//! Rolling-window rate limiting for outbound API calls
//!
//! [`RateLimitedGate`] guards a [`crate::sender::DocumentSender`] so that no
//! more than `max_requests` sends start within any window of the configured
//! duration. Excess callers suspend cooperatively until capacity frees up.

mod gate;
mod types;
mod window;


pub use gate::RateLimitedGate;
pub use types::{Admission, RateLimit};
