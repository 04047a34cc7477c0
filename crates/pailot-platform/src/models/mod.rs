//! PailotPH Data Models
//!
//! Data structures exchanged with the wallet SDK and the backend.

pub mod auth;
pub mod delivery;
pub mod payment;

pub use auth::*;
pub use delivery::*;
pub use payment::*;
