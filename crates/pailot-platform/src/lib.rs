// ============================================================================
// PAILOT-PLATFORM - Pi Platform Session
// ============================================================================
// Sign-in, payments and sharing through the Pi wallet SDK, mirrored to the
// PailotPH backend.
//
// Every wallet action runs SDK first, backend second. The SDK and the
// backend sit behind traits so the session can be driven by the Pi Platform
// REST API, an in-browser bridge, or test doubles.
//
// Features:
// - Wallet authentication with payments / username / wallet_address scopes
// - Payment lifecycle: create, submit (approve), complete, cancel
// - Reconciliation of payments left incomplete by a previous session
// - Orders, profile, transaction and delivery history on the backend
// ============================================================================

pub mod backend;
pub mod error;
pub mod models;
pub mod pi_api;
pub mod sdk;
pub mod session;

pub use backend::{BackendApi, HttpBackend, DEFAULT_BACKEND_URL};
pub use error::PlatformError;
pub use models::*;
pub use pi_api::{PiPlatformClient, DEFAULT_PLATFORM_URL};
pub use sdk::WalletSdk;
pub use session::PlatformSession;

/// Re-export for convenience
pub type Result<T> = std::result::Result<T, PlatformError>;
