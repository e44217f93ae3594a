//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credentials;
pub mod realtime;
pub mod session;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RegisterAccount};
pub use credentials::{CredentialStore, CredentialVault, CredentialVaultConfig};
pub use realtime::{
    AdmittedConnection, ChannelBroadcaster, ClientCommand, ConnectionGate, ConnectionHandle,
    ServerEvent,
};
pub use session::SessionManager;
pub use token::{TokenCodec, TokenCodecConfig};
pub use verification::{EmailMessage, EmailSender, VerificationConfig, VerificationWorkflow};
