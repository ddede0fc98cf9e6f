pub mod api_client;
pub mod config_service;
pub mod credential_store;
pub mod preference_store;
pub mod session_manager;
pub mod validation_service;

pub use api_client::{ApiClient, ApiReply, NoToken, TokenProvider};
pub use config_service::ConfigService;
pub use credential_store::{CredentialRecord, CredentialStore, MasterKey};
pub use preference_store::{PrefKey, PreferenceStore, Preferences};
pub use session_manager::SessionManager;
pub use validation_service::{InputError, ValidationService};
