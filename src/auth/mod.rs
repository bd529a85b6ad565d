// Gateway module for auth - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod credentials;
mod dotenv_setup;

// Public re-exports - the ONLY way to access auth functionality
pub use credentials::{
    bootstrap_credentials, init_credentials, load_dotenv, resolve_credentials, Credentials,
};
pub use dotenv_setup::create_dotenv_file;
