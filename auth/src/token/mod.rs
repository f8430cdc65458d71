pub mod claims;
pub mod config;
pub mod errors;
pub mod service;

pub use claims::AccessClaims;
pub use claims::TokenSubject;
pub use config::TokenConfig;
pub use errors::TokenConfigError;
pub use errors::TokenError;
pub use service::IssuedToken;
pub use service::TokenService;
