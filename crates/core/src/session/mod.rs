//! Session module - the session gate and the sign-in/sign-up flows.

mod session_model;
mod session_service;
mod session_traits;

#[cfg(test)]
mod session_service_tests;

pub use session_model::{AuthEvent, Credentials, Session, SessionUser, SignUpOutcome, SignUpRequest};
pub use session_service::{
    classify_sign_in_error, classify_sign_up_error, validate_sign_up, AuthService,
};
pub use session_traits::SessionProviderTrait;
