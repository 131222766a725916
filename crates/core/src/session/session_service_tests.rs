#[cfg(test)]
mod tests {
    use crate::errors::{AuthFailure, Error};
    use crate::memory::MemoryBackend;
    use crate::session::*;
    use std::sync::Arc;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn sign_up_request(email: &str, password: &str, confirm: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_classifies_backend_messages() {
        assert_eq!(
            classify_sign_in_error("Invalid login credentials"),
            AuthFailure::InvalidCredentials
        );
        assert_eq!(
            classify_sign_in_error("Email not confirmed"),
            AuthFailure::EmailNotConfirmed
        );
        assert_eq!(
            classify_sign_up_error("User already registered"),
            AuthFailure::AlreadyRegistered
        );
        assert_eq!(
            classify_sign_up_error("Unable to validate email address: please provide a valid email"),
            AuthFailure::InvalidEmail
        );
        assert_eq!(
            classify_sign_in_error("Rate limit exceeded"),
            AuthFailure::Rejected("Rate limit exceeded".to_string())
        );
    }

    #[test]
    fn test_sign_up_form_validation() {
        let mismatch = validate_sign_up(&sign_up_request("a@b.it", "secret1", "secret2"));
        assert!(matches!(mismatch, Err(Error::Auth(AuthFailure::PasswordMismatch))));

        let short = validate_sign_up(&sign_up_request("a@b.it", "12345", "12345"));
        assert!(matches!(short, Err(Error::Auth(AuthFailure::PasswordTooShort(6)))));

        assert!(validate_sign_up(&sign_up_request("a@b.it", "123456", "123456")).is_ok());
    }

    #[tokio::test]
    async fn test_require_session_gate() {
        let backend = MemoryBackend::new();
        let user_id = backend.register_user("agent@agency.it", "secret1");
        let session = backend.open_session(&user_id).unwrap();
        let auth = AuthService::new(Arc::new(backend));

        assert!(matches!(
            auth.require_session(None).await,
            Err(Error::Unauthenticated(_))
        ));
        assert!(matches!(
            auth.require_session(Some("bogus")).await,
            Err(Error::Unauthenticated(_))
        ));
        let found = auth.require_session(Some(&session.access_token)).await.unwrap();
        assert_eq!(found.user.id, user_id);
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_classified() {
        let backend = MemoryBackend::new();
        backend.register_user("agent@agency.it", "secret1");
        backend.register_unconfirmed_user("new@agency.it", "secret1");
        let auth = AuthService::new(Arc::new(backend));

        let wrong = auth.sign_in(&credentials("agent@agency.it", "nope")).await;
        assert!(matches!(wrong, Err(Error::Auth(AuthFailure::InvalidCredentials))));

        let unconfirmed = auth.sign_in(&credentials("new@agency.it", "secret1")).await;
        assert!(matches!(unconfirmed, Err(Error::Auth(AuthFailure::EmailNotConfirmed))));
    }

    #[tokio::test]
    async fn test_sign_in_and_out_publish_events() {
        let backend = MemoryBackend::new();
        let user_id = backend.register_user("agent@agency.it", "secret1");
        let auth = AuthService::new(Arc::new(backend));
        let mut events = auth.subscribe();

        let session = auth
            .sign_in(&credentials("agent@agency.it", "secret1"))
            .await
            .unwrap();
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::SignedIn {
                user_id: user_id.clone()
            }
        );

        auth.sign_out(&session).await.unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.name(), "SIGNED_OUT");
        assert_eq!(event.user_id(), user_id);
        assert!(auth.require_session(Some(&session.access_token)).await.is_err());
    }

    #[tokio::test]
    async fn test_sign_up_outcomes() {
        let backend = MemoryBackend::new();
        backend.register_user("taken@agency.it", "secret1");
        let auth = AuthService::new(Arc::new(backend.clone()));

        let taken = auth
            .sign_up(&sign_up_request("taken@agency.it", "secret1", "secret1"))
            .await;
        assert!(matches!(taken, Err(Error::Auth(AuthFailure::AlreadyRegistered))));

        let invalid = auth
            .sign_up(&sign_up_request("not-an-email", "secret1", "secret1"))
            .await;
        assert!(matches!(invalid, Err(Error::Auth(AuthFailure::InvalidEmail))));

        let pending = auth
            .sign_up(&sign_up_request("fresh@agency.it", "secret1", "secret1"))
            .await
            .unwrap();
        assert_eq!(
            pending,
            SignUpOutcome::ConfirmationRequired {
                email: "fresh@agency.it".to_string()
            }
        );

        let instant = AuthService::new(Arc::new(backend.with_auto_confirm()));
        let signed_in = instant
            .sign_up(&sign_up_request("quick@agency.it", "secret1", "secret1"))
            .await
            .unwrap();
        assert!(matches!(signed_in, SignUpOutcome::SignedIn { .. }));
    }
}
