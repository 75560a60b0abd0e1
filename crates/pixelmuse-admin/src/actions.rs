//! Admin actions: sign-out and its collaborator seams

use crate::session::AdminAuth;
use tracing::warn;

/// Route of the admin login surface
pub const LOGIN_ROUTE: &str = "/admin/login";

/// Confirmation shown after a successful sign-out
pub const SIGNED_OUT_MESSAGE: &str = "Logged out successfully";

/// User-visible notification sink
pub trait Notifier {
    /// Show a confirmation message to the user
    fn notify(&self, message: &str);
}

/// One-way navigation sink
pub trait Navigator {
    /// Navigate to the given route
    fn navigate(&self, route: &str);
}

/// Sign the admin out
///
/// Clears the persisted session flag, emits a confirmation and navigates
/// to the login surface. Idempotent: a second call is a no-op storage-wise,
/// but the confirmation and navigation fire every time. A storage failure
/// while clearing is logged and does not stop the navigation.
pub fn sign_out(auth: &mut AdminAuth, notifier: &dyn Notifier, navigator: &dyn Navigator) {
    if let Err(e) = auth.clear() {
        warn!("Failed to clear admin session flag on sign-out: {e}");
    }

    notifier.notify(SIGNED_OUT_MESSAGE);
    navigator.navigate(LOGIN_ROUTE);
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionStore};
    use pixelmuse_core::types::ADMIN_SESSION_KEY;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<String>>,
        routes: Mutex<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, message: &str) {
            if let Ok(mut messages) = self.messages.lock() {
                messages.push(message.to_string());
            }
        }
    }

    impl Navigator for Recorder {
        fn navigate(&self, route: &str) {
            if let Ok(mut routes) = self.routes.lock() {
                routes.push(route.to_string());
            }
        }
    }

    #[test]
    fn test_sign_out_clears_notifies_and_navigates() {
        let store = Arc::new(MemorySessionStore::new());
        let mut auth = AdminAuth::new(Arc::clone(&store) as Arc<dyn SessionStore>);
        auth.log_in().expect("log in");

        let recorder = Recorder::default();
        sign_out(&mut auth, &recorder, &recorder);

        assert!(!auth.authenticated());
        assert_eq!(store.read(ADMIN_SESSION_KEY).expect("read flag"), None);
        assert_eq!(
            recorder.messages.lock().expect("messages").as_slice(),
            [SIGNED_OUT_MESSAGE.to_string()]
        );
        assert_eq!(
            recorder.routes.lock().expect("routes").as_slice(),
            [LOGIN_ROUTE.to_string()]
        );
    }

    #[test]
    fn test_sign_out_twice_is_idempotent() {
        let store = Arc::new(MemorySessionStore::new());
        let mut auth = AdminAuth::new(Arc::clone(&store) as Arc<dyn SessionStore>);
        auth.log_in().expect("log in");

        let recorder = Recorder::default();
        sign_out(&mut auth, &recorder, &recorder);
        sign_out(&mut auth, &recorder, &recorder);

        // Flag stays cleared, navigation fires each time
        assert_eq!(store.read(ADMIN_SESSION_KEY).expect("read flag"), None);
        assert_eq!(recorder.routes.lock().expect("routes").len(), 2);
        assert_eq!(recorder.messages.lock().expect("messages").len(), 2);
    }

    #[test]
    fn test_sign_out_when_never_logged_in() {
        let mut auth = AdminAuth::new(Arc::new(MemorySessionStore::new()));
        auth.initialize();

        let recorder = Recorder::default();
        sign_out(&mut auth, &recorder, &recorder);

        assert!(!auth.authenticated());
        assert_eq!(recorder.routes.lock().expect("routes").len(), 1);
    }
}
