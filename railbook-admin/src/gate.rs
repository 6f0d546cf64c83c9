use railbook_api::Session;
use railbook_shared::UserProfile;

/// What the router should do with a request for an admin screen. Redirects
/// are control flow here, not error displays.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminAccess {
    Granted(UserProfile),
    RedirectToAdminLogin,
    RedirectHome,
}

pub struct AdminGate;

impl AdminGate {
    /// Staff and superuser accounts pass; anonymous sessions go to the
    /// admin login; everyone else goes home.
    pub fn check(session: &Session) -> AdminAccess {
        match session {
            Session::LoggedOut => AdminAccess::RedirectToAdminLogin,
            Session::LoggedIn(profile) if profile.is_privileged() => {
                AdminAccess::Granted(profile.clone())
            }
            Session::LoggedIn(profile) => {
                tracing::debug!(user = profile.id, "non-privileged account on admin screen");
                AdminAccess::RedirectHome
            }
        }
    }
}
