use axum::response::Redirect;

/// Logical endpoints of the application.
///
/// Routes are registered from these and redirects target them by name, so a
/// path is spelled in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Index,
    Greeting,
    Hello,
    Register,
    Login,
    Logout,
    Account,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Index => "/",
            Endpoint::Greeting => "/index",
            Endpoint::Hello => "/hello",
            Endpoint::Register => "/auth/register",
            Endpoint::Login => "/auth/login",
            Endpoint::Logout => "/auth/logout",
            Endpoint::Account => "/account",
        }
    }

    pub fn redirect(self) -> Redirect {
        Redirect::to(self.path())
    }
}
