use glossa_common::protocol::Session;

/// Routes a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Dictionary,
}

/// What actually gets shown for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Dictionary,
}

/// Gates protected routes on the session. Nothing is shown until the startup
/// session check has finished.
pub fn resolve_route(requested: Route, loading: bool, session: &Session) -> Screen {
    if loading {
        return Screen::Loading;
    }
    match (requested, session.is_authenticated) {
        (Route::Login, true) => Screen::Dictionary,
        (Route::Login, false) => Screen::Login,
        (Route::Root | Route::Dictionary, true) => Screen::Dictionary,
        (Route::Root | Route::Dictionary, false) => Screen::Login,
    }
}
