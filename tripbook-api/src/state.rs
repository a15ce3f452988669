use tripbook_store::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub cookie_name: String,
}

impl AppState {
    pub fn new(sessions: SessionRegistry, cookie_name: impl Into<String>) -> Self {
        Self {
            sessions,
            cookie_name: cookie_name.into(),
        }
    }
}
