//! Navigation requests towards the presentation layer

use std::sync::{
    Mutex,
    PoisonError,
};

use crate::language::LanguageCode;

/// Screens the provider can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    /// Progress view for a translation into `code`
    Translating { code: LanguageCode },
}

/// Display layer that reacts to route changes.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only logs route changes. Used by the command-line shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(?route, "Navigate");
    }
}

/// Navigator that records every route it is sent to.
#[derive(Debug, Default)]
pub struct RouteHistory {
    /// Routes in arrival order
    routes: Mutex<Vec<Route>>,
}

impl RouteHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Route> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).last().copied()
    }
}

impl Navigator for RouteHistory {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_history_records_in_order() {
        let history = RouteHistory::new();

        history.navigate(Route::Translating { code: LanguageCode::Ja });
        history.navigate(Route::Home);

        assert_eq!(history.routes(), vec![Route::Translating { code: LanguageCode::Ja }, Route::Home]);
        assert_eq!(history.last(), Some(Route::Home));
    }

    #[test]
    fn test_empty_history() {
        let history = RouteHistory::new();

        assert!(history.routes().is_empty());
        assert_eq!(history.last(), None);
    }
}
