//! Declarative route table.
//!
//! Matching is first-match-wins in declaration order — declaration order is
//! authoritative, not automatic specificity ranking. Tables rely on manual
//! ordering, including deprecated-route redirects declared before their
//! successors.

use crate::context::RouteParams;
use crate::page::ViewLoader;
use std::sync::Arc;

/// Data a route may ask to have prefetched before it mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreloadKind {
    ProductList,
    ProductById,
    OrderList,
    OrderById,
    WalletBalance,
}

/// Declarative metadata evaluated by guards and post-navigation effects.
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
    /// Document title applied after mounting
    pub title: Option<&'static str>,
    /// Route requires an established session
    pub requires_auth: bool,
    /// Capability the session must hold (checked only when `requires_auth`)
    pub capability: Option<&'static str>,
    /// Show the platform back button after mounting
    pub show_back_button: bool,
    /// Show the bottom navigation after mounting
    pub show_bottom_nav: bool,
    /// Route is reachable while offline
    pub offline_safe: bool,
    /// Best-effort prefetch to run while entering the route
    pub preload: Option<PreloadKind>,
}

/// Rewrites a deprecated route's captured params into its successor target.
pub type RedirectFn = Arc<dyn Fn(&RouteParams) -> String + Send + Sync>;

/// What matching a route leads to.
#[derive(Clone)]
pub enum RouteAction {
    /// Lazily load a view and mount its controller
    View(ViewLoader),
    /// Compute a new target and re-enter matching (counts against the
    /// redirect cap)
    Redirect(RedirectFn),
}

/// One route definition. Immutable, declared at startup.
#[derive(Clone)]
pub struct Route {
    pub pattern: &'static str,
    pub action: RouteAction,
    pub meta: RouteMeta,
}

impl Route {
    #[must_use]
    pub fn view(pattern: &'static str, loader: ViewLoader, meta: RouteMeta) -> Self {
        Self {
            pattern,
            action: RouteAction::View(loader),
            meta,
        }
    }

    #[must_use]
    pub fn redirect<F>(pattern: &'static str, target: F) -> Self
    where
        F: Fn(&RouteParams) -> String + Send + Sync + 'static,
    {
        Self {
            pattern,
            action: RouteAction::Redirect(Arc::new(target)),
            meta: RouteMeta::default(),
        }
    }
}

/// A successful match: the route plus its extracted params.
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: RouteParams,
}

/// Static, ordered route table.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Find the first route whose pattern matches `path`, in declaration
    /// order. `path` must not carry a query string.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            match_pattern(route.pattern, path).map(|params| RouteMatch { route, params })
        })
    }

    /// Metadata of the first route matching `path`, if any.
    #[must_use]
    pub fn meta_for(&self, path: &str) -> Option<&RouteMeta> {
        self.match_path(path).map(|m| &m.route.meta)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Match one pattern against a path, extracting named params.
///
/// Pattern grammar: literal segments, `:name` captures, trailing `:name?`
/// optional captures, and the `*` catch-all. Unmatched optional segments are
/// simply absent from the map, not present with an empty string.
fn match_pattern(pattern: &str, path: &str) -> Option<RouteParams> {
    if pattern == "*" {
        return Some(RouteParams::new());
    }

    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if path_segments.len() > pattern_segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (index, segment) in pattern_segments.iter().enumerate() {
        if let Some(name) = segment.strip_prefix(':') {
            let (name, optional) = match name.strip_suffix('?') {
                Some(name) => (name, true),
                None => (name, false),
            };
            match path_segments.get(index) {
                Some(value) => {
                    params.insert(name.to_owned(), (*value).to_owned());
                }
                None if optional => {}
                None => return None,
            }
        } else if path_segments.get(index) != Some(segment) {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::page::{PageController, ViewModule, view_loader};
    use async_trait::async_trait;

    struct StubPage;

    #[async_trait]
    impl PageController for StubPage {
        async fn mount(
            &mut self,
            _ctx: &crate::context::NavigationContext,
        ) -> Result<(), NavError> {
            Ok(())
        }

        fn destroy(&mut self) {}
    }

    fn stub_loader(name: &'static str) -> ViewLoader {
        view_loader(move || async move { Ok(ViewModule::new(name, Box::new(StubPage))) })
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::view("/", stub_loader("home"), RouteMeta::default()),
            Route::view("/products", stub_loader("products"), RouteMeta::default()),
            // Deprecated route kept for compatibility, declared before its
            // successor so declaration order decides.
            Route::redirect("/hot-products/:code", |params| {
                format!(
                    "/products/list/{}",
                    params.get("code").map(String::as_str).unwrap_or_default()
                )
            }),
            Route::view(
                "/products/list/:country",
                stub_loader("product-list"),
                RouteMeta::default(),
            ),
            Route::view(
                "/products/:id",
                stub_loader("product-detail"),
                RouteMeta::default(),
            ),
            Route::view(
                "/countries/:region?",
                stub_loader("countries"),
                RouteMeta::default(),
            ),
            Route::view("*", stub_loader("not-found"), RouteMeta::default()),
        ])
    }

    #[test]
    fn test_literal_match() {
        let table = table();
        let matched = table.match_path("/products").unwrap();
        assert_eq!(matched.route.pattern, "/products");
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_root_match() {
        let table = table();
        assert_eq!(table.match_path("/").unwrap().route.pattern, "/");
    }

    #[test]
    fn test_param_extraction() {
        let table = table();
        let matched = table.match_path("/products/42").unwrap();
        assert_eq!(matched.route.pattern, "/products/:id");
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_nested_pattern_extraction() {
        let table = table();
        let matched = table.match_path("/products/list/us").unwrap();
        assert_eq!(matched.route.pattern, "/products/list/:country");
        assert_eq!(matched.params.get("country").map(String::as_str), Some("us"));
    }

    #[test]
    fn test_declaration_order_is_authoritative() {
        let literal_first = RouteTable::new(vec![
            Route::view("/orders/new", stub_loader("order-new"), RouteMeta::default()),
            Route::view("/orders/:id", stub_loader("order-detail"), RouteMeta::default()),
        ]);
        assert_eq!(
            literal_first.match_path("/orders/new").unwrap().route.pattern,
            "/orders/new"
        );

        // Reversed declaration: the parameterized route shadows the literal.
        // No specificity ranking is applied.
        let param_first = RouteTable::new(vec![
            Route::view("/orders/:id", stub_loader("order-detail"), RouteMeta::default()),
            Route::view("/orders/new", stub_loader("order-new"), RouteMeta::default()),
        ]);
        assert_eq!(
            param_first.match_path("/orders/new").unwrap().route.pattern,
            "/orders/:id"
        );
    }

    #[test]
    fn test_deprecated_redirect_matches_before_successor() {
        let table = table();
        let matched = table.match_path("/hot-products/jp").unwrap();
        match &matched.route.action {
            RouteAction::Redirect(target) => {
                assert_eq!(target(&matched.params), "/products/list/jp");
            }
            RouteAction::View(_) => panic!("expected redirect action"),
        }
    }

    #[test]
    fn test_optional_segment_present() {
        let table = table();
        let matched = table.match_path("/countries/asia").unwrap();
        assert_eq!(matched.route.pattern, "/countries/:region?");
        assert_eq!(matched.params.get("region").map(String::as_str), Some("asia"));
    }

    #[test]
    fn test_optional_segment_absent_is_not_in_map() {
        let table = table();
        let matched = table.match_path("/countries").unwrap();
        assert_eq!(matched.route.pattern, "/countries/:region?");
        assert!(!matched.params.contains_key("region"));
    }

    #[test]
    fn test_wildcard_fallback() {
        let table = table();
        let matched = table.match_path("/no/such/page").unwrap();
        assert_eq!(matched.route.pattern, "*");
    }

    #[test]
    fn test_extra_segments_do_not_match() {
        assert!(match_pattern("/products/:id", "/products/1/extra").is_none());
    }

    #[test]
    fn test_missing_required_segment_does_not_match() {
        assert!(match_pattern("/products/:id", "/products").is_none());
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let params = match_pattern("/products/:id", "/products/7/").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_no_match_without_wildcard() {
        let table = RouteTable::new(vec![Route::view(
            "/only",
            stub_loader("only"),
            RouteMeta::default(),
        )]);
        assert!(table.match_path("/other").is_none());
    }
}
