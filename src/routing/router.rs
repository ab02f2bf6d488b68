//! Declarative route table.
//!
//! # Responsibilities
//! - Map (method, path pattern) pairs to operations
//! - Resolve a request to an operation, a method mismatch, or no match
//! - Publish the endpoint catalogue
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - Routes checked in registration order, first pattern match wins
//! - Explicit NotFound / MethodNotAllowed rather than silent default

use axum::http::Method;

use crate::routing::matcher::{Params, PathPattern};

/// Operations the API can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ServiceInfo,
    ListBookings,
    CreateBooking,
    GetBooking,
    UpdateBooking,
    DeleteBooking,
}

impl Operation {
    /// Short label for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ServiceInfo => "info",
            Operation::ListBookings => "list",
            Operation::CreateBooking => "create",
            Operation::GetBooking => "get",
            Operation::UpdateBooking => "update",
            Operation::DeleteBooking => "delete",
        }
    }
}

#[derive(Debug, Clone)]
enum Methods {
    /// Every method reaches the same operation.
    Any(Operation),
    Only(Vec<(Method, Operation)>),
}

#[derive(Debug, Clone)]
struct Route {
    pattern: PathPattern,
    methods: Methods,
}

/// Result of resolving a request against the table.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    Matched {
        operation: Operation,
        params: Params<'a>,
    },
    MethodNotAllowed {
        allow: Vec<Method>,
        params: Params<'a>,
    },
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    prefix: &'static str,
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            routes: Vec::new(),
        }
    }

    /// The booking API's routes under `/api`.
    pub fn bookings() -> Self {
        Self::new("/api")
            .any("/", Operation::ServiceInfo)
            .route(Method::GET, "/bookings", Operation::ListBookings)
            .route(Method::POST, "/bookings", Operation::CreateBooking)
            .route(Method::GET, "/bookings/{id}", Operation::GetBooking)
            .route(Method::PUT, "/bookings/{id}", Operation::UpdateBooking)
            .route(Method::DELETE, "/bookings/{id}", Operation::DeleteBooking)
    }

    /// Register `operation` for every method on `pattern`.
    pub fn any(mut self, pattern: &'static str, operation: Operation) -> Self {
        self.routes.push(Route {
            pattern: PathPattern::parse(pattern),
            methods: Methods::Any(operation),
        });
        self
    }

    /// Register `operation` for one method on `pattern`.
    pub fn route(mut self, method: Method, pattern: &'static str, operation: Operation) -> Self {
        let pattern = PathPattern::parse(pattern);
        let existing = self
            .routes
            .iter_mut()
            .find(|r| r.pattern == pattern)
            .map(|r| &mut r.methods);

        if let Some(Methods::Only(methods)) = existing {
            methods.push((method, operation));
        } else {
            self.routes.push(Route {
                pattern,
                methods: Methods::Only(vec![(method, operation)]),
            });
        }
        self
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn resolve<'a>(&self, method: &Method, segments: &[&'a str]) -> RouteMatch<'a> {
        for route in &self.routes {
            let Some(params) = route.pattern.matches(segments) else {
                continue;
            };

            return match &route.methods {
                Methods::Any(operation) => RouteMatch::Matched {
                    operation: *operation,
                    params,
                },
                Methods::Only(methods) => match methods.iter().find(|(m, _)| m == method) {
                    Some((_, operation)) => RouteMatch::Matched {
                        operation: *operation,
                        params,
                    },
                    None => RouteMatch::MethodNotAllowed {
                        allow: methods.iter().map(|(m, _)| m.clone()).collect(),
                        params,
                    },
                },
            };
        }
        RouteMatch::NotFound
    }

    /// Every endpoint as `"METHOD /prefix/path"`.
    pub fn catalogue(&self) -> Vec<String> {
        let mut endpoints = Vec::new();
        for route in &self.routes {
            let path = format!("{}{}", self.prefix, route.pattern);
            match &route.methods {
                Methods::Any(_) => endpoints.push(format!("GET {}", path)),
                Methods::Only(methods) => {
                    endpoints.extend(methods.iter().map(|(m, _)| format!("{} {}", m, path)))
                }
            }
        }
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_methods() {
        let table = RouteTable::bookings();
        assert!(matches!(
            table.resolve(&Method::GET, &["bookings"]),
            RouteMatch::Matched { operation: Operation::ListBookings, .. }
        ));
        assert!(matches!(
            table.resolve(&Method::POST, &["bookings"]),
            RouteMatch::Matched { operation: Operation::CreateBooking, .. }
        ));
        match table.resolve(&Method::PATCH, &["bookings"]) {
            RouteMatch::MethodNotAllowed { allow, .. } => {
                assert_eq!(allow, vec![Method::GET, Method::POST])
            }
            other => panic!("expected 405, got {:?}", other),
        }
    }

    #[test]
    fn item_methods_capture_id() {
        let table = RouteTable::bookings();
        match table.resolve(&Method::PUT, &["bookings", "9"]) {
            RouteMatch::Matched { operation, params } => {
                assert_eq!(operation, Operation::UpdateBooking);
                assert_eq!(params.get("id"), Some("9"));
            }
            other => panic!("expected match, got {:?}", other),
        }
        match table.resolve(&Method::POST, &["bookings", "9"]) {
            RouteMatch::MethodNotAllowed { allow, params } => {
                assert_eq!(allow, vec![Method::GET, Method::PUT, Method::DELETE]);
                assert_eq!(params.get("id"), Some("9"));
            }
            other => panic!("expected 405, got {:?}", other),
        }
    }

    #[test]
    fn root_accepts_any_method() {
        let table = RouteTable::bookings();
        for method in [Method::GET, Method::POST, Method::DELETE] {
            assert!(matches!(
                table.resolve(&method, &[]),
                RouteMatch::Matched { operation: Operation::ServiceInfo, .. }
            ));
        }
    }

    #[test]
    fn unknown_paths_do_not_match() {
        let table = RouteTable::bookings();
        assert_eq!(table.resolve(&Method::GET, &["rooms"]), RouteMatch::NotFound);
        assert_eq!(
            table.resolve(&Method::GET, &["bookings", "1", "notes"]),
            RouteMatch::NotFound
        );
    }

    #[test]
    fn catalogue_lists_every_endpoint() {
        assert_eq!(
            RouteTable::bookings().catalogue(),
            vec![
                "GET /api/",
                "GET /api/bookings",
                "POST /api/bookings",
                "GET /api/bookings/:id",
                "PUT /api/bookings/:id",
                "DELETE /api/bookings/:id",
            ]
        );
    }
}
