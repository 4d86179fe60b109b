//! Priority-ordered route collection
//!
//! Children of a route live in a [`RouteCollection`]. Entries are iterated by
//! priority, highest first; among equal priorities the most recently inserted
//! entry comes first. Entries may be inserted as configuration records, which
//! are turned into routes by the collection's factory the first time they are
//! looked up and cached in place from then on.

use crate::error::{Result, RouterError};
use crate::factory::{RouteFactoryRef, RouteManager};
use crate::match_result::{MatchResult, MethodNotAllowed, SchemeNotAllowed};
use crate::request::HttpRequest;
use crate::route::{RouteDefinition, RouteRef};
use crate::{error_log, trace_log};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Priority given to entries when none is specified
pub const DEFAULT_PRIORITY: i32 = 1;

#[derive(Debug)]
struct Entry {
    priority: i32,
    serial: u64,
    route: RouteDefinition,
}

#[derive(Debug, Default)]
struct Slots {
    routes: HashMap<String, Entry>,
    /// Names in iteration order; only valid while `sorted` is set
    order: Vec<String>,
    serial: u64,
    sorted: bool,
}

impl Slots {
    fn sorted_names(&mut self) -> Vec<String> {
        if !self.sorted {
            let mut order: Vec<(&String, &Entry)> = self.routes.iter().collect();
            order.sort_by(|(_, a), (_, b)| {
                b.priority
                    .cmp(&a.priority)
                    .then_with(|| b.serial.cmp(&a.serial))
            });
            self.order = order.into_iter().map(|(name, _)| name.clone()).collect();
            self.sorted = true;
            trace_log!("Sorted route collection: {:?}", self.order);
        }
        self.order.clone()
    }
}

/// Named child routes of a route
///
/// # Example
///
/// ```
/// use route_tree::{GenericRoute, LiteralParser, RouteCollection};
///
/// let mut routes = RouteCollection::default();
/// routes.insert("low", GenericRoute::new().path_parser(LiteralParser::new("/a")), 1);
/// routes.insert("high", GenericRoute::new().path_parser(LiteralParser::new("/b")), 10);
/// routes.insert("later", GenericRoute::new().path_parser(LiteralParser::new("/c")), 1);
///
/// assert_eq!(routes.names(), vec!["high", "later", "low"]);
/// ```
#[derive(Debug)]
pub struct RouteCollection {
    factory: RouteFactoryRef,
    slots: Mutex<Slots>,
}

impl RouteCollection {
    /// Create an empty collection resolving configuration records through `factory`
    pub fn new(factory: RouteFactoryRef) -> Self {
        Self {
            factory,
            slots: Mutex::new(Slots {
                sorted: true,
                ..Slots::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slots_mut(&mut self) -> &mut Slots {
        self.slots.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Factory used to build routes from configuration records
    pub fn factory(&self) -> &RouteFactoryRef {
        &self.factory
    }

    /// Add or replace a route
    ///
    /// Replacing a name gives it a fresh insertion serial.
    pub fn insert(&mut self, name: impl Into<String>, route: impl Into<RouteDefinition>, priority: i32) {
        let slots = self.slots_mut();
        let serial = slots.serial;
        slots.serial += 1;
        slots.sorted = false;
        slots.routes.insert(
            name.into(),
            Entry {
                priority,
                serial,
                route: route.into(),
            },
        );
    }

    /// Add a route from loosely-typed configuration
    ///
    /// Anything other than a JSON object is rejected.
    pub fn insert_value(&mut self, name: impl Into<String>, value: Value, priority: i32) -> Result<()> {
        let name = name.into();
        let definition = RouteDefinition::try_from(value).map_err(|e| match e {
            RouterError::InvalidArgument(message) => {
                RouterError::InvalidArgument(format!("route '{}': {}", name, message))
            }
            other => other,
        })?;
        self.insert(name, definition, priority);
        Ok(())
    }

    /// Remove a route; removing an unknown name is not an error
    pub fn remove(&mut self, name: &str) {
        let slots = self.slots_mut();
        if slots.routes.remove(name).is_some() {
            slots.sorted = false;
        }
    }

    /// Remove all routes and reset insertion serials
    pub fn clear(&mut self) {
        let slots = self.slots_mut();
        slots.routes.clear();
        slots.order.clear();
        slots.serial = 0;
        slots.sorted = true;
    }

    /// Look up a route by name, building it from its configuration on first access
    ///
    /// The factory runs without the collection locked, so it may look at this
    /// collection itself. If another caller memoized the route in the
    /// meantime, that instance wins and the one just built is dropped.
    pub fn get(&self, name: &str) -> Result<Option<RouteRef>> {
        let (serial, config) = {
            let slots = self.lock();
            let Some(entry) = slots.routes.get(name) else {
                return Ok(None);
            };
            match &entry.route {
                RouteDefinition::Route(route) => return Ok(Some(Arc::clone(route))),
                RouteDefinition::Config(config) => (entry.serial, config.clone()),
            }
        };

        trace_log!(
            "Instantiating route '{}' of type '{}'",
            name,
            config.type_name()
        );
        let route = self.factory.create(config.type_name(), &config.options)?;

        let mut slots = self.lock();
        let Some(entry) = slots.routes.get_mut(name).filter(|e| e.serial == serial) else {
            // Replaced or removed while the factory ran; not memoized.
            return Ok(Some(route));
        };

        if let RouteDefinition::Route(existing) = &entry.route {
            return Ok(Some(Arc::clone(existing)));
        }
        entry.route = RouteDefinition::Route(Arc::clone(&route));
        Ok(Some(route))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().routes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().routes.is_empty()
    }

    /// Route names in iteration order
    pub fn names(&self) -> Vec<String> {
        self.lock().sorted_names()
    }

    /// Iterate routes in priority order, instantiating them as they are reached
    ///
    /// The order is fixed when iteration starts. Each call starts over.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            collection: self,
            names: self.names().into_iter(),
        }
    }

    /// Match every route in order and merge their results
    ///
    /// The first success wins outright and has its route name recorded.
    /// Otherwise the first custom result is returned, then the first
    /// scheme-not-allowed result, then the allowed methods of all
    /// method-not-allowed results in iteration order.
    pub fn match_request(
        &self,
        request: &dyn HttpRequest,
        path_offset: usize,
    ) -> Result<Option<MatchResult>> {
        let mut first_unknown: Option<MatchResult> = None;
        let mut first_scheme_not_allowed: Option<SchemeNotAllowed> = None;
        let mut allowed_methods = MethodNotAllowed::new(Vec::new());

        for item in self.iter() {
            let (name, route) = item?;
            let result = route.match_request(request, path_offset)?;
            trace_log!(
                "Child '{}' at offset {}: {}",
                name,
                path_offset,
                result.as_ref().map_or("no match", MatchResult::kind)
            );

            match result {
                None => continue,
                Some(MatchResult::Success(mut success)) => {
                    success.prepend_route_name(&name);
                    return Ok(Some(MatchResult::Success(success)));
                }
                Some(result) if result.is_success() => {
                    error_log!("Route '{}' reported success with {:?}", name, result);
                    return Err(RouterError::UnexpectedValue(format!(
                        "Expected instance of SuccessfulMatch, received {:?}",
                        result
                    )));
                }
                Some(MatchResult::SchemeNotAllowed(result)) => {
                    if first_scheme_not_allowed.is_none() {
                        first_scheme_not_allowed = Some(result);
                    }
                }
                Some(MatchResult::MethodNotAllowed(result)) => {
                    allowed_methods.merge(&result);
                }
                Some(other) => {
                    if first_unknown.is_none() {
                        first_unknown = Some(other);
                    }
                }
            }
        }

        if first_unknown.is_some() {
            return Ok(first_unknown);
        }
        if let Some(result) = first_scheme_not_allowed {
            return Ok(Some(result.into()));
        }
        if !allowed_methods.allowed_methods().is_empty() {
            return Ok(Some(allowed_methods.into()));
        }

        Ok(None)
    }
}

impl Default for RouteCollection {
    fn default() -> Self {
        Self::new(Arc::new(RouteManager::new()))
    }
}

/// Iterator over a [`RouteCollection`], yielding `(name, route)` pairs
#[derive(Debug)]
pub struct Iter<'a> {
    collection: &'a RouteCollection,
    names: std::vec::IntoIter<String>,
}

impl Iterator for Iter<'_> {
    type Item = Result<(String, RouteRef)>;

    fn next(&mut self) -> Option<Self::Item> {
        for name in self.names.by_ref() {
            match self.collection.get(&name) {
                Ok(Some(route)) => return Some(Ok((name, route))),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = Result<(String, RouteRef)>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
