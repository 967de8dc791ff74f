//! # Lifecycle Event Registry
//!
//! The fixed set of extension points a host fires while handling requests,
//! together with their positional argument shapes:
//!
//! | Event | Arguments |
//! |---|---|
//! | `configure` | `(options)` |
//! | `endpoint` | `(endpoint, options)` |
//! | `beforeRequest` | `(model, request, response, options)` |
//! | `beforeCreate` | `(model, request, response, options)` |
//! | `afterCreate` | `(model, request, response, options)` |
//! | `beforeUpdate` | `(model, request, response, options)` |
//! | `afterUpdate` | `(model, request, response, options)` |
//! | `beforeRead` | `(queryCriteria, request, response, options)` |
//! | `afterRead` | `(models, request, response, options)` |
//! | `beforeDelete` | `(model, request, response, options)` |
//!
//! The registry is closed: events are known at compile time and cannot be
//! added at runtime.

use crate::error::UnknownEvent;
use bitflags::bitflags;
use std::{fmt, str::FromStr};

/// A named extension point in a create/read/update/delete flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Mixin or API initialization.
    Configure,
    /// Registration of a single route.
    Endpoint,
    /// Start of any request handling.
    BeforeRequest,
    /// Before a create is persisted.
    BeforeCreate,
    /// After a create is persisted.
    AfterCreate,
    /// Before an update is persisted.
    BeforeUpdate,
    /// After an update is persisted.
    AfterUpdate,
    /// Before a read or query executes.
    BeforeRead,
    /// After a read or query returns its results.
    AfterRead,
    /// Before a delete is persisted.
    BeforeDelete,
}

const MODEL_SHAPE: &[&str] = &["model", "request", "response", "options"];

impl LifecycleEvent {
    /// Every lifecycle event, in declaration order.
    pub const ALL: [LifecycleEvent; 10] = [
        Self::Configure,
        Self::Endpoint,
        Self::BeforeRequest,
        Self::BeforeCreate,
        Self::AfterCreate,
        Self::BeforeUpdate,
        Self::AfterUpdate,
        Self::BeforeRead,
        Self::AfterRead,
        Self::BeforeDelete,
    ];

    /// The canonical event name, e.g. `"beforeCreate"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Endpoint => "endpoint",
            Self::BeforeRequest => "beforeRequest",
            Self::BeforeCreate => "beforeCreate",
            Self::AfterCreate => "afterCreate",
            Self::BeforeUpdate => "beforeUpdate",
            Self::AfterUpdate => "afterUpdate",
            Self::BeforeRead => "beforeRead",
            Self::AfterRead => "afterRead",
            Self::BeforeDelete => "beforeDelete",
        }
    }

    /// Names of the positional arguments this event carries.
    pub const fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::Configure => &["options"],
            Self::Endpoint => &["endpoint", "options"],
            Self::BeforeRead => &["queryCriteria", "request", "response", "options"],
            Self::AfterRead => &["models", "request", "response", "options"],
            Self::BeforeRequest
            | Self::BeforeCreate
            | Self::AfterCreate
            | Self::BeforeUpdate
            | Self::AfterUpdate
            | Self::BeforeDelete => MODEL_SHAPE,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifecycleEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_owned()))
    }
}

bitflags! {
    /// The set of lifecycle events a mixin handles.
    ///
    /// A missing flag is the explicit "no handler" marker: the dispatcher
    /// never calls a handler whose flag is absent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Handles `configure`.
        const CONFIGURE = 1 << 0;
        /// Handles `endpoint`.
        const ENDPOINT = 1 << 1;
        /// Handles `beforeRequest`.
        const BEFORE_REQUEST = 1 << 2;
        /// Handles `beforeCreate`.
        const BEFORE_CREATE = 1 << 3;
        /// Handles `afterCreate`.
        const AFTER_CREATE = 1 << 4;
        /// Handles `beforeUpdate`.
        const BEFORE_UPDATE = 1 << 5;
        /// Handles `afterUpdate`.
        const AFTER_UPDATE = 1 << 6;
        /// Handles `beforeRead`.
        const BEFORE_READ = 1 << 7;
        /// Handles `afterRead`.
        const AFTER_READ = 1 << 8;
        /// Handles `beforeDelete`.
        const BEFORE_DELETE = 1 << 9;
    }
}

impl Capabilities {
    /// The flag of a single event.
    pub const fn of(event: LifecycleEvent) -> Self {
        match event {
            LifecycleEvent::Configure => Self::CONFIGURE,
            LifecycleEvent::Endpoint => Self::ENDPOINT,
            LifecycleEvent::BeforeRequest => Self::BEFORE_REQUEST,
            LifecycleEvent::BeforeCreate => Self::BEFORE_CREATE,
            LifecycleEvent::AfterCreate => Self::AFTER_CREATE,
            LifecycleEvent::BeforeUpdate => Self::BEFORE_UPDATE,
            LifecycleEvent::AfterUpdate => Self::AFTER_UPDATE,
            LifecycleEvent::BeforeRead => Self::BEFORE_READ,
            LifecycleEvent::AfterRead => Self::AFTER_READ,
            LifecycleEvent::BeforeDelete => Self::BEFORE_DELETE,
        }
    }

    /// Whether the set contains a handler for `event`.
    pub const fn handles(self, event: LifecycleEvent) -> bool {
        self.contains(Self::of(event))
    }

    /// The events in this set, in declaration order.
    pub fn events(self) -> impl Iterator<Item = LifecycleEvent> {
        LifecycleEvent::ALL
            .into_iter()
            .filter(move |event| self.handles(*event))
    }
}

impl From<LifecycleEvent> for Capabilities {
    fn from(event: LifecycleEvent) -> Self {
        Self::of(event)
    }
}

/// Expands a callback macro once with the handler table.
///
/// Each row reads `method, dyn_method, EventVariant, ArgsType;`. Call sites
/// must have `LifecycleEvent`, `Capabilities` and the argument structs they
/// touch in scope.
#[doc(hidden)]
#[macro_export]
macro_rules! __for_each_handler {
    ($callback:ident) => {
        $callback! {
            configure, configure_dyn, Configure, ConfigureArgs;
            endpoint, endpoint_dyn, Endpoint, EndpointArgs;
            before_request, before_request_dyn, BeforeRequest, ModelArgs;
            before_create, before_create_dyn, BeforeCreate, ModelArgs;
            after_create, after_create_dyn, AfterCreate, ModelArgs;
            before_update, before_update_dyn, BeforeUpdate, ModelArgs;
            after_update, after_update_dyn, AfterUpdate, ModelArgs;
            before_read, before_read_dyn, BeforeRead, QueryArgs;
            after_read, after_read_dyn, AfterRead, ResultsArgs;
            before_delete, before_delete_dyn, BeforeDelete, ModelArgs;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for event in LifecycleEvent::ALL {
            assert_eq!(event.name().parse::<LifecycleEvent>(), Ok(event));
            assert_eq!(event.to_string(), event.name());
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "beforeUpsert".parse::<LifecycleEvent>().unwrap_err();
        assert_eq!(err, UnknownEvent("beforeUpsert".into()));
        // Names are case sensitive.
        assert!("BeforeCreate".parse::<LifecycleEvent>().is_err());
    }

    #[test]
    fn test_argument_shapes() {
        assert_eq!(LifecycleEvent::Configure.arguments(), ["options"]);
        assert_eq!(
            LifecycleEvent::Endpoint.arguments(),
            ["endpoint", "options"]
        );
        assert_eq!(
            LifecycleEvent::BeforeRead.arguments()[0],
            "queryCriteria"
        );
        assert_eq!(LifecycleEvent::AfterRead.arguments()[0], "models");
        assert_eq!(
            LifecycleEvent::BeforeDelete.arguments(),
            ["model", "request", "response", "options"]
        );
    }

    #[test]
    fn test_capabilities_cover_every_event_once() {
        let all = Capabilities::all();
        assert_eq!(all.events().collect::<Vec<_>>(), LifecycleEvent::ALL);

        let mut seen = Capabilities::empty();
        for event in LifecycleEvent::ALL {
            let flag = Capabilities::from(event);
            assert_eq!(flag.bits().count_ones(), 1);
            assert!(!seen.intersects(flag), "{event} shares a flag");
            seen |= flag;
        }
        assert_eq!(seen, all);
    }

    #[test]
    fn test_capabilities_events_keep_declaration_order() {
        let caps = Capabilities::AFTER_READ | Capabilities::CONFIGURE | Capabilities::BEFORE_CREATE;
        assert_eq!(
            caps.events().collect::<Vec<_>>(),
            vec![
                LifecycleEvent::Configure,
                LifecycleEvent::BeforeCreate,
                LifecycleEvent::AfterRead,
            ]
        );
        assert!(caps.handles(LifecycleEvent::BeforeCreate));
        assert!(!caps.handles(LifecycleEvent::AfterCreate));
    }
}
