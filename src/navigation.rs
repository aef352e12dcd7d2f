//! Named views and the navigator that switches between them.
//!
//! The registry owns the fixed set of views the application can show, keyed by a
//! string identifier and kept in registration order. The navigator tracks which
//! of them is active and notifies subscribers whenever the active view changes.

use crate::error::NavigationError;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// Identifier of the view shown at start-up.
pub const DEFAULT_VIEW: &str = "startup";

/// What a view displays. Only the renderer looks at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Landing page with the content type choice
    Startup,
    /// Search form
    Search,
    /// Download options form
    Options,
    /// Settings placeholder
    Settings,
}

/// A named, displayable unit of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Unique identifier within a registry.
    pub id: String,
    /// Label shown in the navigation toolbar.
    pub title: String,
    /// Content tag interpreted by the renderer.
    pub kind: ViewKind,
}

impl View {
    pub fn new(id: &str, title: &str, kind: ViewKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
        }
    }
}

/// Ordered mapping from view identifier to view.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: Vec<View>,
    index: HashMap<String, usize>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with the application's four views.
    pub fn standard() -> Result<Self, NavigationError> {
        let mut registry = Self::new();
        registry.register(View::new("startup", "Home", ViewKind::Startup))?;
        registry.register(View::new("search", "Search", ViewKind::Search))?;
        registry.register(View::new("options", "Download Options", ViewKind::Options))?;
        registry.register(View::new("settings", "Settings", ViewKind::Settings))?;
        Ok(registry)
    }

    /// Register a view.
    ///
    /// Fails with [`NavigationError::DuplicateView`] if the identifier is taken, in
    /// which case the registry is left untouched.
    pub fn register(&mut self, view: View) -> Result<(), NavigationError> {
        if self.index.contains_key(&view.id) {
            return Err(NavigationError::DuplicateView(view.id));
        }
        self.index.insert(view.id.clone(), self.views.len());
        self.views.push(view);
        Ok(())
    }

    /// Look up a view by identifier.
    pub fn get(&self, id: &str) -> Result<&View, NavigationError> {
        self.index
            .get(id)
            .map(|&i| &self.views[i])
            .ok_or_else(|| NavigationError::UnknownView(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of a view in registration order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Registered identifiers in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.views.iter().map(|v| v.id.as_str()).collect()
    }

    /// Iterate over views in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Handle returned by [`ViewNavigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&str)>;

/// Tracks the active view and switches between registered views.
pub struct ViewNavigator {
    registry: ViewRegistry,
    active: String,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for ViewNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNavigator")
            .field("registry", &self.registry)
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ViewNavigator {
    /// Create a navigator starting at `default_id`, which must be registered.
    pub fn new(registry: ViewRegistry, default_id: &str) -> Result<Self, NavigationError> {
        registry.get(default_id)?;
        Ok(Self {
            registry,
            active: default_id.to_string(),
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Make `id` the active view and notify subscribers.
    ///
    /// An unknown identifier leaves the active view unchanged.
    pub fn switch_to(&mut self, id: &str) -> Result<(), NavigationError> {
        if !self.registry.contains(id) {
            warn!("Ignoring switch to unknown view '{}'", id);
            return Err(NavigationError::UnknownView(id.to_string()));
        }

        debug!("Switching view: {} -> {}", self.active, id);
        self.active = id.to_string();

        for (_, observer) in self.observers.iter_mut() {
            observer(id);
        }
        Ok(())
    }

    /// Identifier of the active view.
    pub fn current(&self) -> &str {
        &self.active
    }

    /// The active view itself.
    pub fn current_view(&self) -> &View {
        // The active id is validated on every write.
        &self.registry.views[self.registry.index[&self.active]]
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Switch to the view registered after the active one, wrapping around.
    pub fn next(&mut self) -> Result<(), NavigationError> {
        let len = self.registry.len();
        let pos = self.registry.position(&self.active).unwrap_or(0);
        let id = self.registry.views[(pos + 1) % len].id.clone();
        self.switch_to(&id)
    }

    /// Switch to the view registered before the active one, wrapping around.
    pub fn previous(&mut self) -> Result<(), NavigationError> {
        let len = self.registry.len();
        let pos = self.registry.position(&self.active).unwrap_or(0);
        let id = self.registry.views[(pos + len - 1) % len].id.clone();
        self.switch_to(&id)
    }

    /// Register a callback invoked with the new identifier after every successful switch.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&str) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }
}
