// Process-wide service registry keyed by type

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Holds at most one instance per type.
#[derive(Clone, Default)]
pub struct Registry {
    instances: Arc<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process. Never torn down.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register an instance, replacing any previous one of the same type
    pub fn register<T: Any + Send + Sync>(&self, instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        self.instances.write().insert(TypeId::of::<T>(), instance);

        debug!(instance = type_name, "Instance registered");
    }

    /// Resolve an instance by type
    pub fn resolve<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        trace!(instance = type_name, "Resolving instance");

        self.instances
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|any| any.clone().downcast::<T>().ok())
    }

    /// Resolve an instance, creating and registering it on first access.
    ///
    /// `init` runs at most once per type while the write lock is held.
    pub fn get_or_init<T, F>(&self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.resolve::<T>() {
            return existing;
        }

        let mut instances = self.instances.write();
        if let Some(existing) = instances
            .get(&TypeId::of::<T>())
            .and_then(|any| any.clone().downcast::<T>().ok())
        {
            return existing;
        }

        let type_name = std::any::type_name::<T>();
        debug!(instance = type_name, "Initializing instance on first access");

        let instance = Arc::new(init());
        instances.insert(TypeId::of::<T>(), instance.clone());
        instance
    }

    /// Check if an instance is registered
    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.instances.read().contains_key(&TypeId::of::<T>())
    }
}
