use crate::error::{ErrorPageError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Thread-safe registry of the capabilities plugins depend on.
///
/// Capabilities are stored as `Arc<T>` keyed by `T`, so trait objects are
/// provided and resolved as e.g. `dyn ViewRenderer`. The host provides them
/// once at startup; plugins resolve them while they register.
#[derive(Default)]
pub struct Container {
    services: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide<T: ?Sized + Send + Sync + 'static>(&mut self, service: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), Arc::new(service));
        self
    }

    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let type_name = std::any::type_name::<T>;
        let entry = self.services.get(&TypeId::of::<T>()).ok_or_else(|| {
            ErrorPageError::DependencyNotFound {
                type_name: type_name().to_string(),
            }
        })?;

        // Each entry is an Arc<dyn Any> wrapping the Arc<T>.
        let wrapper = entry.value().clone().downcast::<Arc<T>>().map_err(|_| {
            ErrorPageError::DowncastFailed {
                type_name: format!("Arc<{}>", type_name()),
            }
        })?;
        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_provide_and_resolve() {
        let mut container = Container::new();
        container.provide(Arc::new(42_u32));
        assert_eq!(*container.resolve::<u32>().unwrap(), 42);
    }

    #[test]
    fn test_provide_and_resolve_trait_object() {
        let mut container = Container::new();
        let greeter: Arc<dyn Greeter> = Arc::new(English);
        container.provide(greeter);

        assert!(container.contains::<dyn Greeter>());
        assert_eq!(container.resolve::<dyn Greeter>().unwrap().greet(), "hello");
    }

    #[test]
    fn test_resolve_missing() {
        let container = Container::new();
        assert!(!container.contains::<dyn Greeter>());
        let err = container.resolve::<dyn Greeter>().err().unwrap();
        assert!(matches!(err, ErrorPageError::DependencyNotFound { .. }));
    }
}
