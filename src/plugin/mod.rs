use crate::auth::{AuthInterceptor, AuthStrategy};
use crate::di::Container;
use crate::error::{ErrorPageError, Result};
use crate::interceptor::{Interceptor, SharedInterceptorLayer};
use crate::view::ViewRenderer;
use std::sync::Arc;

/// Trait for server plugins
///
/// A plugin checks its dependencies against the registry's container and
/// installs its hooks. Registration happens once, at startup; any error
/// returned here is a configuration error and should stop the server.
///
/// # Example
/// ```
/// use error_page::plugin::{Plugin, PluginRegistry};
/// use error_page::Result;
///
/// struct Noop;
///
/// impl Plugin for Noop {
///     const NAME: &'static str = "noop";
///
///     fn register(self, _registry: &mut PluginRegistry) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin {
    const NAME: &'static str;

    fn register(self, registry: &mut PluginRegistry) -> Result<()>;
}

/// Collects capabilities and pre-response hooks, then builds the layer
/// that runs them.
#[derive(Default)]
pub struct PluginRegistry {
    container: Container,
    auth: Option<Box<dyn Interceptor>>,
    pre_response: Vec<Box<dyn Interceptor>>,
    plugins: Vec<&'static str>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Register the template rendering capability.
    pub fn views<R: ViewRenderer>(&mut self, renderer: R) -> &mut Self {
        let views: Arc<dyn ViewRenderer> = Arc::new(renderer);
        self.container.provide(views);
        self
    }

    /// Install the authentication strategy. It always runs before any
    /// pre-response hook so they can read the request's `Authentication`.
    pub fn auth_strategy<A: AuthStrategy>(&mut self, strategy: A) -> &mut Self {
        self.auth = Some(Box::new(AuthInterceptor::new(strategy)));
        self
    }

    /// Add a hook that sees every response before it is sent.
    pub fn ext_pre_response<I: Interceptor>(&mut self, interceptor: I) -> &mut Self {
        self.pre_response.push(Box::new(interceptor));
        self
    }

    pub fn register<P: Plugin>(&mut self, plugin: P) -> Result<&mut Self> {
        if self.is_registered(P::NAME) {
            return Err(ErrorPageError::DuplicatePlugin { plugin: P::NAME });
        }
        plugin.register(self)?;
        self.plugins.push(P::NAME);
        tracing::info!(plugin = P::NAME, "Plugin registered");
        Ok(self)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| *plugin == name)
    }

    /// Build the tower layer running the auth strategy, then the hooks in
    /// registration order.
    pub fn into_layer(self) -> SharedInterceptorLayer {
        let interceptors = self.auth.into_iter().chain(self.pre_response).collect();
        SharedInterceptorLayer::new(interceptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::FnRenderer;

    struct Counter;

    impl Plugin for Counter {
        const NAME: &'static str = "counter";

        fn register(self, registry: &mut PluginRegistry) -> Result<()> {
            registry.container.provide(Arc::new(7_u32));
            Ok(())
        }
    }

    #[test]
    fn test_register_plugin_once() {
        let mut registry = PluginRegistry::new();
        registry.register(Counter).unwrap();
        assert!(registry.is_registered("counter"));
        assert_eq!(*registry.container().resolve::<u32>().unwrap(), 7);

        let err = registry.register(Counter).err().unwrap();
        assert!(matches!(err, ErrorPageError::DuplicatePlugin { plugin: "counter" }));
    }

    #[test]
    fn test_views_are_resolvable() {
        let mut registry = PluginRegistry::new();
        registry.views(FnRenderer::new(|_, _| Ok(String::new())));
        assert!(registry.container().contains::<dyn ViewRenderer>());
        assert!(registry.container().resolve::<dyn ViewRenderer>().is_ok());
    }

    #[test]
    fn test_layer_holds_auth_and_hooks() {
        struct Anyone;

        #[async_trait::async_trait]
        impl AuthStrategy for Anyone {
            async fn authenticate(
                &self,
                _parts: &axum::http::request::Parts,
            ) -> crate::auth::AuthResult {
                Ok(())
            }
        }

        assert!(PluginRegistry::new().into_layer().is_empty());

        let mut registry = PluginRegistry::new();
        registry.views(FnRenderer::new(|_, _| Ok(String::new())));
        registry
            .register(crate::error_page::ErrorPagePlugin::default())
            .unwrap();
        registry.auth_strategy(Anyone);
        assert_eq!(registry.into_layer().len(), 2);
    }
}
