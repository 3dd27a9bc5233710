use axum::extract::Path;
use axum::http::request::Parts;
use axum::routing::get;
use error_page::prelude::*;
use serde_json::Value;

/// Treats any request with `authorization: Bearer demo` as logged in.
struct DemoBearer;

#[async_trait]
impl AuthStrategy for DemoBearer {
    async fn authenticate(&self, parts: &Parts) -> AuthResult {
        match parts.headers.get(axum::http::header::AUTHORIZATION) {
            Some(value) if value == "Bearer demo" => Ok(()),
            Some(_) => Err(AuthError::Invalid("unknown token".to_string())),
            None => Err(AuthError::Missing),
        }
    }
}

fn render_error(template: &str, context: &Value) -> RenderResult {
    if template != "error" {
        return Err(RenderError::TemplateNotFound(template.to_string()));
    }
    let text = |key: &str| context[key].as_str().unwrap_or_default().to_string();
    let session = match context.get("isAuthenticated").and_then(Value::as_bool) {
        Some(true) => "<p>You are logged in.</p>",
        Some(false) => "<p><a href=\"/login\">Log in</a></p>",
        None => "",
    };
    Ok(format!(
        "<!doctype html><html><head><title>{code} {title}</title></head>\
         <body><h1>{title}</h1><p>{message}</p>{session}</body></html>",
        code = context["code"],
        title = text("title"),
        message = text("message"),
    ))
}

async fn user(Path(id): Path<u32>) -> Result<String, HttpException> {
    match id {
        1 => Ok("Ada".to_string()),
        _ => Err(HttpException::new(StatusCode::NOT_FOUND)),
    }
}

async fn admin() -> Result<String, HttpException> {
    Err(HttpException::unauthorized("Bearer"))
}

async fn crash() -> Result<String, HttpException> {
    Err(HttpException::internal("database connection refused"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ConfigService::from_env();
    let options = ErrorPageOptions::from_config(&config).expect("Invalid error page configuration");

    let mut registry = PluginRegistry::new();
    registry
        .views(FnRenderer::new(render_error))
        .auth_strategy(DemoBearer);
    registry
        .register(ErrorPagePlugin::new(options))
        .expect("Failed to register error page plugin");

    let router = Router::new()
        .route("/users/{id}", get(user))
        .route("/admin", get(admin))
        .route("/crash", get(crash))
        .layer(registry.into_layer());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server running on http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await
        .unwrap();

    tracing::info!("Server stopped");
}
