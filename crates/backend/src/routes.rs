use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::app_state::AppState;
use crate::system::middleware::request_logger::request_logger;

/// Open CORS: the frontend is served from another port.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

/// All application routes.
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Categories (read-only)
        .route("/api/categorias/", get(handlers::a001_category::list))
        .route("/api/categorias/:id/", get(handlers::a001_category::get_by_id))
        // A002 Suppliers
        .route(
            "/api/proveedores/",
            get(handlers::a002_supplier::list).post(handlers::a002_supplier::create),
        )
        .route(
            "/api/proveedores/:id/",
            get(handlers::a002_supplier::get_by_id)
                .put(handlers::a002_supplier::update)
                .delete(handlers::a002_supplier::delete),
        )
        // A003 Products
        .route(
            "/api/productos/",
            get(handlers::a003_product::list).post(handlers::a003_product::create),
        )
        .route(
            "/api/productos/por_categoria/",
            get(handlers::a003_product::by_category),
        )
        .route(
            "/api/productos/bajo_stock/",
            get(handlers::a003_product::low_stock),
        )
        .route(
            "/api/productos/:id/",
            get(handlers::a003_product::get_by_id).put(handlers::a003_product::update),
        )
        .route(
            "/api/productos/:id/eliminar/",
            post(handlers::a003_product::deactivate),
        )
        .route(
            "/api/productos/:id/activar/",
            post(handlers::a003_product::activate),
        )
        .with_state(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::service as categories;
    use crate::shared::config::ApiConfig;
    use crate::shared::data::db;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app(page_size: u64) -> Router {
        let conn = db::memory().await;
        categories::seed(&conn).await.unwrap();
        configure_routes(AppState {
            db: conn,
            api: ApiConfig {
                page_size,
                ..ApiConfig::default()
            },
        })
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn supplier(email: &str) -> Value {
        json!({
            "nombre": "Droguería Central", "telefono": "3001234567",
            "email": email, "direccion": "Cra 7 # 12-34"
        })
    }

    fn product(code: &str, supplier: i64, category: i64) -> Value {
        json!({
            "codigo": code, "nombre": "Ibuprofeno 400mg", "descripcion": "Caja x 10",
            "cantidad": 4, "precio_unidad": "1500.00",
            "proveedor": supplier, "categoria": category
        })
    }

    async fn first_category(app: &Router) -> i64 {
        let (status, body) = call(app, Method::GET, "/api/categorias/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 6);
        body["results"][0]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_and_paths_need_trailing_slash() {
        let app = app(20).await;
        assert_eq!(call(&app, Method::GET, "/health", None).await.0, StatusCode::OK);
        assert_eq!(call(&app, Method::GET, "/api/productos/", None).await.0, StatusCode::OK);
        assert_eq!(
            call(&app, Method::GET, "/api/productos", None).await.0,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_validation_errors_are_field_keyed() {
        let app = app(20).await;
        let (status, body) = call(&app, Method::POST, "/api/proveedores/", Some(supplier("no-es-email"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = body["email"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_string());
        assert!(body.get("nombre").is_none());
    }

    #[tokio::test]
    async fn test_product_and_supplier_lifecycle() {
        let app = app(20).await;
        let category = first_category(&app).await;

        let (status, created) = call(&app, Method::POST, "/api/proveedores/", Some(supplier("a@b.co"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let supplier_id = created["id"].as_i64().unwrap();

        let (status, created) =
            call(&app, Method::POST, "/api/productos/", Some(product("MED-1", supplier_id, category))).await;
        assert_eq!(status, StatusCode::CREATED);
        let product_id = created["id"].as_i64().unwrap();

        let (status, body) = call(&app, Method::DELETE, &format!("/api/proveedores/{}/", supplier_id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, body) =
            call(&app, Method::POST, &format!("/api/productos/{}/eliminar/", product_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mensaje"], "Producto Ibuprofeno 400mg desactivado correctamente.");

        let (_, listed) = call(&app, Method::GET, "/api/productos/", None).await;
        assert_eq!(listed["count"], 0);
        let (_, listed) = call(&app, Method::GET, "/api/productos/?mostrar_inactivos=true", None).await;
        assert_eq!(listed["count"], 1);

        let (status, body) =
            call(&app, Method::POST, &format!("/api/productos/{}/activar/", product_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mensaje"], "Producto Ibuprofeno 400mg activado correctamente.");

        let (status, other) = call(&app, Method::POST, "/api/proveedores/", Some(supplier("c@d.co"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) =
            call(&app, Method::DELETE, &format!("/api/proveedores/{}/", other["id"]), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_zero_page_size_returns_bare_lists() {
        let app = app(0).await;
        let category = first_category_bare(&app).await;
        let (_, created) = call(&app, Method::POST, "/api/proveedores/", Some(supplier("a@b.co"))).await;
        let supplier_id = created["id"].as_i64().unwrap();
        call(&app, Method::POST, "/api/productos/", Some(product("MED-1", supplier_id, category))).await;

        let (status, body) = call(&app, Method::GET, "/api/productos/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (_, body) = call(&app, Method::GET, "/api/productos/bajo_stock/", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        let (status, body) = call(&app, Method::GET, "/api/productos/por_categoria/", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    async fn first_category_bare(app: &Router) -> i64 {
        let (_, body) = call(app, Method::GET, "/api/categorias/", None).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 6);
        list[0]["id"].as_i64().unwrap()
    }
}
