mod view;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{Dataset, compare_spending, export_bytes, export_file_name, export_rows};

pub use view::{
    Bar, BarChartView, CustomersView, DashboardView, GaugeStep, GaugeView, Kpi,
    MISSING_NAME_BANNER, TableView, ViewError, build_customers, build_dashboard, build_table,
    select_customer,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
}

type SharedConfig = Arc<AppConfig>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SelectionQuery {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(config: AppConfig) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/customers", get(customers_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/table", get(table_handler))
        .route("/api/export", get(export_handler))
        .fallback(not_found_handler)
        .with_state(Arc::new(config))
}

pub async fn run_http_server(port: u16, config: AppConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(data = %config.data_path.display(), "serving customer dashboard");
    let app = router(config);

    let listener = TcpListener::bind(addr).await?;
    info!("dashboard listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn customers_handler(State(config): State<SharedConfig>) -> Response {
    let dataset = match load_dataset(&config) {
        Ok(dataset) => dataset,
        Err(response) => return response,
    };
    json_response(StatusCode::OK, build_customers(&dataset))
}

async fn dashboard_handler(
    State(config): State<SharedConfig>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let Some(name) = query.name else {
        return error_response(StatusCode::BAD_REQUEST, "name query parameter is required");
    };
    let dataset = match load_dataset(&config) {
        Ok(dataset) => dataset,
        Err(response) => return response,
    };

    match build_dashboard(&dataset, &name) {
        Ok(view) => {
            if view.rows_with_name > 1 {
                warn!(
                    name = %name,
                    rows = view.rows_with_name,
                    "duplicate customer name, showing first row"
                );
            }
            debug!(name = %name, "rendered dashboard");
            json_response(StatusCode::OK, view)
        }
        Err(err) => view_error_response(err),
    }
}

async fn table_handler(State(config): State<SharedConfig>) -> Response {
    let dataset = match load_dataset(&config) {
        Ok(dataset) => dataset,
        Err(response) => return response,
    };
    json_response(StatusCode::OK, build_table(&dataset))
}

async fn export_handler(
    State(config): State<SharedConfig>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let Some(name) = query.name else {
        return error_response(StatusCode::BAD_REQUEST, "name query parameter is required");
    };
    let dataset = match load_dataset(&config) {
        Ok(dataset) => dataset,
        Err(response) => return response,
    };
    let customer = match select_customer(&dataset, &name) {
        Ok(customer) => customer,
        Err(err) => return view_error_response(err),
    };

    let rows = export_rows(customer, &compare_spending(&dataset, customer));
    let body = match export_bytes(&rows) {
        Ok(body) => body,
        Err(err) => {
            warn!(error = %err, "export failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };
    let Ok(disposition) = HeaderValue::from_str(&content_disposition(&export_file_name(&name)))
    else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "invalid export file name");
    };

    let mut response = with_cache_control((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    ));
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);
    response
}

/// Reads and derives the whole table. Every request starts from the file.
fn load_dataset(config: &AppConfig) -> Result<Dataset, Response> {
    Dataset::load(&config.data_path).map_err(|err| {
        warn!(path = %config.data_path.display(), error = %err, "failed to load customer data");
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("failed to load customer data: {err}"),
        )
    })
}

fn view_error_response(err: ViewError) -> Response {
    match err {
        ViewError::NoNameColumn => error_response(StatusCode::CONFLICT, MISSING_NAME_BANNER),
        ViewError::UnknownCustomer(_) => error_response(StatusCode::NOT_FOUND, &err.to_string()),
    }
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"analysis.csv\"; filename*=UTF-8''{}",
        percent_encode(file_name)
    )
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
