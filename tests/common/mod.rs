#![allow(dead_code)]
//! In-process table server for integration tests.
//!
//! Speaks the same REST protocol as the real store and keeps tables in
//! memory. Counters and switches let tests observe what the client sent and
//! force failure responses.

use actix_web::{
    dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer,
};
use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use table_link::{LinkTimeouts, TableClient};

type JsonRow = Map<String, JsonValue>;

struct FakeTable {
    columns: Vec<ColumnBody>,
    rows: Vec<JsonRow>,
}

/// Shared server state, inspectable from tests.
#[derive(Default)]
pub struct FakeState {
    tables: Mutex<HashMap<String, FakeTable>>,
    requests: AtomicUsize,
    create_requests: AtomicUsize,
    select_requests: AtomicUsize,
    select_queries: Mutex<Vec<String>>,
    /// When set, selects answer 404 even for existing tables
    hide_tables: AtomicBool,
    forced_failure: Mutex<Option<(u16, String)>>,
}

impl FakeState {
    /// Answer every following request with `status` and `body`.
    pub fn fail_with(&self, status: u16, body: &str) {
        *self.forced_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn hide_tables_from_selects(&self) {
        self.hide_tables.store(true, Ordering::SeqCst);
    }

    /// Requests received on any route.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn create_requests(&self) -> usize {
        self.create_requests.load(Ordering::SeqCst)
    }

    pub fn select_requests(&self) -> usize {
        self.select_requests.load(Ordering::SeqCst)
    }

    /// Raw query string of the most recent select.
    pub fn last_select_query(&self) -> Option<String> {
        self.select_queries.lock().unwrap().last().cloned()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    fn forced(&self) -> Option<HttpResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let forced = self.forced_failure.lock().unwrap();
        forced.as_ref().map(|(status, body)| {
            HttpResponse::build(StatusCode::from_u16(*status).unwrap()).body(body.clone())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ColumnBody {
    name: String,
    #[serde(rename = "dataType")]
    data_type: String,
}

#[derive(Debug, Deserialize)]
struct CreateTableBody {
    name: String,
    columns: Vec<ColumnBody>,
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    #[serde(rename = "where", default)]
    conditions: JsonRow,
    #[serde(default)]
    updates: JsonRow,
}

fn text_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(format!("{}\n", message))
}

fn type_matches(value: &JsonValue, data_type: &str) -> bool {
    match data_type {
        "string" | "timestamp" => value.is_string(),
        "int" => value.is_i64() || value.is_u64(),
        "bool" => value.is_boolean(),
        "float" => value.is_number(),
        _ => false,
    }
}

fn matches(row: &JsonRow, conditions: &JsonRow) -> bool {
    conditions
        .iter()
        .all(|(column, expected)| row.get(column) == Some(expected))
}

fn parse_where(query: &HashMap<String, String>) -> Result<JsonRow, HttpResponse> {
    match query.get("where").map(String::as_str) {
        None | Some("") => Ok(JsonRow::new()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| text_error(StatusCode::BAD_REQUEST, "Invalid where clause")),
    }
}

async fn create_table(state: web::Data<FakeState>, body: web::Json<CreateTableBody>) -> HttpResponse {
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.create_requests.fetch_add(1, Ordering::SeqCst);

    let body = body.into_inner();
    let mut tables = state.tables.lock().unwrap();
    if tables.contains_key(&body.name) {
        return text_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("table {} already exists", body.name),
        );
    }
    tables.insert(
        body.name,
        FakeTable {
            columns: body.columns,
            rows: Vec::new(),
        },
    );
    HttpResponse::Created().finish()
}

async fn insert_row(
    state: web::Data<FakeState>,
    name: web::Path<String>,
    row: web::Json<JsonRow>,
) -> HttpResponse {
    if let Some(forced) = state.forced() {
        return forced;
    }

    let mut tables = state.tables.lock().unwrap();
    let Some(table) = tables.get_mut(name.as_str()) else {
        return text_error(StatusCode::NOT_FOUND, &format!("table {} not found", name));
    };

    let row = row.into_inner();
    for column in &table.columns {
        match row.get(&column.name) {
            None => {
                return text_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("missing value for column {}", column.name),
                )
            }
            Some(value) if !type_matches(value, &column.data_type) => {
                return text_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("invalid data type for column {}", column.name),
                )
            }
            Some(_) => {}
        }
    }

    table.rows.push(row);
    HttpResponse::Created().finish()
}

async fn select_rows(
    state: web::Data<FakeState>,
    req: HttpRequest,
    name: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if let Some(forced) = state.forced() {
        return forced;
    }
    state.select_requests.fetch_add(1, Ordering::SeqCst);
    state
        .select_queries
        .lock()
        .unwrap()
        .push(req.query_string().to_string());

    let tables = state.tables.lock().unwrap();
    let table = match tables.get(name.as_str()) {
        Some(table) if !state.hide_tables.load(Ordering::SeqCst) => table,
        _ => return text_error(StatusCode::NOT_FOUND, &format!("table {} not found", name)),
    };

    let conditions = match parse_where(&query) {
        Ok(conditions) => conditions,
        Err(response) => return response,
    };

    let rows: Vec<&JsonRow> = table.rows.iter().filter(|r| matches(r, &conditions)).collect();
    HttpResponse::Ok().json(rows)
}

async fn update_rows(
    state: web::Data<FakeState>,
    name: web::Path<String>,
    body: web::Json<UpdateBody>,
) -> HttpResponse {
    if let Some(forced) = state.forced() {
        return forced;
    }

    let mut tables = state.tables.lock().unwrap();
    let Some(table) = tables.get_mut(name.as_str()) else {
        return text_error(StatusCode::NOT_FOUND, &format!("table {} not found", name));
    };

    let body = body.into_inner();
    for (column, value) in &body.updates {
        match table.columns.iter().find(|c| &c.name == column) {
            None => {
                return text_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("column {} does not exist", column),
                )
            }
            Some(c) if !type_matches(value, &c.data_type) => {
                return text_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("invalid data type for column {}", column),
                )
            }
            Some(_) => {}
        }
    }

    let mut updated = 0;
    for row in table.rows.iter_mut().filter(|r| matches(r, &body.conditions)) {
        for (column, value) in &body.updates {
            row.insert(column.clone(), value.clone());
        }
        updated += 1;
    }
    HttpResponse::Ok().json(json!({ "updated": updated }))
}

async fn delete_rows(
    state: web::Data<FakeState>,
    name: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if let Some(forced) = state.forced() {
        return forced;
    }

    let mut tables = state.tables.lock().unwrap();
    let Some(table) = tables.get_mut(name.as_str()) else {
        return text_error(StatusCode::NOT_FOUND, &format!("table {} not found", name));
    };

    let conditions = match parse_where(&query) {
        Ok(conditions) => conditions,
        Err(response) => return response,
    };

    let before = table.rows.len();
    table.rows.retain(|r| !matches(r, &conditions));
    HttpResponse::Ok().json(json!({ "deleted": before - table.rows.len() }))
}

/// A fake table server bound to an ephemeral localhost port.
pub struct TestServer {
    pub base_url: String,
    pub state: web::Data<FakeState>,
    handle: ServerHandle,
}

impl TestServer {
    /// Start the server. Must run inside an actix runtime (`#[actix_web::test]`).
    pub async fn start() -> Self {
        init_logging();

        let state = web::Data::new(FakeState::default());
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/tables", web::post().to(create_table))
                .service(
                    web::resource("/tables/{name}/rows")
                        .route(web::post().to(insert_row))
                        .route(web::get().to(select_rows))
                        .route(web::put().to(update_rows))
                        .route(web::delete().to(delete_rows)),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind fake table server");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        TestServer {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn client(&self) -> TableClient {
        TableClient::builder()
            .base_url(&self.base_url)
            .timeouts(LinkTimeouts::fast())
            .build()
            .expect("Failed to build client")
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// URL of a localhost port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let port = listener.local_addr().expect("probe port addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
