#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use recruitment_console::config::Config;
use recruitment_console::Console;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// In-memory stand-in for the recruitment REST backend.
#[derive(Default)]
pub struct FakeDb {
    pub candidates: Vec<Value>,
    pub interviewers: Vec<Value>,
    pub interviews: Vec<Value>,
    pub assessments: Vec<Value>,
    pub requests: Vec<String>,
    pub uploads: Vec<Upload>,
    pub fail_status_updates: bool,
    next_id: u64,
}

impl FakeDb {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    pub fn seed_candidate(&mut self, name: &str, technology: &str, status: &str) -> String {
        let id = self.next_id("cand");
        self.candidates.push(json!({
            "_id": id,
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            "phone": "+1 555 0100",
            "technology": technology,
            "level": "Mid",
            "salaryExpectation": 50000,
            "experience": 3,
            "references": "Former lead",
            "cvFileUrl": null,
            "interviewStatus": status,
            "createdAt": "2025-01-10T09:00:00Z"
        }));
        id
    }

    pub fn seed_interviewer(&mut self, name: &str) -> String {
        let id = self.next_id("iv");
        self.interviewers.push(json!({
            "_id": id,
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "createdAt": "2025-01-01T00:00:00Z"
        }));
        id
    }

    pub fn seed_assessment(&mut self, candidate_id: &str, completed: bool) -> String {
        let id = self.next_id("as");
        self.assessments.push(json!({
            "_id": id,
            "candidateId": candidate_id,
            "assessmentType": "Technical",
            "evaluation": "Good",
            "remarks": "",
            "testFile": "public\\uploads\\task.pdf",
            "isCompleted": completed
        }));
        id
    }

    pub fn status_of(&self, candidate_id: &str) -> Option<String> {
        find(&self.candidates, candidate_id)
            .and_then(|c| c["interviewStatus"].as_str())
            .map(str::to_string)
    }

    pub fn interviews_for(&self, candidate_id: &str) -> Vec<Value> {
        self.interviews
            .iter()
            .filter(|i| i["candidate"] == candidate_id)
            .cloned()
            .collect()
    }

    pub fn assessments_for(&self, candidate_id: &str) -> Vec<Value> {
        self.assessments
            .iter()
            .filter(|a| a["candidateId"] == candidate_id)
            .cloned()
            .collect()
    }
}

pub type Db = Arc<Mutex<FakeDb>>;

pub struct FakeBackend {
    pub url: String,
    pub db: Db,
}

impl FakeBackend {
    pub fn console(&self) -> Console {
        let config = Config::new(&self.url)
            .expect("config")
            .with_timeout(Duration::from_secs(5));
        Console::new(&config).expect("console")
    }

    pub fn requests(&self) -> Vec<String> {
        self.db.lock().unwrap().requests.clone()
    }
}

pub async fn spawn_backend() -> FakeBackend {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let db: Db = Arc::new(Mutex::new(FakeDb::default()));

    let app = Router::new()
        .route("/candidates", get(list_candidates).post(create_candidate))
        .route(
            "/candidates/:id",
            get(get_candidate).put(update_candidate).delete(delete_candidate),
        )
        .route("/interviewer", get(list_interviewers).post(create_interviewer))
        .route(
            "/interviewer/:id",
            get(get_interviewer)
                .put(update_interviewer)
                .delete(delete_interviewer),
        )
        .route("/interviews/schedule", post(schedule_interview))
        .route("/interviews/candidate/:id", get(list_candidate_interviews))
        .route("/assessments", post(create_assessment))
        .route("/assessments/candidate/:id", get(list_candidate_assessments))
        .route("/assessments/:id", delete(delete_assessment))
        .with_state(db.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    FakeBackend {
        url: format!("http://{addr}"),
        db,
    }
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

fn find<'a>(items: &'a [Value], id: &str) -> Option<&'a Value> {
    items.iter().find(|item| item["_id"] == id)
}

fn find_mut<'a>(items: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    items.iter_mut().find(|item| item["_id"] == id)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn log(db: &Db, line: String) {
    db.lock().unwrap().requests.push(line);
}

async fn read_multipart(mut multipart: Multipart) -> (HashMap<String, String>, Vec<Upload>) {
    let mut fields = HashMap::new();
    let mut uploads = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
                uploads.push(Upload {
                    field: name,
                    file_name,
                    content_type,
                    size,
                });
            }
            None => {
                let text = field.text().await.unwrap_or_default();
                fields.insert(name, text);
            }
        }
    }
    (fields, uploads)
}

fn apply_candidate_fields(target: &mut Map<String, Value>, fields: &Map<String, Value>) {
    for (key, value) in fields {
        let value = match (key.as_str(), value) {
            ("salaryExpectation" | "experience", Value::String(raw)) => raw
                .parse::<f64>()
                .map(|n| json!(n))
                .unwrap_or(Value::Null),
            _ => value.clone(),
        };
        target.insert(key.clone(), value);
    }
}

async fn list_candidates(State(db): State<Db>, Query(params): Query<HashMap<String, String>>) -> Response {
    let search = params.get("search").map(|s| s.to_lowercase());
    log(&db, format!("GET /candidates search={search:?}"));
    let db = db.lock().unwrap();
    let candidates: Vec<Value> = db
        .candidates
        .iter()
        .filter(|c| match &search {
            Some(q) => ["name", "technology"].iter().any(|key| {
                c[*key]
                    .as_str()
                    .is_some_and(|v| v.to_lowercase().contains(q.as_str()))
            }),
            None => true,
        })
        .cloned()
        .collect();
    Json(json!({ "candidates": candidates })).into_response()
}

async fn create_candidate(State(db): State<Db>, multipart: Multipart) -> Response {
    log(&db, "POST /candidates".into());
    let (fields, uploads) = read_multipart(multipart).await;
    let mut db = db.lock().unwrap();

    let email = fields.get("email").cloned().unwrap_or_default();
    if db.candidates.iter().any(|c| c["email"] == email.as_str()) {
        return message(StatusCode::BAD_REQUEST, "Candidate with this email already exists");
    }
    let Some(cv) = uploads.iter().find(|u| u.field == "cvFile").cloned() else {
        return message(StatusCode::BAD_REQUEST, "CV file is required");
    };

    let id = db.next_id("cand");
    let mut candidate = Map::new();
    candidate.insert("_id".into(), json!(id));
    let as_values: Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    apply_candidate_fields(&mut candidate, &as_values);
    candidate.insert(
        "cvFileUrl".into(),
        json!(format!("public\\uploads\\{}", cv.file_name)),
    );
    let candidate = Value::Object(candidate);
    db.candidates.push(candidate.clone());
    db.uploads.extend(uploads);

    (
        StatusCode::CREATED,
        Json(json!({ "message": "Candidate created", "candidate": candidate })),
    )
        .into_response()
}

async fn get_candidate(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("GET /candidates/{id}"));
    let db = db.lock().unwrap();
    let Some(candidate) = find(&db.candidates, &id) else {
        return message(StatusCode::NOT_FOUND, "Candidate not found");
    };
    let mut candidate = candidate.clone();
    candidate["interviewSchedules"] = json!(db.interviews_for(&id));
    candidate["assessments"] = json!(db.assessments_for(&id));
    Json(candidate).into_response()
}

async fn update_candidate(State(db): State<Db>, Path(id): Path<String>, request: Request) -> Response {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/"));
    log(
        &db,
        format!("PUT /candidates/{id} {}", if is_multipart { "multipart" } else { "json" }),
    );

    let (fields, uploads) = if is_multipart {
        let Ok(multipart) = Multipart::from_request(request, &()).await else {
            return message(StatusCode::BAD_REQUEST, "Malformed form");
        };
        let (fields, uploads) = read_multipart(multipart).await;
        let fields: Map<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        (fields, uploads)
    } else {
        let Ok(Json(Value::Object(fields))) = Json::<Value>::from_request(request, &()).await else {
            return message(StatusCode::BAD_REQUEST, "Malformed body");
        };
        (fields, Vec::new())
    };

    let mut db = db.lock().unwrap();
    if db.fail_status_updates && fields.contains_key("interviewStatus") {
        // No body at all: the client has to fall back to its generic text.
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Some(Value::Object(candidate)) = find_mut(&mut db.candidates, &id) else {
        return message(StatusCode::NOT_FOUND, "Candidate not found");
    };
    apply_candidate_fields(candidate, &fields);
    if let Some(cv) = uploads.iter().find(|u| u.field == "cvFile") {
        candidate.insert(
            "cvFileUrl".into(),
            json!(format!("public\\uploads\\{}", cv.file_name)),
        );
    }
    db.uploads.extend(uploads);
    Json(json!({ "message": "Candidate updated" })).into_response()
}

async fn delete_candidate(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("DELETE /candidates/{id}"));
    let mut db = db.lock().unwrap();
    let before = db.candidates.len();
    db.candidates.retain(|c| c["_id"] != id.as_str());
    if db.candidates.len() == before {
        return message(StatusCode::NOT_FOUND, "Candidate not found");
    }
    Json(json!({ "message": "Candidate deleted" })).into_response()
}

async fn list_interviewers(State(db): State<Db>) -> Response {
    log(&db, "GET /interviewer".into());
    let db = db.lock().unwrap();
    Json(json!({
        "interviewers": db.interviewers,
        "total": db.interviewers.len()
    }))
    .into_response()
}

async fn create_interviewer(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    log(&db, "POST /interviewer".into());
    let mut db = db.lock().unwrap();
    let id = db.next_id("iv");
    let interviewer = json!({
        "_id": id,
        "name": body["name"],
        "email": body["email"],
        "createdAt": "2025-02-01T00:00:00Z"
    });
    db.interviewers.push(interviewer.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Interviewer created", "interviewer": interviewer })),
    )
        .into_response()
}

async fn get_interviewer(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("GET /interviewer/{id}"));
    let db = db.lock().unwrap();
    match find(&db.interviewers, &id) {
        Some(interviewer) => Json(interviewer.clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "Interviewer not found"),
    }
}

async fn update_interviewer(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    log(&db, format!("PUT /interviewer/{id}"));
    let mut db = db.lock().unwrap();
    let Some(interviewer) = find_mut(&mut db.interviewers, &id) else {
        return message(StatusCode::NOT_FOUND, "Interviewer not found");
    };
    interviewer["name"] = body["name"].clone();
    interviewer["email"] = body["email"].clone();
    Json(json!({ "message": "Interviewer updated" })).into_response()
}

async fn delete_interviewer(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("DELETE /interviewer/{id}"));
    let mut db = db.lock().unwrap();
    db.interviewers.retain(|i| i["_id"] != id.as_str());
    Json(json!({ "message": "Interviewer deleted" })).into_response()
}

async fn schedule_interview(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    log(&db, "POST /interviews/schedule".into());
    let mut db = db.lock().unwrap();
    let candidate_id = body["candidateId"].as_str().unwrap_or_default().to_string();
    let interviewer_id = body["interviewerId"].as_str().unwrap_or_default().to_string();
    if find(&db.candidates, &candidate_id).is_none() {
        return message(StatusCode::NOT_FOUND, "Candidate not found");
    }
    if find(&db.interviewers, &interviewer_id).is_none() {
        return message(StatusCode::BAD_REQUEST, "Interviewer not found");
    }

    let id = db.next_id("int");
    let interview = json!({
        "_id": id,
        "candidate": candidate_id,
        "interviewer": interviewer_id,
        "stage": body["stage"],
        "interviewDate": body["interviewDate"],
        "interviewTime": body["interviewTime"],
        "reminderSent": false
    });
    db.interviews.push(interview.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Interview scheduled", "interview": interview })),
    )
        .into_response()
}

async fn list_candidate_interviews(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("GET /interviews/candidate/{id}"));
    let db = db.lock().unwrap();
    let interviews: Vec<Value> = db
        .interviews_for(&id)
        .into_iter()
        .map(|mut interview| {
            let interviewer_id = interview["interviewer"].as_str().unwrap_or_default().to_string();
            if let Some(iv) = find(&db.interviewers, &interviewer_id) {
                interview["interviewer"] = iv.clone();
            }
            interview
        })
        .collect();
    Json(json!({ "interviews": interviews })).into_response()
}

async fn create_assessment(State(db): State<Db>, multipart: Multipart) -> Response {
    log(&db, "POST /assessments".into());
    let (fields, uploads) = read_multipart(multipart).await;
    let mut db = db.lock().unwrap();
    let candidate_id = fields.get("candidateId").cloned().unwrap_or_default();
    if find(&db.candidates, &candidate_id).is_none() {
        return message(StatusCode::NOT_FOUND, "Candidate not found");
    }

    let id = db.next_id("as");
    let test_file = uploads
        .iter()
        .find(|u| u.field == "testFile")
        .map(|u| format!("public\\uploads\\{}", u.file_name));
    let assessment = json!({
        "_id": id,
        "candidateId": candidate_id,
        "assessmentType": fields.get("assessmentType"),
        "evaluation": fields.get("evaluation"),
        "remarks": fields.get("remarks"),
        "testFile": test_file,
        "isCompleted": false
    });
    db.assessments.push(assessment.clone());
    db.uploads.extend(uploads);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Assessment uploaded", "assessment": assessment })),
    )
        .into_response()
}

async fn list_candidate_assessments(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("GET /assessments/candidate/{id}"));
    let db = db.lock().unwrap();
    Json(json!(db.assessments_for(&id))).into_response()
}

async fn delete_assessment(State(db): State<Db>, Path(id): Path<String>) -> Response {
    log(&db, format!("DELETE /assessments/{id}"));
    let mut db = db.lock().unwrap();
    let before = db.assessments.len();
    db.assessments.retain(|a| a["_id"] != id.as_str());
    if db.assessments.len() == before {
        return message(StatusCode::NOT_FOUND, "Assessment not found");
    }
    Json(json!({ "message": "Assessment deleted", "id": id })).into_response()
}
