use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, HttpResponse, Responder};
use bson::oid::ObjectId;
use muchtodo::auth::{generate_token, AuthenticatedUser};
use muchtodo::config::Config;
use muchtodo::models::{CreateTodoDto, Todo, TodoDocument, TodoId, UpdateTodoDto, UserId};
use muchtodo::AppError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

// Stand-in for the `todos` collection.
#[derive(Default)]
struct TodoStore(Mutex<HashMap<ObjectId, TodoDocument>>);

async fn create_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    input: web::Json<CreateTodoDto>,
) -> Result<impl Responder, AppError> {
    let mut todo = Todo::new(input.into_inner(), user.0)?;
    let id = ObjectId::new();
    todo.id = Some(TodoId::from(id));
    store
        .0
        .lock()
        .unwrap()
        .insert(id, TodoDocument::from(&todo));
    Ok(HttpResponse::Created().json(todo))
}

async fn update_todo(
    store: web::Data<TodoStore>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    patch: web::Json<UpdateTodoDto>,
) -> Result<impl Responder, AppError> {
    let id: TodoId = path.into_inner().parse()?;
    let mut todos = store.0.lock().unwrap();
    let doc = todos
        .get(&id.as_object_id())
        .cloned()
        .ok_or_else(|| AppError::BadRequest("Unknown todo".into()))?;

    let mut todo = Todo::from(doc);
    if !todo.is_owned_by(&user.0) {
        return Err(AppError::Unauthorized("Todo belongs to another user".into()));
    }
    todo.apply_update(patch.into_inner())?;
    todos.insert(id.as_object_id(), TodoDocument::from(&todo));
    Ok(HttpResponse::Ok().json(todo))
}

fn bearer(user_id: &UserId, config: &Config) -> (header::HeaderName, String) {
    let token = generate_token(user_id, config).expect("Failed to generate token");
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_todo_lifecycle_through_handlers() {
    let config = Config::new("todos_test_secret");
    let owner = UserId::from(ObjectId::new());
    let intruder = UserId::from(ObjectId::new());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(TodoStore::default()))
            .route("/todos", web::post().to(create_todo))
            .route("/todos/{id}", web::patch().to(update_todo)),
    )
    .await;

    // A client-supplied userId is ignored; the owner comes from the token.
    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header(bearer(&owner, &config))
        .set_json(json!({ "title": "Buy milk", "userId": intruder.to_string() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["userId"], owner.to_string());
    assert_eq!(created["completed"], false);
    assert_eq!(created["description"], "");
    let todo_id = created["id"].as_str().expect("id should be set").to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/todos/{}", todo_id))
        .insert_header(bearer(&owner, &config))
        .set_json(json!({ "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Buy milk");

    let req = test::TestRequest::patch()
        .uri(&format!("/todos/{}", todo_id))
        .insert_header(bearer(&owner, &config))
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::patch()
        .uri(&format!("/todos/{}", todo_id))
        .insert_header(bearer(&intruder, &config))
        .set_json(json!({ "completed": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::patch()
        .uri("/todos/not-an-id")
        .insert_header(bearer(&owner, &config))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_create_todo_unauthorized() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Config::new("todos_test_secret")))
            .app_data(web::Data::new(TodoStore::default()))
            .route("/todos", web::post().to(create_todo)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/todos")
        .set_json(json!({ "title": "Unauthorized todo" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
