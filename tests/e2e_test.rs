use axum::http::StatusCode;
use lending_records::api::types::*;
use lending_records::config::ResponseStyle;
use serde_json::{Value, json};

mod common;

use common::{memory_app, send};

fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("response has an id")
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_full_lending_flow() {
    let app = memory_app(ResponseStyle::Legacy);

    // Step 1: カテゴリ登録
    let (status, category) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["nombre"], "FICTION");
    let category_id = id_of(&category);

    // Step 2: 書籍登録
    let (status, book) = send(
        &app,
        "POST",
        "/libro",
        Some(json!({ "nombre": "dune", "descripcion": "arrakis", "categoria_id": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let book_id = id_of(&book);

    // Step 3: 書籍取得（正規化済み）
    let (status, body) = send(&app, "GET", &format!("/libro/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: BookResponse = serde_json::from_value(body).unwrap();
    assert_eq!(fetched.name, "DUNE");
    assert_eq!(fetched.description.as_deref(), Some("ARRAKIS"));
    assert_eq!(fetched.categoria_id, category_id);
    assert_eq!(fetched.persona_id, None);

    // Step 4: 人物登録と貸出
    let (status, person) = send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "lovelace", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(person["email"], "ADA@EXAMPLE.COM");
    let person_id = id_of(&person);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/libro/prestar/{}", book_id),
        Some(json!({ "persona_id": person_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mensaje"], "se presto correctamente");

    // Step 5: 貸出中は削除できない
    let (status, body) = send(&app, "DELETE", &format!("/libro/{}", book_id), None).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Ese libro esta prestado, no se puede borrar");

    // Step 6: 返却
    let (status, body) = send(&app, "PUT", &format!("/libro/devolver/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mensaje"], "Se realizo la devolucion correctamente");

    // Step 7: 削除
    let (status, body) = send(&app, "DELETE", &format!("/libro/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mensaje"], "Se borro correctamente");

    let (status, _) = send(&app, "GET", &format!("/libro/{}", book_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_list_shape_legacy() {
    let app = memory_app(ResponseStyle::Legacy);

    // 0件: 404と空配列
    let (status, body) = send(&app, "GET", "/categoria", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!([]));

    // 1件: 素のオブジェクト
    send(&app, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    let (status, body) = send(&app, "GET", "/categoria", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
    assert_eq!(body["nombre"], "FICTION");

    // 2件以上: 配列
    send(&app, "POST", "/categoria", Some(json!({ "nombre": "poetry" }))).await;
    let (status, body) = send(&app, "GET", "/categoria", None).await;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<CategoryResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(list.len(), 2);
}

#[tokio::test]
async fn test_e2e_list_shape_uniform() {
    let app = memory_app(ResponseStyle::Uniform);

    let (status, body) = send(&app, "GET", "/persona", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "lovelace", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    let (status, body) = send(&app, "GET", "/persona", None).await;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<PersonResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_e2e_category_delete_response_shapes() {
    let legacy = memory_app(ResponseStyle::Legacy);
    let (_, category) = send(&legacy, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    let (status, body) = send(&legacy, "DELETE", &format!("/categoria/{}", id_of(&category)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Se borro correctamente"));

    let uniform = memory_app(ResponseStyle::Uniform);
    let (_, category) = send(&uniform, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    let (status, body) = send(&uniform, "DELETE", &format!("/categoria/{}", id_of(&category)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mensaje"], "Se borro correctamente");
}

// ============================================================================
// E2Eテスト: 異常系
// ============================================================================

#[tokio::test]
async fn test_e2e_blank_and_mistyped_fields_are_rejected() {
    let app = memory_app(ResponseStyle::Legacy);

    let (status, body) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "   " }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Faltan datos");

    let (status, _) = send(&app, "POST", "/categoria", Some(json!({ "nombre": 5 }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, _) = send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, _) = send(&app, "POST", "/libro", Some(json!({ "nombre": "dune" }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // 何も保存されていない
    let (status, body) = send(&app, "GET", "/categoria", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!([]));
    let (status, _) = send(&app, "GET", "/persona", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_malformed_body_uses_message_shape() {
    let app = memory_app(ResponseStyle::Legacy);

    let (status, body) = send(&app, "POST", "/categoria", Some(json!("fiction"))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["mensaje"].is_string());
}

#[tokio::test]
async fn test_e2e_duplicates_are_rejected_case_insensitively() {
    let app = memory_app(ResponseStyle::Legacy);

    let (_, category) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "Fiction" }))).await;
    let (status, body) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "FICTION" }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Ese nombre de categoria ya existe");

    let category_id = id_of(&category);
    send(&app, "POST", "/libro", Some(json!({ "nombre": "dune", "categoria_id": category_id }))).await;
    let (status, body) = send(&app, "POST", "/libro", Some(json!({ "nombre": "Dune", "categoria_id": category_id }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Ese libro ya existe");
}

#[tokio::test]
async fn test_e2e_book_references_must_exist() {
    let app = memory_app(ResponseStyle::Legacy);

    let (status, body) = send(&app, "POST", "/libro", Some(json!({ "nombre": "dune", "categoria_id": 7 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["mensaje"], "No existe la categoria indicada");

    let (_, category) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    let (status, _) = send(
        &app,
        "POST",
        "/libro",
        Some(json!({ "nombre": "dune", "categoria_id": id_of(&category), "persona_id": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_loan_conflicts() {
    let app = memory_app(ResponseStyle::Legacy);
    let (_, category) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    let (_, book) = send(&app, "POST", "/libro", Some(json!({ "nombre": "dune", "categoria_id": id_of(&category) }))).await;
    let (_, person) = send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "lovelace", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    let book_id = id_of(&book);

    // 棚にある書籍は返却できない
    let (status, body) = send(&app, "PUT", &format!("/libro/devolver/{}", book_id), None).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Ese libro no estaba prestado");

    // 存在しない人物には貸し出せない
    let (status, _) = send(&app, "PUT", &format!("/libro/prestar/{}", book_id), Some(json!({ "persona_id": 999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 二重貸出は不可
    let lend = json!({ "persona_id": id_of(&person) });
    let (status, _) = send(&app, "PUT", &format!("/libro/prestar/{}", book_id), Some(lend.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "PUT", &format!("/libro/prestar/{}", book_id), Some(lend)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // 貸出中の人物は削除できない
    let (status, body) = send(&app, "DELETE", &format!("/persona/{}", id_of(&person)), None).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Esa persona tiene libros asociados, no se puede eliminar");

    // カテゴリも削除できない
    let (status, _) = send(&app, "DELETE", &format!("/categoria/{}", id_of(&category)), None).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_e2e_person_update() {
    let app = memory_app(ResponseStyle::Legacy);
    let (_, person) = send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "lovelace", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    let uri = format!("/persona/{}", id_of(&person));

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "alias": "enchantress" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alias"], "ENCHANTRESS");
    assert_eq!(body["nombre"], "ADA");
    assert_eq!(body["email"], "ADA@EXAMPLE.COM");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "email": "new@example.com" }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "El email no se puede modificar");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "nombre": "" }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, _) = send(&app, "PUT", "/persona/999", Some(json!({ "alias": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_person_update_rejects_explicit_null() {
    let app = memory_app(ResponseStyle::Legacy);
    let (_, person) = send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "lovelace", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    let uri = format!("/persona/{}", id_of(&person));

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "nombre": null }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Faltan datos");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "alias": "neo", "email": null }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // 何も書き込まれていない
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["nombre"], "ADA");
    assert_eq!(body["alias"], "COUNTESS");
}

#[tokio::test]
async fn test_e2e_person_update_checks_existence_before_fields() {
    let app = memory_app(ResponseStyle::Legacy);

    let (status, body) = send(&app, "PUT", "/persona/999", Some(json!({ "nombre": "" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["mensaje"], "No se encuentra esa persona");

    let (status, _) = send(&app, "PUT", "/persona/999", Some(json!({ "alias": 5 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_not_found_messages_depend_on_operation() {
    let app = memory_app(ResponseStyle::Legacy);
    let (_, category) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;

    let cases = [
        ("GET", "/libro/999", None, "No se encuentra ese libro"),
        ("DELETE", "/libro/999", None, "No se encuentra este libro"),
        ("PUT", "/libro/devolver/999", None, "Ese libro no existe"),
        ("GET", "/categoria/999", None, "Categoria no encontrada"),
        ("DELETE", "/categoria/999", None, "No existe la categoria indicada"),
        ("GET", "/persona/999", None, "Persona no encontrada"),
        ("DELETE", "/persona/999", None, "Persona no encontrada"),
        (
            "PUT",
            "/libro/prestar/1",
            Some(json!({ "persona_id": 999 })),
            "No se encontró la persona a la que se quiere prestar el libro",
        ),
        (
            "POST",
            "/libro",
            Some(json!({ "nombre": "dune", "categoria_id": id_of(&category), "persona_id": 999 })),
            "No existe la persona indicada",
        ),
    ];

    for (method, uri, body, expected) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(response["mensaje"], expected, "{} {}", method, uri);
    }

    let (_, person) = send(
        &app,
        "POST",
        "/persona",
        Some(json!({ "nombre": "ada", "apellido": "lovelace", "alias": "countess", "email": "ada@example.com" })),
    )
    .await;
    let (status, body) = send(&app, "PUT", "/libro/prestar/999", Some(json!({ "persona_id": id_of(&person) }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["mensaje"], "No se encontró el libro");
}

#[tokio::test]
async fn test_e2e_book_create_messages() {
    let app = memory_app(ResponseStyle::Legacy);

    let (status, body) = send(&app, "POST", "/libro", Some(json!({ "nombre": "dune" }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Nombre y categoria son datos obligatorios");

    let (status, body) = send(&app, "POST", "/libro", Some(json!({ "nombre": "dune", "categoria_id": "1" }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["mensaje"], "Se enviaron datos invalidos");
}

#[tokio::test]
async fn test_e2e_whole_float_ids_are_accepted() {
    let app = memory_app(ResponseStyle::Legacy);
    let (_, category) = send(&app, "POST", "/categoria", Some(json!({ "nombre": "fiction" }))).await;
    let category_id = id_of(&category) as f64;

    let (status, book) = send(&app, "POST", "/libro", Some(json!({ "nombre": "dune", "categoria_id": category_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["categoria_id"], json!(id_of(&category)));

    let (status, _) = send(&app, "POST", "/libro", Some(json!({ "nombre": "emma", "categoria_id": 1.5 }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_e2e_non_numeric_id_is_not_found() {
    let app = memory_app(ResponseStyle::Legacy);

    let (status, body) = send(&app, "GET", "/libro/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["mensaje"], "No se encuentra ese libro");
}

#[tokio::test]
async fn test_e2e_health_check() {
    let app = memory_app(ResponseStyle::Legacy);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}
