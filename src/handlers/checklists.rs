// src/handlers/checklists.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::checklist::{ChecklistField, ChecklistFileLink, ChecklistTemplate, NewChecklist, UploadedFile},
};

// Formato do multipart de criação (só para a documentação)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ChecklistUploadForm {
    #[schema(example = "Checklist de instalação - Refrigerador")]
    pub name: String,
    /// JSON com a lista de campos: `[{"key": ..., "label": ..., "kind": "text"}]`
    pub fields: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

fn invalid_form(e: impl std::fmt::Display) -> AppError {
    AppError::InvalidMultipart(e.to_string())
}

// Campos: "name" (texto), "fields" (JSON opcional) e "file" (o PDF)
async fn read_checklist_form(
    mut multipart: Multipart,
) -> Result<(NewChecklist, UploadedFile), AppError> {
    let mut name = String::new();
    let mut fields: Vec<ChecklistField> = Vec::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => name = field.text().await.map_err(invalid_form)?,
            Some("fields") => {
                let raw = field.text().await.map_err(invalid_form)?;
                if !raw.trim().is_empty() {
                    fields = serde_json::from_str(&raw).map_err(invalid_form)?;
                }
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("checklist.pdf").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/pdf")
                    .to_string();
                let bytes = field.bytes().await.map_err(invalid_form)?;
                if !bytes.is_empty() {
                    file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let checklist = NewChecklist { name, fields };
    checklist.validate()?;
    let file = file.ok_or(AppError::MissingFile)?;
    Ok((checklist, file))
}

#[utoipa::path(
    get,
    path = "/api/admin/checklists",
    tag = "Checklists",
    responses((status = 200, description = "Modelos de checklist", body = [ChecklistTemplate])),
    security(("api_jwt" = []))
)]
pub async fn list_checklists(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let checklists = app_state
        .checklist_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(checklists)))
}

#[utoipa::path(
    post,
    path = "/api/admin/checklists",
    tag = "Checklists",
    request_body(content = ChecklistUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Checklist criado e PDF enviado", body = ChecklistTemplate),
        (status = 400, description = "Nome vazio, formulário inválido ou arquivo ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_checklist(
    State(app_state): State<AppState>,
    locale: Locale,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (checklist, file) = read_checklist_form(multipart)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let template = app_state
        .checklist_service
        .create(&checklist, file)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(template)))
}

// GET /api/admin/checklists/{id}/file
#[utoipa::path(
    get,
    path = "/api/admin/checklists/{id}/file",
    tag = "Checklists",
    params(("id" = String, Path, description = "ID do checklist")),
    responses((status = 200, description = "URL de leitura do PDF", body = ChecklistFileLink)),
    security(("api_jwt" = []))
)]
pub async fn get_checklist_file(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let url = app_state
        .checklist_service
        .file_url(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ChecklistFileLink { url })))
}

// DELETE /api/admin/checklists/{id}: apaga o PDF e o documento
#[utoipa::path(
    delete,
    path = "/api/admin/checklists/{id}",
    tag = "Checklists",
    params(("id" = String, Path, description = "ID do checklist")),
    responses(
        (status = 204, description = "Checklist removido (mesmo se o PDF já não existia)"),
        (status = 404, description = "Checklist não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_checklist(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .checklist_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
