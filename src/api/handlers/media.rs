use crate::api::error::AppError;
use crate::services::media_storage::DestroyOutcome;
use crate::services::staging::StagedFile;
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use futures::TryStreamExt;
use serde::Serialize;
use tokio_util::io::StreamReader;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub result: String,
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Multipart, description = "Image upload (multipart field 'image')"),
    responses(
        (status = 200, description = "Image relayed to remote storage", body = UploadResponse),
        (status = 400, description = "No file provided or malformed request"),
        (status = 500, description = "Remote upload failed")
    ),
    tag = "media"
)]
pub async fn upload_image(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut staged: Option<StagedFile> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // A body error mid-stream must not leak an already staged file.
                if let Some(staged) = staged.take() {
                    staged.remove().await;
                }
                let err_msg = e.to_string();
                return Err(if err_msg.contains("length limit exceeded") {
                    AppError::PayloadTooLarge(
                        "Request body exceeds the maximum allowed limit".to_string(),
                    )
                } else {
                    AppError::BadRequest(err_msg)
                });
            }
        };

        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            // A repeated field replaces the staged copy; last one wins.
            if let Some(previous) = staged.take() {
                previous.remove().await;
            }

            let original_filename = field.file_name().unwrap_or("unnamed").to_string();

            let body_with_io_error = field.map_err(std::io::Error::other);
            let reader = StreamReader::new(body_with_io_error);

            staged = Some(state.staging.stage(&original_filename, reader).await?);
        }
    }

    let staged = staged.ok_or(AppError::BadRequest(
        "No file provided under field 'image'".to_string(),
    ))?;

    let result = state
        .storage
        .upload(staged.path(), &state.config.upload_folder)
        .await;

    // The staged copy is removed whether the remote call succeeded or not.
    staged.remove().await;

    let asset = result.map_err(AppError::UploadFailed)?;

    Ok(Json(UploadResponse {
        url: asset.secure_url,
        public_id: asset.public_id,
    }))
}

#[utoipa::path(
    delete,
    path = "/delete/{public_id}",
    params(
        ("public_id" = String, Path, description = "Remote asset identifier")
    ),
    responses(
        (status = 200, description = "Asset deleted", body = DeleteResponse),
        (status = 404, description = "No asset with that identifier"),
        (status = 500, description = "Remote delete failed")
    ),
    tag = "media"
)]
pub async fn delete_image(
    State(state): State<crate::AppState>,
    Path(public_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let outcome = state
        .storage
        .destroy(&public_id)
        .await
        .map_err(|e| AppError::DeleteFailed(e.to_string()))?;

    match outcome {
        DestroyOutcome::Destroyed => Ok(Json(DeleteResponse {
            message: "Deleted successfully".to_string(),
            result: outcome.as_str().to_string(),
        })),
        DestroyOutcome::NotFound => Err(AppError::NotFound(format!(
            "No remote asset with id '{}'",
            public_id
        ))),
    }
}
