//! Streaming files as downloads.

use crate::browser::error::Error;
use crate::browser::target::Location;
use crate::server::{HttpResponse, StatusCode};

/// Open the file at `location` and stream it as the response body.
///
/// The content type is guessed from the file extension. With `attachment`
/// set, the browser is told to save the file instead of displaying it.
pub async fn serve_file(location: &Location, attachment: bool) -> Result<HttpResponse, Error> {
    let open_error = |source| Error::Open {
        path: location.path.clone(),
        source,
    };

    let file = tokio::fs::File::open(&location.path).await.map_err(open_error)?;
    let len = file.metadata().await.map_err(open_error)?.len();

    let mime = mime_guess::from_path(&location.path)
        .first_or_octet_stream()
        .to_string();

    let mut response = HttpResponse::new(StatusCode::Ok)
        .with_content_type(mime)
        .with_body_file(file, len);

    if attachment {
        let file_name = location
            .path
            .file_name()
            .map(|name| name.to_string_lossy().replace('"', "'"))
            .unwrap_or_default();
        response = response.with_header(
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        );
    }

    Ok(response)
}
