//! Actions that run after the transaction of a use case has
//! been committed. Failures are logged and never returned.

use super::*;

/// Recalculate the cached rating of a place from the committed notes.
///
/// Runs in its own write transaction so concurrent moderation
/// actions converge to the rating of the latest committed state.
pub(crate) fn recalculate_place_rating(connections: &sqlite::Connections, place_id: &Id) {
    let result = connections
        .exclusive()
        .map_err(crate::error::AppError::from)
        .and_then(|mut db| {
            db.transaction(|conn| usecases::recalculate_place_rating(conn, place_id.as_str()))
                .map_err(Into::into)
        });
    match result {
        Ok((rating, notes_count)) => {
            debug!(
                "Updated rating of place {}: {} rating(s), {} note(s)",
                place_id, rating.count, notes_count
            );
        }
        Err(err) => {
            error!("Failed to recalculate rating of place {}: {}", place_id, err);
        }
    }
}

/// Remove the files of deleted images from the media store.
pub(crate) fn remove_image_files(media: &dyn MediaStore, images: &[Image]) {
    for image in images {
        if let Err(err) = media.remove(&image.file_name) {
            warn!("Failed to remove image file {}: {}", image.file_name, err);
        }
    }
}
