use super::prelude::*;

/// Recalculate the cached rating summary and the number of
/// approved notes of a place from its current notes.
///
/// Only approved notes with a rating count towards the average.
pub fn recalculate_place_rating<R>(repo: &R, place_id: &str) -> Result<(RatingSummary, u64)>
where
    R: PlaceRepo + NoteRepo,
{
    let notes = repo.load_notes_of_place(place_id)?;
    let notes_count = notes.iter().filter(|n| n.moderation.is_approved()).count() as u64;
    let rating: RatingSummary = notes.iter().filter_map(Note::effective_rating).collect();
    repo.update_place_rating(place_id, &rating, notes_count)?;
    log::debug!(
        "Recalculated rating of place {}: {:.2} ({} ratings, {} notes)",
        place_id,
        f64::from(rating.average),
        rating.count,
        notes_count
    );
    Ok((rating, notes_count))
}
