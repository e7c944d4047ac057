use super::{
    authenticated, authorize_modification, get_accessible_note, parse_rating, prelude::*,
    validate_text,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub text: Option<String>,
    /// `Some(None)` removes the rating
    pub rating: Option<Option<i64>>,
}

pub fn update_note<R: NoteRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
    patch: NotePatch,
) -> Result<Note> {
    let user = authenticated(requester)?;
    let mut note = get_accessible_note(repo, requester, id)?;
    authorize_modification(user, &note.user_id)?;
    let NotePatch { text, rating } = patch;
    if let Some(text) = text {
        note.text = validate_text(&text)?;
    }
    if let Some(rating) = rating {
        note.rating = parse_rating(rating)?;
    }
    if note.is_owned_by(&user.id) && note.moderation.reset_after_owner_edit() {
        log::info!("Note {} needs to be reviewed again", note.id);
    }
    note.updated_at = Timestamp::now();
    repo.update_note(&note)?;
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use mythmap_entities::builders::*;

    #[test]
    fn owner_edit_resets_approved_note() {
        let db = MockDb::default();
        let user = db.add_user(User::build().finish());
        let note = db.add_note(
            Note::build()
                .user(user.id.as_str())
                .rating(5)
                .status(ModerationStatus::Approved)
                .finish(),
        );
        let patch = NotePatch {
            rating: Some(Some(3)),
            ..Default::default()
        };
        let updated = update_note(&db, Some(&user), note.id.as_str(), patch).unwrap();
        assert_eq!(ModerationStatus::Pending, updated.moderation.status);
        assert_eq!(RatingValue::try_from(3).ok(), updated.rating);
        assert_eq!(None, updated.effective_rating());
    }

    #[test]
    fn admin_edit_keeps_approval() {
        let db = MockDb::default();
        let user = db.add_user(User::build().finish());
        let admin = db.add_user(User::build().role(Role::Admin).finish());
        let note = db.add_note(
            Note::build()
                .user(user.id.as_str())
                .status(ModerationStatus::Approved)
                .finish(),
        );
        let patch = NotePatch {
            text: Some("edited".into()),
            rating: Some(None),
        };
        let updated = update_note(&db, Some(&admin), note.id.as_str(), patch).unwrap();
        assert_eq!(ModerationStatus::Approved, updated.moderation.status);
        assert_eq!("edited", updated.text);
        assert_eq!(None, updated.rating);
    }

    #[test]
    fn moderators_may_not_edit_notes_of_others() {
        let db = MockDb::default();
        let user = db.add_user(User::build().finish());
        let moderator = db.add_user(User::build().role(Role::Moderator).finish());
        let note = db.add_note(Note::build().user(user.id.as_str()).finish());
        assert!(matches!(
            update_note(&db, Some(&moderator), note.id.as_str(), Default::default()),
            Err(Error::Forbidden)
        ));
    }
}
