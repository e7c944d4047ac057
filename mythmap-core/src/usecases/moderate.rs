use strum::{AsRefStr, Display};

use super::{authorize_moderator, get_visible_note, get_visible_place, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ModeratedKind {
    Place,
    Note,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject { reason: Option<String> },
}

impl ModerationAction {
    fn apply(self, moderation: &mut Moderation) {
        match self {
            Self::Approve => moderation.approve(),
            Self::Reject { reason } => moderation.reject(reason),
        }
    }
}

/// Summary of a moderation decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moderated {
    pub kind: ModeratedKind,
    pub id: Id,
    pub status: ModerationStatus,
}

fn log_moderation(kind: ModeratedKind, id: &Id, moderation: &Moderation, moderator: &User) {
    log::info!(
        "Moderator {} changed status of {} {} to {}",
        moderator.username,
        kind,
        id,
        moderation.status
    );
}

pub fn moderate_place<R: PlaceRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
    action: ModerationAction,
) -> Result<Moderated> {
    let moderator = authorize_moderator(requester)?;
    let mut place = get_visible_place(repo, requester, id)?;
    action.apply(&mut place.moderation);
    place.updated_at = Timestamp::now();
    repo.update_place(&place)?;
    log_moderation(ModeratedKind::Place, &place.id, &place.moderation, moderator);
    Ok(Moderated {
        kind: ModeratedKind::Place,
        id: place.id,
        status: place.moderation.status,
    })
}

/// The rating of the place needs to be recalculated afterwards.
pub fn moderate_note<R: NoteRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
    action: ModerationAction,
) -> Result<Note> {
    let moderator = authorize_moderator(requester)?;
    let mut note = get_visible_note(repo, requester, id)?;
    action.apply(&mut note.moderation);
    note.updated_at = Timestamp::now();
    repo.update_note(&note)?;
    log_moderation(ModeratedKind::Note, &note.id, &note.moderation, moderator);
    Ok(note)
}

pub fn moderate_comment<R: CommentRepo>(
    repo: &R,
    requester: Option<&User>,
    id: &str,
    action: ModerationAction,
) -> Result<Moderated> {
    let moderator = authorize_moderator(requester)?;
    let mut comment = repo.get_comment(id)?;
    action.apply(&mut comment.moderation);
    comment.updated_at = Timestamp::now();
    repo.update_comment(&comment)?;
    log_moderation(
        ModeratedKind::Comment,
        &comment.id,
        &comment.moderation,
        moderator,
    );
    Ok(Moderated {
        kind: ModeratedKind::Comment,
        id: comment.id,
        status: comment.moderation.status,
    })
}

impl From<&Note> for Moderated {
    fn from(note: &Note) -> Self {
        Self {
            kind: ModeratedKind::Note,
            id: note.id.clone(),
            status: note.moderation.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use mythmap_entities::builders::*;

    #[test]
    fn approve_and_reject_places() {
        let db = MockDb::default();
        let moderator = db.add_user(User::build().role(Role::Moderator).finish());
        let place = db.add_place(Place::build().finish());
        let id = place.id.as_str();

        let res = moderate_place(
            &db,
            Some(&moderator),
            id,
            ModerationAction::Reject {
                reason: Some(" Not a myth ".into()),
            },
        )
        .unwrap();
        assert_eq!(ModerationStatus::Rejected, res.status);
        assert_eq!(
            Some("Not a myth"),
            db.places.borrow()[0].moderation.rejection_reason.as_deref()
        );

        // Re-moderation of rejected places
        let res = moderate_place(&db, Some(&moderator), id, ModerationAction::Approve).unwrap();
        assert_eq!(ModerationStatus::Approved, res.status);
        assert_eq!("place", res.kind.as_ref());
        assert_eq!(None, db.places.borrow()[0].moderation.rejection_reason);
    }

    #[test]
    fn only_moderators_can_moderate() {
        let db = MockDb::default();
        let owner = db.add_user(User::build().finish());
        let note = db.add_note(Note::build().user(owner.id.as_str()).finish());
        assert!(matches!(
            moderate_note(&db, Some(&owner), note.id.as_str(), ModerationAction::Approve),
            Err(Error::Forbidden)
        ));
        assert!(matches!(
            moderate_note(&db, None, note.id.as_str(), ModerationAction::Approve),
            Err(Error::Unauthorized)
        ));
        let admin = db.add_user(User::build().role(Role::Admin).finish());
        let note = moderate_note(&db, Some(&admin), note.id.as_str(), ModerationAction::Approve)
            .unwrap();
        assert!(note.moderation.is_approved());
        assert_eq!(ModeratedKind::Note, Moderated::from(&note).kind);
    }

    #[test]
    fn moderate_missing_comment() {
        let db = MockDb::default();
        let moderator = db.add_user(User::build().role(Role::Moderator).finish());
        assert!(matches!(
            moderate_comment(&db, Some(&moderator), "missing", ModerationAction::Approve),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }
}
