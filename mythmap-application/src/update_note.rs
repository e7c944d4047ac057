use super::*;

pub fn update_note(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
    patch: usecases::NotePatch,
) -> Result<Note> {
    let note = connections.exclusive()?.transaction(|conn| {
        usecases::update_note(conn, requester, id, patch).map_err(|err| {
            warn!("Failed to update note {}: {}", id, err);
            err
        })
    })?;
    hooks::recalculate_place_rating(connections, &note.place_id);
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn owner_edit_removes_the_rating_until_approved_again() {
        let fixture = BackendFixture::new();
        let owner = fixture.create_user("owner", Role::User);
        let visitor = fixture.create_user("visitor", Role::User);
        let moderator = fixture.create_user("mod", Role::Moderator);
        let place = fixture.create_place(&owner, "Old Mill");
        fixture.approve_place(&moderator, &place.id);
        let a = fixture.create_note(&owner, &place.id, Some(4));
        let b = fixture.create_note(&visitor, &place.id, Some(2));
        fixture.approve_note(&moderator, &a.id);
        fixture.approve_note(&moderator, &b.id);
        assert_eq!(3.0, f64::from(fixture.get_place(&place.id).rating.average));

        let patch = usecases::NotePatch {
            text: Some("Not that spooky".into()),
            ..Default::default()
        };
        let b = flows::update_note(&fixture.db_connections, Some(&visitor), b.id.as_str(), patch)
            .unwrap();
        assert_eq!(ModerationStatus::Pending, b.moderation.status);
        let rating = fixture.get_place(&place.id).rating;
        assert_eq!(1, rating.count);
        assert_eq!(4.0, f64::from(rating.average));

        fixture.approve_note(&moderator, &b.id);
        let rating = fixture.get_place(&place.id).rating;
        assert_eq!(2, rating.count);
        assert_eq!(3.0, f64::from(rating.average));
    }

    #[test]
    fn owner_keeps_access_to_the_note_under_review() {
        let fixture = BackendFixture::new();
        let owner = fixture.create_user("owner", Role::User);
        let visitor = fixture.create_user("visitor", Role::User);
        let moderator = fixture.create_user("mod", Role::Moderator);
        let place = fixture.create_place(&owner, "Old Mill");
        fixture.approve_place(&moderator, &place.id);
        let note = fixture.create_note(&visitor, &place.id, Some(3));
        fixture.approve_note(&moderator, &note.id);

        let edit = |text: &str| usecases::NotePatch {
            text: Some(text.into()),
            ..Default::default()
        };
        let note = flows::update_note(
            &fixture.db_connections,
            Some(&visitor),
            note.id.as_str(),
            edit("Heard chains rattling"),
        )
        .unwrap();
        assert_eq!(ModerationStatus::Pending, note.moderation.status);

        let note = flows::update_note(
            &fixture.db_connections,
            Some(&visitor),
            note.id.as_str(),
            edit("Heard chains rattling at midnight"),
        )
        .unwrap();
        assert_eq!("Heard chains rattling at midnight", note.text);

        let err = flows::update_note(
            &fixture.db_connections,
            Some(&owner),
            note.id.as_str(),
            edit("Nonsense"),
        )
        .unwrap_err();
        assert!(matches!(
            err.as_parameter_error(),
            Some(usecases::Error::Repo(RepoError::NotFound))
        ));

        flows::delete_note(
            &fixture.db_connections,
            &fixture.media,
            Some(&visitor),
            note.id.as_str(),
        )
        .unwrap();
        assert!(fixture.try_get_note(&note.id).is_none());
    }
}
