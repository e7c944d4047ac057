use super::*;

pub fn delete_note(
    connections: &sqlite::Connections,
    media: &dyn MediaStore,
    requester: Option<&User>,
    id: &str,
) -> Result<()> {
    let (note, images) = connections.exclusive()?.transaction(|conn| {
        usecases::delete_note(conn, requester, id).map_err(|err| {
            warn!("Failed to delete note {}: {}", id, err);
            err
        })
    })?;
    hooks::remove_image_files(media, &images);
    hooks::recalculate_place_rating(connections, &note.place_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn deleting_the_last_rated_note_resets_the_rating() {
        let fixture = BackendFixture::new();
        let owner = fixture.create_user("owner", Role::User);
        let moderator = fixture.create_user("mod", Role::Moderator);
        let place = fixture.create_place(&owner, "Old Mill");
        fixture.approve_place(&moderator, &place.id);
        let note = fixture.create_note(&owner, &place.id, Some(3));
        fixture.approve_note(&moderator, &note.id);
        let image = flows::add_image(
            &fixture.db_connections,
            &fixture.media,
            Some(&owner),
            ImageParent::Note(note.id.clone()),
            "image/png",
            b"png",
        )
        .unwrap();
        assert_eq!(1, fixture.get_place(&place.id).rating.count);

        flows::delete_note(
            &fixture.db_connections,
            &fixture.media,
            Some(&owner),
            note.id.as_str(),
        )
        .unwrap();

        assert!(fixture.try_get_note(&note.id).is_none());
        assert!(!fixture.media.files.borrow().contains_key(&image.file_name));
        let place = fixture.get_place(&place.id);
        assert_eq!(RatingSummary::default(), place.rating);
        assert_eq!(0, place.notes_count);
    }

    #[test]
    fn only_owners_and_admins_may_delete_notes() {
        let fixture = BackendFixture::new();
        let owner = fixture.create_user("owner", Role::User);
        let moderator = fixture.create_user("mod", Role::Moderator);
        let admin = fixture.create_user("admin", Role::Admin);
        let place = fixture.create_place(&owner, "Old Mill");
        fixture.approve_place(&moderator, &place.id);
        let note = fixture.create_note(&owner, &place.id, None);

        let err = flows::delete_note(
            &fixture.db_connections,
            &fixture.media,
            Some(&moderator),
            note.id.as_str(),
        )
        .unwrap_err();
        assert!(matches!(
            err.as_parameter_error(),
            Some(usecases::Error::Forbidden)
        ));
        flows::delete_note(
            &fixture.db_connections,
            &fixture.media,
            Some(&admin),
            note.id.as_str(),
        )
        .unwrap();
    }
}
