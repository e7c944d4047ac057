use super::*;

impl<'a> NoteRepo for DbReadWrite<'a> {
    fn create_note(&self, note: &Note) -> Result<()> {
        create_note(&mut self.conn.borrow_mut(), note)
    }
    fn update_note(&self, note: &Note) -> Result<()> {
        update_note(&mut self.conn.borrow_mut(), note)
    }
    fn delete_note(&self, id: &str) -> Result<()> {
        delete_note(&mut self.conn.borrow_mut(), id)
    }

    fn get_note(&self, id: &str) -> Result<Note> {
        get_note(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_note_of_user(&self, place_id: &str, user_id: &str) -> Result<Option<Note>> {
        try_get_note_of_user(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn query_notes(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        query_notes(&mut self.conn.borrow_mut(), query)
    }
    fn load_notes_of_place(&self, place_id: &str) -> Result<Vec<Note>> {
        load_notes_of_place(&mut self.conn.borrow_mut(), place_id)
    }
}

impl<'a> NoteRepo for DbConnection<'a> {
    fn create_note(&self, note: &Note) -> Result<()> {
        create_note(&mut self.conn.borrow_mut(), note)
    }
    fn update_note(&self, note: &Note) -> Result<()> {
        update_note(&mut self.conn.borrow_mut(), note)
    }
    fn delete_note(&self, id: &str) -> Result<()> {
        delete_note(&mut self.conn.borrow_mut(), id)
    }

    fn get_note(&self, id: &str) -> Result<Note> {
        get_note(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_note_of_user(&self, place_id: &str, user_id: &str) -> Result<Option<Note>> {
        try_get_note_of_user(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn query_notes(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        query_notes(&mut self.conn.borrow_mut(), query)
    }
    fn load_notes_of_place(&self, place_id: &str) -> Result<Vec<Note>> {
        load_notes_of_place(&mut self.conn.borrow_mut(), place_id)
    }
}

impl<'a> NoteRepo for DbReadOnly<'a> {
    fn create_note(&self, _note: &Note) -> Result<()> {
        unreachable!();
    }
    fn update_note(&self, _note: &Note) -> Result<()> {
        unreachable!();
    }
    fn delete_note(&self, _id: &str) -> Result<()> {
        unreachable!();
    }

    fn get_note(&self, id: &str) -> Result<Note> {
        get_note(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_note_of_user(&self, place_id: &str, user_id: &str) -> Result<Option<Note>> {
        try_get_note_of_user(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn query_notes(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        query_notes(&mut self.conn.borrow_mut(), query)
    }
    fn load_notes_of_place(&self, place_id: &str) -> Result<Vec<Note>> {
        load_notes_of_place(&mut self.conn.borrow_mut(), place_id)
    }
}

fn create_note(conn: &mut SqliteConnection, note: &Note) -> Result<()> {
    let new_note = models::NewNote {
        id: note.id.as_str(),
        place_id: note.place_id.as_str(),
        user_id: note.user_id.as_str(),
        text: &note.text,
        rating: note.rating.map(|r| i16::from(u8::from(r))),
        status: note.moderation.status.into(),
        rejection_reason: note.moderation.rejection_reason.as_deref(),
        created_at: note.created_at.as_millis(),
        updated_at: note.updated_at.as_millis(),
    };
    // A violation of UNIQUE(place_id, user_id) is reported as `AlreadyExists`
    let _count = diesel::insert_into(schema::notes::table)
        .values(&new_note)
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn update_note(conn: &mut SqliteConnection, note: &Note) -> Result<()> {
    use schema::notes::dsl;
    let changeset = models::NoteChangeset {
        text: &note.text,
        rating: note.rating.map(|r| i16::from(u8::from(r))),
        status: note.moderation.status.into(),
        rejection_reason: note.moderation.rejection_reason.as_deref(),
        updated_at: note.updated_at.as_millis(),
    };
    let count = diesel::update(dsl::notes.filter(dsl::id.eq(note.id.as_str())))
        .set(&changeset)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_note(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::{note_images::dsl as i_dsl, notes::dsl};
    diesel::delete(i_dsl::note_images.filter(i_dsl::note_id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    let count = diesel::delete(dsl::notes.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_note(conn: &mut SqliteConnection, id: &str) -> Result<Note> {
    use schema::notes::dsl;
    let row = dsl::notes
        .filter(dsl::id.eq(id))
        .first::<models::NoteEntity>(conn)
        .map_err(from_diesel_err)?;
    load_note(row)
}

fn try_get_note_of_user(
    conn: &mut SqliteConnection,
    place_id: &str,
    user_id: &str,
) -> Result<Option<Note>> {
    use schema::notes::dsl;
    dsl::notes
        .filter(dsl::place_id.eq(place_id))
        .filter(dsl::user_id.eq(user_id))
        .first::<models::NoteEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_note)
        .transpose()
}

fn query_notes(conn: &mut SqliteConnection, query: &NoteQuery) -> Result<Vec<Note>> {
    use schema::notes::dsl;

    if query.status.is_empty() {
        return Ok(vec![]);
    }
    let mut sql = dsl::notes
        .filter(dsl::status.eq_any(to_status_primitives(&query.status)))
        .into_boxed();

    if let Some(place_id) = &query.place_id {
        sql = sql.filter(dsl::place_id.eq(place_id.as_str()));
    }
    if let Some(user_id) = &query.user_id {
        sql = sql.filter(dsl::user_id.eq(user_id.as_str()));
    }
    if let Some(text) = &query.text {
        sql = sql.filter(dsl::text.like(contains_pattern(text)).escape('\\'));
    }
    if let Some(search) = &query.search {
        sql = sql.filter(dsl::text.like(contains_pattern(search)).escape('\\'));
    }
    // Notes without a rating never match a rating range
    if let Some(min) = query.rating_min {
        sql = sql.filter(dsl::rating.ge(i16::from(u8::from(min))));
    }
    if let Some(max) = query.rating_max {
        sql = sql.filter(dsl::rating.le(i16::from(u8::from(max))));
    }

    use SortDirection as D;
    sql = match (query.order.field, query.order.direction) {
        (NoteSortField::CreatedAt, D::Ascending) => sql.order_by(dsl::created_at.asc()),
        (NoteSortField::CreatedAt, D::Descending) => sql.order_by(dsl::created_at.desc()),
        (NoteSortField::UpdatedAt, D::Ascending) => sql.order_by(dsl::updated_at.asc()),
        (NoteSortField::UpdatedAt, D::Descending) => sql.order_by(dsl::updated_at.desc()),
        (NoteSortField::Rating, D::Ascending) => sql.order_by(dsl::rating.asc()),
        (NoteSortField::Rating, D::Descending) => sql.order_by(dsl::rating.desc()),
    };
    sql = sql.then_order_by(dsl::id.asc());

    if let Some((limit, offset)) = limit_and_offset(&query.pagination) {
        sql = sql.limit(limit).offset(offset);
    }

    sql.load::<models::NoteEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_note)
        .collect()
}

fn load_notes_of_place(conn: &mut SqliteConnection, place_id: &str) -> Result<Vec<Note>> {
    use schema::notes::dsl;
    dsl::notes
        .filter(dsl::place_id.eq(place_id))
        .order_by(dsl::created_at)
        .load::<models::NoteEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_note)
        .collect()
}
