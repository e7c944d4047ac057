use super::*;

impl<'a> PlaceRepo for DbReadWrite<'a> {
    fn create_place(&self, place: &Place) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place)
    }
    fn update_place(&self, place: &Place) -> Result<()> {
        update_place(&mut self.conn.borrow_mut(), place)
    }
    fn delete_place(&self, id: &str) -> Result<()> {
        delete_place(&mut self.conn.borrow_mut(), id)
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), query)
    }
    fn count_places(&self) -> Result<usize> {
        count_places(&mut self.conn.borrow_mut())
    }

    fn update_place_rating(
        &self,
        id: &str,
        rating: &RatingSummary,
        notes_count: u64,
    ) -> Result<()> {
        update_place_rating(&mut self.conn.borrow_mut(), id, rating, notes_count)
    }
}

impl<'a> PlaceRepo for DbConnection<'a> {
    fn create_place(&self, place: &Place) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place)
    }
    fn update_place(&self, place: &Place) -> Result<()> {
        update_place(&mut self.conn.borrow_mut(), place)
    }
    fn delete_place(&self, id: &str) -> Result<()> {
        delete_place(&mut self.conn.borrow_mut(), id)
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), query)
    }
    fn count_places(&self) -> Result<usize> {
        count_places(&mut self.conn.borrow_mut())
    }

    fn update_place_rating(
        &self,
        id: &str,
        rating: &RatingSummary,
        notes_count: u64,
    ) -> Result<()> {
        update_place_rating(&mut self.conn.borrow_mut(), id, rating, notes_count)
    }
}

impl<'a> PlaceRepo for DbReadOnly<'a> {
    fn create_place(&self, _place: &Place) -> Result<()> {
        unreachable!();
    }
    fn update_place(&self, _place: &Place) -> Result<()> {
        unreachable!();
    }
    fn delete_place(&self, _id: &str) -> Result<()> {
        unreachable!();
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), query)
    }
    fn count_places(&self) -> Result<usize> {
        count_places(&mut self.conn.borrow_mut())
    }

    fn update_place_rating(
        &self,
        _id: &str,
        _rating: &RatingSummary,
        _notes_count: u64,
    ) -> Result<()> {
        unreachable!();
    }
}

fn create_place(conn: &mut SqliteConnection, place: &Place) -> Result<()> {
    let (lat, lng) = place.pos.to_lat_lng_deg();
    let new_place = models::NewPlace {
        id: place.id.as_str(),
        name: &place.name,
        description: &place.description,
        lat,
        lng,
        categories: place.categories.as_deref(),
        status: place.moderation.status.into(),
        rejection_reason: place.moderation.rejection_reason.as_deref(),
        owner_id: place.owner.as_str(),
        created_at: place.created_at.as_millis(),
        updated_at: place.updated_at.as_millis(),
        avg_rating: place.rating.average.into(),
        rating_count: place.rating.count as i64,
        notes_count: place.notes_count as i64,
    };
    let _count = diesel::insert_into(schema::places::table)
        .values(&new_place)
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn update_place(conn: &mut SqliteConnection, place: &Place) -> Result<()> {
    use schema::places::dsl;
    let (lat, lng) = place.pos.to_lat_lng_deg();
    let changeset = models::PlaceChangeset {
        name: &place.name,
        description: &place.description,
        lat,
        lng,
        categories: place.categories.as_deref(),
        status: place.moderation.status.into(),
        rejection_reason: place.moderation.rejection_reason.as_deref(),
        updated_at: place.updated_at.as_millis(),
    };
    let count = diesel::update(dsl::places.filter(dsl::id.eq(place.id.as_str())))
        .set(&changeset)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_place(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::{
        comments::dsl as c_dsl, note_images::dsl as ni_dsl, notes::dsl as n_dsl,
        place_favorites::dsl as f_dsl, place_images::dsl as pi_dsl, places::dsl,
    };
    // Dependent rows are deleted explicitly, independent
    // of the foreign key enforcement of the connection.
    let note_ids = n_dsl::notes
        .select(n_dsl::id)
        .filter(n_dsl::place_id.eq(id));
    diesel::delete(ni_dsl::note_images.filter(ni_dsl::note_id.eq_any(note_ids)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(n_dsl::notes.filter(n_dsl::place_id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(c_dsl::comments.filter(c_dsl::place_id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(pi_dsl::place_images.filter(pi_dsl::place_id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(f_dsl::place_favorites.filter(f_dsl::place_id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    let count = diesel::delete(dsl::places.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_place(conn: &mut SqliteConnection, id: &str) -> Result<Place> {
    use schema::places::dsl;
    let row = dsl::places
        .filter(dsl::id.eq(id))
        .first::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?;
    load_place(row)
}

fn query_places(conn: &mut SqliteConnection, query: &PlaceQuery) -> Result<Vec<Place>> {
    use schema::{place_favorites::dsl as f_dsl, places::dsl};

    if query.status.is_empty() {
        return Ok(vec![]);
    }
    let mut sql = dsl::places
        .filter(dsl::status.eq_any(to_status_primitives(&query.status)))
        .into_boxed();

    if let Some(name) = &query.name {
        sql = sql.filter(dsl::name.like(contains_pattern(name)).escape('\\'));
    }
    if let Some(categories) = &query.categories {
        sql = sql.filter(
            dsl::categories
                .like(contains_pattern(categories))
                .escape('\\'),
        );
    }
    if let Some(search) = &query.search {
        let pattern = contains_pattern(search);
        sql = sql.filter(
            dsl::name
                .like(pattern.clone())
                .escape('\\')
                .or(dsl::description.like(pattern.clone()).escape('\\'))
                .or(dsl::categories
                    .like(pattern)
                    .escape('\\')
                    .assume_not_null()),
        );
    }
    if let Some(owner) = &query.owner {
        sql = sql.filter(dsl::owner_id.eq(owner.as_str()));
    }
    if let Some(user_id) = &query.favorite_of {
        let favorite_place_ids = f_dsl::place_favorites
            .select(f_dsl::place_id)
            .filter(f_dsl::user_id.eq(user_id.as_str()));
        sql = sql.filter(dsl::id.eq_any(favorite_place_ids));
    }
    if let Some(bbox) = &query.bbox {
        let (sw_lat, sw_lng) = bbox.southwest().to_lat_lng_deg();
        let (ne_lat, ne_lng) = bbox.northeast().to_lat_lng_deg();
        sql = sql.filter(dsl::lat.between(sw_lat, ne_lat));
        if bbox.is_inverse() {
            // Crossing the antimeridian
            sql = sql.filter(dsl::lng.ge(sw_lng).or(dsl::lng.le(ne_lng)));
        } else {
            sql = sql.filter(dsl::lng.between(sw_lng, ne_lng));
        }
    }

    use SortDirection as D;
    sql = match (query.order.field, query.order.direction) {
        (PlaceSortField::Name, D::Ascending) => sql.order_by(dsl::name.asc()),
        (PlaceSortField::Name, D::Descending) => sql.order_by(dsl::name.desc()),
        (PlaceSortField::CreatedAt, D::Ascending) => sql.order_by(dsl::created_at.asc()),
        (PlaceSortField::CreatedAt, D::Descending) => sql.order_by(dsl::created_at.desc()),
        (PlaceSortField::UpdatedAt, D::Ascending) => sql.order_by(dsl::updated_at.asc()),
        (PlaceSortField::UpdatedAt, D::Descending) => sql.order_by(dsl::updated_at.desc()),
        (PlaceSortField::AvgRating, D::Ascending) => sql.order_by(dsl::avg_rating.asc()),
        (PlaceSortField::AvgRating, D::Descending) => sql.order_by(dsl::avg_rating.desc()),
        (PlaceSortField::RatingCount, D::Ascending) => sql.order_by(dsl::rating_count.asc()),
        (PlaceSortField::RatingCount, D::Descending) => sql.order_by(dsl::rating_count.desc()),
        (PlaceSortField::NotesCount, D::Ascending) => sql.order_by(dsl::notes_count.asc()),
        (PlaceSortField::NotesCount, D::Descending) => sql.order_by(dsl::notes_count.desc()),
    };
    // Disambiguation of equal sort keys
    sql = sql.then_order_by(dsl::id.asc());

    if let Some((limit, offset)) = limit_and_offset(&query.pagination) {
        sql = sql.limit(limit).offset(offset);
    }

    sql.load::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_place)
        .collect()
}

fn count_places(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::places::dsl;
    Ok(dsl::places
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn update_place_rating(
    conn: &mut SqliteConnection,
    id: &str,
    rating: &RatingSummary,
    notes_count: u64,
) -> Result<()> {
    use schema::places::dsl;
    let count = diesel::update(dsl::places.filter(dsl::id.eq(id)))
        .set((
            dsl::avg_rating.eq(f64::from(rating.average)),
            dsl::rating_count.eq(rating.count as i64),
            dsl::notes_count.eq(notes_count as i64),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}
