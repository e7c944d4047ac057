use super::*;

impl<'a> FavoriteRepo for DbReadWrite<'a> {
    fn is_favorite(&self, place_id: &str, user_id: &str) -> Result<bool> {
        is_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn add_favorite(&self, place_id: &str, user_id: &str) -> Result<()> {
        add_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn remove_favorite(&self, place_id: &str, user_id: &str) -> Result<bool> {
        remove_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
}

impl<'a> FavoriteRepo for DbConnection<'a> {
    fn is_favorite(&self, place_id: &str, user_id: &str) -> Result<bool> {
        is_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn add_favorite(&self, place_id: &str, user_id: &str) -> Result<()> {
        add_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn remove_favorite(&self, place_id: &str, user_id: &str) -> Result<bool> {
        remove_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
}

impl<'a> FavoriteRepo for DbReadOnly<'a> {
    fn is_favorite(&self, place_id: &str, user_id: &str) -> Result<bool> {
        is_favorite(&mut self.conn.borrow_mut(), place_id, user_id)
    }
    fn add_favorite(&self, _place_id: &str, _user_id: &str) -> Result<()> {
        unreachable!();
    }
    fn remove_favorite(&self, _place_id: &str, _user_id: &str) -> Result<bool> {
        unreachable!();
    }
}

fn is_favorite(conn: &mut SqliteConnection, place_id: &str, user_id: &str) -> Result<bool> {
    use schema::place_favorites::dsl;
    let count = dsl::place_favorites
        .filter(dsl::place_id.eq(place_id))
        .filter(dsl::user_id.eq(user_id))
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count > 0)
}

fn add_favorite(conn: &mut SqliteConnection, place_id: &str, user_id: &str) -> Result<()> {
    let _count = diesel::insert_into(schema::place_favorites::table)
        .values(&models::NewFavorite { place_id, user_id })
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn remove_favorite(conn: &mut SqliteConnection, place_id: &str, user_id: &str) -> Result<bool> {
    use schema::place_favorites::dsl;
    let count = diesel::delete(
        dsl::place_favorites
            .filter(dsl::place_id.eq(place_id))
            .filter(dsl::user_id.eq(user_id)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    Ok(count > 0)
}
