use super::*;

impl<'a> CommentRepo for DbReadWrite<'a> {
    fn create_comment(&self, comment: &Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn update_comment(&self, comment: &Comment) -> Result<()> {
        update_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn delete_comment(&self, id: &str) -> Result<()> {
        delete_comment(&mut self.conn.borrow_mut(), id)
    }
    fn get_comment(&self, id: &str) -> Result<Comment> {
        get_comment(&mut self.conn.borrow_mut(), id)
    }
    fn query_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>> {
        query_comments(&mut self.conn.borrow_mut(), query)
    }
}

impl<'a> CommentRepo for DbConnection<'a> {
    fn create_comment(&self, comment: &Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn update_comment(&self, comment: &Comment) -> Result<()> {
        update_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn delete_comment(&self, id: &str) -> Result<()> {
        delete_comment(&mut self.conn.borrow_mut(), id)
    }
    fn get_comment(&self, id: &str) -> Result<Comment> {
        get_comment(&mut self.conn.borrow_mut(), id)
    }
    fn query_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>> {
        query_comments(&mut self.conn.borrow_mut(), query)
    }
}

impl<'a> CommentRepo for DbReadOnly<'a> {
    fn create_comment(&self, _comment: &Comment) -> Result<()> {
        unreachable!();
    }
    fn update_comment(&self, _comment: &Comment) -> Result<()> {
        unreachable!();
    }
    fn delete_comment(&self, _id: &str) -> Result<()> {
        unreachable!();
    }
    fn get_comment(&self, id: &str) -> Result<Comment> {
        get_comment(&mut self.conn.borrow_mut(), id)
    }
    fn query_comments(&self, query: &CommentQuery) -> Result<Vec<Comment>> {
        query_comments(&mut self.conn.borrow_mut(), query)
    }
}

fn create_comment(conn: &mut SqliteConnection, comment: &Comment) -> Result<()> {
    let new_comment = models::NewComment {
        id: comment.id.as_str(),
        place_id: comment.place_id.as_str(),
        user_id: comment.user_id.as_str(),
        text: &comment.text,
        status: comment.moderation.status.into(),
        rejection_reason: comment.moderation.rejection_reason.as_deref(),
        created_at: comment.created_at.as_millis(),
        updated_at: comment.updated_at.as_millis(),
    };
    let _count = diesel::insert_into(schema::comments::table)
        .values(&new_comment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn update_comment(conn: &mut SqliteConnection, comment: &Comment) -> Result<()> {
    use schema::comments::dsl;
    let changeset = models::CommentChangeset {
        text: &comment.text,
        status: comment.moderation.status.into(),
        rejection_reason: comment.moderation.rejection_reason.as_deref(),
        updated_at: comment.updated_at.as_millis(),
    };
    let count = diesel::update(dsl::comments.filter(dsl::id.eq(comment.id.as_str())))
        .set(&changeset)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn delete_comment(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::comments::dsl;
    let count = diesel::delete(dsl::comments.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_comment(conn: &mut SqliteConnection, id: &str) -> Result<Comment> {
    use schema::comments::dsl;
    let row = dsl::comments
        .filter(dsl::id.eq(id))
        .first::<models::CommentEntity>(conn)
        .map_err(from_diesel_err)?;
    load_comment(row)
}

fn query_comments(conn: &mut SqliteConnection, query: &CommentQuery) -> Result<Vec<Comment>> {
    use schema::comments::dsl;

    if query.status.is_empty() {
        return Ok(vec![]);
    }
    let mut sql = dsl::comments
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

    use SortDirection as D;
    sql = match (query.order.field, query.order.direction) {
        (CommentSortField::CreatedAt, D::Ascending) => sql.order_by(dsl::created_at.asc()),
        (CommentSortField::CreatedAt, D::Descending) => sql.order_by(dsl::created_at.desc()),
        (CommentSortField::UpdatedAt, D::Ascending) => sql.order_by(dsl::updated_at.asc()),
        (CommentSortField::UpdatedAt, D::Descending) => sql.order_by(dsl::updated_at.desc()),
    };
    sql = sql.then_order_by(dsl::id.asc());

    if let Some((limit, offset)) = limit_and_offset(&query.pagination) {
        sql = sql.limit(limit).offset(offset);
    }

    sql.load::<models::CommentEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_comment)
        .collect()
}
