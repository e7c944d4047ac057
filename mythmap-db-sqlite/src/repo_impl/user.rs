use super::*;

impl<'a> UserRepo for DbReadOnly<'a> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>> {
        get_users(&mut self.conn.borrow_mut(), ids)
    }
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbReadWrite<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>> {
        get_users(&mut self.conn.borrow_mut(), ids)
    }
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn get_users(&self, ids: &[&str]) -> Result<Vec<User>> {
        get_users(&mut self.conn.borrow_mut(), ids)
    }
    fn try_get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        try_get_user_by_username(&mut self.conn.borrow_mut(), username)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

fn new_user(u: &User) -> models::NewUser<'_> {
    models::NewUser {
        id: u.id.as_str(),
        username: &u.username,
        email: u.email.as_deref(),
        password: u.password.as_ref(),
        role: u.role.to_i16().unwrap_or_default(),
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    diesel::insert_into(schema::users::table)
        .values(&new_user(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::update(dsl::users.filter(dsl::id.eq(u.id.as_str())))
        .set(&new_user(u))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &str) -> Result<User> {
    use schema::users::dsl;
    let row = dsl::users
        .filter(dsl::id.eq(id))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    load_user(row)
}

fn get_users(conn: &mut SqliteConnection, ids: &[&str]) -> Result<Vec<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::id.eq_any(ids))
        .load::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_user)
        .collect()
}

fn try_get_user_by_username(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::username.eq(username))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_user)
        .transpose()
}

fn count_users(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::users::dsl;
    Ok(dsl::users
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
