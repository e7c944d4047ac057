use super::*;

impl<'a> AuthTokenRepo for DbReadWrite<'a> {
    fn create_auth_token(&self, token: &AuthToken) -> Result<()> {
        create_auth_token(&mut self.conn.borrow_mut(), token)
    }
    fn get_auth_token(&self, key: &str) -> Result<AuthToken> {
        get_auth_token(&mut self.conn.borrow_mut(), key)
    }
    fn try_get_auth_token_of_user(&self, user_id: &str) -> Result<Option<AuthToken>> {
        try_get_auth_token_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn delete_auth_tokens_of_user(&self, user_id: &str) -> Result<usize> {
        delete_auth_tokens_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> AuthTokenRepo for DbConnection<'a> {
    fn create_auth_token(&self, token: &AuthToken) -> Result<()> {
        create_auth_token(&mut self.conn.borrow_mut(), token)
    }
    fn get_auth_token(&self, key: &str) -> Result<AuthToken> {
        get_auth_token(&mut self.conn.borrow_mut(), key)
    }
    fn try_get_auth_token_of_user(&self, user_id: &str) -> Result<Option<AuthToken>> {
        try_get_auth_token_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn delete_auth_tokens_of_user(&self, user_id: &str) -> Result<usize> {
        delete_auth_tokens_of_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> AuthTokenRepo for DbReadOnly<'a> {
    fn create_auth_token(&self, _token: &AuthToken) -> Result<()> {
        unreachable!();
    }
    fn get_auth_token(&self, key: &str) -> Result<AuthToken> {
        get_auth_token(&mut self.conn.borrow_mut(), key)
    }
    fn try_get_auth_token_of_user(&self, user_id: &str) -> Result<Option<AuthToken>> {
        try_get_auth_token_of_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn delete_auth_tokens_of_user(&self, _user_id: &str) -> Result<usize> {
        unreachable!();
    }
}

fn load_auth_token(row: models::AuthTokenEntity) -> AuthToken {
    let models::AuthTokenEntity {
        token,
        user_id,
        created_at,
    } = row;
    AuthToken {
        key: token,
        user_id: user_id.into(),
        created_at: Timestamp::from_millis(created_at),
    }
}

fn create_auth_token(conn: &mut SqliteConnection, token: &AuthToken) -> Result<()> {
    let model = models::AuthTokenEntity {
        token: token.key.clone(),
        user_id: token.user_id.to_string(),
        created_at: token.created_at.as_millis(),
    };
    let _count = diesel::insert_into(schema::auth_tokens::table)
        .values(&model)
        .execute(conn)
        .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn get_auth_token(conn: &mut SqliteConnection, key: &str) -> Result<AuthToken> {
    use schema::auth_tokens::dsl;
    Ok(load_auth_token(
        dsl::auth_tokens
            .filter(dsl::token.eq(key))
            .first::<models::AuthTokenEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn try_get_auth_token_of_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<AuthToken>> {
    use schema::auth_tokens::dsl;
    Ok(dsl::auth_tokens
        .filter(dsl::user_id.eq(user_id))
        .first::<models::AuthTokenEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_auth_token))
}

fn delete_auth_tokens_of_user(conn: &mut SqliteConnection, user_id: &str) -> Result<usize> {
    use schema::auth_tokens::dsl;
    diesel::delete(dsl::auth_tokens.filter(dsl::user_id.eq(user_id)))
        .execute(conn)
        .map_err(from_diesel_err)
}
