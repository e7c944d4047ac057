use super::*;

pub fn create_user(
    connections: &sqlite::Connections,
    new_user: usecases::NewUser,
) -> Result<User> {
    let username = new_user.username.clone();
    let user = connections.exclusive()?.transaction(|conn| {
        usecases::create_new_user(conn, new_user).map_err(|err| {
            warn!("Failed to create user {}: {}", username, err);
            err
        })
    })?;
    info!("Created user {} with role {}", user.username, user.role);
    Ok(user)
}

pub fn register(
    connections: &sqlite::Connections,
    registration: usecases::Registration,
) -> Result<(User, AuthToken)> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::register(conn, registration).map_err(|err| {
            warn!("Failed to register user: {}", err);
            err
        })
    })?)
}

pub fn login(
    connections: &sqlite::Connections,
    credentials: &usecases::Credentials,
) -> Result<(User, AuthToken)> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::login(conn, credentials).map_err(|err| {
            debug!("Login of {} failed: {}", credentials.username, err);
            err
        })
    })?)
}

pub fn logout(connections: &sqlite::Connections, requester: Option<&User>) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::logout(conn, requester))?)
}

pub fn change_user_role(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    username: &str,
    role: Role,
) -> Result<User> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::change_user_role(conn, requester, username, role).map_err(|err| {
            warn!("Failed to change role for {}: {}", username, err);
            err
        })
    })?)
}
