use super::*;

#[post("/auth/register", format = "application/json", data = "<registration>")]
pub fn post_register(
    db: sqlite::Connections,
    registration: JsonResult<json::Registration>,
) -> CreatedResult<json::Registered> {
    let registration = from_json::registration(registration?.into_inner());
    let registered = flows::register(&db, registration)?;
    Ok((Status::Created, Json(registered.into())))
}

#[post("/auth/login", format = "application/json", data = "<login>")]
pub fn post_login(
    db: sqlite::Connections,
    login: JsonResult<json::Credentials>,
) -> Result<json::LoggedIn> {
    let login = login?.into_inner();
    let credentials = usecases::Credentials {
        username: &login.username,
        password: &login.password,
    };
    let logged_in = flows::login(&db, &credentials)?;
    Ok(Json(logged_in.into()))
}

#[post("/auth/logout")]
pub fn post_logout(db: sqlite::Connections, auth: Auth) -> Result<json::StatusMessage> {
    let account = auth.account(&db.shared()?)?;
    flows::logout(&db, Some(&account))?;
    Ok(Json(json::StatusMessage {
        status: "logged out".into(),
    }))
}

#[get("/auth/profile")]
pub fn get_profile(db: sqlite::Connections, auth: Auth) -> Result<json::Profile> {
    let account = auth.account(&db.shared()?)?;
    Ok(Json(account.into()))
}

#[patch("/users/<username>/role", format = "application/json", data = "<change>")]
pub fn patch_user_role(
    db: sqlite::Connections,
    auth: Auth,
    username: &str,
    change: JsonResult<json::RoleChange>,
) -> Result<json::Profile> {
    let role = Role::from(change?.into_inner().role);
    let requester = auth.user(&db.shared()?)?;
    let user = flows::change_user_role(&db, requester.as_ref(), username, role)?;
    Ok(Json(user.into()))
}
