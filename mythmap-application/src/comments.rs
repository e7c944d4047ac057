use super::*;

pub fn create_comment(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    new_comment: usecases::NewComment,
) -> Result<Comment> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::create_comment(conn, requester, new_comment).map_err(|err| {
            warn!("Failed to create comment: {}", err);
            err
        })
    })?)
}

pub fn update_comment(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
    text: Option<String>,
) -> Result<Comment> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::update_comment(conn, requester, id, text).map_err(|err| {
            warn!("Failed to update comment {}: {}", id, err);
            err
        })
    })?)
}

pub fn delete_comment(
    connections: &sqlite::Connections,
    requester: Option<&User>,
    id: &str,
) -> Result<()> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_comment(conn, requester, id).map_err(|err| {
            warn!("Failed to delete comment {}: {}", id, err);
            err
        })
    })?)
}
