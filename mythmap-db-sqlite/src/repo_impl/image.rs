use super::*;

impl<'a> ImageRepo for DbReadWrite<'a> {
    fn create_image(&self, image: &Image) -> Result<()> {
        create_image(&mut self.conn.borrow_mut(), image)
    }
    fn delete_image(&self, id: &str) -> Result<()> {
        delete_image(&mut self.conn.borrow_mut(), id)
    }
    fn get_image(&self, id: &str) -> Result<Image> {
        get_image(&mut self.conn.borrow_mut(), id)
    }
    fn load_images(&self, parent: &ImageParent) -> Result<Vec<Image>> {
        load_images(&mut self.conn.borrow_mut(), parent)
    }
}

impl<'a> ImageRepo for DbConnection<'a> {
    fn create_image(&self, image: &Image) -> Result<()> {
        create_image(&mut self.conn.borrow_mut(), image)
    }
    fn delete_image(&self, id: &str) -> Result<()> {
        delete_image(&mut self.conn.borrow_mut(), id)
    }
    fn get_image(&self, id: &str) -> Result<Image> {
        get_image(&mut self.conn.borrow_mut(), id)
    }
    fn load_images(&self, parent: &ImageParent) -> Result<Vec<Image>> {
        load_images(&mut self.conn.borrow_mut(), parent)
    }
}

impl<'a> ImageRepo for DbReadOnly<'a> {
    fn create_image(&self, _image: &Image) -> Result<()> {
        unreachable!();
    }
    fn delete_image(&self, _id: &str) -> Result<()> {
        unreachable!();
    }
    fn get_image(&self, id: &str) -> Result<Image> {
        get_image(&mut self.conn.borrow_mut(), id)
    }
    fn load_images(&self, parent: &ImageParent) -> Result<Vec<Image>> {
        load_images(&mut self.conn.borrow_mut(), parent)
    }
}

fn load_image(row: models::ImageEntity, parent: fn(Id) -> ImageParent) -> Image {
    let models::ImageEntity {
        id,
        parent_id,
        file_name,
        content_type,
        created_at,
    } = row;
    Image {
        id: id.into(),
        parent: parent(parent_id.into()),
        file_name,
        content_type,
        created_at: Timestamp::from_millis(created_at),
    }
}

fn create_image(conn: &mut SqliteConnection, image: &Image) -> Result<()> {
    let _count = match &image.parent {
        ImageParent::Place(place_id) => diesel::insert_into(schema::place_images::table)
            .values(&models::NewPlaceImage {
                id: image.id.as_str(),
                place_id: place_id.as_str(),
                file_name: &image.file_name,
                content_type: &image.content_type,
                created_at: image.created_at.as_millis(),
            })
            .execute(conn),
        ImageParent::Note(note_id) => diesel::insert_into(schema::note_images::table)
            .values(&models::NewNoteImage {
                id: image.id.as_str(),
                note_id: note_id.as_str(),
                file_name: &image.file_name,
                content_type: &image.content_type,
                created_at: image.created_at.as_millis(),
            })
            .execute(conn),
    }
    .map_err(from_diesel_err)?;
    debug_assert_eq!(1, _count);
    Ok(())
}

fn delete_image(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::{note_images::dsl as n_dsl, place_images::dsl as p_dsl};
    let mut count = diesel::delete(p_dsl::place_images.filter(p_dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        count = diesel::delete(n_dsl::note_images.filter(n_dsl::id.eq(id)))
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_image(conn: &mut SqliteConnection, id: &str) -> Result<Image> {
    use schema::{note_images::dsl as n_dsl, place_images::dsl as p_dsl};
    if let Some(row) = p_dsl::place_images
        .filter(p_dsl::id.eq(id))
        .first::<models::ImageEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
    {
        return Ok(load_image(row, ImageParent::Place));
    }
    let row = n_dsl::note_images
        .filter(n_dsl::id.eq(id))
        .first::<models::ImageEntity>(conn)
        .map_err(from_diesel_err)?;
    Ok(load_image(row, ImageParent::Note))
}

fn load_images(conn: &mut SqliteConnection, parent: &ImageParent) -> Result<Vec<Image>> {
    use schema::{note_images::dsl as n_dsl, place_images::dsl as p_dsl};
    let images = match parent {
        ImageParent::Place(place_id) => p_dsl::place_images
            .filter(p_dsl::place_id.eq(place_id.as_str()))
            .order_by((p_dsl::created_at, p_dsl::id))
            .load::<models::ImageEntity>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .map(|row| load_image(row, ImageParent::Place))
            .collect(),
        ImageParent::Note(note_id) => n_dsl::note_images
            .filter(n_dsl::note_id.eq(note_id.as_str()))
            .order_by((n_dsl::created_at, n_dsl::id))
            .load::<models::ImageEntity>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .map(|row| load_image(row, ImageParent::Note))
            .collect(),
    };
    Ok(images)
}
