use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Separator used to pack the tag list into the `tags` column.
pub const TAG_DELIMITER: char = ',';

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location_country: String,
    pub location_city: String,
    pub salary_range: Option<String>,
    pub tags: Option<String>,
    pub posted_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn tag_list(&self) -> Vec<String> {
        split_tags(self.tags.as_deref())
    }
}

/// Column values written by create and by a full replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobFields {
    pub title: String,
    pub company: String,
    pub location_country: String,
    pub location_city: String,
    pub salary_range: Option<String>,
    pub tags: Vec<String>,
}

/// Pack tags into the stored representation. An empty list is stored as NULL.
///
/// Only lossless for tags that do not themselves contain the delimiter; such a
/// tag comes back split at each delimiter.
pub fn join_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    let mut buf = String::new();
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            buf.push(TAG_DELIMITER);
        }
        buf.push_str(tag);
    }
    Some(buf)
}

/// Unpack the stored representation. NULL and the empty string both yield no tags.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) if !s.is_empty() => s.split(TAG_DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

pub async fn create(
    db: &DatabaseConnection,
    fields: JobFields,
    posted_time: DateTime<Utc>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        title: Set(fields.title),
        company: Set(fields.company),
        location_country: Set(fields.location_country),
        location_city: Set(fields.location_city),
        salary_range: Set(fields.salary_range),
        tags: Set(join_tags(&fields.tags)),
        posted_time: Set(posted_time.into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every mutable column of an existing row. `posted_time` is left as is.
/// Returns `None` when no row has this id.
pub async fn replace(
    db: &DatabaseConnection,
    id: i32,
    fields: JobFields,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(existing) = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
    else {
        return Ok(None);
    };
    let mut am: ActiveModel = existing.into();
    am.title = Set(fields.title);
    am.company = Set(fields.company);
    am.location_country = Set(fields.location_country);
    am.location_city = Set(fields.location_city);
    am.salary_range = Set(fields.salary_range);
    am.tags = Set(join_tags(&fields.tags));
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}
