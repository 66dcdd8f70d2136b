//! `feed_preferences` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feed_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub feed_sort_method: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub preferred_tags: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub excluded_tags: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub preferred_communities: Json,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
