use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub preferred_theme: Option<String>,
    pub experience_level: Option<String>,
    pub technical_skills: Option<String>,
    pub motivation: Option<String>,
    pub linkedin_post_link: Option<String>,
    pub linkedin_post_screenshot_url: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
