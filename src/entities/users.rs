use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    /// Unique when present; SQLite permits multiple NULLs under the index.
    #[sea_orm(unique)]
    pub email: Option<String>,

    /// Argon2id password hash
    pub password_hash: String,

    /// "admin" or "user"
    pub role: String,

    /// Forces password rotation on first login for seeded accounts.
    pub must_change_password: bool,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ipo_applications::Entity")]
    IpoApplications,
}

impl Related<super::ipo_applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IpoApplications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
