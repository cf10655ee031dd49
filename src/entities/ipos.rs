use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ipos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub logo_url: Option<String>,
    pub logo_initials: Option<String>,
    pub logo_color: Option<String>,
    pub price_band: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub lot_size: Option<i32>,
    pub issue_size: Option<String>,
    pub issue_type: Option<String>,
    pub open_date: Option<String>,
    pub close_date: Option<String>,
    pub listing_date: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub ipo_price: Option<f64>,
    pub listing_price: Option<f64>,
    pub listing_gain: Option<String>,
    pub current_price: Option<f64>,
    pub current_return: Option<String>,
    pub rhp_link: Option<String>,
    pub drhp_link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
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
