//! Domain model for IPO applications. Append-only: there is no update or
//! delete path anywhere in the system.

#[derive(Debug, Clone, PartialEq)]
pub struct IpoApplication {
    pub id: String,
    pub ipo_id: String,
    pub user_id: String,
    pub shares: i32,
    pub amount: f64,
    pub applied_at: String,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub ipo_id: String,
    pub user_id: String,
    pub shares: i32,
    pub amount: f64,
}
