use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{ipo_applications, prelude::*};
use crate::models::{IpoApplication, NewApplication};

fn map_model(model: ipo_applications::Model) -> IpoApplication {
    IpoApplication {
        id: model.id,
        ipo_id: model.ipo_id,
        user_id: model.user_id,
        shares: model.shares,
        amount: model.amount,
        applied_at: model.applied_at,
    }
}

pub struct ApplicationRepository {
    conn: DatabaseConnection,
}

impl ApplicationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Appends an application row. There is no update or delete path.
    pub async fn create(&self, new: &NewApplication) -> Result<IpoApplication> {
        let model = ipo_applications::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            ipo_id: Set(new.ipo_id.clone()),
            user_id: Set(new.user_id.clone()),
            shares: Set(new.shares),
            amount: Set(new.amount),
            applied_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let inserted = model
            .insert(&self.conn)
            .await
            .context("Failed to insert IPO application")?;

        Ok(map_model(inserted))
    }

    pub async fn for_user(&self, user_id: &str) -> Result<Vec<IpoApplication>> {
        let rows = IpoApplications::find()
            .filter(ipo_applications::Column::UserId.eq(user_id))
            .order_by_desc(ipo_applications::Column::AppliedAt)
            .all(&self.conn)
            .await
            .context("Failed to list applications for user")?;

        Ok(rows.into_iter().map(map_model).collect())
    }

    pub async fn for_ipo(&self, ipo_id: &str) -> Result<Vec<IpoApplication>> {
        let rows = IpoApplications::find()
            .filter(ipo_applications::Column::IpoId.eq(ipo_id))
            .order_by_desc(ipo_applications::Column::AppliedAt)
            .all(&self.conn)
            .await
            .context("Failed to list applications for IPO")?;

        Ok(rows.into_iter().map(map_model).collect())
    }
}
