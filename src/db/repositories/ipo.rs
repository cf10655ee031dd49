use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;

use crate::entities::{ipos, prelude::*};
use crate::models::{Ipo, IpoDraft, IpoPatch, IpoStatus, IssueType, ListFilter, StatusCounts};

fn map_model(model: ipos::Model) -> Result<Ipo> {
    let status: IpoStatus = model
        .status
        .parse()
        .with_context(|| format!("Corrupt status for IPO {}", model.id))?;

    let issue_type = model
        .issue_type
        .as_deref()
        .map(str::parse::<IssueType>)
        .transpose()
        .with_context(|| format!("Corrupt issue type for IPO {}", model.id))?;

    Ok(Ipo {
        id: model.id,
        company_name: model.company_name,
        sector: model.sector,
        logo_url: model.logo_url,
        logo_initials: model.logo_initials,
        logo_color: model.logo_color,
        price_band: model.price_band,
        min_price: model.min_price,
        max_price: model.max_price,
        lot_size: model.lot_size,
        issue_size: model.issue_size,
        issue_type,
        open_date: model.open_date,
        close_date: model.close_date,
        listing_date: model.listing_date,
        status,
        description: model.description,
        ipo_price: model.ipo_price,
        listing_price: model.listing_price,
        listing_gain: model.listing_gain,
        current_price: model.current_price,
        current_return: model.current_return,
        rhp_link: model.rhp_link,
        drhp_link: model.drhp_link,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub struct IpoRepository {
    conn: DatabaseConnection,
}

impl IpoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a new record. Id and both timestamps are assigned here,
    /// never taken from the caller.
    pub async fn create(&self, draft: &IpoDraft) -> Result<Ipo> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = ipos::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            company_name: Set(draft.company_name.clone()),
            sector: Set(draft.sector.clone()),
            logo_url: Set(draft.logo_url.clone()),
            logo_initials: Set(draft.logo_initials.clone()),
            logo_color: Set(draft.logo_color.clone()),
            price_band: Set(draft.price_band.clone()),
            min_price: Set(draft.min_price),
            max_price: Set(draft.max_price),
            lot_size: Set(draft.lot_size),
            issue_size: Set(draft.issue_size.clone()),
            issue_type: Set(draft.issue_type.map(|t| t.to_string())),
            open_date: Set(draft.open_date.clone()),
            close_date: Set(draft.close_date.clone()),
            listing_date: Set(draft.listing_date.clone()),
            status: Set(draft.status.to_string()),
            description: Set(draft.description.clone()),
            ipo_price: Set(draft.ipo_price),
            listing_price: Set(draft.listing_price),
            listing_gain: Set(draft.listing_gain.clone()),
            current_price: Set(draft.current_price),
            current_return: Set(draft.current_return.clone()),
            rhp_link: Set(draft.rhp_link.clone()),
            drhp_link: Set(draft.drhp_link.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(&self.conn)
            .await
            .context("Failed to insert IPO")?;

        info!("Added IPO: {}", inserted.company_name);
        map_model(inserted)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Ipo>> {
        let model = Ipos::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query IPO by id")?;

        model.map(map_model).transpose()
    }

    /// Applies a partial update. Returns `None` when the id is absent.
    /// `updated_at` always advances, whatever the caller supplied.
    pub async fn update(&self, id: &str, patch: &IpoPatch) -> Result<Option<Ipo>> {
        let Some(existing) = Ipos::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query IPO for update")?
        else {
            return Ok(None);
        };

        let mut active: ipos::ActiveModel = existing.into();

        if let Some(company_name) = &patch.company_name {
            active.company_name = Set(company_name.clone());
        }
        if let Some(sector) = &patch.sector {
            active.sector = Set(sector.clone());
        }
        if let Some(logo_url) = &patch.logo_url {
            active.logo_url = Set(logo_url.clone());
        }
        if let Some(logo_initials) = &patch.logo_initials {
            active.logo_initials = Set(logo_initials.clone());
        }
        if let Some(logo_color) = &patch.logo_color {
            active.logo_color = Set(logo_color.clone());
        }
        if let Some(price_band) = &patch.price_band {
            active.price_band = Set(price_band.clone());
        }
        if let Some(min_price) = patch.min_price {
            active.min_price = Set(min_price);
        }
        if let Some(max_price) = patch.max_price {
            active.max_price = Set(max_price);
        }
        if let Some(lot_size) = patch.lot_size {
            active.lot_size = Set(lot_size);
        }
        if let Some(issue_size) = &patch.issue_size {
            active.issue_size = Set(issue_size.clone());
        }
        if let Some(issue_type) = patch.issue_type {
            active.issue_type = Set(issue_type.map(|t| t.to_string()));
        }
        if let Some(open_date) = &patch.open_date {
            active.open_date = Set(open_date.clone());
        }
        if let Some(close_date) = &patch.close_date {
            active.close_date = Set(close_date.clone());
        }
        if let Some(listing_date) = &patch.listing_date {
            active.listing_date = Set(listing_date.clone());
        }
        if let Some(status) = patch.status {
            active.status = Set(status.to_string());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(ipo_price) = patch.ipo_price {
            active.ipo_price = Set(ipo_price);
        }
        if let Some(listing_price) = patch.listing_price {
            active.listing_price = Set(listing_price);
        }
        if let Some(listing_gain) = &patch.listing_gain {
            active.listing_gain = Set(listing_gain.clone());
        }
        if let Some(current_price) = patch.current_price {
            active.current_price = Set(current_price);
        }
        if let Some(current_return) = &patch.current_return {
            active.current_return = Set(current_return.clone());
        }
        if let Some(rhp_link) = &patch.rhp_link {
            active.rhp_link = Set(rhp_link.clone());
        }
        if let Some(drhp_link) = &patch.drhp_link {
            active.drhp_link = Set(drhp_link.clone());
        }

        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update IPO")?;

        map_model(updated).map(Some)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Ipos::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete IPO")?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed IPO with id: {}", id);
        }
        Ok(removed)
    }

    /// Lists records, newest first, optionally narrowed by status and sector.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Ipo>> {
        let mut query = Ipos::find();

        if let Some(status) = filter.status {
            query = query.filter(ipos::Column::Status.eq(status.as_str()));
        }
        if let Some(sector) = &filter.sector {
            query = query.filter(ipos::Column::Sector.eq(sector.as_str()));
        }

        let rows = query
            .order_by_desc(ipos::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list IPOs")?;

        rows.into_iter().map(map_model).collect()
    }

    /// Case-insensitive substring match over company name, issue type,
    /// status, and sector. SQLite's LIKE is case-insensitive for ASCII.
    pub async fn search(&self, text: &str) -> Result<Vec<Ipo>> {
        let rows = Ipos::find()
            .filter(
                Condition::any()
                    .add(ipos::Column::CompanyName.contains(text))
                    .add(ipos::Column::IssueType.contains(text))
                    .add(ipos::Column::Status.contains(text))
                    .add(ipos::Column::Sector.contains(text)),
            )
            .order_by_desc(ipos::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to search IPOs")?;

        rows.into_iter().map(map_model).collect()
    }

    pub async fn count_by_status(&self) -> Result<StatusCounts> {
        let rows: Vec<(String, i64)> = Ipos::find()
            .select_only()
            .column(ipos::Column::Status)
            .column_as(ipos::Column::Id.count(), "count")
            .group_by(ipos::Column::Status)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to count IPOs by status")?;

        let mut counts = StatusCounts::default();
        for (status, count) in rows {
            counts.total += count;
            match status.parse::<IpoStatus>() {
                Ok(IpoStatus::Upcoming) => counts.upcoming += count,
                Ok(IpoStatus::Ongoing) => counts.ongoing += count,
                Ok(IpoStatus::Listed) => counts.listed += count,
                Ok(IpoStatus::Closed) => counts.closed += count,
                Err(_) => {}
            }
        }

        Ok(counts)
    }
}
