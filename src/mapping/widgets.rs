//! Notice list and portfolio catalog mapping

use super::parse_order;
use super::youtube::youtube_video_id;
use crate::constants::{DEFAULT_ORDER, PORTFOLIO_CATEGORIES, columns};
use crate::models::{NoticeItem, PortfolioItem, Record};
use serde::Serialize;
use tracing::debug;

/// Map notice rows, dropping rows without a description and sorting by order
///
/// The sort is stable, so rows sharing an order keep their sheet order.
pub fn notices_from_records(records: &[Record]) -> Vec<NoticeItem> {
    let mut items: Vec<NoticeItem> = records
        .iter()
        .filter_map(|record| {
            let desc = record.field(columns::DESC).trim();
            if desc.is_empty() {
                return None;
            }
            let icon = record.field(columns::ICON).trim();
            Some(NoticeItem {
                // Blank or unparseable orders sort after every numbered notice
                order: parse_order(record.field(columns::ORDER), DEFAULT_ORDER),
                icon: (!icon.is_empty()).then(|| icon.to_string()),
                desc: desc.to_string(),
            })
        })
        .collect();

    items.sort_by(|a, b| a.order.total_cmp(&b.order));
    items
}

fn map_portfolio_item(record: &Record) -> Option<PortfolioItem> {
    let category = record.field(columns::CATEGORY).trim();
    let title = record.field(columns::TITLE).trim();
    let video_id = youtube_video_id(record.field(columns::YOUTUBE));
    if category.is_empty() || title.is_empty() || video_id.is_empty() {
        debug!("Dropping incomplete portfolio row: {:?}", record);
        return None;
    }

    // A zero order counts as unset, like a blank one
    let order = match parse_order(record.field(columns::ORDER), 0.0) {
        n if n == 0.0 => DEFAULT_ORDER,
        n => n,
    };

    Some(PortfolioItem {
        category: category.to_string(),
        order,
        title: title.to_string(),
        video_id,
        tags: record
            .field(columns::TAGS)
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    })
}

/// Map portfolio rows, keeping only rows with a category, title and video id
pub fn portfolio_from_records(records: &[Record]) -> Vec<PortfolioItem> {
    records.iter().filter_map(map_portfolio_item).collect()
}

/// Portfolio items grouped for tabbed display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PortfolioCatalog {
    items: Vec<PortfolioItem>,
}

impl PortfolioCatalog {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            items: portfolio_from_records(records),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one category, sorted by order
    pub fn by_category(&self, category: &str) -> Vec<&PortfolioItem> {
        let mut items: Vec<&PortfolioItem> = self
            .items
            .iter()
            .filter(|item| item.category == category)
            .collect();
        items.sort_by(|a, b| a.order.total_cmp(&b.order));
        items
    }

    /// Known categories in display order with their labels
    pub fn categories() -> impl Iterator<Item = (&'static str, &'static str)> {
        PORTFOLIO_CATEGORIES.iter().copied()
    }
}
