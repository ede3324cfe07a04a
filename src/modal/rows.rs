//! Rank to standings-row lookup
//!
//! Rows are indexed once per lookup. A row whose button group already names
//! its rank in `data-rank` is keyed by that; otherwise its position among the
//! table's rows is used, minus the configured header rows (1-based, so with
//! one header row rank `r` is row `r + 1`).

use std::collections::BTreeMap;

use crate::config::DeckEditorConfig;
use crate::dom::DeckPage;
use crate::models::Rank;

/// Button groups of the standings table keyed by rank
pub struct RowIndex<N> {
    groups: BTreeMap<Rank, N>,
}

impl<N: Clone> RowIndex<N> {
    pub fn build<P>(page: &P, config: &DeckEditorConfig) -> Self
    where
        P: DeckPage<Node = N>,
    {
        let mut groups = BTreeMap::new();

        for (index, row) in page.table_rows(&config.table_id).into_iter().enumerate() {
            let Some(group) = page.find_by_class(&row, &config.button_group_class) else {
                continue;
            };

            let tagged = page
                .first_attribute(&group, "data-rank")
                .and_then(|value| value.parse::<Rank>().ok());
            let positional = (index + 1)
                .checked_sub(config.header_rows)
                .filter(|r| *r > 0)
                .and_then(|r| u32::try_from(r).ok())
                .map(Rank);

            if let Some(rank) = tagged.or(positional) {
                groups.entry(rank).or_insert(group);
            }
        }

        log::debug!("row index: {} ranked rows in #{}", groups.len(), config.table_id);
        Self { groups }
    }

    pub fn get(&self, rank: Rank) -> Option<&N> {
        self.groups.get(&rank)
    }

    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
