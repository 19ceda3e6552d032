use crate::domain::stats::TicketStats;
use crate::error::AppResult;
use crate::services::TicketStore;

#[derive(Debug, Clone, PartialEq)]
pub enum StatsState {
    Loading,
    Loaded(TicketStats),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

/// Aggregate counters shown above the ticket list.
#[derive(Debug)]
pub struct StatsPanel {
    state: StatsState,
    issued: u64,
    applied: u64,
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self {
            state: StatsState::Loading,
            issued: 0,
            applied: 0,
        }
    }
}

impl StatsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StatsState {
        &self.state
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// A failed or stale fetch keeps whatever is on screen.
    pub fn apply_fetch(&mut self, seq: u64, result: AppResult<TicketStats>) {
        if seq <= self.applied {
            return;
        }
        match result {
            Ok(stats) => {
                self.applied = seq;
                self.state = StatsState::Loaded(stats);
            }
            Err(err) => tracing::warn!(error = %err, "failed to load ticket stats"),
        }
    }

    /// Fetches and applies a snapshot. A failure keeps the current state and
    /// is handed back to the caller.
    pub async fn refresh(&mut self, store: &dyn TicketStore) -> AppResult<()> {
        let seq = self.begin_fetch();
        let stats = store.stats().await?;
        self.apply_fetch(seq, Ok(stats));
        Ok(())
    }

    pub fn cards(&self) -> Option<Vec<StatCard>> {
        let StatsState::Loaded(stats) = &self.state else {
            return None;
        };
        Some(vec![
            StatCard {
                title: "Total Tickets",
                value: stats.total_tickets.to_string(),
            },
            StatCard {
                title: "Open Issues",
                value: stats.open_tickets.to_string(),
            },
            StatCard {
                title: "Avg Per Day",
                value: stats.avg_tickets_per_day.to_string(),
            },
            StatCard {
                title: "Critical",
                value: stats.critical().to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::{FakeTicketService, server_error};
    use std::collections::BTreeMap;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn critical_card_defaults_to_zero() {
        let service = FakeTicketService::default();
        service.set_stats(TicketStats {
            total_tickets: 10,
            open_tickets: 3,
            avg_tickets_per_day: 2.0,
            priority_breakdown: BTreeMap::new(),
            category_breakdown: BTreeMap::new(),
        });
        let mut panel = StatsPanel::new();
        assert!(panel.cards().is_none());

        panel.refresh(&service).await.unwrap();

        let values: Vec<(&str, String)> = panel
            .cards()
            .unwrap()
            .into_iter()
            .map(|card| (card.title, card.value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Total Tickets", "10".to_string()),
                ("Open Issues", "3".to_string()),
                ("Avg Per Day", "2".to_string()),
                ("Critical", "0".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failure_keeps_previous_snapshot() {
        let service = FakeTicketService::default();
        let mut panel = StatsPanel::new();
        service.fail_stats.store(true, Ordering::SeqCst);
        assert!(panel.refresh(&service).await.is_err());
        assert_eq!(panel.state(), &StatsState::Loading);

        service.fail_stats.store(false, Ordering::SeqCst);
        panel.refresh(&service).await.unwrap();
        let loaded = panel.state().clone();

        service.fail_stats.store(true, Ordering::SeqCst);
        assert!(panel.refresh(&service).await.is_err());
        assert_eq!(panel.state(), &loaded);
    }

    #[test]
    fn stale_stats_are_ignored() {
        let mut panel = StatsPanel::new();
        let older = panel.begin_fetch();
        let newer = panel.begin_fetch();
        panel.apply_fetch(
            newer,
            Ok(TicketStats {
                total_tickets: 5,
                ..TicketStats::default()
            }),
        );
        panel.apply_fetch(older, Ok(TicketStats::default()));
        panel.apply_fetch(older + 10, Err(server_error()));

        match panel.state() {
            StatsState::Loaded(stats) => assert_eq!(stats.total_tickets, 5),
            StatsState::Loading => panic!("stats should be loaded"),
        }
    }
}
