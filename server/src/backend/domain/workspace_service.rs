//! Walk-in workspace sessions: hourly-billed check-ins and check-outs.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::backend::domain::commands::workspace::{CheckInCommand, CheckOutOutcome, WorkspaceDay};
use crate::backend::domain::error::DomainResult;
use crate::backend::domain::ledger::session_cost;
use crate::backend::domain::models::WorkspaceSession;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct WorkspaceService {
    store: Store,
}

impl WorkspaceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<WorkspaceSession> {
        self.store.read(|document| document.workspace.clone())
    }

    /// Sessions booked under one day, with the billed total for that day.
    /// Open sessions are listed but bill zero.
    pub fn list_day(&self, date: NaiveDate) -> WorkspaceDay {
        self.store.read(|document| {
            let sessions: Vec<WorkspaceSession> = document
                .workspace
                .iter()
                .filter(|w| w.date == date)
                .cloned()
                .collect();
            let day_total = sessions
                .iter()
                .map(|s| session_cost(s, document.settings.hourly_rate))
                .sum();
            WorkspaceDay {
                date,
                sessions,
                day_total,
            }
        })
    }

    /// Open a session: check-in at now, booked under the given day or today.
    pub fn check_in(&self, command: CheckInCommand) -> DomainResult<WorkspaceSession> {
        let session = WorkspaceSession {
            id: Store::next_id(),
            date: command
                .date
                .unwrap_or_else(|| Store::now().date_naive()),
            person_name: command.person_name.trim().to_string(),
            check_in_at: Store::now(),
            check_out_at: None,
        };
        self.store
            .mutate(|document| document.workspace.push(session.clone()))?;
        info!("checked in {} ({})", session.person_name, session.id);
        Ok(session)
    }

    /// Close a session and report its billed cost at the current hourly
    /// rate. Unknown ids are a silent no-op. Checking out an already-closed
    /// session keeps the original check-out instant instead of overwriting
    /// it with a later one.
    pub fn check_out(&self, session_id: &str) -> DomainResult<Option<CheckOutOutcome>> {
        let outcome = self.store.mutate(|document| {
            let hourly_rate = document.settings.hourly_rate;
            let session = document.workspace.iter_mut().find(|w| w.id == session_id)?;
            if session.is_open() {
                session.check_out_at = Some(Store::now());
            } else {
                warn!(
                    "check-out for already-closed session {} ignored",
                    session_id
                );
            }
            let session = session.clone();
            let cost = session_cost(&session, hourly_rate);
            Some(CheckOutOutcome { session, cost })
        })?;
        if outcome.is_none() {
            debug!("check-out for unknown session {} ignored", session_id);
        }
        Ok(outcome)
    }

    /// Remove a session. Unknown ids are a silent no-op.
    pub fn delete(&self, session_id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.workspace.len();
            document.workspace.retain(|w| w.id != session_id);
            if document.workspace.len() == before {
                debug!("delete for unknown session {} ignored", session_id);
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryConnection;

    fn setup() -> (WorkspaceService, Store) {
        let store = Store::open(MemoryConnection::new()).unwrap();
        (WorkspaceService::new(store.clone()), store)
    }

    fn check_in(service: &WorkspaceService, name: &str) -> WorkspaceSession {
        service
            .check_in(CheckInCommand {
                person_name: name.to_string(),
                date: None,
            })
            .unwrap()
    }

    #[test]
    fn test_check_in_opens_a_session_for_today() {
        let (service, _) = setup();
        let session = check_in(&service, "Omar Khalid");
        assert!(session.is_open());
        assert_eq!(session.date, Store::now().date_naive());
    }

    #[test]
    fn test_check_in_can_book_a_specific_day() {
        let (service, _) = setup();
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let session = service
            .check_in(CheckInCommand {
                person_name: "Laila Mahmoud".to_string(),
                date: Some(day),
            })
            .unwrap();
        assert_eq!(session.date, day);
        assert_eq!(service.list_day(day).sessions.len(), 1);
    }

    #[test]
    fn test_check_out_closes_and_bills_the_session() {
        let (service, _) = setup();
        let session = check_in(&service, "Zaid Amari");
        let outcome = service.check_out(&session.id).unwrap().unwrap();
        assert!(!outcome.session.is_open());
        // Checked in and out within the same test run: zero billable minutes.
        assert_eq!(outcome.cost, 0.0);
    }

    #[test]
    fn test_second_check_out_keeps_the_original_instant() {
        let (service, store) = setup();
        let session = check_in(&service, "Guest User 1");
        let first = service.check_out(&session.id).unwrap().unwrap();
        let second = service.check_out(&session.id).unwrap().unwrap();
        assert_eq!(
            first.session.check_out_at,
            second.session.check_out_at
        );
        store.read(|document| {
            assert_eq!(
                document.workspace[0].check_out_at,
                first.session.check_out_at
            );
        });
    }

    #[test]
    fn test_check_out_unknown_session_is_a_silent_noop() {
        let (service, _) = setup();
        assert!(service.check_out("missing").unwrap().is_none());
    }

    #[test]
    fn test_open_sessions_bill_zero_in_the_day_total() {
        let (service, store) = setup();
        let day = Store::now().date_naive();
        let open = check_in(&service, "Open Visitor");
        let closed = check_in(&service, "Closed Visitor");
        service.check_out(&closed.id).unwrap();

        // Stretch the closed session to 45 minutes at a 20/h rate.
        store
            .mutate(|document| {
                let session = document
                    .workspace
                    .iter_mut()
                    .find(|w| w.id == closed.id)
                    .unwrap();
                session.check_out_at =
                    Some(session.check_in_at + chrono::Duration::minutes(45));
                document.settings.hourly_rate = 20.0;
            })
            .unwrap();

        let listed = service.list_day(day);
        assert_eq!(listed.sessions.len(), 2);
        assert_eq!(listed.day_total, 15.0);
        assert!(listed.sessions.iter().any(|s| s.id == open.id));
    }
}
