//! Typed analytical accessors
//!
//! The fixed query surface over the record store: every method here is a thin
//! wrapper around the shared scan primitive in [`RecordStore`], grouped the
//! way callers think about them (IPs, users, dates, events).
//!
//! Results are sets: duplicates collapse and iteration order carries no
//! meaning. Date bounds are strictly exclusive, see
//! [`DateRange`](crate::store::DateRange).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::store::records::RecordStore;
use crate::store::types::{DateRange, Event, Status};

/// IP accessors
impl RecordStore {
    /// Distinct IPs seen within the range
    pub fn unique_ips(&self, range: &DateRange) -> HashSet<String> {
        self.select(range, |_| true, |r| r.ip.clone())
    }

    /// Number of distinct IPs seen within the range
    pub fn number_of_unique_ips(&self, range: &DateRange) -> usize {
        self.unique_ips(range).len()
    }

    /// Distinct IPs a user acted from
    pub fn ips_for_user(&self, user: &str, range: &DateRange) -> HashSet<String> {
        self.select(range, |r| r.user == user, |r| r.ip.clone())
    }

    /// Distinct IPs that produced a given event
    pub fn ips_for_event(&self, event: Event, range: &DateRange) -> HashSet<String> {
        self.select(range, |r| r.event == event, |r| r.ip.clone())
    }

    /// Distinct IPs that produced a given status
    pub fn ips_for_status(&self, status: Status, range: &DateRange) -> HashSet<String> {
        self.select(range, |r| r.status == status, |r| r.ip.clone())
    }
}

/// User accessors
impl RecordStore {
    /// Every user that appears anywhere in the store
    pub fn all_users(&self) -> HashSet<String> {
        self.select(&DateRange::unbounded(), |_| true, |r| r.user.clone())
    }

    /// Number of distinct users active within the range
    pub fn number_of_users(&self, range: &DateRange) -> usize {
        self.select(range, |_| true, |r| r.user.clone()).len()
    }

    /// Number of distinct event kinds a user produced within the range
    pub fn number_of_user_events(&self, user: &str, range: &DateRange) -> usize {
        self.select(range, |r| r.user == user, |r| r.event).len()
    }

    /// Distinct users that acted from an IP
    pub fn users_for_ip(&self, ip: &str, range: &DateRange) -> HashSet<String> {
        self.select(range, |r| r.ip == ip, |r| r.user.clone())
    }

    /// Distinct users that logged in
    pub fn logged_users(&self, range: &DateRange) -> HashSet<String> {
        self.users_for_event(Event::Login, range)
    }

    /// Distinct users that downloaded the plugin
    pub fn downloaded_plugin_users(&self, range: &DateRange) -> HashSet<String> {
        self.users_for_event(Event::DownloadPlugin, range)
    }

    /// Distinct users that wrote a message
    pub fn wrote_message_users(&self, range: &DateRange) -> HashSet<String> {
        self.users_for_event(Event::WriteMessage, range)
    }

    /// Distinct users that attempted any task
    pub fn solved_task_users(&self, range: &DateRange) -> HashSet<String> {
        self.users_for_event(Event::SolveTask, range)
    }

    /// Distinct users that attempted one specific task
    pub fn solved_task_users_for(&self, range: &DateRange, task: i32) -> HashSet<String> {
        self.select(
            range,
            |r| r.event == Event::SolveTask && r.task == Some(task),
            |r| r.user.clone(),
        )
    }

    /// Distinct users that completed any task
    pub fn done_task_users(&self, range: &DateRange) -> HashSet<String> {
        self.users_for_event(Event::DoneTask, range)
    }

    /// Distinct users that completed one specific task
    pub fn done_task_users_for(&self, range: &DateRange, task: i32) -> HashSet<String> {
        self.select(
            range,
            |r| r.event == Event::DoneTask && r.task == Some(task),
            |r| r.user.clone(),
        )
    }

    fn users_for_event(&self, event: Event, range: &DateRange) -> HashSet<String> {
        self.select(range, |r| r.event == event, |r| r.user.clone())
    }
}

/// Date accessors
impl RecordStore {
    /// Timestamps at which a user produced a given event
    pub fn dates_for_user_and_event(
        &self,
        user: &str,
        event: Event,
        range: &DateRange,
    ) -> HashSet<NaiveDateTime> {
        self.select(
            range,
            |r| r.user == user && r.event == event,
            |r| r.timestamp,
        )
    }

    /// Timestamps of every FAILED record
    pub fn dates_when_something_failed(&self, range: &DateRange) -> HashSet<NaiveDateTime> {
        self.select(range, |r| r.status == Status::Failed, |r| r.timestamp)
    }

    /// Timestamps of every ERROR record
    pub fn dates_when_error_happened(&self, range: &DateRange) -> HashSet<NaiveDateTime> {
        self.select(range, |r| r.status == Status::Error, |r| r.timestamp)
    }

    /// First login of a user within the range, if any
    pub fn first_login_of(&self, user: &str, range: &DateRange) -> Option<NaiveDateTime> {
        self.earliest(range, |r| r.user == user && r.event == Event::Login)
    }

    /// First attempt of a user at a task, if any
    pub fn when_user_solved_task(
        &self,
        user: &str,
        task: i32,
        range: &DateRange,
    ) -> Option<NaiveDateTime> {
        self.earliest(range, |r| {
            r.user == user && r.event == Event::SolveTask && r.task == Some(task)
        })
    }

    /// First completion of a task by a user, if any
    pub fn when_user_done_task(
        &self,
        user: &str,
        task: i32,
        range: &DateRange,
    ) -> Option<NaiveDateTime> {
        self.earliest(range, |r| {
            r.user == user && r.event == Event::DoneTask && r.task == Some(task)
        })
    }

    /// Timestamps at which a user wrote messages
    pub fn dates_when_user_wrote_message(
        &self,
        user: &str,
        range: &DateRange,
    ) -> HashSet<NaiveDateTime> {
        self.dates_for_user_and_event(user, Event::WriteMessage, range)
    }

    /// Timestamps at which a user downloaded the plugin
    pub fn dates_when_user_downloaded_plugin(
        &self,
        user: &str,
        range: &DateRange,
    ) -> HashSet<NaiveDateTime> {
        self.dates_for_user_and_event(user, Event::DownloadPlugin, range)
    }
}

/// Event accessors
impl RecordStore {
    /// Distinct event kinds seen within the range
    pub fn all_events(&self, range: &DateRange) -> HashSet<Event> {
        self.select(range, |_| true, |r| r.event)
    }

    /// Number of distinct event kinds seen within the range
    pub fn number_of_all_events(&self, range: &DateRange) -> usize {
        self.all_events(range).len()
    }

    /// Distinct event kinds produced from an IP
    pub fn events_for_ip(&self, ip: &str, range: &DateRange) -> HashSet<Event> {
        self.select(range, |r| r.ip == ip, |r| r.event)
    }

    /// Distinct event kinds produced by a user
    pub fn events_for_user(&self, user: &str, range: &DateRange) -> HashSet<Event> {
        self.select(range, |r| r.user == user, |r| r.event)
    }

    /// Distinct event kinds that ended in FAILED
    pub fn failed_events(&self, range: &DateRange) -> HashSet<Event> {
        self.select(range, |r| r.status == Status::Failed, |r| r.event)
    }

    /// Distinct event kinds that ended in ERROR
    pub fn error_events(&self, range: &DateRange) -> HashSet<Event> {
        self.select(range, |r| r.status == Status::Error, |r| r.event)
    }

    /// Number of attempts at a task (not deduplicated)
    pub fn solve_attempts(&self, task: i32, range: &DateRange) -> usize {
        self.count(range, |r| {
            r.event == Event::SolveTask && r.task == Some(task)
        })
    }

    /// Number of completions of a task (not deduplicated)
    pub fn successful_solve_attempts(&self, task: i32, range: &DateRange) -> usize {
        self.count(range, |r| r.event == Event::DoneTask && r.task == Some(task))
    }

    /// Every attempted task id with its attempt count
    pub fn solved_tasks_with_counts(&self, range: &DateRange) -> HashMap<i32, usize> {
        self.task_counts(Event::SolveTask, range)
    }

    /// Every completed task id with its completion count
    pub fn done_tasks_with_counts(&self, range: &DateRange) -> HashMap<i32, usize> {
        self.task_counts(Event::DoneTask, range)
    }

    fn task_counts(&self, event: Event, range: &DateRange) -> HashMap<i32, usize> {
        let mut counts = HashMap::new();
        for record in self
            .iter()
            .filter(|r| range.contains(r.timestamp) && r.event == event)
        {
            if let Some(task) = record.task {
                *counts.entry(task).or_insert(0) += 1;
            }
        }
        counts
    }
}
