use chrono::NaiveDate;
use std::fmt;

/// Identifier handed out by [`crate::todo_list::TodoList`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
    Overdue,
}

/// How close a due date is, relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    DueToday,
    Upcoming,
    NoDueDate,
}

impl Task {
    pub fn new(id: TaskId, text: String, due_date: Option<NaiveDate>) -> Self {
        Self {
            id,
            text,
            completed: false,
            due_date,
        }
    }

    /// Derived label; completion always wins over an expired due date.
    pub fn status(&self, today: NaiveDate) -> Status {
        if self.completed {
            Status::Completed
        } else if due_date_urgency(self.due_date, today) == Urgency::Overdue {
            Status::Overdue
        } else {
            Status::Pending
        }
    }

    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        due_date_urgency(self.due_date, today)
    }
}

pub fn due_date_urgency(due_date: Option<NaiveDate>, today: NaiveDate) -> Urgency {
    match due_date {
        None => Urgency::NoDueDate,
        Some(due) if due < today => Urgency::Overdue,
        Some(due) if due == today => Urgency::DueToday,
        Some(_) => Urgency::Upcoming,
    }
}
