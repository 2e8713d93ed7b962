use crate::task::{Task, TaskId};
use chrono::NaiveDate;
use tracing::debug;

/// Ordered collection of tasks. Display order is insertion order.
///
/// Every mutation consumes the list and hands back the next one, so a caller
/// that needs the previous state clones it first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoList {
    tasks: Vec<Task>,
    next_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counts {
    pub remaining: usize,
    pub total: usize,
    pub completed_fraction: f64,
}

impl Counts {
    /// Completed share as a whole percentage, rounded half up.
    pub fn percent(&self) -> u16 {
        (self.completed_fraction * 100.0).round() as u16
    }
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[cfg(test)]
    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a new incomplete task. `text` is expected to be validated
    /// by the caller.
    pub fn add(mut self, text: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let task = Task::new(id, text.into(), due_date);
        debug!(%id, due_date = ?task.due_date, "added task");
        self.tasks.push(task);
        self
    }

    pub fn remove(mut self, id: TaskId) -> Self {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        debug!(%id, removed = before - self.tasks.len(), "removed task");
        self
    }

    pub fn toggle_complete(mut self, id: TaskId, completed: bool) -> Self {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                debug!(%id, completed, "toggled task");
            }
            None => debug!(%id, "toggle ignored, no such task"),
        }
        self
    }

    pub fn clear_completed(mut self) -> Self {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        debug!(removed = before - self.tasks.len(), "cleared completed tasks");
        self
    }

    pub fn counts(&self) -> Counts {
        let total = self.tasks.len();
        let remaining = self.tasks.iter().filter(|t| !t.completed).count();
        let completed_fraction = if total > 0 {
            (total - remaining) as f64 / total as f64
        } else {
            0.0
        };
        Counts {
            remaining,
            total,
            completed_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    fn list_of(entries: &[(&str, bool)]) -> TodoList {
        entries.iter().fold(TodoList::new(), |list, (text, done)| {
            let list = list.add(*text, None);
            let id = list.tasks().last().map(|t| t.id).unwrap();
            list.toggle_complete(id, *done)
        })
    }

    fn ids(list: &TodoList) -> Vec<TaskId> {
        list.tasks().iter().map(|t| t.id).collect()
    }

    #[test]
    fn add_appends_incomplete_task() {
        let due = NaiveDate::from_ymd_opt(2024, 5, 1);
        let list = TodoList::new().add("Buy milk", due);

        assert_eq!(list.len(), 1);
        let task = &list.tasks()[0];
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.due_date, due);
    }

    #[test]
    fn ids_are_never_reused() {
        let list = TodoList::new().add("one", None).add("two", None);
        let second = list.tasks()[1].id;
        let list = list.remove(second).add("three", None);

        let third = list.tasks()[1].id;
        assert_ne!(third, second);
        assert!(third > second);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let list = list_of(&[("a", false), ("b", true), ("c", false)]);
        let b = list.tasks()[1].id;
        let list = list.remove(b);

        let texts: Vec<_> = list.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let list = list_of(&[("a", false), ("b", false)]);
        let after = list.clone().remove(TaskId(999));
        assert_eq!(after, list);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let list = list_of(&[("a", false)]);
        let after = list.clone().toggle_complete(TaskId(42), true);
        assert_eq!(after, list);
    }

    #[test]
    fn counts_on_empty_list() {
        let counts = TodoList::new().counts();
        assert_eq!(counts.remaining, 0);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.completed_fraction, 0.0);
        assert_eq!(counts.percent(), 0);
    }

    #[test]
    fn counts_with_one_of_two_completed() {
        let counts = list_of(&[("a", true), ("b", false)]).counts();
        assert_eq!(counts.remaining, 1);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.completed_fraction, 0.5);
        assert_eq!(counts.percent(), 50);
    }

    #[test]
    fn percent_rounds_to_whole_number() {
        let counts = list_of(&[("a", true), ("b", false), ("c", false)]).counts();
        assert_eq!(counts.percent(), 33);
        let counts = list_of(&[("a", true), ("b", true), ("c", false)]).counts();
        assert_eq!(counts.percent(), 67);
    }

    #[test]
    fn buy_milk_walk_dog_scenario() {
        let list = TodoList::new().add("Buy milk", None);
        assert_eq!(list.len(), 1);
        let list = list.add("Walk dog", None);
        assert_eq!(list.len(), 2);

        let first = list.tasks()[0].id;
        let list = list.toggle_complete(first, true);
        let counts = list.counts();
        assert_eq!(counts.remaining, 1);
        assert_eq!(counts.total, 2);

        let list = list.clear_completed();
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].text, "Walk dog");
    }

    fn entries() -> impl Strategy<Value = Vec<(String, bool)>> {
        prop::collection::vec(("[a-z]{1,12}", any::<bool>()), 0..24)
    }

    fn build(entries: &[(String, bool)]) -> TodoList {
        let borrowed: Vec<(&str, bool)> = entries.iter().map(|(t, d)| (t.as_str(), *d)).collect();
        list_of(&borrowed)
    }

    proptest! {
        #![proptest_config(Config::with_cases(128))]

        #[test]
        fn add_grows_by_one(entries in entries(), text in "[A-Za-z ]{0,8}[A-Za-z]") {
            let list = build(&entries);
            let len = list.len();
            let list = list.add(text.clone(), None);
            prop_assert_eq!(list.len(), len + 1);
            let last = list.tasks().last().unwrap();
            prop_assert_eq!(&last.text, &text);
            prop_assert!(!last.completed);
        }

        #[test]
        fn ids_stay_distinct(entries in entries()) {
            let list = build(&entries);
            let mut seen = ids(&list);
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), list.len());
        }

        #[test]
        fn remove_never_grows(entries in entries(), raw_id in 0_u64..32) {
            let list = build(&entries);
            let len = list.len();
            let id = TaskId(raw_id);
            let was_present = list.contains(id);
            let list = list.remove(id);
            prop_assert!(list.len() <= len);
            prop_assert!(!list.contains(id));
            prop_assert_eq!(list.len(), if was_present { len - 1 } else { len });
        }

        #[test]
        fn clear_completed_keeps_only_pending(entries in entries()) {
            let list = build(&entries);
            let expected: Vec<TaskId> = list
                .tasks()
                .iter()
                .filter(|t| !t.completed)
                .map(|t| t.id)
                .collect();
            let list = list.clear_completed();
            prop_assert!(list.tasks().iter().all(|t| !t.completed));
            prop_assert_eq!(ids(&list), expected);
        }

        #[test]
        fn toggle_round_trip_restores(entries in entries(), index in 0_usize..24) {
            let list = build(&entries);
            prop_assume!(index < list.len());
            let task = list.tasks()[index].clone();
            let list = list
                .toggle_complete(task.id, true)
                .toggle_complete(task.id, false)
                .toggle_complete(task.id, task.completed);
            prop_assert_eq!(list.get(task.id), Some(&task));
        }

        #[test]
        fn counts_add_up(entries in entries()) {
            let counts = build(&entries).counts();
            let done = entries.iter().filter(|(_, d)| *d).count();
            prop_assert_eq!(counts.total, entries.len());
            prop_assert_eq!(counts.remaining, entries.len() - done);
            prop_assert!((0.0..=1.0).contains(&counts.completed_fraction));
        }
    }
}
