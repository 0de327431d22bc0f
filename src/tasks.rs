//! In-memory task list: ordered, unique ids, no persistence.

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Whitespace-only text is rejected. Returns the new
    /// task's id on success.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            done: false,
        });
        Some(id)
    }

    /// Flip the done flag of the matching task. Returns false if no task
    /// has that id.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    /// Remove the matching task, keeping the order of the rest.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_unique_ids_in_order() {
        let mut list = TaskList::new();
        let a = list.add("write copy").unwrap();
        let b = list.add("ship it").unwrap();
        assert_ne!(a, b);
        let texts: Vec<_> = list.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["write copy", "ship it"]);
    }

    #[test]
    fn whitespace_only_is_rejected() {
        let mut list = TaskList::new();
        assert_eq!(list.add("   "), None);
        assert_eq!(list.add(""), None);
        assert!(list.is_empty());
    }

    #[test]
    fn add_trims_text() {
        let mut list = TaskList::new();
        list.add("  fix headline  ");
        assert_eq!(list.get(0).unwrap().text, "fix headline");
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let mut list = TaskList::new();
        let a = list.add("one").unwrap();
        let b = list.add("two").unwrap();

        assert!(list.toggle(b));
        assert!(!list.get(0).unwrap().done);
        assert!(list.get(1).unwrap().done);

        assert!(list.toggle(b));
        assert!(!list.get(1).unwrap().done);

        assert!(!list.toggle(a + b + 100));
    }

    #[test]
    fn remove_keeps_order_and_ids_stay_unique() {
        let mut list = TaskList::new();
        let a = list.add("one").unwrap();
        list.add("two").unwrap();
        list.add("three").unwrap();

        assert!(list.remove(a));
        assert!(!list.remove(a));
        let texts: Vec<_> = list.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["two", "three"]);

        // A new task never reuses a removed id
        let d = list.add("four").unwrap();
        assert!(list.iter().filter(|t| t.id == d).count() == 1);
        assert_ne!(d, a);
    }
}
