//! In-memory host fakes for controller tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use crate::error::HostError;
use crate::host::{ColorScheme, CookieJar, Dom, KeyValueStore, Timers};

// =============================================================
// Cookies
// =============================================================

/// Cookie jar that keeps only `name=value` pairs, like `document.cookie`
/// reads do, and remembers every raw record written.
#[derive(Default)]
pub struct MemoryCookieJar {
    pairs: RefCell<Vec<(String, String)>>,
    records: RefCell<Vec<String>>,
    pub refuse_writes: Cell<bool>,
}

impl MemoryCookieJar {
    pub fn with_header(header: &str) -> Self {
        let jar = Self::default();
        for segment in header.split(';') {
            if let Some((name, value)) = segment.trim().split_once('=') {
                jar.pairs.borrow_mut().push((name.to_owned(), value.to_owned()));
            }
        }
        jar
    }

    pub fn records(&self) -> Vec<String> {
        self.records.borrow().clone()
    }
}

impl CookieJar for MemoryCookieJar {
    fn cookies(&self) -> String {
        self.pairs
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, record: &str) -> Result<(), HostError> {
        if self.refuse_writes.get() {
            return Err(HostError::Cookie("cookies disabled".into()));
        }
        self.records.borrow_mut().push(record.to_owned());
        let pair = record.split(';').next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            return Err(HostError::Cookie(format!("malformed record {record:?}")));
        };
        let mut pairs = self.pairs.borrow_mut();
        match pairs.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value.to_owned(),
            None => pairs.push((name.to_owned(), value.to_owned())),
        }
        Ok(())
    }
}

// =============================================================
// Storage
// =============================================================

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    pub unavailable: Cell<bool>,
}

impl MemoryStorage {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        storage
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, HostError> {
        if self.unavailable.get() {
            return Err(HostError::Storage("SecurityError".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.unavailable.get() {
            return Err(HostError::Storage("SecurityError".into()));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================
// DOM
// =============================================================

/// One member of a class group: its data attributes and classes.
#[derive(Default, Clone)]
pub struct FakeMember {
    pub attributes: HashMap<String, String>,
    pub classes: HashSet<String>,
}

/// Document with id'd elements, a root attribute map and class groups.
#[derive(Default)]
pub struct FakeDom {
    elements: RefCell<BTreeMap<String, HashSet<String>>>,
    hidden: RefCell<HashSet<String>>,
    root: RefCell<HashMap<String, String>>,
    groups: RefCell<HashMap<String, Vec<FakeMember>>>,
    pub root_writes: Cell<usize>,
}

impl FakeDom {
    pub fn with_element(self, id: &str) -> Self {
        self.elements.borrow_mut().insert(id.to_owned(), HashSet::new());
        self
    }

    /// Add a group member whose `attribute` is `value` (or absent for `None`).
    pub fn with_member(self, group: &str, attribute: &str, value: Option<&str>) -> Self {
        let mut member = FakeMember::default();
        if let Some(value) = value {
            member.attributes.insert(attribute.to_owned(), value.to_owned());
        }
        self.groups.borrow_mut().entry(group.to_owned()).or_default().push(member);
        self
    }

    pub fn classes(&self, id: &str) -> HashSet<String> {
        self.elements.borrow().get(id).cloned().unwrap_or_default()
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.classes(id).contains(class)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.borrow().contains(id)
    }

    /// Indices of `group` members that carry `class`.
    pub fn members_with_class(&self, group: &str, class: &str) -> Vec<usize> {
        self.groups
            .borrow()
            .get(group)
            .map(|members| {
                members
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.classes.contains(class))
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Dom for FakeDom {
    fn add_class(&self, element_id: &str, class: &str) -> Result<(), HostError> {
        let mut elements = self.elements.borrow_mut();
        let classes = elements
            .get_mut(element_id)
            .ok_or_else(|| HostError::MissingElement(element_id.to_owned()))?;
        classes.insert(class.to_owned());
        Ok(())
    }

    fn hide(&self, element_id: &str) -> Result<(), HostError> {
        if !self.elements.borrow().contains_key(element_id) {
            return Err(HostError::MissingElement(element_id.to_owned()));
        }
        self.hidden.borrow_mut().insert(element_id.to_owned());
        Ok(())
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.root_writes.set(self.root_writes.get() + 1);
        self.root.borrow_mut().insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root.borrow().get(name).cloned()
    }

    fn group_values(&self, group: &str, attribute: &str) -> Vec<Option<String>> {
        self.groups
            .borrow()
            .get(group)
            .map(|members| members.iter().map(|m| m.attributes.get(attribute).cloned()).collect())
            .unwrap_or_default()
    }

    fn set_group_class(&self, group: &str, index: usize, class: &str, on: bool) -> Result<(), HostError> {
        let mut groups = self.groups.borrow_mut();
        let member = groups
            .get_mut(group)
            .and_then(|members| members.get_mut(index))
            .ok_or_else(|| HostError::MissingMember { group: group.to_owned(), index })?;
        if on {
            member.classes.insert(class.to_owned());
        } else {
            member.classes.remove(class);
        }
        Ok(())
    }
}

// =============================================================
// Timers
// =============================================================

type Task = Box<dyn FnOnce()>;

/// Virtual clock. Tasks run only when [`ManualTimers::advance`] passes
/// their due time.
#[derive(Default)]
pub struct ManualTimers {
    now: Cell<Duration>,
    queue: RefCell<Vec<(Duration, u64, Task)>>,
    next_seq: Cell<u64>,
}

impl ManualTimers {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward, running due tasks in due-time order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(i, _)| i);
                due.map(|i| queue.remove(i))
            };
            let Some((at, _, task)) = next else {
                break;
            };
            self.now.set(at);
            task();
        }
        self.now.set(target);
    }
}

impl Timers for ManualTimers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push((self.now.get() + delay, seq, task));
    }
}

// =============================================================
// Color scheme
// =============================================================

pub struct FixedScheme(pub Cell<bool>);

impl FixedScheme {
    pub fn dark() -> Self {
        Self(Cell::new(true))
    }

    pub fn light() -> Self {
        Self(Cell::new(false))
    }
}

impl ColorScheme for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.0.get()
    }
}
