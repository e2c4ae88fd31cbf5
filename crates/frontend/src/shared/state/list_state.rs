#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Identifies one issued load. Only the latest ticket may change the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued meanwhile; the response was dropped.
    Stale,
}

/// What the list area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Rows,
}

/// `idle -> loading -> (loaded | failed)`, re-entered on every load.
///
/// A failed load keeps whatever rows were shown before.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    status: LoadStatus,
    issued: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
            issued: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.status = LoadStatus::Loading;
        LoadTicket(self.issued)
    }

    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Vec<T>, String>) -> LoadOutcome {
        if ticket.0 != self.issued {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.status = LoadStatus::Loaded;
            }
            Err(message) => self.status = LoadStatus::Failed(message),
        }
        LoadOutcome::Applied
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn view(&self) -> ListView {
        if self.is_loading() {
            ListView::Loading
        } else if self.items.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows
        }
    }
}
