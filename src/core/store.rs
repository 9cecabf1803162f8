use crate::domain::model::Lead;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
struct StoreState {
    leads: Vec<Lead>,
    submitted: bool,
}

/// Leads submitted during this session, plus the "just submitted" flag.
///
/// One store per session, shared through [`SharedLeadStore`]. Nothing here
/// outlives the process; durable copies live in the backend.
#[derive(Debug, Default)]
pub struct SessionLeadStore {
    state: RwLock<StoreState>,
}

pub type SharedLeadStore = Arc<SessionLeadStore>;

impl SessionLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedLeadStore {
        Arc::new(Self::new())
    }

    /// Appends in submission order. Repeated emails are kept.
    pub fn add_lead(&self, lead: Lead) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.leads.push(lead);
    }

    pub fn set_submitted(&self, submitted: bool) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.submitted = submitted;
    }

    pub fn is_submitted(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .submitted
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .leads
            .clone()
    }

    pub fn latest(&self) -> Option<Lead> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .leads
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .leads
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
