//! Navigation targets the client can trigger
//!
//! Views are owned by whatever presents the application; the client only
//! needs to request a full transition to one of them.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Application views reachable by client-triggered navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    Onboarding,
    Dashboard,
    /// Entered automatically when the API is unreachable
    Offline,
}

impl View {
    /// Route path of the view
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Onboarding => "/onboarding",
            View::Dashboard => "/dashboard",
            View::Offline => "/offline",
        }
    }
}

/// Professional designation of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Role {
    Judge,
    Lawyer,
    #[serde(rename = "Managing Partner")]
    ManagingPartner,
    #[serde(rename = "Legal Assistant")]
    LegalAssistant,
    #[serde(rename = "Audit Officer")]
    AuditOfficer,
}

impl Role {
    /// Display label, identical to the wire value
    pub fn label(&self) -> &'static str {
        match self {
            Role::Judge => "Judge",
            Role::Lawyer => "Lawyer",
            Role::ManagingPartner => "Managing Partner",
            Role::LegalAssistant => "Legal Assistant",
            Role::AuditOfficer => "Audit Officer",
        }
    }
}

/// Dashboard variant rendered behind [`View::Dashboard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardKind {
    Judge,
    Lawyer,
}

impl DashboardKind {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardKind::Judge => "Judge dashboard",
            DashboardKind::Lawyer => "Lawyer dashboard",
        }
    }
}

/// Pick the dashboard for a role. Only judges get the bench dashboard.
pub fn dashboard_for(role: Role) -> DashboardKind {
    match role {
        Role::Judge => DashboardKind::Judge,
        _ => DashboardKind::Lawyer,
    }
}

/// Performs full view transitions
pub trait Navigator: Send + Sync {
    /// View currently shown
    fn current(&self) -> View;

    /// Transition to `view`
    fn navigate(&self, view: View);

    /// Transition to `view` unless it is already current, as one step.
    ///
    /// Returns whether a transition happened. Concurrent callers racing for
    /// the same view see exactly one `true`.
    fn enter_unless_current(&self, view: View) -> bool;
}

#[derive(Debug)]
struct NavState {
    current: View,
    history: Vec<View>,
}

/// Navigator that records transitions in memory
#[derive(Debug)]
pub struct MemoryNavigator {
    state: Mutex<NavState>,
}

impl MemoryNavigator {
    pub fn new(initial: View) -> Self {
        Self {
            state: Mutex::new(NavState {
                current: initial,
                history: Vec::new(),
            }),
        }
    }

    /// Every view navigated to, oldest first
    pub fn history(&self) -> Vec<View> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .history
            .clone()
    }

    /// How many times `view` has been entered
    pub fn visits(&self, view: View) -> usize {
        self.history().iter().filter(|v| **v == view).count()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(View::Login)
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> View {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).current
    }

    fn navigate(&self, view: View) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.current = view;
        state.history.push(view);
    }

    fn enter_unless_current(&self, view: View) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.current == view {
            return false;
        }
        state.current = view;
        state.history.push(view);
        true
    }
}
