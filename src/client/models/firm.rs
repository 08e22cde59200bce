//! Firm onboarding models

use serde::{Deserialize, Serialize};

/// Practice areas offered during onboarding
pub const PRACTICE_AREAS: [&str; 10] = [
    "Criminal Law",
    "Civil Litigation",
    "Commercial Law",
    "Family Law",
    "Intellectual Property",
    "Real Estate",
    "Employment Law",
    "Tax Law",
    "Immigration Law",
    "Administrative Law",
];

/// Headcount per staff category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCounts {
    pub lawyer: u32,
    pub paralegal: u32,
    pub admin: u32,
    pub other: u32,
}

impl Default for EmployeeCounts {
    fn default() -> Self {
        Self {
            lawyer: 1,
            paralegal: 0,
            admin: 1,
            other: 0,
        }
    }
}

/// Organization configuration submitted at the end of onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmSetup {
    pub name: String,
    pub jurisdiction: String,
    pub timezone: String,
    pub currency: String,
    pub practice_areas: Vec<String>,
    pub employee_counts: EmployeeCounts,
}

impl FirmSetup {
    /// New setup with onboarding defaults (UTC, USD, one lawyer, one admin)
    pub fn new(name: impl Into<String>, jurisdiction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jurisdiction: jurisdiction.into(),
            timezone: "UTC".to_string(),
            currency: "USD".to_string(),
            practice_areas: Vec::new(),
            employee_counts: EmployeeCounts::default(),
        }
    }

    /// Select an area if absent, deselect it if present
    pub fn toggle_practice_area(&mut self, area: &str) {
        if let Some(pos) = self.practice_areas.iter().position(|a| a == area) {
            self.practice_areas.remove(pos);
        } else {
            self.practice_areas.push(area.to_string());
        }
    }
}
