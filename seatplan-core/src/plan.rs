//! Floor plan seed data: sections, roster and the optional pet, read from TOML.

use serde::{Deserialize, Serialize};

use crate::chart::SeatingChart;
use crate::employee::Employee;
use crate::error::PlanError;
use crate::pet::Pet;
use crate::roster::Roster;
use crate::seat::{SeatDirectory, Section};

const BUILTIN_PLAN: &str = include_str!("../data/office.toml");

/// Everything needed to start an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet: Option<Pet>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl FloorPlan {
    pub fn from_toml_str(content: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(content)?)
    }

    /// The office layout shipped with the crate.
    pub fn builtin() -> Result<Self, PlanError> {
        Self::from_toml_str(BUILTIN_PLAN)
    }

    pub fn without_pet(mut self) -> Self {
        self.pet = None;
        self
    }

    /// Validates the seed data and builds an editable chart from it.
    pub fn into_chart(self) -> Result<SeatingChart, PlanError> {
        let directory = SeatDirectory::new(self.sections)?;
        let roster = Roster::new(self.employees)?;
        SeatingChart::new(directory, roster, self.pet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_plan_is_consistent() {
        let plan = FloorPlan::builtin().unwrap();
        assert_eq!(plan.sections.len(), 11);
        assert!(plan.pet.is_some());

        let chart = plan.into_chart().unwrap();
        let dir = chart.directory();
        assert!(!dir.is_assignable(&"UT3".into()));
        assert!(!dir.is_assignable(&"UTh4".into()));
        assert!(dir.is_assignable(&"M1-10".into()));
        assert_eq!(chart.roster().len(), 24);
        assert_eq!(chart.waiting_pool().unassigned_count(), 5);
    }

    #[test]
    fn parse_error_is_reported() {
        let err = FloorPlan::from_toml_str("sections = 3").unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn minimal_plan_without_pet() {
        let plan = FloorPlan::from_toml_str(
            r#"
            [[sections]]
            key = "a"
            title = "A"
            row = "upper"
            seats = [{ id = "A1" }, { id = "A2", empty = true }]

            [[employees]]
            id = "p1"
            name = "Jo"
            position = "Staff"
            department = "Design"
            gender = "female"
            seat = "A1"
            "#,
        )
        .unwrap();

        assert_eq!(plan.sections[0].columns, 2);
        let chart = plan.into_chart().unwrap();
        assert!(chart.pet().is_none());
        assert_eq!(chart.find_by_seat(&"A1".into()).unwrap().id.as_str(), "p1");
    }

    #[test]
    fn without_pet_drops_it() {
        let chart = FloorPlan::builtin().unwrap().without_pet().into_chart().unwrap();
        assert!(chart.pet().is_none());
    }
}
