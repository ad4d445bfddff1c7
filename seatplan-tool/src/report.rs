//! Plain-text, JSON and YAML views of a seating chart.

use std::fmt::Write as _;

use clap::ValueEnum;
use seatplan_core::{Employee, SeatingChart};
use serde::Serialize;

use crate::error::SeatsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub sections: Vec<SectionReport>,
    pub waiting: Vec<PersonReport>,
    pub seated: usize,
    pub assignable_seats: usize,
}

#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub key: String,
    pub title: String,
    pub seats: Vec<SeatReport>,
}

#[derive(Debug, Serialize)]
pub struct SeatReport {
    pub id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub gap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<PersonReport>,
}

#[derive(Debug, Serialize)]
pub struct PersonReport {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
}

impl From<&Employee> for PersonReport {
    fn from(employee: &Employee) -> Self {
        PersonReport {
            id: employee.id.to_string(),
            name: employee.name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
        }
    }
}

impl ChartReport {
    pub fn build(chart: &SeatingChart) -> Self {
        let sections = chart
            .directory()
            .sections()
            .iter()
            .map(|section| SectionReport {
                key: section.key.clone(),
                title: section.title.clone(),
                seats: section
                    .seats
                    .iter()
                    .map(|seat| SeatReport {
                        id: seat.id.to_string(),
                        gap: seat.empty,
                        occupant: chart.find_by_seat(&seat.id).map(PersonReport::from),
                    })
                    .collect(),
            })
            .collect();

        ChartReport {
            sections,
            waiting: chart.roster().unassigned().map(PersonReport::from).collect(),
            seated: chart.roster().seated_count(),
            assignable_seats: chart.directory().assignable_count(),
        }
    }
}

pub fn render(chart: &SeatingChart, format: ReportFormat) -> Result<String, SeatsError> {
    let report = ChartReport::build(chart);
    match format {
        ReportFormat::Text => Ok(render_text(&report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
    }
}

fn render_text(report: &ChartReport) -> String {
    let mut out = String::new();

    for section in &report.sections {
        let _ = writeln!(out, "[{}]", section.title);
        for seat in &section.seats {
            let who = match (&seat.occupant, seat.gap) {
                (_, true) => "-".to_string(),
                (Some(p), false) => format!("{} {} ({})", p.name, p.position, p.department),
                (None, false) => "(vacant)".to_string(),
            };
            let _ = writeln!(out, "  {:<8} {}", seat.id, who);
        }
    }

    let _ = writeln!(out, "[Waiting ({})]", report.waiting.len());
    for person in &report.waiting {
        let _ = writeln!(out, "  {} {} ({})", person.name, person.position, person.department);
    }
    let _ = writeln!(out, "{}/{} seats taken", report.seated, report.assignable_seats);

    out
}

/// One-paragraph summary printed by `seats check`.
pub fn summary(chart: &SeatingChart) -> String {
    let dir = chart.directory();
    let gaps = dir.len() - dir.assignable_count();
    format!(
        "{} sections, {} seats ({} gaps), {} employees ({} seated, {} waiting), pet: {}",
        dir.sections().len(),
        dir.assignable_count(),
        gaps,
        chart.roster().len(),
        chart.roster().seated_count(),
        chart.waiting_pool().unassigned_count(),
        chart.pet().map(|p| p.name.as_str()).unwrap_or("none"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_core::FloorPlan;

    fn chart() -> SeatingChart {
        FloorPlan::from_toml_str(
            r#"
            [[sections]]
            key = "a"
            title = "Alpha"
            row = "upper"
            seats = [{ id = "A1" }, { id = "A2" }, { id = "A3", empty = true }]

            [[employees]]
            id = "p1"
            name = "Jo"
            position = "Lead"
            department = "Design"
            gender = "female"
            seat = "A1"

            [[employees]]
            id = "p2"
            name = "Lee"
            position = "Intern"
            department = "R&D"
            gender = "male"
            "#,
        )
        .unwrap()
        .into_chart()
        .unwrap()
    }

    #[test]
    fn text_report_lists_seats_and_waiting() {
        let text = render(&chart(), ReportFormat::Text).unwrap();

        assert!(text.contains("[Alpha]"));
        assert!(text.contains("A1       Jo Lead (Design)"));
        assert!(text.contains("A2       (vacant)"));
        assert!(text.contains("A3       -"));
        assert!(text.contains("[Waiting (1)]"));
        assert!(text.contains("1/2 seats taken"));
    }

    #[test]
    fn json_report_omits_empty_fields() {
        let json = render(&chart(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let seats = &value["sections"][0]["seats"];
        assert_eq!(seats[0]["occupant"]["id"], "p1");
        assert!(seats[1].get("occupant").is_none());
        assert_eq!(seats[2]["gap"], true);
        assert_eq!(value["waiting"][0]["name"], "Lee");
    }

    #[test]
    fn summary_counts() {
        assert_eq!(
            summary(&chart()),
            "1 sections, 2 seats (1 gaps), 2 employees (1 seated, 1 waiting), pet: none"
        );
    }
}
