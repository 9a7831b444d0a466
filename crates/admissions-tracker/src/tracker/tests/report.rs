use super::common::*;
use crate::tracker::domain::{AppliesTo, StageId, UniversityId};
use crate::tracker::intake::{DeadlineDraft, RequirementDraft};
use crate::tracker::progress::StageStatus;
use crate::tracker::report::{
    client_roster, dashboard, roster_csv_string, stage_catalog, ClientProgressReport,
};
use chrono::NaiveDate;

#[test]
fn progress_report_lists_stages_in_order_with_checklists() {
    let (mut catalog, mut clients) = seeded_stores();
    let passport = catalog
        .add_requirement(&requirement_draft("Passport copy", "s1"))
        .expect("requirement accepted");
    catalog
        .add_requirement(&requirement_draft("Transcript", "s1"))
        .expect("requirement accepted");
    catalog
        .add_requirement(&RequirementDraft {
            applies_to: Some(AppliesTo::NonEu),
            ..requirement_draft("Visa appointment", "s3")
        })
        .expect("requirement accepted");

    let client = clients
        .admit(&intake("Hugo", "France", "France"))
        .expect("client admitted");
    clients
        .toggle_requirement(&client.id, &passport.id)
        .expect("toggled");
    let client = clients.get(&client.id).expect("client present");

    let report = ClientProgressReport::build(client, &catalog);
    let stage_ids: Vec<&str> = report
        .stages
        .iter()
        .map(|stage| stage.stage_id.as_str())
        .collect();
    assert_eq!(stage_ids, ["s1", "s2", "s3", "s4"]);

    let pre_enrollment = &report.stages[0];
    assert_eq!((pre_enrollment.completed, pre_enrollment.total), (1, 2));
    assert_eq!(pre_enrollment.status, StageStatus::Pending);
    assert!(pre_enrollment.requirements[0].completed);
    assert!(!pre_enrollment.requirements[1].completed);

    let visa = &report.stages[2];
    assert_eq!(visa.total, 0, "non-EU visa step does not apply to EU client");
    assert_eq!(visa.status, StageStatus::NotApplicable);

    assert_eq!(report.overall.percent, 50);
    assert!(report.orphaned.is_empty());
    assert_eq!(report.stages_complete(), 0);
}

#[test]
fn deleted_stage_moves_requirements_into_orphaned_bucket() {
    let (mut catalog, mut clients) = seeded_stores();
    let transcript = catalog
        .add_requirement(&requirement_draft("Transcript", "s1"))
        .expect("requirement accepted");
    let client = clients
        .admit(&intake("Ines", "Portugal", "Brazil"))
        .expect("client admitted");

    catalog
        .delete_stage(&StageId::new("s1"))
        .expect("stage deleted");

    let client = clients.get(&client.id).expect("client present");
    let report = ClientProgressReport::build(client, &catalog);
    assert!(report
        .stages
        .iter()
        .all(|stage| stage.stage_id != StageId::new("s1")));
    assert!(report
        .stages
        .iter()
        .all(|stage| stage.requirements.iter().all(|item| item.id != transcript.id)));
    assert_eq!(report.orphaned.len(), 1);
    assert_eq!(report.orphaned[0].id, transcript.id);
    assert_eq!(report.overall.applicable, 1);
}

#[test]
fn progress_report_resolves_university_names_and_client_deadlines() {
    let (mut catalog, mut clients) = seeded_stores();
    catalog
        .add_requirement(&RequirementDraft {
            university_id: Some(UniversityId::new("1")),
            ..requirement_draft("Milan pre-application", "s1")
        })
        .expect("requirement accepted");
    catalog
        .add_deadline(&DeadlineDraft {
            name: "IMAT registration closes".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 10),
            ..DeadlineDraft::default()
        })
        .expect("deadline accepted");
    catalog
        .add_deadline(&DeadlineDraft {
            name: "EU document check".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1),
            applies_to: Some(AppliesTo::Eu),
            ..DeadlineDraft::default()
        })
        .expect("deadline accepted");

    let client = clients
        .admit(&intake("Ravi", "India", "India"))
        .expect("client admitted");
    let report = ClientProgressReport::build(&client, &catalog);

    let item = &report.stages[0].requirements[0];
    assert_eq!(item.university_name.as_deref(), Some("University of Milan"));
    assert_eq!(report.deadlines.len(), 1);
    assert_eq!(report.deadlines[0].name, "IMAT registration closes");
}

#[test]
fn dashboard_counts_streams_and_limits_upcoming_deadlines() {
    let (mut catalog, mut clients) = seeded_stores();
    clients.admit(&intake("Ana", "Spain", "Spain")).expect("ok");
    clients.admit(&intake("Ben", "Canada", "Canada")).expect("ok");
    clients.admit(&intake("Cai", "China", "Germany")).expect("ok");
    for day in [28, 3, 14, 7, 21, 1] {
        catalog
            .add_deadline(&DeadlineDraft {
                name: format!("deadline {day}"),
                date: NaiveDate::from_ymd_opt(2025, 8, day),
                ..DeadlineDraft::default()
            })
            .expect("deadline accepted");
    }

    let summary = dashboard(&clients, &catalog, 5);
    assert_eq!(summary.total_clients, 3);
    assert_eq!(summary.eu_stream, 2);
    assert_eq!(summary.non_eu_stream, 1);
    assert_eq!(summary.active_deadlines, 6);
    let days: Vec<String> = summary
        .upcoming_deadlines
        .iter()
        .map(|deadline| deadline.date.format("%d").to_string())
        .collect();
    assert_eq!(days, ["01", "03", "07", "14", "21"]);
}

#[test]
fn stage_catalog_counts_associated_requirements() {
    let (mut catalog, _) = seeded_stores();
    for name in ["Passport", "Transcript"] {
        catalog
            .add_requirement(&requirement_draft(name, "s1"))
            .expect("requirement accepted");
    }
    catalog
        .add_requirement(&requirement_draft("Visa", "s3"))
        .expect("requirement accepted");

    let counts: Vec<(String, usize)> = stage_catalog(&catalog)
        .into_iter()
        .map(|entry| (entry.id.0, entry.requirement_count))
        .collect();
    assert_eq!(
        counts,
        [
            ("s1".to_string(), 2),
            ("s2".to_string(), 0),
            ("s3".to_string(), 1),
            ("s4".to_string(), 0),
        ]
    );
}

#[test]
fn roster_csv_has_header_and_one_row_per_client() {
    let (mut catalog, mut clients) = seeded_stores();
    let requirement = catalog
        .add_requirement(&requirement_draft("Passport", "s1"))
        .expect("requirement accepted");
    let client = clients.admit(&intake("Dana", "Ireland", "Ireland")).expect("ok");
    clients.admit(&intake("Eli", "Australia", "Australia")).expect("ok");
    clients
        .toggle_requirement(&client.id, &requirement.id)
        .expect("toggled");

    let rows = client_roster(&clients, &catalog);
    assert_eq!(rows[0].name, "Eli Conti");
    let csv = roster_csv_string(&rows).expect("csv renders");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "client_id,name,email,stream,applicable,completed,progress_percent,stages_complete,created_at"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with(&format!("{},Dana Conti,dana@example.com,EU,1,1,100,1,", client.id)));
}

#[test]
fn client_addressed_deadline_resolves_client_name() {
    let (mut catalog, mut clients) = seeded_stores();
    let client = clients
        .admit(&intake("Nadia", "Morocco", "Morocco"))
        .expect("client admitted");
    catalog
        .add_deadline(&DeadlineDraft {
            name: "Visa interview".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 9),
            client_id: Some(client.id.clone()),
            ..DeadlineDraft::default()
        })
        .expect("deadline accepted");
    catalog
        .add_deadline(&DeadlineDraft {
            name: "IMAT registration closes".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 7, 2),
            ..DeadlineDraft::default()
        })
        .expect("deadline accepted");

    let report = ClientProgressReport::build(&client, &catalog);
    assert_eq!(report.deadlines[0].client_name.as_deref(), Some("Nadia Conti"));
    assert_eq!(report.deadlines[1].client_name, None);

    let summary = dashboard(&clients, &catalog, 5);
    assert_eq!(
        summary.upcoming_deadlines[0].client_name.as_deref(),
        Some("Nadia Conti")
    );
}
