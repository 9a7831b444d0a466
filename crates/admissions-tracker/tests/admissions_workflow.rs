use admissions_tracker::tracker::{
    applicable_requirements, classify, overall_progress, AppliesTo, CandidateType, CatalogStore,
    ClientIntake, ClientStore, DeadlineDraft, RequirementDraft, StageDraft, StageId, StageStatus,
    TrackerError, UniversityId, ValidationRejection, EU_COUNTRIES,
};
use admissions_tracker::tracker::report::{client_roster, dashboard, roster_csv_string};
use admissions_tracker::tracker::ClientProgressReport;
use chrono::NaiveDate;

fn intake(first_name: &str, passport: &str, residence: &str, preferred: &[&str]) -> ClientIntake {
    ClientIntake {
        first_name: first_name.to_string(),
        last_name: "Moretti".to_string(),
        email: format!("{}@example.org", first_name.to_lowercase()),
        phone: "+39 02 1234 5678".to_string(),
        address: "Via Roma 10".to_string(),
        passport_country: passport.to_string(),
        residence_country: residence.to_string(),
        preferred_universities: preferred.iter().map(|id| UniversityId::new(*id)).collect(),
    }
}

fn requirement(
    name: &str,
    stage: &str,
    applies_to: AppliesTo,
    university: Option<&str>,
) -> RequirementDraft {
    RequirementDraft {
        name: name.to_string(),
        stage_id: Some(StageId::new(stage)),
        applies_to: Some(applies_to),
        university_id: university.map(UniversityId::new),
        ..RequirementDraft::default()
    }
}

#[test]
fn either_eu_country_places_client_in_eu_stream() {
    for country in EU_COUNTRIES {
        assert_eq!(classify(country, "Narnia"), CandidateType::Eu, "{country}");
        assert_eq!(classify("Narnia", country), CandidateType::Eu, "{country}");
    }
    assert_eq!(classify("Brazil", "Canada"), CandidateType::NonEu);
    assert_eq!(classify("", ""), CandidateType::NonEu);
}

#[test]
fn eu_client_sees_only_universal_and_preferred_requirements() {
    let mut catalog = CatalogStore::seeded();
    let mut clients = ClientStore::default();

    let universal = catalog
        .add_requirement(&requirement("Passport copy", "s1", AppliesTo::Both, None))
        .expect("accepted");
    catalog
        .add_requirement(&requirement("Visa appointment", "s3", AppliesTo::NonEu, None))
        .expect("accepted");
    catalog
        .add_requirement(&requirement("Sapienza portal", "s1", AppliesTo::Both, Some("2")))
        .expect("accepted");

    let client = clients
        .admit(&intake("Giulia", "Italy", "Italy", &["1"]))
        .expect("admitted");
    assert_eq!(client.candidate_type, CandidateType::Eu);

    let applicable = applicable_requirements(&client, catalog.requirements());
    let ids: Vec<_> = applicable.iter().map(|requirement| &requirement.id).collect();
    assert_eq!(ids, [&universal.id]);
}

#[test]
fn client_with_nothing_applicable_reports_zero_without_dividing() {
    let catalog = CatalogStore::seeded();
    let mut clients = ClientStore::default();
    let client = clients
        .admit(&intake("Kofi", "Ghana", "Ghana", &[]))
        .expect("admitted");

    let applicable = applicable_requirements(&client, catalog.requirements());
    let overall = overall_progress(&client, &applicable);
    assert_eq!(overall.percent, 0);
    assert!(!overall.has_applicable());

    let report = ClientProgressReport::build(&client, &catalog);
    assert!(report
        .stages
        .iter()
        .all(|stage| stage.status == StageStatus::NotApplicable));
}

#[test]
fn consultancy_day_end_to_end() {
    let mut catalog = CatalogStore::seeded();
    let mut clients = ClientStore::default();

    let blank = catalog.add_stage(&StageDraft::default());
    assert_eq!(blank, Err(ValidationRejection::MissingName { entity: "stage" }));
    assert_eq!(catalog.stages().len(), 4);

    let housing = catalog
        .add_stage(&StageDraft {
            name: "Housing".to_string(),
            order: None,
        })
        .expect("stage accepted");
    assert_eq!(housing.order, 5);

    let transcript = catalog
        .add_requirement(&requirement("Transcript", "s1", AppliesTo::Both, None))
        .expect("accepted");
    let visa = catalog
        .add_requirement(&requirement("Visa appointment", "s3", AppliesTo::NonEu, None))
        .expect("accepted");
    let lease = catalog
        .add_requirement(&requirement(
            "Signed lease",
            housing.id.as_str(),
            AppliesTo::Both,
            None,
        ))
        .expect("accepted");
    catalog
        .add_deadline(&DeadlineDraft {
            name: "IMAT registration closes".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1),
            ..DeadlineDraft::default()
        })
        .expect("deadline accepted");

    let amara = clients
        .admit(&intake("Amara", "Nigeria", "Nigeria", &["1"]))
        .expect("admitted");
    let lukas = clients
        .admit(&intake("Lukas", "Germany", "Germany", &["3"]))
        .expect("admitted");

    clients
        .toggle_requirement(&amara.id, &transcript.id)
        .expect("toggled");
    clients.toggle_requirement(&amara.id, &visa.id).expect("toggled");
    let amara_now = clients.get(&amara.id).expect("present");
    let report = ClientProgressReport::build(amara_now, &catalog);
    assert_eq!(report.overall.applicable, 3);
    assert_eq!(report.overall.percent, 67);

    match catalog.delete_stage(&housing.id) {
        Ok(stage) => assert_eq!(stage.name, "Housing"),
        Err(error) => panic!("delete failed: {error}"),
    }
    assert_eq!(
        catalog.delete_stage(&housing.id),
        Err(TrackerError::StageNotFound(housing.id.clone()))
    );
    let report = ClientProgressReport::build(amara_now, &catalog);
    assert_eq!(report.orphaned.len(), 1);
    assert_eq!(report.orphaned[0].id, lease.id);
    assert!(catalog.requirement(&lease.id).is_some());

    let summary = dashboard(&clients, &catalog, 5);
    assert_eq!(summary.total_clients, 2);
    assert_eq!((summary.eu_stream, summary.non_eu_stream), (1, 1));
    assert_eq!(summary.active_deadlines, 1);

    let roster = client_roster(&clients, &catalog);
    assert_eq!(roster[0].client_id, lukas.id);
    let csv = roster_csv_string(&roster).expect("csv renders");
    assert_eq!(csv.lines().count(), 3);
}
