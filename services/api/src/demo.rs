use admissions_tracker::config::TrackerConfig;
use admissions_tracker::error::AppError;
use admissions_tracker::tracker::report::views::{DashboardSummary, DeadlineView};
use admissions_tracker::tracker::report::write_roster_csv;
use admissions_tracker::tracker::{
    classify, AppliesTo, ClientId, ClientIntake, ClientProgressReport, DeadlineDraft,
    ReminderFrequency, RequirementDraft, RequirementId, StageId, TrackerService, UniversityId,
};
use chrono::NaiveDate;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the client roster as CSV to this path.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Country that issued the client's passport
    #[arg(long)]
    pub(crate) passport: String,
    /// Country the client currently lives in
    #[arg(long)]
    pub(crate) residence: String,
}

pub(crate) fn run_classify(args: &ClassifyArgs) {
    let stream = classify(&args.passport, &args.residence);
    println!(
        "Passport: {} | Residence: {} => {} stream",
        args.passport,
        args.residence,
        stream.label()
    );
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = TrackerService::from_config(&TrackerConfig::default());
    let requirements = seed_requirements(&service)?;
    seed_deadlines(&service)?;
    let clients = seed_clients(&service)?;

    // first client has finished the universal paperwork
    if let (Some(first), [passport, transcript, ..]) = (clients.first(), requirements.as_slice()) {
        service.toggle_requirement(first, passport)?;
        service.toggle_requirement(first, transcript)?;
    }

    println!("Admissions tracker demo");
    for client_id in &clients {
        let report = service.client_progress(client_id)?;
        render_progress_report(&report);
    }

    render_dashboard(&service.dashboard()?);

    if let Some(path) = args.csv {
        let roster = service.roster()?;
        let file = File::create(&path)?;
        write_roster_csv(&roster, BufWriter::new(file))?;
        println!("\nRoster written to {}", path.display());
    }

    Ok(())
}

fn seed_requirements(service: &TrackerService) -> Result<Vec<RequirementId>, AppError> {
    let drafts = [
        requirement("Passport copy", "s1", AppliesTo::Both, None),
        requirement("High school transcript", "s1", AppliesTo::Both, None),
        RequirementDraft {
            due_by: NaiveDate::from_ymd_opt(2026, 4, 30),
            reminder_frequency: Some(ReminderFrequency::Daily),
            ..requirement("IMAT registration fee", "s2", AppliesTo::Both, None)
        },
        requirement("Declaration of value", "s1", AppliesTo::NonEu, None),
        requirement("Visa appointment", "s3", AppliesTo::NonEu, None),
        requirement("Sapienza enrollment portal", "s4", AppliesTo::Both, Some("2")),
        requirement("Codice fiscale", "s4", AppliesTo::Both, None),
    ];

    let mut ids = Vec::with_capacity(drafts.len());
    for draft in &drafts {
        ids.push(service.add_requirement(draft)?.id);
    }
    Ok(ids)
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

fn seed_deadlines(service: &TrackerService) -> Result<(), AppError> {
    let deadlines = [
        ("IMAT registration closes", (2026, 7, 2), AppliesTo::Both, None),
        ("Universitaly pre-enrollment", (2026, 7, 31), AppliesTo::NonEu, None),
        ("Milan EU application window", (2026, 5, 15), AppliesTo::Eu, Some("1")),
    ];
    for (name, (year, month, day), applies_to, university) in deadlines {
        service.add_deadline(&DeadlineDraft {
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(year, month, day),
            applies_to: Some(applies_to),
            university_id: university.map(UniversityId::new),
            ..DeadlineDraft::default()
        })?;
    }
    Ok(())
}

fn seed_clients(service: &TrackerService) -> Result<Vec<ClientId>, AppError> {
    let intakes = [
        intake("Priya", "Sharma", "India", "India", &["1", "2"]),
        intake("Tomás", "García", "Argentina", "Spain", &["1"]),
        intake("Yusuf", "Demir", "Turkey", "Turkey", &["3"]),
    ];
    let mut ids = Vec::with_capacity(intakes.len());
    for intake in &intakes {
        ids.push(service.add_client(intake)?.id);
    }
    Ok(ids)
}

fn intake(
    first_name: &str,
    last_name: &str,
    passport: &str,
    residence: &str,
    preferred: &[&str],
) -> ClientIntake {
    ClientIntake {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: "+39 06 5550 0000".to_string(),
        address: "Via del Corso 1, Rome".to_string(),
        passport_country: passport.to_string(),
        residence_country: residence.to_string(),
        preferred_universities: preferred.iter().map(|id| UniversityId::new(*id)).collect(),
    }
}

fn render_progress_report(report: &ClientProgressReport) {
    println!(
        "\n{} ({}) | {} stream",
        report.client_name, report.client_id, report.stream_label
    );
    if report.overall.has_applicable() {
        println!(
            "Overall: {}% ({} of {} requirements)",
            report.overall.percent, report.overall.completed, report.overall.applicable
        );
    } else {
        println!("Overall: no requirements apply yet");
    }

    for stage in &report.stages {
        println!(
            "  {}. {} [{}] {}/{}",
            stage.order, stage.stage_name, stage.status_label, stage.completed, stage.total
        );
        for item in &stage.requirements {
            let mark = if item.completed { "x" } else { " " };
            match &item.university_name {
                Some(university) => println!("     [{mark}] {} ({university})", item.name),
                None => println!("     [{mark}] {}", item.name),
            }
        }
    }

    if !report.orphaned.is_empty() {
        println!("  Unassigned requirements");
        for item in &report.orphaned {
            println!("     - {}", item.name);
        }
    }

    if !report.deadlines.is_empty() {
        println!("  Deadlines");
        for deadline in &report.deadlines {
            println!("     - {}", deadline_line(deadline));
        }
    }
}

fn render_dashboard(summary: &DashboardSummary) {
    println!("\nDashboard");
    println!(
        "- {} clients | {} EU | {} Non-EU",
        summary.total_clients, summary.eu_stream, summary.non_eu_stream
    );
    println!("- {} active deadlines", summary.active_deadlines);
    if summary.upcoming_deadlines.is_empty() {
        println!("Upcoming deadlines: none");
    } else {
        println!("Upcoming deadlines");
        for deadline in &summary.upcoming_deadlines {
            println!("- {}", deadline_line(deadline));
        }
    }
}

fn deadline_line(deadline: &DeadlineView) -> String {
    let mut line = format!(
        "{} {} ({}, reminders {})",
        deadline.date, deadline.name, deadline.applies_to_label, deadline.reminder_label
    );
    if let Some(university) = &deadline.university_name {
        line.push_str(&format!(" @ {university}"));
    }
    if let Some(client) = &deadline.client_name {
        line.push_str(&format!(" for {client}"));
    }
    line
}
