use super::domain::CandidateType;

/// Countries whose passport holders or residents are processed in the EU stream.
pub const EU_COUNTRIES: [&str; 30] = [
    "Austria",
    "Belgium",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Netherlands",
    "Poland",
    "Portugal",
    "Romania",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Norway",
    "Iceland",
];

const COMMON_NON_EU_COUNTRIES: [&str; 6] = [
    "United Kingdom",
    "United States",
    "Canada",
    "Australia",
    "China",
    "India",
];

pub fn is_eu_country(country: &str) -> bool {
    EU_COUNTRIES.contains(&country)
}

/// Exact, case-sensitive lookup; anything outside the reference list is non-EU.
pub fn classify(passport_country: &str, residence_country: &str) -> CandidateType {
    if is_eu_country(passport_country) || is_eu_country(residence_country) {
        CandidateType::Eu
    } else {
        CandidateType::NonEu
    }
}

/// Country choices offered at intake, alphabetically.
pub fn intake_countries() -> Vec<&'static str> {
    let mut countries: Vec<&'static str> = COMMON_NON_EU_COUNTRIES
        .into_iter()
        .chain(EU_COUNTRIES)
        .collect();
    countries.sort_unstable();
    countries
}
