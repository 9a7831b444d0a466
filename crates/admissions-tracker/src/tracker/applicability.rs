use super::domain::{Client, Deadline, Requirement};

/// Stream filter and university scoping both have to match.
pub fn is_applicable(client: &Client, requirement: &Requirement) -> bool {
    requirement.applies_to.matches(client.candidate_type)
        && requirement
            .university_id
            .as_ref()
            .map_or(true, |university| client.prefers(university))
}

/// Requirements relevant to `client`, in catalog order.
///
/// Recomputed on every call: both the catalog and the client's preferences
/// change independently.
pub fn applicable_requirements<'a>(
    client: &Client,
    requirements: &'a [Requirement],
) -> Vec<&'a Requirement> {
    requirements
        .iter()
        .filter(|requirement| is_applicable(client, requirement))
        .collect()
}

/// Deadlines matching the client's stream and preferences, plus any addressed
/// to the client directly. Informational only; never part of progress.
pub fn deadlines_for_client<'a>(client: &Client, deadlines: &'a [Deadline]) -> Vec<&'a Deadline> {
    deadlines
        .iter()
        .filter(|deadline| deadline.applies_to.matches(client.candidate_type))
        .filter(|deadline| {
            deadline
                .university_id
                .as_ref()
                .map_or(true, |university| client.prefers(university))
        })
        .filter(|deadline| {
            deadline
                .client_id
                .as_ref()
                .map_or(true, |target| target == &client.id)
        })
        .collect()
}
