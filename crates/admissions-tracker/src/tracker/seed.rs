use super::domain::{Stage, StageId, University, UniversityId};

pub fn default_universities() -> Vec<University> {
    [
        (
            "1",
            "University of Milan",
            "Milan",
            "https://www.unimi.it",
            "One of the largest universities in Europe.",
        ),
        (
            "2",
            "Sapienza University of Rome",
            "Rome",
            "https://www.uniroma1.it",
            "Historically one of the most prestigious Italian universities.",
        ),
        (
            "3",
            "University of Pavia",
            "Pavia",
            "https://web.unipv.it",
            "Renowned for its medical faculty.",
        ),
        (
            "4",
            "University of Bologna",
            "Bologna",
            "https://www.unibo.it",
            "The oldest university in the Western world.",
        ),
    ]
    .into_iter()
    .map(|(id, name, city, website, description)| University {
        id: UniversityId::new(id),
        name: name.to_string(),
        city: city.to_string(),
        website: website.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn default_stages() -> Vec<Stage> {
    [
        ("s1", "Pre-Enrollment", 1),
        ("s2", "IMAT Registration", 2),
        ("s3", "Visa Application", 3),
        ("s4", "Enrollment", 4),
    ]
    .into_iter()
    .map(|(id, name, order)| Stage {
        id: StageId::new(id),
        name: name.to_string(),
        order,
    })
    .collect()
}
