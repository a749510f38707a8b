//! Cognitive distortion taxonomy
//!
//! A static, read-only reference list of the distortion categories a
//! thought can be tagged with. The taxonomy is compiled into the binary
//! and served at `GET /api/distortions`; it labels and describes a
//! thought's `cognitive_distortion` field for clients and exports. It is
//! deliberately not enforced at the database level: the category column
//! stores whatever identifier the client sent, so the list can grow
//! without a migration.

use serde::Serialize;

/// One entry in the distortion taxonomy.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Distortion {
    /// Stable identifier stored on thoughts
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Short description of the thinking pattern
    pub description: &'static str,
    /// Example thought exhibiting the pattern
    pub example: &'static str,
}

/// The full taxonomy, in display order.
pub const DISTORTIONS: &[Distortion] = &[
    Distortion {
        id: "all-or-nothing",
        name: "All-or-Nothing Thinking",
        description: "Seeing things in black-and-white categories with no middle ground.",
        example: "If I'm not perfect, I'm a total failure.",
    },
    Distortion {
        id: "overgeneralization",
        name: "Overgeneralization",
        description: "Treating a single negative event as a never-ending pattern of defeat.",
        example: "I didn't get this job. I'll never get hired anywhere.",
    },
    Distortion {
        id: "mental-filter",
        name: "Mental Filter",
        description: "Dwelling on a single negative detail until it colors everything else.",
        example: "One person criticized my talk, so the whole thing was a disaster.",
    },
    Distortion {
        id: "discounting-positive",
        name: "Discounting the Positive",
        description: "Insisting that positive experiences or qualities don't count.",
        example: "They only complimented me to be nice.",
    },
    Distortion {
        id: "mind-reading",
        name: "Mind Reading",
        description: "Assuming you know what others are thinking without evidence.",
        example: "She didn't say hi, so she must be angry with me.",
    },
    Distortion {
        id: "fortune-telling",
        name: "Fortune Telling",
        description: "Predicting that things will turn out badly as if it were established fact.",
        example: "I already know the interview will go terribly.",
    },
    Distortion {
        id: "catastrophizing",
        name: "Catastrophizing",
        description: "Exaggerating the importance of problems or expecting the worst outcome.",
        example: "If I make a mistake in the demo, my career is over.",
    },
    Distortion {
        id: "emotional-reasoning",
        name: "Emotional Reasoning",
        description: "Assuming that negative feelings reflect the way things really are.",
        example: "I feel like an impostor, so I must be one.",
    },
    Distortion {
        id: "should-statements",
        name: "Should Statements",
        description: "Criticizing yourself or others with rigid 'should' and 'must' rules.",
        example: "I should always be productive; resting is lazy.",
    },
    Distortion {
        id: "labeling",
        name: "Labeling",
        description: "Attaching a fixed, global label instead of describing the behavior.",
        example: "I forgot the deadline. I'm an idiot.",
    },
    Distortion {
        id: "personalization",
        name: "Personalization",
        description: "Blaming yourself for events outside your control.",
        example: "The team missed the release because of me.",
    },
    Distortion {
        id: "blaming",
        name: "Blaming",
        description: "Holding others entirely responsible for your own feelings or situation.",
        example: "My partner makes me feel worthless.",
    },
];

/// Look up a taxonomy entry by its identifier.
pub fn find(id: &str) -> Option<&'static Distortion> {
    DISTORTIONS.iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_taxonomy_size() {
        // The reference list carries 10-15 entries.
        assert!(DISTORTIONS.len() >= 10 && DISTORTIONS.len() <= 15);
    }

    #[test]
    fn test_ids_unique_and_well_formed() {
        let mut seen = HashSet::new();
        for d in DISTORTIONS {
            assert!(seen.insert(d.id), "duplicate id: {}", d.id);
            assert!(!d.id.is_empty());
            assert!(
                d.id.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "id {} should be kebab-case",
                d.id
            );
            assert!(!d.name.is_empty());
            assert!(!d.description.is_empty());
            assert!(!d.example.is_empty());
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("catastrophizing").unwrap().name, "Catastrophizing");
        assert!(find("not-a-distortion").is_none());
    }
}
