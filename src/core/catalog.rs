use crate::models::TherapyType;

/// Thematic bucket a question belongs to.
///
/// Categories drive the per-dimension scoring weights: each therapy type
/// emphasizes different buckets (see `core::scoring`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionCategory {
    EmotionalState,
    Relational,
    Conflict,
    Development,
    Preferences,
    Goals,
    Context,
    /// Trailing therapist-profile dimensions (language, price, location).
    Profile,
}

/// Shape of a questionnaire question.
#[derive(Debug, Clone, Copy)]
pub enum QuestionKind {
    Single(&'static [&'static str]),
    Multi(&'static [&'static str]),
    Scale { min: i64, max: i64 },
    EmotionScale,
    FreeText,
}

/// One question of a therapy-type questionnaire.
#[derive(Debug, Clone, Copy)]
pub struct QuestionDef {
    pub key: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
    pub category: DimensionCategory,
}

/// Emotion axes of the emotion-scale question, in schema order.
pub const EMOTIONS: [&str; 4] = ["ansioso", "triste", "stressato", "sopraffatto"];

/// Emotion-scale values range over 1..=10; a missing emotion is imputed
/// at the midpoint of that range.
pub const EMOTION_MIN: i64 = 1;
pub const EMOTION_MAX: i64 = 10;

const INDIVIDUAL: &[QuestionDef] = &[
    QuestionDef {
        key: "main_difficulties",
        kind: QuestionKind::FreeText,
        required: true,
        category: DimensionCategory::EmotionalState,
    },
    QuestionDef {
        key: "emotional_state",
        kind: QuestionKind::EmotionScale,
        required: true,
        category: DimensionCategory::EmotionalState,
    },
    QuestionDef {
        key: "previous_diagnosis",
        kind: QuestionKind::Single(&["none", "anxiety", "mood", "personality", "eating", "other"]),
        required: true,
        category: DimensionCategory::EmotionalState,
    },
    QuestionDef {
        key: "communication_style",
        kind: QuestionKind::Single(&["direct", "empathic", "no_preference"]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "thinking_style",
        kind: QuestionKind::Single(&["talk", "reflect", "mixed"]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "therapy_experience",
        kind: QuestionKind::Single(&[
            "first_time",
            "cbt",
            "psychodynamic",
            "systemic",
            "humanistic",
            "emdr",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Preferences,
    },
    QuestionDef {
        key: "therapy_approach",
        kind: QuestionKind::Single(&["practical", "depth", "both"]),
        required: true,
        category: DimensionCategory::Preferences,
    },
    QuestionDef {
        key: "specialist_competencies",
        kind: QuestionKind::Scale { min: 1, max: 5 },
        required: true,
        category: DimensionCategory::Preferences,
    },
    QuestionDef {
        key: "therapy_goals",
        kind: QuestionKind::Multi(&[
            "overcome_block",
            "self_understanding",
            "improve_relationships",
            "resilience",
            "process_trauma",
            "self_esteem",
            "manage_anxiety",
            "overcome_depression",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "commitment_level",
        kind: QuestionKind::Scale { min: 1, max: 10 },
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "life_areas",
        kind: QuestionKind::Multi(&[
            "emotional",
            "work",
            "romantic",
            "family",
            "social",
            "self_esteem",
            "stress",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "time_availability",
        kind: QuestionKind::Single(&["one_hour", "one_two", "two_three", "more", "flexible"]),
        required: true,
        category: DimensionCategory::Context,
    },
    QuestionDef {
        key: "life_changes",
        kind: QuestionKind::Single(&[
            "stable",
            "grief",
            "separation",
            "relocation",
            "job_change",
            "health",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Context,
    },
    QuestionDef {
        key: "session_format",
        kind: QuestionKind::Multi(&["in_person", "online", "phone", "mixed"]),
        required: true,
        category: DimensionCategory::Context,
    },
];

const COUPLE: &[QuestionDef] = &[
    QuestionDef {
        key: "relationship_status",
        kind: QuestionKind::Single(&["stable", "crisis", "transition", "separated"]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "partner_participation",
        kind: QuestionKind::Single(&["both", "only_me", "uncertain"]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "main_problems",
        kind: QuestionKind::Multi(&[
            "communication",
            "trust",
            "sexuality",
            "family_management",
            "frequent_conflict",
            "emotional_distance",
            "financial",
            "family_interference",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "conflict_style",
        kind: QuestionKind::Single(&["avoidance", "heated", "constructive", "silence"]),
        required: true,
        category: DimensionCategory::Conflict,
    },
    QuestionDef {
        key: "relationship_importance",
        kind: QuestionKind::Scale { min: 1, max: 10 },
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "shared_responsibilities",
        kind: QuestionKind::Single(&[
            "none",
            "young_children",
            "school_age",
            "teenagers",
            "adult_children",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "serious_issues",
        kind: QuestionKind::Single(&[
            "none",
            "infidelity",
            "verbal_abuse",
            "physical_abuse",
            "addiction",
            "prefer_not_say",
        ]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "feeling_heard",
        kind: QuestionKind::Scale { min: 1, max: 10 },
        required: true,
        category: DimensionCategory::Conflict,
    },
    QuestionDef {
        key: "communication_style_couple",
        kind: QuestionKind::Single(&["assertive", "passive", "aggressive", "ironic"]),
        required: true,
        category: DimensionCategory::Conflict,
    },
    QuestionDef {
        key: "previous_couple_therapy",
        kind: QuestionKind::Single(&[
            "first_time",
            "systemic",
            "cbt",
            "mediation",
            "religious",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Preferences,
    },
    QuestionDef {
        key: "therapist_style_preference",
        kind: QuestionKind::Single(&["direct", "empathic", "neutral"]),
        required: true,
        category: DimensionCategory::Preferences,
    },
    QuestionDef {
        key: "therapy_expectations",
        kind: QuestionKind::Multi(&[
            "decide_future",
            "reconnect",
            "improve_communication",
            "manage_conflict",
            "rekindle_intimacy",
            "learn_forgiveness",
            "new_agreements",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "cultural_aspects",
        kind: QuestionKind::Scale { min: 1, max: 5 },
        required: true,
        category: DimensionCategory::Context,
    },
    QuestionDef {
        key: "therapy_duration",
        kind: QuestionKind::Single(&["brief", "long_term", "unsure"]),
        required: true,
        category: DimensionCategory::Preferences,
    },
];

const CHILD: &[QuestionDef] = &[
    QuestionDef {
        key: "child_age_gender",
        kind: QuestionKind::FreeText,
        required: true,
        category: DimensionCategory::Development,
    },
    QuestionDef {
        key: "support_reason",
        kind: QuestionKind::FreeText,
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "behavioral_changes",
        kind: QuestionKind::Single(&["none", "behavior", "sleep", "school", "all", "other"]),
        required: true,
        category: DimensionCategory::EmotionalState,
    },
    QuestionDef {
        key: "previous_diagnosis_child",
        kind: QuestionKind::Single(&["none", "dsa", "adhd", "autism", "mood", "anxiety", "other"]),
        required: true,
        category: DimensionCategory::Development,
    },
    QuestionDef {
        key: "child_temperament",
        kind: QuestionKind::Multi(&[
            "calm",
            "irritable",
            "shy",
            "outgoing",
            "anxious",
            "impulsive",
            "sensitive",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Development,
    },
    QuestionDef {
        key: "stressful_events",
        kind: QuestionKind::Multi(&[
            "none",
            "separation",
            "grief",
            "relocation",
            "sibling",
            "bullying",
            "illness",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "peer_relationships",
        kind: QuestionKind::Single(&[
            "well_integrated",
            "some_difficulty",
            "many_difficulties",
            "avoids",
            "unknown",
        ]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "previous_therapy_child",
        kind: QuestionKind::Single(&[
            "first_time",
            "individual",
            "family",
            "speech",
            "psychomotor",
            "neuropsychiatry",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Development,
    },
    QuestionDef {
        key: "school_involvement",
        kind: QuestionKind::Single(&[
            "none",
            "reported",
            "evaluation",
            "pdp_active",
            "not_applicable",
        ]),
        required: true,
        category: DimensionCategory::Relational,
    },
    QuestionDef {
        key: "consultation_goals",
        kind: QuestionKind::Multi(&[
            "parenting_tools",
            "cognitive_eval",
            "emotional_support",
            "behavior",
            "self_esteem",
            "anxiety",
            "school_support",
            "other",
        ]),
        required: true,
        category: DimensionCategory::Goals,
    },
    QuestionDef {
        key: "therapy_format_child",
        kind: QuestionKind::Single(&["parents_only", "child_only", "mixed", "professional_decides"]),
        required: true,
        category: DimensionCategory::Preferences,
    },
    QuestionDef {
        key: "emotional_expression",
        kind: QuestionKind::Single(&["expresses_well", "much_difficulty", "sometimes", "unsure"]),
        required: true,
        category: DimensionCategory::EmotionalState,
    },
    QuestionDef {
        key: "session_modality_child",
        kind: QuestionKind::Single(&["in_person", "online", "mixed", "depends"]),
        required: true,
        category: DimensionCategory::Context,
    },
    QuestionDef {
        key: "schedule_compatibility",
        kind: QuestionKind::Single(&["morning", "afternoon", "evening", "weekend", "flexible"]),
        required: true,
        category: DimensionCategory::Context,
    },
];

/// Questionnaire for a therapy type.
pub fn questions_for(therapy_type: TherapyType) -> &'static [QuestionDef] {
    match therapy_type {
        TherapyType::Individual => INDIVIDUAL,
        TherapyType::Couple => COUPLE,
        TherapyType::Child => CHILD,
    }
}
