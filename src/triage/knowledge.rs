//! Static symptom knowledge base
//!
//! An ordered table of symptom keywords with their associated guidance.
//! The table is fixed at build time and shared read-only across requests;
//! lookup order is always table-definition order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clinical severity attached to a symptom entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "Mild")]
    Mild,
    #[serde(rename = "Mild to Moderate")]
    MildToModerate,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Moderate to High")]
    ModerateToHigh,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Mild => "Mild",
            Severity::MildToModerate => "Mild to Moderate",
            Severity::Moderate => "Moderate",
            Severity::ModerateToHigh => "Moderate to High",
            Severity::High => "High",
            Severity::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// One row of the knowledge base
///
/// `symptom` is the lookup key: a lowercase phrase matched as a substring
/// of the user's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomEntry {
    pub symptom: &'static str,
    pub diagnosis: &'static str,
    pub advice: &'static str,
    pub severity: Severity,
}

/// Ordered, immutable collection of symptom entries
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    entries: &'static [SymptomEntry],
}

impl KnowledgeBase {
    /// The built-in symptom table
    pub fn builtin() -> Self {
        KnowledgeBase { entries: SYMPTOM_TABLE }
    }

    /// Build a knowledge base over a custom static table (used by tests)
    pub fn with_entries(entries: &'static [SymptomEntry]) -> Self {
        KnowledgeBase { entries }
    }

    /// All entries in definition order
    pub fn entries(&self) -> &'static [SymptomEntry] {
        self.entries
    }

    /// All symptom keywords in definition order
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.symptom)
    }

    /// Number of known symptoms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table carries no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The symptom table, in definition order
///
/// Keys must stay lowercase and unique; matching is plain substring
/// containment, so multi-word keys match only as written.
static SYMPTOM_TABLE: &[SymptomEntry] = &[
    SymptomEntry {
        symptom: "fever",
        diagnosis: "You may have a viral infection such as the flu, dengue, or COVID-19.",
        advice: "Monitor temperature, take paracetamol if needed, and consult a doctor if it persists.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "cough",
        diagnosis: "Could be bronchitis, cold, or COVID-19.",
        advice: "Drink warm fluids, consider steam inhalation, and consult a physician.",
        severity: Severity::MildToModerate,
    },
    SymptomEntry {
        symptom: "headache",
        diagnosis: "Possibly migraine, dehydration, or stress-related.",
        advice: "Stay hydrated, rest in a quiet dark room, and consider mild painkillers.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "nausea",
        diagnosis: "May indicate food poisoning or stomach infection.",
        advice: "Drink ORS, avoid solid foods temporarily, consult if persistent.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "chest pain",
        diagnosis: "Critical symptom—could be related to the heart or lungs.",
        advice: "Seek emergency medical help immediately.",
        severity: Severity::High,
    },
    SymptomEntry {
        symptom: "sore throat",
        diagnosis: "Likely viral or bacterial infection such as strep throat.",
        advice: "Use saltwater gargles, warm fluids; consult if it worsens.",
        severity: Severity::MildToModerate,
    },
    SymptomEntry {
        symptom: "fatigue",
        diagnosis: "Could be due to anemia, poor sleep, or thyroid issues.",
        advice: "Check iron levels, rest well, and consider a health checkup.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "shortness of breath",
        diagnosis: "Serious symptom. Could be asthma, pneumonia, or cardiac issue.",
        advice: "Seek immediate medical attention.",
        severity: Severity::High,
    },
    SymptomEntry {
        symptom: "vomiting",
        diagnosis: "May indicate food poisoning, gastritis, or motion sickness.",
        advice: "Hydrate well and avoid solid food temporarily.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "diarrhea",
        diagnosis: "Often due to infection or contaminated food.",
        advice: "Stay hydrated, take ORS, and consult if persistent.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "dizziness",
        diagnosis: "Could be due to low blood pressure, dehydration, or inner ear issues.",
        advice: "Sit or lie down, hydrate, and monitor.",
        severity: Severity::MildToModerate,
    },
    SymptomEntry {
        symptom: "rash",
        diagnosis: "May be allergic reaction, eczema, or viral infection.",
        advice: "Avoid irritants and consult dermatologist.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "itching",
        diagnosis: "Could be due to allergies, infections, or dry skin.",
        advice: "Apply moisturizer, avoid allergens.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "joint pain",
        diagnosis: "May be arthritis, viral infection, or injury.",
        advice: "Rest, use ice packs, consult orthopedist if it persists.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "swelling",
        diagnosis: "May indicate inflammation or fluid retention.",
        advice: "Elevate limb and apply cold compress.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "weight loss",
        diagnosis: "Unintentional weight loss could be due to thyroid, diabetes, or cancer.",
        advice: "Seek medical evaluation immediately.",
        severity: Severity::High,
    },
    SymptomEntry {
        symptom: "weight gain",
        diagnosis: "Could be due to thyroid issues, lifestyle, or fluid retention.",
        advice: "Monitor diet and activity, consult if unexplained.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "blurred vision",
        diagnosis: "May indicate diabetes, eye strain, or neurological issue.",
        advice: "Consult an ophthalmologist.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "frequent urination",
        diagnosis: "Could be a sign of diabetes or UTI.",
        advice: "Drink water, consider sugar and urine tests.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "burning urination",
        diagnosis: "Commonly indicates a urinary tract infection.",
        advice: "Increase fluid intake, consult doctor for antibiotics.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "back pain",
        diagnosis: "May be due to posture, injury, or kidney problems.",
        advice: "Rest, apply heat, consider physiotherapy.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "abdominal pain",
        diagnosis: "Could be gas, appendicitis, or ulcer.",
        advice: "Monitor intensity and location, seek medical help.",
        severity: Severity::ModerateToHigh,
    },
    SymptomEntry {
        symptom: "constipation",
        diagnosis: "Common due to low fiber diet or dehydration.",
        advice: "Increase fiber intake, drink water.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "cold hands",
        diagnosis: "Could be circulatory issue or anemia.",
        advice: "Warm up and check iron levels.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "palpitations",
        diagnosis: "May indicate stress, arrhythmia, or thyroid issue.",
        advice: "Relax and consult cardiologist.",
        severity: Severity::ModerateToHigh,
    },
    SymptomEntry {
        symptom: "memory loss",
        diagnosis: "Could be stress, aging, or neurological issue.",
        advice: "Monitor and consult neurologist.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "depression",
        diagnosis: "Mental health condition requiring attention.",
        advice: "Talk to a counselor or psychiatrist.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "anxiety",
        diagnosis: "May affect daily life and sleep.",
        advice: "Practice relaxation and seek counseling.",
        severity: Severity::MildToModerate,
    },
    SymptomEntry {
        symptom: "insomnia",
        diagnosis: "Difficulty sleeping may indicate stress or medical condition.",
        advice: "Follow sleep hygiene and consult doctor.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "night sweats",
        diagnosis: "Could be due to TB, hormone imbalance.",
        advice: "Check for infections or consult doctor.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "hair loss",
        diagnosis: "May be due to stress, genetics, or nutrition.",
        advice: "Consider dermatologist or nutritionist.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "snoring",
        diagnosis: "May be harmless or indicate sleep apnea.",
        advice: "Evaluate sleeping posture, consult ENT.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "nosebleed",
        diagnosis: "Could be dryness or high blood pressure.",
        advice: "Apply pressure, humidify air.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "ear pain",
        diagnosis: "May indicate ear infection or wax build-up.",
        advice: "Consult ENT specialist.",
        severity: Severity::MildToModerate,
    },
    SymptomEntry {
        symptom: "tremors",
        diagnosis: "Could be Parkinson’s, stress, or caffeine.",
        advice: "Monitor frequency, consult neurologist.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "dry mouth",
        diagnosis: "Often due to dehydration or medication side-effects.",
        advice: "Drink water, check medications.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "sensitivity to light",
        diagnosis: "Could indicate migraine or eye infection.",
        advice: "Rest in dark room, use sunglasses.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "muscle cramps",
        diagnosis: "May result from dehydration or overexertion.",
        advice: "Stretch and hydrate.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "difficulty swallowing",
        diagnosis: "Could be infection or esophageal disorder.",
        advice: "Seek ENT evaluation.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "loss of appetite",
        diagnosis: "May signal infection, depression, or digestive issue.",
        advice: "Monitor and seek dietary support.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "red eyes",
        diagnosis: "Could be conjunctivitis or allergy.",
        advice: "Use eye drops and consult if worsening.",
        severity: Severity::Mild,
    },
    SymptomEntry {
        symptom: "difficulty concentrating",
        diagnosis: "May result from anxiety, ADHD, or fatigue.",
        advice: "Limit distractions, consult doctor.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "irregular periods",
        diagnosis: "Could be PCOS, stress, or hormonal imbalance.",
        advice: "Consult gynecologist.",
        severity: Severity::Moderate,
    },
    SymptomEntry {
        symptom: "yellow skin",
        diagnosis: "Likely jaundice. Could indicate liver issues.",
        advice: "Consult physician immediately.",
        severity: Severity::High,
    },
    SymptomEntry {
        symptom: "cold feet",
        diagnosis: "Often due to poor circulation or diabetes.",
        advice: "Keep warm and consult if numb.",
        severity: Severity::Mild,
    },
];
