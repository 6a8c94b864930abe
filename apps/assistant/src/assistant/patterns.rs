//! Pattern Tables.
//!
//! Static per-topic keyword lists and regex templates, the leaf data the
//! classifier and the special-case detectors score against. Regexes are
//! compiled once at startup.

use regex::Regex;
use std::sync::LazyLock;

/// Normalize an utterance for matching: trimmed and lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

// --- Subject reference ---------------------------------------------------

// Third-person pronouns and the subject's name. Second person ("you", "your")
// addresses the assistant, not the subject, and deliberately does not count.
static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(dr\.?\s*ali|doctor|dr|ali|he|him|his|she|her|hers)\b")
        .expect("Invalid regex: subject reference pattern")
});

/// Does the text contain a pronoun or name referring to the subject person?
pub fn references_subject(text: &str) -> bool {
    SUBJECT_PATTERN.is_match(text)
}

// --- Interaction templates -----------------------------------------------

static LEADING_GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(hi|hello|hey|hiya|howdy|greetings|good\s+(morning|afternoon|evening)|what'?s\s+up|sup|yo)\b")
        .expect("Invalid regex: leading greeting pattern")
});

/// Does the text open with a greeting word?
pub fn starts_with_greeting(text: &str) -> bool {
    LEADING_GREETING.is_match(text)
}

static QUESTION_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(what|who|whose|where|when|why|how|which|can|could|would|do|does|did|is|are|was|were|tell\s+me|i'?d\s+like|i\s+want|give\s+me|show\s+me)\b")
        .expect("Invalid regex: question template pattern")
});

/// Does the text look like a question? Either a recognized opening phrase or a
/// literal question mark.
pub fn has_question_template(text: &str) -> bool {
    text.contains('?') || QUESTION_TEMPLATE.is_match(text)
}

// --- Per-topic keyword lists ---------------------------------------------

pub const CLINICAL_KEYWORDS: &[&str] = &[
    "patient",
    "patients",
    "clinic",
    "clinical",
    "practice",
    "treat",
    "treats",
    "treatment",
    "condition",
    "conditions",
    "dysautonomia",
    "pots",
    "autonomic",
    "cardiology",
    "medicine",
    "medical",
    "diagnosis",
    "care",
    "protocol",
    "specialize",
    "specialty",
];

pub const RESEARCH_KEYWORDS: &[&str] = &[
    "research",
    "publication",
    "publications",
    "study",
    "studies",
    "paper",
    "papers",
    "published",
    "journal",
    "clinical trial",
    "findings",
    "methodology",
    "peer-reviewed",
    "scientific",
];

pub const VENTURES_KEYWORDS: &[&str] = &[
    "venture",
    "ventures",
    "startup",
    "startups",
    "company",
    "companies",
    "founder",
    "founded",
    "cofounder",
    "business",
    "entrepreneur",
    "entrepreneurship",
    "investor",
    "funding",
];

pub const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "technology",
    "tech",
    "software",
    "platform",
    "digital",
    "telehealth",
    "wearable",
    "wearables",
    "remote monitoring",
    "analytics",
    "algorithms",
    "artificial intelligence",
    "machine learning",
    "data",
];

pub const SPEAKING_KEYWORDS: &[&str] = &[
    "speak",
    "speaking",
    "speaker",
    "talk",
    "talks",
    "keynote",
    "conference",
    "conferences",
    "lecture",
    "presentation",
    "workshop",
    "panel",
    "summit",
];

pub const MEDIA_KEYWORDS: &[&str] = &[
    "media",
    "press",
    "podcast",
    "podcasts",
    "interview",
    "interviews",
    "article",
    "articles",
    "featured",
    "magazine",
    "television",
    "radio",
    "coverage",
];

pub const CONTACT_KEYWORDS: &[&str] = &[
    "contact",
    "email",
    "reach",
    "touch",
    "message",
    "call",
    "phone",
    "connect",
    "appointment",
    "consultation",
    "book",
    "schedule",
    "inquiry",
];

pub const LOCATION_KEYWORDS: &[&str] = &[
    "location",
    "located",
    "where",
    "city",
    "office",
    "address",
    "based",
    "austin",
    "texas",
    "directions",
    "area",
];

pub const ABOUT_KEYWORDS: &[&str] = &[
    "about",
    "background",
    "bio",
    "biography",
    "story",
    "journey",
    "career",
    "education",
    "training",
    "experience",
    "who is",
];

pub const RESUME_KEYWORDS: &[&str] = &[
    "resume",
    "cv",
    "curriculum",
    "credentials",
    "qualifications",
    "degrees",
    "certifications",
    "board certified",
    "fellowship",
    "residency",
];

pub const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
    "howdy",
];

pub const OFF_TOPIC_KEYWORDS: &[&str] = &[
    "weather",
    "sports",
    "football",
    "basketball",
    "movie",
    "movies",
    "music",
    "song",
    "joke",
    "recipe",
    "cooking",
    "bitcoin",
    "crypto",
    "stocks",
    "politics",
    "election",
    "favorite",
    "game",
    "games",
    "pizza",
];

pub const COMPLEX_KEYWORDS: &[&str] = &[
    "i have",
    "i've been",
    "my symptoms",
    "diagnosed with",
    "experiencing",
    "suffering",
    "what should i do",
    "my doctor",
    "my condition",
    "my daughter",
    "my son",
    "advice",
];

pub const IDENTITY_KEYWORDS: &[&str] = &[
    "who are you",
    "what are you",
    "chatbot",
    "bot",
    "assistant",
    "robot",
    "human",
    "real person",
    "automated",
];

// --- Per-topic pattern libraries -----------------------------------------

pub static CLINICAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(what|which)\s+(conditions?|illnesses|disorders)\b")
            .expect("Invalid regex: clinical conditions question"),
        Regex::new(r"(?i)\b(treat|treats|treating|treatment|manage|manages)\b")
            .expect("Invalid regex: clinical treatment verbs"),
        Regex::new(r"(?i)\b(clinical\s+practice|see\s+patients|patient\s+care)\b")
            .expect("Invalid regex: clinical practice phrases"),
        Regex::new(r"(?i)\b(dysautonomia|pots|autonomic|orthostatic)\b")
            .expect("Invalid regex: clinical condition names"),
    ]
});

pub static RESEARCH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(research|studies|study)\b").expect("Invalid regex: research nouns"),
        Regex::new(r"(?i)\b(published?|publications?|papers?)\b")
            .expect("Invalid regex: publication nouns"),
        Regex::new(r"(?i)\b(clinical\s+trials?|peer[\s-]reviewed|journals?)\b")
            .expect("Invalid regex: research venues"),
        Regex::new(r"(?i)\bwork(ing)?\s+on\b.*\b(science|research)\b")
            .expect("Invalid regex: research activity"),
    ]
});

pub static VENTURES_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(startups?|ventures?|companies|company)\b")
            .expect("Invalid regex: venture nouns"),
        Regex::new(r"(?i)\b(founded?|founder|co-?founder|started\s+a)\b")
            .expect("Invalid regex: founding verbs"),
        Regex::new(r"(?i)\b(business(es)?|entrepreneur(ship)?)\b")
            .expect("Invalid regex: business nouns"),
    ]
});

pub static TECHNOLOGY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(technology|tech|software|platforms?)\b")
            .expect("Invalid regex: technology nouns"),
        Regex::new(r"(?i)\b(telehealth|wearables?|remote\s+monitoring)\b")
            .expect("Invalid regex: health tech terms"),
        Regex::new(r"(?i)\b(machine\s+learning|artificial\s+intelligence|analytics)\b")
            .expect("Invalid regex: data tech terms"),
    ]
});

pub static SPEAKING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(speak(s|ing|er)?|talks?|keynotes?)\b")
            .expect("Invalid regex: speaking verbs"),
        Regex::new(r"(?i)\b(conferences?|lectures?|presentations?|workshops?|panels?)\b")
            .expect("Invalid regex: speaking venues"),
        Regex::new(r"(?i)\b(book\s+(him|dr\.?\s*ali)\s+(to|for)\s+speak|invite.*speak)\b")
            .expect("Invalid regex: speaking booking"),
    ]
});

pub static MEDIA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(media|press|news)\b").expect("Invalid regex: media nouns"),
        Regex::new(r"(?i)\b(podcasts?|interviews?|articles?|features?d?)\b")
            .expect("Invalid regex: media formats"),
        Regex::new(r"(?i)\b(appear(ed|ance)?s?\s+(on|in)|quoted\s+in)\b")
            .expect("Invalid regex: media appearances"),
    ]
});

pub static CONTACT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(contact|reach|get\s+in\s+touch|connect\s+with)\b")
            .expect("Invalid regex: contact verbs"),
        Regex::new(r"(?i)\b(email|phone|call|message)\b").expect("Invalid regex: contact channels"),
        Regex::new(r"(?i)\b(appointment|consultation|book|schedule)\b")
            .expect("Invalid regex: booking terms"),
    ]
});

pub static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bwhere\s+(is|does|can)\b").expect("Invalid regex: where questions"),
        Regex::new(r"(?i)\b(located?|location|address|office|based)\b")
            .expect("Invalid regex: location nouns"),
        Regex::new(r"(?i)\b(city|area|directions)\b").expect("Invalid regex: geography nouns"),
    ]
});

pub static ABOUT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(who\s+is|tell\s+me\s+about)\b").expect("Invalid regex: who-is phrases"),
        Regex::new(r"(?i)\b(background|biography|bio|story|journey)\b")
            .expect("Invalid regex: biography nouns"),
        Regex::new(r"(?i)\b(career|education|training|experience)\b")
            .expect("Invalid regex: career nouns"),
    ]
});

pub static RESUME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(resume|c\.?v\.?|curriculum\s+vitae)\b")
            .expect("Invalid regex: resume nouns"),
        Regex::new(r"(?i)\b(credentials|qualifications|certifications?|degrees?)\b")
            .expect("Invalid regex: credential nouns"),
        Regex::new(r"(?i)\b(board[\s-]certified|fellowship|residency)\b")
            .expect("Invalid regex: medical credential terms"),
    ]
});

pub static GREETING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)^\s*(hello|hi|hey|hiya|howdy|greetings)\b")
            .expect("Invalid regex: greeting words"),
        Regex::new(r"(?i)^\s*good\s+(morning|afternoon|evening)\b")
            .expect("Invalid regex: time-of-day greetings"),
        Regex::new(r"(?i)^\s*(what'?s\s+up|sup|yo)\b")
            .expect("Invalid regex: informal greetings"),
    ]
});

pub static OFF_TOPIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(favorite|favourite)\s+\w+").expect("Invalid regex: favorite-x pattern"),
        Regex::new(r"(?i)\b(tell\s+me\s+a\s+joke|make\s+me\s+laugh)\b")
            .expect("Invalid regex: joke requests"),
        Regex::new(r"(?i)\b(weather|sports?\s+scores?|movie|recipe)\b")
            .expect("Invalid regex: off-topic subjects"),
        Regex::new(r"(?i)\b(bitcoin|crypto|stock\s+market|election)\b")
            .expect("Invalid regex: finance and politics"),
    ]
});

pub static COMPLEX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bi\s+(have|had|am|was|feel|felt|get|got)\b")
            .expect("Invalid regex: first-person experience"),
        Regex::new(r"(?i)\b(i'?ve\s+been|my\s+(symptoms?|doctor|condition|health))\b")
            .expect("Invalid regex: personal medical phrases"),
        Regex::new(r"(?i)\b(what\s+should\s+i\s+do|can\s+you\s+help\s+me|any\s+advice)\b")
            .expect("Invalid regex: help-seeking phrases"),
        Regex::new(r"(?i)\b(diagnosed\s+with|suffering\s+from|experiencing)\b")
            .expect("Invalid regex: diagnosis phrases"),
    ]
});

pub static IDENTITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(who|what)\s+are\s+you\b").expect("Invalid regex: identity questions"),
        Regex::new(r"(?i)\b(are\s+you\s+(a\s+)?(bot|robot|human|real|ai|automated))\b")
            .expect("Invalid regex: bot-or-human questions"),
        Regex::new(r"(?i)\b(chatbot|real\s+person)\b").expect("Invalid regex: identity nouns"),
    ]
});

// --- Clinical detail tables ----------------------------------------------

/// Named conditions the clinical content covers. Used by the specific-clinical
/// detector, the entity extractor, and the disclaimer decision.
pub const CONDITION_TERMS: &[&str] = &[
    "pots",
    "postural orthostatic tachycardia",
    "dysautonomia",
    "orthostatic intolerance",
    "vasovagal syncope",
    "ehlers-danlos",
    "eds",
    "mcas",
    "mast cell activation",
    "chronic fatigue",
    "me/cfs",
    "long covid",
    "fibromyalgia",
    "gastroparesis",
    "small fiber neuropathy",
];

pub static TREATMENT_VERB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(treats?|treating|treatment|manages?|managing|management|protocols?|therapy|therapies|medications?|prescribes?|approach(es)?|helps?\s+with|cures?)\b")
        .expect("Invalid regex: treatment verb pattern")
});

/// Symptom vocabulary for the overly-complex narrative detector.
pub const SYMPTOM_TERMS: &[&str] = &[
    "dizzy",
    "dizziness",
    "lightheaded",
    "fainting",
    "faint",
    "palpitations",
    "racing heart",
    "tachycardia",
    "fatigue",
    "tired",
    "exhausted",
    "brain fog",
    "nausea",
    "headache",
    "migraine",
    "pain",
    "tremor",
    "sweating",
    "shortness of breath",
    "insomnia",
];

pub static FIRST_PERSON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(i|i'm|i've|i'd|me|my|mine|myself)\b")
        .expect("Invalid regex: first person pattern")
});

pub static PERSONAL_QUESTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bhow\s+old\b").expect("Invalid regex: age questions"),
        Regex::new(r"(?i)\b(married|single|dating|wife|husband|girlfriend|boyfriend)\b")
            .expect("Invalid regex: relationship questions"),
        Regex::new(r"(?i)\b(kids?|children|family|parents|siblings?)\b")
            .expect("Invalid regex: family questions"),
        Regex::new(r"(?i)\b(salary|income|net\s+worth|how\s+much\s+(money|does\s+he\s+make))\b")
            .expect("Invalid regex: income questions"),
        Regex::new(r"(?i)\b(height|weight|looks?\s+like|appearance|handsome)\b")
            .expect("Invalid regex: appearance questions"),
        Regex::new(r"(?i)\b(religion|religious|political|votes?\s+for)\b")
            .expect("Invalid regex: belief questions"),
        Regex::new(r"(?i)\bwhere\s+does\s+(he|she|dr\.?\s*ali)\s+live\b")
            .expect("Invalid regex: home address questions"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_reference() {
        assert!(references_subject("what does dr. ali treat"));
        assert!(references_subject("tell me about his research"));
        assert!(references_subject("is she board certified"));
        assert!(!references_subject("what's the weather today"));
        // Second person does not count as a subject reference
        assert!(!references_subject("what's your favorite color?"));
    }

    #[test]
    fn test_leading_greeting() {
        assert!(starts_with_greeting("hello"));
        assert!(starts_with_greeting("Good morning!"));
        assert!(starts_with_greeting("hey there"));
        assert!(!starts_with_greeting("say hello to him"));
    }

    #[test]
    fn test_question_template() {
        assert!(has_question_template("what conditions does he treat"));
        assert!(has_question_template("tell me about the research"));
        assert!(has_question_template("pots?"));
        assert!(!has_question_template("bananas"));
    }

    #[test]
    fn test_condition_terms_lowercase() {
        // The detector compares against normalized text
        for term in CONDITION_TERMS {
            assert_eq!(*term, term.to_lowercase());
        }
    }

    #[test]
    fn test_treatment_verbs() {
        assert!(TREATMENT_VERB_PATTERN.is_match("how does he treat pots"));
        assert!(TREATMENT_VERB_PATTERN.is_match("what is his protocol"));
        assert!(!TREATMENT_VERB_PATTERN.is_match("where is the office"));
    }
}
