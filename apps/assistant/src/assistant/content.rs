//! Biographical Content Catalog.
//!
//! Pre-authored content blocks the response generator selects from. The rest
//! of the engine treats this module as an opaque data source: tiered topics
//! expose progressively deeper blocks, single-answer topics expose phrasing
//! variants of one canonical answer. Deep links use the literal bracket syntax
//! `[LINK:<path>:<label>]` and are parsed by the presentation layer.

use crate::error::AssistantError;

use super::intent::Intent;

// --- Tiered topics --------------------------------------------------------

const CLINICAL_TIERS: &[&str] = &[
    // Tier 0: overview
    "Dr. Ali practices integrative autonomic medicine, caring for patients with \
     dysautonomia, POTS, and related disorders of the autonomic nervous system. \
     His clinic combines conventional cardiology with lifestyle and \
     rehabilitation-based care. [LINK:/clinical-practice:Clinical practice]",
    // Tier 1: conditions and protocols
    "The practice focuses on conditions that are frequently missed elsewhere: \
     postural orthostatic tachycardia syndrome, orthostatic intolerance, \
     vasovagal syncope, and autonomic complications of hypermobility and \
     post-viral illness. Each patient receives a staged plan covering \
     hydration, graded exercise, medication where appropriate, and follow-up \
     tilt-table or stand-test monitoring.",
    // Tier 2: philosophy of care
    "What sets the clinical approach apart is pacing: new patients get a \
     ninety-minute intake, and treatment changes are introduced one variable \
     at a time so the team can tell what is actually working. Dr. Ali also \
     trains referring physicians, so much of the week is split between direct \
     patient care and clinician education.",
];

const RESEARCH_TIERS: &[&str] = &[
    // Tier 0: overview
    "Dr. Ali's research examines how the autonomic nervous system fails after \
     viral illness, and how measurement at home can replace episodic testing \
     in the lab. [LINK:/research:Research overview]",
    // Tier 1: publications
    "He has authored more than thirty peer-reviewed publications, including a \
     widely cited cohort study of post-viral POTS onset and a validation paper \
     for wearable-derived heart-rate-variability metrics in dysautonomia \
     patients. Recent work appears in journals of cardiology, neurology, and \
     digital health.",
    // Tier 2: methodology
    "Methodologically, the lab favors long observation windows over snapshots: \
     participants wear continuous monitors for weeks, and symptom diaries are \
     time-aligned with physiological data before any statistics are run. That \
     design choice is why several of the group's null results overturned \
     earlier, smaller studies.",
];

const VENTURES_TIERS: &[&str] = &[
    // Tier 0: overview
    "Beyond the clinic, Dr. Ali is a founder. He started two companies that \
     grew out of problems his patients kept hitting: access to specialists and \
     usable home monitoring. [LINK:/ventures:Ventures]",
    // Tier 1: the companies
    "His first venture is a telehealth practice that connects dysautonomia \
     patients in underserved regions with trained clinicians. The second \
     builds wearable analytics for chronic-illness management and now supplies \
     monitoring infrastructure to several academic studies.",
    // Tier 2: how he operates
    "He stays close to product but delegates operations: each company has a \
     full-time CEO, while Dr. Ali chairs the clinical advisory boards. New \
     ideas are incubated for six months against a written falsifiable thesis \
     before any outside funding is raised.",
];

const TECHNOLOGY_TIERS: &[&str] = &[
    // Tier 0: overview
    "On the technology side, Dr. Ali works on remote monitoring and the \
     analytics that turn wearable signals into clinically usable numbers. \
     [LINK:/technology:Technology]",
    // Tier 1: the stack
    "The monitoring platform ingests beat-to-beat heart rate, posture, and \
     activity from consumer wearables, then derives orthostatic response \
     curves that a clinician can read at a glance. Machine-learning models are \
     used sparingly and only where a physiological rationale exists.",
    // Tier 2: engineering philosophy
    "He is vocal that medical software should fail loudly and degrade \
     gracefully: every derived metric ships with a confidence interval, and \
     raw signals are always retained so analyses can be re-run when algorithms \
     improve.",
];

/// Content tiers for a deep-divable topic, shallowest first.
pub fn tiers(topic: Intent) -> Result<&'static [&'static str], AssistantError> {
    match topic {
        Intent::Clinical => Ok(CLINICAL_TIERS),
        Intent::Research => Ok(RESEARCH_TIERS),
        Intent::Ventures => Ok(VENTURES_TIERS),
        Intent::Technology => Ok(TECHNOLOGY_TIERS),
        other => Err(AssistantError::UnknownTopic(other.label().to_string())),
    }
}

/// Highest tier index for a deep-divable topic.
pub fn max_tier(topic: Intent) -> Option<usize> {
    tiers(topic).ok().map(|t| t.len() - 1)
}

// --- Single-answer topics -------------------------------------------------

const SPEAKING_VARIANTS: &[&str] = &[
    "Dr. Ali speaks regularly at cardiology and digital-health conferences, \
     including keynotes on dysautonomia care and remote monitoring. For \
     speaking inquiries, use the contact form. [LINK:/speaking:Speaking]",
    "Yes, he takes speaking engagements. Recent talks cover post-viral \
     autonomic dysfunction, wearable data in clinical practice, and building \
     patient-centered clinics. [LINK:/speaking:Speaking] has the current \
     schedule.",
];

const MEDIA_VARIANTS: &[&str] = &[
    "Dr. Ali has been featured on health podcasts and in print coverage of \
     long-COVID and dysautonomia. A press kit and selected appearances are \
     collected at [LINK:/media:Media].",
    "You can find his podcast interviews, articles, and press mentions on the \
     media page. [LINK:/media:Media] For press inquiries, the contact form is \
     the fastest route.",
];

const CONTACT_VARIANTS: &[&str] = &[
    "The best way to reach Dr. Ali's office is the contact form at \
     [LINK:/contact:Contact]. The team responds within two business days; \
     please do not include medical records in a first message.",
    "You can get in touch through [LINK:/contact:the contact page]. For \
     appointment requests, mention your referring physician if you have one, \
     and the coordinator will follow up with scheduling options.",
];

const LOCATION_VARIANTS: &[&str] = &[
    "The clinic is located in Austin, Texas, with telehealth visits available \
     for patients in most U.S. states. Directions and parking details are on \
     the contact page. [LINK:/contact:Contact]",
    "Dr. Ali practices out of Austin, Texas. If you are not local, telehealth \
     appointments cover most states; see [LINK:/contact:Contact] for \
     specifics.",
];

const ABOUT_VARIANTS: &[&str] = &[
    "Dr. Ali is a physician, researcher, and founder working at the \
     intersection of autonomic medicine and health technology. He trained in \
     internal medicine and cardiology before specializing in dysautonomia. \
     [LINK:/about:About]",
    "In short: a cardiologist who became a dysautonomia specialist, then \
     built research programs and companies around the gaps he saw in care. \
     The full story is at [LINK:/about:About].",
];

const RESUME_VARIANTS: &[&str] = &[
    "Dr. Ali is board certified in internal medicine and cardiovascular \
     disease, completed a fellowship in autonomic disorders, and holds an \
     academic appointment at a university medical center. The full CV is at \
     [LINK:/cv:Curriculum vitae].",
    "His credentials include board certification in internal medicine and \
     cardiology plus fellowship training in autonomic medicine; the complete \
     resume with publications lives at [LINK:/cv:Curriculum vitae].",
];

const IDENTITY_VARIANTS: &[&str] = &[
    "I'm the site assistant, a small rule-based program that answers \
     questions about Dr. Ali's work. I'm not a human and I can't give medical \
     advice, but I'm happy to point you at the right page.",
    "I'm an automated assistant for this site. No human is reading this \
     conversation; if you need a person, the contact page is the way to go. \
     [LINK:/contact:Contact]",
];

/// Phrasing variants of the canonical answer for a single-answer topic.
pub fn canonical_variants(topic: Intent) -> Result<&'static [&'static str], AssistantError> {
    let pool: &'static [&'static str] = match topic {
        Intent::Speaking => SPEAKING_VARIANTS,
        Intent::Media => MEDIA_VARIANTS,
        Intent::Contact => CONTACT_VARIANTS,
        Intent::Location => LOCATION_VARIANTS,
        Intent::About => ABOUT_VARIANTS,
        Intent::Resume => RESUME_VARIANTS,
        Intent::Identity => IDENTITY_VARIANTS,
        other => return Err(AssistantError::UnknownTopic(other.label().to_string())),
    };
    if pool.is_empty() {
        return Err(AssistantError::EmptyVariantPool(topic.label().to_string()));
    }
    Ok(pool)
}

// --- Interaction responses ------------------------------------------------

pub const GREETING_VARIANTS: &[&str] = &[
    "Hello! I can answer questions about Dr. Ali's clinical work, research, \
     ventures, and speaking. What would you like to know?",
    "Hi there! Ask me anything about Dr. Ali's practice, publications, or \
     companies and I'll point you in the right direction.",
    "Welcome! I'm the site assistant. I know Dr. Ali's biography well; where \
     shall we start?",
];

pub const OFF_TOPIC_VARIANTS: &[&str] = &[
    "That one's outside my wheelhouse; I only know about Dr. Ali's work. Try \
     asking about his clinical practice or research.",
    "I'm afraid I can't help with that. I'm limited to questions about Dr. \
     Ali's professional work.",
    "Not something I have an answer for. I can tell you about Dr. Ali's \
     clinic, research, or ventures instead.",
    "I'll have to pass on that topic. Questions about Dr. Ali's biography are \
     where I'm useful.",
];

pub const PERSONAL_UNANSWERABLE_VARIANTS: &[&str] = &[
    "I don't have that information; this assistant only covers Dr. Ali's \
     professional biography.",
    "That's a personal detail I don't hold. I can help with his clinical, \
     research, or business work though.",
    "I can't answer questions about Dr. Ali's private life. His professional \
     background is fair game.",
];

pub const CLARIFY_VARIANTS: &[&str] = &[
    "I'm not sure what you're asking. Could you narrow it down? For example, \
     you could ask about Dr. Ali's clinical practice, research, or ventures.",
    "I didn't quite catch that. Try asking about a specific area, like his \
     conditions treated, publications, or speaking.",
    "Could you rephrase? I answer best when asked about a concrete topic such \
     as the clinic, the research program, or how to get in touch.",
];

pub const COMPLEX_REDIRECT_VARIANTS: &[&str] = &[
    "That sounds like a situation that deserves individual attention, and I'm \
     not able to give personal medical guidance. Please reach the office \
     through [LINK:/contact:the contact page] so a clinician can review your \
     case properly.",
    "I can't safely answer an individual medical question like that. The \
     right next step is the contact form at [LINK:/contact:Contact]; the team \
     can route your details to Dr. Ali's clinic.",
];

/// Lead-in used by the exhausted fallback before listing remaining topics.
pub const EXHAUSTED_LEAD: &str =
    "We've covered that topic pretty thoroughly. Here's what we haven't talked about yet:";

/// Closing line of the exhausted fallback.
pub const EXHAUSTED_CLOSE: &str = "Pick any of these and I'll go into detail.";

/// Fallback when every topic has been introduced already.
pub const EXHAUSTED_ALL_COVERED: &str =
    "We've actually touched on every area I cover. Feel free to revisit any of \
     them, or reach out directly via [LINK:/contact:Contact].";

// --- Specific clinical answers --------------------------------------------

/// Protocol blurbs for named conditions. Keys are normalized condition terms.
const CONDITION_ANSWERS: &[(&str, &str)] = &[
    (
        "pots",
        "For POTS, Dr. Ali's protocol starts with a confirmed diagnosis \
         (ten-minute stand test or tilt table), then staged treatment: fluid \
         and sodium targets, compression, a recumbent-to-upright graded \
         exercise program, and medication only once non-pharmacologic steps \
         have been given a fair trial. [LINK:/clinical-practice:Clinical practice]",
    ),
    (
        "postural orthostatic tachycardia",
        "For POTS, Dr. Ali's protocol starts with a confirmed diagnosis \
         (ten-minute stand test or tilt table), then staged treatment: fluid \
         and sodium targets, compression, a recumbent-to-upright graded \
         exercise program, and medication only once non-pharmacologic steps \
         have been given a fair trial. [LINK:/clinical-practice:Clinical practice]",
    ),
    (
        "dysautonomia",
        "Dysautonomia care at the clinic begins with sorting out which \
         autonomic functions are actually affected, since the label covers \
         many distinct problems. Testing typically includes orthostatic \
         vitals, sweat and pupil response, and a symptom-burden inventory \
         before any treatment plan is written.",
    ),
    (
        "vasovagal syncope",
        "For recurrent vasovagal syncope, the emphasis is on trigger mapping \
         and counter-pressure training, with medication reserved for \
         refractory cases. Most patients see meaningful reduction in episodes \
         within three months.",
    ),
    (
        "long covid",
        "For post-viral autonomic dysfunction, including long COVID, the \
         clinic uses the same structured work-up as for POTS, with extra \
         attention to pacing and post-exertional symptom tracking before any \
         exercise prescription.",
    ),
    (
        "mcas",
        "Where mast cell activation overlaps with autonomic symptoms, Dr. Ali \
         coordinates with allergy and immunology colleagues; the clinic \
         manages the autonomic side while the comorbidity is treated in \
         parallel.",
    ),
    (
        "ehlers-danlos",
        "Patients with hypermobile Ehlers-Danlos syndrome and autonomic \
         symptoms get a joint plan: the clinic handles the dysautonomia \
         work-up while physical therapy addresses joint stability, since the \
         two reinforce each other.",
    ),
];

/// Canned protocol answer for a named condition, if the catalog has one.
pub fn condition_answer(condition: &str) -> Option<&'static str> {
    CONDITION_ANSWERS
        .iter()
        .find(|(name, _)| *name == condition)
        .map(|(_, answer)| *answer)
}

/// Fixed suffix for clinical answers that name a specific condition or
/// treatment.
pub const MEDICAL_DISCLAIMER: &str =
    "\n\nThis is general information about how the practice works, not \
     medical advice for your situation. Please talk to your own clinician \
     before changing any treatment.";

// --- Topic menu -----------------------------------------------------------

/// Display names and deep links for the content topics, used by the
/// exhausted fallback to offer what has not been discussed yet.
pub const TOPIC_MENU: &[(Intent, &str, &str)] = &[
    (Intent::Clinical, "his clinical practice", "/clinical-practice"),
    (Intent::Research, "his research", "/research"),
    (Intent::Ventures, "his ventures", "/ventures"),
    (Intent::Technology, "his technology work", "/technology"),
    (Intent::Speaking, "his speaking", "/speaking"),
    (Intent::Media, "media appearances", "/media"),
    (Intent::Resume, "his credentials", "/cv"),
];
