//! Static keyword tables for intent classification.
//!
//! Table order is significant: when two rows score the same number of hits,
//! the row declared first wins.
use promptdb_core::types::{Domain, IntentCategory, Tone, Urgency};

pub type KeywordTable<K> = [(K, &'static [&'static str])];

pub static CATEGORY_TABLE: &KeywordTable<IntentCategory> = &[
    (IntentCategory::Create, &["write", "create", "generate", "draft", "compose", "make", "build", "design"]),
    (IntentCategory::Analyze, &["analyze", "analyse", "analysis", "review", "evaluate", "assess", "examine", "compare", "audit"]),
    (IntentCategory::Optimize, &["optimize", "optimise", "improve", "enhance", "refine", "streamline", "speed up", "boost"]),
    (IntentCategory::Translate, &["translate", "translation", "localize", "convert", "rewrite in"]),
    (IntentCategory::Explain, &["explain", "describe", "clarify", "teach", "summarize", "summarise", "what is", "how does"]),
    (IntentCategory::Plan, &["plan", "strategy", "roadmap", "schedule", "organize", "outline", "prepare"]),
];

pub static DOMAIN_TABLE: &KeywordTable<Domain> = &[
    (Domain::Business, &["business", "marketing", "sales", "startup", "customer", "revenue", "product", "company"]),
    (Domain::Technical, &["code", "coding", "programming", "software", "api", "database", "debug", "algorithm", "technical", "python", "javascript", "sql"]),
    (Domain::Creative, &["story", "poem", "creative", "fiction", "novel", "song", "character", "screenplay"]),
    (Domain::Academic, &["research", "paper", "essay", "thesis", "study", "academic", "citation", "literature"]),
    (Domain::Communication, &["email", "letter", "message", "presentation", "speech", "communication", "apology", "announcement"]),
    (Domain::Legal, &["legal", "contract", "agreement", "law", "compliance", "clause", "terms of service", "privacy policy"]),
];

pub static TONE_TABLE: &KeywordTable<Tone> = &[
    (Tone::Formal, &["formal", "professional", "official"]),
    (Tone::Casual, &["casual", "informal", "relaxed", "chill"]),
    (Tone::Friendly, &["friendly", "warm", "kind"]),
    (Tone::Persuasive, &["persuasive", "convincing", "compelling"]),
];

pub static URGENCY_TABLE: &KeywordTable<Urgency> = &[
    (Urgency::High, &["urgent", "asap", "immediately", "quickly", "emergency", "right away", "deadline"]),
    (Urgency::Low, &["no rush", "whenever", "eventually", "someday", "low priority"]),
];

/// Tokens never kept as keywords: function words plus generic request verbs
/// that the category table already captures.
pub static STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it", "its", "of", "on",
    "that", "the", "to", "was", "will", "with", "or", "but", "not", "this", "these", "they", "them", "their", "there",
    "then", "than", "so", "if", "when", "where", "why", "how", "what", "which", "who", "whom", "whose", "can", "could",
    "should", "would", "may", "might", "must", "shall", "do", "does", "did", "have", "had", "having", "i", "me", "my",
    "you", "your", "we", "our", "us", "please", "want", "need", "help", "like", "some", "any", "about", "into", "get",
    "give", "just", "also", "very", "really", "write", "create", "make", "generate",
];

pub fn category_keywords(category: IntentCategory) -> &'static [&'static str] {
    lookup(CATEGORY_TABLE, category)
}

pub fn domain_keywords(domain: Domain) -> &'static [&'static str] {
    lookup(DOMAIN_TABLE, domain)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

// `Other` and `General` have no row and therefore no keywords.
fn lookup<K: PartialEq + Copy>(table: &KeywordTable<K>, key: K) -> &'static [&'static str] {
    match table.iter().find(|(k, _)| *k == key) {
        Some(&(_, words)) => words,
        None => &[],
    }
}
