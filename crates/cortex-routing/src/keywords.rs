//! Fixed domain keyword classifiers
//!
//! Salient-term pre-extraction that runs before the LLM call, purely to give
//! the extraction prompt lexical grounding. No ML pipeline — substring
//! matching against fixed word-lists.

use cortex_config::Capability;

/// Maximum unique tokens kept by the fallback tokenizer
const FALLBACK_TOKEN_CAP: usize = 5;

const CODING_KEYWORDS: &[&str] = &[
    "implement",
    "debug",
    "function",
    "refactor",
    "compile",
    "runtime error",
    "syntax error",
    "code review",
    "write code",
    "fix this code",
    "stack trace",
    "unit test",
    "api",
    "regex",
    "sql",
    "algorithm",
    "class",
    "library",
];

const MATH_KEYWORDS: &[&str] = &[
    "calculate",
    "solve",
    "prove",
    "equation",
    "integral",
    "derivative",
    "theorem",
    "matrix",
    "eigenvalue",
    "probability",
    "statistics",
    "geometry",
    "algebra",
];

const GENERAL_KNOWLEDGE_KEYWORDS: &[&str] = &[
    "what is",
    "who is",
    "when did",
    "where is",
    "history",
    "explain",
    "define",
    "describe",
    "summarize",
    "fact",
];

const CREATIVE_KEYWORDS: &[&str] = &[
    "write a story",
    "write a poem",
    "creative",
    "compose",
    "fictional",
    "narrative",
    "brainstorm",
    "imagine",
    "lyrics",
    "screenplay",
];

const REASONING_KEYWORDS: &[&str] = &[
    "why",
    "analyze",
    "compare",
    "evaluate",
    "assess",
    "trade-off",
    "pros and cons",
    "step by step",
    "plan",
    "strategy",
    "decide",
    "logic",
];

/// The five domain classifiers, in scan order
const CLASSIFIERS: [(Capability, &[&str]); 5] = [
    (Capability::Coding, CODING_KEYWORDS),
    (Capability::Math, MATH_KEYWORDS),
    (Capability::GeneralKnowledge, GENERAL_KNOWLEDGE_KEYWORDS),
    (Capability::Creative, CREATIVE_KEYWORDS),
    (Capability::Reasoning, REASONING_KEYWORDS),
];

/// Categorized keyword hits for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    /// Domain the keyword belongs to
    pub domain: Capability,
    /// The matched keyword itself
    pub keyword: &'static str,
}

/// Extract categorized keyword hits by substring match against the prompt
pub fn keyword_hits(prompt: &str) -> Vec<KeywordHit> {
    let lower = prompt.to_lowercase();

    let mut hits = Vec::new();
    for (domain, keywords) in CLASSIFIERS {
        for &keyword in keywords {
            if lower.contains(keyword) {
                hits.push(KeywordHit { domain, keyword });
            }
        }
    }
    hits
}

/// Fallback tokenizer for out-of-vocabulary prompts
///
/// Lower-cases, splits on whitespace and punctuation, discards tokens of two
/// characters or fewer, keeps only tokens matching the coding or math
/// word-lists (a token matches when some keyword contains it, so truncated
/// forms like "calc" still ground the prompt), capped at
/// [`FALLBACK_TOKEN_CAP`] unique tokens.
pub fn fallback_tokens(prompt: &str) -> Vec<String> {
    let lower = prompt.to_lowercase();
    let mut tokens = Vec::new();

    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if token.len() <= 2 {
            continue;
        }
        if !CODING_KEYWORDS.iter().chain(MATH_KEYWORDS).any(|k| k.contains(token)) {
            continue;
        }
        if tokens.iter().any(|t| t == token) {
            continue;
        }
        tokens.push(token.to_owned());
        if tokens.len() == FALLBACK_TOKEN_CAP {
            break;
        }
    }

    tokens
}
