//! Rule-based polarity scoring over a valence lexicon (VADER heuristics).

use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;

/// Empirical boost for booster words ("very", "extremely")
const B_INCR: f64 = 0.293;
/// Empirical dampening for hedge words ("slightly", "barely")
const B_DECR: f64 = -0.293;
/// ALL-CAPS emphasis in mixed-case text
const C_INCR: f64 = 0.733;
/// Valence multiplier for a negated word
const N_SCALAR: f64 = -0.74;
/// Normalization constant approximating the max expected raw score
const ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously", "fully",
    "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "unbelievably", "unusually", "utterly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "kindof", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta", "sortof",
];

/// Sentiment proportions plus the normalized compound score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Normalized sum of valences, in `[-1.0, 1.0]`
    pub compound: f64,
}

fn booster_scalar(word: &str) -> Option<f64> {
    if BOOSTERS_UP.contains(&word) {
        Some(B_INCR)
    } else if BOOSTERS_DOWN.contains(&word) {
        Some(B_DECR)
    } else {
        None
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

/// Normalize a raw valence sum into `[-1.0, 1.0]`
pub fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

struct Token {
    raw: String,
    lower: String,
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|word| {
            let cleaned = word
                .replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string();
            // Single characters carry no sentiment
            if cleaned.chars().count() <= 1 {
                return None;
            }
            Some(Token {
                lower: cleaned.to_lowercase(),
                raw: cleaned,
            })
        })
        .collect()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();

    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };

    exclamations * 0.292 + question_amp
}

/// Lexicon-based sentiment intensity analyzer
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score a text. Empty or unknown text yields all-neutral zero scores.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let caps_count = tokens.iter().filter(|t| is_all_caps(&t.raw)).count();
        let cap_differential = caps_count > 0 && caps_count < tokens.len();

        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|i| self.token_valence(&tokens, i, cap_differential))
            .collect();

        apply_but_shift(&tokens, &mut sentiments);

        self.score_valence(&sentiments, text)
    }

    fn token_valence(&self, tokens: &[Token], i: usize, cap_differential: bool) -> f64 {
        let token = &tokens[i];

        if booster_scalar(&token.lower).is_some() {
            return 0.0;
        }
        // "kind of" is a hedge, not a kindness
        if token.lower == "kind" && tokens.get(i + 1).is_some_and(|n| n.lower == "of") {
            return 0.0;
        }

        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };

        if cap_differential && is_all_caps(&token.raw) {
            valence += C_INCR.copysign(valence);
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let prev = &tokens[i - distance];
            if self.lexicon.contains(&prev.lower) {
                continue;
            }

            if let Some(scalar) = booster_scalar(&prev.lower) {
                let mut scalar = if valence < 0.0 { -scalar } else { scalar };
                if cap_differential && is_all_caps(&prev.raw) {
                    scalar += C_INCR.copysign(valence);
                }
                scalar *= match distance {
                    2 => 0.95,
                    3 => 0.9,
                    _ => 1.0,
                };
                valence += scalar;
            }

            if is_negation(&prev.lower) {
                valence *= N_SCALAR;
            }
        }

        valence
    }

    fn score_valence(&self, sentiments: &[f64], text: &str) -> PolarityScores {
        let mut sum: f64 = sentiments.iter().sum();
        if sum == 0.0 {
            return PolarityScores {
                neutral: if sentiments.is_empty() { 0.0 } else { 1.0 },
                ..PolarityScores::default()
            };
        }

        let punct = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += punct;
        } else {
            sum -= punct;
        }
        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += punct;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= punct;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;

        PolarityScores {
            positive: round3(pos_sum / total),
            negative: round3(neg_sum.abs() / total),
            neutral: round3(neu_count / total),
            compound: round4(compound),
        }
    }
}

/// Down-weight sentiment before a contrastive "but", up-weight after it
fn apply_but_shift(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(but_index) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };

    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but_index {
            *s *= 0.5;
        } else if i > but_index {
            *s *= 1.5;
        }
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}
