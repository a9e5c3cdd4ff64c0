//! Lexical item model and the lexicon interface consumed by the phrase
//! specifications.
//!
//! `Verb` and `Noun` compute their derived forms lazily through the
//! pattern-action tables in [`crate::core::morphology`] and cache them per
//! instance. The `Lexicon` resolves the forms that are not expressible as
//! pattern rules (the full "be"/"have"/"do" conjugations) and can be
//! extended from RON files.

use once_cell::unsync::OnceCell;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::morphology::{
    double_final_consonant, first_explicit_match, inflect, CONSONANT_DOUBLING_VERBS,
    DEFAULT_3SG_RULE, DEFAULT_ING_RULE, DEFAULT_PAST_PART_RULE, DEFAULT_PAST_RULE,
    DEFAULT_PLURAL_RULE, NOUN_PLURAL_RULES, NULL_AFFIX_VERBS, NULL_PLURAL_NOUNS, VERB_3SG_RULES,
    VERB_ING_RULES, VERB_PAST_PART_RULES, VERB_PAST_RULES,
};
use crate::schema::features::{Conjunction, GrammaticalNumber, Person, Pronoun, Tense};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("malformed phrasal verb: {0:?}")]
    MalformedPhrasalVerb(String),
    #[error("unknown conjunction: {0:?}")]
    UnknownConjunction(String),
    #[error("no lexical item {word:?} in category {category:?}")]
    UnknownItem {
        category: LexicalCategory,
        word: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalCategory {
    Verb,
    Noun,
    Pronoun,
    Conjunction,
}

/// A resolved lexical item.
#[derive(Debug, Clone)]
pub enum LexicalItem {
    Verb(Verb),
    Noun(Noun),
    Pronoun(Pronoun),
    Conjunction(Conjunction),
}

/// A verb with an optional particle ("give up"). Derived forms are
/// computed lazily and cached per instance; repeated calls return the
/// identical string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verb {
    head: String,
    particle: Option<String>,
    #[serde(skip)]
    third_singular: OnceCell<String>,
    #[serde(skip)]
    past: OnceCell<String>,
    #[serde(skip)]
    past_participle: OnceCell<String>,
    #[serde(skip)]
    present_participle: OnceCell<String>,
}

impl PartialEq for Verb {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.particle == other.particle
    }
}

impl Verb {
    /// Parse a base form, splitting off a particle if present. A base
    /// form with more than one internal space, or an empty particle,
    /// fails with `LexiconError::MalformedPhrasalVerb`.
    pub fn new(raw: &str) -> Result<Verb, LexiconError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LexiconError::MalformedPhrasalVerb(raw.to_string()));
        }
        let parts: Vec<&str> = trimmed.split(' ').collect();
        if parts.iter().any(|p| p.is_empty()) || parts.len() > 2 {
            return Err(LexiconError::MalformedPhrasalVerb(raw.to_string()));
        }
        Ok(Verb {
            head: parts[0].to_string(),
            particle: parts.get(1).map(|p| p.to_string()),
            third_singular: OnceCell::new(),
            past: OnceCell::new(),
            past_participle: OnceCell::new(),
            present_participle: OnceCell::new(),
        })
    }

    /// The head word without its particle.
    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn particle(&self) -> Option<&str> {
        self.particle.as_deref()
    }

    /// The canonical base form, particle included.
    pub fn base_form(&self) -> String {
        self.attach_particle(self.head.clone())
    }

    fn attach_particle(&self, inflected: String) -> String {
        match &self.particle {
            Some(p) => format!("{} {}", inflected, p),
            None => inflected,
        }
    }

    fn is_null_affix(&self) -> bool {
        NULL_AFFIX_VERBS.contains(self.head.to_lowercase().as_str())
    }

    fn is_doubling(&self) -> bool {
        CONSONANT_DOUBLING_VERBS.contains(self.head.to_lowercase().as_str())
    }

    /// 3rd-person singular present ("deposits", "tries", "gives up").
    pub fn third_singular(&self) -> &str {
        self.third_singular.get_or_init(|| {
            if self.is_null_affix() {
                return self.base_form();
            }
            self.attach_particle(inflect(&self.head, &VERB_3SG_RULES, &DEFAULT_3SG_RULE))
        })
    }

    /// Simple past ("deposited", "ate", "gave up").
    pub fn past(&self) -> &str {
        self.past
            .get_or_init(|| self.derive_ed(&VERB_PAST_RULES, &DEFAULT_PAST_RULE))
    }

    /// Past participle ("deposited", "eaten", "given up").
    pub fn past_participle(&self) -> &str {
        self.past_participle
            .get_or_init(|| self.derive_ed(&VERB_PAST_PART_RULES, &DEFAULT_PAST_PART_RULE))
    }

    /// Present participle ("depositing", "eating", "giving up").
    pub fn present_participle(&self) -> &str {
        self.present_participle.get_or_init(|| {
            if self.is_null_affix() {
                return self.base_form();
            }
            if let Some(explicit) = first_explicit_match(&self.head, &VERB_ING_RULES) {
                return self.attach_particle(explicit);
            }
            if self.is_doubling() {
                return self.attach_particle(double_final_consonant(&self.head, "ing"));
            }
            self.attach_particle(DEFAULT_ING_RULE.apply(&self.head))
        })
    }

    /// Shared path for the two "-ed" style tables: null-affix list, then
    /// explicit irregular rules, then consonant doubling, then default.
    fn derive_ed(
        &self,
        table: &[crate::core::morphology::PatternActionRule],
        default: &crate::core::morphology::PatternActionRule,
    ) -> String {
        if self.is_null_affix() {
            return self.base_form();
        }
        if let Some(explicit) = first_explicit_match(&self.head, table) {
            return self.attach_particle(explicit);
        }
        if self.is_doubling() {
            return self.attach_particle(double_final_consonant(&self.head, "ed"));
        }
        self.attach_particle(default.apply(&self.head))
    }
}

/// A noun-ish content word with a lazily cached plural.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Noun {
    base: String,
    #[serde(skip)]
    plural: OnceCell<String>,
}

impl PartialEq for Noun {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl Noun {
    pub fn new(base: impl Into<String>) -> Noun {
        Noun {
            base: base.into(),
            plural: OnceCell::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn plural(&self) -> &str {
        self.plural.get_or_init(|| {
            if NULL_PLURAL_NOUNS.contains(self.base.to_lowercase().as_str()) {
                return self.base.clone();
            }
            inflect(&self.base, &NOUN_PLURAL_RULES, &DEFAULT_PLURAL_RULE)
        })
    }
}

/// One entry of a RON lexicon-extension file, overriding derived forms
/// for a single base word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub base: String,
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub third_singular: Option<String>,
    #[serde(default)]
    pub past: Option<String>,
    #[serde(default)]
    pub past_participle: Option<String>,
    #[serde(default)]
    pub present_participle: Option<String>,
}

/// Resolves irregular and suppletive forms not expressible purely as
/// pattern-action rules, plus caller-supplied overrides.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, LexiconEntry>,
}

impl Lexicon {
    pub fn new() -> Lexicon {
        Lexicon::default()
    }

    pub fn add_entry(&mut self, entry: LexiconEntry) {
        self.entries.insert(entry.base.to_lowercase(), entry);
    }

    /// Load lexicon extensions from a RON file containing a list of
    /// `LexiconEntry` values. Later entries override earlier ones.
    pub fn load_from_ron(&mut self, path: &Path) -> Result<(), LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        self.parse_ron(&contents)
    }

    pub fn parse_ron(&mut self, input: &str) -> Result<(), LexiconError> {
        let entries: Vec<LexiconEntry> = ron::from_str(input)?;
        for entry in entries {
            self.add_entry(entry);
        }
        Ok(())
    }

    fn entry(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word.to_lowercase().as_str())
    }

    /// Plural of a noun, honoring overrides.
    pub fn plural(&self, word: &str) -> String {
        if let Some(form) = self.entry(word).and_then(|e| e.plural.clone()) {
            return form;
        }
        Noun::new(word).plural().to_string()
    }

    /// A finite verb form for the given tense and agreement features.
    /// Handles the suppletive "be"/"have"/"do" paradigms that the pattern
    /// tables cannot express person-sensitively.
    pub fn verb_form(
        &self,
        base: &str,
        tense: Tense,
        person: Person,
        number: GrammaticalNumber,
    ) -> String {
        use GrammaticalNumber::*;
        use Person::*;

        let lower = base.to_lowercase();
        if lower == "be" {
            return match (tense, person, number) {
                (Tense::Present, First, Singular) => "am",
                (Tense::Present, Third, Singular) => "is",
                (Tense::Present, _, _) => "are",
                (Tense::Past, First, Singular) | (Tense::Past, Third, Singular) => "was",
                (Tense::Past, _, _) => "were",
                (Tense::Future, _, _) => "be",
            }
            .to_string();
        }

        match tense {
            // Future is realised by the verb group as "will" + base
            Tense::Future => base.to_string(),
            Tense::Present => {
                if person == Third && number == Singular {
                    if let Some(form) = self.entry(base).and_then(|e| e.third_singular.clone()) {
                        return form;
                    }
                    match Verb::new(base) {
                        Ok(verb) => verb.third_singular().to_string(),
                        Err(_) => base.to_string(),
                    }
                } else {
                    base.to_string()
                }
            }
            Tense::Past => {
                if let Some(form) = self.entry(base).and_then(|e| e.past.clone()) {
                    return form;
                }
                match Verb::new(base) {
                    Ok(verb) => verb.past().to_string(),
                    Err(_) => base.to_string(),
                }
            }
        }
    }

    /// Past participle of a verb, honoring overrides.
    pub fn past_participle(&self, base: &str) -> String {
        if let Some(form) = self.entry(base).and_then(|e| e.past_participle.clone()) {
            return form;
        }
        match Verb::new(base) {
            Ok(verb) => verb.past_participle().to_string(),
            Err(_) => base.to_string(),
        }
    }

    /// Present participle of a verb, honoring overrides.
    pub fn present_participle(&self, base: &str) -> String {
        if let Some(form) = self.entry(base).and_then(|e| e.present_participle.clone()) {
            return form;
        }
        match Verb::new(base) {
            Ok(verb) => verb.present_participle().to_string(),
            Err(_) => base.to_string(),
        }
    }

    /// Resolve a word in a lexical category.
    pub fn item(&self, category: LexicalCategory, word: &str) -> Result<LexicalItem, LexiconError> {
        match category {
            LexicalCategory::Verb => Ok(LexicalItem::Verb(Verb::new(word)?)),
            LexicalCategory::Noun => Ok(LexicalItem::Noun(Noun::new(word))),
            LexicalCategory::Pronoun => Pronoun::from_word(word)
                .map(LexicalItem::Pronoun)
                .ok_or_else(|| LexiconError::UnknownItem {
                    category,
                    word: word.to_string(),
                }),
            LexicalCategory::Conjunction => Conjunction::from_name(word)
                .map(LexicalItem::Conjunction)
                .ok_or_else(|| LexiconError::UnknownConjunction(word.to_string())),
        }
    }

    /// Closed conjunction lookup; unrecognized names are a lexical error.
    pub fn conjunction(&self, name: &str) -> Result<Conjunction, LexiconError> {
        Conjunction::from_name(name).ok_or_else(|| LexiconError::UnknownConjunction(name.to_string()))
    }
}
