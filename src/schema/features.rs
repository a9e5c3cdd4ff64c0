/// Grammatical feature sets. These are closed case sets with per-case
/// behavior — tagged variants with lookup methods, never string-keyed
/// conditionals.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An incompatible combination of grammatical features, rejected at the
/// point of assignment rather than deferred to realisation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationConfigError {
    #[error("verb form {form:?} is incompatible with mood {mood:?}")]
    IncompatibleFormMood { form: VerbForm, mood: Mood },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
    Past,
    Present,
    Future,
}

impl Default for Tense {
    fn default() -> Self {
        Self::Present
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    First,
    Second,
    Third,
}

impl Default for Person {
    fn default() -> Self {
        Self::Third
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammaticalNumber {
    Singular,
    Plural,
}

impl Default for GrammaticalNumber {
    fn default() -> Self {
        Self::Singular
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Indicative,
    Imperative,
    Subjunctive,
}

impl Default for Mood {
    fn default() -> Self {
        Self::Indicative
    }
}

/// Surface form of a verb group. `Normal` is the finite form; gerund and
/// infinitive are the non-finite forms forced onto embedded sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbForm {
    Normal,
    Gerund,
    Infinitive,
}

impl Default for VerbForm {
    fn default() -> Self {
        Self::Normal
    }
}

impl VerbForm {
    /// Gerund and infinitive forms cannot carry an imperative mood.
    pub fn compatible_with(self, mood: Mood) -> bool {
        !(mood == Mood::Imperative && self != VerbForm::Normal)
    }
}

/// Grammatical case of a noun phrase or pronoun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    Subject,
    Object,
    Genitive,
}

impl Default for Case {
    fn default() -> Self {
        Self::Subject
    }
}

/// Determiner slot of a noun phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Determiner {
    None,
    The,
    /// Indefinite article; realised as "a" or "an" from the first letter
    /// of the realised head, suppressed entirely when plural.
    A,
    This,
    That,
    These,
    Those,
    Every,
    No,
}

impl Default for Determiner {
    fn default() -> Self {
        Self::None
    }
}

impl Determiner {
    /// The fixed surface form, or `None` for the indefinite article whose
    /// form depends on the realised head.
    pub fn fixed_form(self) -> Option<&'static str> {
        match self {
            Self::None => Some(""),
            Self::The => Some("the"),
            Self::A => None,
            Self::This => Some("this"),
            Self::That => Some("that"),
            Self::These => Some("these"),
            Self::Those => Some("those"),
            Self::Every => Some("every"),
            Self::No => Some("no"),
        }
    }
}

/// Personal pronouns with per-case lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pronoun {
    I,
    You,
    He,
    She,
    It,
    We,
    They,
}

impl Pronoun {
    /// Nominative/subject form.
    pub fn subject(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::You => "you",
            Self::He => "he",
            Self::She => "she",
            Self::It => "it",
            Self::We => "we",
            Self::They => "they",
        }
    }

    /// Accusative/object form.
    pub fn object(self) -> &'static str {
        match self {
            Self::I => "me",
            Self::You => "you",
            Self::He => "him",
            Self::She => "her",
            Self::It => "it",
            Self::We => "us",
            Self::They => "them",
        }
    }

    /// Genitive determiner form.
    pub fn genitive(self) -> &'static str {
        match self {
            Self::I => "my",
            Self::You => "your",
            Self::He => "his",
            Self::She => "her",
            Self::It => "its",
            Self::We => "our",
            Self::They => "their",
        }
    }

    /// Reflexive form.
    pub fn reflexive(self) -> &'static str {
        match self {
            Self::I => "myself",
            Self::You => "yourself",
            Self::He => "himself",
            Self::She => "herself",
            Self::It => "itself",
            Self::We => "ourselves",
            Self::They => "themselves",
        }
    }

    pub fn case_form(self, case: Case) -> &'static str {
        match case {
            Case::Subject => self.subject(),
            Case::Object => self.object(),
            Case::Genitive => self.genitive(),
        }
    }

    pub fn person(self) -> Person {
        match self {
            Self::I | Self::We => Person::First,
            Self::You => Person::Second,
            Self::He | Self::She | Self::It | Self::They => Person::Third,
        }
    }

    pub fn number(self) -> GrammaticalNumber {
        match self {
            Self::I | Self::He | Self::She | Self::It => GrammaticalNumber::Singular,
            Self::You | Self::We | Self::They => GrammaticalNumber::Plural,
        }
    }

    /// Look a pronoun up by any of its surface forms.
    pub fn from_word(word: &str) -> Option<Pronoun> {
        let lower = word.to_lowercase();
        match lower.as_str() {
            "i" | "me" | "my" => Some(Self::I),
            "you" | "your" => Some(Self::You),
            "he" | "him" => Some(Self::He),
            "she" | "her" => Some(Self::She),
            "it" | "its" => Some(Self::It),
            "we" | "us" | "our" => Some(Self::We),
            "they" | "them" | "their" => Some(Self::They),
            _ => None,
        }
    }
}

/// Coordinating conjunctions recognised by the aggregation machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conjunction {
    And,
    Or,
    But,
    Nor,
}

impl Default for Conjunction {
    fn default() -> Self {
        Self::And
    }
}

impl Conjunction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::But => "but",
            Self::Nor => "nor",
        }
    }

    /// Closed lookup by name. Unknown names are reported by the lexicon
    /// as a `LexiconError`.
    pub fn from_name(name: &str) -> Option<Conjunction> {
        match name {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "but" => Some(Self::But),
            "nor" => Some(Self::Nor),
            _ => None,
        }
    }
}
