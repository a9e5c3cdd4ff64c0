//! Verb group specifications: the auxiliary-stack realisation algorithm
//! and coordinated verb groups with shared auxiliaries.
//!
//! The word sequence is built outward from the head verb as an explicit
//! ordered list by successive front insertions: passive wraps in "be" +
//! past participle, progressive in "be" + present participle, perfect in
//! "have" + past participle; a future tense or explicit modal prepends
//! a modal and freezes the wrapped verb to its base form; negation
//! inserts "not" after the first auxiliary (with "do"-support when none
//! exists); finally the front verb is inflected for person/number/tense
//! unless the form is non-finite.

use serde::{Deserialize, Serialize};

use crate::core::lexicon::Verb;
use crate::core::realiser::{list_words, realise_conjunct_list, RealiseContext};
use crate::core::spec::SpecMeta;
use crate::schema::anchor::{collapse, Anchor, AnchorString};
use crate::schema::features::{
    Conjunction, GenerationConfigError, GrammaticalNumber, Mood, Person, Tense, VerbForm,
};

/// The grammatical feature bundle of a verb group. Shared between a
/// plain verb group and all conjuncts of a coordinated one.
///
/// Deserialization goes through the same form/mood validation as
/// assignment, so a planner-shipped tree cannot smuggle in an
/// incompatible combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVerbFeatures")]
pub struct VerbFeatures {
    pub modal: Option<String>,
    pub tense: Tense,
    mood: Mood,
    form: VerbForm,
    pub perfect: bool,
    pub progressive: bool,
    pub passive: bool,
    pub negated: bool,
    pub person: Person,
    pub number: GrammaticalNumber,
}

/// Wire shape of [`VerbFeatures`], validated on conversion.
#[derive(Deserialize)]
struct RawVerbFeatures {
    #[serde(default)]
    modal: Option<String>,
    #[serde(default)]
    tense: Tense,
    #[serde(default)]
    mood: Mood,
    #[serde(default)]
    form: VerbForm,
    #[serde(default)]
    perfect: bool,
    #[serde(default)]
    progressive: bool,
    #[serde(default)]
    passive: bool,
    #[serde(default)]
    negated: bool,
    #[serde(default)]
    person: Person,
    #[serde(default)]
    number: GrammaticalNumber,
}

impl TryFrom<RawVerbFeatures> for VerbFeatures {
    type Error = GenerationConfigError;

    fn try_from(raw: RawVerbFeatures) -> Result<Self, Self::Error> {
        if !raw.form.compatible_with(raw.mood) {
            return Err(GenerationConfigError::IncompatibleFormMood {
                form: raw.form,
                mood: raw.mood,
            });
        }
        Ok(Self {
            modal: raw.modal,
            tense: raw.tense,
            mood: raw.mood,
            form: raw.form,
            perfect: raw.perfect,
            progressive: raw.progressive,
            passive: raw.passive,
            negated: raw.negated,
            person: raw.person,
            number: raw.number,
        })
    }
}

impl Default for VerbFeatures {
    fn default() -> Self {
        Self {
            modal: None,
            tense: Tense::Present,
            mood: Mood::Indicative,
            form: VerbForm::Normal,
            perfect: false,
            progressive: false,
            passive: false,
            negated: false,
            person: Person::Third,
            number: GrammaticalNumber::Singular,
        }
    }
}

impl VerbFeatures {
    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn form(&self) -> VerbForm {
        self.form
    }

    /// Set the surface form. An incompatible form/mood combination is
    /// rejected here, at the point of assignment.
    pub fn set_form(&mut self, form: VerbForm) -> Result<(), GenerationConfigError> {
        if !form.compatible_with(self.mood) {
            return Err(GenerationConfigError::IncompatibleFormMood {
                form,
                mood: self.mood,
            });
        }
        self.form = form;
        Ok(())
    }

    /// Set the mood, validating against the current form.
    pub fn set_mood(&mut self, mood: Mood) -> Result<(), GenerationConfigError> {
        if !self.form.compatible_with(mood) {
            return Err(GenerationConfigError::IncompatibleFormMood {
                form: self.form,
                mood,
            });
        }
        self.mood = mood;
        Ok(())
    }

    fn future_like(&self) -> bool {
        self.tense == Tense::Future || self.modal.is_some()
    }
}

/// A verb group: one head verb plus the feature bundle that decides its
/// auxiliary stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbGroupSpec {
    pub meta: SpecMeta,
    pub verb: Verb,
    pub features: VerbFeatures,
}

impl VerbGroupSpec {
    pub fn new(verb: Verb) -> Self {
        Self {
            meta: SpecMeta::default(),
            verb,
            features: VerbFeatures::default(),
        }
    }

    pub fn head(&self) -> String {
        self.verb.base_form()
    }

    /// Agreement propagated from the surface subject at realisation
    /// time.
    pub fn set_agreement(&mut self, person: Person, number: GrammaticalNumber) {
        self.features.person = person;
        self.features.number = number;
    }

    /// The auxiliary prefix: every word slot before the content verb.
    fn auxiliary_words(&self, ctx: &RealiseContext<'_>) -> Vec<String> {
        let f = &self.features;
        let lex = ctx.lexicon;
        let mut chain: Vec<String> = Vec::new();

        // Wraps, innermost first. Each wrap transforms the previous
        // front slot and prepends its own auxiliary. The content verb's
        // transformation is accounted for by `content_word`.
        if f.passive {
            chain.insert(0, "be".to_string());
        }
        if f.progressive {
            if let Some(front) = chain.first_mut() {
                *front = lex.present_participle(front);
            }
            chain.insert(0, "be".to_string());
        }
        if f.perfect {
            if let Some(front) = chain.first_mut() {
                *front = lex.past_participle(front);
            }
            chain.insert(0, "have".to_string());
        }
        if f.future_like() {
            // The wrapped verb is frozen to its base form
            let modal = f.modal.clone().unwrap_or_else(|| "will".to_string());
            chain.insert(0, modal);
        }

        // "do"-support: negation with no auxiliary yet
        if f.negated && chain.is_empty() && f.form == VerbForm::Normal {
            chain.insert(0, "do".to_string());
        }

        // Front-slot inflection
        match f.form {
            VerbForm::Normal => {
                if f.mood != Mood::Imperative && !f.future_like() {
                    if let Some(front) = chain.first_mut() {
                        *front = lex.verb_form(front, f.tense, f.person, f.number);
                    }
                }
            }
            VerbForm::Gerund => {
                if let Some(front) = chain.first_mut() {
                    *front = lex.present_participle(front);
                }
            }
            VerbForm::Infinitive => {}
        }

        // Negation: "not" after the first auxiliary for finite groups,
        // in front of the whole group for non-finite ones
        if f.negated {
            if f.form == VerbForm::Normal {
                let at = 1.min(chain.len());
                chain.insert(at, "not".to_string());
            } else {
                chain.insert(0, "not".to_string());
            }
        }

        // Infinitive marker; "not to eat" rather than "to not eat"
        if f.form == VerbForm::Infinitive {
            let at = if f.negated { 1 } else { 0 };
            chain.insert(at, "to".to_string());
        }

        chain
    }

    /// The content verb's surface form, decided by the innermost wrap
    /// that reaches it (or by finite inflection when nothing wraps it).
    fn content_word(&self, ctx: &RealiseContext<'_>) -> String {
        let f = &self.features;
        if f.passive {
            return self.verb.past_participle().to_string();
        }
        if f.progressive {
            return self.verb.present_participle().to_string();
        }
        if f.perfect {
            return self.verb.past_participle().to_string();
        }
        if f.future_like() {
            return self.verb.base_form();
        }
        match f.form {
            VerbForm::Gerund => self.verb.present_participle().to_string(),
            VerbForm::Infinitive => self.verb.base_form(),
            VerbForm::Normal => {
                if f.mood == Mood::Imperative || f.negated {
                    // do-support carries the inflection
                    self.verb.base_form()
                } else {
                    let head = ctx
                        .lexicon
                        .verb_form(self.verb.head(), f.tense, f.person, f.number);
                    match self.verb.particle() {
                        Some(p) => format!("{} {}", head, p),
                        None => head,
                    }
                }
            }
        }
    }

    /// The auxiliary prefix and the main-verb suffix as separately
    /// retrievable fragment sequences — coordinated groups realise one
    /// shared prefix across several conjoined main verbs.
    pub fn realise_split(
        &self,
        ctx: &RealiseContext<'_>,
    ) -> (Vec<AnchorString>, Vec<AnchorString>) {
        let prefix = self
            .auxiliary_words(ctx)
            .into_iter()
            .map(AnchorString::literal)
            .collect();
        let main = vec![AnchorString::literal(self.content_word(ctx))];
        (prefix, main)
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let (prefix, main) = self.realise_split(ctx);
        list_words(vec![prefix, main])
    }
}

/// One conjunct of a coordinated verb group, carrying its own anchor:
/// each conjunct maps to a different domain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbConjunct {
    pub verb: Verb,
    #[serde(default)]
    pub anchor: Option<Anchor>,
}

impl VerbConjunct {
    pub fn new(verb: Verb) -> Self {
        Self { verb, anchor: None }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

/// N verbs under one shared feature bundle. Aggregated realisation
/// shares the auxiliary prefix across the conjoined main verbs ("is
/// eating and drinking"); non-aggregated realisation conjoins full verb
/// groups ("is eating and is drinking").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateVerbGroupSpec {
    pub meta: SpecMeta,
    pub conjuncts: Vec<VerbConjunct>,
    pub features: VerbFeatures,
    #[serde(default)]
    pub conjunction: Conjunction,
    #[serde(default)]
    pub aggregate: bool,
}

impl CoordinateVerbGroupSpec {
    pub fn new(conjuncts: Vec<VerbConjunct>) -> Self {
        Self {
            meta: SpecMeta::default(),
            conjuncts,
            features: VerbFeatures::default(),
            conjunction: Conjunction::And,
            aggregate: false,
        }
    }

    pub fn head(&self) -> String {
        self.conjuncts
            .first()
            .map(|c| c.verb.base_form())
            .unwrap_or_default()
    }

    pub fn set_agreement(&mut self, person: Person, number: GrammaticalNumber) {
        self.features.person = person;
        self.features.number = number;
    }

    fn group_for(&self, conjunct: &VerbConjunct) -> VerbGroupSpec {
        VerbGroupSpec {
            meta: SpecMeta::default(),
            verb: conjunct.verb.clone(),
            features: self.features.clone(),
        }
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let Some(first) = self.conjuncts.first() else {
            return Vec::new();
        };

        if self.aggregate {
            let (prefix, _) = self.group_for(first).realise_split(ctx);
            let mains: Vec<Vec<AnchorString>> = self
                .conjuncts
                .iter()
                .map(|c| {
                    let word = self.group_for(c).content_word(ctx);
                    vec![AnchorString::new(word, c.anchor.clone())]
                })
                .collect();
            let conjoined = realise_conjunct_list(mains, self.conjunction.as_str());
            list_words(vec![prefix, conjoined])
        } else {
            let elements: Vec<Vec<AnchorString>> = self
                .conjuncts
                .iter()
                .map(|c| {
                    let frags = self.group_for(c).realise(ctx);
                    match &c.anchor {
                        Some(anchor) => vec![collapse(frags, Some(anchor.clone()))],
                        None => frags,
                    }
                })
                .collect();
            realise_conjunct_list(elements, self.conjunction.as_str())
        }
    }
}
