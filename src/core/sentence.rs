//! Sentence-level specifications: full clauses with voice and agreement,
//! and generic aggregates of coordinated constituents.

use serde::{Deserialize, Serialize};

use crate::core::phrase::propagate_case;
use crate::core::realiser::{list_words, realise_conjunct_list, RealiseContext};
use crate::core::spec::{Spec, SpecMeta};
use crate::schema::anchor::AnchorString;
use crate::schema::features::{
    Case, Conjunction, GrammaticalNumber, Mood, Person, Pronoun, VerbForm,
};

/// A sentence specification: subjects, a verb group, complements, and
/// the modifier slots around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SPhraseSpec {
    pub meta: SpecMeta,
    #[serde(default)]
    pub cue_phrase: Option<Box<Spec>>,
    #[serde(default)]
    pub front_modifiers: Vec<Spec>,
    #[serde(default)]
    pub subjects: Vec<Spec>,
    #[serde(default)]
    pub verb_group: Option<Box<Spec>>,
    #[serde(default)]
    pub complements: Vec<Spec>,
    #[serde(default)]
    pub end_modifiers: Vec<Spec>,
    /// An embedded clause: no capitalisation or terminal punctuation.
    #[serde(default)]
    pub subsentence: bool,
    /// Wrapped in parentheses on realisation.
    #[serde(default)]
    pub parenthetical: bool,
}

impl SPhraseSpec {
    pub fn new() -> Self {
        Self {
            meta: SpecMeta::default(),
            cue_phrase: None,
            front_modifiers: Vec::new(),
            subjects: Vec::new(),
            verb_group: None,
            complements: Vec::new(),
            end_modifiers: Vec::new(),
            subsentence: false,
            parenthetical: false,
        }
    }

    pub fn add_subject(mut self, subject: impl Into<Spec>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    pub fn with_verb_group(mut self, verb_group: impl Into<Spec>) -> Self {
        self.verb_group = Some(Box::new(verb_group.into()));
        self
    }

    pub fn add_complement(mut self, complement: impl Into<Spec>) -> Self {
        self.complements.push(complement.into());
        self
    }

    pub fn add_front_modifier(mut self, modifier: impl Into<Spec>) -> Self {
        self.front_modifiers.push(modifier.into());
        self
    }

    pub fn add_end_modifier(mut self, modifier: impl Into<Spec>) -> Self {
        self.end_modifiers.push(modifier.into());
        self
    }

    pub fn with_cue_phrase(mut self, cue: impl Into<Spec>) -> Self {
        self.cue_phrase = Some(Box::new(cue.into()));
        self
    }

    pub fn head(&self) -> String {
        self.verb_group
            .as_ref()
            .map(|vg| vg.head())
            .unwrap_or_default()
    }

    fn is_passive(&self) -> bool {
        match self.verb_group.as_deref() {
            Some(Spec::VerbGroup(vg)) => vg.features.passive,
            Some(Spec::CoordVerbGroup(vg)) => vg.features.passive,
            _ => false,
        }
    }

    fn is_imperative(&self) -> bool {
        match self.verb_group.as_deref() {
            Some(Spec::VerbGroup(vg)) => vg.features.mood() == Mood::Imperative,
            Some(Spec::CoordVerbGroup(vg)) => vg.features.mood() == Mood::Imperative,
            _ => false,
        }
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        // Voice: passive swaps the logical subject and complement roles
        // and injects a "by"-phrase from the logical subject.
        let passive = self.is_passive();
        let (surface_subjects, surface_complements): (&[Spec], &[Spec]) = if passive {
            (&self.complements, &[])
        } else {
            (&self.subjects, &self.complements)
        };

        // Agreement comes from the surface subject
        let (person, number) = agreement_of(surface_subjects);

        let mut parts: Vec<Vec<AnchorString>> = Vec::new();

        if let Some(cue) = &self.cue_phrase {
            parts.push(cue.realise(ctx));
        }
        for modifier in &self.front_modifiers {
            parts.push(modifier.realise(ctx));
        }

        // Imperative sentences suppress their subject
        if !self.is_imperative() {
            let subject_frags: Vec<Vec<AnchorString>> = surface_subjects
                .iter()
                .map(|s| embed_as_subject(s).realise(ctx))
                .collect();
            parts.push(realise_conjunct_list(subject_frags, Conjunction::And.as_str()));
        }

        if let Some(vg) = self.verb_group.as_deref() {
            let mut vg = vg.clone();
            match &mut vg {
                Spec::VerbGroup(group) => group.set_agreement(person, number),
                Spec::CoordVerbGroup(group) => group.set_agreement(person, number),
                _ => {}
            }
            parts.push(vg.realise(ctx));
        }

        let complement_frags: Vec<Vec<AnchorString>> = surface_complements
            .iter()
            .map(|c| embed_as_complement(c).realise(ctx))
            .collect();
        if !complement_frags.is_empty() {
            parts.push(realise_conjunct_list(
                complement_frags,
                Conjunction::And.as_str(),
            ));
        }

        // Passive: the logical subject surfaces as a trailing "by"-phrase
        if passive && !self.subjects.is_empty() {
            let agents: Vec<Vec<AnchorString>> = self
                .subjects
                .iter()
                .map(|s| propagate_case(s, Case::Object).realise(ctx))
                .collect();
            let mut by_phrase = vec![vec![AnchorString::literal("by")]];
            by_phrase.push(realise_conjunct_list(agents, Conjunction::And.as_str()));
            parts.push(list_words(by_phrase));
        }

        for modifier in &self.end_modifiers {
            parts.push(modifier.realise(ctx));
        }

        let mut frags = list_words(parts);

        if self.parenthetical {
            if let Some(first) = frags.first_mut() {
                first.text.insert(0, '(');
            }
            if let Some(last) = frags.last_mut() {
                last.text.push(')');
            }
        }
        frags
    }
}

impl Default for SPhraseSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// Person/number agreement features of a surface-subject list.
fn agreement_of(subjects: &[Spec]) -> (Person, GrammaticalNumber) {
    if subjects.len() > 1 {
        return (Person::Third, GrammaticalNumber::Plural);
    }
    match subjects.first() {
        Some(Spec::Np(np)) => match np.pronoun {
            Some(p) => (p.person(), p.number()),
            None => (
                Person::Third,
                if np.is_plural() {
                    GrammaticalNumber::Plural
                } else {
                    GrammaticalNumber::Singular
                },
            ),
        },
        Some(Spec::CoordNp(coord)) => (
            Person::Third,
            if coord.is_plural() {
                GrammaticalNumber::Plural
            } else {
                GrammaticalNumber::Singular
            },
        ),
        Some(Spec::Str(leaf)) => match Pronoun::from_word(&leaf.text) {
            Some(p) => (p.person(), p.number()),
            None => (
                Person::Third,
                if leaf.plural {
                    GrammaticalNumber::Plural
                } else {
                    GrammaticalNumber::Singular
                },
            ),
        },
        _ => (Person::Third, GrammaticalNumber::Singular),
    }
}

/// A sentence embedded as a subject is forced into gerund form, unless
/// it already carries an embedded (non-finite) form. Non-sentence
/// subjects take subject case.
fn embed_as_subject(spec: &Spec) -> Spec {
    match spec {
        Spec::Sentence(s) => embed_sentence(s, VerbForm::Gerund),
        other => propagate_case(other, Case::Subject),
    }
}

/// A sentence embedded as a complement is forced into infinitive form,
/// unless it already carries an embedded form. Non-sentence complements
/// take object case.
fn embed_as_complement(spec: &Spec) -> Spec {
    match spec {
        Spec::Sentence(s) => embed_sentence(s, VerbForm::Infinitive),
        other => propagate_case(other, Case::Object),
    }
}

fn embed_sentence(sentence: &SPhraseSpec, form: VerbForm) -> Spec {
    let mut embedded = sentence.clone();
    embedded.subsentence = true;
    if let Some(vg) = embedded.verb_group.as_deref_mut() {
        let features = match vg {
            Spec::VerbGroup(group) => Some(&mut group.features),
            Spec::CoordVerbGroup(group) => Some(&mut group.features),
            _ => None,
        };
        if let Some(features) = features {
            // No double transformation for already-embedded forms;
            // imperative clauses stay in base form
            if features.form() == VerbForm::Normal {
                let _ = features.set_form(form);
            }
        }
    }
    Spec::Sentence(embedded)
}

/// N constituents joined by a conjunction, with front and end modifier
/// slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePhraseSpec {
    pub meta: SpecMeta,
    pub constituents: Vec<Spec>,
    #[serde(default)]
    pub conjunction: Conjunction,
    #[serde(default)]
    pub front_modifiers: Vec<Spec>,
    #[serde(default)]
    pub end_modifiers: Vec<Spec>,
}

impl AggregatePhraseSpec {
    pub fn new(constituents: Vec<Spec>, conjunction: Conjunction) -> Self {
        Self {
            meta: SpecMeta::default(),
            constituents,
            conjunction,
            front_modifiers: Vec::new(),
            end_modifiers: Vec::new(),
        }
    }

    pub fn head(&self) -> String {
        self.constituents
            .first()
            .map(|c| c.head())
            .unwrap_or_default()
    }

    pub fn realise(&self, ctx: &RealiseContext<'_>) -> Vec<AnchorString> {
        let mut parts: Vec<Vec<AnchorString>> = Vec::new();
        for modifier in &self.front_modifiers {
            parts.push(modifier.realise(ctx));
        }
        let elements: Vec<Vec<AnchorString>> = self
            .constituents
            .iter()
            .map(|c| c.realise(ctx))
            .collect();
        parts.push(realise_conjunct_list(elements, self.conjunction.as_str()));
        for modifier in &self.end_modifiers {
            parts.push(modifier.realise(ctx));
        }
        list_words(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::{Lexicon, Verb};
    use crate::core::phrase::NpPhraseSpec;
    use crate::core::verb_group::VerbGroupSpec;
    use crate::schema::anchor::joined_text;
    use crate::schema::features::{Determiner, Tense};

    fn realise(spec: &Spec) -> String {
        let lexicon = Lexicon::new();
        let ctx = RealiseContext { lexicon: &lexicon };
        joined_text(&spec.realise(&ctx))
    }

    fn vg(base: &str) -> VerbGroupSpec {
        VerbGroupSpec::new(Verb::new(base).unwrap())
    }

    #[test]
    fn active_sentence() {
        let s = SPhraseSpec::new()
            .add_subject(NpPhraseSpec::new("paper").with_determiner(Determiner::The))
            .with_verb_group(vg("describe"))
            .add_complement(NpPhraseSpec::new("experiment").with_determiner(Determiner::The));
        assert_eq!(realise(&Spec::Sentence(s)), "the paper describes the experiment");
    }

    #[test]
    fn passive_swaps_roles_and_adds_by_phrase() {
        let mut verb = vg("deposit");
        verb.features.tense = Tense::Past;
        verb.features.passive = true;
        let s = SPhraseSpec::new()
            .add_subject("John")
            .with_verb_group(verb)
            .add_complement(NpPhraseSpec::new("paper").with_determiner(Determiner::The));
        assert_eq!(realise(&Spec::Sentence(s)), "the paper was deposited by John");
    }

    #[test]
    fn passive_agreement_from_surface_subject() {
        let mut verb = vg("deposit");
        verb.features.tense = Tense::Past;
        verb.features.passive = true;
        let s = SPhraseSpec::new()
            .add_subject("John")
            .with_verb_group(verb)
            .add_complement(
                NpPhraseSpec::new("paper")
                    .with_determiner(Determiner::The)
                    .plural(),
            );
        assert_eq!(
            realise(&Spec::Sentence(s)),
            "the papers were deposited by John"
        );
    }

    #[test]
    fn pronoun_subject_agreement() {
        let s = SPhraseSpec::new()
            .add_subject("I")
            .with_verb_group(vg("be"))
            .add_complement("ready");
        assert_eq!(realise(&Spec::Sentence(s)), "I am ready");
    }

    #[test]
    fn plural_subjects_agree() {
        let s = SPhraseSpec::new()
            .add_subject("John")
            .add_subject("Mary")
            .with_verb_group(vg("be"))
            .add_complement("here");
        assert_eq!(realise(&Spec::Sentence(s)), "John and Mary are here");
    }

    #[test]
    fn sentence_subject_becomes_gerund() {
        let inner = SPhraseSpec::new()
            .add_subject("it")
            .with_verb_group(vg("eat"));
        let mut outer_vg = vg("surprise");
        outer_vg.features.tense = Tense::Past;
        let outer = SPhraseSpec::new()
            .add_subject(Spec::Sentence(inner))
            .with_verb_group(outer_vg)
            .add_complement("me");
        // The embedded clause keeps its own subject but its verb is a gerund
        assert_eq!(realise(&Spec::Sentence(outer)), "it eating surprised me");
    }

    #[test]
    fn sentence_complement_becomes_infinitive() {
        let inner = SPhraseSpec::new().with_verb_group(vg("leave"));
        let s = SPhraseSpec::new()
            .add_subject("she")
            .with_verb_group(vg("want"))
            .add_complement(Spec::Sentence(inner));
        assert_eq!(realise(&Spec::Sentence(s)), "she wants to leave");
    }

    #[test]
    fn embedded_form_not_doubly_transformed() {
        let mut inner_vg = vg("leave");
        inner_vg.features.set_form(VerbForm::Gerund).unwrap();
        let inner = SPhraseSpec::new().with_verb_group(inner_vg);
        let s = SPhraseSpec::new()
            .add_subject("she")
            .with_verb_group(vg("regret"))
            .add_complement(Spec::Sentence(inner));
        // Already gerund: not forced to infinitive
        assert_eq!(realise(&Spec::Sentence(s)), "she regrets leaving");
    }

    #[test]
    fn parenthetical_wrapped() {
        let mut s = SPhraseSpec::new()
            .add_subject("it")
            .with_verb_group(vg("matter"));
        s.parenthetical = true;
        assert_eq!(realise(&Spec::Sentence(s)), "(it matters)");
    }

    #[test]
    fn cue_phrase_and_modifiers() {
        let s = SPhraseSpec::new()
            .with_cue_phrase("however,")
            .add_front_modifier("yesterday")
            .add_subject("she")
            .with_verb_group(vg("agree"))
            .add_end_modifier("at once");
        assert_eq!(
            realise(&Spec::Sentence(s)),
            "however, yesterday she agrees at once"
        );
    }

    #[test]
    fn imperative_suppresses_subject() {
        let mut verb = vg("deposit");
        verb.features.set_mood(Mood::Imperative).unwrap();
        let s = SPhraseSpec::new()
            .add_subject("you")
            .with_verb_group(verb)
            .add_complement(NpPhraseSpec::new("paper").with_determiner(Determiner::The));
        assert_eq!(realise(&Spec::Sentence(s)), "deposit the paper");
    }

    #[test]
    fn aggregate_joins_constituents() {
        let agg = AggregatePhraseSpec::new(
            vec![Spec::from("red"), Spec::from("white"), Spec::from("blue")],
            Conjunction::And,
        );
        assert_eq!(realise(&Spec::Aggregate(agg)), "red, white, and blue");
    }

    #[test]
    fn aggregate_with_modifiers() {
        let mut agg = AggregatePhraseSpec::new(
            vec![Spec::from("red"), Spec::from("white")],
            Conjunction::Or,
        );
        agg.front_modifiers.push(Spec::from("either"));
        assert_eq!(realise(&Spec::Aggregate(agg)), "either red or white");
    }
}
