//! The realiser proper: spacing, conjunct lists, punctuation, sentence
//! and header orthography, and the top-level entry point that turns a
//! specification tree into anchored text fragments.

use crate::core::lexicon::Lexicon;
use crate::core::spec::Spec;
use crate::schema::anchor::AnchorString;

/// Opens a highlighted region. Embedded into the first fragment of a
/// flashed constituent so the anchor structure is unaffected.
pub const HIGHLIGHT_START: &str = "<<";
/// Closes a highlighted region.
pub const HIGHLIGHT_END: &str = ">>";
/// Separates paragraphs and terminates lists.
pub const PARAGRAPH_BREAK: &str = "\n\n";
/// Prefixes each list item.
pub const LIST_ITEM_MARK: &str = "\n- ";
/// Terminates a set or paragraph header.
pub const HEADER_MARK: &str = "\n";

/// Characters that never take a space in front of them.
const NO_SPACE_BEFORE: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\''];
/// Characters that never take a space after them.
const NO_SPACE_AFTER: &[char] = &['(', '[', '{'];

/// Sentence-final punctuation, strongest first. A weaker mark never
/// replaces a stronger one already in place.
const PUNCTUATION_STRENGTH: &[char] = &['!', '?', '.', ':', ';', '-', ','];

/// Marks that genuinely end a sentence. A trailing comma, semicolon, or
/// dash still gets upgraded to a period.
const TERMINAL_MARKS: &[char] = &['!', '?', '.', ':'];

/// Everything a node needs to realise itself.
pub struct RealiseContext<'a> {
    pub lexicon: &'a Lexicon,
}

/// Layout fragments (item marks, paragraph breaks, headers' trailing
/// newline) are exempt from spacing, trimming, and capitalisation.
pub fn is_markup(frag: &AnchorString) -> bool {
    frag.text.starts_with('\n')
}

/// Concatenates fragment sequences, inserting single-space literal
/// fragments where two printable runs meet. No space is added before
/// closing punctuation, after an opening bracket, or around markup.
pub fn list_words(parts: Vec<Vec<AnchorString>>) -> Vec<AnchorString> {
    let mut out: Vec<AnchorString> = Vec::new();
    let mut last_char: Option<char> = None;
    for part in parts {
        for frag in part {
            let first = match frag.text.chars().next() {
                Some(c) => c,
                None => continue,
            };
            if let Some(prev) = last_char {
                let space = !prev.is_whitespace()
                    && !NO_SPACE_AFTER.contains(&prev)
                    && !first.is_whitespace()
                    && !NO_SPACE_BEFORE.contains(&first);
                if space {
                    out.push(AnchorString::literal(" "));
                }
            }
            last_char = frag.text.chars().last();
            out.push(frag);
        }
    }
    out
}

/// Joins realised elements into a natural-language list: nothing for
/// zero elements, the element itself for one, `X and Y` for two, and an
/// Oxford-comma list for three or more. Separators escalate to
/// semicolons when any element already contains a comma or semicolon.
pub fn realise_conjunct_list(
    elements: Vec<Vec<AnchorString>>,
    conjunct: &str,
) -> Vec<AnchorString> {
    let mut elements: Vec<Vec<AnchorString>> = elements
        .into_iter()
        .filter(|e| e.iter().any(|f| !f.text.trim().is_empty()))
        .collect();
    match elements.len() {
        0 => Vec::new(),
        1 => elements.pop().unwrap_or_default(),
        2 => {
            let second = elements.pop().unwrap_or_default();
            let first = elements.pop().unwrap_or_default();
            list_words(vec![first, vec![AnchorString::literal(conjunct)], second])
        }
        n => {
            let nested = elements
                .iter()
                .flatten()
                .any(|f| f.text.contains(',') || f.text.contains(';'));
            let separator = if nested { ";" } else { "," };
            let mut parts: Vec<Vec<AnchorString>> = Vec::new();
            for (i, element) in elements.into_iter().enumerate() {
                if i > 0 {
                    parts.push(vec![AnchorString::literal(separator)]);
                    if i == n - 1 {
                        parts.push(vec![AnchorString::literal(conjunct)]);
                    }
                }
                parts.push(element);
            }
            list_words(parts)
        }
    }
}

fn strength(mark: char) -> Option<usize> {
    PUNCTUATION_STRENGTH.iter().position(|&c| c == mark)
}

/// Appends `mark` to the last printable fragment. If that fragment
/// already ends in punctuation, the existing mark is replaced only when
/// the new one is strictly stronger; adding the same or a weaker mark is
/// a no-op.
pub fn add_punctuation(frags: &mut Vec<AnchorString>, mark: char) {
    let last = match frags
        .iter_mut()
        .rev()
        .find(|f| !is_markup(f) && !f.text.trim().is_empty())
    {
        Some(frag) => frag,
        None => return,
    };
    let trailing = last.text.trim_end().chars().last();
    match trailing.and_then(strength) {
        Some(existing) => {
            if strength(mark).is_some_and(|new| new < existing) {
                let trimmed_len = last.text.trim_end().len();
                last.text.truncate(trimmed_len);
                last.text.pop();
                last.text.push(mark);
            }
        }
        None => {
            let trimmed_len = last.text.trim_end().len();
            last.text.truncate(trimmed_len);
            last.text.push(mark);
        }
    }
}

fn trim_edges(frags: &mut Vec<AnchorString>) {
    if let Some(first) = frags.iter_mut().find(|f| !is_markup(f)) {
        first.text = first.text.trim_start().to_string();
    }
    if let Some(last) = frags.iter_mut().rev().find(|f| !is_markup(f)) {
        last.text = last.text.trim_end().to_string();
    }
    frags.retain(|f| !f.text.is_empty());
}

fn capitalize_first(frags: &mut [AnchorString]) {
    let first = match frags.iter_mut().find(|f| !is_markup(f)) {
        Some(frag) => frag,
        None => return,
    };
    if let Some((idx, c)) = first.text.char_indices().find(|(_, c)| c.is_alphabetic()) {
        if c.is_lowercase() {
            let upper: String = c.to_uppercase().collect();
            first.text.replace_range(idx..idx + c.len_utf8(), &upper);
        }
    }
}

/// Sentence orthography: trim the edges, capitalise the first letter,
/// and close with a period. A trailing terminal mark (":" or "?") is
/// left alone; a weak mark ("," or ";") is upgraded to the period.
pub fn sentence_orthography(mut frags: Vec<AnchorString>) -> Vec<AnchorString> {
    trim_edges(&mut frags);
    capitalize_first(&mut frags);
    let already_terminated = frags
        .iter()
        .rev()
        .find(|f| !is_markup(f) && !f.text.trim().is_empty())
        .and_then(|f| f.text.trim_end().chars().last())
        .is_some_and(|c| TERMINAL_MARKS.contains(&c));
    if !already_terminated {
        add_punctuation(&mut frags, '.');
    }
    frags
}

/// List headers read as a sentence ending in a colon.
pub fn list_header_orthography(frags: Vec<AnchorString>) -> Vec<AnchorString> {
    let mut frags = sentence_orthography(frags);
    if let Some(last) = frags
        .iter_mut()
        .rev()
        .find(|f| !is_markup(f) && !f.text.trim().is_empty())
    {
        if last.text.ends_with('.') {
            last.text.pop();
        }
        last.text.push(':');
    }
    frags
}

/// Set and paragraph headers: capitalised, untrimmed of punctuation, and
/// set off on their own line.
pub fn header_orthography(mut frags: Vec<AnchorString>) -> Vec<AnchorString> {
    trim_edges(&mut frags);
    capitalize_first(&mut frags);
    frags.push(AnchorString::literal(HEADER_MARK));
    frags
}

/// The top-level realiser. Owns the lexicon and applies sentence
/// orthography to a root-level sentence node, which would otherwise
/// realise as a bare clause.
pub struct Realiser {
    lexicon: Lexicon,
}

impl Realiser {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::new(),
        }
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    /// Realise a specification tree into anchored fragments.
    pub fn realise(&self, spec: &Spec) -> Vec<AnchorString> {
        let ctx = RealiseContext {
            lexicon: &self.lexicon,
        };
        let frags = spec.realise(&ctx);
        match spec {
            Spec::Sentence(s) if !s.subsentence && !s.parenthetical => {
                sentence_orthography(frags)
            }
            _ => frags,
        }
    }

    /// Realise and join the fragment texts, discarding the anchors.
    pub fn realise_to_string(&self, spec: &Spec) -> String {
        crate::schema::anchor::joined_text(&self.realise(spec))
    }
}

impl Default for Realiser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::anchor::joined_text;

    fn frags(words: &[&str]) -> Vec<Vec<AnchorString>> {
        words.iter().map(|w| vec![AnchorString::from(*w)]).collect()
    }

    #[test]
    fn list_words_inserts_single_spaces() {
        let out = list_words(frags(&["the", "black", "cat"]));
        assert_eq!(joined_text(&out), "the black cat");
    }

    #[test]
    fn list_words_skips_space_before_punctuation() {
        let out = list_words(frags(&["however", ",", "yesterday"]));
        assert_eq!(joined_text(&out), "however, yesterday");
    }

    #[test]
    fn list_words_skips_space_around_brackets() {
        let out = list_words(frags(&["see", "(", "above", ")", "."]));
        assert_eq!(joined_text(&out), "see (above).");
    }

    #[test]
    fn list_words_ignores_empty_fragments() {
        let out = list_words(vec![
            vec![AnchorString::from("a")],
            vec![AnchorString::literal("")],
            vec![AnchorString::from("b")],
        ]);
        assert_eq!(joined_text(&out), "a b");
    }

    #[test]
    fn list_words_no_space_around_markup() {
        let out = list_words(vec![
            vec![AnchorString::literal(LIST_ITEM_MARK)],
            vec![AnchorString::from("item")],
        ]);
        assert_eq!(joined_text(&out), "\n- item");
    }

    #[test]
    fn conjunct_list_empty_and_singleton() {
        assert!(realise_conjunct_list(Vec::new(), "and").is_empty());
        let out = realise_conjunct_list(frags(&["apples"]), "and");
        assert_eq!(joined_text(&out), "apples");
    }

    #[test]
    fn conjunct_list_pair() {
        let out = realise_conjunct_list(frags(&["apples", "oranges"]), "and");
        assert_eq!(joined_text(&out), "apples and oranges");
    }

    #[test]
    fn conjunct_list_oxford_comma() {
        let out = realise_conjunct_list(frags(&["apples", "oranges", "pears"]), "and");
        assert_eq!(joined_text(&out), "apples, oranges, and pears");
    }

    #[test]
    fn conjunct_list_escalates_to_semicolons() {
        let out = realise_conjunct_list(
            frags(&["red, ripe apples", "oranges", "pears"]),
            "and",
        );
        assert_eq!(joined_text(&out), "red, ripe apples; oranges; and pears");
    }

    #[test]
    fn conjunct_list_drops_empty_elements() {
        let out = realise_conjunct_list(
            vec![
                vec![AnchorString::from("apples")],
                Vec::new(),
                vec![AnchorString::from("pears")],
            ],
            "or",
        );
        assert_eq!(joined_text(&out), "apples or pears");
    }

    #[test]
    fn add_punctuation_appends_when_absent() {
        let mut out = vec![AnchorString::from("done")];
        add_punctuation(&mut out, '.');
        assert_eq!(joined_text(&out), "done.");
    }

    #[test]
    fn add_punctuation_stronger_replaces() {
        let mut out = vec![AnchorString::from("done,")];
        add_punctuation(&mut out, '.');
        assert_eq!(joined_text(&out), "done.");
    }

    #[test]
    fn add_punctuation_weaker_is_noop() {
        let mut out = vec![AnchorString::from("done.")];
        add_punctuation(&mut out, ',');
        assert_eq!(joined_text(&out), "done.");
    }

    #[test]
    fn add_punctuation_same_is_noop() {
        let mut out = vec![AnchorString::from("really?")];
        add_punctuation(&mut out, '?');
        assert_eq!(joined_text(&out), "really?");
    }

    #[test]
    fn sentence_orthography_capitalises_and_terminates() {
        let out = sentence_orthography(vec![AnchorString::from("the paper arrived")]);
        assert_eq!(joined_text(&out), "The paper arrived.");
    }

    #[test]
    fn sentence_orthography_keeps_existing_terminal() {
        let out = sentence_orthography(vec![AnchorString::from("did it arrive?")]);
        assert_eq!(joined_text(&out), "Did it arrive?");
    }

    #[test]
    fn sentence_orthography_leaves_trailing_colon() {
        let out = sentence_orthography(vec![AnchorString::from("as follows:")]);
        assert_eq!(joined_text(&out), "As follows:");
    }

    #[test]
    fn sentence_orthography_upgrades_weak_trailing_marks() {
        let out = sentence_orthography(vec![AnchorString::from("it arrived,")]);
        assert_eq!(joined_text(&out), "It arrived.");

        let out = sentence_orthography(vec![AnchorString::from("it arrived;")]);
        assert_eq!(joined_text(&out), "It arrived.");
    }

    #[test]
    fn sentence_orthography_trims_edges() {
        let out = sentence_orthography(vec![AnchorString::from("  spaced out  ")]);
        assert_eq!(joined_text(&out), "Spaced out.");
    }

    #[test]
    fn sentence_orthography_skips_markup_when_capitalising() {
        let out = sentence_orthography(vec![
            AnchorString::literal(LIST_ITEM_MARK),
            AnchorString::from("an item"),
        ]);
        assert_eq!(joined_text(&out), "\n- An item.");
    }

    #[test]
    fn header_ends_with_newline() {
        let out = header_orthography(vec![AnchorString::from("summary")]);
        assert_eq!(joined_text(&out), format!("Summary{}", HEADER_MARK));
    }

    #[test]
    fn realiser_applies_orthography_to_root_sentence() {
        use crate::core::lexicon::Verb;
        use crate::core::phrase::NpPhraseSpec;
        use crate::core::sentence::SPhraseSpec;
        use crate::core::verb_group::VerbGroupSpec;
        use crate::schema::features::Determiner;

        let sentence = SPhraseSpec::new()
            .add_subject(NpPhraseSpec::new("paper").with_determiner(Determiner::The))
            .with_verb_group(VerbGroupSpec::new(Verb::new("arrive").unwrap()));
        let realiser = Realiser::new();
        assert_eq!(
            realiser.realise_to_string(&Spec::Sentence(sentence)),
            "The paper arrives."
        );
    }
}
