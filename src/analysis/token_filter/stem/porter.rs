//! Porter stemming algorithm implementation.
//!
//! This is the classic 1980 algorithm as published in Martin Porter's
//! reference implementation, including its two departures from the paper
//! (`-bli` → `-ble` and `-logi` → `-log` in step 2). It rewrites a word in
//! five passes:
//! 1. Plurals and -ed/-ing suffixes, then terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and reduce -ll
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::token_filter::stem::Stemmer;
//! use tessera::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

/// Language code served by this stemmer.
pub const LANGUAGE: &str = "en";

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm for English.
///
/// Non-ASCII words are returned unchanged; ASCII words are lowercased before
/// stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if !word.is_ascii() {
            return word.to_string();
        }

        let word = word.to_ascii_lowercase();
        if word.len() <= 2 {
            return word;
        }

        let mut w = Word::new(&word);
        w.step1ab();
        if w.len() > 1 {
            w.step1c();
            w.step2();
            w.step3();
            w.step4();
            w.step5();
        }
        w.into_string()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Working buffer for one word. `j` is the length of the stem left over by
/// the most recent successful [`Word::ends`] call.
struct Word {
    b: Vec<u8>,
    j: usize,
}

impl Word {
    fn new(word: &str) -> Self {
        Word {
            b: word.as_bytes().to_vec(),
            j: 0,
        }
    }

    fn len(&self) -> usize {
        self.b.len()
    }

    fn into_string(self) -> String {
        // Only ASCII bytes are ever written.
        String::from_utf8_lossy(&self.b).into_owned()
    }

    /// Check if the character at `i` is a consonant.
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Measure of the stem `b[..j]`: the number of VC sequences.
    fn measure(&self) -> usize {
        let mut n = 0;
        let mut i = 0;

        // Skip initial consonants
        loop {
            if i >= self.j {
                return n;
            }
            if !self.is_consonant(i) {
                break;
            }
            i += 1;
        }
        i += 1;

        loop {
            // Skip vowels
            loop {
                if i >= self.j {
                    return n;
                }
                if self.is_consonant(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;

            // Skip consonants
            loop {
                if i >= self.j {
                    return n;
                }
                if !self.is_consonant(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    /// Check if the stem `b[..j]` contains a vowel.
    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.is_consonant(i))
    }

    /// Check if `b[..len]` ends with a double consonant.
    fn double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// Check if `b[..len]` ends consonant-vowel-consonant, the last not w, x or y.
    fn cvc(&self, len: usize) -> bool {
        if len < 3 {
            return false;
        }
        let i = len - 1;
        self.is_consonant(i)
            && !self.is_consonant(i - 1)
            && self.is_consonant(i - 2)
            && !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    /// Check if the word ends with `suffix`; on success `j` marks the stem.
    fn ends(&mut self, suffix: &str) -> bool {
        if self.b.ends_with(suffix.as_bytes()) {
            self.j = self.b.len() - suffix.len();
            true
        } else {
            false
        }
    }

    /// Replace everything after the stem with `replacement`.
    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn last(&self) -> u8 {
        self.b[self.b.len() - 1]
    }

    /// Apply the first rule whose suffix matches, if the stem has m > 0.
    fn replace_first_match(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                if self.measure() > 0 {
                    self.set_to(replacement);
                }
                return;
            }
        }
    }

    /// Plurals and -ed/-ing.
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends("sses") {
                self.b.truncate(self.b.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.b[self.b.len() - 2] != b's' {
                self.b.pop();
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.b.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.b.truncate(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.len()) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else {
                self.j = self.len();
                if self.measure() == 1 && self.cvc(self.len()) {
                    self.set_to("e");
                }
            }
        }
    }

    /// Terminal y → i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.b.len() - 1;
            self.b[last] = b'i';
        }
    }

    fn step2(&mut self) {
        self.replace_first_match(STEP2_RULES);
    }

    fn step3(&mut self) {
        self.replace_first_match(STEP3_RULES);
    }

    /// Drop -ant, -ence etc. when the remaining stem has m > 1.
    fn step4(&mut self) {
        for suffix in STEP4_SUFFIXES {
            if !self.ends(suffix) {
                continue;
            }
            if *suffix == "ion" && !(self.j > 0 && matches!(self.b[self.j - 1], b's' | b't')) {
                continue;
            }
            if self.measure() > 1 {
                self.b.truncate(self.j);
            }
            return;
        }
    }

    /// Remove a final -e and reduce -ll to -l.
    fn step5(&mut self) {
        self.j = self.len();
        if self.last() == b'e' {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.len() - 1)) {
                self.b.pop();
            }
        }
        if self.last() == b'l' && self.double_consonant(self.len()) && self.measure() > 1 {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure_of(word: &str) -> usize {
        let mut w = Word::new(word);
        w.j = w.len();
        w.measure()
    }

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("disabled"), "disabl");
        assert_eq!(stemmer.stem("measuring"), "measur");
        assert_eq!(stemmer.stem("itemization"), "item");
        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
    }

    #[test]
    fn test_porter_reference_vocabulary() {
        let stemmer = PorterStemmer::new();
        let cases = [
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "ti"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("sized", "size"),
            ("hopping", "hop"),
            ("tanned", "tan"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("filing", "file"),
            ("happy", "happi"),
            ("sky", "sky"),
            ("relational", "relat"),
            ("conditional", "condit"),
            ("rational", "ration"),
            ("valenci", "valenc"),
            ("digitizer", "digit"),
            ("conformabli", "conform"),
            ("radicalli", "radic"),
            ("differentli", "differ"),
            ("vileli", "vile"),
            ("analogousli", "analog"),
            ("vietnamization", "vietnam"),
            ("predication", "predic"),
            ("operator", "oper"),
            ("feudalism", "feudal"),
            ("decisiveness", "decis"),
            ("hopefulness", "hope"),
            ("callousness", "callous"),
            ("formaliti", "formal"),
            ("sensitiviti", "sensit"),
            ("sensibiliti", "sensibl"),
            ("triplicate", "triplic"),
            ("formative", "form"),
            ("formalize", "formal"),
            ("electriciti", "electr"),
            ("electrical", "electr"),
            ("hopeful", "hope"),
            ("goodness", "good"),
            ("revival", "reviv"),
            ("allowance", "allow"),
            ("inference", "infer"),
            ("airliner", "airlin"),
            ("adjustable", "adjust"),
            ("defensible", "defens"),
            ("irritant", "irrit"),
            ("replacement", "replac"),
            ("adjustment", "adjust"),
            ("dependent", "depend"),
            ("adoption", "adopt"),
            ("homologou", "homolog"),
            ("communism", "commun"),
            ("activate", "activ"),
            ("angulariti", "angular"),
            ("homologous", "homolog"),
            ("effective", "effect"),
            ("bowdlerize", "bowdler"),
            ("probate", "probat"),
            ("rate", "rate"),
            ("cease", "ceas"),
            ("controll", "control"),
            ("roll", "roll"),
            ("generalizations", "gener"),
            ("oscillators", "oscil"),
        ];

        for (word, expected) in cases {
            assert_eq!(stemmer.stem(word), expected, "stemming {word}");
        }
    }

    #[test]
    fn test_porter_win_family() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("win"), "win");
        assert_eq!(stemmer.stem("winning"), "win");
        assert_eq!(stemmer.stem("wins"), "win");
        assert_eq!(stemmer.stem("won"), "won");
        assert_eq!(stemmer.stem("winner"), "winner");
    }

    #[test]
    fn test_porter_short_and_non_ascii() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem(""), "");
        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("Running"), "run");
        assert_eq!(stemmer.stem("naïve"), "naïve");
        assert_eq!(stemmer.stem("ies"), "i");
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(measure_of("tree"), 0);
        assert_eq!(measure_of("trees"), 1);
        assert_eq!(measure_of("trouble"), 1);
        assert_eq!(measure_of("troubles"), 2);
        assert_eq!(measure_of("oaten"), 2);
    }

    #[test]
    fn test_porter_vowel_detection() {
        let w = Word::new("trouble");

        assert!(w.is_consonant(0)); // t
        assert!(w.is_consonant(1)); // r
        assert!(!w.is_consonant(2)); // o
        assert!(!w.is_consonant(3)); // u
        assert!(w.is_consonant(4)); // b
        assert!(w.is_consonant(5)); // l
        assert!(!w.is_consonant(6)); // e

        let w = Word::new("syzygy");
        assert!(w.is_consonant(0)); // s
        assert!(!w.is_consonant(1)); // y after consonant
    }
}
