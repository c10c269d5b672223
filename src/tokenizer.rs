// SPDX-License-Identifier: Apache-2.0

//! The fixed Kokoro symbol table.
//!
//! The model consumes ids over a fixed vocabulary of pad, punctuation, latin
//! letters, and IPA symbols. Symbol order is part of the trained model and
//! must not change.

use std::collections::HashMap;

/// Maximum number of symbol ids the model accepts, before padding.
pub const MAX_TOKENS: usize = 510;

/// Id of the pad symbol (`$`), inserted at both ends of every sequence.
pub const PAD_ID: i64 = 0;

/// Character-to-id table over the Kokoro symbol set.
#[derive(Debug)]
pub struct Vocab {
    table: HashMap<char, i64>,
}

impl Vocab {
    /// Build the symbol table.
    pub fn new() -> Self {
        let pad = "$";
        let punctuation = ";:,.!?¡¿—…\"«»“” ";
        let letters = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
        let letters_ipa = "ɑɐɒæɓʙβɔɕçɗɖðʤəɘɚɛɜɝɞɟʄɡɠɢʛɦɧħɥʜɨɪʝɭɬɫɮʟɱɯɰŋɳɲɴøɵɸθœɶʘɹɺɾɻʀʁɽʂʃʈʧʉʊʋⱱʌɣɤʍχʎʏʑʐʒʔʡʕʢǀǁǂǃˈˌːˑʼʴʰʱʲʷˠˤ˞↓↑→↗↘'̩'ᵻ";

        let mut table = HashMap::new();
        for (id, ch) in pad
            .chars()
            .chain(punctuation.chars())
            .chain(letters.chars())
            .chain(letters_ipa.chars())
            .enumerate()
        {
            table.insert(ch, id as i64);
        }

        Self { table }
    }

    /// Encode a phoneme string to symbol ids.
    ///
    /// Characters outside the table (phoneme separators, unknown symbols)
    /// are skipped.
    pub fn encode(&self, phonemes: &str) -> Vec<i64> {
        phonemes
            .chars()
            .filter_map(|ch| self.table.get(&ch).copied())
            .collect()
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_symbol_has_id_zero() {
        let vocab = Vocab::new();
        assert_eq!(vocab.encode("$"), vec![PAD_ID]);
    }

    #[test]
    fn test_letters_follow_punctuation() {
        let vocab = Vocab::new();
        // 'A' comes right after the pad and the 16 punctuation symbols.
        assert_eq!(vocab.encode("A"), vec![17]);
        assert_eq!(vocab.encode("B"), vec![18]);
        assert_eq!(vocab.encode("a"), vec![43]);
    }

    #[test]
    fn test_unknown_symbols_are_skipped() {
        let vocab = Vocab::new();
        let with_separators = vocab.encode("h_ə_l_oʊ");
        let without = vocab.encode("həloʊ");
        assert_eq!(with_separators, without);
        assert!(vocab.encode("\u{1F600}").is_empty());
    }

    #[test]
    fn test_ipa_symbols_are_encodable() {
        let vocab = Vocab::new();
        for ch in "əɹɔʊˈˌː".chars() {
            assert_eq!(vocab.encode(&ch.to_string()).len(), 1, "missing {ch}");
        }
    }

    #[test]
    fn test_space_is_a_symbol() {
        let vocab = Vocab::new();
        assert_eq!(vocab.encode("a b").len(), 3);
    }
}
