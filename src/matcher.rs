use crate::index::EntryIndex;
use crate::model::AppEntry;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

/// Ranks visible entries against a typed phrase.
pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Best matches first. Name matches outrank comment matches, which
    /// outrank exec matches; ties fall back to name order.
    pub fn rank<'a>(&mut self, phrase: &str, index: &'a EntryIndex) -> Vec<&'a AppEntry> {
        let pattern = Pattern::parse(phrase, CaseMatching::Smart, Normalization::Smart);
        let mut buf = Vec::new();
        let mut scored: Vec<(u32, &AppEntry)> = Vec::new();

        for entry in index.entries().iter().filter(|e| !e.hidden) {
            let name = Utf32Str::new(&entry.localized_name, &mut buf);
            let mut score = pattern.score(name, &mut self.matcher);
            if score.is_none() {
                let comment = Utf32Str::new(&entry.localized_comment, &mut buf);
                score = pattern.score(comment, &mut self.matcher).map(|s| s / 2);
            }
            if score.is_none() {
                let exec = Utf32Str::new(&entry.exec, &mut buf);
                score = pattern.score(exec, &mut self.matcher).map(|s| s / 4);
            }
            if let Some(score) = score {
                scored.push((score, entry));
            }
        }

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.localized_name.cmp(&b.1.localized_name))
        });
        scored.into_iter().map(|(_, entry)| entry).collect()
    }
}
