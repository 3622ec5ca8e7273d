//! Speech-act matching.
use log::{debug, warn};
use regex::Regex;

use super::SpeechAct;

/// A speech act found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation<'a> {
    /// name of the speech act
    pub act: &'a str,
    /// first matching span of the pattern
    pub matched: &'a str,
}

struct CompiledAct {
    name: String,
    patterns: Vec<Regex>,
}

/// Regular expressions of a catalog, compiled once for a whole emission.
pub struct Matcher {
    acts: Vec<CompiledAct>,
}

impl Matcher {
    /// Compiles the patterns of each act.
    ///
    /// Patterns that are not valid regular expressions are reported and left out.
    pub fn new(acts: &[SpeechAct]) -> Self {
        let acts = acts
            .iter()
            .map(|act| {
                let patterns = act
                    .patterns()
                    .iter()
                    .filter_map(|p| match Regex::new(p) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            warn!("{}: skipping pattern {:?}: {}", act.name(), p, e);
                            None
                        }
                    })
                    .collect();
                CompiledAct {
                    name: act.name().to_string(),
                    patterns,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "compiled {} patterns for {} speech acts",
            acts.iter().map(|a| a.patterns.len()).sum::<usize>(),
            acts.len()
        );
        Self { acts }
    }

    pub fn nb_acts(&self) -> usize {
        self.acts.len()
    }

    pub fn nb_patterns(&self) -> usize {
        self.acts.iter().map(|a| a.patterns.len()).sum()
    }

    /// Runs every pattern of every act against `content`, in catalog order.
    ///
    /// Each matching pattern yields one [Annotation] holding its first match,
    /// so an act can be found several times.
    pub fn annotate<'a>(&'a self, content: &'a str) -> Vec<Annotation<'a>> {
        let mut annotations = Vec::new();
        for act in &self.acts {
            for pattern in &act.patterns {
                if let Some(m) = pattern.find(content) {
                    annotations.push(Annotation {
                        act: &act.name,
                        matched: m.as_str(),
                    });
                }
            }
        }
        annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<SpeechAct> {
        let mut apology = SpeechAct::new("apology".to_string(), "Expressiv".to_string());
        apology.add_template("Es tut mir ... leid");
        apology.add_template("sorry");

        let mut promise = SpeechAct::new("promise".to_string(), "Kommissiv".to_string());
        promise.add_template("ich verspreche ...");

        vec![apology, promise]
    }

    #[test]
    fn annotate_in_catalog_order() {
        let acts = catalog();
        let matcher = Matcher::new(&acts);
        assert_eq!(matcher.nb_acts(), 2);
        assert_eq!(matcher.nb_patterns(), 4);

        let annotations = matcher.annotate("Es tut mir so leid, ich verspreche es");
        assert_eq!(
            annotations,
            vec![
                Annotation {
                    act: "apology",
                    matched: "Es tut mir so leid"
                },
                Annotation {
                    act: "promise",
                    matched: "ich verspreche es"
                },
            ]
        );
    }

    #[test]
    fn one_annotation_per_pattern() {
        let acts = catalog();
        let matcher = Matcher::new(&acts);

        // both sorry patterns match
        let annotations = matcher.annotate("sorry ich bin sorry");
        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.act == "apology"));
    }

    #[test]
    fn no_match() {
        let acts = catalog();
        let matcher = Matcher::new(&acts);
        assert!(matcher.annotate("Vorsorry, alles gut").is_empty());
    }

    #[test]
    fn templates_with_metacharacters_are_usable() {
        let mut act = SpeechAct::new("fun".to_string(), "Expressiv".to_string());
        act.add_template("Das ist lustig :-)");
        act.add_template("*seufz* na gut");
        act.add_template("(offen ... klammer");
        let matcher = Matcher::new(&[act]);

        assert_eq!(matcher.nb_patterns(), 3);
        assert_eq!(
            matcher.annotate("Das ist lustig :-)"),
            vec![Annotation {
                act: "fun",
                matched: "Das ist lustig :-)"
            }]
        );
        assert_eq!(matcher.annotate("*seufz* na gut").len(), 1);
    }

    #[test]
    fn invalid_cached_pattern_skipped() {
        // hand edited cache
        let act: SpeechAct = serde_json::from_str(
            r#"{"name": "broken", "taxonomy": "x", "is_emotional": false, "is_comment": false,
                "patterns": ["(offen", "hallo welt"]}"#,
        )
        .unwrap();
        let matcher = Matcher::new(&[act]);

        assert_eq!(matcher.nb_patterns(), 1);
        assert_eq!(matcher.annotate("hallo welt").len(), 1);
    }
}
