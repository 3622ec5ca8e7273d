/*! Annotated xml emission.

A corpus becomes a `corpus` element, each non-empty text a `text` element:

```xml
<corpus tokenCount="5" name="chat.csv" created="2016-05-01T12:30:00+02:00" author="anna">
  <text tokenCount="5" id="1">
    <speechact name="apology">Es tut mir wirklich sehr leid</speechact>Es
tut
mir
wirklich
sehr
leid</text>
</corpus>
```

Texts are written with their spaces replaced by newlines.
Several corpora can be emitted in a single `bodies` element, see [emit_batch].
!*/
use std::io::Write;
use std::ops::AddAssign;

use log::{debug, info, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::progress::{Progress, PROGRESS_INTERVAL};
use crate::corpus::{Corpus, Text, TOKEN_COUNT};
use crate::error::Error;
use crate::speechacts::{Matcher, SpeechAct};

const BODIES: &str = "bodies";
const CORPUS: &str = "corpus";
const TEXT: &str = "text";
const SPEECH_ACT: &str = "speechact";

/// Counters of an emission.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitReport {
    /// texts written
    pub written: usize,
    /// texts without content, left out
    pub skipped_empty: usize,
    /// texts that couldn't be represented in xml, left out
    pub failed: usize,
    /// written texts holding at least one speech act
    pub matched: usize,
}

impl AddAssign for EmitReport {
    fn add_assign(&mut self, other: Self) {
        self.written += other.written;
        self.skipped_empty += other.skipped_empty;
        self.failed += other.failed;
        self.matched += other.matched;
    }
}

/// Emits `corpus` into `dst`, annotating texts with `catalog` if there's one.
pub fn emit<W: Write>(
    corpus: &Corpus,
    catalog: Option<&[SpeechAct]>,
    dst: W,
) -> Result<EmitReport, Error> {
    let matcher = catalog.map(Matcher::new);
    emit_with(corpus, matcher.as_ref(), dst)
}

/// Same as [emit], with already compiled patterns.
pub fn emit_with<W: Write>(
    corpus: &Corpus,
    matcher: Option<&Matcher>,
    dst: W,
) -> Result<EmitReport, Error> {
    let mut emitter = Emitter::new(dst, matcher);
    emitter.start_document()?;
    let report = emitter.write_corpus(corpus)?;
    emitter.finish()?;
    Ok(report)
}

/// Emits several corpora in a single document.
///
/// The root token count is the sum of the corpora token counts.
pub fn emit_batch<W: Write>(
    corpora: &[Corpus],
    matcher: Option<&Matcher>,
    dst: W,
) -> Result<EmitReport, Error> {
    let mut emitter = Emitter::new(dst, matcher);
    emitter.start_document()?;

    let token_count: usize = corpora.iter().map(Corpus::token_count).sum();
    let mut root = BytesStart::new(BODIES);
    root.push_attribute((TOKEN_COUNT, token_count.to_string().as_str()));
    emitter.writer.write_event(Event::Start(root))?;

    let mut report = EmitReport::default();
    for corpus in corpora {
        report += emitter.write_corpus(corpus)?;
    }

    emitter.writer.write_event(Event::End(BytesEnd::new(BODIES)))?;
    emitter.finish()?;
    Ok(report)
}

/// Streams corpora as xml elements.
pub struct Emitter<'m, W: Write> {
    writer: Writer<W>,
    matcher: Option<&'m Matcher>,
}

impl<'m, W: Write> Emitter<'m, W> {
    pub fn new(dst: W, matcher: Option<&'m Matcher>) -> Self {
        Self {
            writer: Writer::new_with_indent(dst, b' ', 2),
            matcher,
        }
    }

    /// Writes the xml declaration.
    pub fn start_document(&mut self) -> Result<(), Error> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Writes a whole `corpus` element.
    ///
    /// Texts that can't be represented in xml are left out and reported,
    /// errors from the underlying writer stop the emission.
    pub fn write_corpus(&mut self, corpus: &Corpus) -> Result<EmitReport, Error> {
        let mut root = BytesStart::new(CORPUS);
        root.push_attribute((TOKEN_COUNT, corpus.token_count().to_string().as_str()));
        root.push_attribute(("name", corpus.name()));
        for (key, value) in corpus.attributes().iter() {
            if key == TOKEN_COUNT || key == "name" {
                warn!("{}: corpus attribute {} is reserved", corpus.name(), key);
                continue;
            }
            let value = value.to_string();
            if let Err(e) = check_attribute(key, &value) {
                warn!("{}: skipping corpus attribute: {}", corpus.name(), e);
                continue;
            }
            root.push_attribute((key, value.as_str()));
        }
        self.writer.write_event(Event::Start(root))?;

        info!("Converting {} texts", corpus.len());
        let mut progress = Progress::new(corpus.len(), PROGRESS_INTERVAL);
        let mut report = EmitReport::default();

        for (idx, text) in corpus.iter().enumerate() {
            progress.tick(idx + 1);

            if text.is_empty() {
                report.skipped_empty += 1;
                continue;
            }

            let attributes = match render_attributes(text) {
                Ok(attributes) => attributes,
                Err(e) => {
                    warn!("{}: skipping text #{}: {}", corpus.name(), idx + 1, e);
                    report.failed += 1;
                    continue;
                }
            };

            debug!(
                "Adding text {}",
                text.attribute("id")
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| format!("#{}", idx + 1))
            );
            if self.write_text(text, &attributes)? {
                report.matched += 1;
            }
            report.written += 1;
        }

        self.writer.write_event(Event::End(BytesEnd::new(CORPUS)))?;

        if self.matcher.is_some() {
            info!("{} texts contained speech acts", report.matched);
        }
        if report.failed > 0 {
            warn!(
                "{}: {} texts could not be written",
                corpus.name(),
                report.failed
            );
        }
        Ok(report)
    }

    /// Writes a `text` element, returns `true` if a speech act was found.
    fn write_text(&mut self, text: &Text, attributes: &[(&str, String)]) -> Result<bool, Error> {
        let mut elem = BytesStart::new(TEXT);
        for (key, value) in attributes {
            elem.push_attribute((*key, value.as_str()));
        }
        self.writer.write_event(Event::Start(elem))?;

        let mut matched = false;
        if let Some(matcher) = self.matcher {
            for annotation in matcher.annotate(text.content()) {
                let mut act = BytesStart::new(SPEECH_ACT);
                act.push_attribute(("name", annotation.act));
                self.writer.write_event(Event::Start(act))?;
                self.writer
                    .write_event(Event::Text(BytesText::new(annotation.matched)))?;
                self.writer
                    .write_event(Event::End(BytesEnd::new(SPEECH_ACT)))?;
                matched = true;
            }
        }

        let body = text.content().replace(' ', "\n");
        self.writer.write_event(Event::Text(BytesText::new(&body)))?;
        self.writer.write_event(Event::End(BytesEnd::new(TEXT)))?;
        Ok(matched)
    }

    /// Flushes the underlying writer.
    pub fn finish(&mut self) -> Result<(), Error> {
        self.writer.get_mut().write_all(b"\n")?;
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

/// Renders the attributes of a text, checking that they can be written as xml.
fn render_attributes(text: &Text) -> Result<Vec<(&str, String)>, Error> {
    let attributes = text
        .attributes()
        .iter()
        .map(|(key, value)| {
            let value = value.to_string();
            check_attribute(key, &value)?;
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    if let Some(c) = text.content().chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::InvalidRecord(format!(
            "content holds {:?}, which is not allowed in xml",
            c
        )));
    }

    Ok(attributes)
}

fn check_attribute(key: &str, value: &str) -> Result<(), Error> {
    if !is_xml_name(key) {
        return Err(Error::InvalidRecord(format!(
            "attribute name {:?} is not a valid xml name",
            key
        )));
    }
    if let Some(c) = value.chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::InvalidRecord(format!(
            "attribute {} holds {:?}, which is not allowed in xml",
            key, c
        )));
    }
    Ok(())
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => (),
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apology() -> Vec<SpeechAct> {
        let mut act = SpeechAct::new("apology".to_string(), "Expressiv".to_string());
        act.add_template("Es tut mir ... leid");
        vec![act]
    }

    fn emit_string(corpus: &Corpus, catalog: Option<&[SpeechAct]>) -> (EmitReport, String) {
        let mut out = Vec::new();
        let report = emit(corpus, catalog, &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_texts_are_skipped() {
        let mut corpus = Corpus::new("c.csv");
        let mut t = Text::with_content("a b c");
        t.set_attribute("id", "1").unwrap();
        corpus.push(t);
        let mut t = Text::new();
        t.set_attribute("id", "2").unwrap();
        corpus.push(t);

        let (report, out) = emit_string(&corpus, None);
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_empty, 1);
        assert!(out.contains(r#"<corpus tokenCount="2" name="c.csv">"#));
        assert!(out.contains(r#"<text tokenCount="2" id="1">a
b
c</text>"#));
        assert!(!out.contains(r#"id="2""#));
        assert!(!out.contains(SPEECH_ACT));
    }

    #[test]
    fn one_matching_text() {
        let mut corpus = Corpus::new("c.csv");
        corpus.push(Text::with_content("Es tut mir wirklich sehr leid"));
        corpus.push(Text::with_content("Alles gut"));

        let catalog = apology();
        let (report, out) = emit_string(&corpus, Some(catalog.as_slice()));

        assert_eq!(report.written, 2);
        assert_eq!(report.matched, 1);
        assert_eq!(out.matches("<speechact ").count(), 1);
        assert!(out.contains(
            r#"<speechact name="apology">Es tut mir wirklich sehr leid</speechact>"#
        ));
    }

    #[test]
    fn escaping() {
        let mut corpus = Corpus::new("c.csv");
        let mut t = Text::with_content("a < b & c");
        t.set_attribute("author", "A&B <x>").unwrap();
        corpus.push(t);

        let (_, out) = emit_string(&corpus, None);
        assert!(out.contains(r#"author="A&amp;B &lt;x&gt;""#));
        assert!(out.contains("a\n&lt;\nb\n&amp;\nc"));
    }

    #[test]
    fn invalid_texts_are_skipped() {
        let mut corpus = Corpus::new("c.csv");
        let mut t = Text::with_content("hallo welt");
        t.set_attribute("bad name", "x").unwrap();
        corpus.push(t);
        corpus.push(Text::with_content("bell \u{7}"));
        corpus.push(Text::with_content("gut so"));

        let (report, out) = emit_string(&corpus, None);
        assert_eq!(report.failed, 2);
        assert_eq!(report.written, 1);
        assert!(out.contains("gut\nso"));
        assert!(!out.contains("hallo"));
    }

    #[test]
    fn corpus_attributes() {
        let mut corpus = Corpus::new("c.csv");
        corpus.attributes_mut().insert("author", "anna");
        corpus.attributes_mut().insert("tokenCount", "12");
        corpus.push(Text::with_content("x y"));

        let (_, out) = emit_string(&corpus, None);
        assert!(out.contains(r#"<corpus tokenCount="1" name="c.csv" author="anna">"#));
    }

    #[test]
    fn batch() {
        let mut a = Corpus::new("a.csv");
        a.push(Text::with_content("Es tut mir so leid"));
        let mut b = Corpus::new("b.csv");
        b.push(Text::with_content("eins zwei"));
        b.push(Text::new());

        let catalog = apology();
        let matcher = Matcher::new(&catalog);
        let mut out = Vec::new();
        let report = emit_batch(&[a, b], Some(&matcher), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(
            report,
            EmitReport {
                written: 2,
                skipped_empty: 1,
                failed: 0,
                matched: 1
            }
        );
        assert!(out.contains(r#"<bodies tokenCount="5">"#));
        assert!(out.contains(r#"name="a.csv""#));
        assert!(out.contains(r#"name="b.csv""#));
        assert!(out.trim_end().ends_with("</bodies>"));
    }

    #[test]
    fn xml_names() {
        assert!(is_xml_name("tokenCount"));
        assert!(is_xml_name("_id"));
        assert!(is_xml_name("datum-2"));
        assert!(is_xml_name("Änderung"));
        assert!(!is_xml_name("2nd"));
        assert!(!is_xml_name(""));
        assert!(!is_xml_name("a b"));
        assert!(!is_xml_name("a(b)"));
    }
}
