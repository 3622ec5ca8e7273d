//! Human readable listing of a compiled catalog.
use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::SpeechAct;
use crate::error::Error;
use crate::io::writer::atomic_write;

/// Writes the catalog as an xml listing of acts and their patterns.
pub fn write_acts(dst: &Path, acts: &[SpeechAct]) -> Result<(), Error> {
    atomic_write(dst, |w| write_acts_to(w, acts))?;
    info!("Wrote {} speech acts to {:?}", acts.len(), dst);
    Ok(())
}

fn write_acts_to<W: Write>(dst: W, acts: &[SpeechAct]) -> Result<(), Error> {
    let mut writer = Writer::new_with_indent(dst, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("acts");
    root.push_attribute(("timeStamp", Local::now().to_rfc3339().as_str()));
    writer.write_event(Event::Start(root))?;

    for act in acts {
        let mut elem = BytesStart::new("act");
        elem.push_attribute(("name", act.name()));
        elem.push_attribute(("taxonomie", act.taxonomy()));
        elem.push_attribute(("emotional", if act.is_emotional() { "true" } else { "false" }));
        elem.push_attribute(("comment", if act.is_comment() { "true" } else { "false" }));
        writer.write_event(Event::Start(elem))?;

        for pattern in act.patterns() {
            writer.write_event(Event::Start(BytesStart::new("pattern")))?;
            writer.write_event(Event::Text(BytesText::new(pattern)))?;
            writer.write_event(Event::End(BytesEnd::new("pattern")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("act")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("acts")))?;
    writer.into_inner().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing() {
        let mut act = SpeechAct::new("apology".to_string(), "Expressiv & emotional".to_string());
        act.add_template("Es tut mir ... leid");

        let mut out = Vec::new();
        write_acts_to(&mut out, &[act]).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains(r#"name="apology""#));
        assert!(out.contains(r#"taxonomie="Expressiv &amp; emotional""#));
        assert!(out.contains(r#"emotional="true""#));
        assert!(out.contains(r"<pattern>Es tut mir [\p{L}\p{N} ]* leid</pattern>"));
    }

    #[test]
    fn listing_file() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("acts.xml");
        write_acts(&path, &[]).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("<acts"));
    }
}
