use std::fs;
use std::path::{Path, PathBuf};

use corporal::pipeline::{Config, Input};
use corporal::speechacts::{compile, loader, Matcher, PatternCache};

const APOLOGY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<list>
  <header>
    <speechact_type>apology</speechact_type>
    <taxonomie>Expressiv (Emotion)</taxonomie>
  </header>
  <body>
Es tut mir ... leid
sorry
  </body>
</list>
"#;

const PROMISE: &str = r#"<list>
  <header>
    <speechact_type>promise</speechact_type>
    <taxonomie>Kommissiv</taxonomie>
  </header>
  <body>
ich verspreche ...
  </body>
</list>
"#;

const CHAT: &str = "id,Chat Partner,text
1,anna,Es tut mir wirklich sehr leid
2,bob,
3,anna,ich verspreche dir alles
4,bob,Alles gut
";

fn speech_acts(dir: &Path) -> PathBuf {
    let acts = dir.join("acts");
    fs::create_dir(&acts).unwrap();
    fs::write(acts.join("apology.dat"), APOLOGY).unwrap();
    fs::write(acts.join("promise.dat"), PROMISE).unwrap();
    acts
}

#[test]
fn ellipsis_template_matches() {
    let patterns = compile("Es tut mir ... leid").into_patterns();
    assert_eq!(patterns.len(), 1);
    let re = regex::Regex::new(&patterns[0]).unwrap();

    assert!(re.is_match("Es tut mir wirklich sehr leid"));
    assert!(!re.is_match("Es tut mir gut"));
}

#[test]
fn single_word_template() {
    let act = loader::parse(APOLOGY).unwrap();
    assert!(act.is_emotional());
    assert!(!act.is_comment());
    // one pattern for the ellipsis line, two for the single word
    assert_eq!(act.patterns().len(), 3);

    let word_patterns: Vec<regex::Regex> = act.patterns()[1..]
        .iter()
        .map(|p| regex::Regex::new(p).unwrap())
        .collect();
    assert!(word_patterns.iter().any(|re| re.is_match("Echt sorry.")));
    assert!(word_patterns.iter().all(|re| !re.is_match("Vorsorry")));

    let matcher = Matcher::new(&[act]);
    assert!(matcher.annotate("Vorsorry").is_empty());
    assert_eq!(matcher.annotate("Echt sorry.")[0].act, "apology");
}

#[test_log::test]
fn convert_file() {
    let dst = tempfile::tempdir().unwrap();
    let table = dst.path().join("chat.csv");
    fs::write(&table, CHAT).unwrap();

    let mut config = Config::new(Input::File(table));
    config.speech_acts = Some(speech_acts(dst.path()));
    let summary = config.run().unwrap();

    assert_eq!(summary.corpora, 1);
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.report.written, 3);
    assert_eq!(summary.report.skipped_empty, 1);
    assert_eq!(summary.report.matched, 2);

    let out_path = dst.path().join("chat.xml");
    assert_eq!(summary.outputs, vec![out_path.clone()]);

    let out = fs::read_to_string(out_path).unwrap();
    assert!(out.starts_with("<?xml"));
    assert!(out.contains(r#"<corpus tokenCount="9" name="chat.csv""#));
    assert!(out.contains(r#"<text tokenCount="5" id="1" ChatPartner="anna">"#));
    assert!(out.contains(
        r#"<speechact name="apology">Es tut mir wirklich sehr leid</speechact>"#
    ));
    assert!(out.contains(r#"<speechact name="promise">ich verspreche dir alles</speechact>"#));
    assert!(out.contains("Alles\ngut</text>"));
    assert!(!out.contains(r#"id="2""#));
    assert_eq!(out.matches("<speechact ").count(), 2);
}

#[test]
fn convert_without_catalog() {
    let dst = tempfile::tempdir().unwrap();
    let table = dst.path().join("chat.csv");
    fs::write(&table, CHAT).unwrap();

    let mut config = Config::new(Input::File(table));
    config.speech_acts = Some(dst.path().join("nowhere"));
    let summary = config.run().unwrap();

    assert_eq!(summary.report.written, 3);
    assert_eq!(summary.report.matched, 0);
    let out = fs::read_to_string(dst.path().join("chat.xml")).unwrap();
    assert!(!out.contains("<speechact"));
}

#[test_log::test]
fn pattern_cache_is_created_then_used() {
    let dst = tempfile::tempdir().unwrap();
    let table = dst.path().join("chat.csv");
    fs::write(&table, CHAT).unwrap();
    let acts = speech_acts(dst.path());
    let cache_path = dst.path().join("patterns.json");

    let mut config = Config::new(Input::File(table));
    config.speech_acts = Some(acts.clone());
    config.pattern_file = Some(cache_path.clone());
    config.run().unwrap();

    let cached = PatternCache::new(cache_path).try_load().unwrap();
    assert_eq!(cached.len(), 2);

    // the cache is trusted, definitions aren't read again
    fs::remove_dir_all(&acts).unwrap();
    let summary = config.run().unwrap();
    assert_eq!(summary.report.matched, 2);
}

#[test]
fn convert_directory() {
    let dst = tempfile::tempdir().unwrap();
    let input = dst.path().join("tables");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a.csv"), CHAT).unwrap();
    fs::write(input.join("b.tsv"), "text\tid\nsorry\t1\n").unwrap();
    fs::write(input.join("notes.txt"), "not a table").unwrap();
    fs::write(input.join("broken.csv"), "id,body\n1,hallo\n").unwrap();

    let out = dst.path().join("out");
    fs::create_dir(&out).unwrap();

    let mut config = Config::new(Input::Directory(input));
    config.out = Some(out.clone());
    config.speech_acts = Some(speech_acts(dst.path()));
    let summary = config.run().unwrap();

    assert_eq!(summary.corpora, 2);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.outputs, vec![out.join("a.xml"), out.join("b.xml")]);

    let b = fs::read_to_string(out.join("b.xml")).unwrap();
    assert!(b.contains(r#"<speechact name="apology">sorry</speechact>"#));
}

#[test]
fn convert_directory_single_corpus() {
    let dst = tempfile::tempdir().unwrap();
    let input = dst.path().join("tables");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a.csv"), CHAT).unwrap();
    fs::write(input.join("b.csv"), "text\neins zwei drei\n").unwrap();

    let mut config = Config::new(Input::Directory(input.clone()));
    config.single_corpus = true;
    let summary = config.run().unwrap();

    assert_eq!(summary.corpora, 2);
    assert_eq!(summary.outputs, vec![input.join("tables.xml")]);

    let out = fs::read_to_string(input.join("tables.xml")).unwrap();
    assert!(out.contains(r#"<bodies tokenCount="11">"#));
    assert_eq!(out.matches("<corpus ").count(), 2);
    assert!(out.trim_end().ends_with("</bodies>"));
}

#[test]
fn dump_acts() {
    let dst = tempfile::tempdir().unwrap();
    let table = dst.path().join("chat.csv");
    fs::write(&table, CHAT).unwrap();
    let dump = dst.path().join("acts.xml");

    let mut config = Config::new(Input::File(table));
    config.speech_acts = Some(speech_acts(dst.path()));
    config.dump_acts = Some(dump.clone());
    config.run().unwrap();

    let out = fs::read_to_string(dump).unwrap();
    assert!(out.contains(r#"name="apology""#));
    assert!(out.contains(r#"emotional="true""#));
    assert_eq!(out.matches("<pattern>").count(), 4);
}

#[test]
fn dump_acts_failure_does_not_stop_conversion() {
    let dst = tempfile::tempdir().unwrap();
    let table = dst.path().join("chat.csv");
    fs::write(&table, CHAT).unwrap();

    let mut config = Config::new(Input::File(table));
    config.speech_acts = Some(speech_acts(dst.path()));
    config.dump_acts = Some(dst.path().join("missing").join("acts.xml"));
    let summary = config.run().unwrap();

    assert_eq!(summary.failures, 1);
    assert_eq!(summary.corpora, 1);
    assert_eq!(summary.report.matched, 2);
    assert!(dst.path().join("chat.xml").is_file());
    assert!(!dst.path().join("missing").exists());
}
