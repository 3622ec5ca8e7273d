/*! Template to regular expression compiler.

Speech-act templates are sentence skeletons written by hand:

```text
Es tut mir ... leid
Kannst du mir helfen ?
Ich hoffe, dass es klappt
```

The template is escaped first, so its text is matched literally (`:-)` or `*seufz*` are fine).
Compilation is then a sequence of textual rewrites over the escaped text, each leaving a valid
regular expression behind:

1. `...` (1 to 3 dots) surrounded by spaces becomes a filler matching letters, digits and spaces,
1. `?` and `!` get optional spaces around them,
1. `, dass` also accepts `das` and `daß`,
1. commas get optional spaces around them.

A template that still holds no space afterwards is a bare word. Bare words are not returned as a pattern,
since they would match inside longer words (`ah` in `Zahn`). See [single_word_patterns].
!*/
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

/// Matches any run of letters, digits and spaces.
pub const FILLER: &str = r"[\p{L}\p{N} ]*";

lazy_static! {
    // rules work on escaped text, where a dot is `\.` and a question mark `\?`
    static ref ELLIPSIS_END: Regex = Regex::new(r"[ ]+(?:\\\.){1,3}$").unwrap();
    static ref ELLIPSIS_START: Regex = Regex::new(r"^(?:\\\.){1,3}[ ]+").unwrap();
    static ref ELLIPSIS_MIDDLE: Regex = Regex::new(r"[ ]+(?:\\\.){1,3}[ ]+").unwrap();
    static ref PUNCTUATION: Regex = Regex::new(r"[ ]?(\\\?|!)").unwrap();
    static ref DASS: Regex = Regex::new(r",[ ]*da(?:ss|ß)[ ]?").unwrap();
    static ref COMMA: Regex = Regex::new(r"[ ]*,[ ]*").unwrap();
}

/// Outcome of a template compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// A regular expression usable as is.
    Pattern(String),
    /// The template is a single bare word, which needs boundaries.
    SingleWord(String),
}

impl Compiled {
    /// Expands the outcome into the patterns to match against.
    ///
    /// A [Compiled::SingleWord] yields the two patterns of [single_word_patterns].
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            Compiled::Pattern(p) => vec![p],
            Compiled::SingleWord(word) => single_word_patterns(&word).to_vec(),
        }
    }
}

/// Compiles a template line into a regular expression.
pub fn compile(template: &str) -> Compiled {
    let template = template.trim();
    let escaped = regex::escape(template);

    let sentence = ELLIPSIS_END.replace_all(&escaped, NoExpand(&format!(" {}", FILLER)));
    let sentence = ELLIPSIS_START.replace_all(&sentence, NoExpand(&format!("{} ", FILLER)));
    let sentence = ELLIPSIS_MIDDLE.replace_all(&sentence, NoExpand(&format!(" {} ", FILLER)));
    let sentence = PUNCTUATION.replace_all(&sentence, "[ ]?[${1}][ ]?");

    // common misspellings of the conjunction
    let sentence = DASS.replace_all(&sentence, NoExpand(",da(?:ss|s|ß)[ ]?"));
    let sentence = COMMA.replace_all(&sentence, NoExpand("[ ]?,[ ]?"));

    if sentence.contains(' ') {
        Compiled::Pattern(sentence.into_owned())
    } else {
        Compiled::SingleWord(template.to_string())
    }
}

/// Builds the boundary-anchored patterns of a bare word.
///
/// The first one matches the word at the end of the text (after a space, a comma or a semicolon,
/// optionally followed by closing punctuation), the second one matches the word at the start
/// of the text or after a space, followed by spaces.
pub fn single_word_patterns(word: &str) -> [String; 2] {
    let word = regex::escape(word);
    [
        format!(r"(?:^|[,;]?[ ]+){}[.!?]*$", word),
        format!(r"(?:^|[ ]){}[ ]+[,;]?", word),
    ]
}
